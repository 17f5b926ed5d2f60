//! Local directory transport.
//!
//! Treats `remotePath` as a directory on this machine and mirrors
//! project files into it. Useful for staging deployments onto mounted
//! shares and for exercising the deploy engine end to end.

mod checksum;
mod connection;
mod scanner;
mod validation;

pub use checksum::file_checksum;
pub use connection::{LocalConnection, LocalConnectionProvider};
pub use scanner::{ScannedFile, scan_files};
pub use validation::validate_relative_path;
