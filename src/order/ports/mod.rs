//! Port contracts for taxi order management.
//!
//! Ports define infrastructure-agnostic interfaces used by order services.

pub mod driver_directory;

#[cfg(test)]
pub use driver_directory::MockDriverDirectory;
pub use driver_directory::{DriverDirectory, DriverDirectoryError, DriverDirectoryResult};
