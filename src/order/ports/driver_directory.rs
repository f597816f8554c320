//! Directory port for resolving drivers by identifier.

use crate::order::domain::{Driver, DriverId};
use std::sync::Arc;
use thiserror::Error;

/// Result type for driver directory operations.
pub type DriverDirectoryResult<T> = Result<T, DriverDirectoryError>;

/// Lookup and registration of drivers.
#[cfg_attr(test, mockall::automock)]
pub trait DriverDirectory: Send + Sync {
    /// Returns the driver registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DriverDirectoryError::NotFound`] when no driver has that
    /// identifier.
    fn read(&self, id: DriverId) -> DriverDirectoryResult<Driver>;

    /// Registers `driver`, replacing any record with the same identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DriverDirectoryError::Persistence`] when the backing store
    /// fails.
    fn write(&self, driver: &Driver) -> DriverDirectoryResult<()>;
}

/// Errors returned by driver directory implementations.
#[derive(Debug, Clone, Error)]
pub enum DriverDirectoryError {
    /// No driver is registered under the identifier.
    #[error("unknown driver id {0}")]
    NotFound(DriverId),

    /// Backing store failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DriverDirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
