//! In-memory driver directory.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

use crate::order::{
    domain::{Car, Driver, DriverId, PersonName},
    ports::{DriverDirectory, DriverDirectoryError, DriverDirectoryResult},
};

/// Thread-safe in-memory driver directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDriverDirectory {
    drivers: Arc<RwLock<HashMap<DriverId, Driver>>>,
}

impl InMemoryDriverDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory holding `drivers`. Later duplicates win.
    #[must_use]
    pub fn with_drivers(drivers: impl IntoIterator<Item = Driver>) -> Self {
        let index = drivers
            .into_iter()
            .map(|driver| (driver.id(), driver))
            .collect();
        Self {
            drivers: Arc::new(RwLock::new(index)),
        }
    }

    /// Creates a directory seeded with the demo driver used by the sample
    /// data set.
    #[must_use]
    pub fn with_default_drivers() -> Self {
        Self::with_drivers([Driver::new(
            DriverId::new(15),
            PersonName::new("Drive", "Driverson"),
            Car::new("Lada sedan", "Baklazhan", "A123BT 66"),
        )])
    }
}

impl DriverDirectory for InMemoryDriverDirectory {
    fn read(&self, id: DriverId) -> DriverDirectoryResult<Driver> {
        let drivers = self.drivers.read().map_err(|err| {
            DriverDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        drivers
            .get(&id)
            .cloned()
            .ok_or(DriverDirectoryError::NotFound(id))
    }

    fn write(&self, driver: &Driver) -> DriverDirectoryResult<()> {
        let mut drivers = self.drivers.write().map_err(|err| {
            DriverDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let replaced = drivers.insert(driver.id(), driver.clone()).is_some();
        debug!(driver_id = %driver.id(), replaced, "driver registered");
        Ok(())
    }
}
