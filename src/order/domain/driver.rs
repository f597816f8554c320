//! Driver entity.

use super::{Car, DriverId, PersonName};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Registered driver together with the car they drive.
///
/// Drivers are entities: two records with the same [`DriverId`] describe the
/// same driver, so equality and hashing consider the identifier only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    id: DriverId,
    full_name: PersonName,
    car: Car,
}

impl Driver {
    /// Creates a driver record.
    #[must_use]
    pub const fn new(id: DriverId, full_name: PersonName, car: Car) -> Self {
        Self { id, full_name, car }
    }

    /// Returns the driver identifier.
    #[must_use]
    pub const fn id(&self) -> DriverId {
        self.id
    }

    /// Returns the driver's name.
    #[must_use]
    pub const fn full_name(&self) -> &PersonName {
        &self.full_name
    }

    /// Returns the driver's car.
    #[must_use]
    pub const fn car(&self) -> &Car {
        &self.car
    }
}

impl PartialEq for Driver {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Driver {}

impl Hash for Driver {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
