//! Shared fixtures for order tests.

use crate::order::domain::{Address, Car, Driver, DriverId, OrderId, PersonName, TaxiOrder};
use chrono::{DateTime, Local, Utc};
use mockable::Clock;
use std::sync::Mutex;

const BASE_SECONDS: i64 = 1_704_103_200;

/// Returns 2024-01-01 10:00:00 UTC plus `minutes`.
pub fn minute(minutes: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(BASE_SECONDS + minutes * 60, 0).unwrap_or_default()
}

/// Clock returning `minute(0)`, `minute(1)`, ... on successive reads.
#[derive(Debug, Default)]
pub struct SteppingClock {
    reads: Mutex<i64>,
}

impl SteppingClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut reads = self
            .reads
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let now = minute(*reads);
        *reads += 1;
        now
    }
}

pub fn demo_driver() -> Driver {
    Driver::new(
        DriverId::new(15),
        PersonName::new("Drive", "Driverson"),
        Car::new("Lada sedan", "Baklazhan", "A123BT 66"),
    )
}

pub fn new_order() -> TaxiOrder {
    TaxiOrder::new(
        OrderId::new(7),
        PersonName::new("Ann", "Lee"),
        Address::new("Main St", "12"),
        minute(0),
    )
}
