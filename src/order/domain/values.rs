//! Value objects describing people, places, cars and order timing.

use crate::value::{NormalizeField, value_object};
use chrono::{DateTime, Utc};

value_object! {
    /// First and last name of a client or driver.
    pub struct PersonName {
        /// Returns the first name, if known.
        first_name: Option<String>,
        /// Returns the last name, if known.
        last_name: Option<String>,
    }
}

impl PersonName {
    /// Creates a name from both parts. Blank parts are stored as unset.
    #[must_use]
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self::from_parts(Some(first_name.into()), Some(last_name.into()))
    }

    /// Creates a name from optional parts. Blank parts are stored as unset.
    #[must_use]
    pub fn from_parts(first_name: Option<String>, last_name: Option<String>) -> Self {
        Self {
            first_name: first_name.normalize(),
            last_name: last_name.normalize(),
        }
    }

    /// Returns a name with both parts unset.
    #[must_use]
    pub const fn unset() -> Self {
        Self {
            first_name: None,
            last_name: None,
        }
    }

    /// Returns the present name parts joined by a single space.
    #[must_use]
    pub fn full_name(&self) -> String {
        join_present([self.first_name.as_deref(), self.last_name.as_deref()])
    }
}

value_object! {
    /// Street address used as a pickup point or destination.
    pub struct Address {
        /// Returns the street, if known.
        street: Option<String>,
        /// Returns the building, if known.
        building: Option<String>,
    }
}

impl Address {
    /// Creates an address. Blank parts are stored as unset.
    #[must_use]
    pub fn new(street: impl Into<String>, building: impl Into<String>) -> Self {
        Self::from_parts(Some(street.into()), Some(building.into()))
    }

    /// Creates an address from optional parts. Blank parts are stored as unset.
    #[must_use]
    pub fn from_parts(street: Option<String>, building: Option<String>) -> Self {
        Self {
            street: street.normalize(),
            building: building.normalize(),
        }
    }

    /// Returns an address with no parts set.
    #[must_use]
    pub const fn unset() -> Self {
        Self {
            street: None,
            building: None,
        }
    }

    /// Returns the present address parts joined by a single space.
    #[must_use]
    pub fn line(&self) -> String {
        join_present([self.street.as_deref(), self.building.as_deref()])
    }
}

value_object! {
    /// Car driven by a registered driver.
    pub struct Car {
        /// Returns the car model, if known.
        model: Option<String>,
        /// Returns the car colour, if known.
        color: Option<String>,
        /// Returns the licence plate, if known.
        plate_number: Option<String>,
    }
}

impl Car {
    /// Creates a car description. Blank parts are stored as unset.
    #[must_use]
    pub fn new(
        model: impl Into<String>,
        color: impl Into<String>,
        plate_number: impl Into<String>,
    ) -> Self {
        Self {
            model: present(model),
            color: present(color),
            plate_number: present(plate_number),
        }
    }

    /// Returns a car with every field unset.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            model: None,
            color: None,
            plate_number: None,
        }
    }

    /// Returns whether every field is unset.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.model.is_none() && self.color.is_none() && self.plate_number.is_none()
    }
}

value_object! {
    /// Timestamps of every lifecycle transition an order has gone through.
    pub struct TimeInfo {
        /// Returns when the order was created.
        creation_time: DateTime<Utc>,
        /// Returns when the current driver was assigned, if ever.
        driver_assignment_time: Option<DateTime<Utc>>,
        /// Returns when the order was last canceled, if ever.
        cancel_time: Option<DateTime<Utc>>,
        /// Returns when the ride started, if it has.
        start_ride_time: Option<DateTime<Utc>>,
        /// Returns when the ride finished, if it has.
        finish_ride_time: Option<DateTime<Utc>>,
    }
}

impl TimeInfo {
    /// Creates timing information for an order created at `creation_time`.
    #[must_use]
    pub const fn new(creation_time: DateTime<Utc>) -> Self {
        Self {
            creation_time,
            driver_assignment_time: None,
            cancel_time: None,
            start_ride_time: None,
            finish_ride_time: None,
        }
    }

    pub(crate) fn record_driver_assignment(&mut self, at: DateTime<Utc>) {
        self.driver_assignment_time = Some(at);
    }

    pub(crate) fn record_cancel(&mut self, at: DateTime<Utc>) {
        self.cancel_time = Some(at);
    }

    pub(crate) fn record_start_ride(&mut self, at: DateTime<Utc>) {
        self.start_ride_time = Some(at);
    }

    pub(crate) fn record_finish_ride(&mut self, at: DateTime<Utc>) {
        self.finish_ride_time = Some(at);
    }
}

fn present(value: impl Into<String>) -> Option<String> {
    let raw: String = value.into();
    Some(raw).normalize()
}

/// Joins the present, non-blank parts with a single space.
fn join_present<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> String {
    parts
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
