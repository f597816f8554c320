//! Taxi order aggregate root and its lifecycle types.

use super::{
    Address, Car, Driver, OrderDomainError, OrderId, ParseOrderStatusError, PersonName, TimeInfo,
};
use crate::value::TIMESTAMP_FORMAT;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order has been placed and no driver is assigned.
    WaitingForDriver,
    /// A driver is assigned and on the way to the pickup point.
    WaitingCarArrival,
    /// The ride is under way.
    InProgress,
    /// The ride has been completed.
    Finished,
    /// The order has been canceled.
    Canceled,
}

impl OrderStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WaitingForDriver => "waiting_for_driver",
            Self::WaitingCarArrival => "waiting_car_arrival",
            Self::InProgress => "in_progress",
            Self::Finished => "finished",
            Self::Canceled => "canceled",
        }
    }

    /// Returns the status name shown in order summaries.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::WaitingForDriver => "WaitingForDriver",
            Self::WaitingCarArrival => "WaitingCarArrival",
            Self::InProgress => "InProgress",
            Self::Finished => "Finished",
            Self::Canceled => "Canceled",
        }
    }

    /// Returns whether no forward transition leaves this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Canceled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<&str> for OrderStatus {
    type Error = ParseOrderStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "waiting_for_driver" => Ok(Self::WaitingForDriver),
            "waiting_car_arrival" => Ok(Self::WaitingCarArrival),
            "in_progress" => Ok(Self::InProgress),
            "finished" => Ok(Self::Finished),
            "canceled" => Ok(Self::Canceled),
            _ => Err(ParseOrderStatusError(value.to_owned())),
        }
    }
}

/// Lifecycle operation that can be rejected by an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderOperation {
    /// Assigning a driver.
    AssignDriver,
    /// Removing the assigned driver.
    UnassignDriver,
    /// Starting the ride.
    StartRide,
    /// Finishing the ride.
    FinishRide,
    /// Canceling the order.
    Cancel,
}

impl fmt::Display for OrderOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AssignDriver => "assign a driver to",
            Self::UnassignDriver => "unassign the driver from",
            Self::StartRide => "start the ride of",
            Self::FinishRide => "finish the ride of",
            Self::Cancel => "cancel",
        })
    }
}

/// Taxi order aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxiOrder {
    id: OrderId,
    client_name: PersonName,
    start: Address,
    destination: Address,
    driver: Option<Driver>,
    status: OrderStatus,
    time_info: TimeInfo,
}

/// Parameter object for reconstructing a stored order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedOrderData {
    /// Stored order identifier.
    pub id: OrderId,
    /// Stored client name.
    pub client_name: PersonName,
    /// Stored pickup address.
    pub start: Address,
    /// Stored destination address.
    pub destination: Address,
    /// Stored driver, if one was assigned.
    pub driver: Option<Driver>,
    /// Stored lifecycle status.
    pub status: OrderStatus,
    /// Stored transition timestamps.
    pub time_info: TimeInfo,
}

impl TaxiOrder {
    /// Creates an order waiting for a driver, with no destination yet.
    #[must_use]
    pub const fn new(
        id: OrderId,
        client_name: PersonName,
        start: Address,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            client_name,
            start,
            destination: Address::unset(),
            driver: None,
            status: OrderStatus::WaitingForDriver,
            time_info: TimeInfo::new(created_at),
        }
    }

    /// Reconstructs an order from stored fields without validation.
    #[must_use]
    pub fn from_persisted(data: PersistedOrderData) -> Self {
        Self {
            id: data.id,
            client_name: data.client_name,
            start: data.start,
            destination: data.destination,
            driver: data.driver,
            status: data.status,
            time_info: data.time_info,
        }
    }

    /// Returns the order identifier.
    #[must_use]
    pub const fn id(&self) -> OrderId {
        self.id
    }

    /// Returns the client's name.
    #[must_use]
    pub const fn client_name(&self) -> &PersonName {
        &self.client_name
    }

    /// Returns the pickup address.
    #[must_use]
    pub const fn start(&self) -> &Address {
        &self.start
    }

    /// Returns the destination address.
    #[must_use]
    pub const fn destination(&self) -> &Address {
        &self.destination
    }

    /// Returns the assigned driver, if any.
    #[must_use]
    pub const fn driver(&self) -> Option<&Driver> {
        self.driver.as_ref()
    }

    /// Returns the assigned driver's car, if a driver is assigned.
    #[must_use]
    pub fn car(&self) -> Option<&Car> {
        self.driver.as_ref().map(Driver::car)
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns the transition timestamps.
    #[must_use]
    pub const fn time_info(&self) -> &TimeInfo {
        &self.time_info
    }

    /// Replaces the destination. Allowed in every status.
    pub fn update_destination(&mut self, destination: Address) {
        self.destination = destination;
    }

    /// Checks that a driver may be assigned right now.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::InvalidState`] unless the order is
    /// [`OrderStatus::WaitingForDriver`].
    pub fn ensure_can_assign_driver(&self) -> Result<(), OrderDomainError> {
        if self.status != OrderStatus::WaitingForDriver {
            return Err(self.invalid_state(OrderOperation::AssignDriver));
        }
        Ok(())
    }

    /// Assigns `driver` and moves the order to
    /// [`OrderStatus::WaitingCarArrival`].
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::InvalidState`] unless the order is
    /// [`OrderStatus::WaitingForDriver`].
    pub fn assign_driver(
        &mut self,
        driver: Driver,
        at: DateTime<Utc>,
    ) -> Result<(), OrderDomainError> {
        self.ensure_can_assign_driver()?;
        self.driver = Some(driver);
        self.status = OrderStatus::WaitingCarArrival;
        self.time_info.record_driver_assignment(at);
        Ok(())
    }

    /// Removes the assigned driver and returns the order to
    /// [`OrderStatus::WaitingForDriver`].
    ///
    /// Finished and canceled orders that still carry a driver may be
    /// unassigned as well.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::InvalidState`] when no driver is assigned
    /// or the order is waiting for a driver or in progress.
    pub fn unassign_driver(&mut self) -> Result<(), OrderDomainError> {
        let allowed = self.driver.is_some()
            && !matches!(
                self.status,
                OrderStatus::WaitingForDriver | OrderStatus::InProgress
            );
        if !allowed {
            return Err(self.invalid_state(OrderOperation::UnassignDriver));
        }
        self.driver = None;
        self.status = OrderStatus::WaitingForDriver;
        Ok(())
    }

    /// Starts the ride.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::InvalidState`] when no driver is assigned
    /// or the order is not [`OrderStatus::WaitingCarArrival`].
    pub fn start_ride(&mut self, at: DateTime<Utc>) -> Result<(), OrderDomainError> {
        self.ensure_driver_in(OrderOperation::StartRide, OrderStatus::WaitingCarArrival)?;
        self.status = OrderStatus::InProgress;
        self.time_info.record_start_ride(at);
        Ok(())
    }

    /// Finishes the ride.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::InvalidState`] when no driver is assigned
    /// or the order is not [`OrderStatus::InProgress`].
    pub fn finish_ride(&mut self, at: DateTime<Utc>) -> Result<(), OrderDomainError> {
        self.ensure_driver_in(OrderOperation::FinishRide, OrderStatus::InProgress)?;
        self.status = OrderStatus::Finished;
        self.time_info.record_finish_ride(at);
        Ok(())
    }

    /// Cancels the order. Repeated cancellation re-stamps the cancel time.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::InvalidState`] while the ride is in
    /// progress.
    pub fn cancel(&mut self, at: DateTime<Utc>) -> Result<(), OrderDomainError> {
        if self.status == OrderStatus::InProgress {
            return Err(self.invalid_state(OrderOperation::Cancel));
        }
        self.status = OrderStatus::Canceled;
        self.time_info.record_cancel(at);
        Ok(())
    }

    /// Describes the assigned driver and their car.
    ///
    /// Returns `None` while the order waits for a driver. An order that left
    /// that status without ever getting a driver is described with id 0 and
    /// empty name and car fields.
    #[must_use]
    pub fn driver_full_info(&self) -> Option<String> {
        if self.status == OrderStatus::WaitingForDriver {
            return None;
        }
        let unassigned = Car::empty();
        let (id, name, car) = self.driver.as_ref().map_or(
            (0, String::new(), &unassigned),
            |driver| (driver.id().value(), driver.full_name().full_name(), driver.car()),
        );
        Some(format!(
            "Id: {id} DriverName: {name} Color: {} CarModel: {} PlateNumber: {}",
            car.color().as_deref().unwrap_or_default(),
            car.model().as_deref().unwrap_or_default(),
            car.plate_number().as_deref().unwrap_or_default(),
        ))
    }

    /// Summarises the order on a single line.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::UnsupportedProgressStatus`] when the
    /// current status has no recorded progress time.
    pub fn short_order_info(&self) -> Result<String, OrderDomainError> {
        let driver_name = self
            .driver
            .as_ref()
            .map(|driver| driver.full_name().full_name())
            .unwrap_or_default();
        let last_progress = self.last_progress_time()?;
        Ok([
            format!("OrderId: {}", self.id),
            format!("Status: {}", self.status),
            format!("Client: {}", self.client_name.full_name()),
            format!("Driver: {driver_name}"),
            format!("From: {}", self.start.line()),
            format!("To: {}", self.destination.line()),
            format!(
                "LastProgressTime: {}",
                last_progress.format(TIMESTAMP_FORMAT)
            ),
        ]
        .join(" "))
    }

    /// Returns the timestamp of the transition that produced the current
    /// status.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::UnsupportedProgressStatus`] when that
    /// timestamp was never recorded.
    pub fn last_progress_time(&self) -> Result<DateTime<Utc>, OrderDomainError> {
        let recorded = match self.status {
            OrderStatus::WaitingForDriver => Some(*self.time_info.creation_time()),
            OrderStatus::WaitingCarArrival => *self.time_info.driver_assignment_time(),
            OrderStatus::InProgress => *self.time_info.start_ride_time(),
            OrderStatus::Finished => *self.time_info.finish_ride_time(),
            OrderStatus::Canceled => *self.time_info.cancel_time(),
        };
        recorded.ok_or(OrderDomainError::UnsupportedProgressStatus {
            order_id: self.id,
            status: self.status,
        })
    }

    fn ensure_driver_in(
        &self,
        operation: OrderOperation,
        required: OrderStatus,
    ) -> Result<(), OrderDomainError> {
        if self.driver.is_none() || self.status != required {
            return Err(self.invalid_state(operation));
        }
        Ok(())
    }

    const fn invalid_state(&self, operation: OrderOperation) -> OrderDomainError {
        OrderDomainError::InvalidState {
            order_id: self.id,
            operation,
            status: self.status,
        }
    }
}
