//! Service layer exposing one operation per order lifecycle step.

use crate::order::{
    domain::{
        Address, Driver, DriverId, OrderDomainError, OrderIdSequence, PersonName, TaxiOrder,
    },
    ports::{DriverDirectory, DriverDirectoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for placing a new order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrderRequest {
    client_first_name: Option<String>,
    client_last_name: Option<String>,
    street: Option<String>,
    building: Option<String>,
}

impl CreateOrderRequest {
    /// Creates a request with the client's name and pickup address.
    #[must_use]
    pub fn new(
        client_first_name: impl Into<String>,
        client_last_name: impl Into<String>,
        street: impl Into<String>,
        building: impl Into<String>,
    ) -> Self {
        Self {
            client_first_name: Some(client_first_name.into()),
            client_last_name: Some(client_last_name.into()),
            street: Some(street.into()),
            building: Some(building.into()),
        }
    }

    /// Creates a request whose client name parts may be unknown.
    #[must_use]
    pub fn with_optional_name(
        client_first_name: Option<String>,
        client_last_name: Option<String>,
        street: impl Into<String>,
        building: impl Into<String>,
    ) -> Self {
        Self {
            client_first_name,
            client_last_name,
            street: Some(street.into()),
            building: Some(building.into()),
        }
    }
}

/// Service-level errors for order operations.
#[derive(Debug, Error)]
pub enum TaxiOrderServiceError {
    /// The order rejected the operation.
    #[error(transparent)]
    Domain(#[from] OrderDomainError),
    /// The driver directory failed or did not know the driver.
    #[error(transparent)]
    Directory(#[from] DriverDirectoryError),
    /// The order identifier sequence has no identifiers left.
    #[error("order identifier sequence exhausted")]
    OrderIdsExhausted,
}

/// Result type for order service operations.
pub type TaxiOrderServiceResult<T> = Result<T, TaxiOrderServiceError>;

/// Facade that timestamps each order mutation and delegates to the order.
///
/// The service owns the order identifier sequence and shares the driver
/// directory and clock. Orders themselves stay with the caller, who passes
/// them back into each call.
pub struct TaxiOrderService<D, C>
where
    D: DriverDirectory,
    C: Clock + Send + Sync,
{
    directory: Arc<D>,
    clock: Arc<C>,
    order_ids: OrderIdSequence,
}

impl<D, C> TaxiOrderService<D, C>
where
    D: DriverDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a service whose first order receives identifier zero.
    #[must_use]
    pub const fn new(directory: Arc<D>, clock: Arc<C>) -> Self {
        Self::with_sequence(directory, clock, OrderIdSequence::new())
    }

    /// Creates a service drawing order identifiers from `order_ids`.
    #[must_use]
    pub const fn with_sequence(
        directory: Arc<D>,
        clock: Arc<C>,
        order_ids: OrderIdSequence,
    ) -> Self {
        Self {
            directory,
            clock,
            order_ids,
        }
    }

    /// Places a new order waiting for a driver.
    ///
    /// # Errors
    ///
    /// Returns [`TaxiOrderServiceError::OrderIdsExhausted`] when no order
    /// identifier is left to hand out.
    pub fn create_order(&self, request: CreateOrderRequest) -> TaxiOrderServiceResult<TaxiOrder> {
        let order_id = self.order_ids.next_id().ok_or_else(|| {
            warn!("order identifier sequence exhausted");
            TaxiOrderServiceError::OrderIdsExhausted
        })?;
        let order = TaxiOrder::new(
            order_id,
            PersonName::from_parts(request.client_first_name, request.client_last_name),
            Address::from_parts(request.street, request.building),
            self.clock.utc(),
        );
        info!(order_id = %order.id(), "order created");
        Ok(order)
    }

    /// Replaces the order destination.
    pub fn update_destination(
        &self,
        order: &mut TaxiOrder,
        street: impl Into<String>,
        building: impl Into<String>,
    ) {
        order.update_destination(Address::new(street, building));
        debug!(order_id = %order.id(), "destination updated");
    }

    /// Registers or replaces a driver in the directory.
    ///
    /// # Errors
    ///
    /// Returns [`TaxiOrderServiceError::Directory`] when the directory
    /// rejects the write.
    pub fn register_driver(&self, driver: &Driver) -> TaxiOrderServiceResult<()> {
        self.directory.write(driver)?;
        Ok(())
    }

    /// Assigns the driver registered under `driver_id`.
    ///
    /// The directory is consulted only when the order accepts an assignment,
    /// and the order is left untouched when the lookup fails.
    ///
    /// # Errors
    ///
    /// Returns [`TaxiOrderServiceError::Domain`] when the order is not
    /// waiting for a driver, or [`TaxiOrderServiceError::Directory`] when the
    /// driver cannot be resolved.
    pub fn assign_driver(
        &self,
        order: &mut TaxiOrder,
        driver_id: DriverId,
    ) -> TaxiOrderServiceResult<()> {
        order.ensure_can_assign_driver().inspect_err(log_rejection)?;
        let driver = self.directory.read(driver_id).inspect_err(|err| {
            warn!(order_id = %order.id(), %driver_id, error = %err, "driver lookup failed");
        })?;
        order
            .assign_driver(driver, self.clock.utc())
            .inspect_err(log_rejection)?;
        debug!(order_id = %order.id(), %driver_id, status = %order.status(), "driver assigned");
        Ok(())
    }

    /// Removes the assigned driver.
    ///
    /// # Errors
    ///
    /// Returns [`TaxiOrderServiceError::Domain`] when the order cannot give
    /// up its driver.
    pub fn unassign_driver(&self, order: &mut TaxiOrder) -> TaxiOrderServiceResult<()> {
        order.unassign_driver().inspect_err(log_rejection)?;
        debug!(order_id = %order.id(), status = %order.status(), "driver unassigned");
        Ok(())
    }

    /// Cancels the order.
    ///
    /// # Errors
    ///
    /// Returns [`TaxiOrderServiceError::Domain`] while the ride is in
    /// progress.
    pub fn cancel(&self, order: &mut TaxiOrder) -> TaxiOrderServiceResult<()> {
        order.cancel(self.clock.utc()).inspect_err(log_rejection)?;
        debug!(order_id = %order.id(), status = %order.status(), "order canceled");
        Ok(())
    }

    /// Starts the ride.
    ///
    /// # Errors
    ///
    /// Returns [`TaxiOrderServiceError::Domain`] unless a driver is assigned
    /// and waiting at the pickup point.
    pub fn start_ride(&self, order: &mut TaxiOrder) -> TaxiOrderServiceResult<()> {
        order
            .start_ride(self.clock.utc())
            .inspect_err(log_rejection)?;
        debug!(order_id = %order.id(), status = %order.status(), "ride started");
        Ok(())
    }

    /// Finishes the ride.
    ///
    /// # Errors
    ///
    /// Returns [`TaxiOrderServiceError::Domain`] unless the ride is in
    /// progress.
    pub fn finish_ride(&self, order: &mut TaxiOrder) -> TaxiOrderServiceResult<()> {
        order
            .finish_ride(self.clock.utc())
            .inspect_err(log_rejection)?;
        debug!(order_id = %order.id(), status = %order.status(), "ride finished");
        Ok(())
    }

    /// Describes the assigned driver, or `None` while waiting for one.
    #[must_use]
    pub fn driver_full_info(&self, order: &TaxiOrder) -> Option<String> {
        order.driver_full_info()
    }

    /// Summarises the order on a single line.
    ///
    /// # Errors
    ///
    /// Returns [`TaxiOrderServiceError::Domain`] when the order has no
    /// progress time recorded for its status.
    pub fn short_order_info(&self, order: &TaxiOrder) -> TaxiOrderServiceResult<String> {
        Ok(order.short_order_info()?)
    }
}

fn log_rejection(err: &OrderDomainError) {
    warn!(error = %err, "order operation rejected");
}
