//! Domain model for taxi orders.
//!
//! Value objects, the driver entity and the [`TaxiOrder`] aggregate live
//! here. Nothing in this module performs I/O: drivers are resolved and time
//! is read by the service layer before the aggregate is asked to change.

mod driver;
mod error;
mod ids;
mod order;
mod values;

pub use driver::Driver;
pub use error::{OrderDomainError, ParseOrderStatusError};
pub use ids::{DriverId, OrderId, OrderIdSequence};
pub use order::{OrderOperation, OrderStatus, PersistedOrderData, TaxiOrder};
pub use values::{Address, Car, PersonName, TimeInfo};
