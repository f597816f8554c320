//! Application services for taxi order orchestration.

mod dispatch;

pub use dispatch::{
    CreateOrderRequest, TaxiOrderService, TaxiOrderServiceError, TaxiOrderServiceResult,
};
