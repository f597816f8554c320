//! Taxi order lifecycle management.
//!
//! Orders are placed without a driver, receive one from the driver
//! directory, carry the client through the ride and finish or get canceled
//! along the way. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
