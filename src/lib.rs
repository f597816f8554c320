//! Taxi dispatch: order lifecycle domain model.
//!
//! This crate models a taxi order moving from placement through driver
//! assignment and the ride itself to completion or cancellation, enforcing
//! the preconditions of every step.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`order`]: Taxi order state machine, driver directory and service facade
//! - [`value`]: Structural equality for value objects

pub mod order;
pub mod value;
