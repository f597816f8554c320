//! In-memory adapters for order ports.

mod driver_directory;

pub use driver_directory::InMemoryDriverDirectory;
