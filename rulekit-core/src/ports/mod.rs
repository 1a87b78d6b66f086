//! Port definitions
//!
//! Traits the services depend on. Adapters provide the concrete
//! implementations.

mod store;

pub use store::Store;
