//! Store implementations of the repository traits

mod factory;
mod in_memory;
mod postgres;

pub use factory::{StoreConfig, StoreFactory, StoreType};
pub use in_memory::{InMemoryStore, StoreSnapshot};
pub use postgres::{PostgresConfig, PostgresStore};
