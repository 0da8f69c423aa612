pub mod dataset;
pub mod executor;
pub mod memory_executor;
pub mod sql_executor;

pub use dataset::{Dataset, Record};
pub use executor::StoreExecutor;
pub use memory_executor::InMemoryStore;
pub use sql_executor::{SqlConnection, SqlStoreExecutor};

#[cfg(test)]
mod memory_executor_test;
