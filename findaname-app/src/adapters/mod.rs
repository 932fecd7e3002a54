//! Storage adapters for the entitlement store.

mod json_store;
mod memory;

pub use json_store::JsonUserStore;
pub use memory::InMemoryUserStore;
