//! FindAName Core Library
//!
//! Provides the entitlement store for the FindAName tool suite:
//! - user records, plans, and monthly credit accounting
//! - session handling and search bookkeeping
//! - admin operations and aggregate reporting
//!
//! This library is platform-independent: persistence is abstracted through
//! the [`UserRepository`] trait and injected by the hosting application.

pub mod config;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::EntitlementConfig;
pub use error::{CoreError, CoreResult};
pub use services::{EntitlementService, ServiceContext};
pub use traits::UserRepository;
