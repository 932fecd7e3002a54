//! Business logic service layer.

mod entitlement_service;

pub mod analytics;

pub use entitlement_service::EntitlementService;

use std::sync::Arc;

use crate::config::EntitlementConfig;
use crate::traits::UserRepository;

/// Service context - holds all dependencies.
///
/// The platform layer creates this context and injects its storage
/// implementation.
pub struct ServiceContext {
    /// User persistence repository.
    pub user_repository: Arc<dyn UserRepository>,
    /// Entitlement configuration.
    pub config: EntitlementConfig,
}

impl ServiceContext {
    /// Create a service context.
    #[must_use]
    pub fn new(user_repository: Arc<dyn UserRepository>, config: EntitlementConfig) -> Self {
        Self {
            user_repository,
            config,
        }
    }
}
