//! Platform-agnostic application bootstrap for FindAName.
//!
//! Provides `AppState` (service container) and `AppStateBuilder` (adapter
//! injection). Every frontend constructs an `AppState` once at startup and
//! drives the entitlement service through it.

pub mod adapters;

use std::sync::Arc;

use findaname_core::config::EntitlementConfig;
use findaname_core::error::{CoreError, CoreResult};
use findaname_core::services::{EntitlementService, ServiceContext};
use findaname_core::traits::UserRepository;

/// Platform-agnostic application state.
pub struct AppState {
    /// Service context (holds the storage adapter and configuration).
    pub ctx: Arc<ServiceContext>,
    /// Entitlement service.
    pub entitlement_service: Arc<EntitlementService>,
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required adapters
/// - `user_repository` — how user records are stored
///
/// # Optional
/// - `config` — defaults to `EntitlementConfig::default()`
pub struct AppStateBuilder {
    user_repository: Option<Arc<dyn UserRepository>>,
    config: Option<EntitlementConfig>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            user_repository: None,
            config: None,
        }
    }

    #[must_use]
    pub fn user_repository(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repository = Some(repo);
        self
    }

    #[must_use]
    pub fn config(mut self, config: EntitlementConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are missing.
    pub fn build(self) -> CoreResult<AppState> {
        let user_repository = self
            .user_repository
            .ok_or_else(|| CoreError::ValidationError("user_repository is required".to_string()))?;
        let config = self.config.unwrap_or_default();

        let ctx = Arc::new(ServiceContext::new(user_repository, config));
        let entitlement_service = Arc::new(EntitlementService::new(Arc::clone(&ctx)));

        Ok(AppState {
            ctx,
            entitlement_service,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
