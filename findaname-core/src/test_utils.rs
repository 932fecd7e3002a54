//! Test helpers.
//!
//! Provides mock implementations and convenient test factory methods.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::config::EntitlementConfig;
use crate::error::{CoreError, CoreResult};
use crate::services::{EntitlementService, ServiceContext};
use crate::traits::UserRepository;
use crate::types::{LoginIdentity, User};

// ===== MockUserRepository =====

pub struct MockUserRepository {
    users: RwLock<Vec<User>>,
    /// If Some, `save_all` returns this error (for testing failure paths).
    save_error: RwLock<Option<String>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            save_error: RwLock::new(None),
        }
    }

    pub async fn set_save_error(&self, err: Option<String>) {
        *self.save_error.write().await = err;
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn load_all(&self) -> CoreResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn save_all(&self, users: &[User]) -> CoreResult<()> {
        if let Some(ref msg) = *self.save_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        *self.users.write().await = users.to_vec();
        Ok(())
    }
}

// ===== Factory methods =====

/// Test configuration with one allow-listed admin.
pub fn test_config() -> EntitlementConfig {
    EntitlementConfig {
        admin_emails: vec!["admin@findaname.app".to_string()],
        ..EntitlementConfig::default()
    }
}

/// Plain login identity without a referral code.
pub fn test_identity(email: &str) -> LoginIdentity {
    LoginIdentity::new(email, "Test User")
}

/// Create an `EntitlementService` backed by a mock repository.
pub fn create_test_service(
    config: EntitlementConfig,
) -> (EntitlementService, Arc<MockUserRepository>) {
    let repo = Arc::new(MockUserRepository::new());
    let ctx = Arc::new(ServiceContext::new(repo.clone(), config));
    (EntitlementService::new(ctx), repo)
}
