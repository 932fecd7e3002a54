//! In-memory user store for tests and ephemeral frontends.

use async_trait::async_trait;
use tokio::sync::RwLock;

use findaname_core::error::CoreResult;
use findaname_core::traits::UserRepository;
use findaname_core::types::User;

/// Volatile user store. Contents are lost on drop.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn load_all(&self) -> CoreResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn save_all(&self, users: &[User]) -> CoreResult<()> {
        *self.users.write().await = users.to_vec();
        Ok(())
    }
}
