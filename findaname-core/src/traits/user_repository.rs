//! User persistence abstract trait.

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::User;

/// User collection repository.
///
/// The persisted form is a single blob holding every user; every mutation is
/// a whole-blob read-modify-write. There is exactly one logical writer at a
/// time, so blob replacement is the only transaction the store needs.
///
/// Platform implementations:
/// - `JsonUserStore` (single JSON file)
/// - `InMemoryUserStore` (tests, ephemeral sessions)
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Load every user record.
    ///
    /// Absent storage (first run) yields an empty list, not an error.
    async fn load_all(&self) -> CoreResult<Vec<User>>;

    /// Replace the entire user collection.
    ///
    /// Implementations must not create backing storage while `users` is
    /// empty and nothing has been persisted yet.
    async fn save_all(&self, users: &[User]) -> CoreResult<()>;
}
