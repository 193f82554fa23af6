//! The `UserDirectory` trait -- the collaborator that resolves user ids to
//! owner references.
//!
//! Plan ownership is validated exactly once, at creation, through this
//! seam. The trait is object-safe so the lifecycle manager can hold it as
//! `Arc<dyn UserDirectory>` and tests can substitute their own directory.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use waypoint_db::queries::users;

/// A resolved reference to a user that can own plans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef {
    pub id: Uuid,
    pub username: String,
}

/// Resolves a user identifier to a user reference.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolve a user id. Returns `None` when no such user exists; errors
    /// are reserved for infrastructure failures.
    async fn resolve(&self, user_id: Uuid) -> Result<Option<UserRef>>;
}

// Compile-time assertion: UserDirectory must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn UserDirectory) {}
};

/// Directory backed by the `users` table.
#[derive(Clone)]
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn resolve(&self, user_id: Uuid) -> Result<Option<UserRef>> {
        let user = users::get_user(&self.pool, user_id).await?;
        Ok(user.map(|u| UserRef {
            id: u.id,
            username: u.username,
        }))
    }
}
