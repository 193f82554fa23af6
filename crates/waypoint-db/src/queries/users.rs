//! Database query functions for the `users` table.
//!
//! Only the operations plan ownership needs: seeding a user and resolving
//! one by ID. The wider user subsystem lives outside this crate.

use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::User;

/// Insert a new user row. Returns the inserted user with server-generated
/// defaults (id, created_at).
pub async fn insert_user(pool: &PgPool, username: &str, email: &str) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (username, email) \
         VALUES ($1, $2) \
         RETURNING *",
    )
    .bind(username)
    .bind(email)
    .fetch_one(pool)
    .await
    .context("failed to insert user")?;

    Ok(user)
}

/// Fetch a user by ID.
pub async fn get_user(pool: &PgPool, id: Uuid) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch user")?;

    Ok(user)
}
