//! Database query functions for the `plans` table.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Plan, PlanStatus};

/// Parameters for inserting a new plan row.
///
/// `status` is not part of the payload: every plan starts `active` via the
/// column default.
#[derive(Debug, Clone)]
pub struct NewPlan {
    pub owner_user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Full replacement payload for an existing plan row.
#[derive(Debug, Clone)]
pub struct PlanUpdate {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: PlanStatus,
}

/// Insert a new plan row. Returns the inserted plan with server-generated
/// defaults (id, status, created_at, updated_at).
///
/// The insert is a single statement, so `created_at` and `updated_at` both
/// evaluate to the same transaction timestamp.
pub async fn insert_plan(pool: &PgPool, new: &NewPlan) -> Result<Plan> {
    let plan = sqlx::query_as::<_, Plan>(
        "INSERT INTO plans (owner_user_id, title, description, start_date, end_date) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING *",
    )
    .bind(new.owner_user_id)
    .bind(&new.title)
    .bind(&new.description)
    .bind(new.start_date)
    .bind(new.end_date)
    .fetch_one(pool)
    .await
    .context("failed to insert plan")?;

    Ok(plan)
}

/// Fetch a plan by its ID.
pub async fn get_plan(pool: &PgPool, id: Uuid) -> Result<Option<Plan>> {
    let plan = sqlx::query_as::<_, Plan>("SELECT * FROM plans WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch plan")?;

    Ok(plan)
}

/// List all plans owned by a user, in insertion order.
pub async fn list_plans_for_owner(pool: &PgPool, owner_user_id: Uuid) -> Result<Vec<Plan>> {
    let plans = sqlx::query_as::<_, Plan>(
        "SELECT * FROM plans WHERE owner_user_id = $1 ORDER BY created_at ASC",
    )
    .bind(owner_user_id)
    .fetch_all(pool)
    .await
    .context("failed to list plans for owner")?;

    Ok(plans)
}

/// Overwrite the mutable fields of a plan and refresh `updated_at`.
///
/// Returns `None` when no row has the given ID. `created_at` and
/// `owner_user_id` are never touched; `updated_at` is stamped here and
/// nowhere else, so a mutation is stamped exactly once.
pub async fn update_plan(pool: &PgPool, update: &PlanUpdate) -> Result<Option<Plan>> {
    let plan = sqlx::query_as::<_, Plan>(
        "UPDATE plans \
         SET title = $1, description = $2, start_date = $3, end_date = $4, \
             status = $5, updated_at = now() \
         WHERE id = $6 \
         RETURNING *",
    )
    .bind(&update.title)
    .bind(&update.description)
    .bind(update.start_date)
    .bind(update.end_date)
    .bind(update.status)
    .bind(update.id)
    .fetch_optional(pool)
    .await
    .context("failed to update plan")?;

    Ok(plan)
}
