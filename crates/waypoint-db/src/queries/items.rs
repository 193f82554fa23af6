//! Database query functions for the `plan_items` table.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::PlanItem;

/// Parameters for inserting a new item row. `plan_id` must already be bound
/// to an existing plan; attach always goes through the lifecycle layer.
#[derive(Debug, Clone)]
pub struct NewPlanItem {
    pub plan_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub order_index: i32,
    pub is_complete: bool,
    pub completion_date: Option<NaiveDate>,
}

/// Insert a new item row. Returns the inserted item with server-generated
/// defaults (id, created_at, updated_at).
pub async fn insert_item(pool: &PgPool, new: &NewPlanItem) -> Result<PlanItem> {
    let item = sqlx::query_as::<_, PlanItem>(
        "INSERT INTO plan_items \
             (plan_id, title, description, order_index, is_complete, completion_date) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING *",
    )
    .bind(new.plan_id)
    .bind(&new.title)
    .bind(&new.description)
    .bind(new.order_index)
    .bind(new.is_complete)
    .bind(new.completion_date)
    .fetch_one(pool)
    .await
    .with_context(|| format!("failed to insert item for plan {}", new.plan_id))?;

    Ok(item)
}

/// Fetch a single item by ID.
pub async fn get_item(pool: &PgPool, id: Uuid) -> Result<Option<PlanItem>> {
    let item = sqlx::query_as::<_, PlanItem>("SELECT * FROM plan_items WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch item")?;

    Ok(item)
}

/// List all items of a plan in position order.
///
/// `order_index` values may repeat; `created_at` breaks ties so the listing
/// is still deterministic.
pub async fn list_items_for_plan(pool: &PgPool, plan_id: Uuid) -> Result<Vec<PlanItem>> {
    let items = sqlx::query_as::<_, PlanItem>(
        "SELECT * FROM plan_items \
         WHERE plan_id = $1 \
         ORDER BY order_index ASC, created_at ASC",
    )
    .bind(plan_id)
    .fetch_all(pool)
    .await
    .context("failed to list items for plan")?;

    Ok(items)
}

/// Delete an item row by ID. Returns the number of rows removed; zero means
/// no such row existed. The owning plan is not consulted or touched.
pub async fn delete_item(pool: &PgPool, id: Uuid) -> Result<u64> {
    let result = sqlx::query("DELETE FROM plan_items WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .context("failed to delete item")?;

    Ok(result.rows_affected())
}
