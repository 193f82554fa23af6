//! Plan lifecycle manager: orchestrates cross-entity operations over plans
//! and their items.
//!
//! Callers (the HTTP layer in front of this crate) drive this type and
//! nothing else. Each operation is one atomic unit of work against the
//! store: a single statement, or a single explicit transaction for the
//! cascade delete. Owner validation runs through the [`UserDirectory`]
//! seam before the first write, so a resolution failure leaves no row.

use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use waypoint_db::models::{Plan, PlanItem};
use waypoint_db::queries::items::{self, NewPlanItem};
use waypoint_db::queries::plans::{self, NewPlan, PlanUpdate};

use crate::directory::UserDirectory;
use crate::error::LifecycleError;
use crate::validate::validate_title;

/// Caller-supplied data for a new item, before it is bound to a plan.
///
/// `order_index` is taken as given: duplicate positions within a plan are
/// accepted, and `completion_date` is persisted regardless of
/// `is_complete`.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub title: String,
    pub description: Option<String>,
    pub order_index: i32,
    pub is_complete: bool,
    pub completion_date: Option<NaiveDate>,
}

/// Orchestrates plan and item lifecycle operations.
///
/// Dependencies are passed at construction; there is no global registry.
pub struct PlanLifecycle {
    pool: PgPool,
    directory: Arc<dyn UserDirectory>,
}

impl PlanLifecycle {
    pub fn new(pool: PgPool, directory: Arc<dyn UserDirectory>) -> Self {
        Self { pool, directory }
    }

    /// Create a plan for a resolvable owner.
    ///
    /// Resolves `owner_user_id` through the directory, then performs the
    /// single INSERT. The stored plan comes back with a fresh id and
    /// `created_at == updated_at`.
    pub async fn create_plan(&self, new_plan: &NewPlan) -> Result<Plan, LifecycleError> {
        validate_title("title", &new_plan.title)?;

        tracing::info!(owner_user_id = %new_plan.owner_user_id, "creating plan");
        let owner = self
            .directory
            .resolve(new_plan.owner_user_id)
            .await?
            .ok_or_else(|| {
                tracing::error!(owner_user_id = %new_plan.owner_user_id, "plan owner not found");
                LifecycleError::OwnerNotFound(new_plan.owner_user_id)
            })?;

        let plan = plans::insert_plan(&self.pool, new_plan).await?;
        tracing::info!(plan_id = %plan.id, owner = %owner.username, "plan created");
        Ok(plan)
    }

    /// Fetch a plan by id. Absent is `Ok(None)`, not an error.
    pub async fn get_plan(&self, plan_id: Uuid) -> Result<Option<Plan>, LifecycleError> {
        tracing::debug!(plan_id = %plan_id, "fetching plan");
        Ok(plans::get_plan(&self.pool, plan_id).await?)
    }

    /// Fetch a plan together with its items in position order.
    pub async fn get_plan_with_items(
        &self,
        plan_id: Uuid,
    ) -> Result<Option<(Plan, Vec<PlanItem>)>, LifecycleError> {
        let Some(plan) = plans::get_plan(&self.pool, plan_id).await? else {
            return Ok(None);
        };
        let plan_items = items::list_items_for_plan(&self.pool, plan_id).await?;
        Ok(Some((plan, plan_items)))
    }

    /// List all plans owned by a user, in insertion order.
    pub async fn list_plans_for_owner(
        &self,
        owner_user_id: Uuid,
    ) -> Result<Vec<Plan>, LifecycleError> {
        tracing::debug!(owner_user_id = %owner_user_id, "listing plans for owner");
        let owned = plans::list_plans_for_owner(&self.pool, owner_user_id).await?;
        tracing::debug!(owner_user_id = %owner_user_id, count = owned.len(), "plans listed");
        Ok(owned)
    }

    /// Overwrite an existing plan's mutable fields.
    ///
    /// Existence is checked before the write; the guarded UPDATE then
    /// stamps `updated_at` exactly once. The owner is not re-validated
    /// here -- ownership is bound at creation.
    pub async fn update_plan(&self, update: &PlanUpdate) -> Result<Plan, LifecycleError> {
        validate_title("title", &update.title)?;

        tracing::info!(plan_id = %update.id, "updating plan");
        if plans::get_plan(&self.pool, update.id).await?.is_none() {
            tracing::error!(plan_id = %update.id, "plan not found");
            return Err(LifecycleError::PlanNotFound(update.id));
        }

        // The row can vanish between the check and the write; the UPDATE's
        // row count covers that window.
        let plan = plans::update_plan(&self.pool, update)
            .await?
            .ok_or(LifecycleError::PlanNotFound(update.id))?;

        tracing::info!(plan_id = %plan.id, "plan updated");
        Ok(plan)
    }

    /// Delete a plan and all its items as one transaction.
    ///
    /// Items go first, then the plan row; the commit makes both visible as
    /// a single unit, so no reader ever observes a half-deleted aggregate.
    /// Deleting an id that does not exist is a no-op, not an error.
    pub async fn delete_plan(&self, plan_id: Uuid) -> Result<(), LifecycleError> {
        tracing::info!(plan_id = %plan_id, "deleting plan");

        let mut tx = self
            .pool
            .begin()
            .await
            .context("failed to begin transaction")?;

        let items_removed = sqlx::query("DELETE FROM plan_items WHERE plan_id = $1")
            .bind(plan_id)
            .execute(&mut *tx)
            .await
            .context("failed to delete plan items")?;

        let plans_removed = sqlx::query("DELETE FROM plans WHERE id = $1")
            .bind(plan_id)
            .execute(&mut *tx)
            .await
            .context("failed to delete plan")?;

        tx.commit().await.context("failed to commit transaction")?;

        if plans_removed.rows_affected() == 0 {
            tracing::info!(plan_id = %plan_id, "plan already absent, nothing deleted");
        } else {
            tracing::info!(
                plan_id = %plan_id,
                items = items_removed.rows_affected(),
                "plan deleted with its items"
            );
        }
        Ok(())
    }

    /// Attach a new item to an existing plan.
    ///
    /// Fails `PlanNotFound` before anything is persisted. The plan's
    /// `updated_at` is left alone -- item mutations do not count as plan
    /// mutations.
    pub async fn add_item(
        &self,
        plan_id: Uuid,
        item: &NewItem,
    ) -> Result<PlanItem, LifecycleError> {
        validate_title("title", &item.title)?;

        tracing::info!(plan_id = %plan_id, "adding item to plan");
        if plans::get_plan(&self.pool, plan_id).await?.is_none() {
            tracing::error!(plan_id = %plan_id, "plan not found");
            return Err(LifecycleError::PlanNotFound(plan_id));
        }

        let new_item = NewPlanItem {
            plan_id,
            title: item.title.clone(),
            description: item.description.clone(),
            order_index: item.order_index,
            is_complete: item.is_complete,
            completion_date: item.completion_date,
        };
        let stored = items::insert_item(&self.pool, &new_item).await?;
        tracing::info!(item_id = %stored.id, plan_id = %plan_id, "item added");
        Ok(stored)
    }

    /// Detach an item by id.
    ///
    /// Strict delete: an absent id is `ItemNotFound`. The owning plan is
    /// neither consulted nor touched.
    pub async fn remove_item(&self, item_id: Uuid) -> Result<(), LifecycleError> {
        tracing::info!(item_id = %item_id, "removing item");
        let removed = items::delete_item(&self.pool, item_id).await?;
        if removed == 0 {
            tracing::error!(item_id = %item_id, "item not found");
            return Err(LifecycleError::ItemNotFound(item_id));
        }
        tracing::info!(item_id = %item_id, "item removed");
        Ok(())
    }
}
