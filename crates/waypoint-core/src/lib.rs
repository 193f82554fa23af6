//! Orchestration core for waypoint learning plans.
//!
//! Wires the persistence layer into the cross-entity operations: plan
//! creation with owner validation, cascading delete, item attach/detach.
//! The HTTP layer in front of this crate drives [`lifecycle::PlanLifecycle`]
//! and nothing else.

pub mod directory;
pub mod error;
pub mod lifecycle;
pub mod validate;

pub use directory::{PgUserDirectory, UserDirectory, UserRef};
pub use error::LifecycleError;
pub use lifecycle::{NewItem, PlanLifecycle};
