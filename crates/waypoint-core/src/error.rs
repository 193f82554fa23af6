use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by the plan lifecycle operations.
///
/// Every failure is scoped to the single request that produced it and is
/// never partially applied: a failed create leaves no row, a failed cascade
/// rolls back whole.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("owner not found with id: {0}")]
    OwnerNotFound(Uuid),

    #[error("plan not found with id: {0}")]
    PlanNotFound(Uuid),

    #[error("item not found with id: {0}")]
    ItemNotFound(Uuid),

    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    /// Infrastructure failure from the store, passed through unchanged.
    #[error(transparent)]
    Db(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_messages_name_the_id() {
        let id = Uuid::new_v4();
        assert!(LifecycleError::PlanNotFound(id).to_string().contains(&id.to_string()));
        assert!(LifecycleError::ItemNotFound(id).to_string().contains(&id.to_string()));
        assert!(LifecycleError::OwnerNotFound(id).to_string().contains(&id.to_string()));
    }

    #[test]
    fn validation_message_names_the_field() {
        let err = LifecycleError::Validation {
            field: "title",
            reason: "must not be empty".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid title: must not be empty");
    }
}
