//! Field validation for caller-supplied plan and item data.
//!
//! The store accepts whatever fits the columns; anything stricter is
//! checked here, before the first write.

use crate::error::LifecycleError;

/// Maximum title length for plans and items, matching the column bound.
pub const TITLE_MAX_LEN: usize = 100;

/// Reject empty and over-long titles.
pub fn validate_title(field: &'static str, title: &str) -> Result<(), LifecycleError> {
    if title.trim().is_empty() {
        return Err(LifecycleError::Validation {
            field,
            reason: "must not be empty".to_owned(),
        });
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(LifecycleError::Validation {
            field,
            reason: format!("must be at most {TITLE_MAX_LEN} characters"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_titles() {
        assert!(validate_title("title", "Learn Go").is_ok());
    }

    #[test]
    fn accepts_title_at_the_bound() {
        let title = "x".repeat(TITLE_MAX_LEN);
        assert!(validate_title("title", &title).is_ok());
    }

    #[test]
    fn rejects_empty_title() {
        let err = validate_title("title", "").unwrap_err();
        assert!(matches!(err, LifecycleError::Validation { field: "title", .. }));
    }

    #[test]
    fn rejects_whitespace_only_title() {
        assert!(validate_title("title", "   ").is_err());
    }

    #[test]
    fn rejects_over_long_title() {
        let title = "x".repeat(TITLE_MAX_LEN + 1);
        let err = validate_title("title", &title).unwrap_err();
        assert!(err.to_string().contains("100"));
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 100 multi-byte characters fit the varchar(100) column.
        let title = "ü".repeat(TITLE_MAX_LEN);
        assert!(validate_title("title", &title).is_ok());
    }
}
