//! Database-specific error types and conversions.

use std::collections::HashMap;

use gatehouse_core::error::GatehouseError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Malformed stored data: {0}")]
    Decode(String),

    #[error("Record not found: {entity} ({key})")]
    NotFound { entity: String, key: String },
}

impl From<DbError> for GatehouseError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, key } => GatehouseError::NotFound { entity, key },
            other => GatehouseError::Database(other.to_string()),
        }
    }
}

/// Marker prefix for errors raised deliberately inside SurrealQL
/// transaction scripts via `THROW 'gh:<category>:<message>'`.
pub(crate) const THROWN_PREFIX: &str = "gh:";

/// Classify a single statement error text.
///
/// Sentinel THROWs map back to their typed category; a unique-index
/// violation that raced past an application-level check maps to
/// Conflict so raw storage text never reaches clients.
fn classify(text: &str) -> Option<GatehouseError> {
    if let Some(pos) = text.find(THROWN_PREFIX) {
        let rest = &text[pos + THROWN_PREFIX.len()..];
        if let Some((category, message)) = rest.split_once(':') {
            let message = message.trim().trim_end_matches(['\'', '"']).to_string();
            match category {
                "conflict" => return Some(GatehouseError::Conflict { reason: message }),
                "forbidden" => return Some(GatehouseError::Forbidden { reason: message }),
                "internal" => return Some(GatehouseError::Internal(message)),
                _ => {}
            }
        }
    }
    None
}

/// Map the per-statement error set of a multi-statement transaction
/// script to one [`GatehouseError`].
///
/// When a THROW cancels a transaction every statement reports an
/// error, so the sentinel is searched for across all of them rather
/// than trusting the first by index.
pub(crate) fn script_error(errors: HashMap<usize, surrealdb::Error>) -> GatehouseError {
    let texts: Vec<(usize, String)> = errors
        .into_iter()
        .map(|(index, err)| (index, err.to_string()))
        .collect();
    script_error_from_texts(texts)
}

fn script_error_from_texts(mut texts: Vec<(usize, String)>) -> GatehouseError {
    texts.sort_by_key(|(index, _)| *index);

    for (_, text) in &texts {
        if let Some(err) = classify(text) {
            return err;
        }
    }
    for (_, text) in &texts {
        if text.contains("already contains") {
            return GatehouseError::Conflict {
                reason: "duplicate record".into(),
            };
        }
    }

    GatehouseError::Database(
        texts
            .into_iter()
            .map(|(_, text)| text)
            .next()
            .unwrap_or_else(|| "unknown database error".into()),
    )
}

/// Map a single-statement `check()` error to a [`GatehouseError`].
pub(crate) fn check_error(err: surrealdb::Error) -> GatehouseError {
    let text = err.to_string();
    if let Some(mapped) = classify(&text) {
        return mapped;
    }
    if text.contains("already contains") {
        return GatehouseError::Conflict {
            reason: "duplicate record".into(),
        };
    }
    GatehouseError::Database(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thrown_conflict_is_classified() {
        let err = classify(
            "An error occurred: gh:conflict:User is already registered in the project",
        )
        .unwrap();
        assert!(matches!(err, GatehouseError::Conflict { .. }));
        assert_eq!(err.to_string(), "User is already registered in the project");
    }

    #[test]
    fn thrown_forbidden_is_classified() {
        let err =
            classify("An error occurred: gh:forbidden:User is suspended in the project").unwrap();
        assert!(matches!(err, GatehouseError::Forbidden { .. }));
    }

    #[test]
    fn thrown_internal_is_classified() {
        let err = classify("An error occurred: gh:internal:Default roles not found").unwrap();
        assert!(matches!(err, GatehouseError::Internal(_)));
    }

    #[test]
    fn unknown_text_is_not_classified() {
        assert!(classify("There was a problem with the database").is_none());
        assert!(classify("gh:nonsense").is_none());
    }

    #[test]
    fn script_error_prefers_the_sentinel_over_cancellation_noise() {
        let texts = vec![
            (
                0usize,
                "The query was not executed due to a cancelled transaction".to_string(),
            ),
            (
                3usize,
                "An error occurred: gh:forbidden:User is suspended in the project".to_string(),
            ),
        ];

        let mapped = script_error_from_texts(texts);
        assert!(matches!(mapped, GatehouseError::Forbidden { .. }));
    }

    #[test]
    fn malformed_stored_data_surfaces_as_database() {
        let err: GatehouseError = DbError::Decode("invalid UUID: bad length".into()).into();
        assert!(matches!(err, GatehouseError::Database(_)));
        assert_eq!(err.to_string(), "database error: Malformed stored data: invalid UUID: bad length");
        // Internal store text never reaches clients.
        assert_eq!(err.public_message(), "internal error");
    }

    #[test]
    fn index_violation_maps_to_conflict() {
        let texts = vec![(
            0usize,
            "Database index `idx_user_email` already contains 'a@b.com', \
             with record `user:x`"
                .to_string(),
        )];

        let mapped = script_error_from_texts(texts);
        assert!(matches!(mapped, GatehouseError::Conflict { .. }));
    }
}
