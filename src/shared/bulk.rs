//! Sequential fan-out for admin bulk actions.
//!
//! Each id is processed with its own store call and the outcome is tallied
//! per item. Nothing is rolled back: items that succeeded before a failure
//! stay applied.

use futures::{stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::future::Future;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::Result;

/// Request body selecting the records a bulk action applies to
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BulkIdsDto {
    #[validate(length(min = 1, max = 500, message = "Select between 1 and 500 records"))]
    pub ids: Vec<Uuid>,
}

/// Failure for a single id inside a bulk action
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BulkFailure {
    pub id: Uuid,
    pub reason: String,
}

/// Tally of a bulk action
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BulkOutcome {
    pub succeeded: Vec<Uuid>,
    pub failed: Vec<BulkFailure>,
    /// Human readable summary, e.g. "Successfully deleted 3; 1 failed"
    pub message: String,
}

impl BulkOutcome {
    pub fn success_count(&self) -> usize {
        self.succeeded.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }
}

/// Run `op` once per id, in order, awaiting each call before the next.
///
/// `verb` is the past-tense action used in the summary message ("updated", "deleted").
pub async fn fan_out<F, Fut>(ids: &[Uuid], verb: &str, op: F) -> BulkOutcome
where
    F: Fn(Uuid) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let results: Vec<(Uuid, Result<()>)> = stream::iter(ids.iter().copied())
        .then(|id| {
            let fut = op(id);
            async move { (id, fut.await) }
        })
        .collect()
        .await;

    let mut succeeded = Vec::new();
    let mut failed = Vec::new();
    for (id, result) in results {
        match result {
            Ok(()) => succeeded.push(id),
            Err(e) => {
                tracing::warn!(%id, error = %e, "Bulk {} failed for item", verb);
                failed.push(BulkFailure {
                    id,
                    reason: e.to_string(),
                });
            }
        }
    }

    let mut outcome = BulkOutcome {
        succeeded,
        failed,
        message: String::new(),
    };
    outcome.message = summary_message(verb, outcome.success_count(), outcome.failure_count());
    outcome
}

fn summary_message(verb: &str, succeeded: usize, failed: usize) -> String {
    match (succeeded, failed) {
        (_, 0) => format!("Successfully {} {}", verb, succeeded),
        (0, _) => format!("Failed to process {} item(s)", failed),
        _ => format!("Successfully {} {}; {} failed", verb, succeeded, failed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;

    #[tokio::test]
    async fn test_fan_out_tallies_partial_failure() {
        let ids: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        let bad = ids[2];

        let outcome = fan_out(&ids, "updated", |id| async move {
            if id == bad {
                Err(AppError::NotFound("gone".to_string()))
            } else {
                Ok(())
            }
        })
        .await;

        assert_eq!(outcome.success_count(), 3);
        assert_eq!(outcome.failure_count(), 1);
        assert_eq!(outcome.failed[0].id, bad);
        assert_eq!(outcome.message, "Successfully updated 3; 1 failed");
        assert_eq!(outcome.succeeded, vec![ids[0], ids[1], ids[3]]);
    }

    #[tokio::test]
    async fn test_fan_out_all_succeed() {
        let ids = vec![Uuid::new_v4(), Uuid::new_v4()];
        let outcome = fan_out(&ids, "deleted", |_| async { Ok(()) }).await;
        assert_eq!(outcome.message, "Successfully deleted 2");
        assert!(outcome.failed.is_empty());
    }

    #[test]
    fn test_summary_message_all_failed() {
        assert_eq!(summary_message("deleted", 0, 2), "Failed to process 2 item(s)");
    }
}
