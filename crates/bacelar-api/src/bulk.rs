//! Bulk mutation coordinator.
//!
//! One user action fans out into one mutation per selected id. Requests
//! are issued concurrently and joined as a batch; a failing id never
//! blocks the others. The outcome keeps the failed subset so the caller
//! can resubmit exactly those, and the selection is reconciled to it.
//! After any batch the caller refreshes the whole collection from the
//! backend instead of patching local state.

use bacelar_core::model::{Deadline, DeadlineStatus};
use bacelar_core::pipeline::Selection;
use futures::future;
use tracing::{info, warn};

use crate::client::{ApiClient, DeadlinePatch};
use crate::error::ApiError;

/// The mutation seam the coordinator drives. Implemented by [`ApiClient`]
/// and by test doubles.
pub trait DeadlineWriter {
    fn update(
        &self,
        id: &str,
        patch: &DeadlinePatch,
    ) -> impl Future<Output = Result<Deadline, ApiError>>;

    fn delete(&self, id: &str) -> impl Future<Output = Result<(), ApiError>>;
}

impl DeadlineWriter for ApiClient {
    async fn update(&self, id: &str, patch: &DeadlinePatch) -> Result<Deadline, ApiError> {
        ApiClient::update(self, id, patch).await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        ApiClient::delete(self, id).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkOperation {
    SetStatus(DeadlineStatus),
    SetResponsible(String),
    Delete,
}

impl BulkOperation {
    fn as_patch(&self) -> Option<DeadlinePatch> {
        match self {
            BulkOperation::SetStatus(status) => Some(DeadlinePatch {
                status: Some(*status),
                ..Default::default()
            }),
            BulkOperation::SetResponsible(user_id) => Some(DeadlinePatch {
                responsible_user_id: Some(Some(user_id.clone())),
                ..Default::default()
            }),
            BulkOperation::Delete => None,
        }
    }
}

/// Partial-failure summary of one batch.
#[derive(Debug)]
pub struct BulkOutcome {
    pub succeeded: Vec<String>,
    pub failures: Vec<(String, ApiError)>,
}

impl BulkOutcome {
    pub fn failed_ids(&self) -> Vec<String> {
        self.failures.iter().map(|(id, _)| id.clone()).collect()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Apply one operation to every id, concurrently, and reconcile the
/// selection: fully successful batches clear it, partial failures keep
/// only the failed ids selected for retry.
pub async fn run_bulk<W: DeadlineWriter>(
    writer: &W,
    ids: &[String],
    op: &BulkOperation,
    selection: &mut Selection,
) -> BulkOutcome {
    info!(count = ids.len(), op = ?op, "starting bulk batch");

    let results: Vec<(String, Result<(), ApiError>)> = match op.as_patch() {
        None => {
            let futs = ids
                .iter()
                .map(|id| async move { (id.clone(), writer.delete(id).await) });
            future::join_all(futs).await
        }
        Some(patch) => {
            let patch = &patch;
            let futs = ids
                .iter()
                .map(|id| async move { (id.clone(), writer.update(id, patch).await.map(|_| ())) });
            future::join_all(futs).await
        }
    };

    let mut outcome = BulkOutcome {
        succeeded: Vec::new(),
        failures: Vec::new(),
    };
    for (id, result) in results {
        match result {
            Ok(()) => outcome.succeeded.push(id),
            Err(err) => {
                warn!(id = %id, error = %err, "bulk mutation failed");
                outcome.failures.push((id, err));
            }
        }
    }

    selection.retain_only(&outcome.failed_ids());
    info!(
        succeeded = outcome.succeeded.len(),
        failed = outcome.failures.len(),
        "bulk batch finished"
    );
    outcome
}
