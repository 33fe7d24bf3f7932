//! Remote-then-local reconciliation.
//!
//! Every mutation follows the same shape:
//!
//! ```text
//! START -> ATTEMPT_REMOTE --ok--> MAP_RESPONSE ----> MERGE_LOCAL -> DONE
//!                         --err-> SYNTHESIZE_LOCAL -> MERGE_LOCAL -> DONE
//! ```
//!
//! Remote failures are resolved into the local branch here and never reach
//! the caller. Each mutation issues at most one remote call and ends with
//! exactly one store operation.

mod patients;
mod results;
mod technicians;

use std::future::Future;
use std::sync::Arc;

use lipid_lis_remote::{RecordApi, RemoteOutcome};

use crate::mapper::{self, ReferenceIndex};
use crate::models::{EntityKind, LabTechnician, Patient};
use crate::store::{CollectionStore, Record};

/// Which branch a mutation resolved through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPath {
    /// The remote call succeeded and its response was merged.
    Remote,
    /// The remote call was skipped or failed; local data was merged.
    Local,
}

/// Result of loading one collection at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Replaced(usize),
    /// The remote collection was empty; local contents kept.
    Empty,
    /// The remote side failed; local contents kept.
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub patients: LoadStatus,
    pub technicians: LoadStatus,
    pub results: LoadStatus,
}

/// Drives create/update/delete through the remote API and into the store.
#[derive(Clone)]
pub struct SyncCoordinator {
    api: Arc<dyn RecordApi>,
    store: Arc<CollectionStore>,
}

impl SyncCoordinator {
    pub fn new(api: Arc<dyn RecordApi>, store: Arc<CollectionStore>) -> Self {
        Self { api, store }
    }

    pub fn store(&self) -> &Arc<CollectionStore> {
        &self.store
    }

    /// Fetch all three collections and replace the local ones with non-empty results.
    ///
    /// Patients and technicians load first so result references can resolve
    /// through their surrogate keys.
    pub async fn load_all(&self) -> LoadReport {
        let patients = match attempt(EntityKind::Patient, "list", self.api.list_patients()).await {
            Ok(records) => self.replace(
                records
                    .iter()
                    .enumerate()
                    .map(|(ordinal, record)| mapper::patient_from_remote(record, None, ordinal))
                    .collect(),
            ),
            Err(_) => LoadStatus::Unavailable,
        };

        let technicians =
            match attempt(EntityKind::LabTechnician, "list", self.api.list_specialists()).await {
                Ok(records) => self.replace(
                    records
                        .iter()
                        .map(|record| mapper::technician_from_remote(record, None))
                        .collect(),
                ),
                Err(_) => LoadStatus::Unavailable,
            };

        let results = match attempt(EntityKind::LipidProfile, "list", self.api.list_results()).await {
            Ok(records) => {
                let refs = self.reference_index();
                self.replace(
                    records
                        .iter()
                        .map(|record| mapper::result_from_remote(record, None, &refs))
                        .collect(),
                )
            }
            Err(_) => LoadStatus::Unavailable,
        };

        let report = LoadReport {
            patients,
            technicians,
            results,
        };
        tracing::info!(?report, "initial load finished");
        report
    }

    fn replace<T: Record>(&self, items: Vec<T>) -> LoadStatus {
        let count = items.len();
        if self.store.replace_all(items) {
            LoadStatus::Replaced(count)
        } else {
            tracing::debug!(kind = %T::KIND, "remote collection empty, keeping local data");
            LoadStatus::Empty
        }
    }

    fn reference_index(&self) -> ReferenceIndex {
        ReferenceIndex::new(
            &self.store.snapshot::<Patient>(),
            &self.store.snapshot::<LabTechnician>(),
        )
    }
}

/// Run one remote call, logging the fallback when it fails.
async fn attempt<T, F>(kind: EntityKind, op: &'static str, call: F) -> RemoteOutcome<T>
where
    F: Future<Output = RemoteOutcome<T>>,
{
    tracing::debug!(%kind, op, "remote attempt");
    let outcome = call.await;
    if let Err(e) = &outcome {
        tracing::warn!(%kind, op, reason = %e.reason, "remote unavailable, falling back to local state");
    }
    outcome
}

/// Log where a keyed mutation resolved.
fn merged(kind: EntityKind, key: &str, path: SyncPath) -> SyncPath {
    tracing::debug!(%kind, key, ?path, "merged into store");
    path
}
