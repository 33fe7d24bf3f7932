//! Lipid-profile result reconciliation.

use super::{attempt, merged, SyncCoordinator, SyncPath};
use crate::identifiers;
use crate::mapper;
use crate::models::{EntityKind, LipidProfile, NewLipidProfile};
use crate::query;

const KIND: EntityKind = EntityKind::LipidProfile;

impl SyncCoordinator {
    /// Enter a result.
    ///
    /// Sent remotely only when both the patient and the technician carry a
    /// remote key; otherwise no remote call is made. The local fallback gets
    /// an `R###` identifier and the current time.
    pub async fn add_result(&self, draft: NewLipidProfile) -> LipidProfile {
        let refs = self.reference_index();
        let now = chrono::Utc::now().to_rfc3339();

        match mapper::new_result_payload(&draft, &refs) {
            Some(payload) => {
                if let Ok(remote) = attempt(KIND, "create", self.api.create_result(&payload)).await {
                    return self.store.append_with(|count| {
                        let prior = draft.into_profile(identifiers::result_id(count), now);
                        mapper::result_from_remote(&remote, Some(&prior), &refs)
                    });
                }
            }
            None => tracing::debug!(
                patient = %draft.patient_entry_code,
                technician = %draft.lab_technician_id,
                "references not synced, creating result locally"
            ),
        }

        self.store
            .append_with(|count| draft.into_profile(identifiers::result_id(count), now))
    }

    /// Update a result, matched by id.
    ///
    /// Sent remotely only when the id is a server key and both references
    /// resolve; otherwise the caller's record replaces the stored one.
    pub async fn update_result(&self, profile: LipidProfile) -> SyncPath {
        if let Some(key) = profile.remote_key() {
            let refs = self.reference_index();
            if let Some(payload) = mapper::result_payload(&profile, &refs) {
                if let Ok(remote) =
                    attempt(KIND, "update", self.api.update_result(key, &payload)).await
                {
                    let mapped = mapper::result_from_remote(&remote, Some(&profile), &refs);
                    self.store.replace_by_key(&profile.id, mapped);
                    return merged(KIND, &profile.id, SyncPath::Remote);
                }
            }
        }

        let key = profile.id.clone();
        self.store.replace_by_key(&key, profile);
        merged(KIND, &key, SyncPath::Local)
    }

    /// Delete a result by id; always applied locally.
    pub async fn delete_result(&self, id: &str) -> SyncPath {
        let mut path = SyncPath::Local;
        if let Some(key) = self.store.find::<LipidProfile>(id).and_then(|r| r.remote_key()) {
            if attempt(KIND, "delete", self.api.delete_result(key)).await.is_ok() {
                path = SyncPath::Remote;
            }
        }

        self.store.remove_by_key::<LipidProfile>(id);
        merged(KIND, id, path)
    }

    /// Results recorded for a patient, asked of the remote side first.
    ///
    /// Falls back to the local collection. Never mutates the store.
    pub async fn fetch_patient_results(&self, entry_code: &str) -> (Vec<LipidProfile>, SyncPath) {
        match attempt(
            KIND,
            "list_by_admission_code",
            self.api.list_results_by_admission_code(entry_code),
        )
        .await
        {
            Ok(records) => {
                let refs = self.reference_index();
                let results = records
                    .iter()
                    .map(|record| mapper::result_from_remote(record, None, &refs))
                    .collect();
                (results, SyncPath::Remote)
            }
            Err(_) => (
                query::results_for_patient(&self.store.snapshot::<LipidProfile>(), entry_code),
                SyncPath::Local,
            ),
        }
    }
}
