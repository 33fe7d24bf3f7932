//! Patient reconciliation.

use super::{attempt, merged, SyncCoordinator, SyncPath};
use crate::identifiers;
use crate::mapper;
use crate::models::{EntityKind, NewPatient, Patient};

const KIND: EntityKind = EntityKind::Patient;

impl SyncCoordinator {
    /// Register a patient.
    ///
    /// On remote success the server's record is appended; otherwise the draft
    /// is appended with a locally generated entry code and no remote key.
    pub async fn add_patient(&self, draft: NewPatient) -> Patient {
        let payload = mapper::new_patient_payload(&draft);

        match attempt(KIND, "create", self.api.create_patient(&payload)).await {
            Ok(remote) => self.store.append_with(|count| {
                let provisional = draft.into_patient(String::new());
                mapper::patient_from_remote(&remote, Some(&provisional), count)
            }),
            Err(_) => self
                .store
                .append_with(|count| draft.into_patient(identifiers::patient_entry_code(count))),
        }
    }

    /// Update a patient, matched by document id.
    ///
    /// Only synced patients are sent remotely. On failure, or when unsynced,
    /// the caller's record replaces the stored one unchanged.
    pub async fn update_patient(&self, patient: Patient) -> SyncPath {
        if let Some(key) = patient.remote_key {
            let payload = mapper::patient_payload(&patient);
            if let Ok(remote) = attempt(KIND, "update", self.api.update_patient(key, &payload)).await {
                let mapped =
                    mapper::patient_from_remote(&remote, Some(&patient), self.store.len::<Patient>());
                self.store.replace_by_key(&patient.id, mapped);
                return merged(KIND, &patient.id, SyncPath::Remote);
            }
        }

        let key = patient.id.clone();
        self.store.replace_by_key(&key, patient);
        merged(KIND, &key, SyncPath::Local)
    }

    /// Delete a patient by document id.
    ///
    /// The local entry is removed whatever the remote outcome.
    pub async fn delete_patient(&self, id: &str) -> SyncPath {
        let mut path = SyncPath::Local;
        if let Some(key) = self.store.find::<Patient>(id).and_then(|p| p.remote_key) {
            if attempt(KIND, "delete", self.api.delete_patient(key)).await.is_ok() {
                path = SyncPath::Remote;
            }
        }

        self.store.remove_by_key::<Patient>(id);
        merged(KIND, id, path)
    }
}
