//! Lab technician reconciliation.

use super::{attempt, merged, SyncCoordinator, SyncPath};
use crate::mapper;
use crate::models::{EntityKind, LabTechnician};

const KIND: EntityKind = EntityKind::LabTechnician;

impl SyncCoordinator {
    /// Register a technician. The internal code is user-supplied, so the
    /// local fallback appends the input as-is, without a remote key.
    pub async fn add_technician(&self, technician: LabTechnician) -> LabTechnician {
        let payload = mapper::specialist_payload(&technician);

        let record = match attempt(KIND, "create", self.api.create_specialist(&payload)).await {
            Ok(remote) => mapper::technician_from_remote(&remote, Some(&technician)),
            Err(_) => LabTechnician {
                remote_key: None,
                ..technician
            },
        };
        self.store.append(record.clone());
        record
    }

    /// Update a technician, matched by internal code.
    pub async fn update_technician(&self, technician: LabTechnician) -> SyncPath {
        if let Some(key) = technician.remote_key {
            let payload = mapper::specialist_payload(&technician);
            if let Ok(remote) =
                attempt(KIND, "update", self.api.update_specialist(key, &payload)).await
            {
                let mapped = mapper::technician_from_remote(&remote, Some(&technician));
                self.store.replace_by_key(&technician.id, mapped);
                return merged(KIND, &technician.id, SyncPath::Remote);
            }
        }

        let key = technician.id.clone();
        self.store.replace_by_key(&key, technician);
        merged(KIND, &key, SyncPath::Local)
    }

    /// Delete a technician by internal code; always applied locally.
    pub async fn delete_technician(&self, id: &str) -> SyncPath {
        let mut path = SyncPath::Local;
        if let Some(key) = self.store.find::<LabTechnician>(id).and_then(|t| t.remote_key) {
            if attempt(KIND, "delete", self.api.delete_specialist(key)).await.is_ok() {
                path = SyncPath::Remote;
            }
        }

        self.store.remove_by_key::<LabTechnician>(id);
        merged(KIND, id, path)
    }
}
