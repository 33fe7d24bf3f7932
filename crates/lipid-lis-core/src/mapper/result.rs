//! Lipid-profile result mapping.

use std::collections::HashMap;

use lipid_lis_remote::{RemoteResult, ResultPayload};

use super::pick;
use crate::models::{LabTechnician, LipidProfile, NewLipidProfile, Patient};

/// Lookup between business identifiers and surrogate keys for the entities a
/// result references. Built from store snapshots; only synced entities appear.
#[derive(Debug, Default, Clone)]
pub struct ReferenceIndex {
    patient_keys: HashMap<String, i64>,
    patient_codes: HashMap<i64, String>,
    technician_keys: HashMap<String, i64>,
    technician_ids: HashMap<i64, String>,
}

impl ReferenceIndex {
    pub fn new(patients: &[Patient], technicians: &[LabTechnician]) -> Self {
        let mut index = Self::default();
        for patient in patients {
            if let Some(key) = patient.remote_key {
                index.patient_keys.insert(patient.entry_code.clone(), key);
                index.patient_codes.insert(key, patient.entry_code.clone());
            }
        }
        for technician in technicians {
            if let Some(key) = technician.remote_key {
                index.technician_keys.insert(technician.id.clone(), key);
                index.technician_ids.insert(key, technician.id.clone());
            }
        }
        index
    }

    /// Surrogate key of the patient with this entry code.
    pub fn patient_key(&self, entry_code: &str) -> Option<i64> {
        self.patient_keys.get(entry_code).copied()
    }

    /// Surrogate key of the technician with this internal code.
    pub fn technician_key(&self, technician_id: &str) -> Option<i64> {
        self.technician_keys.get(technician_id).copied()
    }

    pub fn patient_entry_code(&self, key: i64) -> Option<&str> {
        self.patient_codes.get(&key).map(String::as_str)
    }

    pub fn technician_id(&self, key: i64) -> Option<&str> {
        self.technician_ids.get(&key).map(String::as_str)
    }
}

/// Remote body for a result draft, if both references resolve to surrogate keys.
pub fn new_result_payload(draft: &NewLipidProfile, refs: &ReferenceIndex) -> Option<ResultPayload> {
    Some(ResultPayload {
        patient: refs.patient_key(&draft.patient_entry_code)?,
        specialist: refs.technician_key(&draft.lab_technician_id)?,
        total_cholesterol: draft.total_cholesterol,
        hdl_cholesterol: draft.hdl_cholesterol,
        ldl_cholesterol: draft.ldl_cholesterol,
        triglycerides: draft.triglycerides,
    })
}

/// Remote body for an existing result, if both references resolve.
pub fn result_payload(profile: &LipidProfile, refs: &ReferenceIndex) -> Option<ResultPayload> {
    Some(ResultPayload {
        patient: refs.patient_key(&profile.patient_entry_code)?,
        specialist: refs.technician_key(&profile.lab_technician_id)?,
        total_cholesterol: profile.total_cholesterol,
        hdl_cholesterol: profile.hdl_cholesterol,
        ldl_cholesterol: profile.ldl_cholesterol,
        triglycerides: profile.triglycerides,
    })
}

/// Map a remote result to the local shape.
///
/// References come from the nested details when present, then from the
/// numeric keys via `refs`, then from `prior`.
pub fn result_from_remote(
    remote: &RemoteResult,
    prior: Option<&LipidProfile>,
    refs: &ReferenceIndex,
) -> LipidProfile {
    let key_text = remote.id.map(|k| k.to_string());
    let now = chrono::Utc::now().to_rfc3339();

    let patient_entry_code = pick([
        remote
            .patient_details
            .as_ref()
            .and_then(|d| d.admission_code.as_deref()),
        remote.patient.and_then(|k| refs.patient_entry_code(k)),
        prior.map(|p| p.patient_entry_code.as_str()),
    ]);
    let lab_technician_id = pick([
        remote
            .specialist_details
            .as_ref()
            .and_then(|d| d.internal_code.as_deref()),
        remote.specialist.and_then(|k| refs.technician_id(k)),
        prior.map(|p| p.lab_technician_id.as_str()),
    ]);

    let measure = |remote: Option<f64>, local: fn(&LipidProfile) -> f64| {
        remote.or(prior.map(local)).unwrap_or(0.0)
    };

    LipidProfile {
        id: pick([key_text.as_deref(), prior.map(|p| p.id.as_str())]),
        patient_entry_code,
        lab_technician_id,
        total_cholesterol: measure(remote.total_cholesterol, |p| p.total_cholesterol),
        hdl_cholesterol: measure(remote.hdl_cholesterol, |p| p.hdl_cholesterol),
        ldl_cholesterol: measure(remote.ldl_cholesterol, |p| p.ldl_cholesterol),
        triglycerides: measure(remote.triglycerides, |p| p.triglycerides),
        date: pick([
            remote.created_at.as_deref(),
            prior.map(|p| p.date.as_str()),
            Some(now.as_str()),
        ]),
    }
}
