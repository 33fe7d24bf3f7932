//! Lipid-profile result models.

use serde::{Deserialize, Serialize};

/// A lipid-profile result. Measurements are in mg/dL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct LipidProfile {
    /// Server key as a string once persisted, `R###` before
    pub id: String,
    /// References `Patient::entry_code`
    pub patient_entry_code: String,
    /// References `LabTechnician::id`
    pub lab_technician_id: String,
    pub total_cholesterol: f64,
    pub hdl_cholesterol: f64,
    pub ldl_cholesterol: f64,
    pub triglycerides: f64,
    /// RFC 3339 timestamp, set at creation
    pub date: String,
}

impl LipidProfile {
    /// The server surrogate key, if `id` is one.
    pub fn remote_key(&self) -> Option<i64> {
        self.id.parse().ok()
    }

    pub fn is_synced(&self) -> bool {
        self.remote_key().is_some()
    }
}

/// Screen input for entering a result (no `id`, no `date`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct NewLipidProfile {
    pub patient_entry_code: String,
    pub lab_technician_id: String,
    pub total_cholesterol: f64,
    pub hdl_cholesterol: f64,
    pub ldl_cholesterol: f64,
    pub triglycerides: f64,
}

impl NewLipidProfile {
    /// Complete the draft with a local identifier and timestamp.
    pub fn into_profile(self, id: String, date: String) -> LipidProfile {
        LipidProfile {
            id,
            patient_entry_code: self.patient_entry_code,
            lab_technician_id: self.lab_technician_id,
            total_cholesterol: self.total_cholesterol,
            hdl_cholesterol: self.hdl_cholesterol,
            ldl_cholesterol: self.ldl_cholesterol,
            triglycerides: self.triglycerides,
            date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str) -> LipidProfile {
        NewLipidProfile {
            patient_entry_code: "P0001".into(),
            lab_technician_id: "LT-01".into(),
            total_cholesterol: 210.0,
            hdl_cholesterol: 45.0,
            ldl_cholesterol: 130.0,
            triglycerides: 150.0,
        }
        .into_profile(id.into(), "2024-01-15T10:00:00Z".into())
    }

    #[test]
    fn test_remote_key() {
        assert_eq!(profile("42").remote_key(), Some(42));
        assert_eq!(profile("R001").remote_key(), None);
        assert!(!profile("R001").is_synced());
    }
}
