//! Patient models.

use serde::{Deserialize, Serialize};

/// A registered patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Document number - business identifier, immutable after creation
    pub id: String,
    /// Admission code - system assigned, immutable once set
    pub entry_code: String,
    /// First name
    pub name: String,
    pub last_name: String,
    pub address: String,
    pub phone: String,
    /// Server surrogate key - None until persisted remotely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_key: Option<i64>,
}

impl Patient {
    /// Check if this patient has been persisted remotely.
    pub fn is_synced(&self) -> bool {
        self.remote_key.is_some()
    }

    /// "Name LastName" for display.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.last_name).trim().to_string()
    }
}

/// Screen input for registering a patient (no system-assigned fields).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub id: String,
    pub name: String,
    pub last_name: String,
    pub address: String,
    pub phone: String,
}

impl NewPatient {
    /// Complete the draft with an entry code, as a local-only record.
    pub fn into_patient(self, entry_code: String) -> Patient {
        Patient {
            id: self.id,
            entry_code,
            name: self.name,
            last_name: self.last_name,
            address: self.address,
            phone: self.phone,
            remote_key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> NewPatient {
        NewPatient {
            id: "10203040".into(),
            name: "Juan".into(),
            last_name: "Pérez".into(),
            address: "Calle 123".into(),
            phone: "3001234567".into(),
        }
    }

    #[test]
    fn test_into_patient_is_local_only() {
        let patient = draft().into_patient("P0003".into());
        assert_eq!(patient.id, "10203040");
        assert_eq!(patient.entry_code, "P0003");
        assert!(!patient.is_synced());
    }

    #[test]
    fn test_full_name() {
        let patient = draft().into_patient("P0001".into());
        assert_eq!(patient.full_name(), "Juan Pérez");
    }

    #[test]
    fn test_camel_case_shape() {
        let patient = draft().into_patient("P0001".into());
        let value = serde_json::to_value(&patient).unwrap();
        assert_eq!(value["entryCode"], "P0001");
        assert_eq!(value["lastName"], "Pérez");
        assert!(value.get("remoteKey").is_none());
    }
}
