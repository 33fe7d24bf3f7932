//! Demo data the collections start from before the first remote load.

use crate::models::{LabTechnician, LipidProfile, Patient, Title};
use crate::store::CollectionStore;

pub fn patients() -> Vec<Patient> {
    vec![
        Patient {
            id: "10203040".into(),
            entry_code: "P0001".into(),
            name: "Juan".into(),
            last_name: "Pérez".into(),
            address: "Calle 123".into(),
            phone: "3001234567".into(),
            remote_key: None,
        },
        Patient {
            id: "50607080".into(),
            entry_code: "P0002".into(),
            name: "Ana".into(),
            last_name: "García".into(),
            address: "Av. Siempre Viva 742".into(),
            phone: "3109876543".into(),
            remote_key: None,
        },
    ]
}

pub fn technicians() -> Vec<LabTechnician> {
    vec![
        LabTechnician::new(
            "LT-01".into(),
            "Carlos Rodriguez".into(),
            Title::Bacteriologist,
            "3216549870".into(),
        ),
        LabTechnician::new(
            "LT-02".into(),
            "Maria Lopez".into(),
            Title::Microbiologist,
            "3157894561".into(),
        ),
    ]
}

pub fn results() -> Vec<LipidProfile> {
    vec![LipidProfile {
        id: "R001".into(),
        patient_entry_code: "P0001".into(),
        lab_technician_id: "LT-01".into(),
        total_cholesterol: 210.0,
        hdl_cholesterol: 45.0,
        ldl_cholesterol: 130.0,
        triglycerides: 150.0,
        date: chrono::Utc::now().to_rfc3339(),
    }]
}

/// A store holding the demo data.
pub fn seeded_store() -> CollectionStore {
    CollectionStore::new(patients(), technicians(), results())
}
