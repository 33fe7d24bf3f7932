//! Read-side helpers over store snapshots.

use crate::models::{LabTechnician, LipidProfile, Patient};

/// Patients whose name or last name contains `term` (case-insensitive), or
/// whose document contains it verbatim. An empty term matches all.
pub fn search_patients(patients: &[Patient], term: &str) -> Vec<Patient> {
    let needle = term.to_lowercase();
    patients
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.last_name.to_lowercase().contains(&needle)
                || p.id.contains(term)
        })
        .cloned()
        .collect()
}

/// Technicians whose name contains `term` (case-insensitive), or whose
/// internal code contains it verbatim.
pub fn search_technicians(technicians: &[LabTechnician], term: &str) -> Vec<LabTechnician> {
    let needle = term.to_lowercase();
    technicians
        .iter()
        .filter(|t| t.name.to_lowercase().contains(&needle) || t.id.contains(term))
        .cloned()
        .collect()
}

/// Results recorded for the patient with this entry code, in store order.
pub fn results_for_patient(results: &[LipidProfile], entry_code: &str) -> Vec<LipidProfile> {
    results
        .iter()
        .filter(|r| r.patient_entry_code == entry_code)
        .cloned()
        .collect()
}
