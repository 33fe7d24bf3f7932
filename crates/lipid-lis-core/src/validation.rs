//! Form checks run before a mutation is submitted.
//!
//! The sync layer itself never validates; screens call these first.

use thiserror::Error;

use crate::models::{LabTechnician, NewLipidProfile, NewPatient, Patient};
use crate::store::CollectionStore;

/// Validation failures shown to the user.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Required field missing: {0}")]
    MissingField(&'static str),

    #[error("Duplicate identifier: {0}")]
    Duplicate(String),
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

/// Document, name and last name are required.
pub fn check_patient_fields(id: &str, name: &str, last_name: &str) -> Result<(), ValidationError> {
    require(id, "document")?;
    require(name, "name")?;
    require(last_name, "last name")
}

/// Required fields plus document uniqueness.
pub fn check_new_patient(store: &CollectionStore, draft: &NewPatient) -> Result<(), ValidationError> {
    check_patient_fields(&draft.id, &draft.name, &draft.last_name)?;
    if store.contains::<Patient>(&draft.id) {
        return Err(ValidationError::Duplicate(draft.id.clone()));
    }
    Ok(())
}

/// Internal code and name are required.
pub fn check_technician_fields(technician: &LabTechnician) -> Result<(), ValidationError> {
    require(&technician.id, "internal code")?;
    require(&technician.name, "name")
}

/// Required fields plus internal-code uniqueness.
pub fn check_new_technician(
    store: &CollectionStore,
    technician: &LabTechnician,
) -> Result<(), ValidationError> {
    check_technician_fields(technician)?;
    if store.contains::<LabTechnician>(&technician.id) {
        return Err(ValidationError::Duplicate(technician.id.clone()));
    }
    Ok(())
}

/// A patient and a technician must both be selected.
pub fn check_result(draft: &NewLipidProfile) -> Result<(), ValidationError> {
    require(&draft.patient_entry_code, "patient")?;
    require(&draft.lab_technician_id, "lab technician")
}
