//! Patient mapping.

use lipid_lis_remote::{PatientPayload, RemotePatient};

use super::pick;
use crate::identifiers;
use crate::models::{NewPatient, Patient};

/// Remote create/update body for a patient.
pub fn patient_payload(patient: &Patient) -> PatientPayload {
    PatientPayload {
        document: patient.id.clone(),
        first_name: patient.name.clone(),
        last_name: patient.last_name.clone(),
        address: patient.address.clone(),
        phone: patient.phone.clone(),
    }
}

/// Remote create body for a patient draft.
pub fn new_patient_payload(draft: &NewPatient) -> PatientPayload {
    PatientPayload {
        document: draft.id.clone(),
        first_name: draft.name.clone(),
        last_name: draft.last_name.clone(),
        address: draft.address.clone(),
        phone: draft.phone.clone(),
    }
}

/// Map a remote patient to the local shape.
///
/// `prior` is the locally known version (the draft on create, the edited
/// record on update). `ordinal` is the collection count used to generate an
/// entry code when neither the server nor `prior` supplies one.
pub fn patient_from_remote(remote: &RemotePatient, prior: Option<&Patient>, ordinal: usize) -> Patient {
    let key_text = remote.id.map(|k| k.to_string());

    let mut entry_code = pick([
        remote.admission_code.as_deref(),
        prior.map(|p| p.entry_code.as_str()),
    ]);
    if entry_code.is_empty() {
        entry_code = identifiers::patient_entry_code(ordinal);
    }

    Patient {
        id: pick([
            remote.document.as_deref(),
            prior.map(|p| p.id.as_str()),
            key_text.as_deref(),
        ]),
        entry_code,
        name: pick([remote.first_name.as_deref(), prior.map(|p| p.name.as_str())]),
        last_name: pick([remote.last_name.as_deref(), prior.map(|p| p.last_name.as_str())]),
        address: pick([remote.address.as_deref(), prior.map(|p| p.address.as_str())]),
        phone: pick([remote.phone.as_deref(), prior.map(|p| p.phone.as_str())]),
        remote_key: remote.id.or(prior.and_then(|p| p.remote_key)),
    }
}
