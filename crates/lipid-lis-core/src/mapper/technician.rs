//! Lab technician mapping.

use lipid_lis_remote::{RemoteSpecialist, SpecialistPayload};

use super::pick;
use crate::models::{LabTechnician, Title};

/// Remote create/update body for a technician.
pub fn specialist_payload(technician: &LabTechnician) -> SpecialistPayload {
    SpecialistPayload {
        internal_code: technician.id.clone(),
        name: technician.name.clone(),
        title: technician.title.code().to_string(),
        phone: technician.phone.clone(),
    }
}

/// Map a remote specialist to the local shape.
///
/// A present title code always decides the title (unknown codes become
/// Bacteriologist); an absent one keeps the prior title.
pub fn technician_from_remote(remote: &RemoteSpecialist, prior: Option<&LabTechnician>) -> LabTechnician {
    let key_text = remote.id.map(|k| k.to_string());

    let title = match remote.title.as_deref().filter(|c| !c.is_empty()) {
        Some(code) => Title::from_code(code),
        None => prior.map(|t| t.title).unwrap_or(Title::Bacteriologist),
    };

    LabTechnician {
        id: pick([
            remote.internal_code.as_deref(),
            prior.map(|t| t.id.as_str()),
            key_text.as_deref(),
        ]),
        name: pick([remote.name.as_deref(), prior.map(|t| t.name.as_str())]),
        title,
        phone: pick([remote.phone.as_deref(), prior.map(|t| t.phone.as_str())]),
        remote_key: remote.id.or(prior.and_then(|t| t.remote_key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn local(title: Title) -> LabTechnician {
        LabTechnician::new("LT-01".into(), "Carlos Rodriguez".into(), title, "3216549870".into())
    }

    #[test]
    fn test_payload_uses_code() {
        let payload = specialist_payload(&local(Title::Microbiologist));
        assert_eq!(payload.internal_code, "LT-01");
        assert_eq!(payload.title, "MICR");
    }

    #[test]
    fn test_unknown_code_is_bacteriologist() {
        let remote = RemoteSpecialist {
            id: Some(3),
            internal_code: Some("LT-09".into()),
            title: Some("XYZZY".into()),
            ..Default::default()
        };
        let technician = technician_from_remote(&remote, Some(&local(Title::Biologist)));
        assert_eq!(technician.title, Title::Bacteriologist);
        assert_eq!(technician.id, "LT-09");
        assert_eq!(technician.remote_key, Some(3));
    }

    #[test]
    fn test_absent_code_keeps_prior() {
        let technician = technician_from_remote(&RemoteSpecialist::default(), Some(&local(Title::Biologist)));
        assert_eq!(technician.title, Title::Biologist);
        assert_eq!(technician.name, "Carlos Rodriguez");
    }

    proptest! {
        #[test]
        fn prop_unknown_codes_default(code in "[A-Z]{0,6}") {
            prop_assume!(!["BACT", "MICR", "BIOL"].contains(&code.as_str()));
            prop_assert_eq!(Title::from_code(&code), Title::Bacteriologist);
        }

        #[test]
        fn prop_round_trip_restores_fields(
            id in "[A-Z]{2}-[0-9]{2}",
            name in "\\PC{1,20}",
            phone in "[0-9]{0,12}",
            title_index in 0usize..3,
        ) {
            let original = LabTechnician::new(id, name, Title::ALL[title_index], phone);
            let payload = specialist_payload(&original);
            let echoed = RemoteSpecialist {
                id: Some(1),
                internal_code: Some(payload.internal_code),
                name: Some(payload.name),
                title: Some(payload.title),
                phone: Some(payload.phone),
            };
            let mapped = technician_from_remote(&echoed, None);
            prop_assert_eq!(&mapped.id, &original.id);
            prop_assert_eq!(&mapped.name, &original.name);
            prop_assert_eq!(&mapped.phone, &original.phone);
            prop_assert_eq!(mapped.title, original.title);
        }
    }
}
