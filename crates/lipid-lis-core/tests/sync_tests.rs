//! Reconciliation integration tests against the mock record API.

use std::sync::Arc;

use lipid_lis_core::seed;
use lipid_lis_core::{
    CollectionStore, LabTechnician, LipidProfile, NewLipidProfile, NewPatient, Patient,
    SyncCoordinator, SyncPath, Title,
};
use lipid_lis_remote::{MockRecordApi, RemoteSpecialist};

fn setup(api: MockRecordApi) -> (Arc<MockRecordApi>, Arc<CollectionStore>, SyncCoordinator) {
    let api = Arc::new(api);
    let store = Arc::new(seed::seeded_store());
    let sync = SyncCoordinator::new(api.clone(), store.clone());
    (api, store, sync)
}

fn draft_patient(id: &str) -> NewPatient {
    NewPatient {
        id: id.to_string(),
        name: "X".to_string(),
        last_name: "Y".to_string(),
        address: String::new(),
        phone: String::new(),
    }
}

fn draft_result(patient: &str, technician: &str) -> NewLipidProfile {
    NewLipidProfile {
        patient_entry_code: patient.to_string(),
        lab_technician_id: technician.to_string(),
        total_cholesterol: 180.0,
        hdl_cholesterol: 50.0,
        ldl_cholesterol: 100.0,
        triglycerides: 120.0,
    }
}

async fn add_synced_result(sync: &SyncCoordinator) -> LipidProfile {
    let patient = sync.add_patient(draft_patient("999")).await;
    let technician = sync
        .add_technician(LabTechnician::new(
            "LT-03".into(),
            "Luisa".into(),
            Title::Biologist,
            String::new(),
        ))
        .await;
    sync.add_result(draft_result(&patient.entry_code, &technician.id))
        .await
}

// =========================================================================
// Patients
// =========================================================================

#[tokio::test]
async fn test_create_patient_remote_failure_synthesizes_entry_code() {
    let (_api, store, sync) = setup(MockRecordApi::offline());
    let prior = store.len::<Patient>();

    let added = sync.add_patient(draft_patient("999")).await;

    assert_eq!(added.entry_code, format!("P{:04}", prior + 1));
    assert_eq!(added.remote_key, None);
    let stored = store.find::<Patient>("999").unwrap();
    assert_eq!(stored.entry_code, "P0003");
    assert_eq!(stored.name, "X");
    assert!(!stored.is_synced());
}

#[tokio::test]
async fn test_create_patient_remote_success_uses_server_fields() {
    let (api, store, sync) = setup(MockRecordApi::new());

    let added = sync.add_patient(draft_patient("999")).await;

    assert_eq!(added.remote_key, Some(1));
    assert_eq!(added.entry_code, "A00001");
    assert_eq!(store.snapshot::<Patient>().last(), Some(&added));
    assert_eq!(api.patients().len(), 1);
}

#[tokio::test]
async fn test_entry_codes_repeat_after_delete() {
    let (_api, store, sync) = setup(MockRecordApi::offline());

    let first = sync.add_patient(draft_patient("1")).await;
    sync.delete_patient("1").await;
    let second = sync.add_patient(draft_patient("2")).await;

    assert_eq!(first.entry_code, second.entry_code);
    assert_eq!(store.len::<Patient>(), 3);
}

#[tokio::test]
async fn test_update_unsynced_patient_skips_remote() {
    let (api, store, sync) = setup(MockRecordApi::new());
    let mut patient = store.find::<Patient>("10203040").unwrap();
    patient.phone = "3000000000".into();

    let path = sync.update_patient(patient.clone()).await;

    assert_eq!(path, SyncPath::Local);
    assert!(api.calls().is_empty());
    assert_eq!(store.find::<Patient>("10203040"), Some(patient));
}

#[tokio::test]
async fn test_update_synced_patient_goes_remote() {
    let (api, store, sync) = setup(MockRecordApi::new());
    let mut patient = sync.add_patient(draft_patient("999")).await;
    patient.address = "Carrera 7".into();

    let path = sync.update_patient(patient).await;

    assert_eq!(path, SyncPath::Remote);
    assert_eq!(api.patients()[0].address.as_deref(), Some("Carrera 7"));
    let stored = store.find::<Patient>("999").unwrap();
    assert_eq!(stored.address, "Carrera 7");
    assert_eq!(stored.entry_code, "A00001");
}

#[tokio::test]
async fn test_update_remote_failure_keeps_caller_record() {
    let (api, store, sync) = setup(MockRecordApi::new());
    let mut patient = sync.add_patient(draft_patient("999")).await;
    api.set_offline(true);
    patient.name = "Changed".into();

    let path = sync.update_patient(patient.clone()).await;

    assert_eq!(path, SyncPath::Local);
    assert_eq!(store.find::<Patient>("999"), Some(patient));
}

#[tokio::test]
async fn test_update_missing_patient_is_noop() {
    let (_api, store, sync) = setup(MockRecordApi::offline());
    let before = store.snapshot::<Patient>();

    let ghost = draft_patient("nobody").into_patient("P9999".into());
    sync.update_patient(ghost).await;

    assert_eq!(store.snapshot::<Patient>(), before);
}

#[tokio::test]
async fn test_delete_synced_patient_remote_failure_still_removes() {
    let (api, store, sync) = setup(MockRecordApi::new());
    sync.add_patient(draft_patient("999")).await;
    api.set_offline(true);

    let path = sync.delete_patient("999").await;

    assert_eq!(path, SyncPath::Local);
    assert!(store.find::<Patient>("999").is_none());
    // Remote copy survives: local and remote diverge.
    api.set_offline(false);
    assert_eq!(api.patients().len(), 1);
}

#[tokio::test]
async fn test_delete_unknown_patient_is_noop() {
    let (api, store, sync) = setup(MockRecordApi::new());
    let before = store.snapshot::<Patient>();

    sync.delete_patient("does-not-exist").await;

    assert_eq!(store.snapshot::<Patient>(), before);
    assert!(api.calls().is_empty());
}

// =========================================================================
// Lab technicians
// =========================================================================

#[tokio::test]
async fn test_create_technician_offline_appends_input() {
    let (_api, store, sync) = setup(MockRecordApi::offline());
    let technician =
        LabTechnician::new("LT-03".into(), "Luisa".into(), Title::Biologist, "300".into());

    let added = sync.add_technician(technician.clone()).await;

    assert_eq!(added, technician);
    assert_eq!(store.snapshot::<LabTechnician>().last(), Some(&technician));
}

#[tokio::test]
async fn test_technician_unknown_title_code_from_remote() {
    let api = MockRecordApi::new();
    let key = api.insert_specialist(RemoteSpecialist {
        internal_code: Some("LT-09".into()),
        name: Some("Pedro".into()),
        title: Some("BIOL".into()),
        phone: Some("311".into()),
        ..Default::default()
    });
    let (api, store, sync) = setup(api);
    sync.load_all().await;

    // Server now reports a code this client does not know.
    let mut technician = store.find::<LabTechnician>("LT-09").unwrap();
    assert_eq!(technician.title, Title::Biologist);
    assert_eq!(technician.remote_key, Some(key));

    technician.title = Title::Microbiologist;
    api.set_title_override(Some("XYZZY"));
    let path = sync.update_technician(technician).await;

    assert_eq!(path, SyncPath::Remote);
    assert_eq!(
        store.find::<LabTechnician>("LT-09").unwrap().title,
        Title::Bacteriologist
    );
}

#[tokio::test]
async fn test_delete_technician_remote() {
    let (api, store, sync) = setup(MockRecordApi::new());
    let technician =
        LabTechnician::new("LT-03".into(), "Luisa".into(), Title::Biologist, String::new());
    sync.add_technician(technician).await;

    let path = sync.delete_technician("LT-03").await;

    assert_eq!(path, SyncPath::Remote);
    assert!(api.specialists().is_empty());
    assert!(!store.contains::<LabTechnician>("LT-03"));
}

#[tokio::test]
async fn test_update_technician_remote_failure_keeps_caller_record() {
    let (api, store, sync) = setup(MockRecordApi::new());
    let mut technician = sync
        .add_technician(LabTechnician::new(
            "LT-03".into(),
            "Luisa".into(),
            Title::Biologist,
            String::new(),
        ))
        .await;
    assert!(technician.is_synced());
    api.set_offline(true);
    technician.name = "Luisa Fernanda".into();
    technician.title = Title::Microbiologist;

    let path = sync.update_technician(technician.clone()).await;

    assert_eq!(path, SyncPath::Local);
    assert_eq!(store.find::<LabTechnician>("LT-03"), Some(technician));
    assert_eq!(api.specialists()[0].name.as_deref(), Some("Luisa"));
}

// =========================================================================
// Results
// =========================================================================

#[tokio::test]
async fn test_create_result_with_unsynced_references_skips_remote() {
    let (api, store, sync) = setup(MockRecordApi::new());
    let prior = store.len::<LipidProfile>();

    let added = sync.add_result(draft_result("P0001", "LT-01")).await;

    assert_eq!(added.id, format!("R{:03}", prior + 1));
    assert_eq!(added.id, "R002");
    assert!(!added.date.is_empty());
    assert!(api.calls().is_empty());
    assert!(!added.is_synced());
}

#[tokio::test]
async fn test_create_result_with_synced_references() {
    let (api, store, sync) = setup(MockRecordApi::new());
    let patient = sync.add_patient(draft_patient("999")).await;
    let technician = sync
        .add_technician(LabTechnician::new(
            "LT-03".into(),
            "Luisa".into(),
            Title::Biologist,
            String::new(),
        ))
        .await;

    let added = sync
        .add_result(draft_result(&patient.entry_code, &technician.id))
        .await;

    assert!(added.is_synced());
    assert_eq!(added.patient_entry_code, patient.entry_code);
    assert_eq!(added.lab_technician_id, "LT-03");
    assert_eq!(added.total_cholesterol, 180.0);
    assert_eq!(api.results().len(), 1);
    assert!(store.contains::<LipidProfile>(&added.id));
}

#[tokio::test]
async fn test_create_result_remote_failure_falls_back() {
    let (api, _store, sync) = setup(MockRecordApi::new());
    let patient = sync.add_patient(draft_patient("999")).await;
    let technician = sync
        .add_technician(LabTechnician::new(
            "LT-03".into(),
            "Luisa".into(),
            Title::Biologist,
            String::new(),
        ))
        .await;
    api.set_offline(true);

    let added = sync
        .add_result(draft_result(&patient.entry_code, &technician.id))
        .await;

    assert_eq!(added.id, "R002");
    assert_eq!(api.calls().last().map(String::as_str), Some("create_result"));
}

#[tokio::test]
async fn test_update_local_result_replaces_in_place() {
    let (api, store, sync) = setup(MockRecordApi::new());
    let mut result = store.find::<LipidProfile>("R001").unwrap();
    result.triglycerides = 99.0;

    let path = sync.update_result(result.clone()).await;

    assert_eq!(path, SyncPath::Local);
    assert!(api.calls().is_empty());
    assert_eq!(store.snapshot::<LipidProfile>(), vec![result]);
}

#[tokio::test]
async fn test_update_synced_result_goes_remote() {
    let (api, store, sync) = setup(MockRecordApi::new());
    let mut result = add_synced_result(&sync).await;
    assert!(result.is_synced());
    result.triglycerides = 99.0;

    let path = sync.update_result(result.clone()).await;

    assert_eq!(path, SyncPath::Remote);
    assert_eq!(api.calls().last().map(String::as_str), Some("update_result"));
    assert_eq!(api.results()[0].triglycerides, Some(99.0));
    assert_eq!(store.find::<LipidProfile>(&result.id), Some(result));
    assert_eq!(store.len::<LipidProfile>(), 2);
}

#[tokio::test]
async fn test_update_synced_result_remote_failure_keeps_caller_record() {
    let (api, store, sync) = setup(MockRecordApi::new());
    let mut result = add_synced_result(&sync).await;
    api.set_offline(true);
    result.hdl_cholesterol = 10.0;

    let path = sync.update_result(result.clone()).await;

    assert_eq!(path, SyncPath::Local);
    assert_eq!(api.calls().last().map(String::as_str), Some("update_result"));
    assert_eq!(api.results()[0].hdl_cholesterol, Some(50.0));
    assert_eq!(store.find::<LipidProfile>(&result.id), Some(result));
}

#[tokio::test]
async fn test_delete_result_always_local() {
    let (_api, store, sync) = setup(MockRecordApi::offline());

    sync.delete_result("R001").await;
    sync.delete_result("R001").await;

    assert!(store.snapshot::<LipidProfile>().is_empty());
}

#[tokio::test]
async fn test_fetch_patient_results_falls_back_to_local() {
    let (_api, _store, sync) = setup(MockRecordApi::offline());

    let (results, path) = sync.fetch_patient_results("P0001").await;

    assert_eq!(path, SyncPath::Local);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "R001");
}
