//! Screen-facing facade.
//!
//! Mutations are fire-and-forget: each one is spawned as a task and the
//! caller observes the outcome through [`LabClient::subscribe`] and the
//! snapshot accessors. The returned `JoinHandle` may be ignored.

use std::future::Future;
use std::sync::Arc;

use lipid_lis_remote::RecordApi;
use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::models::{LabTechnician, LipidProfile, NewLipidProfile, NewPatient, Patient};
use crate::query;
use crate::store::{CollectionStore, StoreEvent, StoreSnapshot};
use crate::sync::SyncCoordinator;
use crate::validation::{self, ValidationError};

#[derive(Clone)]
pub struct LabClient {
    sync: SyncCoordinator,
    runtime: Handle,
}

impl LabClient {
    /// Build a client spawning onto `runtime`.
    pub fn new(api: Arc<dyn RecordApi>, store: Arc<CollectionStore>, runtime: Handle) -> Self {
        Self {
            sync: SyncCoordinator::new(api, store),
            runtime,
        }
    }

    /// Build a client on the ambient tokio runtime.
    ///
    /// Panics outside a runtime context, like `Handle::current`.
    pub fn on_current_runtime(api: Arc<dyn RecordApi>, store: Arc<CollectionStore>) -> Self {
        Self::new(api, store, Handle::current())
    }

    pub fn coordinator(&self) -> &SyncCoordinator {
        &self.sync
    }

    pub fn store(&self) -> &Arc<CollectionStore> {
        self.sync.store()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.store().subscribe()
    }

    fn spawn<F>(&self, op: &'static str, task: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let span = tracing::info_span!("mutation", op, op_id = %uuid::Uuid::new_v4());
        self.runtime.spawn(task.instrument(span))
    }

    /// Kick off the initial load of all collections.
    pub fn start(&self) -> JoinHandle<()> {
        let sync = self.sync.clone();
        self.spawn("load_all", async move {
            sync.load_all().await;
        })
    }

    // =========================================================================
    // Patients
    // =========================================================================

    pub fn patients(&self) -> Vec<Patient> {
        self.store().snapshot()
    }

    pub fn search_patients(&self, term: &str) -> Vec<Patient> {
        query::search_patients(&self.patients(), term)
    }

    pub fn validate_new_patient(&self, draft: &NewPatient) -> Result<(), ValidationError> {
        validation::check_new_patient(self.store(), draft)
    }

    pub fn add_patient(&self, draft: NewPatient) -> JoinHandle<()> {
        let sync = self.sync.clone();
        self.spawn("add_patient", async move {
            sync.add_patient(draft).await;
        })
    }

    pub fn update_patient(&self, patient: Patient) -> JoinHandle<()> {
        let sync = self.sync.clone();
        self.spawn("update_patient", async move {
            sync.update_patient(patient).await;
        })
    }

    pub fn delete_patient(&self, id: impl Into<String>) -> JoinHandle<()> {
        let sync = self.sync.clone();
        let id = id.into();
        self.spawn("delete_patient", async move {
            sync.delete_patient(&id).await;
        })
    }

    // =========================================================================
    // Lab technicians
    // =========================================================================

    pub fn technicians(&self) -> Vec<LabTechnician> {
        self.store().snapshot()
    }

    pub fn search_technicians(&self, term: &str) -> Vec<LabTechnician> {
        query::search_technicians(&self.technicians(), term)
    }

    pub fn validate_new_technician(&self, technician: &LabTechnician) -> Result<(), ValidationError> {
        validation::check_new_technician(self.store(), technician)
    }

    pub fn add_technician(&self, technician: LabTechnician) -> JoinHandle<()> {
        let sync = self.sync.clone();
        self.spawn("add_technician", async move {
            sync.add_technician(technician).await;
        })
    }

    pub fn update_technician(&self, technician: LabTechnician) -> JoinHandle<()> {
        let sync = self.sync.clone();
        self.spawn("update_technician", async move {
            sync.update_technician(technician).await;
        })
    }

    pub fn delete_technician(&self, id: impl Into<String>) -> JoinHandle<()> {
        let sync = self.sync.clone();
        let id = id.into();
        self.spawn("delete_technician", async move {
            sync.delete_technician(&id).await;
        })
    }

    // =========================================================================
    // Results
    // =========================================================================

    pub fn results(&self) -> Vec<LipidProfile> {
        self.store().snapshot()
    }

    /// Results for a patient from the local collection.
    pub fn results_for_patient(&self, entry_code: &str) -> Vec<LipidProfile> {
        query::results_for_patient(&self.results(), entry_code)
    }

    /// Results for a patient, asking the remote side first.
    pub async fn consult_results(&self, entry_code: &str) -> Vec<LipidProfile> {
        self.sync.fetch_patient_results(entry_code).await.0
    }

    pub fn validate_result(&self, draft: &NewLipidProfile) -> Result<(), ValidationError> {
        validation::check_result(draft)
    }

    pub fn add_result(&self, draft: NewLipidProfile) -> JoinHandle<()> {
        let sync = self.sync.clone();
        self.spawn("add_result", async move {
            sync.add_result(draft).await;
        })
    }

    pub fn update_result(&self, profile: LipidProfile) -> JoinHandle<()> {
        let sync = self.sync.clone();
        self.spawn("update_result", async move {
            sync.update_result(profile).await;
        })
    }

    pub fn delete_result(&self, id: impl Into<String>) -> JoinHandle<()> {
        let sync = self.sync.clone();
        let id = id.into();
        self.spawn("delete_result", async move {
            sync.delete_result(&id).await;
        })
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.store().snapshot_all()
    }
}
