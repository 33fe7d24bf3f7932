//! Lipid-LIS Core Library
//!
//! Local-state / remote-sync layer for a laboratory front-end that registers
//! patients and lab technicians and records lipid-profile results.
//!
//! # Architecture
//!
//! ```text
//!   Screens ──► LabClient (fire-and-forget tasks)
//!                   │
//!                   ▼
//!            SyncCoordinator ──► RecordApi (remote, may fail)
//!                   │                  │
//!                   │         ok ◄─────┴─────► RemoteUnavailable
//!                   │          │                     │
//!                   │    Entity Mapper       Identifier Policy
//!                   │          │                     │
//!                   ▼          ▼                     ▼
//!            CollectionStore  (Patients, LabTechnicians, LipidProfiles)
//!                   │
//!                   └──► StoreEvent broadcast ──► Screens re-read snapshots
//! ```
//!
//! # Core Principle
//!
//! **Remote failures never reach the screens.** Every mutation ends with
//! exactly one store update, through the server's response when available and
//! through locally synthesized data otherwise.
//!
//! # Modules
//!
//! - [`models`]: Local-shape domain types (Patient, LabTechnician, LipidProfile)
//! - [`mapper`]: Local ⇄ remote field translation
//! - [`identifiers`]: Local-only fallback identifiers
//! - [`store`]: In-memory collections with change events
//! - [`sync`]: Remote-then-local reconciliation
//! - [`client`]: Screen-facing facade
//! - [`query`], [`validation`], [`seed`], [`config`]: Supporting helpers

pub mod client;
pub mod config;
pub mod identifiers;
pub mod mapper;
pub mod models;
pub mod query;
pub mod seed;
pub mod store;
pub mod sync;
pub mod validation;

// Re-export commonly used types
pub use client::LabClient;
pub use config::LisConfig;
pub use models::{
    EntityKind, LabTechnician, LipidProfile, NewLipidProfile, NewPatient, Patient, Title,
};
pub use store::{CollectionStore, StoreChange, StoreEvent, StoreSnapshot};
pub use sync::{LoadReport, LoadStatus, SyncCoordinator, SyncPath};
pub use validation::ValidationError;

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Arc;

use lipid_lis_remote::HttpRecordApi;
use tokio::sync::broadcast::error::RecvError;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum LisError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl From<ValidationError> for LisError {
    fn from(e: ValidationError) -> Self {
        LisError::Validation(e.to_string())
    }
}

impl From<serde_json::Error> for LisError {
    fn from(e: serde_json::Error) -> Self {
        LisError::SerializationError(e.to_string())
    }
}

impl From<std::io::Error> for LisError {
    fn from(e: std::io::Error) -> Self {
        LisError::Runtime(e.to_string())
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Install a `tracing` subscriber honoring `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls are no-ops.
#[uniffi::export]
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Configuration from `LIS_API_URL` / `LIS_SEED_DEMO`.
#[uniffi::export]
pub fn config_from_env() -> LisConfig {
    LisConfig::from_env()
}

/// Open the core against the HTTP record API described by `config`.
#[uniffi::export]
pub fn open_lis(config: LisConfig) -> Result<Arc<LisCore>, LisError> {
    if config.api_url.trim().is_empty() {
        return Err(LisError::InvalidInput("api_url is empty".into()));
    }

    // One worker keeps mutations cooperatively scheduled.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("lis-sync")
        .enable_all()
        .build()?;

    let store = if config.seed_demo_data {
        seed::seeded_store()
    } else {
        CollectionStore::default()
    };
    let api = Arc::new(HttpRecordApi::new(config.api_url.clone()));
    let client = LabClient::new(api, Arc::new(store), runtime.handle().clone());

    tracing::info!(api_url = %config.api_url, seeded = config.seed_demo_data, "lis core opened");
    Ok(Arc::new(LisCore { runtime, client }))
}

/// Notified after every effective store change.
#[uniffi::export(callback_interface)]
pub trait StoreListener: Send + Sync {
    fn on_change(&self, kind: EntityKind);
}

// =========================================================================
// Main API Object
// =========================================================================

/// FFI wrapper owning the sync runtime.
#[derive(uniffi::Object)]
pub struct LisCore {
    runtime: tokio::runtime::Runtime,
    client: LabClient,
}

#[uniffi::export]
impl LisCore {
    /// Load all collections from the remote side in the background.
    pub fn start(&self) {
        self.client.start();
    }

    /// Forward store changes to `listener` until the core is dropped.
    ///
    /// Callbacks run on the blocking pool, one at a time and in event order,
    /// so a listener may call back into blocking methods such as
    /// [`LisCore::consult_results`].
    pub fn set_listener(&self, listener: Box<dyn StoreListener>) {
        let listener: Arc<dyn StoreListener> = Arc::from(listener);
        let mut rx = self.client.subscribe();
        self.runtime.spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => {
                        let listener = listener.clone();
                        let kind = event.kind;
                        if let Err(e) =
                            tokio::task::spawn_blocking(move || listener.on_change(kind)).await
                        {
                            tracing::warn!(%kind, error = %e, "store listener callback failed");
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "store listener lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
    }

    /// All collections as JSON.
    pub fn export_snapshot_json(&self) -> Result<String, LisError> {
        Ok(self.client.snapshot().to_json()?)
    }

    // =========================================================================
    // Patient Operations
    // =========================================================================

    pub fn list_patients(&self) -> Vec<Patient> {
        self.client.patients()
    }

    pub fn search_patients(&self, term: String) -> Vec<Patient> {
        self.client.search_patients(&term)
    }

    /// Validate, then register in the background.
    pub fn add_patient(&self, draft: NewPatient) -> Result<(), LisError> {
        self.client.validate_new_patient(&draft)?;
        self.client.add_patient(draft);
        Ok(())
    }

    pub fn update_patient(&self, patient: Patient) -> Result<(), LisError> {
        validation::check_patient_fields(&patient.id, &patient.name, &patient.last_name)?;
        self.client.update_patient(patient);
        Ok(())
    }

    pub fn delete_patient(&self, id: String) {
        self.client.delete_patient(id);
    }

    // =========================================================================
    // Lab Technician Operations
    // =========================================================================

    pub fn list_technicians(&self) -> Vec<LabTechnician> {
        self.client.technicians()
    }

    pub fn search_technicians(&self, term: String) -> Vec<LabTechnician> {
        self.client.search_technicians(&term)
    }

    pub fn add_technician(&self, technician: LabTechnician) -> Result<(), LisError> {
        self.client.validate_new_technician(&technician)?;
        self.client.add_technician(technician);
        Ok(())
    }

    pub fn update_technician(&self, technician: LabTechnician) -> Result<(), LisError> {
        validation::check_technician_fields(&technician)?;
        self.client.update_technician(technician);
        Ok(())
    }

    pub fn delete_technician(&self, id: String) {
        self.client.delete_technician(id);
    }

    // =========================================================================
    // Result Operations
    // =========================================================================

    pub fn list_results(&self) -> Vec<LipidProfile> {
        self.client.results()
    }

    pub fn results_for_patient(&self, entry_code: String) -> Vec<LipidProfile> {
        self.client.results_for_patient(&entry_code)
    }

    /// Blocking consult: remote results for a patient, local ones if unavailable.
    ///
    /// Must not be called from inside the core's runtime; listener callbacks
    /// are safe.
    pub fn consult_results(&self, entry_code: String) -> Vec<LipidProfile> {
        self.runtime
            .block_on(self.client.consult_results(&entry_code))
    }

    pub fn add_result(&self, draft: NewLipidProfile) -> Result<(), LisError> {
        self.client.validate_result(&draft)?;
        self.client.add_result(draft);
        Ok(())
    }

    pub fn update_result(&self, profile: LipidProfile) -> Result<(), LisError> {
        if profile.id.trim().is_empty() {
            return Err(LisError::InvalidInput("result id is empty".into()));
        }
        self.client.update_result(profile);
        Ok(())
    }

    pub fn delete_result(&self, id: String) {
        self.client.delete_result(id);
    }
}
