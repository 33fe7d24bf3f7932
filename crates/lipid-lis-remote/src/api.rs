//! Transport contract consumed by the sync layer.

use async_trait::async_trait;
use thiserror::Error;

use crate::records::{
    PatientPayload, RemotePatient, RemoteResult, RemoteSpecialist, ResultPayload,
    SpecialistPayload,
};

/// The single remote failure kind.
///
/// Covers connection failures, non-2xx responses and malformed bodies alike;
/// callers never need to tell them apart.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("remote unavailable: {reason}")]
pub struct RemoteUnavailable {
    pub reason: String,
}

impl RemoteUnavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for RemoteUnavailable {
    fn from(e: serde_json::Error) -> Self {
        RemoteUnavailable::new(format!("malformed response: {}", e))
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for RemoteUnavailable {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => RemoteUnavailable::new(format!("HTTP {}", status)),
            None => RemoteUnavailable::new(e.to_string()),
        }
    }
}

/// Outcome of every remote call: the value, or the reason it is unavailable.
pub type RemoteOutcome<T> = Result<T, RemoteUnavailable>;

/// Remote resource operations, one group per entity kind.
///
/// Keys are the server's numeric surrogate keys.
#[async_trait]
pub trait RecordApi: Send + Sync {
    // Patients
    async fn list_patients(&self) -> RemoteOutcome<Vec<RemotePatient>>;
    async fn create_patient(&self, payload: &PatientPayload) -> RemoteOutcome<RemotePatient>;
    async fn update_patient(
        &self,
        key: i64,
        payload: &PatientPayload,
    ) -> RemoteOutcome<RemotePatient>;
    async fn delete_patient(&self, key: i64) -> RemoteOutcome<()>;

    // Specialists
    async fn list_specialists(&self) -> RemoteOutcome<Vec<RemoteSpecialist>>;
    async fn create_specialist(
        &self,
        payload: &SpecialistPayload,
    ) -> RemoteOutcome<RemoteSpecialist>;
    async fn update_specialist(
        &self,
        key: i64,
        payload: &SpecialistPayload,
    ) -> RemoteOutcome<RemoteSpecialist>;
    async fn delete_specialist(&self, key: i64) -> RemoteOutcome<()>;

    // Results
    async fn list_results(&self) -> RemoteOutcome<Vec<RemoteResult>>;
    async fn list_results_by_admission_code(
        &self,
        admission_code: &str,
    ) -> RemoteOutcome<Vec<RemoteResult>>;
    async fn create_result(&self, payload: &ResultPayload) -> RemoteOutcome<RemoteResult>;
    async fn update_result(&self, key: i64, payload: &ResultPayload)
        -> RemoteOutcome<RemoteResult>;
    async fn delete_result(&self, key: i64) -> RemoteOutcome<()>;
}
