//! In-memory fake of the record API for tests and offline demos.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::api::{RecordApi, RemoteOutcome, RemoteUnavailable};
use crate::records::{
    PatientDetails, PatientPayload, RemotePatient, RemoteResult, RemoteSpecialist,
    ResultPayload, SpecialistDetails, SpecialistPayload,
};

#[derive(Debug, Default)]
struct MockState {
    next_id: i64,
    patients: Vec<RemotePatient>,
    specialists: Vec<RemoteSpecialist>,
    results: Vec<RemoteResult>,
    calls: Vec<String>,
    title_override: Option<String>,
}

impl MockState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// Specialist as the server would echo it.
    fn specialist_response(&self, record: &RemoteSpecialist) -> RemoteSpecialist {
        let mut response = record.clone();
        if let Some(code) = &self.title_override {
            response.title = Some(code.clone());
        }
        response
    }

    fn result_read_shape(&self, id: i64, payload: &ResultPayload, created_at: String) -> RemoteResult {
        let admission_code = self
            .patients
            .iter()
            .find(|p| p.id == Some(payload.patient))
            .and_then(|p| p.admission_code.clone());
        let internal_code = self
            .specialists
            .iter()
            .find(|s| s.id == Some(payload.specialist))
            .and_then(|s| s.internal_code.clone());

        RemoteResult {
            id: Some(id),
            patient: Some(payload.patient),
            specialist: Some(payload.specialist),
            total_cholesterol: Some(payload.total_cholesterol),
            hdl_cholesterol: Some(payload.hdl_cholesterol),
            ldl_cholesterol: Some(payload.ldl_cholesterol),
            triglycerides: Some(payload.triglycerides),
            created_at: Some(created_at),
            patient_details: Some(PatientDetails { admission_code }),
            specialist_details: Some(SpecialistDetails { internal_code }),
        }
    }
}

/// Fake server with an offline switch and a call log.
///
/// Assigns sequential surrogate keys shared across all resources and an
/// admission code of the form `A00001` to every created patient.
#[derive(Debug, Default)]
pub struct MockRecordApi {
    state: Mutex<MockState>,
    offline: AtomicBool,
}

impl MockRecordApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock whose every call fails.
    pub fn offline() -> Self {
        let api = Self::default();
        api.set_offline(true);
        api
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Operations attempted so far, in order (e.g. `"create_patient"`).
    ///
    /// Calls made while offline are logged too.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Make every specialist response report this title code, as a server
    /// with a newer code table would.
    pub fn set_title_override(&self, code: Option<&str>) {
        self.lock().title_override = code.map(str::to_string);
    }

    /// Preload a patient record as if it already existed on the server.
    pub fn insert_patient(&self, mut record: RemotePatient) -> i64 {
        let mut state = self.lock();
        let id = record.id.unwrap_or_else(|| state.next_id());
        state.next_id = state.next_id.max(id);
        record.id = Some(id);
        state.patients.push(record);
        id
    }

    /// Preload a specialist record.
    pub fn insert_specialist(&self, mut record: RemoteSpecialist) -> i64 {
        let mut state = self.lock();
        let id = record.id.unwrap_or_else(|| state.next_id());
        state.next_id = state.next_id.max(id);
        record.id = Some(id);
        state.specialists.push(record);
        id
    }

    /// Preload a result record.
    pub fn insert_result(&self, mut record: RemoteResult) -> i64 {
        let mut state = self.lock();
        let id = record.id.unwrap_or_else(|| state.next_id());
        state.next_id = state.next_id.max(id);
        record.id = Some(id);
        state.results.push(record);
        id
    }

    pub fn patients(&self) -> Vec<RemotePatient> {
        self.lock().patients.clone()
    }

    pub fn specialists(&self) -> Vec<RemoteSpecialist> {
        self.lock().specialists.clone()
    }

    pub fn results(&self) -> Vec<RemoteResult> {
        self.lock().results.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Log the call, then fail if offline.
    fn begin(&self, op: &str) -> RemoteOutcome<MutexGuard<'_, MockState>> {
        let mut state = self.lock();
        state.calls.push(op.to_string());
        if self.offline.load(Ordering::SeqCst) {
            return Err(RemoteUnavailable::new(format!("{}: mock server offline", op)));
        }
        Ok(state)
    }
}

fn not_found(resource: &str, key: i64) -> RemoteUnavailable {
    RemoteUnavailable::new(format!("HTTP 404 Not Found: {} {}", resource, key))
}

#[async_trait]
impl RecordApi for MockRecordApi {
    async fn list_patients(&self) -> RemoteOutcome<Vec<RemotePatient>> {
        Ok(self.begin("list_patients")?.patients.clone())
    }

    async fn create_patient(&self, payload: &PatientPayload) -> RemoteOutcome<RemotePatient> {
        let mut state = self.begin("create_patient")?;
        let id = state.next_id();
        let record = RemotePatient {
            id: Some(id),
            document: Some(payload.document.clone()),
            first_name: Some(payload.first_name.clone()),
            last_name: Some(payload.last_name.clone()),
            address: Some(payload.address.clone()),
            phone: Some(payload.phone.clone()),
            admission_code: Some(format!("A{:05}", id)),
        };
        state.patients.push(record.clone());
        Ok(record)
    }

    async fn update_patient(
        &self,
        key: i64,
        payload: &PatientPayload,
    ) -> RemoteOutcome<RemotePatient> {
        let mut state = self.begin("update_patient")?;
        let record = state
            .patients
            .iter_mut()
            .find(|p| p.id == Some(key))
            .ok_or_else(|| not_found("patient", key))?;
        record.document = Some(payload.document.clone());
        record.first_name = Some(payload.first_name.clone());
        record.last_name = Some(payload.last_name.clone());
        record.address = Some(payload.address.clone());
        record.phone = Some(payload.phone.clone());
        Ok(record.clone())
    }

    async fn delete_patient(&self, key: i64) -> RemoteOutcome<()> {
        let mut state = self.begin("delete_patient")?;
        let before = state.patients.len();
        state.patients.retain(|p| p.id != Some(key));
        if state.patients.len() == before {
            return Err(not_found("patient", key));
        }
        Ok(())
    }

    async fn list_specialists(&self) -> RemoteOutcome<Vec<RemoteSpecialist>> {
        let state = self.begin("list_specialists")?;
        Ok(state
            .specialists
            .iter()
            .map(|s| state.specialist_response(s))
            .collect())
    }

    async fn create_specialist(
        &self,
        payload: &SpecialistPayload,
    ) -> RemoteOutcome<RemoteSpecialist> {
        let mut state = self.begin("create_specialist")?;
        let id = state.next_id();
        let record = RemoteSpecialist {
            id: Some(id),
            internal_code: Some(payload.internal_code.clone()),
            name: Some(payload.name.clone()),
            title: Some(payload.title.clone()),
            phone: Some(payload.phone.clone()),
        };
        let response = state.specialist_response(&record);
        state.specialists.push(record);
        Ok(response)
    }

    async fn update_specialist(
        &self,
        key: i64,
        payload: &SpecialistPayload,
    ) -> RemoteOutcome<RemoteSpecialist> {
        let mut state = self.begin("update_specialist")?;
        let record = state
            .specialists
            .iter_mut()
            .find(|s| s.id == Some(key))
            .ok_or_else(|| not_found("specialist", key))?;
        record.internal_code = Some(payload.internal_code.clone());
        record.name = Some(payload.name.clone());
        record.title = Some(payload.title.clone());
        record.phone = Some(payload.phone.clone());
        let record = record.clone();
        Ok(state.specialist_response(&record))
    }

    async fn delete_specialist(&self, key: i64) -> RemoteOutcome<()> {
        let mut state = self.begin("delete_specialist")?;
        let before = state.specialists.len();
        state.specialists.retain(|s| s.id != Some(key));
        if state.specialists.len() == before {
            return Err(not_found("specialist", key));
        }
        Ok(())
    }

    async fn list_results(&self) -> RemoteOutcome<Vec<RemoteResult>> {
        Ok(self.begin("list_results")?.results.clone())
    }

    async fn list_results_by_admission_code(
        &self,
        admission_code: &str,
    ) -> RemoteOutcome<Vec<RemoteResult>> {
        let state = self.begin("list_results_by_admission_code")?;
        Ok(state
            .results
            .iter()
            .filter(|r| {
                r.patient_details
                    .as_ref()
                    .and_then(|d| d.admission_code.as_deref())
                    == Some(admission_code)
            })
            .cloned()
            .collect())
    }

    async fn create_result(&self, payload: &ResultPayload) -> RemoteOutcome<RemoteResult> {
        let mut state = self.begin("create_result")?;
        let id = state.next_id();
        let record = state.result_read_shape(id, payload, chrono::Utc::now().to_rfc3339());
        state.results.push(record.clone());
        Ok(record)
    }

    async fn update_result(
        &self,
        key: i64,
        payload: &ResultPayload,
    ) -> RemoteOutcome<RemoteResult> {
        let mut state = self.begin("update_result")?;
        let index = state
            .results
            .iter()
            .position(|r| r.id == Some(key))
            .ok_or_else(|| not_found("result", key))?;
        let created_at = state.results[index]
            .created_at
            .clone()
            .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());
        let record = state.result_read_shape(key, payload, created_at);
        state.results[index] = record.clone();
        Ok(record)
    }

    async fn delete_result(&self, key: i64) -> RemoteOutcome<()> {
        let mut state = self.begin("delete_result")?;
        let before = state.results.len();
        state.results.retain(|r| r.id != Some(key));
        if state.results.len() == before {
            return Err(not_found("result", key));
        }
        Ok(())
    }
}
