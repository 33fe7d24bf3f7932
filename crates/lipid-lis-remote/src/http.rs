//! HTTP implementation of [`RecordApi`] over the REST backend.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::{RecordApi, RemoteOutcome};
use crate::records::{
    PatientPayload, RemotePatient, RemoteResult, RemoteSpecialist, ResultPayload,
    SpecialistPayload,
};

const PATIENTS: &str = "patients";
const SPECIALISTS: &str = "specialists";
const RESULTS: &str = "results";

/// REST client for the record API.
///
/// Resources live at `{base}/{resource}/` and `{base}/{resource}/{id}/`.
#[derive(Debug, Clone)]
pub struct HttpRecordApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRecordApi {
    /// Create a client for the given base URL (e.g. `http://localhost:8000/api`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing `reqwest::Client`.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, resource: &str) -> String {
        format!("{}/{}/", self.base_url, resource)
    }

    fn item_url(&self, resource: &str, key: i64) -> String {
        format!("{}/{}/{}/", self.base_url, resource, key)
    }

    /// Send `request` and decode the JSON body of a 2xx response.
    async fn get_json<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> RemoteOutcome<T> {
        let body = request.send().await?.error_for_status()?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn list<T: DeserializeOwned>(&self, resource: &str) -> RemoteOutcome<T> {
        let url = self.collection_url(resource);
        tracing::debug!(%url, "GET");
        self.get_json(self.client.get(url)).await
    }

    async fn send_json<B, T>(&self, request: reqwest::RequestBuilder, body: &B) -> RemoteOutcome<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.get_json(request.json(body)).await
    }

    async fn post<B, T>(&self, resource: &str, body: &B) -> RemoteOutcome<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.collection_url(resource);
        tracing::debug!(%url, "POST");
        self.send_json(self.client.post(url), body).await
    }

    async fn put<B, T>(&self, resource: &str, key: i64, body: &B) -> RemoteOutcome<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.item_url(resource, key);
        tracing::debug!(%url, "PUT");
        self.send_json(self.client.put(url), body).await
    }

    async fn delete(&self, resource: &str, key: i64) -> RemoteOutcome<()> {
        let url = self.item_url(resource, key);
        tracing::debug!(%url, "DELETE");
        self.client.delete(url).send().await?.error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl RecordApi for HttpRecordApi {
    async fn list_patients(&self) -> RemoteOutcome<Vec<RemotePatient>> {
        self.list(PATIENTS).await
    }

    async fn create_patient(&self, payload: &PatientPayload) -> RemoteOutcome<RemotePatient> {
        self.post(PATIENTS, payload).await
    }

    async fn update_patient(
        &self,
        key: i64,
        payload: &PatientPayload,
    ) -> RemoteOutcome<RemotePatient> {
        self.put(PATIENTS, key, payload).await
    }

    async fn delete_patient(&self, key: i64) -> RemoteOutcome<()> {
        self.delete(PATIENTS, key).await
    }

    async fn list_specialists(&self) -> RemoteOutcome<Vec<RemoteSpecialist>> {
        self.list(SPECIALISTS).await
    }

    async fn create_specialist(
        &self,
        payload: &SpecialistPayload,
    ) -> RemoteOutcome<RemoteSpecialist> {
        self.post(SPECIALISTS, payload).await
    }

    async fn update_specialist(
        &self,
        key: i64,
        payload: &SpecialistPayload,
    ) -> RemoteOutcome<RemoteSpecialist> {
        self.put(SPECIALISTS, key, payload).await
    }

    async fn delete_specialist(&self, key: i64) -> RemoteOutcome<()> {
        self.delete(SPECIALISTS, key).await
    }

    async fn list_results(&self) -> RemoteOutcome<Vec<RemoteResult>> {
        self.list(RESULTS).await
    }

    async fn list_results_by_admission_code(
        &self,
        admission_code: &str,
    ) -> RemoteOutcome<Vec<RemoteResult>> {
        let url = self.collection_url(RESULTS);
        tracing::debug!(%url, admission_code, "GET");
        self.get_json(
            self.client
                .get(url)
                .query(&[("admission_code", admission_code)]),
        )
        .await
    }

    async fn create_result(&self, payload: &ResultPayload) -> RemoteOutcome<RemoteResult> {
        self.post(RESULTS, payload).await
    }

    async fn update_result(
        &self,
        key: i64,
        payload: &ResultPayload,
    ) -> RemoteOutcome<RemoteResult> {
        self.put(RESULTS, key, payload).await
    }

    async fn delete_result(&self, key: i64) -> RemoteOutcome<()> {
        self.delete(RESULTS, key).await
    }
}
