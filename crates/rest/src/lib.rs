//! Data-access port adapter for the hosted database's REST dialect.
//!
//! The hosted service exposes each collection as `/{table}` with PostgREST
//! conventions: `GET /{table}` lists, `POST /{table}` inserts, and
//! `PATCH`/`DELETE /{table}?id=eq.{id}` address one row. Mutations request
//! `Prefer: return=representation` so the server's row (id, timestamps,
//! server-side defaults) comes back in the response; an empty representation
//! on update/delete means the id no longer exists.
//!
//! The adapter maps transport and server failures onto the same
//! [`CoreError`] taxonomy the controllers consume; no query semantics leak
//! past this boundary.

pub mod config;

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};

use bureau_controller::port::{DataAccessPort, ListFilter};
use bureau_core::types::RecordId;
use bureau_core::CoreError;
use bureau_entities::kind::EntityKind;

pub use config::RestConfig;

/// One hosted collection reached over REST.
pub struct RestPort<E: EntityKind> {
    client: Client,
    base_url: String,
    _marker: PhantomData<fn() -> E>,
}

impl<E: EntityKind> RestPort<E> {
    /// Build a port for `E::TABLE` from the given configuration.
    pub fn new(config: &RestConfig) -> Result<Self, CoreError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(key)
                .map_err(|_| CoreError::Operation("API key is not a valid header value".into()))?;
            headers.insert("apikey", value.clone());
            let bearer = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|_| CoreError::Operation("API key is not a valid header value".into()))?;
            headers.insert(AUTHORIZATION, bearer);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| CoreError::Operation(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            _marker: PhantomData,
        })
    }

    fn table_url(&self) -> String {
        format!("{}/{}", self.base_url, E::TABLE)
    }

    fn row_url(&self, id: RecordId) -> String {
        format!("{}/{}?id=eq.{id}", self.base_url, E::TABLE)
    }
}

/// Map a non-success response onto the error taxonomy.
async fn error_for(entity: &'static str, id: Option<RecordId>, response: Response) -> CoreError {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        if let Some(id) = id {
            return CoreError::NotFound { entity, id };
        }
    }
    let body = response.text().await.unwrap_or_default();
    let summary: String = body.chars().take(200).collect();
    CoreError::Operation(format!("{entity}: HTTP {status}: {summary}"))
}

fn transport_error(err: reqwest::Error) -> CoreError {
    CoreError::Operation(err.to_string())
}

#[async_trait]
impl<E: EntityKind> DataAccessPort<E> for RestPort<E> {
    async fn list(&self, filter: &ListFilter) -> Result<Vec<E>, CoreError> {
        let mut request = self.client.get(self.table_url());
        if let Some(status) = &filter.status {
            request = request.query(&[("status", format!("eq.{status}"))]);
        }
        request = request.query(&[("order", "created_at.desc")]);

        tracing::debug!(table = E::TABLE, "listing collection");
        let response = request.send().await.map_err(transport_error)?;
        if !response.status().is_success() {
            return Err(error_for(E::NAME, None, response).await);
        }
        response.json::<Vec<E>>().await.map_err(transport_error)
    }

    async fn create(&self, input: E::Create) -> Result<E, CoreError> {
        tracing::debug!(table = E::TABLE, "inserting row");
        let response = self
            .client
            .post(self.table_url())
            .header("Prefer", "return=representation")
            .json(&input)
            .send()
            .await
            .map_err(transport_error)?;
        if !response.status().is_success() {
            return Err(error_for(E::NAME, None, response).await);
        }
        let mut rows: Vec<E> = response.json().await.map_err(transport_error)?;
        rows.pop()
            .ok_or_else(|| CoreError::Operation(format!("{}: insert returned no row", E::NAME)))
    }

    async fn update(&self, id: RecordId, patch: E::Update) -> Result<E, CoreError> {
        tracing::debug!(table = E::TABLE, %id, "patching row");
        let response = self
            .client
            .patch(self.row_url(id))
            .header("Prefer", "return=representation")
            .json(&patch)
            .send()
            .await
            .map_err(transport_error)?;
        if !response.status().is_success() {
            return Err(error_for(E::NAME, Some(id), response).await);
        }
        let mut rows: Vec<E> = response.json().await.map_err(transport_error)?;
        // An empty representation means the id matched nothing.
        rows.pop().ok_or(CoreError::NotFound { entity: E::NAME, id })
    }

    async fn delete(&self, id: RecordId) -> Result<(), CoreError> {
        tracing::debug!(table = E::TABLE, %id, "deleting row");
        let response = self
            .client
            .delete(self.row_url(id))
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(transport_error)?;
        if !response.status().is_success() {
            return Err(error_for(E::NAME, Some(id), response).await);
        }
        let rows: Vec<serde_json::Value> = response.json().await.map_err(transport_error)?;
        if rows.is_empty() {
            return Err(CoreError::NotFound { entity: E::NAME, id });
        }
        Ok(())
    }
}
