//! Typed client for the `/records` resource.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/records` | List every record |
//! | GET    | `/records/{id}` | Get one record |
//! | POST   | `/records` | Create from a draft |
//! | PUT    | `/records/{id}` | Replace from a draft |
//! | DELETE | `/records/{id}` | Delete one record |
//! | DELETE | `/records` | Delete every record |
//! | GET    | `/records/next-code` | Next sequential register code |
//!
//! All calls carry the session token.

use areg_core::{Record, RecordCode, RecordDraft, RecordId};
use reqwest::Method;
use serde::Deserialize;

use crate::error::ApiError;
use crate::transport::{Auth, Transport};

#[derive(Debug, Deserialize)]
struct NextCodeResponse {
    code: RecordCode,
}

/// Client for the records resource.
#[derive(Debug, Clone)]
pub struct RecordsClient {
    transport: Transport,
}

impl RecordsClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Fetch the full record set.
    ///
    /// Calls `GET {base_url}/records`.
    pub async fn list(&self) -> Result<Vec<Record>, ApiError> {
        let endpoint = "GET /records";
        let url = self.transport.url(&["records"])?;
        let req = self.transport.request(Method::GET, url, Auth::Bearer);
        let resp = self.transport.send(endpoint, req).await?;
        Transport::json(endpoint, resp).await
    }

    /// Fetch one record. A missing record is [`ApiError::NotFound`].
    ///
    /// Calls `GET {base_url}/records/{id}`.
    pub async fn get(&self, id: &RecordId) -> Result<Record, ApiError> {
        let endpoint = format!("GET /records/{id}");
        let url = self.transport.url(&["records", id.as_str()])?;
        let req = self.transport.request(Method::GET, url, Auth::Bearer);
        let resp = self.transport.send(&endpoint, req).await?;
        Transport::json(&endpoint, resp).await
    }

    /// Create a record. Not idempotent: each call creates a new record.
    ///
    /// Calls `POST {base_url}/records`.
    pub async fn create(&self, draft: &RecordDraft) -> Result<Record, ApiError> {
        let endpoint = "POST /records";
        let url = self.transport.url(&["records"])?;
        let req = self
            .transport
            .request(Method::POST, url, Auth::Bearer)
            .json(draft);
        let resp = self.transport.send(endpoint, req).await?;
        Transport::json(endpoint, resp).await
    }

    /// Replace a record with the contents of `draft`.
    ///
    /// Calls `PUT {base_url}/records/{id}`.
    pub async fn update(&self, id: &RecordId, draft: &RecordDraft) -> Result<Record, ApiError> {
        let endpoint = format!("PUT /records/{id}");
        let url = self.transport.url(&["records", id.as_str()])?;
        let req = self
            .transport
            .request(Method::PUT, url, Auth::Bearer)
            .json(draft);
        let resp = self.transport.send(&endpoint, req).await?;
        Transport::json(&endpoint, resp).await
    }

    /// Delete one record.
    ///
    /// Calls `DELETE {base_url}/records/{id}`.
    pub async fn delete(&self, id: &RecordId) -> Result<(), ApiError> {
        let endpoint = format!("DELETE /records/{id}");
        let url = self.transport.url(&["records", id.as_str()])?;
        let req = self.transport.request(Method::DELETE, url, Auth::Bearer);
        self.transport.send(&endpoint, req).await?;
        Ok(())
    }

    /// Delete every record.
    ///
    /// Calls `DELETE {base_url}/records`.
    pub async fn delete_all(&self) -> Result<(), ApiError> {
        let endpoint = "DELETE /records";
        let url = self.transport.url(&["records"])?;
        let req = self.transport.request(Method::DELETE, url, Auth::Bearer);
        self.transport.send(endpoint, req).await?;
        Ok(())
    }

    /// Fetch the code the next created record will receive.
    ///
    /// Calls `GET {base_url}/records/next-code`, which returns `{"code": ...}`.
    pub async fn next_code(&self) -> Result<RecordCode, ApiError> {
        let endpoint = "GET /records/next-code";
        let url = self.transport.url(&["records", "next-code"])?;
        let req = self.transport.request(Method::GET, url, Auth::Bearer);
        let resp = self.transport.send(endpoint, req).await?;
        let body: NextCodeResponse = Transport::json(endpoint, resp).await?;
        Ok(body.code)
    }
}
