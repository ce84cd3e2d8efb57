//! Typed client for the `/auth` resource.
//!
//! | Method | Path | Auth | Operation |
//! |--------|------|------|-----------|
//! | POST   | `/auth/login` | no | Exchange credentials for a session |
//! | POST   | `/auth/register` | no | Create an account |
//! | GET    | `/auth/exists` | no | Whether any account exists yet |
//! | POST   | `/auth/forgot-password` | no | Email a reset link |
//! | POST   | `/auth/reset-password/{token}` | no | Set a new password |
//! | PUT    | `/auth/business-name` | yes | Rename the business |
//!
//! A `401` from a public endpoint still clears the session: the rule is
//! applied uniformly at the transport.

use areg_core::Session;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::transport::{Auth, Transport};

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    token: String,
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    business_name: Option<String>,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct EmailRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct PasswordRequest<'a> {
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BusinessNameRequest<'a> {
    business_name: &'a str,
}

#[derive(Deserialize)]
struct ExistsResponse {
    exists: bool,
}

#[derive(Deserialize, Default)]
struct MessageResponse {
    #[serde(default)]
    message: String,
}

/// Client for authentication and account endpoints.
#[derive(Debug, Clone)]
pub struct AuthClient {
    transport: Transport,
}

impl AuthClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Exchange credentials for session fields. Storing the session is the
    /// caller's job.
    ///
    /// Calls `POST {base_url}/auth/login`. A missing `businessName` becomes
    /// the empty string.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let endpoint = "POST /auth/login";
        let url = self.transport.url(&["auth", "login"])?;
        let req = self
            .transport
            .request(Method::POST, url, Auth::Public)
            .json(&LoginRequest { email, password });
        let resp = self.transport.send(endpoint, req).await?;
        let body: LoginResponse = Transport::json(endpoint, resp).await?;
        Ok(Session::new(
            body.token,
            body.username,
            body.email,
            body.business_name.unwrap_or_default(),
        ))
    }

    /// Create an account.
    ///
    /// Calls `POST {base_url}/auth/register`.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        let endpoint = "POST /auth/register";
        let url = self.transport.url(&["auth", "register"])?;
        let req = self
            .transport
            .request(Method::POST, url, Auth::Public)
            .json(&RegisterRequest {
                username,
                email,
                password,
            });
        self.transport.send(endpoint, req).await?;
        Ok(())
    }

    /// Whether any user account exists.
    ///
    /// Calls `GET {base_url}/auth/exists`, which returns `{"exists": bool}`.
    pub async fn user_exists(&self) -> Result<bool, ApiError> {
        let endpoint = "GET /auth/exists";
        let url = self.transport.url(&["auth", "exists"])?;
        let req = self.transport.request(Method::GET, url, Auth::Public);
        let resp = self.transport.send(endpoint, req).await?;
        let body: ExistsResponse = Transport::json(endpoint, resp).await?;
        Ok(body.exists)
    }

    /// Ask the server to email a reset link. Returns the server's message
    /// (empty if it sent none).
    ///
    /// Calls `POST {base_url}/auth/forgot-password`.
    pub async fn forgot_password(&self, email: &str) -> Result<String, ApiError> {
        let endpoint = "POST /auth/forgot-password";
        let url = self.transport.url(&["auth", "forgot-password"])?;
        let req = self
            .transport
            .request(Method::POST, url, Auth::Public)
            .json(&EmailRequest { email });
        let resp = self.transport.send(endpoint, req).await?;
        let body = resp.text().await.map_err(|e| ApiError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })?;
        let parsed: MessageResponse = serde_json::from_str(&body).unwrap_or_default();
        Ok(parsed.message)
    }

    /// Set a new password using the token from a reset link.
    ///
    /// Calls `POST {base_url}/auth/reset-password/{token}`.
    pub async fn reset_password(&self, token: &str, password: &str) -> Result<(), ApiError> {
        let endpoint = "POST /auth/reset-password/{token}";
        let url = self.transport.url(&["auth", "reset-password", token])?;
        let req = self
            .transport
            .request(Method::POST, url, Auth::Public)
            .json(&PasswordRequest { password });
        self.transport.send(endpoint, req).await?;
        Ok(())
    }

    /// Rename the business on the server. Updating the stored session is the
    /// caller's job.
    ///
    /// Calls `PUT {base_url}/auth/business-name`.
    pub async fn update_business_name(&self, name: &str) -> Result<(), ApiError> {
        let endpoint = "PUT /auth/business-name";
        let url = self.transport.url(&["auth", "business-name"])?;
        let req = self
            .transport
            .request(Method::PUT, url, Auth::Bearer)
            .json(&BusinessNameRequest {
                business_name: name,
            });
        self.transport.send(endpoint, req).await?;
        Ok(())
    }
}
