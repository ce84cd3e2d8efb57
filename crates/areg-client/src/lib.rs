//! # areg-client -- Typed Rust client for the acquisition register API
//!
//! Provides typed access to the register backend:
//! - **Records** via `/records` (list, get, create, replace, delete, delete all, next code)
//! - **Auth** via `/auth` (login, register, user-exists, forgot/reset password, business name)
//!
//! ## Architecture
//!
//! Every request goes through one internal transport. It attaches the bearer
//! token from the [`SessionStore`] and, when the server answers `401`, clears
//! the store and asks the [`Navigator`] for the login view before returning
//! the error. The client reads the session but never creates or edits it;
//! that belongs to the login and account flows.
//!
//! No retries and no request deduplication happen at this layer. `GET`, `PUT`
//! and `DELETE` are idempotent by HTTP convention; `POST` is not.

pub mod auth;
pub mod config;
pub mod error;
pub mod records;
mod transport;

pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, ErrorKind};

use std::sync::Arc;
use std::time::Duration;

use areg_session::{Navigator, SessionStore};

/// Top-level API client. Cheap to clone; clones share the connection pool
/// and the session store.
#[derive(Debug, Clone)]
pub struct ApiClient {
    transport: transport::Transport,
    records: records::RecordsClient,
    auth: auth::AuthClient,
}

impl ApiClient {
    /// Create a client from configuration, the session store it reads
    /// tokens from, and the navigator it notifies on `401`.
    pub fn new(
        config: ClientConfig,
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        let transport =
            transport::Transport::new(http, config.api_base_url, session, navigator);

        Ok(Self {
            records: records::RecordsClient::new(transport.clone()),
            auth: auth::AuthClient::new(transport.clone()),
            transport,
        })
    }

    /// Access the records client.
    pub fn records(&self) -> &records::RecordsClient {
        &self.records
    }

    /// Access the authentication client.
    pub fn auth(&self) -> &auth::AuthClient {
        &self.auth
    }

    /// The session store this client reads tokens from.
    pub fn session_store(&self) -> &Arc<dyn SessionStore> {
        self.transport.session()
    }

    /// The configured API base URL.
    pub fn base_url(&self) -> &url::Url {
        self.transport.base_url()
    }
}
