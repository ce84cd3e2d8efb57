//! The single chokepoint every request passes through.
//!
//! Before send: attach `Authorization: Bearer <token>` to authenticated
//! calls when the session store holds a token.
//!
//! After receive: a `401` from any endpoint clears the session, tells the
//! navigator to show the login view, and is still returned to the caller as
//! [`ApiError::Unauthorized`]. Every other failure is returned unchanged.
//! Nothing is retried or deduplicated here.

use std::sync::Arc;

use areg_core::Route;
use areg_session::{Navigator, SessionStore};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ConfigError;
use crate::error::{error_message, ApiError};

/// Whether a call carries the session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Auth {
    Bearer,
    Public,
}

#[derive(Clone)]
pub(crate) struct Transport {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl Transport {
    pub(crate) fn new(
        http: reqwest::Client,
        base_url: Url,
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            http,
            base_url,
            session,
            navigator,
        }
    }

    pub(crate) fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    pub(crate) fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append percent-encoded path segments to the base URL.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ConfigError::InvalidUrl(
                    "api_base_url".to_string(),
                    format!("{} cannot be used as a base URL", self.base_url),
                )
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn request(&self, method: Method, url: Url, auth: Auth) -> RequestBuilder {
        let req = self.http.request(method, url);
        if auth == Auth::Public {
            return req;
        }
        match self.session.get() {
            Some(session) if session.has_token() => req.bearer_auth(&session.token),
            _ => req,
        }
    }

    pub(crate) async fn send(
        &self,
        endpoint: &str,
        req: RequestBuilder,
    ) -> Result<Response, ApiError> {
        tracing::debug!(endpoint, "calling register API");
        let resp = req.send().await.map_err(|e| ApiError::Http {
            endpoint: endpoint.into(),
            source: e,
        })?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            self.session_rejected(endpoint);
            return Err(ApiError::Unauthorized {
                endpoint: endpoint.into(),
            });
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                endpoint: endpoint.into(),
            });
        }
        if !status.is_success() {
            let body = error_body(endpoint, resp.text().await);
            return Err(ApiError::Api {
                endpoint: endpoint.into(),
                status: status.as_u16(),
                message: error_message(&body),
                body,
            });
        }
        Ok(resp)
    }

    pub(crate) async fn json<T: DeserializeOwned>(
        endpoint: &str,
        resp: Response,
    ) -> Result<T, ApiError> {
        resp.json().await.map_err(|e| ApiError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })
    }

    /// Clear-then-redirect. Runs synchronously, so no other task observes a
    /// half-finished transition.
    fn session_rejected(&self, endpoint: &str) {
        tracing::warn!(endpoint, "server rejected the session token; clearing session");
        if let Err(e) = self.session.clear() {
            tracing::error!(error = %e, "session cleared in memory but removal was not persisted");
        }
        self.navigator.redirect(Route::Login);
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("host", &self.base_url.host_str())
            .field("authenticated", &self.session.has_token())
            .finish()
    }
}

/// Body of a failed response, or empty when it could not be read.
fn error_body(endpoint: &str, body: reqwest::Result<String>) -> String {
    match body {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!(endpoint, error = %e, "could not read error response body");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use areg_session::{MemorySessionStore, NoopNavigator};

    fn transport(base: &str) -> Transport {
        Transport::new(
            reqwest::Client::new(),
            Url::parse(base).unwrap(),
            Arc::new(MemorySessionStore::new()),
            Arc::new(NoopNavigator),
        )
    }

    #[test]
    fn joins_paths_with_or_without_trailing_slash() {
        for base in ["http://h/api", "http://h/api/"] {
            let url = transport(base).url(&["records", "next-code"]).unwrap();
            assert_eq!(url.as_str(), "http://h/api/records/next-code");
        }
        let url = transport("http://h").url(&["records"]).unwrap();
        assert_eq!(url.as_str(), "http://h/records");
    }

    #[test]
    fn encodes_segments() {
        let url = transport("http://h/api")
            .url(&["auth", "reset-password", "a/b c"])
            .unwrap();
        assert_eq!(url.as_str(), "http://h/api/auth/reset-password/a%2Fb%20c");
    }

    #[test]
    fn unreadable_error_body_reads_as_empty() {
        let err = reqwest::Client::new().get("not a url").build().unwrap_err();
        assert_eq!(error_body("GET /records", Err(err)), "");
        assert_eq!(error_body("GET /records", Ok("oops".into())), "oops");
    }
}
