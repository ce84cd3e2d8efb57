//! # Account Flows
//!
//! Everything that creates, edits, or ends a session. The API client only
//! ever clears the session (on `401`); setting it is done here.
//!
//! ## Registration
//!
//! Registration is open only while no account exists. If the existence check
//! itself fails, registration is treated as closed: a backend error must not
//! let anyone create an account.

use areg_client::ApiClient;
use areg_core::Session;
use areg_session::DEFAULT_DISPLAY_NAME;

use crate::error::AccountError;

/// Login, logout, registration, password reset and business name.
#[derive(Debug, Clone)]
pub struct AccountFlow {
    client: ApiClient,
}

impl AccountFlow {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// The current session, if any.
    pub fn session(&self) -> Option<Session> {
        self.client.session_store().get()
    }

    /// Log in and store the session. A non-empty business name also becomes
    /// the remembered display label.
    ///
    /// Fails with [`AccountError::Store`] when the session cannot be saved;
    /// the store then still holds whatever it held before.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AccountError> {
        let session = self.client.auth().login(email, password).await?;
        let store = self.client.session_store();
        store.set(session.clone())?;
        if !session.business_name.is_empty() {
            if let Err(e) = store.set_display_name(&session.business_name) {
                tracing::warn!(error = %e, "could not remember business name");
            }
        }
        tracing::info!(username = %session.username, "logged in");
        Ok(session)
    }

    /// Forget the session. No request is made.
    pub fn logout(&self) -> Result<(), AccountError> {
        self.client.session_store().clear()?;
        tracing::info!("logged out");
        Ok(())
    }

    /// Whether a new account may be registered.
    pub async fn registration_open(&self) -> bool {
        match self.client.auth().user_exists().await {
            Ok(exists) => !exists,
            Err(e) => {
                tracing::warn!(error = %e, "user-exists check failed; treating registration as closed");
                false
            }
        }
    }

    /// Create the first account. Refused locally once registration is closed.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), AccountError> {
        if !self.registration_open().await {
            return Err(AccountError::RegistrationClosed);
        }
        self.client.auth().register(username, email, password).await?;
        tracing::info!(username, "account registered");
        Ok(())
    }

    /// Request a password reset email. Returns the server's message.
    pub async fn forgot_password(&self, email: &str) -> Result<String, AccountError> {
        Ok(self.client.auth().forgot_password(email).await?)
    }

    pub async fn reset_password(&self, token: &str, password: &str) -> Result<(), AccountError> {
        self.client.auth().reset_password(token, password).await?;
        tracing::info!("password reset");
        Ok(())
    }

    /// Rename the business. The name is trimmed; an empty name is refused
    /// without contacting the server. Returns the stored name.
    pub async fn rename_business(&self, name: &str) -> Result<String, AccountError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AccountError::EmptyBusinessName);
        }
        self.client.auth().update_business_name(name).await?;

        self.client.session_store().rename_business(name)?;
        tracing::info!(business_name = name, "business name updated");
        Ok(name.to_string())
    }

    /// Label for the business: the session's name, else the remembered
    /// label, else the default.
    pub fn display_name(&self) -> String {
        let store = self.client.session_store();
        store
            .get()
            .map(|s| s.business_name.clone())
            .filter(|n| !n.is_empty())
            .or_else(|| store.display_name().filter(|n| !n.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string())
    }
}
