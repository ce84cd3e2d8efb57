//! # areg-cli — Command-Line Front End for the Acquisition Register
//!
//! Provides the `areg` command. The terminal plays the part of the view
//! layer: every protected command is checked by the [`AuthGate`] before a
//! request is made, and a session rejected by the server is reported with a
//! hint to log in again.
//!
//! ## Subcommands
//!
//! - `areg login | logout | whoami | register | forgot-password | reset-password | business-name`
//! - `areg list | show | new | edit | delete | delete-all`
//!
//! ```bash
//! areg login --email thandi@example.com
//! areg list --search dlamini --sort desc
//! areg new --full-names "Sipho Dlamini" --identity-number 7702025009081 \
//!     --verification-method Passport --phone 0821234567
//! ```

pub mod account;
pub mod prompt;
pub mod records;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context as _, Result};

use areg_client::{config::parse_base_url, ApiClient, ClientConfig};
use areg_core::Route;
use areg_session::{AuthGate, FileSessionStore, GateDecision, Navigator, SessionStore};

/// Location of the session file when `--state-file` is not given.
pub fn default_state_file() -> Result<PathBuf> {
    let base = dirs::config_dir().context("cannot determine the user configuration directory")?;
    Ok(base.join("areg").join("session.json"))
}

/// Tells the user to log in again when the server rejects the session.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoginHint;

impl Navigator for LoginHint {
    fn redirect(&self, route: Route) {
        if route == Route::Login {
            eprintln!("Your session has expired. Run `areg login` to sign in again.");
        } else {
            tracing::debug!(%route, "ignoring redirect");
        }
    }
}

/// Everything a subcommand needs: the API client and the guard.
#[derive(Debug, Clone)]
pub struct Context {
    pub client: ApiClient,
    pub gate: AuthGate,
}

impl Context {
    /// Open the session file and build a client for the configured backend.
    ///
    /// `api_url` overrides `AREG_API_URL`.
    pub fn open(api_url: Option<&str>, state_file: &Path) -> Result<Self> {
        let store = FileSessionStore::open(state_file)
            .with_context(|| format!("failed to open session file {}", state_file.display()))?;
        let mut config = ClientConfig::from_env()?;
        if let Some(raw) = api_url {
            config.api_base_url = parse_base_url(raw)
                .map_err(|e| anyhow::anyhow!("invalid --api-url {raw}: {e}"))?;
        }
        tracing::debug!(api = %config.api_base_url, state_file = %state_file.display(), "starting");
        Self::with_store(config, Arc::new(store))
    }

    /// Build a context around an existing store.
    pub fn with_store(config: ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
        let client = ApiClient::new(config, store.clone(), Arc::new(LoginHint))?;
        Ok(Self {
            client,
            gate: AuthGate::new(store),
        })
    }

    /// Fail unless `route` may be shown with the current session.
    pub fn require(&self, route: Route) -> Result<()> {
        match self.gate.evaluate(route) {
            GateDecision::Render(_) => Ok(()),
            GateDecision::Redirect(_) => bail!("not logged in; run `areg login` first"),
        }
    }
}
