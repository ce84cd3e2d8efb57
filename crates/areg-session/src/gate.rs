//! # Route Guard
//!
//! A stateless check run on every navigation to a protected view:
//! allow iff the session store holds a non-empty token. Token validity is
//! not considered; the server enforces that, and a `401` clears the store so
//! the very next evaluation redirects.
//!
//! ```text
//! Unauthenticated ──login──▶ Authenticated
//!        ▲                        │
//!        └──── logout / 401 ──────┘
//! ```

use std::sync::Arc;

use areg_core::Route;

use crate::store::SessionStore;

/// Whether a session is currently established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthState {
    /// No session, or a session with an empty token.
    Unauthenticated,
    /// A session with a non-empty token.
    Authenticated,
}

impl AuthState {
    /// Read the state from `store`.
    pub fn of(store: &dyn SessionStore) -> Self {
        if store.has_token() {
            Self::Authenticated
        } else {
            Self::Unauthenticated
        }
    }
}

impl std::fmt::Display for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthenticated => f.write_str("UNAUTHENTICATED"),
            Self::Authenticated => f.write_str("AUTHENTICATED"),
        }
    }
}

/// Outcome of guarding a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Render the requested view.
    Render(Route),
    /// Do not render (or fetch data for) the requested view; go here instead.
    Redirect(Route),
}

impl GateDecision {
    /// Whether the requested view may render.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Render(_))
    }
}

/// Guard for protected views. Holds no state of its own.
#[derive(Clone)]
pub struct AuthGate {
    store: Arc<dyn SessionStore>,
}

impl AuthGate {
    /// Guard backed by `store`.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Current authentication state, read fresh from the store.
    pub fn state(&self) -> AuthState {
        AuthState::of(self.store.as_ref())
    }

    /// Decide whether `route` may render. Public views always render.
    pub fn evaluate(&self, route: Route) -> GateDecision {
        if !route.is_protected() || self.state() == AuthState::Authenticated {
            return GateDecision::Render(route);
        }
        tracing::debug!(requested = %route, "no session; redirecting to login");
        GateDecision::Redirect(Route::Login)
    }
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate").field("state", &self.state()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySessionStore;
    use areg_core::{RecordId, Session};

    fn gate_with(store: Arc<MemorySessionStore>) -> AuthGate {
        AuthGate::new(store)
    }

    #[test]
    fn denies_protected_view_without_session() {
        let gate = gate_with(Arc::new(MemorySessionStore::new()));
        assert_eq!(gate.evaluate(Route::Dashboard), GateDecision::Redirect(Route::Login));
        assert_eq!(
            gate.evaluate(Route::RecordDetail { id: RecordId::new("r1") }),
            GateDecision::Redirect(Route::Login)
        );
        assert_eq!(gate.state(), AuthState::Unauthenticated);
    }

    #[test]
    fn allows_any_non_empty_token() {
        let store = Arc::new(MemorySessionStore::with_session(Session::new(
            "definitely-expired", "u", "e", "",
        )));
        let gate = gate_with(store);
        assert!(gate.evaluate(Route::Dashboard).is_allowed());
        assert_eq!(gate.state(), AuthState::Authenticated);
    }

    #[test]
    fn empty_token_is_denied() {
        let store = Arc::new(MemorySessionStore::with_session(Session::new("", "u", "e", "")));
        let gate = gate_with(store);
        assert!(!gate.evaluate(Route::NewRecord).is_allowed());
    }

    #[test]
    fn public_views_always_render() {
        let gate = gate_with(Arc::new(MemorySessionStore::new()));
        assert!(gate.evaluate(Route::Login).is_allowed());
        assert!(gate.evaluate(Route::ResetPassword { token: "t".into() }).is_allowed());
    }

    #[test]
    fn re_evaluates_after_session_cleared() {
        let store = Arc::new(MemorySessionStore::with_session(Session::new("abc", "u", "e", "")));
        let gate = gate_with(store.clone());
        assert!(gate.evaluate(Route::Dashboard).is_allowed());
        store.clear().unwrap();
        assert!(!gate.evaluate(Route::Dashboard).is_allowed());
    }
}
