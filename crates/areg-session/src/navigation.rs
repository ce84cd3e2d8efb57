//! # Navigation Collaborator
//!
//! The client never holds a reference to whatever renders views. When it needs
//! the user somewhere else (today: back to the login view after a `401`) it
//! tells a [`Navigator`], and the front end decides what that means.

use areg_core::Route;
use tokio::sync::mpsc;

/// Receiver of forced navigations.
pub trait Navigator: Send + Sync {
    /// Request that the front end show `route` instead of the current view.
    fn redirect(&self, route: Route);
}

/// Forwards redirects over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    tx: mpsc::UnboundedSender<Route>,
}

impl ChannelNavigator {
    /// Create a navigator and the receiving end the front end should drain.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Route>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Navigator for ChannelNavigator {
    fn redirect(&self, route: Route) {
        // A closed receiver means the front end is gone; nothing left to move.
        if self.tx.send(route).is_err() {
            tracing::debug!("navigation receiver dropped; redirect discarded");
        }
    }
}

/// Discards every redirect.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn redirect(&self, _route: Route) {}
}
