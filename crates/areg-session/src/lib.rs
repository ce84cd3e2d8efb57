//! # areg-session — Session State and Route Guarding
//!
//! Holds the one piece of state shared across the client: the authenticated
//! [`Session`](areg_core::Session).
//!
//! - [`SessionStore`] — `get` / `set` / `clear`, plus the persisted display
//!   name used as a label before anyone logs in.
//! - [`MemorySessionStore`] and [`FileSessionStore`] — in-process and
//!   durable backings.
//! - [`Navigator`] — the navigation collaborator that receives redirects.
//! - [`AuthGate`] — the per-navigation guard for protected views.
//!
//! ## Concurrency
//!
//! Every store operation completes under one `parking_lot` lock and never
//! spans an `.await`, so read-then-set and read-then-clear are single steps
//! from the point of view of every other caller.

pub mod error;
pub mod gate;
pub mod navigation;
pub mod store;

pub use error::StoreError;
pub use gate::{AuthGate, AuthState, GateDecision};
pub use navigation::{ChannelNavigator, Navigator, NoopNavigator};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore, DEFAULT_DISPLAY_NAME};
