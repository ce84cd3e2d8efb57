#![deny(missing_docs)]

//! # areg-core — Foundational Types for the Acquisition Register
//!
//! Defines the types every other crate in the workspace shares. It performs
//! no I/O and has no internal crate dependencies.
//!
//! ## Design Principles
//!
//! 1. **Newtypes for identifiers.** A [`RecordId`] (server identity) cannot be
//!    passed where a [`RecordCode`] (human-facing register code) is expected.
//!
//! 2. **Server-owned fields stay server-owned.** [`RecordDraft`] exposes the
//!    editable fields publicly; `code` and `createdAt` are only readable.
//!
//! 3. **One projection.** The dashboard view (search + date sort) is computed
//!    by [`query::project`] and nowhere else.

pub mod error;
pub mod identity;
pub mod query;
pub mod record;
pub mod route;
pub mod session;
mod wire;

pub use error::ValidationError;
pub use identity::{RecordCode, RecordId};
pub use query::{normalize_search_term, project, SortOrder};
pub use record::{Record, RecordDraft, RecordField, VerificationMethod};
pub use route::Route;
pub use session::Session;
