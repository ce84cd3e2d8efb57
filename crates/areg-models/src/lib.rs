//! # areg-models — View Models for the Acquisition Register
//!
//! The state behind each screen, independent of how it is rendered:
//!
//! - [`RecordListModel`] — the dashboard: the full record set, the search
//!   term and sort order, and single/bulk deletion.
//! - [`RecordFormModel`] — the create and edit forms.
//! - [`AccountFlow`] — login, logout, registration, password reset and the
//!   business name.
//!
//! Every model talks to the backend through an [`ApiClient`](areg_client::ApiClient)
//! and awaits each call in turn. Async operations take `&mut self`, so a
//! response can only be applied to a model that is still alive.

pub mod account;
pub mod confirm;
pub mod error;
pub mod form;
pub mod list;

pub use account::AccountFlow;
pub use confirm::Confirm;
pub use error::{AccountError, FormError};
pub use form::{FormMode, RecordFormModel, Submitted};
pub use list::{BulkDeleteOutcome, DeleteOutcome, RecordListModel};
