//! # Record Form
//!
//! One model serves both the create and the edit screen.
//!
//! ```text
//! Create:  new_create ──fetch_code──▶ code issued ──submit──▶ POST /records
//! Edit:    for_edit (GET /records/{id}) ───────────submit──▶ PUT /records/{id}
//! ```
//!
//! A create form cannot be submitted until the server has issued its code.
//! `code` and `createdAt` are never editable; an edit form sends them back
//! exactly as loaded. A failed submit leaves the draft untouched so the user
//! can retry.

use areg_client::ApiClient;
use areg_core::{Record, RecordCode, RecordDraft, RecordField, RecordId, Route};

use crate::error::FormError;

/// Which screen the form backs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: RecordId },
}

/// A successful submission and where to go next.
#[derive(Debug, Clone)]
pub struct Submitted {
    pub record: Record,
    /// Detail view of the saved record.
    pub route: Route,
}

/// Create/edit form state.
#[derive(Debug)]
pub struct RecordFormModel {
    client: ApiClient,
    mode: FormMode,
    draft: RecordDraft,
}

impl RecordFormModel {
    /// A blank create form. The code is still pending; see
    /// [`fetch_code`](Self::fetch_code).
    pub fn new_create(client: ApiClient) -> Self {
        Self {
            client,
            mode: FormMode::Create,
            draft: RecordDraft::new(),
        }
    }

    /// A create form with its code already issued.
    pub async fn for_create(client: ApiClient) -> Result<Self, FormError> {
        let mut form = Self::new_create(client);
        form.fetch_code().await?;
        Ok(form)
    }

    /// An edit form pre-filled from the server's copy of `id`.
    pub async fn for_edit(client: ApiClient, id: RecordId) -> Result<Self, FormError> {
        let record = client.records().get(&id).await?;
        Ok(Self {
            client,
            draft: RecordDraft::from_record(&record),
            mode: FormMode::Edit { id },
        })
    }

    /// Ask the server for the next register code. Once a code is held it is
    /// kept, and no further request is made.
    pub async fn fetch_code(&mut self) -> Result<RecordCode, FormError> {
        if let Some(code) = self.draft.code() {
            return Ok(code.clone());
        }
        let code = self.client.records().next_code().await?;
        self.draft.assign_code(code.clone());
        tracing::debug!(code = %code, "register code issued");
        Ok(code)
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn draft(&self) -> &RecordDraft {
        &self.draft
    }

    /// Set a scalar field addressed by its wire name (`fullNames`, ...).
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        let field: RecordField = name.parse()?;
        self.set(field, value)
    }

    /// Set a scalar field.
    pub fn set(&mut self, field: RecordField, value: &str) -> Result<(), FormError> {
        self.draft.set_field(field, value)?;
        Ok(())
    }

    /// Replace telephone number `index`, which must already exist.
    pub fn set_phone(&mut self, index: usize, value: &str) -> Result<(), FormError> {
        let len = self.draft.telephone_numbers.len();
        match self.draft.telephone_numbers.get_mut(index) {
            Some(slot) => {
                *slot = value.to_string();
                Ok(())
            }
            None => Err(FormError::PhoneIndexOutOfRange { index, len }),
        }
    }

    /// Append an empty telephone number.
    pub fn add_phone(&mut self) {
        self.draft.telephone_numbers.push(String::new());
    }

    pub fn other_verification_visible(&self) -> bool {
        self.draft.other_verification_visible()
    }

    /// Whether [`submit`](Self::submit) may be called.
    pub fn can_submit(&self) -> bool {
        match self.mode {
            FormMode::Create => self.draft.code().is_some(),
            FormMode::Edit { .. } => true,
        }
    }

    /// Save the draft. Field contents are not checked here; the server
    /// validates them.
    pub async fn submit(&self) -> Result<Submitted, FormError> {
        if !self.can_submit() {
            return Err(FormError::CodePending);
        }
        let record = match &self.mode {
            FormMode::Create => self.client.records().create(&self.draft).await?,
            FormMode::Edit { id } => self.client.records().update(id, &self.draft).await?,
        };
        tracing::info!(record = %record.id, code = %record.code, "record saved");
        let route = Route::RecordDetail {
            id: record.id.clone(),
        };
        Ok(Submitted { record, route })
    }
}
