//! # Views
//!
//! Every screen the register can show, addressed the same way the browser
//! addressed them. Unknown paths and `/` resolve to [`Route::Login`].

use crate::identity::RecordId;

/// A navigable view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/login`
    Login,
    /// `/register`
    Register,
    /// `/forgot-password`
    ForgotPassword,
    /// `/reset-password/{token}`
    ResetPassword {
        /// Single-use reset token from the emailed link.
        token: String,
    },
    /// `/dashboard`
    Dashboard,
    /// `/new`
    NewRecord,
    /// `/records/{id}`
    RecordDetail {
        /// Record being viewed.
        id: RecordId,
    },
    /// `/edit/{id}`
    EditRecord {
        /// Record being edited.
        id: RecordId,
    },
}

impl Route {
    /// Resolve a path. Anything unrecognised falls back to the login view.
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path
            .split('?')
            .next()
            .unwrap_or_default()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        match segments.as_slice() {
            ["register"] => Self::Register,
            ["forgot-password"] => Self::ForgotPassword,
            ["reset-password", token] => Self::ResetPassword {
                token: (*token).to_string(),
            },
            ["dashboard"] => Self::Dashboard,
            ["new"] => Self::NewRecord,
            ["records", id] => Self::RecordDetail {
                id: RecordId::new(*id),
            },
            ["edit", id] => Self::EditRecord {
                id: RecordId::new(*id),
            },
            _ => Self::Login,
        }
    }

    /// The canonical path of this view.
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".into(),
            Self::Register => "/register".into(),
            Self::ForgotPassword => "/forgot-password".into(),
            Self::ResetPassword { token } => format!("/reset-password/{token}"),
            Self::Dashboard => "/dashboard".into(),
            Self::NewRecord => "/new".into(),
            Self::RecordDetail { id } => format!("/records/{id}"),
            Self::EditRecord { id } => format!("/edit/{id}"),
        }
    }

    /// Whether the view requires an authenticated session.
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Self::Dashboard | Self::NewRecord | Self::RecordDetail { .. } | Self::EditRecord { .. }
        )
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}
