//! # Session Store
//!
//! Process-wide holder of the authenticated session. Starts absent, becomes
//! present on login, and returns to absent on logout or when the server
//! rejects the token.
//!
//! Two keys are kept, matching the browser storage the register grew up on:
//!
//! | Key | Contents |
//! |-----|----------|
//! | `userInfo` | the [`Session`] blob |
//! | `businessName` | last chosen organisation name, shown before login |
//!
//! No expiry is tracked locally. A stored token is trusted until a request
//! made with it comes back `401`.

use std::io::Write;
use std::path::{Path, PathBuf};

use areg_core::Session;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Label shown when neither the session nor storage names the business.
pub const DEFAULT_DISPLAY_NAME: &str = "Your Business";

/// Holder of the current session.
///
/// Implementations must make each method a single atomic step with respect
/// to the others: a concurrent `get` observes either the state before or the
/// state after a `set`, `clear`, or `update`, never a mix.
pub trait SessionStore: Send + Sync {
    /// The current session, if any.
    fn get(&self) -> Option<Session>;

    /// Replace the current session.
    fn set(&self, session: Session) -> Result<(), StoreError>;

    /// Remove the current session.
    ///
    /// The in-memory session is gone when this returns, even if persisting
    /// the removal failed; the error reports the persistence failure.
    fn clear(&self) -> Result<(), StoreError>;

    /// Mutate the current session in place, if one is present.
    ///
    /// Returns the updated session, or `None` (and does nothing) when absent.
    fn update(&self, f: &mut dyn FnMut(&mut Session)) -> Result<Option<Session>, StoreError>;

    /// The persisted organisation label, if one was ever chosen.
    fn display_name(&self) -> Option<String>;

    /// Remember an organisation label across sessions.
    fn set_display_name(&self, name: &str) -> Result<(), StoreError>;

    /// Rename the business on the current session and in the remembered
    /// label as one step. Either both change or neither does.
    ///
    /// Returns the updated session, or `None` when absent (the label is
    /// still remembered).
    fn rename_business(&self, name: &str) -> Result<Option<Session>, StoreError>;

    /// Whether a non-empty token is present.
    fn has_token(&self) -> bool {
        self.get().is_some_and(|s| s.has_token())
    }
}

/// Serialized layout shared by the stores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct PersistedState {
    #[serde(rename = "userInfo", default, skip_serializing_if = "Option::is_none")]
    user_info: Option<Session>,
    #[serde(rename = "businessName", default, skip_serializing_if = "Option::is_none")]
    business_name: Option<String>,
}

// -- In-memory ----------------------------------------------------------------

/// Session store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    state: Mutex<PersistedState>,
}

impl MemorySessionStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `session`.
    pub fn with_session(session: Session) -> Self {
        Self {
            state: Mutex::new(PersistedState {
                user_info: Some(session),
                business_name: None,
            }),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<Session> {
        self.state.lock().user_info.clone()
    }

    fn set(&self, session: Session) -> Result<(), StoreError> {
        self.state.lock().user_info = Some(session);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.state.lock().user_info = None;
        Ok(())
    }

    fn update(&self, f: &mut dyn FnMut(&mut Session)) -> Result<Option<Session>, StoreError> {
        let mut state = self.state.lock();
        Ok(state.user_info.as_mut().map(|session| {
            f(session);
            session.clone()
        }))
    }

    fn display_name(&self) -> Option<String> {
        self.state.lock().business_name.clone()
    }

    fn set_display_name(&self, name: &str) -> Result<(), StoreError> {
        self.state.lock().business_name = Some(name.to_string());
        Ok(())
    }

    fn rename_business(&self, name: &str) -> Result<Option<Session>, StoreError> {
        let mut state = self.state.lock();
        state.business_name = Some(name.to_string());
        Ok(state.user_info.as_mut().map(|session| {
            session.business_name = name.to_string();
            session.clone()
        }))
    }
}

// -- File-backed --------------------------------------------------------------

/// Session store persisted as a JSON document on disk.
///
/// The file is read once on [`open`](Self::open); afterwards the in-memory
/// copy is authoritative. Every mutation except [`clear`](SessionStore::clear)
/// is staged on a copy, written through while the lock is held, and only
/// then made visible, so a failed write leaves the store as it was.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    state: Mutex<PersistedState>,
}

impl FileSessionStore {
    /// Open (or lazily create) the store at `path`. A missing or blank file
    /// means no session.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let state = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => PersistedState::default(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Json {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => PersistedState::default(),
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.clone(),
                    source,
                })
            }
        };
        tracing::debug!(path = %path.display(), has_session = state.user_info.is_some(), "opened session store");
        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, state: &PersistedState) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        let parent = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                std::fs::create_dir_all(parent).map_err(io_err)?;
                parent
            }
            None => Path::new("."),
        };
        let body = serde_json::to_vec_pretty(state).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        // Uniquely named, owner-only file beside the target, renamed into
        // place so a crash never leaves half a file.
        let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(io_err)?;
        tmp.write_all(&body).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;
        Ok(())
    }

    /// Stage `f` on a copy of the state, persist it, then commit.
    fn commit<T>(&self, f: impl FnOnce(&mut PersistedState) -> T) -> Result<T, StoreError> {
        let mut state = self.state.lock();
        let mut next = state.clone();
        let out = f(&mut next);
        self.persist(&next)?;
        *state = next;
        Ok(out)
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Option<Session> {
        self.state.lock().user_info.clone()
    }

    fn set(&self, session: Session) -> Result<(), StoreError> {
        self.commit(|state| state.user_info = Some(session))
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        state.user_info = None;
        self.persist(&state)
    }

    fn update(&self, f: &mut dyn FnMut(&mut Session)) -> Result<Option<Session>, StoreError> {
        if self.state.lock().user_info.is_none() {
            return Ok(None);
        }
        self.commit(|state| {
            state.user_info.as_mut().map(|session| {
                f(session);
                session.clone()
            })
        })
    }

    fn display_name(&self) -> Option<String> {
        self.state.lock().business_name.clone()
    }

    fn set_display_name(&self, name: &str) -> Result<(), StoreError> {
        self.commit(|state| state.business_name = Some(name.to_string()))
    }

    fn rename_business(&self, name: &str) -> Result<Option<Session>, StoreError> {
        self.commit(|state| {
            state.business_name = Some(name.to_string());
            state.user_info.as_mut().map(|session| {
                session.business_name = name.to_string();
                session.clone()
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(token: &str) -> Session {
        Session::new(token, "thandi", "thandi@example.com", "Mokoena Traders")
    }

    #[test]
    fn memory_store_starts_absent() {
        let store = MemorySessionStore::new();
        assert!(store.get().is_none());
        assert!(!store.has_token());
        assert!(store.display_name().is_none());
    }

    #[test]
    fn memory_store_set_get_clear() {
        let store = MemorySessionStore::new();
        store.set(session("abc")).unwrap();
        assert_eq!(store.get().map(|s| s.token.clone()), Some("abc".to_string()));
        assert!(store.has_token());
        store.clear().unwrap();
        assert!(store.get().is_none());
    }

    #[test]
    fn empty_token_does_not_count() {
        let store = MemorySessionStore::with_session(session(""));
        assert!(store.get().is_some());
        assert!(!store.has_token());
    }

    #[test]
    fn update_is_noop_without_session() {
        let store = MemorySessionStore::new();
        let mut called = false;
        let out = store.update(&mut |_| called = true).unwrap();
        assert!(out.is_none());
        assert!(!called);
    }

    #[test]
    fn update_mutates_present_session() {
        let store = MemorySessionStore::with_session(session("abc"));
        let out = store
            .update(&mut |s| s.business_name = "Renamed".into())
            .unwrap()
            .unwrap();
        assert_eq!(out.business_name, "Renamed");
        assert_eq!(store.get().unwrap().business_name, "Renamed");
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = FileSessionStore::open(&path).unwrap();
        assert!(store.get().is_none());
        store.set(session("abc")).unwrap();
        store.set_display_name("Mokoena Traders").unwrap();
        drop(store);

        let reopened = FileSessionStore::open(&path).unwrap();
        assert_eq!(reopened.get().unwrap().token, "abc");
        assert_eq!(reopened.display_name().as_deref(), Some("Mokoena Traders"));
    }

    #[test]
    fn file_store_clear_persists_but_keeps_label() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileSessionStore::open(&path).unwrap();
        store.set(session("abc")).unwrap();
        store.set_display_name("Mokoena Traders").unwrap();
        store.clear().unwrap();
        drop(store);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("userInfo"));
        let reopened = FileSessionStore::open(&path).unwrap();
        assert!(reopened.get().is_none());
        assert_eq!(reopened.display_name().as_deref(), Some("Mokoena Traders"));
    }

    #[test]
    fn file_store_uses_browser_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(
            &path,
            r#"{"userInfo":{"token":"t0k","username":"u","email":"e","businessName":"B"},"businessName":"B"}"#,
        )
        .unwrap();
        let store = FileSessionStore::open(&path).unwrap();
        assert_eq!(store.get().unwrap().token, "t0k");
        assert_eq!(store.display_name().as_deref(), Some("B"));
    }

    #[test]
    fn file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            FileSessionStore::open(&path),
            Err(StoreError::Json { .. })
        ));
    }

    #[test]
    fn blank_file_means_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "\n").unwrap();
        assert!(FileSessionStore::open(&path).unwrap().get().is_none());
    }

    #[test]
    fn memory_store_rename_touches_session_and_label() {
        let store = MemorySessionStore::with_session(session("abc"));
        let out = store.rename_business("Dlamini Metals").unwrap().unwrap();
        assert_eq!(out.business_name, "Dlamini Metals");
        assert_eq!(store.get().unwrap().business_name, "Dlamini Metals");
        assert_eq!(store.display_name().as_deref(), Some("Dlamini Metals"));
    }

    /// Opens a store whose directory is then replaced by a plain file, so
    /// every later write fails.
    fn store_with_blocked_directory(dir: &tempfile::TempDir) -> FileSessionStore {
        let sub = dir.path().join("sub");
        let store = FileSessionStore::open(sub.join("session.json")).unwrap();
        store.set(session("abc")).unwrap();
        store.set_display_name("Mokoena Traders").unwrap();
        std::fs::remove_dir_all(&sub).unwrap();
        std::fs::write(&sub, "not a directory").unwrap();
        store
    }

    #[test]
    fn failed_set_leaves_state_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with_blocked_directory(&dir);

        assert!(matches!(store.set(session("xyz")), Err(StoreError::Io { .. })));
        assert_eq!(store.get().unwrap().token, "abc");
        assert!(store.set_display_name("Other").is_err());
        assert_eq!(store.display_name().as_deref(), Some("Mokoena Traders"));
    }

    #[test]
    fn failed_update_leaves_state_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with_blocked_directory(&dir);

        assert!(store.update(&mut |s| s.business_name = "Renamed".into()).is_err());
        assert_eq!(store.get().unwrap().business_name, "Mokoena Traders");
    }

    #[test]
    fn failed_rename_changes_neither_session_nor_label() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with_blocked_directory(&dir);

        assert!(store.rename_business("Dlamini Metals").is_err());
        assert_eq!(store.get().unwrap().business_name, "Mokoena Traders");
        assert_eq!(store.display_name().as_deref(), Some("Mokoena Traders"));
    }

    #[test]
    fn failed_clear_still_forgets_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with_blocked_directory(&dir);

        assert!(store.clear().is_err());
        assert!(store.get().is_none());
    }

    #[test]
    fn writes_leave_no_stray_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileSessionStore::open(&path).unwrap();
        for token in ["a", "b", "c"] {
            store.set(session(token)).unwrap();
        }
        store.rename_business("Dlamini Metals").unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["session.json"]);
    }
}
