//! Session persistence
//!
//! A session is the `(token, username)` pair that identifies a logged-in
//! user across runs. Stores hold nothing else: the full user is always
//! re-fetched from the API on startup. Values are trusted as written;
//! there is no expiry, validation or encryption.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::config::{SessionBackend, SessionConfig};
use crate::error::{Result, SnoozeError};

/// Storage key for the auth token
pub const TOKEN_KEY: &str = "token";
/// Storage key for the username
pub const USERNAME_KEY: &str = "username";

/// Persisted login: both fields or nothing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub username: String,
}

impl Session {
    /// Build a session from its two parts
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
        }
    }

    /// Rebuild a session from two optional stored values
    ///
    /// Returns `None` unless both are present and non-empty.
    pub fn from_parts(token: Option<String>, username: Option<String>) -> Option<Self> {
        match (token, username) {
            (Some(token), Some(username)) if !token.is_empty() && !username.is_empty() => {
                Some(Self { token, username })
            }
            _ => None,
        }
    }
}

/// Persistent home of the current session
pub trait SessionStore: Send + Sync {
    /// Persist `session`, replacing whatever was stored
    fn save(&self, session: &Session) -> Result<()>;

    /// Return the last saved session, if any
    fn load(&self) -> Result<Option<Session>>;

    /// Remove both keys; a no-op when nothing is stored
    fn clear(&self) -> Result<()>;
}

/// Build the store selected by configuration
pub fn open_store(config: &SessionConfig) -> Result<Box<dyn SessionStore>> {
    Ok(match config.backend {
        SessionBackend::File => Box::new(FileSessionStore::new(config.file_path()?)),
        SessionBackend::Keyring => Box::new(KeyringSessionStore::default()),
        SessionBackend::Memory => Box::new(MemorySessionStore::default()),
    })
}

// ---------------------------------------------------------------------------
// FileSessionStore
// ---------------------------------------------------------------------------

/// Flat JSON key-value file holding `token` and `username`
///
/// # Examples
///
/// ```no_run
/// use snooze::session::{FileSessionStore, Session, SessionStore};
///
/// let store = FileSessionStore::new("/tmp/snooze-session.json");
/// store.save(&Session::new("tok", "alice")).unwrap();
/// assert!(store.load().unwrap().is_some());
/// ```
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                SnoozeError::Storage(format!(
                    "Corrupt session file {}: {}",
                    self.path.display(),
                    e
                ))
                .into()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(SnoozeError::Io(e).into()),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SnoozeError::Storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let mut entries = BTreeMap::new();
        entries.insert(TOKEN_KEY.to_string(), session.token.clone());
        entries.insert(USERNAME_KEY.to_string(), session.username.clone());
        let json = serde_json::to_string_pretty(&entries)?;

        std::fs::write(&self.path, json).map_err(|e| {
            SnoozeError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
        })?;
        tracing::debug!("Saved session for {} to {}", session.username, self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<Session>> {
        let mut entries = self.read_entries()?;
        Ok(Session::from_parts(
            entries.remove(TOKEN_KEY),
            entries.remove(USERNAME_KEY),
        ))
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!("Removed session file {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SnoozeError::Storage(format!(
                "Failed to remove {}: {}",
                self.path.display(),
                e
            ))
            .into()),
        }
    }
}

// ---------------------------------------------------------------------------
// KeyringSessionStore
// ---------------------------------------------------------------------------

/// OS keyring store, one entry per key under a shared service name
pub struct KeyringSessionStore {
    service: String,
}

impl Default for KeyringSessionStore {
    fn default() -> Self {
        Self::new("snooze")
    }
}

impl KeyringSessionStore {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry> {
        keyring::Entry::new(&self.service, key).map_err(|e| SnoozeError::Keyring(e).into())
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(SnoozeError::Keyring(e).into()),
        }
    }

    fn delete(&self, key: &str) -> Result<()> {
        match self.entry(key)?.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(SnoozeError::Keyring(e).into()),
        }
    }
}

impl SessionStore for KeyringSessionStore {
    fn save(&self, session: &Session) -> Result<()> {
        self.entry(TOKEN_KEY)?
            .set_password(&session.token)
            .map_err(SnoozeError::Keyring)?;
        self.entry(USERNAME_KEY)?
            .set_password(&session.username)
            .map_err(SnoozeError::Keyring)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<Session>> {
        Ok(Session::from_parts(
            self.get(TOKEN_KEY)?,
            self.get(USERNAME_KEY)?,
        ))
    }

    fn clear(&self) -> Result<()> {
        self.delete(TOKEN_KEY)?;
        self.delete(USERNAME_KEY)
    }
}

// ---------------------------------------------------------------------------
// MemorySessionStore
// ---------------------------------------------------------------------------

/// In-process store; nothing survives the process
#[derive(Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    /// Store pre-seeded with `session`
    pub fn with_session(session: Session) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<Session>>> {
        self.session
            .lock()
            .map_err(|_| SnoozeError::Storage("session lock poisoned".into()).into())
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, session: &Session) -> Result<()> {
        *self.lock()? = Some(session.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<Session>> {
        Ok(self.lock()?.clone())
    }

    fn clear(&self) -> Result<()> {
        *self.lock()? = None;
        Ok(())
    }
}

impl<S: SessionStore + ?Sized> SessionStore for std::sync::Arc<S> {
    fn save(&self, session: &Session) -> Result<()> {
        (**self).save(session)
    }

    fn load(&self) -> Result<Option<Session>> {
        (**self).load()
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}
