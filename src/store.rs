//! Persisted bearer-token storage.
//!
//! Exactly one persistence strategy is in effect per deployment: a single
//! store entry holding the token and the instant it was saved. Entries
//! outlive their configured maximum age (seven days by default, matching
//! the `accessToken` cookie lifetime of the hosted deployments) and are
//! treated as absent once stale. The [`crate::session::SessionManager`] is
//! the only writer; the HTTP client reads the store to attach the
//! `Authorization` header and must never mutate it.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Default maximum age of a persisted token: seven days.
pub const DEFAULT_TOKEN_MAX_AGE_SECONDS: u64 = 604_800;

/// The persisted credential record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedAuth {
    pub token: String,
    pub saved_at: DateTime<Utc>,
}

impl PersistedAuth {
    /// Wrap a freshly issued token, stamped with the current instant.
    #[must_use]
    pub fn new(token: String) -> Self {
        Self {
            token,
            saved_at: Utc::now(),
        }
    }

    /// Whether the record is older than `max_age`.
    #[must_use]
    pub fn is_stale(&self, max_age: Duration, now: DateTime<Utc>) -> bool {
        now - self.saved_at > max_age
    }
}

/// Storage for the bearer credential shared across client restarts.
///
/// Implementations absorb their own I/O failures: a record that cannot be
/// read or written degrades to "absent" with a log line, it never surfaces
/// an error to callers. The underlying primitive is atomic per write, so no
/// locking protocol is imposed on implementors beyond their own interior
/// mutability.
pub trait TokenStore: Send + Sync {
    /// Read the persisted credential, if a usable one exists.
    fn load(&self) -> Option<PersistedAuth>;

    /// Replace the persisted credential.
    fn save(&self, auth: &PersistedAuth);

    /// Remove the persisted credential.
    fn clear(&self);
}

/// File-backed store: one JSON record on disk.
pub struct FileTokenStore {
    path: PathBuf,
    max_age: Duration,
}

impl FileTokenStore {
    /// Create a store at `path` with the default seven-day maximum age.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_max_age(path, DEFAULT_TOKEN_MAX_AGE_SECONDS)
    }

    /// Create a store at `path` whose records expire after `max_age_seconds`.
    /// Ages beyond what a `Duration` can hold are clamped.
    #[must_use]
    pub fn with_max_age(path: impl Into<PathBuf>, max_age_seconds: u64) -> Self {
        let seconds = i64::try_from(max_age_seconds)
            .unwrap_or(i64::MAX)
            .min(i64::MAX / 1_000);
        Self {
            path: path.into(),
            max_age: Duration::seconds(seconds),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<PersistedAuth> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(_) => return None,
        };

        let auth: PersistedAuth = match serde_json::from_str(&contents) {
            Ok(auth) => auth,
            Err(err) => {
                log::warn!("discarding unreadable token record: {err}");
                self.clear();
                return None;
            }
        };

        if auth.is_stale(self.max_age, Utc::now()) {
            log::info!("persisted token exceeded its maximum age, clearing");
            self.clear();
            return None;
        }

        Some(auth)
    }

    fn save(&self, auth: &PersistedAuth) {
        if let Some(parent) = self.path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                log::warn!("could not create token directory {}: {err}", parent.display());
                return;
            }
        }

        match serde_json::to_string(auth) {
            Ok(contents) => {
                if let Err(err) = fs::write(&self.path, contents) {
                    log::warn!("could not persist token to {}: {err}", self.path.display());
                }
            }
            Err(err) => log::warn!("could not serialize token record: {err}"),
        }
    }

    fn clear(&self) {
        if self.path.exists() {
            if let Err(err) = fs::remove_file(&self.path) {
                log::warn!("could not remove token file {}: {err}", self.path.display());
            }
        }
    }
}

/// Process-local store for ephemeral sessions and tests.
#[derive(Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<PersistedAuth>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<PersistedAuth> {
        self.slot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn save(&self, auth: &PersistedAuth) {
        *self
            .slot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(auth.clone());
    }

    fn clear(&self) {
        *self
            .slot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = None;
    }
}
