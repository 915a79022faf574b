//! Credential resolution and persistence
//!
//! The assistant can run with an API key from three sources, in descending
//! priority: a value set explicitly during this process lifetime, a value
//! persisted by a prior run, and a value baked in from deployment
//! configuration. A key shorter than [`MIN_CREDENTIAL_LEN`] characters is
//! treated as absent, never as an error: the pipeline simply runs in
//! fallback mode.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Minimum length for a credential to be considered usable
pub const MIN_CREDENTIAL_LEN: usize = 6;

/// Serializable envelope for the credential store file
///
/// Versioned for future migration support, like the platform's other
/// on-disk state.
#[derive(Debug, Serialize, Deserialize)]
struct CredentialStoreData {
    version: u32,
    api_key: String,
}

/// Durable single-key store holding the last-saved credential
///
/// Read once at startup, written on explicit save.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Create a store backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved credential, if any
    ///
    /// A missing file is not an error; it means no credential was ever
    /// saved. An empty stored value is reported as absent.
    pub fn load(&self) -> Result<Option<String>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path)?;
        let data: CredentialStoreData = serde_json::from_str(&json)?;

        if data.version != 1 {
            return Err(StoreError::UnsupportedVersion(data.version));
        }

        if data.api_key.is_empty() {
            Ok(None)
        } else {
            Ok(Some(data.api_key))
        }
    }

    /// Persist a credential, creating parent directories as needed
    pub fn save(&self, api_key: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = CredentialStoreData {
            version: 1,
            api_key: api_key.to_string(),
        };
        let json = serde_json::to_string_pretty(&data)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Layered credential lookup
///
/// Holds the in-memory slot, the value loaded from the store at startup, and
/// the deployment value. `resolve` picks the highest-priority present source
/// and validates it; it never fails.
#[derive(Debug)]
pub struct CredentialResolver {
    dynamic: Option<String>,
    stored: Option<String>,
    deploy: Option<String>,
    store: CredentialStore,
}

impl CredentialResolver {
    /// Build a resolver, reading the durable store once
    ///
    /// A corrupt or unreadable store file is logged and treated as empty so
    /// startup never fails on it.
    pub fn new(store: CredentialStore, deploy: Option<String>) -> Self {
        let stored = match store.load() {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(path = %store.path().display(), error = %e, "Failed to load credential store");
                None
            }
        };

        Self {
            dynamic: None,
            stored,
            deploy: deploy.filter(|k| !k.is_empty()),
            store,
        }
    }

    /// Resolve the active credential, if any
    ///
    /// Sources are evaluated in priority order (in-memory, stored,
    /// deployment); the first non-empty one is the candidate. Returns `None`
    /// when no source is present or the candidate is shorter than
    /// [`MIN_CREDENTIAL_LEN`].
    pub fn resolve(&self) -> Option<&str> {
        let candidate = self
            .dynamic
            .as_deref()
            .filter(|k| !k.is_empty())
            .or(self.stored.as_deref().filter(|k| !k.is_empty()))
            .or(self.deploy.as_deref())?;

        if candidate.len() >= MIN_CREDENTIAL_LEN {
            Some(candidate)
        } else {
            None
        }
    }

    /// Whether a usable credential is currently configured
    pub fn has_valid_credential(&self) -> bool {
        self.resolve().is_some()
    }

    /// Overwrite the in-memory slot and persist the value
    ///
    /// A short or empty value is accepted without complaint; consumers will
    /// simply see it as absent. Persistence failures are logged and
    /// swallowed: a read-only disk must not break the chat.
    pub fn set_credential(&mut self, value: impl Into<String>) {
        let value = value.into();

        if let Err(e) = self.store.save(&value) {
            tracing::warn!(path = %self.store.path().display(), error = %e, "Failed to persist credential");
        } else {
            self.stored = Some(value.clone());
        }

        self.dynamic = Some(value);
    }
}
