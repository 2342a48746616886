//! Durable session state: the single source of truth for "who is logged in".
//!
//! The durable medium is a key space of small files under the session
//! directory (default `~/.oncontrol`, override via `ONCONTROL_SESSION_DIR`):
//! the three core keys `token`, `role`, `identity` (full JSON blob), plus
//! role-specific convenience keys (`organization_id`, `doctor_id`,
//! `patient_id`, `patient_doctor_id`) other tools read without re-parsing
//! the blob. The token is additionally stored in the OS keychain via
//! `keyring`, with the file as fallback when no keychain is available.
//!
//! Only this module mutates the key space. Write failures surface as
//! [`AuthError::SessionStore`]; read-side corruption is swallowed by
//! hydration and reported as "no session".

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use onc_core::identity::Identity;
use onc_core::role::Role;

use crate::error::AuthError;

const DEFAULT_KEYRING_SERVICE: &str = "oncontrol-cli";
const KEYRING_USER: &str = "session-token";
const SESSION_DIR_NAME: &str = ".oncontrol";

const TOKEN_KEY: &str = "token";
const ROLE_KEY: &str = "role";
const IDENTITY_KEY: &str = "identity";
const ORGANIZATION_ID_KEY: &str = "organization_id";
const DOCTOR_ID_KEY: &str = "doctor_id";
const PATIENT_ID_KEY: &str = "patient_id";
const PATIENT_DOCTOR_ID_KEY: &str = "patient_doctor_id";

const CONVENIENCE_KEYS: [&str; 4] = [
    ORGANIZATION_ID_KEY,
    DOCTOR_ID_KEY,
    PATIENT_ID_KEY,
    PATIENT_DOCTOR_ID_KEY,
];

/// Returns the keyring service name.
///
/// Defaults to `"oncontrol-cli"`. Override via `ONCONTROL_KEYRING_SERVICE`
/// for testing to avoid touching production credentials.
fn keyring_service() -> String {
    std::env::var("ONCONTROL_KEYRING_SERVICE")
        .unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string())
}

/// Read-only projection of the session, consumed by the route guard and pages.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub identity: Option<Identity>,
    pub is_authenticated: bool,
    /// True only before the initial hydration pass has completed.
    pub is_loading: bool,
}

struct Inner {
    identity: Option<Identity>,
    loading: bool,
    epoch: u64,
}

/// Owning component for in-memory and durable identity state.
pub struct SessionStore {
    dir: PathBuf,
    inner: RwLock<Inner>,
}

impl SessionStore {
    /// Create a store over the default session directory.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SessionStore`] if no home directory can be
    /// resolved and `ONCONTROL_SESSION_DIR` is unset.
    pub fn new() -> Result<Self, AuthError> {
        let dir = match std::env::var("ONCONTROL_SESSION_DIR") {
            Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::home_dir()
                .map(|home| home.join(SESSION_DIR_NAME))
                .ok_or_else(|| {
                    AuthError::SessionStore(
                        "home directory not found — cannot store session".into(),
                    )
                })?,
        };
        Ok(Self::with_dir(dir))
    }

    /// Create a store over an explicit session directory.
    #[must_use]
    pub fn with_dir(dir: PathBuf) -> Self {
        Self {
            dir,
            inner: RwLock::new(Inner {
                identity: None,
                loading: true,
                epoch: 0,
            }),
        }
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn state(&self) -> SessionState {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        SessionState {
            identity: inner.identity.clone(),
            is_authenticated: inner.identity.is_some(),
            is_loading: inner.loading,
        }
    }

    /// Current write epoch. Capture before an async login round trip and
    /// commit with [`Self::set_identity_if_current`] so a teardown that
    /// happened in between wins over the stale response.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .epoch
    }

    /// Hydrate from durable storage. Invoked once at process start.
    ///
    /// All three core keys present and parseable → authenticated; anything
    /// missing, unparseable, or inconsistent → unauthenticated. Corruption
    /// never crashes: it is logged and treated as "no session".
    pub fn load_from_disk(&self) {
        let identity = self.read_durable_identity();
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.identity = identity;
        inner.loading = false;
    }

    /// Replace the session with `identity`, persisting every key.
    ///
    /// Persistence happens before the in-memory switch: a write failure
    /// leaves the previous session intact.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SessionStore`] if the durable key space cannot
    /// be written.
    pub fn set_identity(&self, identity: &Identity) -> Result<(), AuthError> {
        self.persist(identity)?;
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.identity = Some(identity.clone());
        inner.loading = false;
        inner.epoch += 1;
        Ok(())
    }

    /// Epoch-guarded variant of [`Self::set_identity`].
    ///
    /// Returns `Ok(false)` without touching any state when the store has
    /// moved past `observed_epoch` — the caller's response is stale.
    ///
    /// # Errors
    ///
    /// Same as [`Self::set_identity`].
    pub fn set_identity_if_current(
        &self,
        observed_epoch: u64,
        identity: &Identity,
    ) -> Result<bool, AuthError> {
        {
            let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
            if inner.epoch != observed_epoch {
                tracing::debug!(
                    observed_epoch,
                    current_epoch = inner.epoch,
                    "ignoring stale identity write"
                );
                return Ok(false);
            }
        }
        // The CLI drives one logical session; no competing writer can slip
        // in between the check and the write.
        self.set_identity(identity)?;
        Ok(true)
    }

    /// Remove every durable key and reset memory to unauthenticated.
    ///
    /// Idempotent: clearing an already-empty session succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SessionStore`] if an existing key file cannot be
    /// removed.
    pub fn clear(&self) -> Result<(), AuthError> {
        if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER) {
            let _ = entry.delete_credential();
        }

        for key in [TOKEN_KEY, ROLE_KEY, IDENTITY_KEY]
            .iter()
            .chain(CONVENIENCE_KEYS.iter())
        {
            self.remove_key(key)?;
        }

        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.identity = None;
        inner.loading = false;
        inner.epoch += 1;
        Ok(())
    }

    /// Session directory backing this store.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    // --- Durable key space ---

    fn read_durable_identity(&self) -> Option<Identity> {
        let token = self.load_token()?;
        let role_raw = self.read_key(ROLE_KEY)?;
        let blob = self.read_key(IDENTITY_KEY)?;

        let role: Role = match role_raw.trim().parse() {
            Ok(role) => role,
            Err(error) => {
                tracing::warn!(%error, "stored role is unreadable; treating session as absent");
                return None;
            }
        };

        let identity: Identity = match serde_json::from_str(&blob) {
            Ok(identity) => identity,
            Err(error) => {
                tracing::warn!(%error, "stored identity blob is corrupt; treating session as absent");
                return None;
            }
        };

        if identity.role() != role || identity.token() != token {
            tracing::warn!("stored session keys disagree; treating session as absent");
            return None;
        }

        Some(identity)
    }

    fn persist(&self, identity: &Identity) -> Result<(), AuthError> {
        self.ensure_dir()?;

        self.store_token(identity.token())?;
        self.write_key(ROLE_KEY, identity.role().as_str())?;
        let blob = serde_json::to_string(identity)
            .map_err(|e| AuthError::SessionStore(format!("serialize identity: {e}")))?;
        self.write_key(IDENTITY_KEY, &blob)?;

        // Convenience keys for the active role; stale ones from a previous
        // role must not survive a role switch.
        for key in CONVENIENCE_KEYS {
            self.remove_key(key)?;
        }
        match identity {
            Identity::Organization(org) => {
                self.write_key(ORGANIZATION_ID_KEY, &org.id.to_string())?;
            }
            Identity::Doctor(doc) => {
                self.write_key(DOCTOR_ID_KEY, &doc.profile.id.to_string())?;
            }
            Identity::Patient(pat) => {
                self.write_key(PATIENT_ID_KEY, &pat.profile.id.to_string())?;
                self.write_key(PATIENT_DOCTOR_ID_KEY, &pat.profile.doctor_id.to_string())?;
            }
        }
        Ok(())
    }

    /// Store the token in the OS keychain, falling back to the token file.
    /// The file copy is always written so hydration works without a keychain.
    fn store_token(&self, token: &str) -> Result<(), AuthError> {
        match keyring::Entry::new(&keyring_service(), KEYRING_USER) {
            Ok(entry) => {
                if let Err(error) = entry.set_password(token) {
                    tracing::warn!(%error, "keyring store failed; file copy remains authoritative");
                }
            }
            Err(error) => {
                tracing::warn!(%error, "keyring unavailable; file copy remains authoritative");
            }
        }
        self.write_key(TOKEN_KEY, token)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let path = self.dir.join(TOKEN_KEY);
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600))
                .map_err(|e| AuthError::SessionStore(format!("chmod {}: {e}", path.display())))?;
        }
        Ok(())
    }

    /// Load the token. The token file is canonical for hydration; the
    /// keychain entry covers a session directory that lost its token file.
    fn load_token(&self) -> Option<String> {
        if let Some(token) = self.read_key(TOKEN_KEY) {
            return Some(token);
        }
        if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER)
            && let Ok(token) = entry.get_password()
            && !token.is_empty()
        {
            return Some(token);
        }
        None
    }

    fn ensure_dir(&self) -> Result<(), AuthError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| AuthError::SessionStore(format!("mkdir {}: {e}", self.dir.display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(&self.dir, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", self.dir.display());
            }
        }
        Ok(())
    }

    fn write_key(&self, key: &str, value: &str) -> Result<(), AuthError> {
        let path = self.dir.join(key);
        fs::write(&path, value)
            .map_err(|e| AuthError::SessionStore(format!("write {}: {e}", path.display())))
    }

    fn read_key(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.dir.join(key))
            .ok()
            .filter(|s| !s.trim().is_empty())
    }

    fn remove_key(&self, key: &str) -> Result<(), AuthError> {
        let path = self.dir.join(key);
        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| AuthError::SessionStore(format!("delete {}: {e}", path.display())))?;
        }
        Ok(())
    }
}
