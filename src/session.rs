//! Session and identity handling.
//!
//! Authentication is a mock: a [`CredentialVerifier`] implementation decides
//! whether an email/password pair is acceptable, and a static user directory
//! resolves the matching account. The trait is the seam where a real identity
//! backend would plug in; [`StaticCredentials`] is a test double promoted to
//! the default implementation.

use chrono::Utc;
use log::{debug, info, warn};

use crate::{
    habits_key, journal_entries_key, mood_entries_key, sample_credentials, sample_users,
    JsonStore, MmError, Result, User, SESSION_KEY,
};

/// Decides whether an email/password pair is valid.
///
/// Implementations must not reveal whether the email or the password was the
/// mismatched half.
pub trait CredentialVerifier {
    fn verify(&self, email: &str, password: &str) -> bool;
}

/// Verifier backed by the static demo credential list.
pub struct StaticCredentials {
    pairs: Vec<(String, String)>,
}

impl StaticCredentials {
    pub fn new() -> Self {
        StaticCredentials {
            pairs: sample_credentials()
                .into_iter()
                .map(|(e, p)| (e.to_string(), p.to_string()))
                .collect(),
        }
    }
}

impl Default for StaticCredentials {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, email: &str, password: &str) -> bool {
        self.pairs
            .iter()
            .any(|(e, p)| e == email && p == password)
    }
}

/// Manages the current session: login, logout, and restoring the persisted
/// session record on startup.
pub struct SessionManager<V: CredentialVerifier> {
    store: JsonStore,
    verifier: V,
    users: Vec<User>,
    current: Option<User>,
}

impl SessionManager<StaticCredentials> {
    /// Creates a session manager over the static demo identity data.
    pub fn with_static_identities(store: JsonStore) -> Self {
        SessionManager::new(store, StaticCredentials::new(), sample_users())
    }
}

impl<V: CredentialVerifier> SessionManager<V> {
    pub fn new(store: JsonStore, verifier: V, users: Vec<User>) -> Self {
        let current: Option<User> = store.read(SESSION_KEY);
        if let Some(user) = &current {
            debug!("Restored session for user: {}", user.id);
        }
        SessionManager {
            store,
            verifier,
            users,
            current,
        }
    }

    /// Attempts to log in. Returns `Ok(false)` on any credential mismatch;
    /// no detail distinguishes an unknown email from a wrong password.
    ///
    /// On success the matching user record gets a fresh last-login stamp and
    /// becomes the persisted session.
    pub fn login(&mut self, email: &str, password: &str) -> Result<bool> {
        if !self.verifier.verify(email, password) {
            info!("Login rejected for {}", email);
            return Ok(false);
        }

        let Some(user) = self.users.iter().find(|u| u.email == email) else {
            // Credentials matched but no directory record; treat the same as
            // a mismatch rather than leaking the difference.
            warn!("Credentials accepted but no user record for {}", email);
            return Ok(false);
        };

        let mut user = user.clone();
        user.last_login = Utc::now();

        self.store.write(SESSION_KEY, &user)?;
        info!("Session established for user: {}", user.id);
        self.current = Some(user);
        Ok(true)
    }

    /// Ends the current session. Only the session record is removed; the
    /// user's stored collections survive for the next login.
    pub fn logout(&mut self) -> Result<()> {
        if let Some(user) = self.current.take() {
            info!("Ending session for user: {}", user.id);
        }
        self.store.remove(SESSION_KEY)?;
        Ok(())
    }

    /// The currently authenticated user, if any.
    pub fn current(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// The current user, or [`MmError::NotAuthenticated`].
    pub fn require(&self) -> Result<&User> {
        self.current.as_ref().ok_or(MmError::NotAuthenticated)
    }

    /// All known user accounts. Admin-only at the command layer.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Deletes every stored collection for every known user.
    ///
    /// This is the one deliberate full-clear path; it requires an admin
    /// session and is never triggered by logout. Returns the number of store
    /// keys removed.
    pub fn purge_all_data(&self) -> Result<usize> {
        let current = self.require()?;
        if !current.is_admin() {
            return Err(MmError::PermissionDenied {
                action: "purge".to_string(),
            });
        }

        let mut removed = 0;
        for user in &self.users {
            for key in [
                mood_entries_key(&user.id),
                journal_entries_key(&user.id),
                habits_key(&user.id),
            ] {
                if self.store.exists(&key) {
                    self.store.remove(&key)?;
                    removed += 1;
                }
            }
        }
        warn!("Purged all stored collections ({} keys)", removed);
        Ok(removed)
    }
}
