//! User account records.
//!
//! Accounts are static demo data resolved at login; only the last-login
//! timestamp and active flag ever change after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access role for a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// A user account known to the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, used to partition stored collections
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address, used as the login identifier
    pub email: String,
    /// Role gating the administrative commands
    pub role: Role,
    /// When the account was created
    pub created_at: DateTime<Utc>,
    /// Last successful login
    pub last_login: DateTime<Utc>,
    /// Whether the account is active
    pub is_active: bool,
}

impl User {
    /// Returns true when this account may run administrative commands.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
