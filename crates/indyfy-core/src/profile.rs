//! Accounts, roles and profile documents.
//!
//! Accounts are issued by the external identity service and only referenced
//! here. Profile documents are written once at registration and read when a
//! session starts; the client never edits them afterwards.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque account identifier issued by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An authenticated account as reported by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    /// Display name supplied by a federated provider, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Account type chosen at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Artist,
    Fan,
}

impl Role {
    pub fn all() -> &'static [Role] {
        &[Role::Artist, Role::Fan]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Artist => "artist",
            Role::Fan => "fan",
        }
    }

    /// Returns the capitalized label used in headings.
    pub fn label(self) -> &'static str {
        match self {
            Role::Artist => "Artist",
            Role::Fan => "Fan",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "artist" => Some(Role::Artist),
            "fan" => Some(Role::Fan),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile document stored under the account id.
///
/// ## Invariants
/// - Artist documents carry `follower_count` and `release_list`, never
///   `following_list`.
/// - Fan documents carry `following_list`, never the artist fields.
///
/// Use [`ProfileDocument::new`] to build one; absent fields are omitted
/// from the serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDocument {
    pub email: String,
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follower_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub following_list: Option<Vec<AccountId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_list: Option<Vec<String>>,
}

impl ProfileDocument {
    /// Builds a fresh document with the defaults for `role`.
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        role: Role,
        created_at: DateTime<Utc>,
    ) -> Self {
        let (follower_count, following_list, release_list) = match role {
            Role::Artist => (Some(0), None, Some(Vec::new())),
            Role::Fan => (None, Some(Vec::new()), None),
        };
        Self {
            email: email.into(),
            username: username.into(),
            role,
            created_at,
            follower_count,
            following_list,
            release_list,
        }
    }

    /// Returns true when only the fields belonging to `role` are populated.
    pub fn has_consistent_role_fields(&self) -> bool {
        match self.role {
            Role::Artist => {
                self.follower_count.is_some()
                    && self.release_list.is_some()
                    && self.following_list.is_none()
            }
            Role::Fan => {
                self.following_list.is_some()
                    && self.follower_count.is_none()
                    && self.release_list.is_none()
            }
        }
    }
}

/// Derives a username from an email's local part.
///
/// Used when a federated account has no display name.
pub fn default_username(email: &str) -> String {
    email
        .split('@')
        .next()
        .map(str::trim)
        .filter(|local| !local.is_empty())
        .map_or_else(|| "User".to_string(), ToString::to_string)
}
