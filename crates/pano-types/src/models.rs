use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// Account record. Immutable once created; `username` is the unique key
/// in the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub nickname: String,
    /// Argon2id PHC string, never the plaintext.
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// The three fixed announcement sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Dev,
    News,
    General,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Dev, Section::News, Section::General];

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Dev => "dev",
            Section::News => "news",
            Section::General => "general",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Section::Dev),
            "news" => Ok(Section::News),
            "general" => Ok(Section::General),
            other => Err(Error::UnknownSection(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    pub text: String,
    /// Username of the posting admin.
    pub posted_by: String,
    pub posted_at: DateTime<Utc>,
}

/// One message inside a contact thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    /// Username of the author (the ticket owner or an admin).
    pub sender: String,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

/// A support ticket filed by a user. Contacts are never deleted; the
/// message thread only grows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: Uuid,
    /// Username of the filing user.
    pub owner: String,
    pub display_name: String,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
}

/// In-memory identity of a logged-in account, passed explicitly to every
/// service call that needs one. Deliberately not serializable: sessions
/// live only as long as the embedding process.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    pub username: String,
    pub nickname: String,
    pub role: Role,
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

// Whole-collection blob shapes as persisted under their store keys.

pub type UserMap = BTreeMap<String, User>;
pub type Board = BTreeMap<Section, Vec<Announcement>>;
pub type ContactList = Vec<Contact>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_names_roundtrip() {
        for section in Section::ALL {
            assert_eq!(section.as_str().parse::<Section>().unwrap(), section);
        }
    }

    #[test]
    fn unknown_section_rejected() {
        let err = "blog".parse::<Section>().unwrap_err();
        assert!(matches!(err, Error::UnknownSection(s) if s == "blog"));
    }

    #[test]
    fn section_serializes_lowercase() {
        let json = serde_json::to_string(&Section::General).unwrap();
        assert_eq!(json, "\"general\"");
    }

    #[test]
    fn role_admin_flag() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::User.is_admin());
    }
}
