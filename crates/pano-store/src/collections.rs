use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

use pano_types::models::{Board, ContactList, UserMap};

use crate::Store;

// Fixed collection keys.
pub const USERS: &str = "users";
pub const ANNOUNCEMENTS: &str = "announcements";
pub const CONTACTS: &str = "contacts";

impl Store {
    // -- Raw blob access --

    pub fn get_blob(&self, key: &str) -> Result<Option<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
            let row = stmt.query_row([key], |row| row.get(0)).optional()?;
            Ok(row)
        })
    }

    pub fn put_blob(&self, key: &str, value: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO kv (key, value, updated_at)
                 VALUES (?1, ?2, datetime('now'))
                 ON CONFLICT(key) DO UPDATE
                 SET value = excluded.value, updated_at = excluded.updated_at",
                (key, value),
            )?;
            Ok(())
        })
    }

    // -- Typed whole-collection access --

    /// Read a collection, returning the empty collection when the key has
    /// never been written. A present but undecodable blob is an error, not
    /// something to silently replace.
    pub fn read<T>(&self, key: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        match self.get_blob(key)? {
            Some(json) => {
                serde_json::from_str(&json).with_context(|| format!("corrupt `{}` blob", key))
            }
            None => Ok(T::default()),
        }
    }

    pub fn write<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        let json = serde_json::to_string(value)?;
        self.put_blob(key, &json)
    }

    // -- Collection conveniences --

    pub fn users(&self) -> Result<UserMap> {
        self.read(USERS)
    }

    pub fn save_users(&self, users: &UserMap) -> Result<()> {
        self.write(USERS, users)
    }

    pub fn announcements(&self) -> Result<Board> {
        self.read(ANNOUNCEMENTS)
    }

    pub fn save_announcements(&self, board: &Board) -> Result<()> {
        self.write(ANNOUNCEMENTS, board)
    }

    pub fn contacts(&self) -> Result<ContactList> {
        self.read(CONTACTS)
    }

    pub fn save_contacts(&self, contacts: &ContactList) -> Result<()> {
        self.write(CONTACTS, contacts)
    }
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> std::result::Result<Option<T>, rusqlite::Error>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> std::result::Result<Option<T>, rusqlite::Error> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pano_types::models::{Role, User};
    use uuid::Uuid;

    fn sample_user(username: &str) -> User {
        User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            nickname: format!("{} (nick)", username),
            password_hash: "$argon2id$stub".to_string(),
            role: Role::User,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn absent_key_reads_empty_collection() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.users().unwrap().is_empty());
        assert!(store.announcements().unwrap().is_empty());
        assert!(store.contacts().unwrap().is_empty());
    }

    #[test]
    fn blob_upsert_replaces_whole_value() {
        let store = Store::open_in_memory().unwrap();
        store.put_blob("users", "{\"a\":1}").unwrap();
        store.put_blob("users", "{\"b\":2}").unwrap();
        assert_eq!(store.get_blob("users").unwrap().unwrap(), "{\"b\":2}");
    }

    #[test]
    fn users_roundtrip() {
        let store = Store::open_in_memory().unwrap();
        let mut users = UserMap::new();
        users.insert("ayse".to_string(), sample_user("ayse"));
        store.save_users(&users).unwrap();

        let loaded = store.users().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded["ayse"].nickname, "ayse (nick)");
    }

    #[test]
    fn corrupt_blob_is_an_error() {
        let store = Store::open_in_memory().unwrap();
        store.put_blob(USERS, "not json").unwrap();
        assert!(store.users().is_err());
    }

    #[test]
    fn collections_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pano.db");

        {
            let store = Store::open(&path).unwrap();
            let mut users = UserMap::new();
            users.insert("mehmet".to_string(), sample_user("mehmet"));
            store.save_users(&users).unwrap();
        }

        let store = Store::open(&path).unwrap();
        assert!(store.users().unwrap().contains_key("mehmet"));
    }
}
