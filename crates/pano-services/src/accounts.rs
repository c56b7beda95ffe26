use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use pano_types::models::{Role, Session, User};
use pano_types::{Error, Result};

use crate::App;

impl App {
    /// Create a new account. The role is fixed here, at creation time,
    /// from the provisioned admin roster in the config.
    pub fn signup(&self, username: &str, nickname: &str, password: &str) -> Result<User> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(Error::MissingCredentials);
        }

        let mut users = self.store().users()?;
        if users.contains_key(username) {
            return Err(Error::DuplicateUser(username.to_string()));
        }

        let role = if self.config().is_provisioned_admin(username) {
            Role::Admin
        } else {
            Role::User
        };

        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            nickname: nickname.to_string(),
            password_hash: hash_password(password)?,
            role,
            created_at: Utc::now(),
        };

        users.insert(username.to_string(), user.clone());
        self.store().save_users(&users)?;

        info!(username, admin = role.is_admin(), "account created");
        Ok(user)
    }

    /// Authenticate and hand back a session for the embedding process to
    /// carry. Unknown username and wrong password are indistinguishable.
    pub fn login(&self, username: &str, password: &str) -> Result<Session> {
        let users = self.store().users()?;
        let user = users.get(username).ok_or(Error::InvalidCredentials)?;

        verify_password(password, &user.password_hash)?;

        info!(username, "login ok");
        Ok(Session {
            user_id: user.id,
            username: user.username.clone(),
            nickname: user.nickname.clone(),
            role: user.role,
            logged_in_at: Utc::now(),
        })
    }

    /// Sessions are plain values; logging out is dropping the session.
    /// No persisted state changes.
    pub fn logout(&self, session: Session) {
        info!(username = %session.username, "logged out");
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("password hashing failed: {}", e))?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, hash: &str) -> Result<()> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("corrupt password hash: {}", e))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| Error::InvalidCredentials)
}
