use thiserror::Error;

/// Service-level failures surfaced to the embedding UI. A failed
/// operation writes nothing; prior persisted state is untouched.
#[derive(Debug, Error)]
pub enum Error {
    #[error("username `{0}` is already taken")]
    DuplicateUser(String),

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("username and password are required")]
    MissingCredentials,

    #[error("this operation requires an admin account")]
    Unauthorized,

    #[error("no contact at index {0}")]
    NotFound(usize),

    #[error("message text cannot be empty")]
    EmptyMessage,

    #[error("unknown section `{0}`")]
    UnknownSection(String),

    /// Storage or hashing failure below the service layer.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_messages() {
        assert_eq!(
            Error::DuplicateUser("ayse".into()).to_string(),
            "username `ayse` is already taken"
        );
        assert_eq!(Error::NotFound(3).to_string(), "no contact at index 3");
    }
}
