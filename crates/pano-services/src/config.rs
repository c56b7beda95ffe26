use std::collections::BTreeSet;
use std::path::PathBuf;

/// Usernames provisioned as admins when no `PANO_ADMINS` override is set.
/// Role is fixed on the account record at signup; changing the roster
/// later does not touch existing accounts.
const DEFAULT_ADMINS: &[&str] = &["TFDholderr", "BaskaAdmin"];

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    /// Accounts created with one of these usernames get the admin role.
    pub admins: BTreeSet<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("pano.db"),
            admins: DEFAULT_ADMINS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    /// Build from the environment. Loads `.env` if present, then reads
    /// `PANO_DB_PATH` and `PANO_ADMINS` (comma-separated usernames),
    /// falling back to the defaults for anything unset.
    pub fn from_env() -> Self {
        // Load .env if present
        let _ = dotenvy::dotenv();

        let db_path = std::env::var("PANO_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("pano.db"));

        let admins = match std::env::var("PANO_ADMINS") {
            Ok(raw) => parse_admins(&raw),
            Err(_) => DEFAULT_ADMINS.iter().map(|s| s.to_string()).collect(),
        };

        Self { db_path, admins }
    }

    pub fn is_provisioned_admin(&self, username: &str) -> bool {
        self.admins.contains(username)
    }
}

fn parse_admins(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
