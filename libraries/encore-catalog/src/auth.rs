//! Salted token authentication for Subsonic servers.
//!
//! Every request carries `u`, `t = md5(password + salt)` and `s`, plus the
//! protocol version, the client name and `f=json`. A fresh salt is drawn per
//! request so the token is never replayable.

use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

/// Subsonic REST protocol version spoken by this client
pub const API_VERSION: &str = "1.16.1";

const SALT_LEN: usize = 12;

/// Authentication query parameters for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthParams {
    pub username: String,
    pub token: String,
    pub salt: String,
    pub client: String,
}

impl AuthParams {
    /// Sign with a freshly generated salt.
    pub fn generate(username: &str, password: &str, client: &str) -> Self {
        let salt: String = thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SALT_LEN)
            .map(char::from)
            .collect();
        Self::with_salt(username, password, client, salt)
    }

    /// Sign with a caller-supplied salt.
    pub fn with_salt(username: &str, password: &str, client: &str, salt: impl Into<String>) -> Self {
        let salt = salt.into();
        Self {
            username: username.to_string(),
            token: token(password, &salt),
            salt,
            client: client.to_string(),
        }
    }

    /// Query pairs in the order Subsonic documents them.
    pub fn query(&self) -> [(&'static str, &str); 6] {
        [
            ("u", self.username.as_str()),
            ("t", self.token.as_str()),
            ("s", self.salt.as_str()),
            ("v", API_VERSION),
            ("c", self.client.as_str()),
            ("f", "json"),
        ]
    }
}

/// `md5(password + salt)` as lowercase hex.
pub fn token(password: &str, salt: &str) -> String {
    format!("{:x}", md5::compute(format!("{}{}", password, salt).as_bytes()))
}
