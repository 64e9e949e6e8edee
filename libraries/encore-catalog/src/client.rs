//! Subsonic REST client.

use crate::auth::AuthParams;
use crate::config::ClientSettings;
use crate::error::{ClientError, Result};
use crate::types::{ServerConfig, SubsonicEnvelope, SubsonicResponse};
use reqwest::Client;
use tracing::{debug, info, warn};

/// Client for a Subsonic-compatible server.
///
/// Every call is signed with a fresh salted token; there is no session to
/// log in to or refresh.
///
/// # Example
///
/// ```ignore
/// use encore_catalog::{ServerConfig, SubsonicClient};
///
/// let config = ServerConfig::new("https://music.example.com", "alice", "sesame");
/// let client = SubsonicClient::new(config)?;
///
/// client.ping().await?;
/// let album = client.get_album("al-1").await?;
/// println!("{} has {} songs", album.name, album.song.len());
/// ```
#[derive(Clone)]
pub struct SubsonicClient {
    http: Client,
    config: ServerConfig,
    client_name: String,
}

impl SubsonicClient {
    /// Create a new client with default timeouts.
    pub fn new(config: ServerConfig) -> Result<Self> {
        let settings = ClientSettings {
            server: config,
            ..ClientSettings::default()
        };
        Self::from_settings(&settings)
    }

    /// Create a client from loaded settings.
    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        let url = normalize_url(&settings.server.url)?;

        let http = Client::builder()
            .timeout(settings.request_timeout())
            .connect_timeout(settings.connect_timeout())
            .user_agent(format!("Encore/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: ServerConfig {
                url,
                ..settings.server.clone()
            },
            client_name: settings.client.name.clone(),
        })
    }

    /// Normalized server URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Test the connection and the credentials.
    pub async fn ping(&self) -> Result<()> {
        let response = self.call("ping", &[]).await?;
        info!(
            url = %self.config.url,
            version = response.version.as_deref().unwrap_or("unknown"),
            "Connected to server"
        );
        Ok(())
    }

    /// Issue one signed GET to `/rest/<endpoint>` and unwrap the envelope.
    pub(crate) async fn call(&self, endpoint: &str, params: &[(&str, String)]) -> Result<SubsonicResponse> {
        let url = format!("{}/rest/{}", self.config.url, endpoint);
        let auth = AuthParams::generate(&self.config.username, &self.config.password, &self.client_name);

        debug!(url = %url, endpoint, "Subsonic request");

        let response = self
            .http
            .get(&url)
            .query(&auth.query())
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    ClientError::ServerUnreachable(e.to_string())
                } else {
                    ClientError::Request(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClientError::ServerError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let envelope: SubsonicEnvelope = response.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse {} response: {}", endpoint, e))
        })?;
        let body = envelope.response;

        if body.is_ok() {
            return Ok(body);
        }

        let (code, message) = body
            .error
            .map(|e| (e.code, e.message))
            .unwrap_or((0, "Unknown error".to_string()));
        warn!(endpoint, code, message = %message, "Subsonic request failed");
        Err(ClientError::Subsonic { code, message })
    }
}

impl std::fmt::Debug for SubsonicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubsonicClient")
            .field("url", &self.config.url)
            .field("username", &self.config.username)
            .field("client_name", &self.client_name)
            .finish_non_exhaustive()
    }
}

/// Trim trailing slashes and require an http(s) scheme.
fn normalize_url(raw: &str) -> Result<String> {
    if raw.trim().is_empty() {
        return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
    }

    let url = raw.trim().trim_end_matches('/').to_string();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }

    Ok(url)
}
