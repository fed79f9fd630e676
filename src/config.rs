use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::api::{Authenticator, BasicAuth, TokenAuth};
use crate::errors::Result;

pub const DEFAULT_BASE_URL: &str = "https://api.openstreetmap.org";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("osm-edit/", env!("CARGO_PKG_VERSION"));

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CredentialsConfig {
    Basic { username: String, password: String },
    Token { token: String },
}

impl CredentialsConfig {
    pub fn authenticator(&self) -> Box<dyn Authenticator> {
        match self {
            CredentialsConfig::Basic { username, password } => Box::new(BasicAuth::new(username, password)),
            CredentialsConfig::Token { token } => Box::new(TokenAuth::new(token)),
        }
    }
}

/// Connection settings. Every field may be left out of the config file.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Applied to every call, connect and read alike.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub credentials: Option<CredentialsConfig>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            credentials: None,
        }
    }
}

impl ClientConfig {
    pub fn load(path: &Path) -> Result<ClientConfig> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Absolute URL for an API path such as `/node/1`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url.trim_end_matches('/'), crate::api::API_PREFIX, path)
    }
}
