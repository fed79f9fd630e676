use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::Request;
use crate::errors::Result;

/// Something that can attach credentials to an outgoing request.
pub trait Authenticator {
    fn authorize(&self, request: &mut Request) -> Result<()>;
}

/// HTTP basic auth with a username and password.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    username: String,
    password: String,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        BasicAuth {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl Authenticator for BasicAuth {
    fn authorize(&self, request: &mut Request) -> Result<()> {
        let encoded = STANDARD.encode(format!("{}:{}", self.username, self.password));
        request.set_header("Authorization", format!("Basic {encoded}"));
        Ok(())
    }
}

/// OAuth 2 access token, sent as a bearer credential.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenAuth {
    token: String,
}

impl TokenAuth {
    pub fn new(token: impl Into<String>) -> Self {
        TokenAuth { token: token.into() }
    }
}

impl fmt::Debug for TokenAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAuth").field("token", &"***").finish()
    }
}

impl Authenticator for TokenAuth {
    fn authorize(&self, request: &mut Request) -> Result<()> {
        request.set_header("Authorization", format!("Bearer {}", self.token));
        Ok(())
    }
}
