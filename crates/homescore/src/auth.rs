//! Session seam: maps presented bearer credentials to a [`UserId`].

use std::collections::HashMap;

use axum::http::{header, HeaderMap};

use crate::config::AuthConfig;
use crate::predictions::UserId;

/// Resolves a session credential. Identity management itself lives elsewhere.
pub trait SessionAuthenticator: Send + Sync {
    fn authenticate(&self, token: &str) -> Option<UserId>;
}

/// Fixed token table loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticSessionAuthenticator {
    sessions: HashMap<String, UserId>,
}

impl StaticSessionAuthenticator {
    pub fn new(sessions: impl IntoIterator<Item = (String, UserId)>) -> Self {
        Self {
            sessions: sessions.into_iter().collect(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.sessions.iter().cloned())
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl SessionAuthenticator for StaticSessionAuthenticator {
    fn authenticate(&self, token: &str) -> Option<UserId> {
        self.sessions.get(token).cloned()
    }
}

/// Extract the credential from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(char::is_whitespace)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

pub fn authenticate_headers(
    authenticator: &dyn SessionAuthenticator,
    headers: &HeaderMap,
) -> Option<UserId> {
    bearer_token(headers).and_then(|token| authenticator.authenticate(token))
}
