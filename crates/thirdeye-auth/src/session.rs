// Session model and the provider contract the frontend routes rely on

use crate::error::AuthError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An authenticated session as persisted by the session store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "session", alias = "token")]
    pub token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Exchange an authorization code for a session
    async fn authenticate(&self, auth_code: &str) -> Result<Session, AuthError>;

    /// End the current session on the backend
    async fn invalidate(&self) -> Result<(), AuthError>;

    /// Rebuild a session from persisted data, fails when nothing was persisted
    fn restore(&self, persisted: &Value) -> Result<Session, AuthError> {
        restore_session(persisted)
    }
}

pub fn restore_session(persisted: &Value) -> Result<Session, AuthError> {
    let empty = match persisted {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    };
    if empty {
        return Err(AuthError::EmptySession);
    }

    Ok(serde_json::from_value(persisted.clone())?)
}
