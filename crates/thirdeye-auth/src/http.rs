// HTTP authenticator for the backend's /auth endpoints

use crate::error::AuthError;
use crate::session::{Session, SessionProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const AUTH_PRINCIPAL: &str = "torii google auth";

#[derive(Debug, Clone)]
pub struct HttpAuthenticator {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct Credentials<'a> {
    principal: &'a str,
    code: &'a str,
}

#[derive(Deserialize)]
struct AuthResponse {
    #[serde(alias = "session")]
    token: String,
}

impl HttpAuthenticator {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn rejected(response: reqwest::Response) -> AuthError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    AuthError::Rejected { status, body }
}

#[async_trait]
impl SessionProvider for HttpAuthenticator {
    async fn authenticate(&self, auth_code: &str) -> Result<Session, AuthError> {
        let credentials = Credentials {
            principal: AUTH_PRINCIPAL,
            code: auth_code,
        };

        // .json() sets content-type: application/json
        let response = self
            .client
            .post(self.url("/auth/authenticate"))
            .json(&credentials)
            .send()
            .await?;

        if !response.status().is_success() {
            let err = rejected(response).await;
            warn!("authentication rejected: {}", err);
            return Err(err);
        }

        let result: AuthResponse = response.json().await?;
        info!("authenticated against {}", self.base_url);
        Ok(Session::new(result.token))
    }

    async fn invalidate(&self) -> Result<(), AuthError> {
        let response = self.client.get(self.url("/auth/logout")).send().await?;

        if !response.status().is_success() {
            return Err(rejected(response).await);
        }
        info!("session invalidated");
        Ok(())
    }
}
