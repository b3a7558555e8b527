// Client environment: the .env keys the frontend is allowed to see

use crate::error::AuthError;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, warn};

pub const GOOGLE_CLIENT_ID: &str = "GOOGLE_CLIENT_ID";
pub const GOOGLE_AUTH_REDIRECT_URL: &str = "GOOGLE_AUTH_REDIRECT_URL";

#[derive(Debug, Clone)]
pub struct EnvOptions {
    // keys exposed to the client, everything else in the file is ignored
    pub allowed_keys: Vec<String>,

    // error out when an allowed key has no value
    pub fail_on_missing_key: bool,

    pub path: PathBuf,
}

impl Default for EnvOptions {
    fn default() -> Self {
        Self {
            allowed_keys: vec![
                GOOGLE_CLIENT_ID.to_string(),
                GOOGLE_AUTH_REDIRECT_URL.to_string(),
            ],
            fail_on_missing_key: false,
            path: PathBuf::from(".env"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClientEnv {
    values: HashMap<String, String>,
}

impl ClientEnv {
    /// Read the allowed keys from the .env file, falling back to the process environment.
    /// A missing file is treated as empty.
    pub fn load(options: &EnvOptions) -> Result<Self, AuthError> {
        let mut file_values = HashMap::new();

        match dotenvy::from_path_iter(&options.path) {
            Ok(iter) => {
                for item in iter {
                    let (key, value) = item?;
                    file_values.insert(key, value);
                }
            }
            Err(e) if e.not_found() => {
                debug!(path = %options.path.display(), "no .env file, using process environment");
            }
            Err(e) => return Err(e.into()),
        }

        let mut values = HashMap::new();
        for key in &options.allowed_keys {
            let value = file_values
                .remove(key)
                .or_else(|| std::env::var(key).ok());

            match value {
                Some(v) => {
                    values.insert(key.clone(), v);
                }
                None if options.fail_on_missing_key => {
                    return Err(AuthError::MissingKey(key.clone()));
                }
                None => warn!(key = %key, "client environment key not set"),
            }
        }

        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn google_client_id(&self) -> Option<&str> {
        self.get(GOOGLE_CLIENT_ID)
    }

    pub fn google_auth_redirect_url(&self) -> Option<&str> {
        self.get(GOOGLE_AUTH_REDIRECT_URL)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
