// Logout flow: end the session, then hand back the headers the logout page is loaded with

use crate::error::AuthError;
use crate::session::{Session, SessionProvider};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::debug;

pub async fn logout<P>(provider: &P, session: Option<&Session>) -> Result<HeaderMap, AuthError>
where
    P: SessionProvider + ?Sized,
{
    provider.invalidate().await?;

    let mut headers = HeaderMap::new();
    if let Some(session) = session.filter(|s| !s.token.is_empty()) {
        debug!("attaching session token to logout headers");
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Token {}", session.token))?,
        );
    }
    Ok(headers)
}
