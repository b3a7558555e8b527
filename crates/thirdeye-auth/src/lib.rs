//! ThirdEye session & auth plumbing
//! Thin clients for the backend auth endpoints and the frontend's client environment

pub mod error;
pub mod session;
pub mod http;
pub mod logout;
pub mod env;

pub use error::AuthError;
pub use session::{Session, SessionProvider, restore_session};
pub use http::HttpAuthenticator;
pub use logout::logout;
pub use env::{ClientEnv, EnvOptions};
