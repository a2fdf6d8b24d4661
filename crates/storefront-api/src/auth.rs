// Password sign-in against the backend's auth endpoint.
//
// Only the password grant is implemented; the access token is what the
// resource API expects in `Authorization: Bearer`.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;
use crate::rest::RestClient;

const TOKEN: &str = "auth/v1/token";

/// The signed-in user, as returned alongside the tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Tokens and identity from a successful sign-in.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub access_token: SecretString,
    pub refresh_token: SecretString,
    pub token_type: String,
    pub expires_in: i64,
    pub user: AuthUser,
}

#[derive(Deserialize)]
struct RawAuthSession {
    access_token: String,
    #[serde(default)]
    refresh_token: String,
    #[serde(default)]
    token_type: String,
    #[serde(default)]
    expires_in: i64,
    user: AuthUser,
}

impl From<RawAuthSession> for AuthSession {
    fn from(raw: RawAuthSession) -> Self {
        Self {
            access_token: SecretString::from(raw.access_token),
            refresh_token: SecretString::from(raw.refresh_token),
            token_type: raw.token_type,
            expires_in: raw.expires_in,
            user: raw.user,
        }
    }
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

impl RestClient {
    /// Sign in with email + password.
    ///
    /// `POST auth/v1/token?grant_type=password`. A 400 from this endpoint
    /// means bad credentials and is reported as [`Error::Authentication`].
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthSession, Error> {
        debug!(email, "signing in");
        let body = PasswordGrant {
            email,
            password: password.expose_secret(),
        };

        let raw: RawAuthSession = self
            .post(TOKEN, &[("grant_type", "password".into())], &body)
            .await
            .map_err(|err| match err {
                Error::Http {
                    status: 400,
                    message,
                    ..
                } => Error::Authentication { message },
                other => other,
            })?;

        Ok(raw.into())
    }
}
