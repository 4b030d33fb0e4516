//! Service account authentication with the JWT bearer grant
//!
//! A JWT app configuration file holds the client credentials and an RSA
//! key. The key signs a short-lived assertion which the token endpoint
//! exchanges for an access token for the enterprise's service account.

mod config;
mod jws;

use std::fmt;
use std::path::Path;

use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info};

use crate::client::{BoxClient, ClientConfig};
use crate::error::{Error, Result};

pub use config::{AppAuth, AppSettings, JwtAppConfig};
pub use jws::{JwsClaims, JwsHeader, load_private_key, sign};

pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// The `aud` claim the token endpoint expects, whatever URL it is reached at.
pub const TOKEN_AUDIENCE: &str = "https://api.box.com/oauth2/token";

/// An OAuth 2.0 access token.
#[derive(Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"[censored]")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

#[derive(Deserialize)]
struct TokenErrorBody {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

impl JwtAppConfig {
    /// Build and sign a fresh assertion for the enterprise service account.
    pub fn assertion(&self) -> Result<String> {
        let settings = &self.box_app_settings;
        let key = load_private_key(&settings.app_auth.private_key, &settings.app_auth.passphrase)?;
        let header = JwsHeader::rs256(&settings.app_auth.public_key_id);
        let claims = JwsClaims::new(
            &settings.client_id,
            &self.enterprise_id,
            TOKEN_AUDIENCE,
            Utc::now(),
        );
        sign(&header, &claims, &key)
    }
}

/// Exchange a signed assertion for an access token.
pub fn request_token(
    http: &reqwest::blocking::Client,
    token_url: &str,
    app: &JwtAppConfig,
) -> Result<AccessToken> {
    let assertion = app.assertion()?;
    debug!(token_url, "requesting access token");

    let response = http
        .post(token_url)
        .form(&[
            ("grant_type", JWT_BEARER_GRANT),
            ("assertion", assertion.as_str()),
            ("client_id", app.box_app_settings.client_id.as_str()),
            ("client_secret", app.box_app_settings.client_secret.as_str()),
        ])
        .send()
        .map_err(Error::TokenRequest)?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        let message = match serde_json::from_str::<TokenErrorBody>(&body) {
            Ok(e) => match e.error_description {
                Some(description) => format!("{}: {}", e.error, description),
                None => e.error,
            },
            Err(_) => body,
        };
        return Err(Error::Auth {
            status: status.as_u16(),
            message,
        });
    }

    let token: AccessToken = response.json().map_err(Error::TokenRequest)?;
    info!(expires_in = ?token.expires_in, "authenticated as service account");
    Ok(token)
}

/// Load the configuration file at `path` and return an authenticated client.
///
/// A missing or malformed file fails before any network activity.
pub fn authenticate(path: &Path, config: &ClientConfig) -> Result<BoxClient> {
    let app = JwtAppConfig::from_file(path)?;
    BoxClient::authenticate(&app, config)
}
