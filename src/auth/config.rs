//! JWT app configuration file

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Contents of the JSON configuration file downloaded for a JWT app.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JwtAppConfig {
    pub box_app_settings: AppSettings,
    #[serde(rename = "enterpriseID")]
    pub enterprise_id: String,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(rename = "clientID")]
    pub client_id: String,
    pub client_secret: String,
    pub app_auth: AppAuth,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppAuth {
    #[serde(rename = "publicKeyID")]
    pub public_key_id: String,
    /// PEM private key; usually an encrypted PKCS#8 key.
    pub private_key: String,
    #[serde(default)]
    pub passphrase: String,
}

impl JwtAppConfig {
    /// Load the configuration from a file.
    ///
    /// Fails without touching the network if the path is not a file or
    /// the content is not a JWT app configuration.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl fmt::Debug for JwtAppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtAppConfig")
            .field("client_id", &self.box_app_settings.client_id)
            .field("client_secret", &"[censored]")
            .field("public_key_id", &self.box_app_settings.app_auth.public_key_id)
            .field("private_key", &"[censored]")
            .field("passphrase", &"[censored]")
            .field("enterprise_id", &self.enterprise_id)
            .finish()
    }
}
