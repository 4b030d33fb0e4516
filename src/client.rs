//! Blocking HTTP client for the content API

use std::fmt;
use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::{JwtAppConfig, request_token};
use crate::error::{Error, Result};
use crate::tree::{FolderListing, Item, ItemPage};

pub const DEFAULT_API_BASE: &str = "https://api.box.com/2.0";
pub const DEFAULT_TOKEN_URL: &str = "https://api.box.com/oauth2/token";

/// Endpoints and transport settings for [`BoxClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base: String,
    pub token_url: String,
    /// Per-request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            timeout: None,
        }
    }
}

/// The authenticated user.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub login: String,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// A client holding an access token. Every call blocks until the
/// response arrives.
pub struct BoxClient {
    http: Client,
    api_base: Url,
    access_token: String,
}

impl fmt::Debug for BoxClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxClient")
            .field("api_base", &self.api_base.as_str())
            .field("access_token", &"[censored]")
            .finish()
    }
}

impl BoxClient {
    /// Exchange the app's assertion for a token and build a client with it.
    pub fn authenticate(app: &JwtAppConfig, config: &ClientConfig) -> Result<Self> {
        let api_base = parse_api_base(&config.api_base)?;
        let http = build_http(config)?;
        let token = request_token(&http, &config.token_url, app)?;
        Ok(Self {
            http,
            api_base,
            access_token: token.access_token,
        })
    }

    /// Build a client around an access token obtained elsewhere.
    pub fn with_access_token(access_token: impl Into<String>, config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            api_base: parse_api_base(&config.api_base)?,
            http: build_http(config)?,
            access_token: access_token.into(),
        })
    }

    pub fn current_user(&self) -> Result<User> {
        self.get(&["users", "me"], &[("fields", "id,name,login".to_string())])
    }

    /// Fetch a single folder's own information.
    pub fn get_folder(&self, folder_id: &str, fields: &[String]) -> Result<Item> {
        self.get(&["folders", folder_id], &[("fields", fields.join(","))])
    }

    /// The API base with `segments` appended, each percent-encoded as a
    /// single path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| Error::ApiBase {
                url: self.api_base.to_string(),
                message: "cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get<T: DeserializeOwned>(&self, segments: &[&str], query: &[(&str, String)]) -> Result<T> {
        let url = self.endpoint(segments)?;
        debug!(%url, "GET");
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .query(query)
            .send()?;
        Ok(check_status(response)?.json()?)
    }
}

impl FolderListing for BoxClient {
    fn list_items(
        &self,
        folder_id: &str,
        limit: usize,
        offset: usize,
        fields: &[String],
    ) -> Result<ItemPage> {
        self.get(
            &["folders", folder_id, "items"],
            &[
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
                ("fields", fields.join(",")),
            ],
        )
    }
}

fn parse_api_base(api_base: &str) -> Result<Url> {
    let url = Url::parse(api_base).map_err(|e| Error::ApiBase {
        url: api_base.to_string(),
        message: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(Error::ApiBase {
            url: api_base.to_string(),
            message: "cannot be a base".to_string(),
        });
    }
    Ok(url)
}

fn build_http(config: &ClientConfig) -> Result<Client> {
    let http = Client::builder()
        .user_agent(concat!("boxtree/", env!("CARGO_PKG_VERSION")))
        .timeout(config.timeout)
        .build()?;
    Ok(http)
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    let (code, message) = match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(e) => (e.code, e.message),
        Err(_) => (String::new(), body),
    };
    Err(Error::Api {
        status: status.as_u16(),
        code,
        message,
    })
}
