//! Mailgun address validation client.
//!
//! The entry points are [`Client::validate`] and [`Client::parse`]. Each
//! call is a single authenticated GET; whatever JSON the service answers is
//! decoded and returned, whatever the HTTP status.

mod addresses;
mod error;
mod options;
mod types;

pub use addresses::AddressList;
pub use error::{DECODE_BODY_LIMIT, ValidatorError as Error};
pub use options::{ParseOptions, RequestOptions};
pub use types::{AddressParts, ParseResult, ValidationResult};

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub const DEFAULT_BASE_URL: &str = "https://api.mailgun.net/v2";

const API_USER: &str = "API";
const VALIDATE_PATH: &str = "/address/validate";
const PARSE_PATH: &str = "/address/parse";

/// Stateless client; clones share the underlying connection pool.
#[derive(Clone)]
pub struct Client {
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Serialize)]
struct ValidateQuery<'a> {
    address: &'a str,
}

#[derive(Serialize)]
struct ParseQuery<'a> {
    addresses: &'a str,
    #[serde(rename = "syntaxOnly")]
    syntax_only: bool,
}

impl Client {
    /// Client against [`DEFAULT_BASE_URL`]. The key is not checked locally;
    /// a bad key shows up as an authentication message from the service.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Validate a single address. No local syntax check or normalization is
    /// applied before sending.
    pub async fn validate(&self, address: &str) -> Result<ValidationResult, Error> {
        self.validate_with_options(address, &RequestOptions::default())
            .await
    }

    pub async fn validate_with_options(
        &self,
        address: &str,
        options: &RequestOptions,
    ) -> Result<ValidationResult, Error> {
        self.get(VALIDATE_PATH, &ValidateQuery { address }, options)
            .await
    }

    /// Parse a batch of addresses with `syntaxOnly=true`.
    pub async fn parse(&self, addresses: impl Into<AddressList>) -> Result<ParseResult, Error> {
        self.parse_with_options(addresses, &ParseOptions::default())
            .await
    }

    pub async fn parse_with_options(
        &self,
        addresses: impl Into<AddressList>,
        options: &ParseOptions,
    ) -> Result<ParseResult, Error> {
        let addresses = addresses.into();
        let query = ParseQuery {
            addresses: addresses.as_str(),
            syntax_only: options.is_syntax_only(),
        };
        self.get(PARSE_PATH, &query, options.request()).await
    }

    async fn get<T, Q>(&self, path: &str, query: &Q, options: &RequestOptions) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .http
            .get(&url)
            .query(query)
            .basic_auth(API_USER, Some(&self.api_key));
        if let Some(timeout) = options.timeout() {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|err| {
            tracing::warn!(%url, error = %err, "mailgun request failed");
            Error::transport(err)
        })?;

        let status = response.status().as_u16();
        tracing::debug!(%url, status, "mailgun response received");

        let body = response.bytes().await.map_err(Error::transport)?;
        serde_json::from_slice(&body).map_err(|err| Error::decode(status, &body, err))
    }
}

/// Builder for [`Client`] when the defaults do not fit (proxies, tests,
/// client-wide timeout).
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    api_key: String,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClientBuilder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            user_agent: None,
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> Result<Client, Error> {
        let base_url = normalize_base_url(&self.base_url)?;

        let mut http = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            http = http.user_agent(user_agent);
        }
        let http = http.build().map_err(Error::client_init)?;

        Ok(Client {
            api_key: self.api_key,
            base_url,
            http,
        })
    }
}

pub(crate) fn normalize_base_url(input: &str) -> Result<String, Error> {
    let trimmed = input.trim().trim_end_matches('/');
    url::Url::parse(trimmed).map_err(|err| Error::invalid_base_url(trimmed, err))?;
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests;
