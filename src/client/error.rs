use thiserror::Error;

pub const DECODE_BODY_LIMIT: usize = 512;

/// Errors raised by [`Client`](crate::Client) calls.
///
/// Remote 4xx/5xx answers are not errors: their JSON body is handed back as
/// an ordinary result.
#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("HTTP client initialization failed: {source}")]
    ClientInit {
        #[source]
        source: reqwest::Error,
    },
    #[error("request failed: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },
    #[error("response body (HTTP {status}) is not the expected JSON: {source}; body: {body:?}")]
    Decode {
        status: u16,
        /// Start of the raw body, at most [`DECODE_BODY_LIMIT`] bytes.
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ValidatorError {
    pub(crate) fn invalid_base_url(url: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidBaseUrl {
            url: url.into(),
            source,
        }
    }

    pub(crate) fn client_init(source: reqwest::Error) -> Self {
        Self::ClientInit { source }
    }

    pub(crate) fn transport(source: reqwest::Error) -> Self {
        Self::Transport { source }
    }

    pub(crate) fn decode(status: u16, raw: &[u8], source: serde_json::Error) -> Self {
        Self::Decode {
            status,
            body: body_excerpt(raw),
            source,
        }
    }

    /// `true` when the failure happened before any HTTP response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

fn body_excerpt(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    let text = text.trim();
    if text.len() <= DECODE_BODY_LIMIT {
        return text.to_string();
    }
    let mut end = DECODE_BODY_LIMIT;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}
