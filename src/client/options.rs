use std::time::Duration;

/// Per-call knobs for [`Client::validate_with_options`](crate::Client::validate_with_options).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deadline for this call only, enforced by the HTTP stack. Overrides the
    /// client-wide timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Per-call knobs for [`Client::parse_with_options`](crate::Client::parse_with_options).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    syntax_only: bool,
    request: RequestOptions,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            syntax_only: true,
            request: RequestOptions::default(),
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// When `false` the service also checks each address beyond its syntax.
    pub fn syntax_only(mut self, value: bool) -> Self {
        self.syntax_only = value;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request = self.request.with_timeout(timeout);
        self
    }

    pub fn is_syntax_only(&self) -> bool {
        self.syntax_only
    }

    pub fn request(&self) -> &RequestOptions {
        &self.request
    }
}
