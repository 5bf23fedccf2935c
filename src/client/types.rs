use serde::{Deserialize, Serialize};

/// Body returned by `GET /address/validate`.
///
/// Fields absent from the body fall back to their defaults and unknown
/// fields are ignored, so error payloads such as `{"message": "..."}` still
/// decode; inspect [`message`](Self::message) to tell them apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub address: String,
    pub parts: AddressParts,
    pub did_you_mean: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressParts {
    pub local_part: Option<String>,
    pub domain: Option<String>,
    pub display_name: Option<String>,
}

impl ValidationResult {
    /// Correction proposed by the service, ignoring empty strings.
    pub fn suggestion(&self) -> Option<&str> {
        self.did_you_mean
            .as_deref()
            .filter(|value| !value.trim().is_empty())
    }
}

/// Body returned by `GET /address/parse`. Order follows the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseResult {
    pub parsed: Vec<String>,
    pub unparseable: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ParseResult {
    pub fn all_parsed(&self) -> bool {
        self.unparseable.is_empty() && self.message.is_none()
    }
}
