use serde::{Deserialize, Serialize};

/// The envelope decoded fine but does not carry a usable payload.
#[derive(Debug, Clone, PartialEq)]
pub enum EnvelopeError {
    Unsuccessful(String),
    MissingData,
}

impl std::fmt::Display for EnvelopeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvelopeError::Unsuccessful(msg) => write!(f, "Request unsuccessful: {}", msg),
            EnvelopeError::MissingData => write!(f, "Response carried no data"),
        }
    }
}

impl std::error::Error for EnvelopeError {}

/// Shape of an error response body. Every field is optional because proxies
/// and crashed handlers do not always answer with the envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    /// Best human readable reason, preferring `message` over `error`.
    pub fn summary(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .filter(|s| !s.is_empty())
    }
}
