use thiserror::Error;

/// Outcome categories of a failed chat request.
///
/// The `Display` text of each variant is the answer shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatFailure {
    #[error("Authentication failed. Please check your API key.")]
    Authentication,
    #[error("Failed to connect to OpenAI servers. Please check your internet connection.")]
    Connectivity,
    #[error("Rate limit exceeded. Please wait and try again.")]
    RateLimit,
    #[error("Unexpected error: {0}")]
    Unclassified(String),
}

impl ChatFailure {
    pub fn unclassified(description: impl Into<String>) -> Self {
        Self::Unclassified(description.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::Connectivity => "connectivity",
            Self::RateLimit => "rate_limit",
            Self::Unclassified(_) => "unclassified",
        }
    }
}
