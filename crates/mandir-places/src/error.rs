use thiserror::Error;

/// Errors returned by the places provider client and the temple resolver.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    ///
    /// The request URL is stripped on conversion since it carries the API key.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// The provider answered with a status other than `OK` / `ZERO_RESULTS`.
    #[error("places API error ({status}): {message}")]
    Upstream { status: String, message: String },

    /// The provider answered with a non-2xx HTTP status.
    #[error("unexpected HTTP status {status} from {endpoint}")]
    UnexpectedStatus { status: u16, endpoint: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid places base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl From<reqwest::Error> for PlacesError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}

impl PlacesError {
    /// Builds a [`PlacesError::Upstream`] from a provider status and its
    /// optional `error_message`.
    #[must_use]
    pub fn upstream(status: &str, message: Option<&str>) -> Self {
        Self::Upstream {
            status: status.to_owned(),
            message: message.map_or_else(
                || format!("Google API returned: {status}"),
                ToOwned::to_owned,
            ),
        }
    }
}
