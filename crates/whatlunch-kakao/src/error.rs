use thiserror::Error;
use whatlunch_core::PlacesError;

/// Errors returned by the Kakao Local API client.
#[derive(Debug, Error)]
pub enum KakaoError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Kakao answered with a non-2xx status.
    #[error("Kakao API error {status} ({error_type}): {message}")]
    Api {
        status: u16,
        error_type: String,
        message: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl From<KakaoError> for PlacesError {
    fn from(err: KakaoError) -> Self {
        match err {
            KakaoError::Http(e) => PlacesError::Unreachable(e.to_string()),
            KakaoError::Api {
                status, message, ..
            } => PlacesError::Rejected { status, message },
            KakaoError::Deserialize { context, source } => {
                PlacesError::Malformed(format!("{context}: {source}"))
            }
            err @ KakaoError::InvalidBaseUrl { .. } => PlacesError::Unreachable(err.to_string()),
        }
    }
}
