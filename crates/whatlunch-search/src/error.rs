use thiserror::Error;
use whatlunch_core::{Genre, Radius, SelectError};

/// Failures of geocoding, searching and selecting. Every message is
/// written to be shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Neither place-name nor address lookup matched the query.
    #[error("could not find that address or place; please try a different input")]
    NotFound { query: String },

    /// Nothing survived filtering within the radius.
    #[error("no {genre} restaurants found within {radius}")]
    NoResults { radius: Radius, genre: Genre },

    /// The places index could not be reached or refused the request.
    #[error("restaurant search is unavailable right now: {0}")]
    ServiceUnavailable(String),

    /// A re-roll excluded the only remaining candidate.
    #[error("no more restaurants to recommend")]
    EmptyCandidates,
}

impl From<SelectError> for SearchError {
    fn from(err: SelectError) -> Self {
        match err {
            SelectError::EmptyCandidates => SearchError::EmptyCandidates,
        }
    }
}
