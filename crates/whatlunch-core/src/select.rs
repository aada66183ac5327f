//! Uniform random selection over a candidate list.

use rand::Rng;
use thiserror::Error;

use crate::restaurant::Restaurant;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    #[error("no restaurants left to choose from")]
    EmptyCandidates,
}

/// Picks one candidate uniformly at random.
///
/// When `exclude` is given, every candidate sharing its `id` is removed
/// before the draw. No weighting by rating, distance or anything else.
///
/// # Errors
///
/// Returns [`SelectError::EmptyCandidates`] if nothing remains to draw from.
pub fn pick<R: Rng>(
    candidates: &[Restaurant],
    exclude: Option<&Restaurant>,
    rng: &mut R,
) -> Result<Restaurant, SelectError> {
    let remaining: Vec<&Restaurant> = candidates
        .iter()
        .filter(|c| exclude.is_none_or(|x| x.id != c.id))
        .collect();

    if remaining.is_empty() {
        return Err(SelectError::EmptyCandidates);
    }

    let index = rng.random_range(0..remaining.len());
    Ok(remaining[index].clone())
}
