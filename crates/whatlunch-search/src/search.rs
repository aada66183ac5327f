//! Restaurant search around an origin.
//!
//! Two interchangeable strategies feed the same filtering contract:
//!
//! - **Keyword**: one query with the genre's keyword, scoped to the radius;
//!   matches outside the food category groups are dropped.
//! - **Category**: one query per mapped category code, run concurrently and
//!   joined. A failed sub-query contributes nothing; the rest still count.
//!
//! Either way every place is re-checked against the exact radius (the
//! index's own radius handling is approximate), then deduplicated by id
//! with the first occurrence winning.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use whatlunch_core::{
    distance_m, CategoryCode, Coordinate, Genre, Location, Place, PlacesIndex, Radius,
    Restaurant, SearchScope, SearchStrategy,
};

use crate::error::SearchError;

/// Candidates found for one search, with the genre actually searched.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    /// Never [`Genre::Random`] when produced by [`RestaurantSearch::search`].
    pub genre: Genre,
    pub restaurants: Vec<Restaurant>,
}

pub struct RestaurantSearch<P> {
    index: Arc<P>,
    strategy: SearchStrategy,
}

impl<P> Clone for RestaurantSearch<P> {
    fn clone(&self) -> Self {
        Self {
            index: Arc::clone(&self.index),
            strategy: self.strategy,
        }
    }
}

impl<P: PlacesIndex> RestaurantSearch<P> {
    pub fn new(index: Arc<P>, strategy: SearchStrategy) -> Self {
        Self { index, strategy }
    }

    /// Searches for `genre` restaurants within `radius` of `origin`.
    ///
    /// [`Genre::Random`] is resolved to a concrete genre for this call only.
    ///
    /// # Errors
    ///
    /// - [`SearchError::NoResults`] if nothing survives filtering.
    /// - [`SearchError::ServiceUnavailable`] if the index could not answer.
    pub async fn search(
        &self,
        origin: &Location,
        genre: Genre,
        radius: Radius,
    ) -> Result<SearchResult, SearchError> {
        let genre = genre.resolve(&mut rand::rng());
        self.search_resolved(origin, genre, radius).await
    }

    /// Like [`RestaurantSearch::search`], for callers that already resolved
    /// [`Genre::Random`] with their own RNG. `genre` is used as given.
    ///
    /// # Errors
    ///
    /// See [`RestaurantSearch::search`].
    pub async fn search_resolved(
        &self,
        origin: &Location,
        genre: Genre,
        radius: Radius,
    ) -> Result<SearchResult, SearchError> {
        let center = origin.coordinate();

        let restaurants = match self.strategy {
            SearchStrategy::Keyword => {
                let scope = SearchScope {
                    origin: center,
                    radius,
                };
                let places = self
                    .index
                    .keyword_search(genre.keyword(), Some(scope))
                    .await
                    .map_err(|e| {
                        tracing::warn!(%genre, error = %e, "keyword search failed");
                        SearchError::ServiceUnavailable(e.to_string())
                    })?;
                let food = places.into_iter().filter(is_food_place);
                merge_candidates(center, radius, food)
            }
            SearchStrategy::Category => {
                let places = self.fan_out(genre.categories(), center, radius).await?;
                merge_candidates(center, radius, places)
            }
        };

        tracing::debug!(
            %genre,
            strategy = %self.strategy,
            radius_m = radius.meters(),
            count = restaurants.len(),
            "restaurant search finished"
        );

        if restaurants.is_empty() {
            return Err(SearchError::NoResults { radius, genre });
        }

        Ok(SearchResult { genre, restaurants })
    }

    /// Runs one category query per code and waits for all of them.
    ///
    /// Results are concatenated in `codes` order regardless of completion
    /// order. Fails only when every query failed.
    async fn fan_out(
        &self,
        codes: &[CategoryCode],
        center: Coordinate,
        radius: Radius,
    ) -> Result<Vec<Place>, SearchError> {
        let queries = codes.iter().map(|&code| async move {
            let outcome = self.index.category_search(code, center, radius).await;
            (code, outcome)
        });
        let outcomes = join_all(queries).await;

        let mut places = Vec::new();
        let mut last_error = None;
        let mut failures = 0usize;

        for (code, outcome) in outcomes {
            match outcome {
                Ok(found) => places.extend(found),
                Err(e) => {
                    tracing::warn!(%code, error = %e, "category query failed; skipping");
                    failures += 1;
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if failures == codes.len() => {
                Err(SearchError::ServiceUnavailable(e.to_string()))
            }
            _ => Ok(places),
        }
    }
}

fn is_food_place(place: &Place) -> bool {
    place
        .category_group_code
        .as_deref()
        .and_then(CategoryCode::from_code)
        .is_some()
}

/// Converts places to restaurants, keeping only distinct ids within
/// `radius` of `center`. First occurrence wins.
fn merge_candidates(
    center: Coordinate,
    radius: Radius,
    places: impl IntoIterator<Item = Place>,
) -> Vec<Restaurant> {
    let mut seen = HashSet::new();
    places
        .into_iter()
        .filter_map(|place| to_restaurant(center, place))
        .filter(|r| r.distance.is_some_and(|d| radius.contains(d)))
        .filter(|r| seen.insert(r.id.clone()))
        .collect()
}

fn to_restaurant(center: Coordinate, place: Place) -> Option<Restaurant> {
    let Some(coord) = place.coordinate() else {
        tracing::debug!(id = %place.id, "dropping place with unparseable coordinates");
        return None;
    };
    let distance = distance_m(center, coord);

    Some(Restaurant {
        id: place.id,
        name: place.name,
        address: place
            .road_address_name
            .or(place.address_name)
            .unwrap_or_default(),
        phone: place.phone,
        rating: place
            .rating
            .and_then(|r| r.trim().parse::<f64>().ok())
            .filter(|r| r.is_finite()),
        distance: Some(distance),
        lat: coord.lat,
        lng: coord.lng,
        place_url: place.place_url,
        category_name: place.category_name,
    })
}
