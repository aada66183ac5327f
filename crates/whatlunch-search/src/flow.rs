//! The recommendation flow: validate → geocode → search → pick.
//!
//! [`Flow`] owns the user-facing state of one lunch decision. Intents
//! (`edit_location`, `choose_genre`, `submit`, `reroll`) mutate it; a
//! presentation layer renders [`Flow::view`]. Every intent takes
//! `&mut self`, so one flow never runs two chains at once.

use std::fmt;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use thiserror::Error;
use whatlunch_core::{pick, Genre, Location, PlacesIndex, Radius, Restaurant, SearchStrategy};

use crate::error::SearchError;
use crate::geocode::Geocoder;
use crate::search::RestaurantSearch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    AwaitingGeocode,
    AwaitingSearch,
    Ready,
    Error,
}

impl Phase {
    #[must_use]
    pub const fn is_loading(self) -> bool {
        matches!(self, Phase::AwaitingGeocode | Phase::AwaitingSearch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a location")]
    MissingLocation,
    #[error("Please choose a food genre")]
    MissingGenre,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("{}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    #[error(transparent)]
    Search(#[from] SearchError),

    /// Re-roll was requested before any successful search.
    #[error("search for restaurants before asking for another one")]
    NotReady,
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// User-facing messages, one slot per input they belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl FieldErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.genre.is_none() && self.search.is_none()
    }
}

/// Render-ready snapshot of a [`Flow`].
#[derive(Debug, Clone, Serialize)]
pub struct FlowView {
    pub phase: Phase,
    pub loading: bool,
    pub location_text: String,
    pub genre: Option<Genre>,
    /// The concrete genre last searched; differs from `genre` only for
    /// [`Genre::Random`].
    pub resolved_genre: Option<Genre>,
    pub radius_m: u32,
    pub origin: Option<Location>,
    pub selection: Option<Restaurant>,
    pub errors: FieldErrors,
}

pub struct Flow<P> {
    geocoder: Geocoder<P>,
    search: RestaurantSearch<P>,
    radius: Radius,
    rng: StdRng,
    location_text: String,
    genre: Option<Genre>,
    resolved_genre: Option<Genre>,
    errors: FieldErrors,
    origin: Option<Location>,
    selection: Option<Restaurant>,
    phase: Phase,
}

impl<P: PlacesIndex> Flow<P> {
    pub fn new(index: Arc<P>, strategy: SearchStrategy, radius: Radius) -> Self {
        Self::with_rng(index, strategy, radius, StdRng::from_os_rng())
    }

    /// A flow whose genre resolution and picks are reproducible.
    pub fn with_seed(index: Arc<P>, strategy: SearchStrategy, radius: Radius, seed: u64) -> Self {
        Self::with_rng(index, strategy, radius, StdRng::seed_from_u64(seed))
    }

    fn with_rng(index: Arc<P>, strategy: SearchStrategy, radius: Radius, rng: StdRng) -> Self {
        Self {
            geocoder: Geocoder::new(Arc::clone(&index)),
            search: RestaurantSearch::new(index, strategy),
            radius,
            rng,
            location_text: String::new(),
            genre: None,
            resolved_genre: None,
            errors: FieldErrors::default(),
            origin: None,
            selection: None,
            phase: Phase::Idle,
        }
    }

    /// Replaces the location text. Clears the location message only.
    pub fn edit_location(&mut self, text: impl Into<String>) {
        self.location_text = text.into();
        self.errors.location = None;
        self.settle_phase();
    }

    /// Picks a genre. The current selection no longer matches it and is
    /// dropped.
    pub fn choose_genre(&mut self, genre: Genre) {
        self.genre = Some(genre);
        self.selection = None;
        self.errors.genre = None;
        self.settle_phase();
    }

    pub fn set_radius(&mut self, radius: Radius) {
        self.radius = radius;
    }

    /// Seeds the flow with state resolved earlier, typically to re-roll on
    /// behalf of a client that holds the state itself.
    pub fn restore(&mut self, origin: Location, genre: Genre, selection: Option<Restaurant>) {
        self.location_text.clone_from(&origin.address);
        self.origin = Some(origin);
        self.genre = Some(genre);
        self.resolved_genre = None;
        self.selection = selection;
        self.errors = FieldErrors::default();
        self.settle_phase();
    }

    /// Validates input, geocodes it, searches and picks a restaurant.
    ///
    /// # Errors
    ///
    /// - [`FlowError::Validation`] with every missing input; nothing is
    ///   looked up.
    /// - [`FlowError::Search`] if geocoding or searching fails. The message
    ///   is also recorded in the view under the field it belongs to.
    pub async fn submit(&mut self) -> Result<&Restaurant, FlowError> {
        let query = self.location_text.trim().to_string();

        let mut invalid = Vec::new();
        if query.is_empty() {
            invalid.push(ValidationError::MissingLocation);
        }
        if self.genre.is_none() {
            invalid.push(ValidationError::MissingGenre);
        }
        self.errors.location = invalid
            .contains(&ValidationError::MissingLocation)
            .then(|| ValidationError::MissingLocation.to_string());
        self.errors.genre = invalid
            .contains(&ValidationError::MissingGenre)
            .then(|| ValidationError::MissingGenre.to_string());

        let Some(genre) = self.genre.filter(|_| invalid.is_empty()) else {
            tracing::debug!(?invalid, "submit rejected");
            self.phase = Phase::Error;
            return Err(FlowError::Validation(invalid));
        };

        self.phase = Phase::AwaitingGeocode;
        let origin = match self.geocoder.resolve(&query).await {
            Ok(origin) => origin,
            Err(e) => {
                self.errors.location = Some(e.to_string());
                self.origin = None;
                self.selection = None;
                self.phase = Phase::Error;
                return Err(e.into());
            }
        };
        self.origin = Some(origin.clone());
        self.errors.search = None;

        self.phase = Phase::AwaitingSearch;
        let resolved = genre.resolve(&mut self.rng);
        self.resolved_genre = Some(resolved);
        let found = match self.search.search_resolved(&origin, resolved, self.radius).await {
            Ok(found) => found,
            Err(e) => {
                self.errors.search = Some(e.to_string());
                self.selection = None;
                self.phase = Phase::Error;
                return Err(e.into());
            }
        };

        match pick(&found.restaurants, None, &mut self.rng) {
            Ok(choice) => {
                tracing::info!(
                    genre = %found.genre,
                    candidates = found.restaurants.len(),
                    restaurant = %choice.name,
                    "picked a restaurant"
                );
                self.phase = Phase::Ready;
                Ok(self.selection.insert(choice))
            }
            Err(e) => {
                let e = SearchError::from(e);
                self.errors.search = Some(e.to_string());
                self.selection = None;
                self.phase = Phase::Error;
                Err(e.into())
            }
        }
    }

    /// Searches again around the same origin and picks a different
    /// restaurant than the current one.
    ///
    /// On failure the current selection stays in place.
    ///
    /// # Errors
    ///
    /// - [`FlowError::NotReady`] without an origin and genre; state is
    ///   untouched.
    /// - [`FlowError::Search`] with [`SearchError::EmptyCandidates`] when
    ///   the current selection was the only candidate, or any search error.
    pub async fn reroll(&mut self) -> Result<&Restaurant, FlowError> {
        let (Some(origin), Some(genre)) = (self.origin.clone(), self.genre) else {
            return Err(FlowError::NotReady);
        };

        self.errors.search = None;
        self.phase = Phase::AwaitingSearch;

        let resolved = genre.resolve(&mut self.rng);
        self.resolved_genre = Some(resolved);
        let found = match self.search.search_resolved(&origin, resolved, self.radius).await {
            Ok(found) => found,
            Err(e) => return Err(self.fail_search(e)),
        };

        match pick(&found.restaurants, self.selection.as_ref(), &mut self.rng) {
            Ok(choice) => {
                tracing::info!(
                    genre = %found.genre,
                    candidates = found.restaurants.len(),
                    restaurant = %choice.name,
                    "re-rolled"
                );
                self.phase = Phase::Ready;
                Ok(self.selection.insert(choice))
            }
            Err(e) => Err(self.fail_search(e.into())),
        }
    }

    /// Records a search-scoped failure without touching the selection.
    fn fail_search(&mut self, e: SearchError) -> FlowError {
        self.errors.search = Some(e.to_string());
        self.phase = Phase::Error;
        e.into()
    }

    /// Intents borrow the flow mutably, so no lookup is in flight here. A
    /// loading phase left behind by a dropped submit or re-roll is stale.
    fn settle_phase(&mut self) {
        self.phase = if !self.errors.is_empty() {
            Phase::Error
        } else if self.selection.is_some() {
            Phase::Ready
        } else {
            Phase::Idle
        };
    }

    #[must_use]
    pub fn view(&self) -> FlowView {
        FlowView {
            phase: self.phase,
            loading: self.phase.is_loading(),
            location_text: self.location_text.clone(),
            genre: self.genre,
            resolved_genre: self.resolved_genre,
            radius_m: self.radius.meters(),
            origin: self.origin.clone(),
            selection: self.selection.clone(),
            errors: self.errors.clone(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn location_text(&self) -> &str {
        &self.location_text
    }

    #[must_use]
    pub fn genre(&self) -> Option<Genre> {
        self.genre
    }

    #[must_use]
    pub fn resolved_genre(&self) -> Option<Genre> {
        self.resolved_genre
    }

    #[must_use]
    pub fn radius(&self) -> Radius {
        self.radius
    }

    #[must_use]
    pub fn origin(&self) -> Option<&Location> {
        self.origin.as_ref()
    }

    #[must_use]
    pub fn selection(&self) -> Option<&Restaurant> {
        self.selection.as_ref()
    }

    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }
}

impl<P> fmt::Debug for Flow<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flow")
            .field("phase", &self.phase)
            .field("location_text", &self.location_text)
            .field("genre", &self.genre)
            .field("radius", &self.radius)
            .field("origin", &self.origin)
            .field("selection", &self.selection.as_ref().map(|r| &r.id))
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}
