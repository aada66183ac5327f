//! Restaurant search and the recommendation flow.
//!
//! [`Geocoder`] turns free text into an origin, [`RestaurantSearch`] finds
//! food venues around it, and [`Flow`] strings the two together with the
//! random selector while tracking the state a presentation layer renders.

pub mod error;
pub mod flow;
pub mod geocode;
pub mod search;

#[cfg(test)]
mod test_support;

pub use error::SearchError;
pub use flow::{FieldErrors, Flow, FlowError, FlowView, Phase, ValidationError};
pub use geocode::Geocoder;
pub use search::{RestaurantSearch, SearchResult};
