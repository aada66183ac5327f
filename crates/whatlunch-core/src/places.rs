//! The places-index seam.
//!
//! Geocoding and restaurant search only ever talk to a [`PlacesIndex`]
//! handed to them at construction. Production wires in the Kakao Local
//! client; tests use in-memory fakes.

use std::future::Future;

use thiserror::Error;

use crate::genre::CategoryCode;
use crate::geo::{Coordinate, Radius};

/// A place record as returned by the index.
///
/// Coordinates and rating stay string-typed, exactly as the index reports
/// them; consumers parse them when they need numbers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub address_name: Option<String>,
    pub road_address_name: Option<String>,
    pub phone: Option<String>,
    pub category_name: Option<String>,
    pub category_group_code: Option<String>,
    /// Longitude.
    pub x: String,
    /// Latitude.
    pub y: String,
    pub place_url: Option<String>,
    pub rating: Option<String>,
}

impl Place {
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::parse(&self.y, &self.x)
    }
}

/// A result from address (rather than place-name) lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressMatch {
    pub address_name: Option<String>,
    pub x: String,
    pub y: String,
}

impl AddressMatch {
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::parse(&self.y, &self.x)
    }
}

/// Restricts a keyword query to a circle around an origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchScope {
    pub origin: Coordinate,
    pub radius: Radius,
}

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("places index unreachable: {0}")]
    Unreachable(String),

    #[error("places index rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("unexpected places index response: {0}")]
    Malformed(String),
}

/// A searchable index of places.
pub trait PlacesIndex: Send + Sync {
    /// Places in one category group within `radius` of `origin`.
    fn category_search(
        &self,
        code: CategoryCode,
        origin: Coordinate,
        radius: Radius,
    ) -> impl Future<Output = Result<Vec<Place>, PlacesError>> + Send;

    /// Places matching a free-text keyword, optionally scoped to a circle.
    fn keyword_search(
        &self,
        keyword: &str,
        scope: Option<SearchScope>,
    ) -> impl Future<Output = Result<Vec<Place>, PlacesError>> + Send;

    /// Addresses matching free text.
    fn address_search(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Vec<AddressMatch>, PlacesError>> + Send;
}
