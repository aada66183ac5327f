//! Client for the Kakao Local REST API.
//!
//! [`KakaoClient`] wraps `reqwest` with Kakao's `KakaoAK` authorization,
//! page-by-page collection and typed response decoding, and implements
//! [`whatlunch_core::PlacesIndex`] so geocoding and restaurant search can
//! run against it.

pub mod client;
pub mod error;
mod index;
pub mod types;

pub use client::KakaoClient;
pub use error::KakaoError;
pub use types::{AddressDocument, PlaceDocument, SearchMeta, SearchResponse};
