//! Domain types shared by every `whatlunch` crate.
//!
//! Holds the location/genre/restaurant model, the Haversine distance
//! calculator, the random selector, the [`PlacesIndex`] seam that search
//! and geocoding run against, and environment-driven configuration.

pub mod app_config;
pub mod config;
pub mod error;
pub mod genre;
pub mod geo;
pub mod places;
pub mod restaurant;
pub mod select;

pub use app_config::{AppConfig, Environment, SearchStrategy};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use genre::{CategoryCode, Genre, ParseGenreError, FOOD_CATEGORIES};
pub use geo::{distance_m, Coordinate, Location, Radius};
pub use places::{AddressMatch, Place, PlacesError, PlacesIndex, SearchScope};
pub use restaurant::Restaurant;
pub use select::{pick, SelectError};
