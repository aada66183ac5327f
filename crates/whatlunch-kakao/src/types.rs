//! Kakao Local API response types.
//!
//! Every search endpoint answers with `{"meta": {...}, "documents": [...]}`;
//! [`SearchResponse`] captures that envelope generically. Numeric fields such
//! as coordinates arrive as strings and are kept that way here.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchResponse<T> {
    pub meta: SearchMeta,
    #[serde(default = "Vec::new")]
    pub documents: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct SearchMeta {
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub pageable_count: u32,
    /// Missing means there is nothing further to page through.
    #[serde(default = "last_page")]
    pub is_end: bool,
}

fn last_page() -> bool {
    true
}

/// A place document from `search/keyword.json` or `search/category.json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaceDocument {
    pub id: String,
    pub place_name: String,
    pub category_name: String,
    pub category_group_code: String,
    pub category_group_name: String,
    pub phone: String,
    pub address_name: String,
    pub road_address_name: String,
    /// Longitude, as a decimal string.
    pub x: String,
    /// Latitude, as a decimal string.
    pub y: String,
    pub place_url: String,
    /// Distance from the request origin in meters; empty without one.
    pub distance: String,
    /// Not part of Kakao's documented schema; accepted as string or number
    /// when present.
    pub rating: Option<serde_json::Value>,
}

/// An address document from `search/address.json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AddressDocument {
    pub address_name: String,
    /// One of `REGION`, `ROAD`, `REGION_ADDR`, `ROAD_ADDR`.
    pub address_type: String,
    pub x: String,
    pub y: String,
}

/// Error body returned alongside non-2xx statuses.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ErrorBody {
    #[serde(rename = "errorType")]
    pub error_type: String,
    pub message: String,
}
