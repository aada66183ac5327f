//! In-memory places index for unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use whatlunch_core::{
    AddressMatch, CategoryCode, Coordinate, Location, Place, PlacesError, PlacesIndex, Radius,
    SearchScope,
};

/// Meters per degree of latitude on the 6,371 km sphere.
const METERS_PER_LAT_DEGREE: f64 = 111_194.93;

#[derive(Default)]
pub(crate) struct FakeIndex {
    keyword: HashMap<String, Vec<Place>>,
    failing_keywords: HashSet<String>,
    categories: HashMap<CategoryCode, Vec<Place>>,
    failing_categories: HashSet<CategoryCode>,
    category_delays: HashMap<CategoryCode, Duration>,
    addresses: HashMap<String, Vec<AddressMatch>>,
    addresses_fail: bool,
    calls: Mutex<Vec<String>>,
    scopes: Mutex<Vec<Option<SearchScope>>>,
}

impl FakeIndex {
    pub(crate) fn with_keyword(mut self, keyword: &str, places: Vec<Place>) -> Self {
        self.keyword.insert(keyword.to_string(), places);
        self
    }

    pub(crate) fn fail_keyword(mut self, keyword: &str) -> Self {
        self.failing_keywords.insert(keyword.to_string());
        self
    }

    pub(crate) fn with_category(mut self, code: CategoryCode, places: Vec<Place>) -> Self {
        self.categories.insert(code, places);
        self
    }

    pub(crate) fn fail_category(mut self, code: CategoryCode) -> Self {
        self.failing_categories.insert(code);
        self
    }

    /// Makes queries for `code` answer only after `millis`.
    pub(crate) fn delay_category(mut self, code: CategoryCode, millis: u64) -> Self {
        self.category_delays.insert(code, Duration::from_millis(millis));
        self
    }

    pub(crate) fn with_address(mut self, text: &str, matches: Vec<AddressMatch>) -> Self {
        self.addresses.insert(text.to_string(), matches);
        self
    }

    pub(crate) fn fail_addresses(mut self) -> Self {
        self.addresses_fail = true;
        self
    }

    /// Every query answered, in completion order, as `"<kind>:<argument>"`.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Scopes passed to keyword queries, in order.
    pub(crate) fn scopes(&self) -> Vec<Option<SearchScope>> {
        self.scopes.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn unavailable() -> PlacesError {
    PlacesError::Unreachable("connection refused".into())
}

impl PlacesIndex for FakeIndex {
    async fn category_search(
        &self,
        code: CategoryCode,
        _origin: Coordinate,
        _radius: Radius,
    ) -> Result<Vec<Place>, PlacesError> {
        if let Some(delay) = self.category_delays.get(&code) {
            tokio::time::sleep(*delay).await;
        }
        self.record(format!("category:{code}"));
        if self.failing_categories.contains(&code) {
            return Err(unavailable());
        }
        Ok(self.categories.get(&code).cloned().unwrap_or_default())
    }

    async fn keyword_search(
        &self,
        keyword: &str,
        scope: Option<SearchScope>,
    ) -> Result<Vec<Place>, PlacesError> {
        self.record(format!("keyword:{keyword}"));
        self.scopes.lock().unwrap().push(scope);
        if self.failing_keywords.contains(keyword) {
            return Err(unavailable());
        }
        Ok(self.keyword.get(keyword).cloned().unwrap_or_default())
    }

    async fn address_search(&self, text: &str) -> Result<Vec<AddressMatch>, PlacesError> {
        self.record(format!("address:{text}"));
        if self.addresses_fail {
            return Err(unavailable());
        }
        Ok(self.addresses.get(text).cloned().unwrap_or_default())
    }
}

/// A coordinate `meters` due north of `origin`.
pub(crate) fn north_of(origin: &Location, meters: f64) -> Coordinate {
    Coordinate::new(origin.lat + meters / METERS_PER_LAT_DEGREE, origin.lng)
}

pub(crate) fn place(id: &str, category_group_code: &str, at: Coordinate) -> Place {
    Place {
        id: id.to_string(),
        name: format!("Restaurant {id}"),
        address_name: Some(format!("{id} lot address")),
        road_address_name: Some(format!("{id} road address")),
        phone: Some("02-000-0000".into()),
        category_name: Some("음식점".into()),
        category_group_code: (!category_group_code.is_empty())
            .then(|| category_group_code.to_string()),
        x: at.lng.to_string(),
        y: at.lat.to_string(),
        place_url: Some(format!("http://place.map.kakao.com/{id}")),
        rating: None,
    }
}
