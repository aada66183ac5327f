//! [`PlacesIndex`] implementation and document normalization.

use whatlunch_core::{
    AddressMatch, CategoryCode, Coordinate, Place, PlacesError, PlacesIndex, Radius, SearchScope,
};

use crate::client::KakaoClient;
use crate::types::{AddressDocument, PlaceDocument};

impl PlacesIndex for KakaoClient {
    async fn category_search(
        &self,
        code: CategoryCode,
        origin: Coordinate,
        radius: Radius,
    ) -> Result<Vec<Place>, PlacesError> {
        let docs = self.search_category(code, origin, radius).await?;
        Ok(docs.into_iter().map(Place::from).collect())
    }

    async fn keyword_search(
        &self,
        keyword: &str,
        scope: Option<SearchScope>,
    ) -> Result<Vec<Place>, PlacesError> {
        let docs = self.search_keyword(keyword, scope).await?;
        Ok(docs.into_iter().map(Place::from).collect())
    }

    async fn address_search(&self, text: &str) -> Result<Vec<AddressMatch>, PlacesError> {
        let docs = self.search_address(text).await?;
        Ok(docs.into_iter().map(AddressMatch::from).collect())
    }
}

impl From<PlaceDocument> for Place {
    fn from(doc: PlaceDocument) -> Self {
        Place {
            id: doc.id,
            name: doc.place_name,
            address_name: non_empty(doc.address_name),
            road_address_name: non_empty(doc.road_address_name),
            phone: non_empty(doc.phone),
            category_name: non_empty(doc.category_name),
            category_group_code: non_empty(doc.category_group_code),
            x: doc.x,
            y: doc.y,
            place_url: non_empty(doc.place_url),
            rating: doc.rating.and_then(|v| match v {
                serde_json::Value::String(s) => non_empty(s),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            }),
        }
    }
}

impl From<AddressDocument> for AddressMatch {
    fn from(doc: AddressDocument) -> Self {
        AddressMatch {
            address_name: non_empty(doc.address_name),
            x: doc.x,
            y: doc.y,
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}
