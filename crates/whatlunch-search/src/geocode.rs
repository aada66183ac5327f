//! Free-text location → coordinates.

use std::sync::Arc;

use whatlunch_core::{Location, PlacesIndex};

use crate::error::SearchError;

/// Resolves user-entered place names or addresses to a [`Location`].
///
/// Place-name lookup runs first; address lookup is the fallback. One
/// attempt per strategy, no retries.
pub struct Geocoder<P> {
    index: Arc<P>,
}

impl<P> Clone for Geocoder<P> {
    fn clone(&self) -> Self {
        Self {
            index: Arc::clone(&self.index),
        }
    }
}

impl<P: PlacesIndex> Geocoder<P> {
    pub fn new(index: Arc<P>) -> Self {
        Self { index }
    }

    /// Resolves `query` to a location.
    ///
    /// The display address is the matched place's lot address, then its road
    /// address, then the query itself. Results whose coordinates do not
    /// parse are skipped.
    ///
    /// # Errors
    ///
    /// - [`SearchError::NotFound`] if neither lookup matches.
    /// - [`SearchError::ServiceUnavailable`] if the address lookup request
    ///   itself fails. A failed place-name request only logs and falls
    ///   through to address lookup.
    pub async fn resolve(&self, query: &str) -> Result<Location, SearchError> {
        let query = query.trim();

        match self.index.keyword_search(query, None).await {
            Ok(places) => {
                let hit = places.iter().find_map(|place| {
                    let coord = place.coordinate()?;
                    let address = place
                        .address_name
                        .clone()
                        .or_else(|| place.road_address_name.clone())
                        .unwrap_or_else(|| query.to_string());
                    Some(Location {
                        lat: coord.lat,
                        lng: coord.lng,
                        address,
                    })
                });
                if let Some(location) = hit {
                    tracing::debug!(query, address = %location.address, "geocoded by place name");
                    return Ok(location);
                }
            }
            Err(e) => {
                tracing::warn!(
                    query,
                    error = %e,
                    "place-name lookup failed; falling back to address lookup"
                );
            }
        }

        let matches = self.index.address_search(query).await.map_err(|e| {
            tracing::warn!(query, error = %e, "address lookup failed");
            SearchError::ServiceUnavailable(e.to_string())
        })?;

        let hit = matches.iter().find_map(|m| {
            let coord = m.coordinate()?;
            Some(Location {
                lat: coord.lat,
                lng: coord.lng,
                address: m
                    .address_name
                    .clone()
                    .unwrap_or_else(|| query.to_string()),
            })
        });

        match hit {
            Some(location) => {
                tracing::debug!(query, address = %location.address, "geocoded by address");
                Ok(location)
            }
            None => {
                tracing::info!(query, "no place or address matched");
                Err(SearchError::NotFound {
                    query: query.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use whatlunch_core::{AddressMatch, Place};

    use super::*;
    use crate::test_support::FakeIndex;

    fn landmark(address: Option<&str>, road: Option<&str>) -> Place {
        Place {
            id: "8177149".into(),
            name: "Seoul City Hall".into(),
            address_name: address.map(Into::into),
            road_address_name: road.map(Into::into),
            x: "126.978652".into(),
            y: "37.566826".into(),
            ..Place::default()
        }
    }

    #[tokio::test]
    async fn place_name_match_wins_and_prefers_lot_address() {
        let index = FakeIndex::default().with_keyword(
            "서울시청",
            vec![landmark(Some("서울 중구 태평로1가 31"), Some("서울 중구 세종대로 110"))],
        );
        let index = Arc::new(index);
        let location = Geocoder::new(Arc::clone(&index))
            .resolve("서울시청")
            .await
            .unwrap();

        assert_eq!(location.address, "서울 중구 태평로1가 31");
        assert!((location.lat - 37.566_826).abs() < 1e-9);
        assert!((location.lng - 126.978_652).abs() < 1e-9);
        assert_eq!(index.calls(), ["keyword:서울시청"]);
    }

    #[tokio::test]
    async fn address_falls_back_to_road_address_then_query() {
        let index = Arc::new(
            FakeIndex::default()
                .with_keyword("a", vec![landmark(None, Some("Sejong-daero 110"))])
                .with_keyword("b", vec![landmark(None, None)]),
        );
        let geocoder = Geocoder::new(index);
        assert_eq!(geocoder.resolve("a").await.unwrap().address, "Sejong-daero 110");
        assert_eq!(geocoder.resolve("b").await.unwrap().address, "b");
    }

    #[tokio::test]
    async fn empty_place_results_fall_back_to_address_search() {
        let index = Arc::new(FakeIndex::default().with_address(
            "세종대로 110",
            vec![AddressMatch {
                address_name: None,
                x: "126.9778".into(),
                y: "37.5663".into(),
            }],
        ));
        let location = Geocoder::new(Arc::clone(&index))
            .resolve("  세종대로 110 ")
            .await
            .unwrap();

        assert_eq!(location.address, "세종대로 110");
        assert_eq!(
            index.calls(),
            ["keyword:세종대로 110", "address:세종대로 110"]
        );
    }

    #[tokio::test]
    async fn failed_place_lookup_still_tries_address() {
        let index = Arc::new(
            FakeIndex::default()
                .fail_keyword("Gwanghwamun")
                .with_address(
                    "Gwanghwamun",
                    vec![AddressMatch {
                        address_name: Some("Sejong-ro 1-57".into()),
                        x: "126.9769".into(),
                        y: "37.5759".into(),
                    }],
                ),
        );
        let location = Geocoder::new(index).resolve("Gwanghwamun").await.unwrap();
        assert_eq!(location.address, "Sejong-ro 1-57");
    }

    #[tokio::test]
    async fn unparseable_coordinates_are_skipped() {
        let mut broken = landmark(Some("nowhere"), None);
        broken.y = "north-ish".into();
        let index = Arc::new(
            FakeIndex::default().with_keyword("x", vec![broken, landmark(Some("here"), None)]),
        );
        let location = Geocoder::new(index).resolve("x").await.unwrap();
        assert_eq!(location.address, "here");
    }

    #[tokio::test]
    async fn no_match_anywhere_is_not_found() {
        let index = Arc::new(FakeIndex::default());
        let err = Geocoder::new(index).resolve("Atlantis").await.unwrap_err();
        assert_eq!(
            err,
            SearchError::NotFound {
                query: "Atlantis".into()
            }
        );
        assert!(err.to_string().contains("try a different input"));
    }

    #[tokio::test]
    async fn failed_address_lookup_is_service_unavailable() {
        let index = Arc::new(FakeIndex::default().fail_addresses());
        let err = Geocoder::new(index).resolve("Atlantis").await.unwrap_err();
        assert!(matches!(err, SearchError::ServiceUnavailable(_)), "got {err:?}");
    }
}
