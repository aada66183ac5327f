use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::Deserialize;
use whatlunch_core::{Genre, Location, PlacesIndex, Restaurant};
use whatlunch_search::{Flow, FlowView};

use crate::middleware::RequestId;

use super::{
    map_flow_error, map_json_rejection, resolve_radius, ApiError, ApiResponse, AppState,
    ResponseMeta,
};

#[derive(Debug, Deserialize)]
pub(super) struct RecommendRequest {
    #[serde(default)]
    pub location: String,
    pub genre: Option<Genre>,
    pub radius_m: Option<u32>,
}

/// Everything a client kept from a previous recommendation.
#[derive(Debug, Deserialize)]
pub(super) struct RerollRequest {
    pub origin: Location,
    pub genre: Genre,
    pub current: Option<Restaurant>,
    pub radius_m: Option<u32>,
}

pub(super) async fn recommend<P: PlacesIndex + 'static>(
    State(state): State<AppState<P>>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<FlowView>>, ApiError> {
    let Json(body) = payload.map_err(|e| map_json_rejection(req_id.0.clone(), &e))?;
    let radius = resolve_radius(&req_id.0, body.radius_m, state.radius)?;

    let mut flow = Flow::new(Arc::clone(&state.index), state.strategy, radius);
    flow.edit_location(body.location);
    if let Some(genre) = body.genre {
        flow.choose_genre(genre);
    }

    flow.submit()
        .await
        .map_err(|e| map_flow_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: flow.view(),
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn reroll<P: PlacesIndex + 'static>(
    State(state): State<AppState<P>>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<RerollRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<FlowView>>, ApiError> {
    let Json(body) = payload.map_err(|e| map_json_rejection(req_id.0.clone(), &e))?;
    let radius = resolve_radius(&req_id.0, body.radius_m, state.radius)?;

    if !is_valid_origin(&body.origin) {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "origin must have a latitude in [-90, 90] and a longitude in [-180, 180]",
        ));
    }

    let mut flow = Flow::new(Arc::clone(&state.index), state.strategy, radius);
    flow.restore(body.origin, body.genre, body.current);

    flow.reroll()
        .await
        .map_err(|e| map_flow_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: flow.view(),
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn is_valid_origin(origin: &Location) -> bool {
    (-90.0..=90.0).contains(&origin.lat) && (-180.0..=180.0).contains(&origin.lng)
}
