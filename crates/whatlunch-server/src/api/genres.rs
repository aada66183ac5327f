use axum::{Extension, Json};
use serde::Serialize;
use whatlunch_core::{CategoryCode, Genre};

use crate::middleware::RequestId;

use super::{ApiResponse, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct GenreItem {
    id: Genre,
    name: &'static str,
    label: &'static str,
    keyword: &'static str,
    categories: &'static [CategoryCode],
}

pub(super) async fn list_genres(
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<GenreItem>>> {
    let data = Genre::ALL
        .into_iter()
        .map(|genre| GenreItem {
            id: genre,
            name: genre.name(),
            label: genre.label(),
            keyword: genre.keyword(),
            categories: genre.categories(),
        })
        .collect();

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}
