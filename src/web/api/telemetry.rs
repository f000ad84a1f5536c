use axum::{
    extract::{Path, State},
    Json,
};

use crate::telemetry::{EntityId, QueryError, Sample};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[utoipa::path(
    get,
    path = "/api/ids",
    tag = "telemetry",
    responses(
        (status = 200, description = "Known entity ids, ascending", body = Vec<i128>)
    )
)]
pub async fn list_ids(State(state): State<AppState>) -> Json<Vec<EntityId>> {
    Json(state.store.ids())
}

#[utoipa::path(
    get,
    path = "/api/data/{id}",
    tag = "telemetry",
    params(
        ("id" = String, Path, description = "Entity (team) number")
    ),
    responses(
        (status = 200, description = "Samples in timestamp order", body = Vec<Sample>),
        (status = 400, description = "Id is not an integer", body = ErrorResponse),
        (status = 404, description = "No samples for this id", body = ErrorResponse)
    )
)]
pub async fn get_series(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Sample>>> {
    let series = state.store.fetch(&id)?;
    Ok(Json(series.to_vec()))
}

/// `/api/data/` and `/api/data/{id}/` end in an empty segment.
pub async fn missing_id() -> ApiError {
    QueryError::BadRequest(String::new()).into()
}
