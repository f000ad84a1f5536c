use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use crate::telemetry::Sample;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::telemetry::list_ids,
        super::api::telemetry::get_series,
    ),
    components(
        schemas(
            Sample,
            ErrorResponse,
        )
    ),
    info(
        title = "Flight Log Viewer API",
        description = "Read-only access to per-aircraft telemetry reconstructed from a recorded log",
        version = "0.1.0"
    ),
    tags(
        (name = "telemetry", description = "Entity ids and their time series")
    )
)]
pub struct ApiDoc;
