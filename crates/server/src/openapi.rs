use serde::Deserialize;
use serde_json::Value;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Deserialize, ToSchema)]
pub struct SaveRequestDoc {
    /// users | games | products | servers | all
    #[serde(rename = "type")]
    pub category: String,
    /// Document to store; for `all`, an object keyed by category.
    #[schema(value_type = Object)]
    pub data: Value,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::data::save_data,
        crate::routes::data::load_all,
        crate::routes::data::load_one,
    ),
    components(
        schemas(
            HealthResponse,
            SaveRequestDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "data")
    )
)]
pub struct ApiDoc;
