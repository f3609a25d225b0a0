use axum::{Json, Router, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::users::list_users,
        crate::presentation::http::users::get_user,
        crate::presentation::http::users::create_user,
        crate::presentation::http::users::update_user,
        crate::presentation::http::users::delete_user,
        crate::presentation::http::health::health,
    ),
    components(schemas(
        crate::presentation::http::users::User,
        crate::presentation::http::users::CreateUserRequest,
        crate::presentation::http::users::CreateUserResponse,
        crate::presentation::http::users::UpdateUserRequest,
        crate::presentation::http::error::ErrorResponse,
        crate::presentation::http::health::HealthResp,
    )),
    tags(
        (name = "Users", description = "Users management"),
        (name = "Health", description = "System health checks")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn routes() -> Router {
    Router::new().route("/openapi.json", get(openapi_json))
}
