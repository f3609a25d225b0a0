use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State, rejection::PathRejection},
    http::StatusCode,
    routing::get,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::ports::user_repository::UserRepositoryError;
use crate::application::use_cases::users::UserCommandError;
use crate::application::use_cases::users::create_user::CreateUser;
use crate::application::use_cases::users::delete_user::DeleteUser;
use crate::application::use_cases::users::get_user::GetUser;
use crate::application::use_cases::users::list_users::ListUsers;
use crate::application::use_cases::users::update_user::UpdateUser;
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::user as domain;
use crate::presentation::http::error::{
    ApiError, BAD_REQUEST, DATE_INCORRECT, ErrorResponse, INCORRECT_ID, MIN_AGE_NOT_NUMBER,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct User {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `DD.MM.YYYY`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_male: Option<bool>,
}

impl From<domain::User> for User {
    fn from(u: domain::User) -> Self {
        User {
            id: u.id,
            name: u.name,
            birthday: u.birthday,
            age: u.age,
            is_male: u.is_male,
        }
    }
}

/// `age` is not accepted here; it is derived from `birthday`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    /// `DD.MM.YYYY`
    pub birthday: Option<String>,
    pub is_male: Option<bool>,
}

impl From<CreateUserRequest> for domain::NewUser {
    fn from(req: CreateUserRequest) -> Self {
        domain::NewUser {
            name: req.name,
            birthday: req.birthday,
            age: None,
            is_male: req.is_male,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateUserResponse {
    pub id: i64,
}

/// Full replacement of a user. Any `id` in the body is ignored in favour of
/// the path; `age` only survives when `birthday` is absent.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub birthday: Option<String>,
    pub age: Option<i32>,
    pub is_male: Option<bool>,
}

impl UpdateUserRequest {
    fn into_user(self, id: i64) -> domain::User {
        domain::User {
            id,
            name: self.name,
            birthday: self.birthday,
            age: self.age,
            is_male: self.is_male,
        }
    }
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// Path segments that axum cannot decode count as malformed ids.
fn path_id(path: Result<Path<String>, PathRejection>) -> Result<i64, ApiError> {
    match path {
        Ok(Path(raw)) => parse_id(&raw),
        Err(e) => {
            tracing::debug!(error = %e, "invalid_user_id_segment");
            Err(ApiError::BadRequest(INCORRECT_ID))
        }
    }
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<u64>()
        .ok()
        .filter(|_| !raw.starts_with('+'))
        .and_then(|id| i64::try_from(id).ok())
        .ok_or_else(|| {
            tracing::debug!(id = %raw, "invalid_user_id");
            ApiError::BadRequest(INCORRECT_ID)
        })
}

/// `None` when `minAge` is absent; exactly one integer value otherwise.
fn parse_min_age(params: &[(String, String)]) -> Result<Option<i64>, ApiError> {
    let mut values = params
        .iter()
        .filter(|(key, _)| key == "minAge")
        .map(|(_, value)| value);
    let Some(raw) = values.next() else {
        return Ok(None);
    };
    if values.next().is_some() {
        tracing::debug!("duplicate_min_age");
        return Err(ApiError::BadRequest(MIN_AGE_NOT_NUMBER));
    }
    raw.parse().map(Some).map_err(|e| {
        tracing::debug!(min_age = %raw, error = %e, "invalid_min_age");
        ApiError::BadRequest(MIN_AGE_NOT_NUMBER)
    })
}

/// A literal `null` body is read as an empty object.
fn parse_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice::<Option<T>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|e| {
            tracing::debug!(error = %e, "invalid_json_body");
            ApiError::BadRequest(BAD_REQUEST)
        })
}

#[utoipa::path(get, path = "/users", tag = "Users",
    params(("minAge" = Option<i64>, Query, description = "Only users with age >= minAge")),
    responses(
        (status = 200, body = [User]),
        (status = 400, body = ErrorResponse),
        (status = 500, body = ErrorResponse)
    ))]
pub async fn list_users(
    State(ctx): State<AppContext>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<User>>, ApiError> {
    let min_age = parse_min_age(&params)?;
    let repo = ctx.user_repo();
    let uc = ListUsers {
        repo: repo.as_ref(),
    };
    let users = uc.execute(min_age).await.map_err(|e| {
        tracing::error!(?min_age, error = ?e, "list_users_failed");
        ApiError::Internal
    })?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

#[utoipa::path(get, path = "/users/{id}", tag = "Users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, body = User),
        (status = 400, body = ErrorResponse),
        (status = 404, body = ErrorResponse),
        (status = 500, body = ErrorResponse)
    ))]
pub async fn get_user(
    State(ctx): State<AppContext>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Result<Json<User>, ApiError> {
    let id = path_id(raw_id)?;
    let repo = ctx.user_repo();
    let uc = GetUser {
        repo: repo.as_ref(),
    };
    match uc.execute(id).await {
        Ok(user) => Ok(Json(user.into())),
        Err(UserRepositoryError::NotFound) => Err(ApiError::NotFound),
        Err(e) => {
            tracing::error!(user_id = id, error = ?e, "get_user_failed");
            Err(ApiError::Internal)
        }
    }
}

#[utoipa::path(post, path = "/users", tag = "Users", request_body = CreateUserRequest,
    responses(
        (status = 200, body = CreateUserResponse),
        (status = 400, body = ErrorResponse)
    ))]
pub async fn create_user(
    State(ctx): State<AppContext>,
    body: Bytes,
) -> Result<Json<CreateUserResponse>, ApiError> {
    let req: CreateUserRequest = parse_body(&body)?;
    let repo = ctx.user_repo();
    let uc = CreateUser {
        repo: repo.as_ref(),
        today: today(),
    };
    match uc.execute(req.into()).await {
        Ok(id) => Ok(Json(CreateUserResponse { id })),
        Err(UserCommandError::InvalidBirthday(e)) => {
            tracing::debug!(error = %e, "invalid_birthday");
            Err(ApiError::BadRequest(DATE_INCORRECT))
        }
        Err(UserCommandError::Repository(e)) => {
            tracing::error!(error = ?e, "create_user_failed");
            Err(ApiError::BadRequest(BAD_REQUEST))
        }
    }
}

#[utoipa::path(put, path = "/users/{id}", tag = "Users", request_body = UpdateUserRequest,
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Updated, empty body"),
        (status = 400, body = ErrorResponse),
        (status = 404, body = ErrorResponse)
    ))]
pub async fn update_user(
    State(ctx): State<AppContext>,
    raw_id: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let id = path_id(raw_id)?;
    let req: UpdateUserRequest = parse_body(&body)?;
    let repo = ctx.user_repo();
    let uc = UpdateUser {
        repo: repo.as_ref(),
        today: today(),
    };
    match uc.execute(req.into_user(id)).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(UserCommandError::InvalidBirthday(e)) => {
            tracing::debug!(user_id = id, error = %e, "invalid_birthday");
            Err(ApiError::BadRequest(DATE_INCORRECT))
        }
        Err(UserCommandError::Repository(UserRepositoryError::NotUpdated)) => {
            Err(ApiError::NotFound)
        }
        Err(UserCommandError::Repository(e)) => {
            tracing::error!(user_id = id, error = ?e, "update_user_failed");
            Err(ApiError::BadRequest(BAD_REQUEST))
        }
    }
}

#[utoipa::path(delete, path = "/users/{id}", tag = "Users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Deleted, empty body"),
        (status = 400, body = ErrorResponse),
        (status = 404, body = ErrorResponse),
        (status = 500, body = ErrorResponse)
    ))]
pub async fn delete_user(
    State(ctx): State<AppContext>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(raw_id)?;
    let repo = ctx.user_repo();
    let uc = DeleteUser {
        repo: repo.as_ref(),
    };
    match uc.execute(id).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(UserRepositoryError::NotFound) => Err(ApiError::NotFound),
        Err(e) => {
            tracing::error!(user_id = id, error = ?e, "delete_user_failed");
            Err(ApiError::Internal)
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .with_state(ctx)
}
