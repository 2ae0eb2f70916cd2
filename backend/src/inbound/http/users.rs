//! User collection handlers.
//!
//! ```text
//! GET    /api/user
//! GET    /api/user/{id}
//! POST   /api/user       {"login":"ala","age":18}
//! PUT    /api/user/{id}  {"login":"ala","age":19}
//! DELETE /api/user/{id}
//! ```
//!
//! An unknown identifier is a plain empty 404, never an error payload.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::{HeaderValue, LOCATION};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::ports::UserStoreError;
use crate::domain::{
    Age, ApiResult, Error, Login, User, UserId, UserRepository, UserValidationError,
};
use crate::inbound::http::reply::Reply;
use crate::inbound::http::router::HandlerRequest;

/// Path prefix under which users are addressed.
pub const USERS_PATH: &str = "/api/user";

/// Request body for create and update.
///
/// Example JSON:
/// `{"login":"ala","age":18}`
///
/// Identifiers are assigned by the store, so an `id` field is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UserRequest {
    pub login: String,
    pub age: u32,
}

impl UserRequest {
    fn into_parts(self) -> Result<(Login, Age), UserValidationError> {
        Ok((Login::new(self.login)?, Age::new(self.age)))
    }
}

fn parse_user_request(body: &[u8]) -> ApiResult<(Login, Age)> {
    let request: UserRequest = serde_json::from_slice(body).map_err(|err| {
        Error::invalid_request("request body is not a valid user")
            .with_details(json!({ "code": "malformed_body", "reason": err.to_string() }))
    })?;
    request.into_parts().map_err(map_validation_error)
}

fn map_validation_error(err: UserValidationError) -> Error {
    match err {
        UserValidationError::EmptyLogin => Error::invalid_request("login must not be empty")
            .with_details(json!({ "field": "login", "code": "empty_login" })),
        other => Error::invalid_request(other.to_string()),
    }
}

pub(crate) fn map_store_error(err: UserStoreError) -> Error {
    match err {
        UserStoreError::Connection { .. } => Error::service_unavailable(err.to_string()),
        UserStoreError::Query { .. } | UserStoreError::MissingIdentifier => {
            Error::internal(err.to_string())
        }
    }
}

/// Look up the user named by the `id` path variable.
///
/// An identifier that cannot be valid cannot be stored either, so it reads
/// as absent.
async fn find_user(users: &UserRepository, request: &HandlerRequest) -> ApiResult<Option<User>> {
    let Ok(id) = UserId::new(request.param("id")?) else {
        return Ok(None);
    };
    users.find_by_id(&id).await.map_err(map_store_error)
}

fn location_of(user: &User) -> ApiResult<HeaderValue> {
    let id = user
        .id()
        .ok_or_else(|| Error::internal("store returned a user without an identifier"))?;
    HeaderValue::try_from(format!("{USERS_PATH}/{id}"))
        .map_err(|err| Error::internal(format!("invalid location header: {err}")))
}

/// List every stored user.
pub async fn list_users(users: Arc<UserRepository>, _request: HandlerRequest) -> ApiResult<Reply> {
    let all = users.find_all().await.map_err(map_store_error)?;
    Reply::json(StatusCode::OK, &all)
}

pub async fn get_user(users: Arc<UserRepository>, request: HandlerRequest) -> ApiResult<Reply> {
    match find_user(&users, &request).await? {
        Some(user) => Reply::json(StatusCode::OK, &user),
        None => Ok(Reply::empty(StatusCode::NOT_FOUND)),
    }
}

/// Persist a new user and point `Location` at it.
pub async fn create_user(users: Arc<UserRepository>, request: HandlerRequest) -> ApiResult<Reply> {
    let (login, age) = parse_user_request(request.body())?;
    let saved = users
        .save(User::new(login, age))
        .await
        .map_err(map_store_error)?;
    let location = location_of(&saved)?;
    Ok(Reply::json(StatusCode::CREATED, &saved)?.with_header(LOCATION, location))
}

/// Fully replace login and age of an existing user, keeping its identifier.
pub async fn update_user(users: Arc<UserRepository>, request: HandlerRequest) -> ApiResult<Reply> {
    let (login, age) = parse_user_request(request.body())?;
    let Some(existing) = find_user(&users, &request).await? else {
        return Ok(Reply::empty(StatusCode::NOT_FOUND));
    };
    let updated = users
        .save(existing.replaced_by(login, age))
        .await
        .map_err(map_store_error)?;
    Reply::json(StatusCode::OK, &updated)
}

pub async fn delete_user(users: Arc<UserRepository>, request: HandlerRequest) -> ApiResult<Reply> {
    let Some(existing) = find_user(&users, &request).await? else {
        return Ok(Reply::empty(StatusCode::NOT_FOUND));
    };
    users.delete(&existing).await.map_err(map_store_error)?;
    Ok(Reply::empty(StatusCode::NO_CONTENT))
}

#[cfg(test)]
mod tests;
