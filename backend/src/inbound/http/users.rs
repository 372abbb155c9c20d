//! User resource handlers.
//!
//! ```text
//! GET    /api/v1/users
//! POST   /api/v1/users        {"userName":"texmo","password":"p","firstName":"a","lastName":"b","age":24}
//! GET    /api/v1/users/{id}
//! PUT    /api/v1/users/{id}
//! DELETE /api/v1/users/{id}
//! GET    /api/v2/users
//! ```
//!
//! A duplicate user name is reported as 404 and update always answers 204
//! once the target exists, whatever the store reports.

use actix_web::{HttpResponse, delete, get, post, put, web};
use tracing::{debug, error, warn};

use crate::domain::{Entity, EntityId, Error, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

const DUPLICATE_USER: &str = "This user already exists";
const STORE_FAILURE: &str = "Something wrong occurred during the process";
const MISSING_PAYLOAD: &str = "A user payload is required";

fn user_not_found(id: EntityId) -> Error {
    Error::not_found(format!("User {id} was not found"))
}

async fn all_users(state: &HttpState) -> ApiResult<Vec<User>> {
    let users = state.users.get_all().await?;
    debug!(count = users.len(), "listed users");
    Ok(users)
}

/// List every user ordered by user name.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Users ordered by user name", body = [User]),
        (status = 401, description = "Missing or invalid credentials", body = Error),
        (status = 503, description = "Data store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "getAllUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    all_users(&state).await.map(web::Json)
}

/// List every user (version 2).
#[utoipa::path(
    get,
    path = "/api/v2/users",
    responses(
        (status = 200, description = "Users ordered by user name", body = [User]),
        (status = 401, description = "Missing or invalid credentials", body = Error),
        (status = 503, description = "Data store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "getAllUsersV2"
)]
#[get("/users")]
pub async fn list_users_v2(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    all_users(&state).await.map(web::Json)
}

/// Create a user. The response echoes the submitted payload.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = User,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Missing or invalid payload", body = Error),
        (status = 401, description = "Missing or invalid credentials", body = Error),
        (status = 404, description = "This user already exists", body = Error),
        (status = 500, description = "The store did not persist the user", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<Option<User>>,
) -> ApiResult<HttpResponse> {
    let Some(user) = payload.into_inner() else {
        return Err(Error::invalid_request(MISSING_PAYLOAD));
    };
    user.validate()?;

    if state.users.exists_by_name(&user.user_name).await? {
        warn!(user_name = %user.user_name, "rejected duplicate user");
        return Err(Error::not_found(DUPLICATE_USER));
    }
    if !state.users.create(&user).await? {
        error!(user_name = %user.user_name, "store did not persist user");
        return Err(Error::internal(STORE_FAILURE));
    }

    debug!(user_name = %user.user_name, "created user");
    Ok(HttpResponse::Created().json(user))
}

/// Fetch a single user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "The requested user", body = User),
        (status = 401, description = "Missing or invalid credentials", body = Error),
        (status = 404, description = "No user with this id", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<User>> {
    let id = EntityId::new(path.into_inner());
    state
        .users
        .get_by_id(id)
        .await?
        .map(web::Json)
        .ok_or_else(|| user_not_found(id))
}

/// Replace a user record.
///
/// The id in the path wins over any id in the body.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    request_body = User,
    responses(
        (status = 204, description = "Update accepted"),
        (status = 400, description = "Missing or invalid payload", body = Error),
        (status = 401, description = "Missing or invalid credentials", body = Error),
        (status = 404, description = "No user with this id", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<Option<User>>,
) -> ApiResult<HttpResponse> {
    let id = EntityId::new(path.into_inner());
    let body = payload.into_inner();
    if body.is_none() && !id.is_assigned() {
        return Err(Error::invalid_request(MISSING_PAYLOAD));
    }
    if let Some(user) = &body {
        user.validate()?;
    }

    if !state.users.exists_by_id(id).await? {
        return Err(user_not_found(id));
    }
    let Some(submitted) = body else {
        return Err(Error::invalid_request(MISSING_PAYLOAD));
    };

    let user = submitted.with_id(id);
    if state.users.update(&user).await? {
        debug!(%id, "updated user");
    } else {
        warn!(%id, kind = User::KIND, "store reported no rows updated");
    }
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Missing or invalid credentials", body = Error),
        (status = 404, description = "No user with this id", body = Error),
        (status = 500, description = "The store did not delete the user", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = EntityId::new(path.into_inner());
    if !state.users.exists_by_id(id).await? {
        return Err(user_not_found(id));
    }
    let Some(user) = state.users.get_by_id(id).await? else {
        return Err(user_not_found(id));
    };
    if !state.users.delete(&user).await? {
        error!(%id, "store did not delete user");
        return Err(Error::internal(STORE_FAILURE));
    }

    debug!(%id, "deleted user");
    Ok(HttpResponse::NoContent().finish())
}
