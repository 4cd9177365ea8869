use actix_web::{web, HttpMessage, HttpRequest, HttpResponse, Responder};
use serde::de::DeserializeOwned;

use crate::{
    models::{AddUserRequest, MessageResponse, SearchUsersQuery, UpdateUserRequest, UserResponse},
    repository::UserRepository,
    services::user_service,
    utils::AppError,
};

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Reads a request body as JSON. A missing body, or one not sent as JSON,
/// reads as `{}` so the field presence checks still run.
fn json_body<T>(req: &HttpRequest, body: &web::Bytes) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned + Default,
{
    let content_type = req.content_type();
    let is_json = content_type == "application/json" || content_type.ends_with("+json");

    if !is_json || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
}

fn invalid_body(e: serde_json::Error) -> HttpResponse {
    log::warn!("⚠️ Rejected malformed JSON body: {}", e);
    HttpResponse::BadRequest()
        .content_type(TEXT_PLAIN)
        .body(format!("Invalid JSON body: {}", e))
}

/// POST /add-user - Creates a user
#[utoipa::path(
    post,
    path = "/add-user",
    tag = "Users",
    request_body = AddUserRequest,
    responses(
        (status = 201, description = "User added", body = String, content_type = "text/plain"),
        (status = 400, description = "Malformed JSON body", body = String, content_type = "text/plain"),
        (status = 500, description = "Store rejected the write", body = String, content_type = "text/plain")
    )
)]
pub async fn add_user(
    repo: web::Data<dyn UserRepository>,
    req: HttpRequest,
    body: web::Bytes,
) -> impl Responder {
    let request: AddUserRequest = match json_body(&req, &body) {
        Ok(request) => request,
        Err(e) => return invalid_body(e),
    };

    match user_service::add_user(repo.get_ref(), request).await {
        Ok(user) => {
            log::info!("✅ User added: {}", user.id);
            HttpResponse::Created()
                .content_type(TEXT_PLAIN)
                .body("User added successfully")
        }
        Err(e) => {
            log::error!("❌ Error adding user: {}", e);
            HttpResponse::InternalServerError()
                .content_type(TEXT_PLAIN)
                .body(format!("Error adding user: {}", e))
        }
    }
}

/// GET /users - Lists every user
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = Vec<UserResponse>),
        (status = 500, description = "Store error", body = String, content_type = "text/plain")
    )
)]
pub async fn list_users(repo: web::Data<dyn UserRepository>) -> impl Responder {
    match user_service::list_users(repo.get_ref()).await {
        Ok(users) => {
            log::info!("📋 Listed {} users", users.len());
            HttpResponse::Ok().json(users)
        }
        Err(e) => {
            log::error!("❌ Error fetching users: {}", e);
            HttpResponse::InternalServerError()
                .content_type(TEXT_PLAIN)
                .body(format!("Error fetching users: {}", e))
        }
    }
}

/// GET /search-users?searchQuery=... - Case-insensitive name search
#[utoipa::path(
    get,
    path = "/search-users",
    tag = "Users",
    params(SearchUsersQuery),
    responses(
        (status = 200, description = "Matching users", body = Vec<UserResponse>),
        (status = 400, description = "Missing searchQuery", body = MessageResponse),
        (status = 404, description = "No name matched", body = MessageResponse),
        (status = 500, description = "Store error", body = MessageResponse)
    )
)]
pub async fn search_users(
    repo: web::Data<dyn UserRepository>,
    query: web::Query<SearchUsersQuery>,
) -> impl Responder {
    let search_query = query.into_inner().search_query;

    match user_service::search_users(repo.get_ref(), search_query.as_deref()).await {
        Ok(users) => {
            log::info!("🔍 Search matched {} users", users.len());
            HttpResponse::Ok().json(users)
        }
        Err(AppError::Validation(msg)) => {
            log::warn!("⚠️ Search rejected: {}", msg);
            HttpResponse::BadRequest().json(MessageResponse::new(msg))
        }
        Err(AppError::NotFound(msg)) => HttpResponse::NotFound().json(MessageResponse::new(msg)),
        Err(AppError::Store(e)) => {
            log::error!("❌ Error searching users: {}", e);
            HttpResponse::InternalServerError().json(MessageResponse::new("Internal server error"))
        }
    }
}

/// DELETE /delete-user/{id} - Removes a user
#[utoipa::path(
    delete,
    path = "/delete-user/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "Unknown identifier", body = MessageResponse),
        (status = 500, description = "Store error", body = MessageResponse)
    )
)]
pub async fn delete_user(
    repo: web::Data<dyn UserRepository>,
    user_id: web::Path<String>,
) -> impl Responder {
    match user_service::delete_user(repo.get_ref(), &user_id).await {
        Ok(user) => {
            log::info!("🗑️  User deleted: {}", user.id);
            HttpResponse::Ok().json(MessageResponse::new("User deleted successfully"))
        }
        Err(AppError::NotFound(msg)) => {
            log::warn!("⚠️ Delete of unknown user {}", user_id);
            HttpResponse::NotFound().json(MessageResponse::new(msg))
        }
        Err(e) => {
            log::error!("❌ Error deleting user {}: {}", user_id, e);
            HttpResponse::InternalServerError()
                .json(MessageResponse::new(format!("Error deleting user: {}", e)))
        }
    }
}

/// PATCH /update-user/{id} - Overwrites the supplied fields
#[utoipa::path(
    patch,
    path = "/update-user/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Malformed JSON body", body = String, content_type = "text/plain"),
        (status = 404, description = "Unknown identifier", body = MessageResponse),
        (status = 500, description = "Store error", body = MessageResponse)
    )
)]
pub async fn update_user(
    repo: web::Data<dyn UserRepository>,
    user_id: web::Path<String>,
    req: HttpRequest,
    body: web::Bytes,
) -> impl Responder {
    let request: UpdateUserRequest = match json_body(&req, &body) {
        Ok(request) => request,
        Err(e) => return invalid_body(e),
    };

    match user_service::update_user(repo.get_ref(), &user_id, request).await {
        Ok(user) => {
            log::info!("🔧 User updated: {}", user.id);
            HttpResponse::Ok().json(user)
        }
        Err(AppError::NotFound(msg)) => {
            log::warn!("⚠️ Update of unknown user {}", user_id);
            HttpResponse::NotFound().json(MessageResponse::new(msg))
        }
        Err(e) => {
            log::error!("❌ Error updating user {}: {}", user_id, e);
            HttpResponse::InternalServerError()
                .json(MessageResponse::new(format!("Error updating user: {}", e)))
        }
    }
}
