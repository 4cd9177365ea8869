use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::utils::AppError;

/// User record as stored in the `users` collection
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
}

/// Request body for POST /add-user
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct AddUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Request body for PATCH /update-user/{id}
///
/// Omitted fields keep their stored value.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Fields to overwrite on an existing record
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Query string for GET /search-users
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchUsersQuery {
    /// Case-insensitive substring matched against the user name
    #[serde(rename = "searchQuery")]
    pub search_query: Option<String>,
}

/// User as returned over HTTP
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse { message: message.into() }
    }
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        UserResponse {
            id: u.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: u.name,
            email: u.email,
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

fn required_message(field: &str) -> String {
    format!("{}: Path `{}` is required.", field, field)
}

impl AddUserRequest {
    /// Presence check applied before the record is written
    pub fn into_user(self) -> Result<User, AppError> {
        let mut missing = Vec::new();
        if is_blank(&self.name) {
            missing.push(required_message("name"));
        }
        if is_blank(&self.email) {
            missing.push(required_message("email"));
        }
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "User validation failed: {}",
                missing.join(", ")
            )));
        }

        Ok(User {
            id: None,
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
        })
    }
}

impl UpdateUserRequest {
    /// Supplied fields must be non-empty; omitted ones are left alone
    pub fn into_changes(self) -> Result<UserChanges, AppError> {
        let mut rejected = Vec::new();
        if matches!(self.name.as_deref(), Some("")) {
            rejected.push(required_message("name"));
        }
        if matches!(self.email.as_deref(), Some("")) {
            rejected.push(required_message("email"));
        }
        if !rejected.is_empty() {
            return Err(AppError::Validation(format!(
                "Validation failed: {}",
                rejected.join(", ")
            )));
        }

        Ok(UserChanges {
            name: self.name,
            email: self.email,
        })
    }
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}
