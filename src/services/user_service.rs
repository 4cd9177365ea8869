// ==================== USER MANAGEMENT ====================
// Request validation and repository calls behind the /users routes.
// Handlers decide how each AppError is rendered.

use mongodb::bson::oid::ObjectId;

use crate::{
    models::{AddUserRequest, UpdateUserRequest, UserResponse},
    repository::UserRepository,
    utils::AppError,
};

pub const USER_NOT_FOUND: &str = "User not found";
pub const NO_USERS_FOUND: &str = "No users found";
pub const SEARCH_QUERY_REQUIRED: &str = "Search query is required";

/// Identifiers that are not ObjectIds cannot match any record
fn parse_user_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::NotFound(USER_NOT_FOUND.to_string()))
}

/// POST /add-user
pub async fn add_user(
    repo: &dyn UserRepository,
    request: AddUserRequest,
) -> Result<UserResponse, AppError> {
    let user = request.into_user()?;
    let created = repo.insert(user).await?;
    Ok(UserResponse::from(created))
}

/// GET /users
pub async fn list_users(repo: &dyn UserRepository) -> Result<Vec<UserResponse>, AppError> {
    let users = repo.list().await?;
    Ok(users.into_iter().map(UserResponse::from).collect())
}

/// GET /search-users
///
/// An absent or empty query never reaches the repository.
pub async fn search_users(
    repo: &dyn UserRepository,
    search_query: Option<&str>,
) -> Result<Vec<UserResponse>, AppError> {
    let needle = match search_query {
        Some(q) if !q.is_empty() => q,
        _ => return Err(AppError::Validation(SEARCH_QUERY_REQUIRED.to_string())),
    };

    let users = repo.search_by_name(needle).await?;
    if users.is_empty() {
        return Err(AppError::NotFound(NO_USERS_FOUND.to_string()));
    }

    Ok(users.into_iter().map(UserResponse::from).collect())
}

/// PATCH /update-user/{id}
pub async fn update_user(
    repo: &dyn UserRepository,
    user_id: &str,
    request: UpdateUserRequest,
) -> Result<UserResponse, AppError> {
    let id = parse_user_id(user_id)?;
    let changes = request.into_changes()?;

    repo.update(id, changes)
        .await?
        .map(UserResponse::from)
        .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))
}

/// DELETE /delete-user/{id}
pub async fn delete_user(repo: &dyn UserRepository, user_id: &str) -> Result<UserResponse, AppError> {
    let id = parse_user_id(user_id)?;

    repo.delete(id)
        .await?
        .map(UserResponse::from)
        .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryUserRepository, UnavailableUserRepository};

    fn add_request(name: &str, email: &str) -> AddUserRequest {
        AddUserRequest { name: Some(name.into()), email: Some(email.into()) }
    }

    #[tokio::test]
    async fn test_add_rejects_missing_fields_without_persisting() {
        let repo = InMemoryUserRepository::new();
        let err = add_user(&repo, AddUserRequest { name: Some("A".into()), email: None })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(repo.len().await, 0);
    }

    #[tokio::test]
    async fn test_search_without_query_skips_repository() {
        // An unavailable repository would turn any lookup into a Store error
        let repo = UnavailableUserRepository::new("down");
        assert_eq!(
            search_users(&repo, None).await.unwrap_err(),
            AppError::Validation(SEARCH_QUERY_REQUIRED.to_string())
        );
        assert_eq!(
            search_users(&repo, Some("")).await.unwrap_err(),
            AppError::Validation(SEARCH_QUERY_REQUIRED.to_string())
        );
    }

    #[tokio::test]
    async fn test_search_no_match_is_not_found() {
        let repo = InMemoryUserRepository::new();
        add_user(&repo, add_request("Xavier", "x@x.com")).await.unwrap();

        let found = search_users(&repo, Some("xav")).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(
            search_users(&repo, Some("zed")).await.unwrap_err(),
            AppError::NotFound(NO_USERS_FOUND.to_string())
        );
    }

    #[tokio::test]
    async fn test_update_keeps_omitted_fields() {
        let repo = InMemoryUserRepository::new();
        let created = add_user(&repo, add_request("Ada", "ada@x.com")).await.unwrap();

        let updated = update_user(
            &repo,
            &created.id,
            UpdateUserRequest { name: Some("Ada L".into()), email: None },
        )
        .await
        .unwrap();
        assert_eq!(updated.name, "Ada L");
        assert_eq!(updated.email, "ada@x.com");

        let unchanged = update_user(&repo, &created.id, UpdateUserRequest::default())
            .await
            .unwrap();
        assert_eq!(unchanged, updated);
    }

    #[tokio::test]
    async fn test_malformed_id_is_not_found() {
        let repo = InMemoryUserRepository::new();
        assert_eq!(
            delete_user(&repo, "not-an-id").await.unwrap_err(),
            AppError::NotFound(USER_NOT_FOUND.to_string())
        );
        assert_eq!(
            update_user(&repo, "not-an-id", UpdateUserRequest::default())
                .await
                .unwrap_err(),
            AppError::NotFound(USER_NOT_FOUND.to_string())
        );
    }

    #[tokio::test]
    async fn test_store_errors_propagate() {
        let repo = UnavailableUserRepository::new("connection refused");
        assert_eq!(
            list_users(&repo).await.unwrap_err(),
            AppError::Store("connection refused".to_string())
        );
        let err = delete_user(&repo, &ObjectId::new().to_hex()).await.unwrap_err();
        assert_eq!(err, AppError::Store("connection refused".to_string()));
    }
}
