// ==================== USER REPOSITORY ====================
// Storage port used by the HTTP handlers. The MongoDB adapter is the
// production implementation; tests run against the in-memory one.

pub mod mongo;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::models::{User, UserChanges};
use crate::utils::AppError;

pub use mongo::MongoUserRepository;
#[cfg(test)]
pub use memory::InMemoryUserRepository;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persists a new record and returns it with its generated id
    async fn insert(&self, user: User) -> Result<User, AppError>;

    /// All records in store-native order
    async fn list(&self) -> Result<Vec<User>, AppError>;

    /// Records whose name contains `needle`, ignoring case
    async fn search_by_name(&self, needle: &str) -> Result<Vec<User>, AppError>;

    /// Applies `changes` and returns the post-update record, `None` if absent
    async fn update(&self, id: ObjectId, changes: UserChanges) -> Result<Option<User>, AppError>;

    /// Removes the record and returns it, `None` if absent
    async fn delete(&self, id: ObjectId) -> Result<Option<User>, AppError>;

    /// Looks up a single record, `None` if absent
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, AppError>;

    /// Round trip to the store, used by /health
    async fn ping(&self) -> Result<(), AppError>;
}

/// Installed when the startup connection fails: every call reports the
/// original connection error so requests fail one by one.
pub struct UnavailableUserRepository {
    reason: String,
}

impl UnavailableUserRepository {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    fn error(&self) -> AppError {
        AppError::Store(self.reason.clone())
    }
}

#[async_trait]
impl UserRepository for UnavailableUserRepository {
    async fn insert(&self, _user: User) -> Result<User, AppError> {
        Err(self.error())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        Err(self.error())
    }

    async fn search_by_name(&self, _needle: &str) -> Result<Vec<User>, AppError> {
        Err(self.error())
    }

    async fn update(&self, _id: ObjectId, _changes: UserChanges) -> Result<Option<User>, AppError> {
        Err(self.error())
    }

    async fn delete(&self, _id: ObjectId) -> Result<Option<User>, AppError> {
        Err(self.error())
    }

    async fn find_by_id(&self, _id: ObjectId) -> Result<Option<User>, AppError> {
        Err(self.error())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(self.error())
    }
}

/// Regex source matching `needle` literally
pub fn literal_pattern(needle: &str) -> String {
    regex::escape(needle)
}
