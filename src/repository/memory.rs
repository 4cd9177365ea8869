use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use regex::RegexBuilder;
use tokio::sync::RwLock;

use super::{literal_pattern, UserRepository};
use crate::models::{User, UserChanges};
use crate::utils::AppError;

/// Insertion-ordered store used as a test double for MongoDB
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

fn apply_changes(user: &mut User, changes: &UserChanges) {
    if let Some(name) = &changes.name {
        user.name = name.clone();
    }
    if let Some(email) = &changes.email {
        user.email = email.clone();
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, mut user: User) -> Result<User, AppError> {
        user.id = Some(ObjectId::new());
        self.users.write().await.push(user.clone());
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.read().await.clone())
    }

    async fn search_by_name(&self, needle: &str) -> Result<Vec<User>, AppError> {
        let matcher = RegexBuilder::new(&literal_pattern(needle))
            .case_insensitive(true)
            .build()
            .map_err(|e| AppError::Store(e.to_string()))?;

        Ok(self
            .users
            .read()
            .await
            .iter()
            .filter(|u| matcher.is_match(&u.name))
            .cloned()
            .collect())
    }

    async fn update(&self, id: ObjectId, changes: UserChanges) -> Result<Option<User>, AppError> {
        let mut users = self.users.write().await;
        Ok(users.iter_mut().find(|u| u.id == Some(id)).map(|user| {
            apply_changes(user, &changes);
            user.clone()
        }))
    }

    async fn delete(&self, id: ObjectId) -> Result<Option<User>, AppError> {
        let mut users = self.users.write().await;
        Ok(users
            .iter()
            .position(|u| u.id == Some(id))
            .map(|idx| users.remove(idx)))
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.iter().find(|u| u.id == Some(id)).cloned())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> User {
        User { id: None, name: name.to_string(), email: format!("{}@example.com", name.to_lowercase()) }
    }

    #[tokio::test]
    async fn test_insert_assigns_fresh_ids() {
        let repo = InMemoryUserRepository::new();
        let a = repo.insert(user("Ada")).await.unwrap();
        let b = repo.insert(user("Ada")).await.unwrap();
        assert!(a.id.is_some());
        assert_ne!(a.id, b.id);
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_and_literal() {
        let repo = InMemoryUserRepository::new();
        repo.insert(user("Xavier")).await.unwrap();
        repo.insert(user("abc")).await.unwrap();

        assert_eq!(repo.search_by_name("xAV").await.unwrap().len(), 1);
        assert!(repo.search_by_name("a.c").await.unwrap().is_empty());
        assert!(repo.search_by_name(".*").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_overwrites_only_supplied_fields() {
        let repo = InMemoryUserRepository::new();
        let created = repo.insert(user("Old")).await.unwrap();

        let updated = repo
            .update(created.id.unwrap(), UserChanges { name: Some("New".into()), email: None })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "New");
        assert_eq!(updated.email, "old@example.com");
        assert!(repo.update(ObjectId::new(), UserChanges::default()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_only_target() {
        let repo = InMemoryUserRepository::new();
        let keep = repo.insert(user("Keep")).await.unwrap();
        let gone = repo.insert(user("Gone")).await.unwrap();

        let removed = repo.delete(gone.id.unwrap()).await.unwrap();
        assert_eq!(removed.map(|u| u.name), Some("Gone".to_string()));
        assert!(repo.delete(gone.id.unwrap()).await.unwrap().is_none());
        assert_eq!(repo.list().await.unwrap(), vec![keep]);
    }
}
