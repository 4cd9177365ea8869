use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ReturnDocument;
use mongodb::Collection;

use super::{literal_pattern, UserRepository};
use crate::database::{MongoDB, USERS_COLLECTION};
use crate::models::{User, UserChanges};
use crate::utils::AppError;

pub struct MongoUserRepository {
    db: MongoDB,
}

impl MongoUserRepository {
    pub fn new(db: MongoDB) -> Self {
        Self { db }
    }

    fn users(&self) -> Collection<User> {
        self.db.collection::<User>(USERS_COLLECTION)
    }
}

fn set_document(changes: &UserChanges) -> Document {
    let mut set = Document::new();
    if let Some(name) = &changes.name {
        set.insert("name", name.as_str());
    }
    if let Some(email) = &changes.email {
        set.insert("email", email.as_str());
    }
    set
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn insert(&self, user: User) -> Result<User, AppError> {
        let result = self.users().insert_one(&user).await?;
        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::Store("Inserted id is not an ObjectId".to_string()))?;

        Ok(User { id: Some(id), ..user })
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let cursor = self.users().find(doc! {}).await?;
        let users: Vec<User> = cursor.try_collect().await?;
        Ok(users)
    }

    async fn search_by_name(&self, needle: &str) -> Result<Vec<User>, AppError> {
        let filter = doc! {
            "name": { "$regex": literal_pattern(needle), "$options": "i" }
        };
        let cursor = self.users().find(filter).await?;
        let users: Vec<User> = cursor.try_collect().await?;
        Ok(users)
    }

    async fn update(&self, id: ObjectId, changes: UserChanges) -> Result<Option<User>, AppError> {
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        let updated = self
            .users()
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set_document(&changes) })
            .return_document(ReturnDocument::After)
            .await?;

        Ok(updated)
    }

    async fn delete(&self, id: ObjectId) -> Result<Option<User>, AppError> {
        Ok(self.users().find_one_and_delete(doc! { "_id": id }).await?)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, AppError> {
        Ok(self.users().find_one(doc! { "_id": id }).await?)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(self.db.ping().await?)
    }
}
