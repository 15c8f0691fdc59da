//! MongoDB implementation of the `UserRepository` trait.

use async_trait::async_trait;
use bson::doc;
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::{Collection, Database};
use tracing::debug;

use gif_core::{NewUser, RepositoryError, User, UserRepository};

use super::USERS;
use super::documents::{UserDocument, is_duplicate_key, parse_id, storage};

pub struct MongoUserRepository {
    users: Collection<UserDocument>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            users: db.collection(USERS),
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let mut document = UserDocument::new(user, Utc::now());
        let result = self.users.insert_one(&document).await.map_err(|e| {
            if is_duplicate_key(&e) {
                RepositoryError::AlreadyExists(format!("User with email {}", user.email))
            } else {
                storage(&e)
            }
        })?;
        document.id = result.inserted_id.as_object_id();
        debug!(target: "gif.db", id = ?document.id, "Inserted user");
        User::try_from(document)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        self.users
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| storage(&e))?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, RepositoryError> {
        let oid = parse_id(id)?;
        self.users
            .find_one(doc! { "_id": oid })
            .await
            .map_err(|e| storage(&e))?
            .map(User::try_from)
            .transpose()
    }

    async fn list(&self, limit: u32) -> Result<Vec<User>, RepositoryError> {
        let documents: Vec<UserDocument> = self
            .users
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .limit(i64::from(limit))
            .await
            .map_err(|e| storage(&e))?
            .try_collect()
            .await
            .map_err(|e| storage(&e))?;
        documents.into_iter().map(User::try_from).collect()
    }
}
