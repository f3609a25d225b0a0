use async_trait::async_trait;

use crate::domain::users::user::{NewUser, User};

#[derive(thiserror::Error, Debug)]
pub enum UserRepositoryError {
    /// No row with the requested id (single-row read or delete).
    #[error("user not found")]
    NotFound,
    /// An update touched zero rows.
    #[error("user not updated")]
    NotUpdated,
    #[error("user storage failure")]
    Other(#[source] anyhow::Error),
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<User>, UserRepositoryError>;
    async fn list_with_min_age(&self, min_age: i64) -> Result<Vec<User>, UserRepositoryError>;
    async fn get_by_id(&self, id: i64) -> Result<User, UserRepositoryError>;
    async fn insert(&self, user: &NewUser) -> Result<i64, UserRepositoryError>;
    /// Overwrites every mutable column of the row keyed by `user.id`.
    async fn update_by_id(&self, user: &User) -> Result<(), UserRepositoryError>;
    async fn delete_by_id(&self, id: i64) -> Result<(), UserRepositoryError>;
}
