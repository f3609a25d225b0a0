use crate::application::ports::user_repository::{UserRepository, UserRepositoryError};
use crate::domain::users::user::User;

pub struct ListUsers<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> ListUsers<'a, R> {
    /// `min_age: None` lists every user; `Some(n)` keeps users with `age >= n`.
    pub async fn execute(&self, min_age: Option<i64>) -> Result<Vec<User>, UserRepositoryError> {
        match min_age {
            Some(min_age) => self.repo.list_with_min_age(min_age).await,
            None => self.repo.list_all().await,
        }
    }
}
