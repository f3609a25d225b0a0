use chrono::NaiveDate;

use super::UserCommandError;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::birthday::derive_age;
use crate::domain::users::user::NewUser;

pub struct CreateUser<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
    /// Reference date for the age derivation.
    pub today: NaiveDate,
}

impl<'a, R: UserRepository + ?Sized> CreateUser<'a, R> {
    /// Inserts `user` and returns the new id. A client-supplied `age` is
    /// discarded: it is derived from `birthday` or left null.
    pub async fn execute(&self, mut user: NewUser) -> Result<i64, UserCommandError> {
        user.age = match user.birthday.as_deref() {
            Some(raw) => Some(derive_age(raw, self.today)?),
            None => None,
        };
        Ok(self.repo.insert(&user).await?)
    }
}
