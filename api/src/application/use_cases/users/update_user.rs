use chrono::NaiveDate;

use super::UserCommandError;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::birthday::derive_age;
use crate::domain::users::user::User;

pub struct UpdateUser<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
    pub today: NaiveDate,
}

impl<'a, R: UserRepository + ?Sized> UpdateUser<'a, R> {
    /// Full-record update. `age` is taken from the record unless a birthday
    /// is present, in which case it is re-derived.
    pub async fn execute(&self, mut user: User) -> Result<(), UserCommandError> {
        if let Some(raw) = user.birthday.as_deref() {
            user.age = Some(derive_age(raw, self.today)?);
        }
        Ok(self.repo.update_by_id(&user).await?)
    }
}
