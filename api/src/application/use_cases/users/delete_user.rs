use crate::application::ports::user_repository::{UserRepository, UserRepositoryError};

pub struct DeleteUser<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> DeleteUser<'a, R> {
    pub async fn execute(&self, id: i64) -> Result<(), UserRepositoryError> {
        self.repo.delete_by_id(id).await
    }
}
