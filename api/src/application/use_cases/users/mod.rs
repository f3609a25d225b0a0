use crate::application::ports::user_repository::UserRepositoryError;
use crate::domain::users::birthday::BirthdayError;

pub mod create_user;
pub mod delete_user;
pub mod get_user;
pub mod list_users;
pub mod update_user;

/// Failure of a write that derives `age` from the submitted birthday.
#[derive(thiserror::Error, Debug)]
pub enum UserCommandError {
    #[error("invalid birthday")]
    InvalidBirthday(#[from] BirthdayError),
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}
