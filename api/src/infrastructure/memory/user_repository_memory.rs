use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::user_repository::{UserRepository, UserRepositoryError};
use crate::domain::users::user::{NewUser, User};

/// Process-local stand-in for `tb_users`. Ids start at 1 and are never reused.
#[derive(Default)]
pub struct InMemoryUserRepository {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    last_id: i64,
    rows: BTreeMap<i64, User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list_all(&self) -> Result<Vec<User>, UserRepositoryError> {
        Ok(self.state.read().await.rows.values().cloned().collect())
    }

    async fn list_with_min_age(&self, min_age: i64) -> Result<Vec<User>, UserRepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .rows
            .values()
            .filter(|u| u.age.is_some_and(|age| i64::from(age) >= min_age))
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<User, UserRepositoryError> {
        self.state
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or(UserRepositoryError::NotFound)
    }

    async fn insert(&self, user: &NewUser) -> Result<i64, UserRepositoryError> {
        let mut state = self.state.write().await;
        state.last_id += 1;
        let id = state.last_id;
        state.rows.insert(id, user.clone().into_user(id));
        Ok(id)
    }

    async fn update_by_id(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut state = self.state.write().await;
        match state.rows.get_mut(&user.id) {
            Some(row) => {
                *row = user.clone();
                Ok(())
            }
            None => Err(UserRepositoryError::NotUpdated),
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), UserRepositoryError> {
        self.state
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(UserRepositoryError::NotFound)
    }
}
