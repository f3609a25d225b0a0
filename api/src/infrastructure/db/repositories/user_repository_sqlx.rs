use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::user_repository::{UserRepository, UserRepositoryError};
use crate::domain::users::user::{NewUser, User};
use crate::infrastructure::db::PgPool;

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl From<sqlx::Error> for UserRepositoryError {
    fn from(err: sqlx::Error) -> Self {
        UserRepositoryError::Other(err.into())
    }
}

fn map_user(r: &PgRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: r.try_get("id")?,
        name: r.try_get("name")?,
        birthday: r.try_get("birthday")?,
        age: r.try_get("age")?,
        is_male: r.try_get("is_male")?,
    })
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn list_all(&self) -> Result<Vec<User>, UserRepositoryError> {
        let rows = sqlx::query(
            r#"SELECT id::BIGINT AS id, name, birthday, age, is_male
               FROM tb_users
               ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(map_user).collect::<Result<Vec<_>, _>>()?)
    }

    async fn list_with_min_age(&self, min_age: i64) -> Result<Vec<User>, UserRepositoryError> {
        let rows = sqlx::query(
            r#"SELECT id::BIGINT AS id, name, birthday, age, is_male
               FROM tb_users
               WHERE age >= $1
               ORDER BY id"#,
        )
        .bind(min_age)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(map_user).collect::<Result<Vec<_>, _>>()?)
    }

    async fn get_by_id(&self, id: i64) -> Result<User, UserRepositoryError> {
        let row = sqlx::query(
            r#"SELECT id::BIGINT AS id, name, birthday, age, is_male
               FROM tb_users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some(r) => Ok(map_user(&r)?),
            None => Err(UserRepositoryError::NotFound),
        }
    }

    async fn insert(&self, user: &NewUser) -> Result<i64, UserRepositoryError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"INSERT INTO tb_users (name, birthday, age, is_male) VALUES ($1, $2, $3, $4)
               RETURNING id::BIGINT"#,
        )
        .bind(user.name.as_deref())
        .bind(user.birthday.as_deref())
        .bind(user.age)
        .bind(user.is_male)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update_by_id(&self, user: &User) -> Result<(), UserRepositoryError> {
        let res = sqlx::query(
            r#"UPDATE tb_users SET name = $2, birthday = $3, age = $4, is_male = $5
               WHERE id = $1"#,
        )
        .bind(user.id)
        .bind(user.name.as_deref())
        .bind(user.birthday.as_deref())
        .bind(user.age)
        .bind(user.is_male)
        .execute(&self.pool)
        .await?;
        if res.rows_affected() == 0 {
            return Err(UserRepositoryError::NotUpdated);
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), UserRepositoryError> {
        let res = sqlx::query("DELETE FROM tb_users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(UserRepositoryError::NotFound);
        }
        Ok(())
    }
}
