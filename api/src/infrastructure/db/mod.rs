use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Pool, Postgres};

use crate::bootstrap::config::DatabaseConfig;

pub type PgPool = Pool<Postgres>;

pub fn connect_options(cfg: &DatabaseConfig) -> anyhow::Result<PgConnectOptions> {
    if let Some(url) = &cfg.url {
        return Ok(url.parse()?);
    }
    Ok(PgConnectOptions::new()
        .host(&cfg.host)
        .port(cfg.port)
        .username(&cfg.user)
        .password(&cfg.password)
        .database(&cfg.name))
}

/// Opens the pool and its first connection, so an unreachable database
/// fails here rather than on the first request.
pub async fn connect_pool(cfg: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect_with(connect_options(cfg)?)
        .await?;
    Ok(pool)
}

pub mod repositories;
