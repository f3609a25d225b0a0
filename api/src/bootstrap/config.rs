use std::env;
use std::fmt;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_port: u16,
    pub database: DatabaseConfig,
    pub shutdown_grace_secs: u64,
    pub request_timeout_secs: u64,
}

/// Connection parameters. `url`, when set, replaces the discrete fields.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let api_port = lookup("API_PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(8000);
        let database = DatabaseConfig {
            url: non_empty("DATABASE_URL"),
            host: non_empty("DB_HOST").unwrap_or_else(|| "localhost".into()),
            port: lookup("DB_PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(5432),
            user: non_empty("DB_USER").unwrap_or_else(|| "postgres".into()),
            password: lookup("DB_PASSWORD").unwrap_or_default(),
            name: non_empty("DB_NAME").unwrap_or_else(|| "postgres".into()),
        };
        let shutdown_grace_secs = lookup("SHUTDOWN_GRACE_SECS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(3);
        let request_timeout_secs = lookup("REQUEST_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        if request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Self {
            api_port,
            database,
            shutdown_grace_secs,
            request_timeout_secs,
        })
    }
}
