use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub database_url: String,
    pub max_connections: u32,
}

impl Config {
    /// Reads from the environment, with `.env` as a fallback for local runs.
    pub fn from_env() -> anyhow::Result<Config> {
        let bind_addr =
            dotenv::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let database_url =
            dotenv::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let max_connections = dotenv::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "16".to_string())
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a number")?;

        Ok(Config {
            bind_addr,
            database_url,
            max_connections,
        })
    }
}
