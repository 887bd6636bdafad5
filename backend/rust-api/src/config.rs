use serde::Deserialize;
use std::env;

const DEFAULT_DB_PATH: &str = "./english_learning_town.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
    /// `username:password` expected on the /metrics endpoint
    pub metrics_auth: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        // Determine environment (defaults to dev)
        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // Build configuration from config/*.toml + ENV overrides
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            // Override with environment variables (prefix: APP_)
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let database_url = settings
            .get_string("database.url")
            .or_else(|_| env::var("DATABASE_URL"))
            .unwrap_or_else(|_| {
                let path = env::var("DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
                sqlite_url_for_path(&path)
            });

        let max_connections = match settings.get::<u32>("database.max_connections") {
            Ok(0) => {
                return Err(config::ConfigError::Message(
                    "database.max_connections must be greater than zero".to_string(),
                ))
            }
            Ok(value) => value,
            Err(config::ConfigError::NotFound(_)) => DEFAULT_MAX_CONNECTIONS,
            Err(e) => return Err(e),
        };

        let host = settings
            .get_string("server.host")
            .unwrap_or_else(|_| DEFAULT_HOST.to_string());

        let port = match settings.get::<u16>("server.port") {
            Ok(port) => port,
            Err(config::ConfigError::NotFound(_)) => match env::var("PORT") {
                Ok(raw) => raw.parse::<u16>().map_err(|_| {
                    config::ConfigError::Message(format!("PORT is not a valid port: {}", raw))
                })?,
                Err(_) => DEFAULT_PORT,
            },
            Err(e) => return Err(e),
        };

        let metrics_auth = settings
            .get_string("metrics.auth")
            .or_else(|_| env::var("METRICS_AUTH"))
            .unwrap_or_else(|_| {
                if env == "prod" {
                    eprintln!("WARNING: METRICS_AUTH not set, /metrics uses default credentials");
                }
                "admin:changeme".to_string()
            });

        Ok(Config {
            database_url,
            max_connections,
            host,
            port,
            metrics_auth,
        })
    }

    /// Configuration pointing at an explicit database, everything else default.
    pub fn for_database(database_url: impl Into<String>) -> Self {
        Config {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            metrics_auth: "admin:changeme".to_string(),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Turns a plain file path (the `DB_PATH` convention) into a sqlx SQLite URL.
fn sqlite_url_for_path(path: &str) -> String {
    if path.starts_with("sqlite:") {
        path.to_string()
    } else if path == ":memory:" {
        "sqlite::memory:".to_string()
    } else {
        format!("sqlite://{}", path)
    }
}
