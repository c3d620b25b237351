use std::env;
use std::time::Duration;
use anyhow::{Context, Result};
use reqwest::Url;

const DEFAULT_BACKEND_PORT: u16 = 5000;
const DEFAULT_FRONTEND_PORT: u16 = 8080;
const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Backend API settings: listening port plus the Name Store connection.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub port: u16,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    pub ssl_mode: String,
    pub max_connections: u32,
    pub connection_timeout: Duration,
}

/// Frontend settings: listening port and where the Backend API lives.
#[derive(Debug, Clone)]
pub struct FrontendConfig {
    pub port: u16,
    pub backend_url: Url,
    pub request_timeout: Duration,
}

impl BackendConfig {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenvy::dotenv().ok();

        let port = read_port(DEFAULT_BACKEND_PORT)?;
        let database = DatabaseConfig::from_env()?;
        database.validate()?;

        Ok(BackendConfig { port, database })
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());

        let port = env::var("DB_PORT")
            .unwrap_or_else(|_| "5432".to_string())
            .parse::<u16>()
            .context("DB_PORT must be a valid port number")?;

        let database = env::var("DB_NAME").unwrap_or_else(|_| "baby_names".to_string());
        let username = env::var("DB_USER").unwrap_or_else(|_| "app_user".to_string());
        let password = env::var("DB_PASSWORD").unwrap_or_else(|_| "app_password".to_string());

        let ssl_mode = env::var("DB_SSL_MODE").unwrap_or_else(|_| "prefer".to_string());

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let connection_timeout_secs = env::var("DB_CONNECTION_TIMEOUT")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u64>()
            .context("DB_CONNECTION_TIMEOUT must be a valid number of seconds")?;

        Ok(DatabaseConfig {
            host,
            port,
            database,
            username,
            password,
            ssl_mode,
            max_connections,
            connection_timeout: Duration::from_secs(connection_timeout_secs),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            anyhow::bail!("Database host cannot be empty");
        }

        if self.port == 0 {
            anyhow::bail!("Database port must be greater than 0");
        }

        if self.database.trim().is_empty() {
            anyhow::bail!("Database name cannot be empty");
        }

        if self.username.trim().is_empty() {
            anyhow::bail!("Database username cannot be empty");
        }

        match self.ssl_mode.as_str() {
            "disable" | "prefer" | "require" => {}
            _ => anyhow::bail!("Invalid SSL mode. Must be one of: disable, prefer, require"),
        }

        if self.max_connections == 0 {
            anyhow::bail!("Max connections must be greater than 0");
        }

        if self.connection_timeout.as_secs() == 0 {
            anyhow::bail!("Connection timeout must be greater than 0");
        }

        Ok(())
    }
}

impl FrontendConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let port = read_port(DEFAULT_FRONTEND_PORT)?;

        let raw_url = env::var("BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        let backend_url = parse_backend_url(&raw_url)?;

        let timeout_secs = env::var("BACKEND_TIMEOUT")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u64>()
            .context("BACKEND_TIMEOUT must be a valid number of seconds")?;
        if timeout_secs == 0 {
            anyhow::bail!("BACKEND_TIMEOUT must be greater than 0");
        }

        Ok(FrontendConfig {
            port,
            backend_url,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// `BACKEND_URL` must be an absolute http(s) URL that can carry path segments.
pub fn parse_backend_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .with_context(|| format!("BACKEND_URL is not a valid URL: {}", raw))?;

    match url.scheme() {
        "http" | "https" => {}
        other => anyhow::bail!("BACKEND_URL must use http or https, got '{}'", other),
    }

    if url.cannot_be_a_base() {
        anyhow::bail!("BACKEND_URL cannot be used as a base URL");
    }

    Ok(url)
}

fn read_port(default: u16) -> Result<u16> {
    let port = match env::var("PORT") {
        Ok(value) => value
            .parse::<u16>()
            .context("PORT must be a valid port number")?,
        Err(_) => default,
    };

    if port == 0 {
        anyhow::bail!("PORT must be greater than 0");
    }

    Ok(port)
}
