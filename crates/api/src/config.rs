use stitchflow_core::inventory::StockPolicy;

use crate::auth::session::SessionConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `FRONTEND_URL`.
    pub cors_origins: Vec<String>,
    /// Where OAuth redirects land. The first `FRONTEND_URL` entry.
    pub frontend_url: String,
    /// Public base URL of this server, used to build the OAuth callback.
    pub backend_url: String,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Body limit for `/api/upload` in bytes (default: 10 MiB).
    pub max_upload_bytes: usize,
    /// How order placement treats insufficient fabric stock.
    pub stock_policy: StockPolicy,
    pub database: DatabaseConfig,
    /// Session token signing configuration.
    pub session: SessionConfig,
    /// `None` disables Google sign-in.
    pub google: Option<GoogleOAuthConfig>,
    /// `None` disables uploads.
    pub storage: Option<StorageConfig>,
}

/// PostgreSQL connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Full connection string; wins over the discrete parts.
    pub url: Option<String>,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub max_connections: u32,
}

/// Google OAuth client credentials.
#[derive(Debug, Clone)]
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
}

/// Supabase Storage settings.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub supabase_url: String,
    pub service_key: String,
    pub bucket: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                  |
    /// |------------------------|--------------------------|
    /// | `HOST`                 | `0.0.0.0`                |
    /// | `PORT`                 | `5000`                   |
    /// | `FRONTEND_URL`         | `http://localhost:3000`  |
    /// | `BACKEND_URL`          | `http://localhost:5000`  |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                     |
    /// | `MAX_UPLOAD_BYTES`     | `10485760`               |
    /// | `STOCK_POLICY`         | `permissive`             |
    ///
    /// Database, session, OAuth and storage settings are documented on
    /// their own loaders.
    pub fn from_env() -> Self {
        let host = env_or("HOST", "0.0.0.0");

        let port: u16 = env_or("PORT", "5000")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = split_origins(&env_or("FRONTEND_URL", "http://localhost:3000"));
        let frontend_url = cors_origins
            .first()
            .cloned()
            .unwrap_or_else(|| "http://localhost:3000".into());

        let backend_url = env_or("BACKEND_URL", "http://localhost:5000")
            .trim_end_matches('/')
            .to_string();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let max_upload_bytes: usize = env_or("MAX_UPLOAD_BYTES", "10485760")
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let stock_policy: StockPolicy = env_or("STOCK_POLICY", "permissive")
            .parse()
            .expect("STOCK_POLICY must be 'permissive' or 'strict'");

        Self {
            host,
            port,
            cors_origins,
            frontend_url,
            backend_url,
            request_timeout_secs,
            max_upload_bytes,
            stock_policy,
            database: DatabaseConfig::from_env(),
            session: SessionConfig::from_env(),
            google: GoogleOAuthConfig::from_env(),
            storage: StorageConfig::from_env(),
        }
    }

    /// Redirect URI registered with Google.
    pub fn google_callback_url(&self) -> String {
        format!("{}/auth/google/callback", self.backend_url)
    }
}

impl DatabaseConfig {
    /// | Env Var              | Default      |
    /// |----------------------|--------------|
    /// | `DATABASE_URL`       | unset        |
    /// | `DB_USER`            | `postgres`   |
    /// | `DB_PASSWORD`        | `password`   |
    /// | `DB_HOST`            | `localhost`  |
    /// | `DB_PORT`            | `5432`       |
    /// | `DB_NAME`            | `stitchflow` |
    /// | `DB_MAX_CONNECTIONS` | `20`         |
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
            user: env_or("DB_USER", "postgres"),
            password: env_or("DB_PASSWORD", "password"),
            host: env_or("DB_HOST", "localhost"),
            port: env_or("DB_PORT", "5432")
                .parse()
                .expect("DB_PORT must be a valid u16"),
            name: env_or("DB_NAME", "stitchflow"),
            max_connections: env_or("DB_MAX_CONNECTIONS", "20")
                .parse()
                .expect("DB_MAX_CONNECTIONS must be a valid u32"),
        }
    }

    /// Connection string for the pool.
    pub fn url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                self.user, self.password, self.host, self.port, self.name
            ),
        }
    }
}

impl GoogleOAuthConfig {
    /// Reads `GOOGLE_CLIENT_ID` and `GOOGLE_CLIENT_SECRET`; both must be set.
    pub fn from_env() -> Option<Self> {
        let client_id = non_empty_env("GOOGLE_CLIENT_ID")?;
        let client_secret = non_empty_env("GOOGLE_CLIENT_SECRET")?;
        Some(Self {
            client_id,
            client_secret,
        })
    }
}

impl StorageConfig {
    /// Reads `SUPABASE_URL`, `SUPABASE_SERVICE_KEY` (both required) and
    /// `STORAGE_BUCKET` (default `images`).
    pub fn from_env() -> Option<Self> {
        let supabase_url = non_empty_env("SUPABASE_URL")?;
        let service_key = non_empty_env("SUPABASE_SERVICE_KEY")?;
        Some(Self {
            supabase_url: supabase_url.trim_end_matches('/').to_string(),
            service_key,
            bucket: env_or("STORAGE_BUCKET", "images"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Split a comma-separated origin list, dropping blanks and trailing slashes.
pub fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
