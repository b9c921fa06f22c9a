use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub object_store: ObjectStoreConfig,
    pub short_links: ShortLinkConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub backend: DatabaseBackend,
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    Sqlite,
    Postgres,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectStoreConfig {
    pub provider: ObjectStoreProvider,
    /// Lifetime of the signed retrieval URLs handed out at upload time
    pub presign_ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ObjectStoreProvider {
    S3 {
        bucket: String,
        region: String,
        access_key_id: String,
        secret_access_key: String,
        #[serde(default)]
        endpoint: Option<String>,
    },
    /// In-process store for local development; nothing survives a restart
    Memory { bucket: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortLinkConfig {
    /// Prefix every short code is appended to, e.g. `http://host:8000/api/get-file/`
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub max_file_bytes: usize,
}

impl DatabaseConfig {
    /// Database settings alone, for tools that never touch the object store
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let backend_str =
            std::env::var("DATABASE_BACKEND").unwrap_or_else(|_| "sqlite".to_string());

        let backend = match backend_str.to_lowercase().as_str() {
            "postgres" | "postgresql" => DatabaseBackend::Postgres,
            _ => DatabaseBackend::Sqlite,
        };

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://./sharelink.db?mode=rwc".to_string());

        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?;

        Ok(DatabaseConfig {
            backend,
            url: database_url,
            max_connections,
        })
    }
}

impl ObjectStoreConfig {
    pub const DEFAULT_PRESIGN_TTL_SECS: u64 = 900;
}

impl ShortLinkConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://127.0.0.1:8000/api/get-file/";

    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("SHORT_URL_LINK")
                .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string()),
        }
    }
}

impl UploadConfig {
    pub const DEFAULT_MAX_FILE_MB: usize = 100;

    /// Limit of `megabytes` MB, saturating at `usize::MAX` bytes
    pub fn from_megabytes(megabytes: usize) -> Self {
        Self {
            max_file_bytes: megabytes.saturating_mul(1024 * 1024),
        }
    }

    /// Limit of `megabytes` MB, or `None` if that many bytes cannot be represented
    pub fn checked_from_megabytes(megabytes: usize) -> Option<Self> {
        megabytes
            .checked_mul(1024 * 1024)
            .map(|max_file_bytes| Self { max_file_bytes })
    }

    /// Limit in whole megabytes, as reported to clients
    pub fn max_file_mb(&self) -> usize {
        self.max_file_bytes / (1024 * 1024)
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self::from_megabytes(Self::DEFAULT_MAX_FILE_MB)
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database = DatabaseConfig::from_env()?;

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let provider = match std::env::var("OBJECT_STORE")
            .unwrap_or_else(|_| "s3".to_string())
            .to_lowercase()
            .as_str()
        {
            "memory" => {
                tracing::warn!("OBJECT_STORE=memory: uploads are kept in process memory only");
                ObjectStoreProvider::Memory {
                    bucket: std::env::var("AWS_BUCKET_NAME")
                        .unwrap_or_else(|_| "sharelink".to_string()),
                }
            }
            other => {
                if other != "s3" {
                    tracing::warn!(
                        "Unknown OBJECT_STORE '{other}', falling back to 's3'. Supported values: s3, memory"
                    );
                }
                ObjectStoreProvider::S3 {
                    bucket: std::env::var("AWS_BUCKET_NAME")
                        .context("AWS_BUCKET_NAME must be set when OBJECT_STORE=s3")?,
                    region: std::env::var("AWS_REGION")
                        .unwrap_or_else(|_| "ap-south-1".to_string()),
                    access_key_id: std::env::var("AWS_ACCESS_KEY")
                        .context("AWS_ACCESS_KEY must be set when OBJECT_STORE=s3")?,
                    secret_access_key: std::env::var("AWS_SECRET_ACCESS_KEY")
                        .context("AWS_SECRET_ACCESS_KEY must be set when OBJECT_STORE=s3")?,
                    endpoint: std::env::var("AWS_ENDPOINT").ok(),
                }
            }
        };

        let presign_ttl_secs = std::env::var("PRESIGN_TTL_SECS")
            .ok()
            .map(|v| v.parse::<u64>())
            .transpose()
            .context("PRESIGN_TTL_SECS must be a number of seconds")?
            .unwrap_or(ObjectStoreConfig::DEFAULT_PRESIGN_TTL_SECS);

        let max_file_mb = std::env::var("MAX_UPLOAD_MB")
            .ok()
            .map(|v| v.parse::<usize>())
            .transpose()
            .context("MAX_UPLOAD_MB must be a whole number of megabytes")?
            .unwrap_or(UploadConfig::DEFAULT_MAX_FILE_MB);
        let upload = UploadConfig::checked_from_megabytes(max_file_mb)
            .context("MAX_UPLOAD_MB is too large")?;

        Ok(Config {
            database,
            server: ServerConfig { host, port },
            object_store: ObjectStoreConfig {
                provider,
                presign_ttl_secs,
            },
            short_links: ShortLinkConfig::from_env(),
            upload,
        })
    }
}
