use serde::Deserialize;

/// SMTP relay settings. Absent entirely when `SMTP_HOST` is unset — the
/// application treats mail as an optional capability, not a hard dependency.
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_email: String,
    pub from_name: String,
}

impl SmtpConfig {
    pub fn from_env() -> anyhow::Result<Option<Self>> {
        let host = match std::env::var("SMTP_HOST") {
            Ok(h) => h,
            Err(_) => return Ok(None),
        };
        Ok(Some(Self {
            host,
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(587),
            username: std::env::var("SMTP_USERNAME")?,
            password: std::env::var("SMTP_PASSWORD")?,
            from_email: std::env::var("SMTP_FROM_EMAIL")?,
            from_name: std::env::var("SMTP_FROM_NAME").unwrap_or_else(|_| "UAN Films".into()),
        }))
    }
}

/// S3-compatible blob store settings, read by the worker binary.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub endpoint: String,
    pub container: String,
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
}

impl StorageConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            endpoint: std::env::var("STORAGE_ENDPOINT")?,
            container: std::env::var("STORAGE_CONTAINER").unwrap_or_else(|_| "resenas".into()),
            access_key: std::env::var("STORAGE_ACCESS_KEY")?,
            secret_key: std::env::var("STORAGE_SECRET_KEY")?,
            region: std::env::var("STORAGE_REGION").unwrap_or_else(|_| "us-east-1".into()),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub base_url: String,
    pub public_dir: String,
    pub processor_url: Option<String>,
    pub smtp: Option<SmtpConfig>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")?,
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            public_dir: std::env::var("PUBLIC_DIR").unwrap_or_else(|_| "../Frontend".into()),
            processor_url: std::env::var("PROCESSOR_URL").ok(),
            smtp: SmtpConfig::from_env()?,
        })
    }
}
