use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

/// Blob-store settings for photo ingestion. Passed to the ingestion
/// service at construction; never read as process globals.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Endpoint uploads are PUT against, e.g. an S3-compatible gateway.
    pub endpoint: String,
    pub bucket: String,
    /// Public prefix persisted Photo URLs are built from.
    pub base_url: String,
    #[serde(default = "default_upload_timeout")]
    pub upload_timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://s3-us-west-1.amazonaws.com".into(),
            bucket: "catlog-photos".into(),
            base_url: "https://s3-us-west-1.amazonaws.com".into(),
            upload_timeout_secs: default_upload_timeout(),
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_upload_timeout() -> u64 { 15 }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.storage.normalize_from_env();
        self.storage.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    /// Fill the URL from the environment when the TOML omitted it.
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or via DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(v) = std::env::var("STORAGE_ENDPOINT") {
            self.endpoint = v;
        }
        if let Ok(v) = std::env::var("STORAGE_BUCKET") {
            self.bucket = v;
        }
        if let Ok(v) = std::env::var("STORAGE_BASE_URL") {
            self.base_url = v;
        }
        // Photo URLs are joined with "/", so strip trailing slashes once here.
        while self.endpoint.ends_with('/') {
            self.endpoint.pop();
        }
        while self.base_url.ends_with('/') {
            self.base_url.pop();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(anyhow!("storage.endpoint is empty"));
        }
        if self.bucket.trim().is_empty() {
            return Err(anyhow!("storage.bucket is empty"));
        }
        if self.base_url.trim().is_empty() {
            return Err(anyhow!("storage.base_url is empty"));
        }
        if self.upload_timeout_secs == 0 {
            return Err(anyhow!("storage.upload_timeout_secs must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let toml_src = r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [database]
            url = "postgres://u:p@localhost:5432/catlog"

            [storage]
            endpoint = "http://localhost:9090"
            bucket = "photos"
            base_url = "http://localhost:9090"
        "#;
        let mut cfg: AppConfig = toml::from_str(toml_src).unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.storage.bucket, "photos");
        assert_eq!(cfg.storage.upload_timeout_secs, 15);
    }

    #[test]
    fn storage_trailing_slash_is_stripped() {
        let mut storage = StorageConfig {
            endpoint: "http://localhost:9090/".into(),
            bucket: "photos".into(),
            base_url: "https://cdn.example.com//".into(),
            upload_timeout_secs: 5,
        };
        storage.normalize_from_env();
        assert_eq!(storage.endpoint, "http://localhost:9090");
        assert_eq!(storage.base_url, "https://cdn.example.com");
    }

    #[test]
    fn rejects_non_postgres_url() {
        let db = DatabaseConfig { url: "mysql://localhost/x".into(), ..Default::default() };
        assert!(db.validate().is_err());
    }

    #[test]
    fn rejects_zero_upload_timeout() {
        let storage = StorageConfig { upload_timeout_secs: 0, ..Default::default() };
        assert!(storage.validate().is_err());
    }
}
