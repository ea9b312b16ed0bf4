use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Backing directory holding one `<category>.json` per data category.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Static assets served at `/`.
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: default_data_dir(), frontend_dir: default_frontend_dir() }
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 3000 }
fn default_data_dir() -> String { "data".into() }
fn default_frontend_dir() -> String { "frontend".into() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

/// Build a config from `SERVER_HOST`, `SERVER_PORT`, `DATA_DIR`, `FRONTEND_DIR`
/// and `TOKIO_WORKER_THREADS`, falling back to defaults.
pub fn from_env() -> AppConfig {
    let mut cfg = AppConfig::default();
    if let Ok(host) = std::env::var("SERVER_HOST") {
        cfg.server.host = host;
    }
    if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
        cfg.server.port = port;
    }
    if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
        cfg.server.worker_threads = Some(w);
    }
    if let Ok(dir) = std::env::var("DATA_DIR") {
        cfg.storage.data_dir = dir;
    }
    if let Ok(dir) = std::env::var("FRONTEND_DIR") {
        cfg.storage.frontend_dir = dir;
    }
    cfg
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Config file if present, otherwise environment variables.
    /// A file that exists but fails to parse or validate is an error.
    pub fn load_or_env() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_or_env_from(&path)
    }

    pub fn load_or_env_from(path: &str) -> Result<Self> {
        let mut cfg = match load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => from_env(),
            Err(e) => return Err(e.context(format!("读取配置文件 {path} 失败"))),
        };
        cfg.normalize_and_validate()
            .map_err(|e| e.context(format!("配置校验失败: {path}")))?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        // 归一化 server
        self.server.normalize()?;
        self.storage.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port 必须在 1..=65535 范围内"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.data_dir.trim().is_empty() {
            return Err(anyhow!("storage.data_dir 不能为空"));
        }
        if self.frontend_dir.trim().is_empty() {
            return Err(anyhow!("storage.frontend_dir 不能为空"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_server() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.storage.data_dir, "data");
        assert_eq!(cfg.storage.frontend_dir, "frontend");
    }

    #[test]
    fn parses_partial_toml() -> Result<()> {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            port = 8088

            [storage]
            data_dir = "/var/lib/trade/data"
            "#,
        )?;
        assert_eq!(cfg.server.port, 8088);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.storage.data_dir, "/var/lib/trade/data");
        assert_eq!(cfg.storage.frontend_dir, "frontend");
        Ok(())
    }

    #[test]
    fn normalize_fills_threads_and_rejects_bad_values() -> Result<()> {
        let mut cfg: AppConfig = toml::from_str("[server]\nhost = \" \"\nworker_threads = 0\n")?;
        cfg.normalize_and_validate()?;
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(4));

        let mut bad: AppConfig = toml::from_str("[server]\nport = 0\n")?;
        assert!(bad.normalize_and_validate().is_err());

        let mut empty_dir: AppConfig = toml::from_str("[storage]\ndata_dir = \"\"\n")?;
        assert!(empty_dir.normalize_and_validate().is_err());
        Ok(())
    }

    #[test]
    fn missing_file_is_error() {
        assert!(load_from_file("/nonexistent/config.toml").is_err());
    }

    fn write_tmp_config(content: &str) -> Result<std::path::PathBuf> {
        let path = std::env::temp_dir().join(format!("configs_{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, content)?;
        Ok(path)
    }

    #[test]
    fn load_or_env_uses_existing_file() -> Result<()> {
        let path = write_tmp_config("[storage]\ndata_dir = \"/srv/trade\"\n")?;
        let cfg = AppConfig::load_or_env_from(&path.to_string_lossy())?;
        assert_eq!(cfg.storage.data_dir, "/srv/trade");
        let _ = std::fs::remove_file(&path);
        Ok(())
    }

    #[test]
    fn load_or_env_rejects_invalid_file_instead_of_falling_back() -> Result<()> {
        let path = write_tmp_config("[server]\nport = 0\n\n[storage]\ndata_dir = \"/srv/x\"\n")?;
        assert!(AppConfig::load_or_env_from(&path.to_string_lossy()).is_err());
        let _ = std::fs::remove_file(&path);

        let path = write_tmp_config("[server\nport = 3000\n")?;
        assert!(AppConfig::load_or_env_from(&path.to_string_lossy()).is_err());
        let _ = std::fs::remove_file(&path);
        Ok(())
    }

    #[test]
    fn load_or_env_falls_back_when_file_missing() -> Result<()> {
        let missing = std::env::temp_dir().join(format!("configs_missing_{}.toml", uuid::Uuid::new_v4()));
        let cfg = AppConfig::load_or_env_from(&missing.to_string_lossy())?;
        assert!(cfg.server.port > 0);
        assert!(!cfg.storage.data_dir.is_empty());
        Ok(())
    }
}
