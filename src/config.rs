use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::AppError;

/// 配置文件路径的环境变量
pub const CONFIG_FILE_ENV: &str = "TALLY_BRIDGE_CONFIG";
/// 环境变量覆盖前缀
pub const ENV_PREFIX: &str = "TALLY_BRIDGE";

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub datasource: DataSourceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// 数据源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Odbc,
    Snapshot,
}

/// Tally 连接描述
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSourceConfig {
    pub kind: SourceKind,
    pub dsn: String,
    pub server: String,
    pub driver: String,
    pub port: u16,
    /// CSV 快照目录 (kind = snapshot 时使用)
    pub snapshot_dir: PathBuf,
}

impl DataSourceConfig {
    /// 生成 ODBC 连接字符串
    pub fn connection_string(&self) -> String {
        format!(
            "DSN={};SERVER={};DRIVER={};PORT={}",
            self.dsn, self.server, self.driver, self.port
        )
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            datasource: DataSourceConfig {
                kind: SourceKind::Odbc,
                dsn: "TallyODBC64_9000".to_string(),
                server: "localhost".to_string(),
                driver: "Tally ODBC DRIVER64".to_string(),
                port: 9000,
                snapshot_dir: PathBuf::from("snapshot"),
            },
        }
    }
}

impl AppConfig {
    /// 加载配置: 默认值 < 配置文件 (TALLY_BRIDGE_CONFIG) < 环境变量 (TALLY_BRIDGE__*)
    pub fn load() -> Result<Self, AppError> {
        let file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);
        Self::load_from(file)
    }

    pub fn load_from(file: Option<PathBuf>) -> Result<Self, AppError> {
        let defaults = Self::default();
        let mut builder = config::Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", defaults.server.port as i64)?
            .set_default("datasource.kind", "odbc")?
            .set_default("datasource.dsn", defaults.datasource.dsn)?
            .set_default("datasource.server", defaults.datasource.server)?
            .set_default("datasource.driver", defaults.datasource.driver)?
            .set_default("datasource.port", defaults.datasource.port as i64)?
            .set_default(
                "datasource.snapshot_dir",
                defaults.datasource.snapshot_dir.to_string_lossy().into_owned(),
            )?;

        if let Some(path) = file {
            if !path.exists() {
                return Err(AppError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("config file not found: {}", path.display()),
                )));
            }
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
