pub mod memory;
#[cfg(feature = "odbc")]
pub mod odbc;
pub mod query;
pub mod snapshot;
pub mod table;

use std::sync::Arc;

use crate::config::{DataSourceConfig, SourceKind};
use crate::error::{AppError, SourceError};

pub use memory::MemorySource;
#[cfg(feature = "odbc")]
pub use odbc::OdbcSource;
pub use query::{Predicate, Query};
pub use snapshot::SnapshotSource;
pub use table::Table;

/// Tally 字段/值的前导标记符
pub const SIGIL: char = '$';

/// 去掉一个前导标记符
pub fn strip_sigil(name: &str) -> &str {
    name.strip_prefix(SIGIL).unwrap_or(name)
}

/// 原始查询结果: 列名 (可能带标记符) + 可空文本行
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl ResultSet {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 表格查询端点。每次 execute 独立打开并关闭连接，调用是阻塞的。
pub trait DataSource: Send + Sync {
    fn execute(&self, query: &Query) -> Result<ResultSet, SourceError>;

    /// 日志用描述
    fn describe(&self) -> String;
}

/// 按配置创建数据源
pub fn connect(config: &DataSourceConfig) -> Result<Arc<dyn DataSource>, AppError> {
    match config.kind {
        SourceKind::Snapshot => {
            let source = SnapshotSource::open(&config.snapshot_dir)?;
            Ok(Arc::new(source))
        }
        #[cfg(feature = "odbc")]
        SourceKind::Odbc => Ok(Arc::new(OdbcSource::new(config.connection_string()))),
        #[cfg(not(feature = "odbc"))]
        SourceKind::Odbc => Err(AppError::UnsupportedSource("odbc".to_string())),
    }
}
