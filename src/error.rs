use thiserror::Error;

/// 数据源错误
#[derive(Debug, Error)]
pub enum SourceError {
    /// 无法建立到数据源的连接
    #[error("connection failed: {0}")]
    Connection(String),

    /// 查询执行失败
    #[error("query failed: {0}")]
    Query(String),

    #[error("unknown collection: {0}")]
    UnknownCollection(String),

    #[error("unknown column {column} in {collection}")]
    UnknownColumn { collection: String, column: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "odbc")]
    #[error("ODBC error: {0}")]
    Odbc(#[from] odbc_api::Error),

    /// 阻塞任务被取消或 panic
    #[error("background task failed: {0}")]
    Task(String),
}

/// 错误分类，用于日志标记
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Connection,
    Query,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::Connection => "connection",
            FailureKind::Query => "query",
        }
    }
}

impl SourceError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SourceError::Connection(_) | SourceError::Io(_) => FailureKind::Connection,
            #[cfg(feature = "odbc")]
            SourceError::Odbc(_) => FailureKind::Connection,
            _ => FailureKind::Query,
        }
    }
}

/// 启动阶段错误
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("data source setup failed: {0}")]
    Source(#[from] SourceError),

    #[error("data source kind '{0}' is not available in this build")]
    UnsupportedSource(String),
}
