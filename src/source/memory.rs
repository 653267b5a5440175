use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::error::SourceError;

use super::{DataSource, Query, ResultSet, Table};

/// 内存数据源 (测试、演示用)。可切换为"不可达"状态以模拟连接失败。
#[derive(Debug, Default)]
pub struct MemorySource {
    tables: HashMap<String, Table>,
    unreachable: AtomicBool,
    connections: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, collection: &str, table: Table) -> Self {
        self.tables.insert(collection.to_string(), table);
        self
    }

    /// 后续所有查询都返回连接错误
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    /// 已"打开"的连接次数
    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}

impl DataSource for MemorySource {
    fn execute(&self, query: &Query) -> Result<ResultSet, SourceError> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(SourceError::Connection(
                "memory source marked unreachable".to_string(),
            ));
        }
        self.connections.fetch_add(1, Ordering::SeqCst);

        let table = self
            .tables
            .get(query.collection)
            .ok_or_else(|| SourceError::UnknownCollection(query.collection.to_string()))?;
        table.select(query)
    }

    fn describe(&self) -> String {
        format!("memory ({} tables)", self.tables.len())
    }
}
