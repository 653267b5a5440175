use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::SourceError;

use super::{DataSource, Query, ResultSet, Table};

/// 基于 Tally 导出 CSV 的离线数据源。
///
/// 目录下每个集合一个文件 (`Company.csv`, `Ledger.csv`, `DayBook.csv`)，
/// 表头可带或不带 `$` 标记符，空单元格视为 NULL。每次查询重新读取文件。
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    dir: PathBuf,
}

impl SnapshotSource {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, SourceError> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.is_dir() {
            return Err(SourceError::Connection(format!(
                "snapshot directory not found: {}",
                dir.display()
            )));
        }
        Ok(Self { dir })
    }

    fn load(&self, collection: &str) -> Result<Table, SourceError> {
        let path = self.dir.join(format!("{}.csv", collection));
        if !path.is_file() {
            return Err(SourceError::UnknownCollection(collection.to_string()));
        }

        let mut reader = ReaderBuilder::new().trim(csv::Trim::Headers).from_path(&path)?;
        let mut table = Table::new(reader.headers()?.iter());
        for record in reader.records() {
            let record = record?;
            table.push_row(
                record
                    .iter()
                    .map(|v| if v.is_empty() { None } else { Some(v.to_string()) }),
            );
        }
        debug!("Loaded {} rows from {}", table.rows.len(), path.display());
        Ok(table)
    }
}

impl DataSource for SnapshotSource {
    fn execute(&self, query: &Query) -> Result<ResultSet, SourceError> {
        self.load(query.collection)?.select(query)
    }

    fn describe(&self) -> String {
        format!("snapshot ({})", self.dir.display())
    }
}
