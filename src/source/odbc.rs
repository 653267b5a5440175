use odbc_api::buffers::TextRowSet;
use odbc_api::{ConnectionOptions, Cursor, Environment, ResultSetMetadata};
use tracing::debug;

use crate::error::SourceError;

use super::{DataSource, Query, ResultSet};

/// 每批读取的行数
const BATCH_SIZE: usize = 512;
/// 单个文本单元格的最大字节数
const MAX_TEXT_LEN: usize = 4096;

/// Tally ODBC 数据源，每次查询新建连接，查询结束即释放
pub struct OdbcSource {
    connection_string: String,
}

impl OdbcSource {
    pub fn new(connection_string: String) -> Self {
        Self { connection_string }
    }
}

impl DataSource for OdbcSource {
    fn execute(&self, query: &Query) -> Result<ResultSet, SourceError> {
        let sql = query.to_sql();
        let env = Environment::new()?;
        let conn = env
            .connect_with_connection_string(&self.connection_string, ConnectionOptions::default())
            .map_err(|e| SourceError::Connection(e.to_string()))?;
        debug!("Executing: {}", sql);

        let Some(mut cursor) = conn
            .execute(&sql, ())
            .map_err(|e| SourceError::Query(e.to_string()))?
        else {
            return Ok(ResultSet::default());
        };

        let columns = cursor
            .column_names()?
            .collect::<Result<Vec<String>, _>>()?;

        let mut buffers = TextRowSet::for_cursor(BATCH_SIZE, &mut cursor, Some(MAX_TEXT_LEN))?;
        let mut row_set_cursor = cursor.bind_buffer(&mut buffers)?;

        let mut rows = Vec::new();
        while let Some(batch) = row_set_cursor.fetch()? {
            for row in 0..batch.num_rows() {
                rows.push(
                    (0..batch.num_cols())
                        .map(|col| {
                            batch
                                .at(col, row)
                                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                        })
                        .collect(),
                );
            }
        }

        Ok(ResultSet { columns, rows })
    }

    fn describe(&self) -> String {
        format!("odbc ({})", self.connection_string)
    }
}
