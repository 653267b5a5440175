use crate::error::SourceError;

use super::{strip_sigil, Predicate, Query, ResultSet, SIGIL};

/// 内存中的一张表，列名不带标记符，空值为 None
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            columns: columns
                .into_iter()
                .map(|c| strip_sigil(c.as_ref()).to_string())
                .collect(),
            rows: Vec::new(),
        }
    }

    /// 追加一行，缺少的列补 None
    pub fn push_row<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = Option<String>>,
    {
        let mut row: Vec<Option<String>> = values.into_iter().take(self.columns.len()).collect();
        row.resize(self.columns.len(), None);
        self.rows.push(row);
    }

    fn index_of(&self, collection: &str, column: &str) -> Result<usize, SourceError> {
        self.columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| SourceError::UnknownColumn {
                collection: collection.to_string(),
                column: column.to_string(),
            })
    }

    /// 在内存中执行查询: 校验列、过滤、投影。返回的列名带标记符，与 ODBC 驱动一致。
    pub fn select(&self, query: &Query) -> Result<ResultSet, SourceError> {
        for column in query.referenced_columns() {
            self.index_of(query.collection, column)?;
        }

        let projection = query
            .columns
            .iter()
            .map(|c| self.index_of(query.collection, c))
            .collect::<Result<Vec<_>, _>>()?;

        let mut rows = Vec::new();
        for row in &self.rows {
            if self.matches(query, row)? {
                rows.push(projection.iter().map(|&i| row[i].clone()).collect());
            }
        }

        Ok(ResultSet {
            columns: query.columns.iter().map(|c| format!("{}{}", SIGIL, c)).collect(),
            rows,
        })
    }

    fn matches(&self, query: &Query, row: &[Option<String>]) -> Result<bool, SourceError> {
        for predicate in &query.filter {
            let ok = match predicate {
                Predicate::NotNull(c) => row[self.index_of(query.collection, c)?].is_some(),
                Predicate::AnyEquals(alts) => {
                    let mut any = false;
                    for (c, v) in alts {
                        if row[self.index_of(query.collection, c)?].as_deref() == Some(*v) {
                            any = true;
                            break;
                        }
                    }
                    any
                }
            };
            if !ok {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    fn ledger() -> Table {
        let mut t = Table::new(["$Name", "$Parent", "$_PrimaryGroup", "$ClosingBalance"]);
        t.push_row([s("Capital Account"), s("Primary"), s("Capital Account"), s("50000")]);
        t.push_row([s("Bank Loan"), s("Loans"), s("Liabilities"), None]);
        t.push_row([s("Sales"), s("Sales Accounts"), s("Income"), s("1200")]);
        t.push_row([None, None, s("Liabilities"), s("10")]);
        t
    }

    #[test]
    fn strips_sigil_from_table_columns() {
        assert_eq!(ledger().columns[0], "Name");
    }

    #[test]
    fn filters_and_projects() {
        let q = Query::select("Ledger", &["Name", "ClosingBalance"])
            .not_null("Name")
            .not_null("ClosingBalance")
            .any_equals(&[("Name", "Capital Account"), ("_PrimaryGroup", "Liabilities")]);
        let rs = ledger().select(&q).unwrap();
        assert_eq!(rs.columns, vec!["$Name", "$ClosingBalance"]);
        assert_eq!(rs.rows, vec![vec![s("Capital Account"), s("50000")]]);
    }

    #[test]
    fn unknown_column_is_reported() {
        let q = Query::select("Ledger", &["Name", "DebitAmount"]);
        let err = ledger().select(&q).unwrap_err();
        assert!(matches!(
            err,
            SourceError::UnknownColumn { ref column, .. } if column == "DebitAmount"
        ));
    }

    #[test]
    fn short_rows_are_padded() {
        let mut t = Table::new(["Name", "Amount"]);
        t.push_row([s("only name")]);
        assert_eq!(t.rows[0], vec![s("only name"), None]);
    }
}
