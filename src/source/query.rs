use std::fmt::Write;

use super::SIGIL;

/// WHERE 子句中的条件 (各条件之间为 AND)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `$col IS NOT NULL`
    NotNull(&'static str),
    /// `($a = 'x' OR $b = 'y' ...)`
    AnyEquals(Vec<(&'static str, &'static str)>),
}

/// Tally 受限 SQL 方言的固定查询
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub collection: &'static str,
    /// 不带标记符的列名
    pub columns: Vec<&'static str>,
    pub filter: Vec<Predicate>,
}

impl Query {
    pub fn select(collection: &'static str, columns: &[&'static str]) -> Self {
        Self {
            collection,
            columns: columns.to_vec(),
            filter: Vec::new(),
        }
    }

    pub fn not_null(mut self, column: &'static str) -> Self {
        self.filter.push(Predicate::NotNull(column));
        self
    }

    pub fn any_equals(mut self, alternatives: &[(&'static str, &'static str)]) -> Self {
        self.filter.push(Predicate::AnyEquals(alternatives.to_vec()));
        self
    }

    /// 生成发送给 ODBC 驱动的查询文本
    pub fn to_sql(&self) -> String {
        let mut sql = String::from("SELECT ");
        let columns: Vec<String> = self.columns.iter().map(|c| column_ref(c)).collect();
        sql.push_str(&columns.join(", "));
        let _ = write!(sql, " FROM {}", self.collection);

        let conditions: Vec<String> = self
            .filter
            .iter()
            .map(|p| match p {
                Predicate::NotNull(c) => format!("{} IS NOT NULL", column_ref(c)),
                Predicate::AnyEquals(alts) => {
                    let parts: Vec<String> = alts
                        .iter()
                        .map(|(c, v)| format!("{} = {}", column_ref(c), quote(v)))
                        .collect();
                    format!("({})", parts.join(" OR "))
                }
            })
            .collect();
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql
    }

    /// 查询引用到的所有列 (投影列 + 条件列)
    pub fn referenced_columns(&self) -> Vec<&'static str> {
        let mut all = self.columns.clone();
        for p in &self.filter {
            match p {
                Predicate::NotNull(c) => all.push(*c),
                Predicate::AnyEquals(alts) => all.extend(alts.iter().map(|(c, _)| *c)),
            }
        }
        all.sort_unstable();
        all.dedup();
        all
    }
}

fn column_ref(column: &str) -> String {
    format!("{}{}", SIGIL, column)
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
