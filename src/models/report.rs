use serde::Serialize;
use std::fmt;

use crate::source::Query;

pub const LEDGER_COLLECTION: &str = "Ledger";
pub const DAY_BOOK_COLLECTION: &str = "DayBook";
pub const COMPANY_COLLECTION: &str = "Company";

/// 报表类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    BalanceSheet,
    ProfitLoss,
    TrialBalance,
    Voucher,
    DayBook,
}

impl ReportKind {
    /// 公司详情页展示顺序
    pub const ALL: [ReportKind; 5] = [
        ReportKind::BalanceSheet,
        ReportKind::ProfitLoss,
        ReportKind::TrialBalance,
        ReportKind::Voucher,
        ReportKind::DayBook,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ReportKind::BalanceSheet => "Balance Sheet",
            ReportKind::ProfitLoss => "Profit & Loss",
            ReportKind::TrialBalance => "Trial Balance",
            ReportKind::Voucher => "Voucher",
            ReportKind::DayBook => "Day Book",
        }
    }

    /// 该报表固定执行的查询
    pub fn query(self) -> Query {
        match self {
            // 资产负债表只取资本和负债类科目，由服务端过滤
            ReportKind::BalanceSheet => {
                Query::select(LEDGER_COLLECTION, &["Name", "Parent", "ClosingBalance"])
                    .not_null("Name")
                    .not_null("ClosingBalance")
                    .any_equals(&[
                        ("Name", "Capital Account"),
                        ("_PrimaryGroup", "Capital Account"),
                        ("_PrimaryGroup", "Liabilities"),
                    ])
            }
            ReportKind::ProfitLoss => {
                Query::select(LEDGER_COLLECTION, &["Name", "_PrimaryGroup", "ClosingBalance"])
                    .not_null("Name")
            }
            ReportKind::TrialBalance => Query::select(
                LEDGER_COLLECTION,
                &[
                    "Name",
                    "_PrimaryGroup",
                    "OpeningBalance",
                    "DebitAmount",
                    "CreditAmount",
                    "ClosingBalance",
                ],
            )
            .not_null("Name"),
            ReportKind::Voucher | ReportKind::DayBook => Query::select(
                DAY_BOOK_COLLECTION,
                &["Date", "VoucherTypeName", "VoucherNumber", "Narration", "Amount"],
            )
            .not_null("Date")
            .not_null("Amount"),
        }
    }

    /// 需要转换为数值的列
    pub fn numeric_columns(self) -> &'static [&'static str] {
        match self {
            ReportKind::BalanceSheet | ReportKind::ProfitLoss => &["ClosingBalance"],
            ReportKind::TrialBalance => &[
                "OpeningBalance",
                "DebitAmount",
                "CreditAmount",
                "ClosingBalance",
            ],
            ReportKind::Voucher | ReportKind::DayBook => &["Amount"],
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// 公司列表查询
pub fn company_query() -> Query {
    Query::select(COMPANY_COLLECTION, &["Name"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_sheet_filters_capital_and_liabilities() {
        assert_eq!(
            ReportKind::BalanceSheet.query().to_sql(),
            "SELECT $Name, $Parent, $ClosingBalance FROM Ledger \
             WHERE $Name IS NOT NULL AND $ClosingBalance IS NOT NULL \
             AND ($Name = 'Capital Account' OR $_PrimaryGroup = 'Capital Account' \
             OR $_PrimaryGroup = 'Liabilities')"
        );
    }

    #[test]
    fn voucher_and_day_book_share_the_journal_query() {
        assert_eq!(ReportKind::Voucher.query(), ReportKind::DayBook.query());
        assert_eq!(
            ReportKind::DayBook.query().to_sql(),
            "SELECT $Date, $VoucherTypeName, $VoucherNumber, $Narration, $Amount FROM DayBook \
             WHERE $Date IS NOT NULL AND $Amount IS NOT NULL"
        );
    }

    #[test]
    fn numeric_columns_are_selected_by_each_query() {
        for kind in ReportKind::ALL {
            let query = kind.query();
            for column in kind.numeric_columns() {
                assert!(query.columns.contains(column), "{kind} does not select {column}");
            }
        }
    }

    #[test]
    fn company_query_selects_names() {
        assert_eq!(company_query().to_sql(), "SELECT $Name FROM Company");
    }
}
