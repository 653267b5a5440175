use bigdecimal::{BigDecimal, Zero};
use serde::Serialize;

use super::record::Record;

/// 科目记录 (资产负债表 / 损益表 / 试算平衡表)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerRecord {
    pub name: String,
    /// Parent 或 _PrimaryGroup，取决于报表
    pub group: Option<String>,
    pub opening_balance: BigDecimal,
    pub debit: BigDecimal,
    pub credit: BigDecimal,
    pub closing_balance: BigDecimal,
    pub company: String,
}

impl LedgerRecord {
    pub fn from_record(record: &Record) -> Self {
        Self {
            name: record.text("Name").unwrap_or_default().to_string(),
            group: record
                .text("Parent")
                .or_else(|| record.text("_PrimaryGroup"))
                .map(str::to_string),
            opening_balance: amount_or_zero(record, "OpeningBalance"),
            debit: amount_or_zero(record, "DebitAmount"),
            credit: amount_or_zero(record, "CreditAmount"),
            closing_balance: amount_or_zero(record, "ClosingBalance"),
            company: record.company().unwrap_or_default().to_string(),
        }
    }
}

/// 凭证记录 (DayBook)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoucherRecord {
    pub date: String,
    pub voucher_type: String,
    pub voucher_number: String,
    pub narration: String,
    pub amount: BigDecimal,
    pub company: String,
}

impl VoucherRecord {
    pub fn from_record(record: &Record) -> Self {
        let text = |column: &str| record.text(column).unwrap_or_default().to_string();
        Self {
            date: text("Date"),
            voucher_type: text("VoucherTypeName"),
            voucher_number: text("VoucherNumber"),
            narration: text("Narration"),
            amount: amount_or_zero(record, "Amount"),
            company: text(super::record::COMPANY_FIELD),
        }
    }
}

fn amount_or_zero(record: &Record, column: &str) -> BigDecimal {
    record.amount(column).cloned().unwrap_or_else(BigDecimal::zero)
}

/// 报表合计行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Totals {
    pub opening_balance: BigDecimal,
    pub debit: BigDecimal,
    pub credit: BigDecimal,
    pub closing_balance: BigDecimal,
}

impl Totals {
    pub fn of_ledgers<'a>(records: impl IntoIterator<Item = &'a LedgerRecord>) -> Self {
        let mut totals = Self {
            opening_balance: BigDecimal::zero(),
            debit: BigDecimal::zero(),
            credit: BigDecimal::zero(),
            closing_balance: BigDecimal::zero(),
        };
        for r in records {
            totals.opening_balance += &r.opening_balance;
            totals.debit += &r.debit;
            totals.credit += &r.credit;
            totals.closing_balance += &r.closing_balance;
        }
        totals
    }

    /// 试算平衡: 借贷合计相等
    pub fn is_balanced(&self) -> bool {
        self.debit == self.credit
    }
}

/// 凭证金额合计
pub fn voucher_total<'a>(records: impl IntoIterator<Item = &'a VoucherRecord>) -> BigDecimal {
    records
        .into_iter()
        .fold(BigDecimal::zero(), |acc, r| acc + &r.amount)
}
