#![allow(dead_code)]

use std::sync::Arc;

use tally_report_bridge::source::{MemorySource, Table};

pub fn s(v: &str) -> Option<String> {
    Some(v.to_string())
}

pub fn companies(names: &[&str]) -> Table {
    let mut table = Table::new(["$Name"]);
    for name in names {
        table.push_row([s(name)]);
    }
    table
}

const LEDGER_COLUMNS: [&str; 7] = [
    "$Name",
    "$Parent",
    "$_PrimaryGroup",
    "$OpeningBalance",
    "$DebitAmount",
    "$CreditAmount",
    "$ClosingBalance",
];

const DAY_BOOK_COLUMNS: [&str; 5] = [
    "$Date",
    "$VoucherTypeName",
    "$VoucherNumber",
    "$Narration",
    "$Amount",
];

pub fn ledger() -> Table {
    let mut table = Table::new(LEDGER_COLUMNS);
    table.push_row([
        s("Capital Account"),
        s("Primary"),
        s("Capital Account"),
        s("50,000.00"),
        s("0"),
        s("0"),
        s("50,000.00"),
    ]);
    table.push_row([
        s("Sundry Creditors"),
        s("Current Liabilities"),
        s("Liabilities"),
        s("0"),
        s("200"),
        s("1,200.50"),
        s("1000.50"),
    ]);
    table.push_row([
        s("Cash"),
        s("Current Assets"),
        s("Assets"),
        s("100"),
        s("abc"),
        None,
        s("abc"),
    ]);
    table
}

pub fn day_book() -> Table {
    let mut table = Table::new(DAY_BOOK_COLUMNS);
    table.push_row([s("2024-04-01"), s("Sales"), s("1"), s("Cash sale"), s("1,500.00")]);
    table.push_row([s("2024-04-02"), s("Payment"), s("2"), None, s("-250")]);
    table.push_row([None, s("Journal"), s("3"), s("undated"), s("10")]);
    table
}

pub fn full_source() -> MemorySource {
    MemorySource::new()
        .with_table("Company", companies(&["$Acme Corp", "$Beta LLC"]))
        .with_table("Ledger", ledger())
        .with_table("DayBook", day_book())
}

pub fn empty_source() -> MemorySource {
    MemorySource::new()
        .with_table("Company", companies(&[]))
        .with_table("Ledger", Table::new(LEDGER_COLUMNS))
        .with_table("DayBook", Table::new(DAY_BOOK_COLUMNS))
}

pub fn shared(source: MemorySource) -> Arc<MemorySource> {
    Arc::new(source)
}
