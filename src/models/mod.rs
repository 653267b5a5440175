pub mod company;
pub mod ledger;
pub mod record;
pub mod report;

pub use company::{parse_company_name, UNKNOWN_COMPANY};
pub use ledger::{voucher_total, LedgerRecord, Totals, VoucherRecord};
pub use record::{FieldValue, Record, COMPANY_FIELD};
pub use report::{company_query, ReportKind};
