pub mod reports;
pub mod shaper;

pub use reports::{CompanyList, CompanyReports, ReportSection, ReportService};
pub use shaper::{parse_amount, shape};
