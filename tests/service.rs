mod common;

use std::str::FromStr;
use std::sync::Arc;

use bigdecimal::{BigDecimal, Zero};
use tally_report_bridge::models::{ReportKind, UNKNOWN_COMPANY};
use tally_report_bridge::ReportService;

use common::{empty_source, full_source, shared};

fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

#[tokio::test]
async fn company_names_strip_marker() {
    let service = ReportService::new(shared(full_source()));
    assert_eq!(service.company_names().await, vec!["Acme Corp", "Beta LLC"]);

    let list = service.company_list().await;
    assert_eq!(list.first(), "Acme Corp");
    assert!(!list.unavailable);
}

#[tokio::test]
async fn company_names_fall_back_to_placeholder() {
    let source = shared(full_source());
    source.set_unreachable(true);
    let service = ReportService::new(source);
    assert_eq!(service.company_names().await, vec![UNKNOWN_COMPANY]);
    assert!(service.try_company_names().await.is_err());
    assert!(service.company_list().await.unavailable);

    let service = ReportService::new(shared(empty_source()));
    assert_eq!(service.company_names().await, vec![UNKNOWN_COMPANY]);
    assert!(!service.company_list().await.unavailable);
    assert_eq!(service.try_company_names().await.unwrap(), Vec::<String>::new());
}

#[tokio::test]
async fn balance_sheet_keeps_capital_and_liabilities() {
    let service = ReportService::new(shared(full_source()));
    let records = service.report(ReportKind::BalanceSheet, "Acme Corp").await;

    let names: Vec<_> = records.iter().filter_map(|r| r.text("Name")).collect();
    assert_eq!(names, vec!["Capital Account", "Sundry Creditors"]);
    assert_eq!(
        records[0].columns().collect::<Vec<_>>(),
        vec!["Name", "Parent", "ClosingBalance", "Company"]
    );
    assert_eq!(records[0].amount("ClosingBalance"), Some(&dec("50000")));
}

#[tokio::test]
async fn trial_balance_coerces_invalid_amounts_to_zero() {
    let service = ReportService::new(shared(full_source()));
    let records = service.report(ReportKind::TrialBalance, "Acme Corp").await;
    assert_eq!(records.len(), 3);

    let cash = records.iter().find(|r| r.text("Name") == Some("Cash")).unwrap();
    assert_eq!(cash.amount("ClosingBalance"), Some(&BigDecimal::zero()));
    assert_eq!(cash.amount("DebitAmount"), Some(&BigDecimal::zero()));
    assert_eq!(cash.amount("CreditAmount"), Some(&BigDecimal::zero()));
    assert_eq!(cash.amount("OpeningBalance"), Some(&dec("100")));

    let creditors = records.iter().find(|r| r.text("Name") == Some("Sundry Creditors")).unwrap();
    assert_eq!(creditors.amount("CreditAmount"), Some(&dec("1200.50")));
}

#[tokio::test]
async fn day_book_skips_undated_entries() {
    let service = ReportService::new(shared(full_source()));
    let records = service.report(ReportKind::DayBook, "Acme Corp").await;
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].amount("Amount"), Some(&dec("-250")));
    assert_eq!(records, service.report(ReportKind::Voucher, "Acme Corp").await);
}

#[tokio::test]
async fn every_record_is_tagged_with_requested_company() {
    let service = ReportService::new(shared(full_source()));
    for kind in ReportKind::ALL {
        let records = service.report(kind, "Beta LLC").await;
        assert!(!records.is_empty(), "{kind} returned nothing");
        assert!(records.iter().all(|r| r.company() == Some("Beta LLC")));
    }
}

#[tokio::test]
async fn empty_sources_yield_empty_reports() {
    let service = ReportService::new(shared(empty_source()));
    for kind in ReportKind::ALL {
        assert!(service.report(kind, "Acme Corp").await.is_empty());
        assert!(service.try_report(kind, "Acme Corp").await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn connection_failure_yields_empty_reports() {
    let source = shared(full_source());
    source.set_unreachable(true);
    let service = ReportService::new(source.clone());

    for kind in ReportKind::ALL {
        assert!(service.report(kind, "Acme Corp").await.is_empty());
    }
    let reports = service.company_reports("Acme Corp").await;
    assert!(reports.is_degraded());
    assert!(reports.sections.iter().all(|s| s.records.is_empty()));

    source.set_unreachable(false);
    assert!(!service.company_reports("Acme Corp").await.is_degraded());
}

#[tokio::test]
async fn company_reports_open_one_connection_per_report() {
    let source = shared(full_source());
    let service = ReportService::new(source.clone());
    let reports = service.company_reports("Acme Corp").await;

    assert_eq!(reports.sections.len(), 5);
    assert_eq!(source.connections(), 5);
    let kinds: Vec<_> = reports.sections.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, ReportKind::ALL.to_vec());
    assert!(reports.section(ReportKind::ProfitLoss).is_some());
}

#[tokio::test]
async fn missing_collection_is_reported_by_try_report() {
    let source = Arc::new(
        tally_report_bridge::source::MemorySource::new()
            .with_table("Company", common::companies(&["$Acme Corp"])),
    );
    let service = ReportService::new(source);
    let err = service.try_report(ReportKind::DayBook, "Acme Corp").await.unwrap_err();
    assert!(err.to_string().contains("DayBook"));
    assert!(service.report(ReportKind::DayBook, "Acme Corp").await.is_empty());
}
