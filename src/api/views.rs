//! HTML 页面渲染

use std::fmt::Write;

use crate::models::{
    voucher_total, FieldValue, LedgerRecord, Record, ReportKind, Totals, VoucherRecord,
};
use crate::service::{CompanyList, CompanyReports, ReportSection};

const UNAVAILABLE_NOTICE: &str =
    "Data source unavailable: some figures could not be loaded and may be incomplete.";
const UNBALANCED_NOTICE: &str = "Debit and credit totals do not match.";

/// HTML 转义
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// 查询参数编码 (application/x-www-form-urlencoded)
pub fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for b in value.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            b' ' => out.push('+'),
            _ => {
                let _ = write!(out, "%{:02X}", b);
            }
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <style>body{{font-family:sans-serif;margin:2em}}table{{border-collapse:collapse;margin-bottom:2em}}\
         th,td{{border:1px solid #ccc;padding:4px 8px}}td.num{{text-align:right}}\
         .notice{{background:#fff3cd;padding:8px;border:1px solid #e0c060}}</style>\n</head>\n<body>\n\
         <nav><a href=\"/\">Dashboard</a> | <a href=\"/company-list\">Companies</a></nav>\n{body}</body>\n</html>\n",
        title = escape(title),
        body = body,
    )
}

fn notice(degraded: bool) -> String {
    if degraded {
        format!("<p class=\"notice\">{}</p>\n", UNAVAILABLE_NOTICE)
    } else {
        String::new()
    }
}

/// 渲染报表段: 表头取自第一条记录，末尾追加合计行
fn section_table(section: &ReportSection) -> String {
    let mut html = format!("<h2>{}</h2>\n", escape(section.title));
    let Some(first) = section.records.first() else {
        html.push_str("<p>No records.</p>\n");
        return html;
    };

    let columns: Vec<&str> = first.columns().collect();
    html.push_str("<table>\n<tr>");
    for column in &columns {
        let _ = write!(html, "<th>{}</th>", escape(column));
    }
    html.push_str("</tr>\n");

    for record in &section.records {
        html.push_str("<tr>");
        for column in &columns {
            match record.get(column) {
                Some(value @ FieldValue::Amount(_)) => {
                    let _ = write!(html, "<td class=\"num\">{}</td>", escape(&value.to_string()));
                }
                Some(value) => {
                    let _ = write!(html, "<td>{}</td>", escape(&value.to_string()));
                }
                None => html.push_str("<td></td>"),
            }
        }
        html.push_str("</tr>\n");
    }

    let (totals, balanced) = totals_row(section.kind, &section.records);
    html.push_str("<tr><th>Total</th>");
    for column in columns.iter().skip(1) {
        match totals.iter().find(|(c, _)| c == column) {
            Some((_, v)) => {
                let _ = write!(html, "<th class=\"num\">{}</th>", escape(v));
            }
            None => html.push_str("<th></th>"),
        }
    }
    html.push_str("</tr>\n");
    html.push_str("</table>\n");
    if !balanced {
        let _ = writeln!(html, "<p class=\"notice\">{}</p>", UNBALANCED_NOTICE);
    }
    html
}

/// 合计行: (列名, 格式化金额)，以及借贷是否平衡 (仅试算平衡表检查)
fn totals_row(kind: ReportKind, records: &[Record]) -> (Vec<(&'static str, String)>, bool) {
    match kind {
        ReportKind::BalanceSheet | ReportKind::ProfitLoss => {
            let ledgers: Vec<_> = records.iter().map(LedgerRecord::from_record).collect();
            let totals = Totals::of_ledgers(&ledgers);
            let closing = totals.closing_balance.with_scale(2).to_string();
            (vec![("ClosingBalance", closing)], true)
        }
        ReportKind::TrialBalance => {
            let ledgers: Vec<_> = records.iter().map(LedgerRecord::from_record).collect();
            let totals = Totals::of_ledgers(&ledgers);
            let row = vec![
                ("OpeningBalance", totals.opening_balance.with_scale(2).to_string()),
                ("DebitAmount", totals.debit.with_scale(2).to_string()),
                ("CreditAmount", totals.credit.with_scale(2).to_string()),
                ("ClosingBalance", totals.closing_balance.with_scale(2).to_string()),
            ];
            (row, totals.is_balanced())
        }
        ReportKind::Voucher | ReportKind::DayBook => {
            let vouchers: Vec<_> = records.iter().map(VoucherRecord::from_record).collect();
            let amount = voucher_total(&vouchers).with_scale(2).to_string();
            (vec![("Amount", amount)], true)
        }
    }
}

/// 首页
pub fn dashboard(companies: &CompanyList, balance_sheet: &ReportSection) -> String {
    let company = companies.first();
    let mut body = format!("<h1>{}</h1>\n", escape(company));
    body.push_str(&notice(companies.unavailable || balance_sheet.unavailable));
    body.push_str(&section_table(balance_sheet));
    layout(&format!("{} - Dashboard", company), &body)
}

/// 公司列表页
pub fn company_list(companies: &CompanyList) -> String {
    let mut body = String::from("<h1>Companies</h1>\n");
    body.push_str(&notice(companies.unavailable));
    body.push_str("<ul>\n");
    for company in &companies.companies {
        let _ = writeln!(
            body,
            "<li><a href=\"/company-details?company={}\">{}</a></li>",
            escape(&encode_query_value(company)),
            escape(company)
        );
    }
    body.push_str("</ul>\n");
    layout("Companies", &body)
}

/// 公司详情页
pub fn company_details(reports: &CompanyReports) -> String {
    let mut body = format!("<h1>{}</h1>\n", escape(&reports.company));
    body.push_str(&notice(reports.is_degraded()));
    for section in &reports.sections {
        body.push_str(&section_table(section));
    }
    layout(&format!("{} - Reports", reports.company), &body)
}
