use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

use crate::error::SourceError;
use crate::models::{company_query, parse_company_name, ReportKind, Record, UNKNOWN_COMPANY};
use crate::source::{DataSource, Query, ResultSet};

use super::shaper::shape;

/// 单个报表的结果
#[derive(Debug, Clone, Serialize)]
pub struct ReportSection {
    pub kind: ReportKind,
    pub title: &'static str,
    pub records: Vec<Record>,
    /// 数据源失败导致数据缺失
    pub unavailable: bool,
}

/// 公司列表及其获取状态
#[derive(Debug, Clone, Serialize)]
pub struct CompanyList {
    pub companies: Vec<String>,
    /// 数据源失败，companies 为占位名称
    pub unavailable: bool,
}

impl CompanyList {
    /// 第一个公司，用于首页
    pub fn first(&self) -> &str {
        self.companies
            .first()
            .map(String::as_str)
            .unwrap_or(UNKNOWN_COMPANY)
    }
}

/// 公司详情页的全部报表
#[derive(Debug, Clone, Serialize)]
pub struct CompanyReports {
    pub company: String,
    pub sections: Vec<ReportSection>,
}

impl CompanyReports {
    pub fn section(&self, kind: ReportKind) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn is_degraded(&self) -> bool {
        self.sections.iter().any(|s| s.unavailable)
    }
}

/// 报表服务: 每次调用独立访问数据源，不缓存
pub struct ReportService {
    source: Arc<dyn DataSource>,
}

impl ReportService {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self { source }
    }

    /// 在阻塞线程池上执行查询
    async fn run(&self, query: Query) -> Result<ResultSet, SourceError> {
        let source = Arc::clone(&self.source);
        tokio::task::spawn_blocking(move || source.execute(&query))
            .await
            .map_err(|e| SourceError::Task(e.to_string()))?
    }

    /// 查询公司列表 (错误直接返回)
    pub async fn try_company_names(&self) -> Result<Vec<String>, SourceError> {
        let result = self.run(company_query()).await?;
        let companies: Vec<String> = result
            .rows
            .iter()
            .filter_map(|row| row.first().cloned().flatten())
            .filter_map(|raw| parse_company_name(&raw))
            .collect();
        tracing::debug!("Fetched companies: {:?}", companies);
        Ok(companies)
    }

    /// 查询公司列表，失败或为空时返回 ["Unknown"]，失败时标记 unavailable
    pub async fn company_list(&self) -> CompanyList {
        let (companies, unavailable) = match self.try_company_names().await {
            Ok(companies) if !companies.is_empty() => (companies, false),
            Ok(_) => {
                tracing::warn!("Data source returned no companies, using placeholder");
                (vec![UNKNOWN_COMPANY.to_string()], false)
            }
            Err(e) => {
                tracing::error!("[{}] Failed to fetch companies: {}", e.kind().as_str(), e);
                (vec![UNKNOWN_COMPANY.to_string()], true)
            }
        };
        CompanyList {
            companies,
            unavailable,
        }
    }

    /// 公司名称列表 (不含失败标记)
    pub async fn company_names(&self) -> Vec<String> {
        self.company_list().await.companies
    }

    /// 查询报表并整形 (错误直接返回)
    pub async fn try_report(
        &self,
        kind: ReportKind,
        company: &str,
    ) -> Result<Vec<Record>, SourceError> {
        let start = Instant::now();
        let result = self.run(kind.query()).await?;
        let records = shape(&result, kind.numeric_columns(), company);
        tracing::debug!(
            "Fetched {} for {}: {} rows, 耗时: {:?}",
            kind,
            company,
            records.len(),
            start.elapsed()
        );
        Ok(records)
    }

    /// 查询报表，任何失败记录日志后返回空列表
    pub async fn report(&self, kind: ReportKind, company: &str) -> Vec<Record> {
        self.report_section(kind, company).await.records
    }

    async fn report_section(&self, kind: ReportKind, company: &str) -> ReportSection {
        let (records, unavailable) = match self.try_report(kind, company).await {
            Ok(records) => (records, false),
            Err(e) => {
                tracing::error!("[{}] Failed to fetch {}: {}", e.kind().as_str(), kind, e);
                (Vec::new(), true)
            }
        };
        ReportSection {
            kind,
            title: kind.title(),
            records,
            unavailable,
        }
    }

    /// 依次查询公司的五种报表
    pub async fn company_reports(&self, company: &str) -> CompanyReports {
        let mut sections = Vec::with_capacity(ReportKind::ALL.len());
        for kind in ReportKind::ALL {
            sections.push(self.report_section(kind, company).await);
        }
        CompanyReports {
            company: company.to_string(),
            sections,
        }
    }

    /// 首页: 单个报表段
    pub async fn dashboard_section(&self, company: &str) -> ReportSection {
        self.report_section(ReportKind::BalanceSheet, company).await
    }
}
