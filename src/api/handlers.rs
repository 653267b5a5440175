use crate::models::UNKNOWN_COMPANY;
use crate::service::{CompanyReports, ReportService};
use axum::{
    extract::{Json, Query, State},
    response::Html,
};
use std::sync::Arc;

use super::views;

/// 共享状态: 只读的报表服务
#[derive(Clone)]
pub struct AppState {
    pub reports: Arc<ReportService>,
}

/// 从查询参数取公司名称: 同名参数取第一个，缺省为 "Unknown"
fn company_param(params: Vec<(String, String)>) -> String {
    params
        .into_iter()
        .find(|(key, _)| key == "company")
        .map(|(_, value)| value)
        .unwrap_or_else(|| UNKNOWN_COMPANY.to_string())
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 首页: 第一个公司的资产负债表
pub async fn dashboard(State(state): State<AppState>) -> Html<String> {
    let companies = state.reports.company_list().await;
    let balance_sheet = state.reports.dashboard_section(companies.first()).await;
    Html(views::dashboard(&companies, &balance_sheet))
}

/// 公司列表
pub async fn company_list(State(state): State<AppState>) -> Html<String> {
    let companies = state.reports.company_list().await;
    Html(views::company_list(&companies))
}

/// 公司详情: 五种报表
pub async fn company_details(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Html<String> {
    let company = company_param(params);
    let reports = state.reports.company_reports(&company).await;
    Html(views::company_details(&reports))
}

/// 公司详情 JSON 版本
pub async fn company_details_json(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Json<CompanyReports> {
    let company = company_param(params);
    Json(state.reports.company_reports(&company).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn first_company_parameter_wins() {
        let params = pairs(&[("x", "1"), ("company", "A"), ("company", "B")]);
        assert_eq!(company_param(params), "A");
    }

    #[test]
    fn missing_company_parameter_defaults_to_unknown() {
        assert_eq!(company_param(pairs(&[("page", "2")])), UNKNOWN_COMPANY);
    }
}
