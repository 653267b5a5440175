pub mod handlers;
pub mod views;

pub use handlers::*;

use axum::{routing::get, Router};

/// 构建路由
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/company-list", get(company_list))
        .route("/company-details", get(company_details))
        .route("/api/company-details", get(company_details_json))
        .route("/health", get(health_check))
        .with_state(state)
}
