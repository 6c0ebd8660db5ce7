use crate::ui::eda::EdaReport;
use axum::{extract::State, response::Html, Json};
use std::sync::Arc;

/// Shared UI server state
#[derive(Clone)]
pub struct UiState {
    /// The dashboard page with the API base URL already substituted
    pub page: Arc<String>,
    /// EDA report computed once at startup
    pub report: Arc<EdaReport>,
}

impl UiState {
    pub fn new(api_url: &str, report: EdaReport) -> Self {
        let page = include_str!("index.html").replace("__API_URL__", api_url.trim_end_matches('/'));
        Self {
            page: Arc::new(page),
            report: Arc::new(report),
        }
    }
}

/// Serve the dashboard page
pub async fn index(State(state): State<UiState>) -> Html<String> {
    Html(state.page.as_ref().clone())
}

/// Serve the EDA report for the dashboard charts
pub async fn eda_report(State(state): State<UiState>) -> Json<EdaReport> {
    Json(state.report.as_ref().clone())
}
