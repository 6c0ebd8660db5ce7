/// Dashboard UI server
///
/// Serves the interactive page (review form + exploratory charts) and the
/// aggregated EDA data behind it. The page calls the prediction API
/// directly from the browser; this server never proxies predictions.
pub mod eda;
pub mod handlers;
pub mod routes;

pub use handlers::UiState;
pub use routes::build_ui_router;
