//! Product review sentiment classification system.
//!
//! Three cooperating processes share this library:
//! - `review-sentiment-api`: HTTP prediction service exposing `/health` and
//!   `/predict` over a classifier artifact loaded once at startup.
//! - `review-sentiment-launcher`: spawns the API, waits behind a readiness
//!   barrier, spawns the UI, opens a browser tab, and supervises both
//!   children.
//! - `review-sentiment-ui`: dashboard server with the review form and the
//!   exploratory data charts.

pub mod api;
pub mod config;
pub mod error;
pub mod launcher;
pub mod model;
pub mod ui;

pub use error::{AppError, Result};
