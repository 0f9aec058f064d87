//! HTTP API handlers
//!
//! - `GET /` dashboard page
//! - `POST /api/analyze` message relay to the classification service
//! - `POST /api/report` full CSV analysis
//! - `GET /health`

pub mod analyze;
pub mod health;
pub mod report;
pub mod ui;

pub use analyze::analyze_routes;
pub use health::health_routes;
pub use report::report_routes;
pub use ui::ui_routes;
