//! Misinformation Exposure Dashboard Library
//!
//! This library looks up a Twitter account's misinformation exposure and
//! partisanship scores from the scoring API, compares them against reference
//! means, joins the accounts it follows against a static falsity table, and
//! renders the result as an HTML dashboard and a JSON document.
//!
//! # Modules
//!
//! - `charts`: Vega-Lite chart specifications.
//! - `config`: Configuration management.
//! - `dashboard`: Dashboard view model.
//! - `deltas`: Percentage deviation from reference means.
//! - `enrichment`: Follow-list enrichment against the falsity table.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers and router.
//! - `models`: Scoring API data models.
//! - `reference_data`: Static CSV reference tables.
//! - `render`: HTML rendering.
//! - `scoring_client`: Scoring API client.

pub mod charts;
pub mod config;
pub mod dashboard;
pub mod deltas;
pub mod enrichment;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod reference_data;
pub mod render;
pub mod scoring_client;
