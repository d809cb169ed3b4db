//! # Camwatch - Cloud Camera Archive Watchdog
//!
//! A command-line utility for auditing a fleet of cloud cameras: archive
//! coverage analysis, gap detection, fleet inventory stats, and report
//! export.
//!
//! ## Features
//!
//! - **Archive Analysis**: Coverage percentage, gap statistics, and per-day
//!   recording timelines built from raw archive fragments
//! - **Fleet Inventory**: Camera listing with filters by status, vendor,
//!   and data center
//! - **Fleet Statistics**: Online/offline breakdowns, vendor and model
//!   distributions, memory card health
//! - **Integrity Reports**: Concurrent full-fleet analysis with CSV, JSON,
//!   and Excel export
//!
//! ## Usage
//!
//! ```rust,no_run
//! use camwatch::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
