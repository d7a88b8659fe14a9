//! Filtering and aggregation core of the bike-sharing dashboard.
//!
//! [`loader`] reads the two datasets, [`context::DatasetContext`] holds them
//! for the life of the process, [`filter::apply_filter`] narrows them per
//! interaction and [`aggregations`] turns the result into chart tables.
//! [`view::DashboardView`] runs one complete cycle.

pub mod aggregations;
pub mod config;
pub mod context;
pub mod filter;
pub mod loader;
pub mod output;
pub mod records;
pub mod view;
