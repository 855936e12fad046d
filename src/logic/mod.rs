//! Core domain logic
//!
//! Pure components over immutable inputs: the dataset store, the grade
//! codec, the filter engine, the chart builder and the prediction service.
//! All of them are safe to call concurrently; no locks are needed.

pub mod chart;
pub mod codec;
pub mod dataset;
pub mod filter;
pub mod predict;
