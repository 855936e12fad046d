//! Data models

pub mod chart;
pub mod criteria;
pub mod prediction;
pub mod record;

pub use chart::*;
pub use criteria::*;
pub use prediction::*;
pub use record::*;
