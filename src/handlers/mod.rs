//! HTTP handlers

pub mod explore;
pub mod health;
pub mod meta;
pub mod predict;
