//! Similar-item recommender
//!
//! Ranks catalog items by a precomputed similarity matrix and decorates the
//! top matches with artwork from a metadata service, behind a bounded cache.

pub mod api;
pub mod assembler;
pub mod catalog;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod ranking;
pub mod service;
pub mod state;

pub use state::AppState;
