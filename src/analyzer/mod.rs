//! Analyzer module - status rules and the generation engine

pub mod engine;
pub mod status;

pub use engine::{AggregateStats, GeneratedViewer, ReportAnalysis, ViewerEngine};
pub use status::{aggregate, command_status};
