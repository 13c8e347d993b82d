//! Statistics module - Per-category quartiles

pub mod quartiles;

pub use quartiles::{quartiles_by_label, summaries_to_json, QuartileSummary, StatsError};
