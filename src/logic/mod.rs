//! Match business logic: scoring, point reports, stats, saves.

mod export;
mod point_report;
mod scoring;
mod session;
mod store;
mod summary;

pub use export::write_stats_csv;
pub use point_report::{record_point, PointReport, RallyEnding, Serve, Shot};
pub use scoring::{ace_played, point_won, PointOutcome};
pub use session::{MatchSession, Reported};
pub use store::{JsonFileStore, MatchStore, MemoryStore, StoreError};
pub use summary::{match_summaries, percent, summarize, StatsScope, StatsSummary};
