//! Tennis match tracker: library with models and scoring logic.

pub mod logic;
pub mod models;

pub use logic::{
    ace_played, match_summaries, percent, point_won, record_point, summarize, write_stats_csv,
    JsonFileStore, MatchSession, MatchStore, MemoryStore, PointOutcome, PointReport, RallyEnding,
    Reported, Serve, Shot, StatsScope, StatsSummary, StoreError,
};
pub use models::{
    MatchError, MatchId, PerSet, Player, PlayerStats, PointScore, SavedMatch, ServiceStats, Side,
    TennisMatch, SETS_PER_MATCH, SETS_TO_WIN,
};
