//! Data structures for a tennis match: players, scores, stats, saves.

mod player;
mod record;
mod tennis_match;

pub use player::{
    PerSet, Player, PlayerStats, PointScore, ServiceStats, Side, SETS_PER_MATCH, SETS_TO_WIN,
};
pub use record::SavedMatch;
pub use tennis_match::{MatchError, MatchId, TennisMatch};
