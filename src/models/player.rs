//! Player, PointScore, and per-set statistics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Best-of-3: every per-set counter has one slot per possible set.
pub const SETS_PER_MATCH: usize = 3;

/// Sets needed to win the match.
pub const SETS_TO_WIN: u8 = 2;

/// One counter per set, indexed by the match's `set_index`.
pub type PerSet = [u32; SETS_PER_MATCH];

/// Which of the two participants of a match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    One,
    Two,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }
}

/// Score of a player inside the current game.
///
/// Outside a tie-break only the ladder values and `Advantage` occur. While a
/// tie-break is played the score is a plain counter: `Zero` until the first
/// point is won, then `TieBreak(n)`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointScore {
    #[default]
    Zero,
    Fifteen,
    Thirty,
    Forty,
    Advantage,
    TieBreak(u8),
}

impl PointScore {
    /// Next value on the `0 → 15 → 30 → 40` ladder. `None` at 40 and beyond:
    /// reaching advantage or winning the game are separate transitions.
    pub fn next_rung(self) -> Option<PointScore> {
        match self {
            PointScore::Zero => Some(PointScore::Fifteen),
            PointScore::Fifteen => Some(PointScore::Thirty),
            PointScore::Thirty => Some(PointScore::Forty),
            PointScore::Forty | PointScore::Advantage | PointScore::TieBreak(_) => None,
        }
    }

    /// Tie-break points won so far.
    pub fn tie_break_count(self) -> u8 {
        match self {
            PointScore::TieBreak(n) => n,
            _ => 0,
        }
    }
}

impl fmt::Display for PointScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointScore::Zero => write!(f, "0"),
            PointScore::Fifteen => write!(f, "15"),
            PointScore::Thirty => write!(f, "30"),
            PointScore::Forty => write!(f, "40"),
            PointScore::Advantage => write!(f, "AD"),
            PointScore::TieBreak(n) => write!(f, "{}", n),
        }
    }
}

/// Serve counters, per set.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ServiceStats {
    pub ace: PerSet,
    pub double_faults: PerSet,
    /// Points that needed a second serve.
    pub second_service: PerSet,
    /// Second serves that landed in.
    pub second_service_in: PerSet,
    pub service_points_played: PerSet,
    pub first_service_won: PerSet,
    pub second_service_won: PerSet,
}

/// Cumulative statistics bag of a player, per set.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Points won (analytics counter, not the scoring value).
    pub total_points: PerSet,
    /// Games held at the moment each game was won.
    pub total_games: PerSet,
    pub winners: PerSet,
    pub forehand_winners: PerSet,
    pub backhand_winners: PerSet,
    pub net_winners: PerSet,
    pub net_points: PerSet,
    pub unforced_errors: PerSet,
    pub forehand_unforced_errors: PerSet,
    pub backhand_unforced_errors: PerSet,
    pub net_unforced_errors: PerSet,
    pub return_points_played: PerSet,
    pub return_points_won: PerSet,
    pub return_game_won: PerSet,
    pub break_points: PerSet,
    pub service_stats: ServiceStats,
}

/// One competitor: current score and cumulative statistics.
///
/// Scores and stats are read-only from outside the crate; the scoring logic
/// is the only writer.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub(crate) name: String,
    pub(crate) points: PointScore,
    pub(crate) games: u8,
    pub(crate) sets: u8,
    pub(crate) stats: PlayerStats,
}

impl Player {
    /// Create a new player with the given name. Scores and stats start at zero.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: PointScore::Zero,
            games: 0,
            sets: 0,
            stats: PlayerStats::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> PointScore {
        self.points
    }

    pub fn games(&self) -> u8 {
        self.games
    }

    pub fn sets(&self) -> u8 {
        self.sets
    }

    /// Current points for display (`AD` literally).
    pub fn points_text(&self) -> String {
        self.points.to_string()
    }

    pub fn games_text(&self) -> String {
        self.games.to_string()
    }

    pub fn sets_text(&self) -> String {
        self.sets.to_string()
    }

    pub fn total_points(&self) -> &PerSet {
        &self.stats.total_points
    }

    pub fn total_games(&self) -> &PerSet {
        &self.stats.total_games
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub(crate) fn reset_points(&mut self) {
        self.points = PointScore::Zero;
    }
}
