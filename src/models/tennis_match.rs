//! TennisMatch: the two players, who serves, and which set is being played.

use crate::models::player::{Player, PointScore, Side, SETS_PER_MATCH, SETS_TO_WIN};
use uuid::Uuid;

/// Unique identifier for a match (also the id of its save).
pub type MatchId = Uuid;

/// Errors raised by scoring and match reconstruction.
///
/// These are caller bugs or corrupt saves, never part of normal play.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MatchError {
    /// A point was reported after a player already won the match.
    MatchOver,
    /// A name that is neither of the two participants.
    UnknownPlayer(String),
    /// A score that the scoring rules can never produce (e.g. AD in a tie-break).
    InconsistentScore,
}

impl std::fmt::Display for MatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchError::MatchOver => write!(f, "The match is already over"),
            MatchError::UnknownPlayer(name) => write!(f, "{} is not playing this match", name),
            MatchError::InconsistentScore => write!(f, "Score is inconsistent with tennis rules"),
        }
    }
}

impl std::error::Error for MatchError {}

/// A best-of-3 singles match.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TennisMatch {
    pub id: MatchId,
    pub(crate) match_name: String,
    pub(crate) player1: Player,
    pub(crate) player2: Player,
    pub(crate) server: Side,
    /// Always `player1.sets + player2.sets`.
    pub(crate) set_index: usize,
    /// Winner's name of each completed set.
    pub(crate) sets_winners: [Option<String>; SETS_PER_MATCH],
}

impl TennisMatch {
    /// Fresh match; player 1 serves first.
    pub fn new(player1: Player, player2: Player, match_name: impl Into<String>) -> Self {
        Self::resume(player1, player2, match_name, Side::One, Default::default())
    }

    /// Reconstruct a match from players carrying their saved scores and stats.
    pub fn resume(
        player1: Player,
        player2: Player,
        match_name: impl Into<String>,
        server: Side,
        sets_winners: [Option<String>; SETS_PER_MATCH],
    ) -> Self {
        let set_index = usize::from(player1.sets) + usize::from(player2.sets);
        Self {
            id: Uuid::new_v4(),
            match_name: match_name.into(),
            player1,
            player2,
            server,
            set_index,
            sets_winners,
        }
    }

    /// Choose who serves first (before the first point).
    pub fn with_server(mut self, server: Side) -> Self {
        self.server = server;
        self
    }

    pub fn match_name(&self) -> &str {
        &self.match_name
    }

    pub fn player1(&self) -> &Player {
        &self.player1
    }

    pub fn player2(&self) -> &Player {
        &self.player2
    }

    pub fn player(&self, side: Side) -> &Player {
        match side {
            Side::One => &self.player1,
            Side::Two => &self.player2,
        }
    }

    pub(crate) fn player_mut(&mut self, side: Side) -> &mut Player {
        match side {
            Side::One => &mut self.player1,
            Side::Two => &mut self.player2,
        }
    }

    pub fn server(&self) -> Side {
        self.server
    }

    pub fn receiver(&self) -> Side {
        self.server.opponent()
    }

    pub fn server_player(&self) -> &Player {
        self.player(self.server)
    }

    pub fn set_index(&self) -> usize {
        self.set_index
    }

    pub fn sets_winners(&self) -> &[Option<String>; SETS_PER_MATCH] {
        &self.sets_winners
    }

    /// Side of the participant with this name.
    pub fn side_of(&self, name: &str) -> Result<Side, MatchError> {
        if self.player1.name == name {
            Ok(Side::One)
        } else if self.player2.name == name {
            Ok(Side::Two)
        } else {
            Err(MatchError::UnknownPlayer(name.to_string()))
        }
    }

    /// The player who has won the match, if any.
    pub fn winner(&self) -> Option<Side> {
        [Side::One, Side::Two]
            .into_iter()
            .find(|&side| self.player(side).sets >= SETS_TO_WIN)
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    /// Both players at 6 games: the set is decided by a tie-break.
    pub fn in_tie_break(&self) -> bool {
        self.player1.games == 6 && self.player2.games == 6
    }

    /// Reject a score the scoring rules can never reach, such as AD in a
    /// tie-break or a finished tie-break still in progress. Saves are checked
    /// with this on load, and every point is checked before anything changes.
    pub fn check_score(&self) -> Result<(), MatchError> {
        let (p1, p2) = (&self.player1, &self.player2);
        let sets_ok = p1.sets <= SETS_TO_WIN
            && p2.sets <= SETS_TO_WIN
            && !(p1.sets == SETS_TO_WIN && p2.sets == SETS_TO_WIN)
            && self.set_index == usize::from(p1.sets) + usize::from(p2.sets);
        // A set closes at 6-4 or better, so 6 games leave the other on 5 or 6.
        let games_ok = matches!(
            (p1.games.max(p2.games), p1.games.min(p2.games)),
            (0..=5, _) | (6, 5..=6)
        );
        if !sets_ok || !games_ok || !self.points_ok() {
            return Err(MatchError::InconsistentScore);
        }

        for (index, winner) in self.sets_winners.iter().enumerate() {
            if winner.is_some() != (index < self.set_index) {
                return Err(MatchError::InconsistentScore);
            }
        }
        for player in [p1, p2] {
            let won = self
                .sets_winners
                .iter()
                .filter(|w| w.as_deref() == Some(player.name.as_str()))
                .count();
            if won != usize::from(player.sets) {
                return Err(MatchError::InconsistentScore);
            }
        }
        Ok(())
    }

    fn points_ok(&self) -> bool {
        let (a, b) = (self.player1.points, self.player2.points);
        if self.in_tie_break() {
            let counter = |p: PointScore| matches!(p, PointScore::Zero | PointScore::TieBreak(_));
            let (x, y) = (a.tie_break_count(), b.tie_break_count());
            let decided = |won: u8, lost: u8| won >= 7 && won.saturating_sub(lost) >= 2;
            return counter(a)
                && counter(b)
                && x < u8::MAX
                && y < u8::MAX
                && !decided(x, y)
                && !decided(y, x);
        }
        match (a, b) {
            (PointScore::TieBreak(_), _) | (_, PointScore::TieBreak(_)) => false,
            (PointScore::Advantage, other) | (other, PointScore::Advantage) => {
                other == PointScore::Forty
            }
            _ => true,
        }
    }

    /// The server becomes the receiver and the receiver becomes the server.
    pub fn change_server(&mut self) {
        self.server = self.server.opponent();
        log::debug!("{} is serving", self.server_player().name);
    }

    /// Hand the players back; they outlive the match.
    pub fn into_players(self) -> (Player, Player) {
        (self.player1, self.player2)
    }
}
