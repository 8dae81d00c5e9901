//! SavedMatch: the persisted shape of a match in progress or finished.

use crate::models::player::{Player, SETS_PER_MATCH};
use crate::models::tennis_match::{MatchError, MatchId, TennisMatch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A match as written to storage: players with their full stats bag, server
/// and receiver by name, set winners, and whether the match has ended.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedMatch {
    pub id: MatchId,
    pub match_name: String,
    pub saved_at: DateTime<Utc>,
    pub player1: Player,
    pub player2: Player,
    pub server: String,
    pub receiver: String,
    pub sets_winners: [Option<String>; SETS_PER_MATCH],
    pub match_ended: bool,
}

impl SavedMatch {
    /// Snapshot of a match, stamped with the current time.
    pub fn from_match(m: &TennisMatch) -> Self {
        Self {
            id: m.id,
            match_name: m.match_name.clone(),
            saved_at: Utc::now(),
            player1: m.player1.clone(),
            player2: m.player2.clone(),
            server: m.server_player().name.clone(),
            receiver: m.player(m.receiver()).name.clone(),
            sets_winners: m.sets_winners.clone(),
            match_ended: m.is_over(),
        }
    }

    /// Short label for save lists: `name : p1 vs p2`.
    pub fn label(&self) -> String {
        format!(
            "{} : {} vs {}",
            self.match_name, self.player1.name, self.player2.name
        )
    }
}

impl TennisMatch {
    /// Rebuild a match from its save. The id is kept so saving again
    /// replaces the record instead of duplicating it. A save whose score the
    /// rules cannot produce is rejected with `InconsistentScore`.
    pub fn from_saved(record: SavedMatch) -> Result<Self, MatchError> {
        let SavedMatch {
            id,
            match_name,
            player1,
            player2,
            server,
            receiver,
            sets_winners,
            ..
        } = record;
        let mut m = TennisMatch::resume(player1, player2, match_name, Default::default(), sets_winners);
        m.id = id;
        let server = m.side_of(&server)?;
        if m.side_of(&receiver)? != server.opponent() {
            return Err(MatchError::UnknownPlayer(receiver));
        }
        m.server = server;
        m.check_score()?;
        Ok(m)
    }
}
