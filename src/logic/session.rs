//! A match in progress together with the store it saves into.

use crate::logic::point_report::{record_point, PointReport};
use crate::logic::scoring::PointOutcome;
use crate::logic::store::{MatchStore, StoreError};
use crate::models::{MatchError, MatchId, SavedMatch, TennisMatch};

/// A scored point. `save_error` is set when the point ended the match and the
/// automatic save failed; the point still counts.
#[derive(Debug)]
pub struct Reported {
    pub outcome: PointOutcome,
    pub save_error: Option<StoreError>,
}

/// Owns the match being scored and the injected store. When a point ends
/// the match, the session saves it with `match_ended = true`.
#[derive(Debug)]
pub struct MatchSession<S: MatchStore> {
    tennis_match: TennisMatch,
    store: S,
}

impl<S: MatchStore> MatchSession<S> {
    pub fn new(tennis_match: TennisMatch, store: S) -> Self {
        Self {
            tennis_match,
            store,
        }
    }

    /// Continue a saved match.
    pub fn resume(store: S, id: MatchId) -> Result<Self, StoreError> {
        let record = store.load(id)?;
        let tennis_match = TennisMatch::from_saved(record)?;
        log::info!("Resuming match {}", tennis_match.match_name());
        Ok(Self::new(tennis_match, store))
    }

    pub fn tennis_match(&self) -> &TennisMatch {
        &self.tennis_match
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Score a reported point. The score is updated before any save is
    /// attempted, so a failed save leaves it intact.
    pub fn report(&mut self, report: PointReport) -> Result<Reported, MatchError> {
        let outcome = record_point(&mut self.tennis_match, report)?;
        let save_error = if outcome.is_match_over() {
            self.save().err()
        } else {
            None
        };
        if let Some(e) = &save_error {
            log::warn!("Match {} ended but was not saved: {}", self.tennis_match.match_name(), e);
        }
        Ok(Reported {
            outcome,
            save_error,
        })
    }

    /// Save the current state (explicit user save or match end).
    pub fn save(&mut self) -> Result<(), StoreError> {
        self.store.save(SavedMatch::from_match(&self.tennis_match))
    }

    pub fn into_inner(self) -> (TennisMatch, S) {
        (self.tennis_match, self.store)
    }
}
