//! Point reports: how a point ended, turned into stat increments plus the score update.

use crate::logic::scoring::{ace_played, point_won, PointOutcome};
use crate::models::{MatchError, Side, TennisMatch};
use serde::{Deserialize, Serialize};

/// Which serve the point was played on.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Serve {
    #[default]
    First,
    /// The first serve was a fault and the second one landed in.
    Second,
}

/// The last shot of a rally.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shot {
    Forehand,
    Backhand,
    Volley,
}

/// Why the rally ended. Winners are hit by the point winner; errors are made
/// by the loser.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "shot")]
pub enum RallyEnding {
    Winner(Shot),
    ForcedError(Shot),
    UnforcedError(Shot),
}

/// Everything the caller knows about one point.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum PointReport {
    /// Unreturned serve: point to the server.
    Ace {
        #[serde(default)]
        serve: Serve,
    },
    /// Both serves missed: point to the receiver.
    DoubleFault,
    Rally {
        #[serde(default)]
        serve: Serve,
        winner: Side,
        ending: RallyEnding,
    },
}

impl PointReport {
    /// Side that wins the point, given who is serving.
    pub fn winner(&self, server: Side) -> Side {
        match *self {
            PointReport::Ace { .. } => server,
            PointReport::DoubleFault => server.opponent(),
            PointReport::Rally { winner, .. } => winner,
        }
    }
}

/// Apply the stats a report implies at the current set, then score the point.
/// Nothing is counted when the point is rejected.
pub fn record_point(m: &mut TennisMatch, report: PointReport) -> Result<PointOutcome, MatchError> {
    if m.is_over() {
        return Err(MatchError::MatchOver);
    }
    m.check_score()?;
    let set = m.set_index();
    let server = m.server();
    let receiver = m.receiver();
    let winner = report.winner(server);
    let loser = winner.opponent();

    match report {
        PointReport::Ace { serve } => {
            count_serve(m, serve, true);
            ace_played(m)?;
        }
        PointReport::DoubleFault => {
            let service = &mut m.player_mut(server).stats.service_stats;
            service.second_service[set] += 1;
            service.double_faults[set] += 1;
        }
        PointReport::Rally {
            serve,
            winner,
            ending,
        } => {
            count_serve(m, serve, winner == server);
            if winner == receiver {
                m.player_mut(receiver).stats.return_points_won[set] += 1;
            }
            match ending {
                RallyEnding::Winner(shot) => {
                    let stats = &mut m.player_mut(winner).stats;
                    stats.winners[set] += 1;
                    match shot {
                        Shot::Forehand => stats.forehand_winners[set] += 1,
                        Shot::Backhand => stats.backhand_winners[set] += 1,
                        Shot::Volley => {
                            stats.net_points[set] += 1;
                            stats.net_winners[set] += 1;
                        }
                    }
                }
                RallyEnding::ForcedError(shot) => {
                    if shot == Shot::Volley {
                        m.player_mut(winner).stats.net_points[set] += 1;
                    }
                }
                RallyEnding::UnforcedError(shot) => {
                    let stats = &mut m.player_mut(loser).stats;
                    stats.unforced_errors[set] += 1;
                    match shot {
                        Shot::Forehand => stats.forehand_unforced_errors[set] += 1,
                        Shot::Backhand => stats.backhand_unforced_errors[set] += 1,
                        Shot::Volley => stats.net_unforced_errors[set] += 1,
                    }
                }
            }
        }
    }

    let outcome = point_won(m, winner)?;

    // Aces and double faults never reach the receiver's racket.
    if matches!(report, PointReport::Ace { .. } | PointReport::DoubleFault) {
        let played = &mut m.player_mut(receiver).stats.return_points_played[set];
        *played = played.saturating_sub(1);
    }
    Ok(outcome)
}

/// Second-serve bookkeeping and serve points won by the server.
fn count_serve(m: &mut TennisMatch, serve: Serve, server_won: bool) {
    let set = m.set_index();
    let server = m.server();
    let service = &mut m.player_mut(server).stats.service_stats;
    match serve {
        Serve::First => {
            if server_won {
                service.first_service_won[set] += 1;
            }
        }
        Serve::Second => {
            service.second_service[set] += 1;
            service.second_service_in[set] += 1;
            if server_won {
                service.second_service_won[set] += 1;
            }
        }
    }
}
