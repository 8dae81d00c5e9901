//! Scoring state machine: point → game → set → match, tie-breaks, server rotation.

use crate::models::{MatchError, PointScore, Side, TennisMatch, SETS_TO_WIN};
use serde::Serialize;

/// What a single point closed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "winner")]
pub enum PointOutcome {
    /// Game continues (includes tie-break points that do not end it).
    Point,
    /// A game was won; service passes to the other player.
    Game(Side),
    /// The game that made it 6-6 was won: a tie-break starts.
    TieBreak,
    Set(Side),
    /// A player reached two sets. Nothing more can be scored.
    Match(Side),
}

impl PointOutcome {
    pub fn is_match_over(&self) -> bool {
        matches!(self, PointOutcome::Match(_))
    }
}

/// Score one point for `winner`.
///
/// Counts the point as a service point for the server and a return point for
/// the receiver, then advances the score and fires the game, set, and match
/// transitions it closes. A rejected point leaves the match untouched.
pub fn point_won(m: &mut TennisMatch, winner: Side) -> Result<PointOutcome, MatchError> {
    if m.is_over() {
        return Err(MatchError::MatchOver);
    }
    m.check_score()?;
    let set = m.set_index;
    let (server, receiver) = (m.server, m.receiver());
    m.player_mut(server).stats.service_stats.service_points_played[set] += 1;
    m.player_mut(receiver).stats.return_points_played[set] += 1;

    let loser = winner.opponent();
    let winner_points = m.player(winner).points;
    let loser_points = m.player(loser).points;

    let outcome = if m.in_tie_break() {
        tie_break_point(m, winner)
    } else if (winner_points == PointScore::Forty
        && !matches!(loser_points, PointScore::Forty | PointScore::Advantage))
        || winner_points == PointScore::Advantage
    {
        m.player_mut(winner).reset_points();
        m.player_mut(loser).reset_points();
        game_won(m, winner)
    } else {
        match (winner_points, loser_points) {
            (PointScore::Forty, PointScore::Forty) => {
                m.player_mut(winner).points = PointScore::Advantage;
            }
            (PointScore::Forty, PointScore::Advantage) => {
                m.player_mut(loser).points = PointScore::Forty;
            }
            // Only 0, 15 or 30 get here once the score has been checked.
            _ => {
                if let Some(next) = winner_points.next_rung() {
                    m.player_mut(winner).points = next;
                }
            }
        }
        check_break_point(m, winner);
        PointOutcome::Point
    };

    m.player_mut(winner).stats.total_points[set] += 1;
    log::debug!(
        "{} {} - {} {}",
        m.player1.name,
        m.player1.points,
        m.player2.points,
        m.player2.name
    );
    debug_assert_eq!(
        m.set_index,
        usize::from(m.player1.sets) + usize::from(m.player2.sets)
    );
    Ok(outcome)
}

/// The server hit an unreturned serve. Does not score the point.
pub fn ace_played(m: &mut TennisMatch) -> Result<(), MatchError> {
    if m.is_over() {
        return Err(MatchError::MatchOver);
    }
    let set = m.set_index;
    let server = m.server;
    m.player_mut(server).stats.service_stats.ace[set] += 1;
    Ok(())
}

/// The receiver is one point from breaking serve: count a break point.
fn check_break_point(m: &mut TennisMatch, winner: Side) {
    if winner != m.receiver() {
        return;
    }
    let winner_points = m.player(winner).points;
    let loser_points = m.player(winner.opponent()).points;
    let is_break_point = winner_points == PointScore::Advantage
        || (winner_points == PointScore::Forty && loser_points != PointScore::Forty);
    if is_break_point {
        let set = m.set_index;
        m.player_mut(winner).stats.break_points[set] += 1;
    }
}

/// Game-level transition. Points are already reset.
fn game_won(m: &mut TennisMatch, winner: Side) -> PointOutcome {
    let set = m.set_index;
    if m.server != winner {
        m.player_mut(winner).stats.return_game_won[set] += 1;
    }
    let loser_games = m.player(winner.opponent()).games;
    let player = m.player_mut(winner);
    player.games += 1;
    player.stats.total_games[set] = u32::from(player.games);

    match (player.games, loser_games) {
        (6, 0..=4) | (7, 5) => set_won(m, winner),
        (6, 6) => {
            log::info!("Tie-break in set {}", set + 1);
            m.change_server();
            PointOutcome::TieBreak
        }
        _ => {
            m.change_server();
            PointOutcome::Game(winner)
        }
    }
}

/// One point inside a tie-break: a plain counter, first to 7 by 2.
fn tie_break_point(m: &mut TennisMatch, winner: Side) -> PointOutcome {
    let won = m.player(winner).points.tie_break_count() + 1;
    let lost = m.player(winner.opponent()).points.tie_break_count();
    m.player_mut(winner).points = PointScore::TieBreak(won);

    if won >= 7 && won.saturating_sub(lost) >= 2 {
        let set = m.set_index;
        let player = m.player_mut(winner);
        player.games += 1;
        player.stats.total_games[set] = u32::from(player.games);
        return set_won(m, winner);
    }
    if (u16::from(won) + u16::from(lost)) % 2 == 1 {
        m.change_server();
    }
    PointOutcome::Point
}

/// Set-level transition: record the set, reset games, maybe end the match.
fn set_won(m: &mut TennisMatch, winner: Side) -> PointOutcome {
    let set = m.set_index;
    m.change_server();
    for side in [Side::One, Side::Two] {
        let player = m.player_mut(side);
        player.reset_points();
        player.games = 0;
    }
    let player = m.player_mut(winner);
    player.sets += 1;
    let name = player.name.clone();
    let sets = player.sets;
    m.sets_winners[set] = Some(name.clone());
    m.set_index = usize::from(m.player1.sets) + usize::from(m.player2.sets);
    log::info!("{} wins set {}", name, set + 1);

    if sets == SETS_TO_WIN {
        log::info!("{} wins the match {}", name, m.match_name);
        PointOutcome::Match(winner)
    } else {
        PointOutcome::Set(winner)
    }
}
