//! Read-side aggregation of the per-set stats into a per-set or whole-match summary.

use crate::models::{PerSet, Player, TennisMatch, SETS_PER_MATCH};
use serde::Serialize;

/// Which part of the match a summary covers.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "scope", content = "index")]
pub enum StatsScope {
    /// Zero-based set index.
    Set(usize),
    Match,
}

impl StatsScope {
    /// All scopes in display order: each set, then the whole match.
    pub fn all() -> impl Iterator<Item = StatsScope> {
        (0..SETS_PER_MATCH)
            .map(StatsScope::Set)
            .chain(std::iter::once(StatsScope::Match))
    }

    fn pick(self, counter: &PerSet) -> u32 {
        match self {
            // Sets past the last one were never played.
            StatsScope::Set(index) => counter.get(index).copied().unwrap_or(0),
            StatsScope::Match => counter.iter().sum(),
        }
    }

    pub fn label(self) -> String {
        match self {
            StatsScope::Set(index) => format!("set {}", index + 1),
            StatsScope::Match => "match".to_string(),
        }
    }
}

/// Statistics of one player over one scope.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct StatsSummary {
    pub name: String,
    pub scope: StatsScope,
    pub total_points_won: u32,
    pub aces: u32,
    pub double_faults: u32,
    pub first_serve_in_pct: u32,
    pub first_serve_won_pct: u32,
    pub second_serve_won_pct: u32,
    /// Return games won.
    pub break_points_converted: u32,
    pub break_points: u32,
    pub winners: u32,
    pub forehand_winners: u32,
    pub backhand_winners: u32,
    pub net_points: u32,
    pub net_winners: u32,
    pub net_unforced_errors: u32,
    pub return_points_won: u32,
    pub return_points_played: u32,
    pub unforced_errors: u32,
    pub forehand_unforced_errors: u32,
    pub backhand_unforced_errors: u32,
}

/// Integer percentage of `num / den`; 0 when nothing was played.
pub fn percent(num: u32, den: u32) -> u32 {
    if den == 0 {
        return 0;
    }
    (u64::from(num) * 100 / u64::from(den)) as u32
}

/// Summarize one player's stats over a set or the whole match.
pub fn summarize(player: &Player, scope: StatsScope) -> StatsSummary {
    let stats = player.stats();
    let service = &stats.service_stats;
    let service_points = scope.pick(&service.service_points_played);
    let first_serves_in = service_points.saturating_sub(scope.pick(&service.second_service));

    StatsSummary {
        name: player.name().to_string(),
        scope,
        total_points_won: scope.pick(&stats.total_points),
        aces: scope.pick(&service.ace),
        double_faults: scope.pick(&service.double_faults),
        first_serve_in_pct: percent(first_serves_in, service_points),
        first_serve_won_pct: percent(scope.pick(&service.first_service_won), first_serves_in),
        second_serve_won_pct: percent(
            scope.pick(&service.second_service_won),
            scope.pick(&service.second_service_in),
        ),
        break_points_converted: scope.pick(&stats.return_game_won),
        break_points: scope.pick(&stats.break_points),
        winners: scope.pick(&stats.winners),
        forehand_winners: scope.pick(&stats.forehand_winners),
        backhand_winners: scope.pick(&stats.backhand_winners),
        net_points: scope.pick(&stats.net_points),
        net_winners: scope.pick(&stats.net_winners),
        net_unforced_errors: scope.pick(&stats.net_unforced_errors),
        return_points_won: scope.pick(&stats.return_points_won),
        return_points_played: scope.pick(&stats.return_points_played),
        unforced_errors: scope.pick(&stats.unforced_errors),
        forehand_unforced_errors: scope.pick(&stats.forehand_unforced_errors),
        backhand_unforced_errors: scope.pick(&stats.backhand_unforced_errors),
    }
}

/// Summaries of both players for every set and the whole match.
pub fn match_summaries(m: &TennisMatch) -> Vec<StatsSummary> {
    StatsScope::all()
        .flat_map(|scope| {
            [m.player1(), m.player2()]
                .into_iter()
                .map(move |player| summarize(player, scope))
        })
        .collect()
}
