//! CSV export of the match statistics.

use crate::logic::summary::{match_summaries, StatsSummary};
use crate::models::TennisMatch;
use std::io::Write;

const HEADER: [&str; 21] = [
    "player",
    "scope",
    "total_points_won",
    "aces",
    "double_faults",
    "first_serve_in_pct",
    "first_serve_won_pct",
    "second_serve_won_pct",
    "break_points_converted",
    "break_points",
    "winners",
    "forehand_winners",
    "backhand_winners",
    "net_points",
    "net_winners",
    "net_unforced_errors",
    "return_points_won",
    "return_points_played",
    "unforced_errors",
    "forehand_unforced_errors",
    "backhand_unforced_errors",
];

fn row(s: &StatsSummary) -> Vec<String> {
    let mut fields = vec![s.name.clone(), s.scope.label()];
    fields.extend(
        [
            s.total_points_won,
            s.aces,
            s.double_faults,
            s.first_serve_in_pct,
            s.first_serve_won_pct,
            s.second_serve_won_pct,
            s.break_points_converted,
            s.break_points,
            s.winners,
            s.forehand_winners,
            s.backhand_winners,
            s.net_points,
            s.net_winners,
            s.net_unforced_errors,
            s.return_points_won,
            s.return_points_played,
            s.unforced_errors,
            s.forehand_unforced_errors,
            s.backhand_unforced_errors,
        ]
        .iter()
        .map(u32::to_string),
    );
    fields
}

/// Write a header and one row per player per set, then the match totals.
pub fn write_stats_csv<W: Write>(m: &TennisMatch, writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;
    for summary in match_summaries(m) {
        wtr.write_record(row(&summary))?;
    }
    wtr.flush()?;
    Ok(())
}
