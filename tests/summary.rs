//! Integration tests for stats summaries and CSV export.

use tennis_stats_web::{
    match_summaries, percent, point_won, record_point, summarize, write_stats_csv, Player,
    PointReport, RallyEnding, Serve, Shot, Side, StatsScope, TennisMatch,
};

fn new_match() -> TennisMatch {
    TennisMatch::new(Player::new("Alice"), Player::new("Bob"), "League")
}

#[test]
fn percent_guards_zero_denominator() {
    assert_eq!(percent(0, 0), 0);
    assert_eq!(percent(5, 0), 0);
    assert_eq!(percent(1, 3), 33);
    assert_eq!(percent(3, 3), 100);
}

#[test]
fn unplayed_set_summarizes_to_zero() {
    let m = new_match();
    let s = summarize(m.player1(), StatsScope::Set(2));
    assert_eq!(s.name, "Alice");
    assert_eq!(s.total_points_won, 0);
    assert_eq!(s.first_serve_in_pct, 0);
    assert_eq!(s.first_serve_won_pct, 0);
    assert_eq!(s.second_serve_won_pct, 0);
}

#[test]
fn set_past_the_last_one_is_empty() {
    let mut m = new_match();
    point_won(&mut m, Side::One).unwrap();
    let s = summarize(m.player1(), StatsScope::Set(3));
    assert_eq!(s.total_points_won, 0);
    assert_eq!(s.scope, StatsScope::Set(3));
    assert_eq!(summarize(m.player1(), StatsScope::Match).total_points_won, 1);
}

#[test]
fn serve_percentages() {
    let mut m = new_match();
    // Alice serves four points: two first serves won, one second serve won,
    // one second serve lost.
    let reports = [
        PointReport::Ace { serve: Serve::First },
        PointReport::Rally {
            serve: Serve::First,
            winner: Side::One,
            ending: RallyEnding::Winner(Shot::Forehand),
        },
        PointReport::Rally {
            serve: Serve::Second,
            winner: Side::One,
            ending: RallyEnding::UnforcedError(Shot::Backhand),
        },
        PointReport::Rally {
            serve: Serve::Second,
            winner: Side::Two,
            ending: RallyEnding::Winner(Shot::Backhand),
        },
    ];
    for r in reports {
        record_point(&mut m, r).unwrap();
    }

    let s = summarize(m.player1(), StatsScope::Set(0));
    assert_eq!(s.aces, 1);
    assert_eq!(s.first_serve_in_pct, 50);
    assert_eq!(s.first_serve_won_pct, 100);
    assert_eq!(s.second_serve_won_pct, 50);
    assert_eq!(s.total_points_won, 3);

    let bob = summarize(m.player2(), StatsScope::Set(0));
    assert_eq!(bob.return_points_won, 1);
    assert_eq!(bob.return_points_played, 3);
    assert_eq!(bob.unforced_errors, 1);
    assert_eq!(bob.backhand_unforced_errors, 1);
    assert_eq!(bob.backhand_winners, 1);
}

#[test]
fn match_scope_sums_all_sets() {
    let mut m = new_match();
    for _ in 0..24 {
        point_won(&mut m, Side::Two).unwrap();
    }
    for _ in 0..5 {
        point_won(&mut m, Side::One).unwrap();
    }
    let bob = summarize(m.player2(), StatsScope::Match);
    assert_eq!(bob.total_points_won, 24);
    let alice = summarize(m.player1(), StatsScope::Match);
    assert_eq!(alice.total_points_won, 5);
    assert_eq!(summarize(m.player1(), StatsScope::Set(1)).total_points_won, 5);
    // Bob broke Alice three times in the first set.
    assert_eq!(bob.break_points_converted, 3);
    assert_eq!(bob.break_points, 3);
}

#[test]
fn summaries_cover_each_set_and_the_match() {
    let m = new_match();
    let all = match_summaries(&m);
    assert_eq!(all.len(), 8);
    assert_eq!(all[0].scope, StatsScope::Set(0));
    assert_eq!(all[0].name, "Alice");
    assert_eq!(all[1].name, "Bob");
    assert_eq!(all[7].scope, StatsScope::Match);
}

#[test]
fn csv_has_a_row_per_player_and_scope() {
    let mut m = new_match();
    point_won(&mut m, Side::One).unwrap();
    let mut buf = Vec::new();
    write_stats_csv(&m, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 9);
    assert!(lines[0].starts_with("player,scope,total_points_won,aces"));
    assert!(lines[1].starts_with("Alice,set 1,1,"));
    assert!(lines[8].starts_with("Bob,match,0,"));
}
