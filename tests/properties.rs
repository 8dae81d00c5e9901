//! Property tests: scoring invariants over arbitrary point sequences.

use proptest::prelude::*;
use tennis_stats_web::{
    point_won, Player, PointOutcome, PointScore, SavedMatch, Side, TennisMatch,
};

fn new_match() -> TennisMatch {
    TennisMatch::new(Player::new("Alice"), Player::new("Bob"), "Random")
}

fn side(won_by_one: bool) -> Side {
    if won_by_one {
        Side::One
    } else {
        Side::Two
    }
}

fn is_ladder(p: PointScore) -> bool {
    matches!(
        p,
        PointScore::Zero
            | PointScore::Fifteen
            | PointScore::Thirty
            | PointScore::Forty
            | PointScore::Advantage
    )
}

proptest! {
    #[test]
    fn scoring_invariants_hold(points in prop::collection::vec(any::<bool>(), 0..600)) {
        let mut m = new_match();
        for won_by_one in points {
            if m.is_over() {
                break;
            }
            let winner = side(won_by_one);
            let was_tie_break = m.in_tie_break();
            let server_before = m.server();
            let games_before = (m.player(winner).games(), m.player(winner.opponent()).games());

            let outcome = point_won(&mut m, winner).unwrap();
            let (p1, p2) = (m.player1(), m.player2());

            prop_assert_eq!(m.set_index(), usize::from(p1.sets() + p2.sets()));
            prop_assert_eq!(m.check_score(), Ok(()));
            prop_assert!(p1.games() <= 7 && p2.games() <= 7);
            prop_assert!(
                !(p1.points() == PointScore::Advantage && p2.points() == PointScore::Advantage)
            );
            if !m.in_tie_break() {
                prop_assert!(is_ladder(p1.points()) && is_ladder(p2.points()));
            }
            let filled = m.sets_winners().iter().filter(|w| w.is_some()).count();
            prop_assert_eq!(filled, m.set_index());

            match outcome {
                PointOutcome::Set(_) | PointOutcome::Match(_) => {
                    let closing = (games_before.0 + 1, games_before.1);
                    prop_assert!(
                        matches!(closing, (6, 0..=4) | (7, 5) | (7, 6)),
                        "set closed at {:?}",
                        closing
                    );
                    prop_assert_eq!(was_tie_break, closing == (7, 6));
                    prop_assert_ne!(m.server(), server_before);
                }
                PointOutcome::TieBreak => {
                    prop_assert!(m.in_tie_break());
                    prop_assert_eq!(closing_games(&m), (6, 6));
                    prop_assert_ne!(m.server(), server_before);
                }
                PointOutcome::Game(_) => {
                    prop_assert_ne!(m.server(), server_before);
                }
                PointOutcome::Point if was_tie_break => {
                    let total = p1.points().tie_break_count() + p2.points().tie_break_count();
                    prop_assert_eq!(m.server() != server_before, total % 2 == 1);
                }
                PointOutcome::Point => {
                    prop_assert_eq!(m.server(), server_before);
                }
            }
        }
    }

    #[test]
    fn saved_match_resumes_identically(
        before in prop::collection::vec(any::<bool>(), 0..200),
        after in prop::collection::vec(any::<bool>(), 0..200),
    ) {
        let mut original = new_match();
        for won_by_one in before {
            if original.is_over() {
                break;
            }
            point_won(&mut original, side(won_by_one)).unwrap();
        }

        let json = serde_json::to_string(&SavedMatch::from_match(&original)).unwrap();
        let record: SavedMatch = serde_json::from_str(&json).unwrap();
        let mut resumed = TennisMatch::from_saved(record).unwrap();
        prop_assert_eq!(&resumed, &original);

        for won_by_one in after {
            let a = point_won(&mut original, side(won_by_one));
            let b = point_won(&mut resumed, side(won_by_one));
            prop_assert_eq!(a, b);
        }
        prop_assert_eq!(resumed, original);
    }
}

fn closing_games(m: &TennisMatch) -> (u8, u8) {
    (m.player1().games(), m.player2().games())
}
