use super::*;
use crate::input::history::SharedHistoryTable;
use crate::model::scores::SYNERGY_MAX;

fn history(games: u32, win_rate: f64, avg_kda: Option<f64>, recent_games: u32) -> PairHistory {
    PairHistory {
        games,
        win_rate,
        avg_kda,
        recent_games,
    }
}

fn table_with(a: &str, b: &str, h: PairHistory) -> SharedHistoryTable {
    let mut table = SharedHistoryTable::new();
    table.insert(a, b, h);
    table
}

#[test]
fn test_win_rate_swing_at_full_confidence() {
    let params = SynergyParams::default();
    let table = table_with("ana", "ben", history(20, 0.9, Some(2.0), 0));
    let scorer = PairSynergyScorer::new(&table, &params);
    let s = scorer.score("ana", Role::Jungle, "ben", Role::Mid);
    assert!((s.value - 0.16).abs() < 1e-12);
    assert_eq!(s.games, 20);
    assert_eq!(s.source, SynergySourceKind::History);
}

#[test]
fn test_synergy_is_symmetric() {
    let params = SynergyParams::default();
    let mut table = table_with("ana", "ben", history(12, 0.7, Some(3.1), 4));
    table.insert_role_pair("ben", Role::Mid, "ana", Role::Jungle, history(6, 0.83, None, 1));
    let scorer = PairSynergyScorer::new(&table, &params);

    let ab = scorer.score("ana", Role::Jungle, "ben", Role::Mid);
    let ba = scorer.score("ben", Role::Mid, "ana", Role::Jungle);
    assert_eq!(ab, ba);
    assert_eq!(ab.source, SynergySourceKind::RoleRefined);

    let none = NoHistory;
    let neutral = PairSynergyScorer::new(&none, &params);
    assert_eq!(
        neutral.score("x", Role::Top, "y", Role::Jungle),
        neutral.score("y", Role::Jungle, "x", Role::Top)
    );
}

#[test]
fn test_confidence_scales_with_shared_games() {
    let params = SynergyParams::default();
    let table = table_with("a", "b", history(5, 0.9, None, 0));
    let scorer = PairSynergyScorer::new(&table, &params);
    let s = scorer.score("a", Role::Top, "b", Role::Mid);
    assert!((s.value - 0.16 * 5.0 / 15.0).abs() < 1e-12);
    assert!((s.confidence - 5.0 / 15.0).abs() < 1e-12);
}

#[test]
fn test_kda_adjustment_both_directions() {
    let params = SynergyParams::default();
    let none = NoHistory;
    let scorer = PairSynergyScorer::new(&none, &params);
    let high = scorer.raw_value(&history(20, 0.5, Some(3.0), 0));
    let low = scorer.raw_value(&history(20, 0.5, Some(1.0), 0));
    let near = scorer.raw_value(&history(20, 0.5, Some(2.3), 0));
    assert!((high - 0.05).abs() < 1e-12);
    assert!((low + 0.05).abs() < 1e-12);
    assert_eq!(near, 0.0);
}

#[test]
fn test_recency_bonus_bounded() {
    let params = SynergyParams::default();
    let none = NoHistory;
    let scorer = PairSynergyScorer::new(&none, &params);
    assert_eq!(scorer.raw_value(&history(20, 0.5, None, 2)), 0.0);
    assert!((scorer.raw_value(&history(20, 0.5, None, 3)) - 0.02).abs() < 1e-12);
    assert!((scorer.raw_value(&history(20, 0.5, None, 4)) - 0.03).abs() < 1e-12);
    assert!((scorer.raw_value(&history(20, 0.5, None, 12)) - 0.05).abs() < 1e-12);
    // recent games cannot exceed shared games
    assert_eq!(scorer.raw_value(&history(2, 0.5, None, 9)), 0.0);
}

#[test]
fn test_zero_shared_games_is_neutral() {
    let params = SynergyParams::default();
    let table = SharedHistoryTable::new();
    let scorer = PairSynergyScorer::new(&table, &params);
    let s = scorer.score("a", Role::Jungle, "b", Role::Mid);
    assert_eq!(s.value, 0.0);
    assert_eq!(s.source, SynergySourceKind::NoSharedGames);
    assert_eq!(
        scorer.audit("b", "a"),
        Some(DataQualityWarning::MissingPairHistory {
            player_a: "a".to_string(),
            player_b: "b".to_string(),
        })
    );
}

#[test]
fn test_no_capability_uses_role_table() {
    let params = SynergyParams::default();
    let none = NoHistory;
    let scorer = PairSynergyScorer::new(&none, &params);
    let jm = scorer.score("a", Role::Jungle, "b", Role::Mid);
    assert_eq!(jm.value, neutral_compatibility(RolePair::new(Role::Jungle, Role::Mid)));
    assert_eq!(jm.source, SynergySourceKind::NeutralTable);
    let lane = scorer.score("a", Role::Bot, "b", Role::Support);
    assert_eq!(lane.value, 0.0);
    assert_eq!(scorer.audit("a", "b"), Some(DataQualityWarning::NeutralSynergyTable));
}

#[test]
fn test_role_history_blends_toward_role_value() {
    let params = SynergyParams::default();
    let mut table = table_with("a", "b", history(15, 0.5, None, 0));
    table.insert_role_pair("a", Role::Bot, "b", Role::Support, history(10, 1.0, None, 0));
    table.insert_role_pair("a", Role::Top, "b", Role::Mid, history(5, 1.0, None, 0));
    let scorer = PairSynergyScorer::new(&table, &params);

    let full = scorer.score("a", Role::Bot, "b", Role::Support);
    assert!((full.value - 0.2).abs() < 1e-12);

    let half = scorer.score("a", Role::Top, "b", Role::Mid);
    assert!((half.value - 0.1).abs() < 1e-12);

    let other = scorer.score("a", Role::Jungle, "b", Role::Mid);
    assert_eq!(other.value, 0.0);
    assert_eq!(other.source, SynergySourceKind::History);
}

#[test]
fn test_value_clamped_to_range() {
    let params = SynergyParams {
        win_rate_scale: 2.0,
        ..SynergyParams::default()
    };
    let table = table_with("a", "b", history(30, 1.0, Some(4.0), 8));
    let scorer = PairSynergyScorer::new(&table, &params);
    let s = scorer.score("a", Role::Top, "b", Role::Jungle);
    assert_eq!(s.value, SYNERGY_MAX);
}
