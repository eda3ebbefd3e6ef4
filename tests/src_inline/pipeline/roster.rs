use super::*;
use crate::fixtures::{average_pool, player_with_win_rate};
use crate::model::assignment::PlayerBreakdown;
use crate::model::flags::Diagnostics;
use crate::model::roles::{ROLE_ORDER, Role};
use crate::model::scores::Confidence;
use crate::model::weights::EngineConfig;
use crate::pipeline::stage1_role_scores::run_stage1;
use crate::pipeline::stage2_pair_synergy::NoHistory;

fn breakdown(role: Role, id: &str, score: f64) -> PlayerBreakdown {
    PlayerBreakdown {
        role,
        player_id: id.to_string(),
        suitability: 0.5,
        confidence: Confidence::High,
        preference: 3,
        preference_stated: false,
        performance_component: score,
        preference_component: 0.0,
        individual_score: score,
    }
}

fn assignment(ids: [&str; 5], scores: [f64; 5]) -> Assignment {
    let players: Vec<PlayerBreakdown> = ROLE_ORDER
        .iter()
        .zip(ids)
        .zip(scores)
        .map(|((&role, id), score)| breakdown(role, id, score))
        .collect();
    let base_score = scores.iter().sum();
    Assignment {
        players,
        pairs: Vec::new(),
        base_score,
        synergy_score: 0.0,
        total_score: base_score,
        explanation: String::new(),
    }
}

#[test]
fn test_for_each_roster_counts() {
    let mut seen = Vec::new();
    for_each_roster(7, &mut |roster: &[usize]| seen.push(roster.to_vec()));
    assert_eq!(seen.len(), 21);
    assert_eq!(seen[0], vec![0, 1, 2, 3, 4]);
    assert_eq!(seen[20], vec![2, 3, 4, 5, 6]);
    let mut sorted = seen.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted, seen);

    let mut count = 0;
    for_each_roster(5, &mut |_: &[usize]| count += 1);
    assert_eq!(count, 1);
    for_each_roster(4, &mut |_: &[usize]| count += 1);
    assert_eq!(count, 1);
}

#[test]
fn test_compare_assignments_ordering() {
    let high = assignment(["a", "b", "c", "d", "e"], [0.5, 0.5, 0.5, 0.5, 0.6]);
    let low = assignment(["a", "b", "c", "d", "e"], [0.5; 5]);
    assert_eq!(compare_assignments(&high, &low), Ordering::Less);
    assert_eq!(compare_assignments(&low, &high), Ordering::Greater);

    // equal totals: stronger weakest player first
    let even = assignment(["a", "b", "c", "d", "e"], [0.5; 5]);
    let uneven = assignment(["a", "b", "c", "d", "f"], [0.3, 0.7, 0.5, 0.5, 0.5]);
    assert_eq!(compare_assignments(&even, &uneven), Ordering::Less);

    // then lexicographic ids in role order
    let first = assignment(["a", "b", "c", "d", "e"], [0.5; 5]);
    let second = assignment(["b", "a", "c", "d", "e"], [0.5; 5]);
    assert_eq!(compare_assignments(&first, &second), Ordering::Less);
    assert_eq!(compare_assignments(&first, &first.clone()), Ordering::Equal);
}

#[test]
fn test_exhaustive_roster_picks_strongest_five() {
    let config = EngineConfig::default_v1();
    let mut players = average_pool(&["a", "b", "c", "d", "e"]);
    players.push(player_with_win_rate("f", 0.70));
    let table = run_stage1(&players, &config, &mut Diagnostics::new());
    let solver = TeamSolver {
        players: &players,
        table: &table,
        builder: CostMatrixBuilder::new(&config),
        synergy: PairSynergyScorer::new(&NoHistory, &config.synergy),
        max_exhaustive_pool: config.search.max_exhaustive_pool,
    };
    assert!(solver.exhaustive());
    assert_eq!(solver.index_of("f"), Some(5));
    assert_eq!(solver.index_of("zed"), None);

    let best = solver.solve(&ForbiddenSet::new()).unwrap();
    assert!(best.lineup().contains(&"f"));
    assert!(!best.lineup().contains(&"e"));
    assert_eq!(best.players.len(), 5);
}

#[test]
fn test_fully_forbidden_is_infeasible() {
    let config = EngineConfig::default_v1();
    let players = average_pool(&["a", "b", "c", "d", "e"]);
    let table = run_stage1(&players, &config, &mut Diagnostics::new());
    let solver = TeamSolver {
        players: &players,
        table: &table,
        builder: CostMatrixBuilder::new(&config),
        synergy: PairSynergyScorer::new(&NoHistory, &config.synergy),
        max_exhaustive_pool: config.search.max_exhaustive_pool,
    };
    let mut forbidden = ForbiddenSet::new();
    for idx in 0..5 {
        forbidden.insert((idx, Role::Mid));
    }
    assert!(solver.solve(&forbidden).is_none());
}
