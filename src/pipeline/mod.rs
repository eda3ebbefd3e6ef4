pub mod roster;
pub mod stage1_role_scores;
pub mod stage2_pair_synergy;
pub mod stage3_cost_matrix;
pub mod stage4_assign;
pub mod stage5_augment;
pub mod stage6_alternatives;
pub mod stage7_explain;
pub mod stage8_report;

use std::collections::BTreeSet;

use crate::error::{EngineError, EngineResult};
use crate::model::assignment::{Assignment, OptimizationResult};
use crate::model::flags::{DataQualityWarning, Diagnostics};
use crate::model::player::{MAX_PREFERENCE, MIN_PREFERENCE, PlayerCandidate};
use crate::model::roles::{ROLE_COUNT, ROLE_ORDER};
use crate::model::weights::EngineConfig;
use roster::TeamSolver;
use stage1_role_scores::run_stage1;
use stage2_pair_synergy::{PairSynergyScorer, SynergySource};
use stage3_cost_matrix::{CostMatrixBuilder, ForbiddenSet};
use stage6_alternatives::find_alternatives;
use stage7_explain::explain;

/// Best composition plus ranked alternatives for a candidate pool.
///
/// Pure over its inputs: the same players, source answers and configuration
/// always give the same result.
pub fn optimize(
    players: &[PlayerCandidate],
    source: &dyn SynergySource,
    config: &EngineConfig,
) -> EngineResult<OptimizationResult> {
    config.validate()?;
    let mut diagnostics = Diagnostics::new();

    let pool = usable_candidates(players, &mut diagnostics);
    if pool.len() < ROLE_COUNT {
        return Err(EngineError::insufficient(players.len(), pool.len()));
    }
    tracing::info!(
        "optimizing over {} candidates ({} supplied)",
        pool.len(),
        players.len()
    );

    let table = run_stage1(&pool, config, &mut diagnostics);
    let solver = TeamSolver {
        players: &pool,
        table: &table,
        builder: CostMatrixBuilder::new(config),
        synergy: PairSynergyScorer::new(source, &config.synergy),
        max_exhaustive_pool: config.search.max_exhaustive_pool,
    };
    if !solver.exhaustive() {
        diagnostics.record(DataQualityWarning::LargePoolHeuristic {
            pool_size: pool.len(),
        });
    }

    let best = solver
        .solve(&ForbiddenSet::new())
        .ok_or_else(|| EngineError::insufficient(players.len(), pool.len()))?;
    let alternatives = find_alternatives(&solver, &best, &config.search);
    tracing::info!(
        "best total {:.6}; {} alternative(s)",
        best.total_score,
        alternatives.len()
    );

    for assignment in std::iter::once(&best).chain(&alternatives) {
        audit_pairs(&solver, assignment, &mut diagnostics);
    }
    let warnings = diagnostics.into_vec();

    let explained = |a: Assignment| {
        let text = explain(&a, &warnings);
        a.with_explanation(text)
    };
    let best = explained(best);
    let alternatives = alternatives.into_iter().map(explained).collect();

    Ok(OptimizationResult {
        best,
        alternatives,
        role_scores: table.rows.iter().flatten().cloned().collect(),
        candidates_supplied: players.len(),
        candidates_used: pool.len(),
        warnings,
    })
}

/// Drops blank and repeated ids (first occurrence kept) and orders the pool by
/// id so row order never depends on input order.
fn usable_candidates(players: &[PlayerCandidate], diagnostics: &mut Diagnostics) -> Vec<PlayerCandidate> {
    let mut seen = BTreeSet::new();
    let mut pool = Vec::with_capacity(players.len());
    for player in players {
        let id = player.id.trim();
        if id.is_empty() {
            tracing::warn!("candidate with empty id skipped");
            continue;
        }
        if !seen.insert(id.to_string()) {
            diagnostics.record(DataQualityWarning::DuplicateCandidate {
                player_id: id.to_string(),
            });
            continue;
        }
        for role in ROLE_ORDER {
            if let Some(value) = player.preferences[role.index()] {
                if !(MIN_PREFERENCE..=MAX_PREFERENCE).contains(&value) {
                    diagnostics.record(DataQualityWarning::PreferenceOutOfRange {
                        player_id: id.to_string(),
                        role,
                        value: value as i64,
                    });
                }
            }
        }
        let mut kept = player.clone();
        kept.id = id.to_string();
        pool.push(kept);
    }
    pool.sort_by(|a, b| a.id.cmp(&b.id));
    pool
}

fn audit_pairs(solver: &TeamSolver<'_>, assignment: &Assignment, diagnostics: &mut Diagnostics) {
    let lineup = assignment.lineup();
    for (i, a) in lineup.iter().enumerate() {
        for b in &lineup[i + 1..] {
            if let Some(warning) = solver.synergy.audit(a, b) {
                diagnostics.record(warning);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/optimize.rs"]
mod tests;
