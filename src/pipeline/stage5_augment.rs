use crate::model::assignment::{Assignment, PlayerBreakdown};
use crate::model::player::PlayerCandidate;
use crate::model::roles::ROLE_ORDER;
use crate::pipeline::stage1_role_scores::RoleScoreTable;
use crate::pipeline::stage2_pair_synergy::PairSynergyScorer;
use crate::pipeline::stage3_cost_matrix::{CostMatrix, CostMatrixBuilder};
use crate::pipeline::stage4_assign::Solution;

/// Per-role breakdowns for a solved matrix, in role order.
pub fn lineup_from_solution(
    solution: &Solution,
    matrix: &CostMatrix,
    players: &[PlayerCandidate],
    table: &RoleScoreTable,
    builder: &CostMatrixBuilder<'_>,
) -> Vec<PlayerBreakdown> {
    ROLE_ORDER
        .iter()
        .zip(solution.candidates(matrix))
        .map(|(&role, idx)| builder.breakdown(&players[idx], table, idx, role))
        .collect()
}

/// Adds the ten pairwise synergies to the base lineup and finalizes scores.
pub fn augment(lineup: Vec<PlayerBreakdown>, scorer: &PairSynergyScorer<'_>) -> Assignment {
    let mut pairs = Vec::with_capacity(lineup.len() * lineup.len().saturating_sub(1) / 2);
    for (i, a) in lineup.iter().enumerate() {
        for b in &lineup[i + 1..] {
            pairs.push(scorer.score(&a.player_id, a.role, &b.player_id, b.role));
        }
    }

    let base_score: f64 = lineup.iter().map(|p| p.individual_score).sum();
    let synergy_score: f64 = pairs.iter().map(|p| p.value).sum();

    Assignment {
        players: lineup,
        pairs,
        base_score,
        synergy_score,
        total_score: base_score + synergy_score,
        explanation: String::new(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_augment.rs"]
mod tests;
