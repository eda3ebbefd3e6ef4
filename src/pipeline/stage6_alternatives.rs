use crate::model::assignment::Assignment;
use crate::model::weights::SearchParams;
use crate::pipeline::roster::{TeamSolver, compare_assignments};
use crate::pipeline::stage3_cost_matrix::ForbiddenSet;
use crate::pipeline::stage4_assign::TIE_EPSILON;

/// Ranked alternatives to `best`.
///
/// Each (player, role) pairing of the best, and of every alternative once it
/// is accepted, spawns one branch that re-solves with only that pairing
/// forbidden. Branch results are pooled without duplicates and accepted in
/// rank order until `max_alternatives` are found, the pool is empty, or the
/// next candidate trails the best by more than `min_score_diff`.
pub fn find_alternatives(
    solver: &TeamSolver<'_>,
    best: &Assignment,
    params: &SearchParams,
) -> Vec<Assignment> {
    let mut accepted: Vec<Assignment> = Vec::new();
    let mut pool: Vec<Assignment> = Vec::new();
    let mut solves = 0usize;
    branch(solver, best, best, &accepted, &mut pool, &mut solves);

    while accepted.len() < params.max_alternatives {
        pool.sort_by(compare_assignments);
        if pool.is_empty() {
            tracing::debug!("alternative search exhausted after {solves} solves");
            break;
        }
        let candidate = pool.remove(0);

        let gap = best.total_score - candidate.total_score;
        if gap > params.min_score_diff + TIE_EPSILON {
            tracing::debug!(
                "next alternative trails best by {gap:.6} (> {:.6}); stopping",
                params.min_score_diff
            );
            break;
        }
        if candidate.total_score > best.total_score + TIE_EPSILON {
            tracing::debug!(
                "alternative {:?} outscores best after synergy; skipped",
                candidate.lineup()
            );
            continue;
        }

        accepted.push(candidate);
        if let Some(last) = accepted.last() {
            branch(solver, best, last, &accepted, &mut pool, &mut solves);
        }
    }

    accepted.sort_by(compare_assignments);
    accepted
}

/// Solves once per pairing of `from` with that single pairing forbidden.
fn branch(
    solver: &TeamSolver<'_>,
    best: &Assignment,
    from: &Assignment,
    accepted: &[Assignment],
    pool: &mut Vec<Assignment>,
    solves: &mut usize,
) {
    for slot in &from.players {
        let Some(idx) = solver.index_of(&slot.player_id) else {
            continue;
        };
        let forbidden = ForbiddenSet::from([(idx, slot.role)]);
        *solves += 1;
        let Some(candidate) = solver.solve(&forbidden) else {
            continue;
        };
        let seen = best.same_lineup(&candidate)
            || accepted.iter().any(|a| a.same_lineup(&candidate))
            || pool.iter().any(|a| a.same_lineup(&candidate));
        if !seen {
            pool.push(candidate);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_alternatives.rs"]
mod tests;
