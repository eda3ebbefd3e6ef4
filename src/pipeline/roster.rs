use std::cmp::Ordering;

use crate::model::assignment::Assignment;
use crate::model::player::PlayerCandidate;
use crate::model::roles::ROLE_COUNT;
use crate::pipeline::stage1_role_scores::RoleScoreTable;
use crate::pipeline::stage2_pair_synergy::PairSynergyScorer;
use crate::pipeline::stage3_cost_matrix::{CostMatrixBuilder, ForbiddenSet};
use crate::pipeline::stage4_assign::{TIE_EPSILON, solve};
use crate::pipeline::stage5_augment::{augment, lineup_from_solution};

/// Solves one full composition (roster and roles) under a forbidden set.
pub struct TeamSolver<'a> {
    pub players: &'a [PlayerCandidate],
    pub table: &'a RoleScoreTable,
    pub builder: CostMatrixBuilder<'a>,
    pub synergy: PairSynergyScorer<'a>,
    pub max_exhaustive_pool: usize,
}

impl<'a> TeamSolver<'a> {
    pub fn exhaustive(&self) -> bool {
        self.players.len() <= self.max_exhaustive_pool.max(ROLE_COUNT)
    }

    pub fn index_of(&self, player_id: &str) -> Option<usize> {
        self.players.iter().position(|p| p.id == player_id)
    }

    /// Best feasible composition, `None` if every option hits a forbidden cell.
    pub fn solve(&self, forbidden: &ForbiddenSet) -> Option<Assignment> {
        if self.exhaustive() {
            let mut best: Option<Assignment> = None;
            for_each_roster(self.players.len(), &mut |roster: &[usize]| {
                if let Some(candidate) = self.solve_roster(roster, forbidden) {
                    let replace = best
                        .as_ref()
                        .is_none_or(|b| compare_assignments(&candidate, b) == Ordering::Less);
                    if replace {
                        best = Some(candidate);
                    }
                }
            });
            best
        } else {
            let all: Vec<usize> = (0..self.players.len()).collect();
            self.solve_roster(&all, forbidden)
        }
    }

    fn solve_roster(&self, roster: &[usize], forbidden: &ForbiddenSet) -> Option<Assignment> {
        let matrix = self
            .builder
            .build(roster, self.players, self.table, forbidden);
        let solution = solve(&matrix)?;
        if solution.uses_forbidden(&matrix) {
            return None;
        }
        let lineup = lineup_from_solution(&solution, &matrix, self.players, self.table, &self.builder);
        Some(augment(lineup, &self.synergy))
    }
}

/// `Less` when `a` ranks ahead of `b`: higher total, then stronger weakest
/// player, then lexicographic player ids in role order.
pub fn compare_assignments(a: &Assignment, b: &Assignment) -> Ordering {
    let by_total = if (a.total_score - b.total_score).abs() <= TIE_EPSILON {
        Ordering::Equal
    } else {
        b.total_score.total_cmp(&a.total_score)
    };
    by_total
        .then_with(|| b.min_individual().total_cmp(&a.min_individual()))
        .then_with(|| a.lineup().cmp(&b.lineup()))
}

/// Visits every 5-element subset of `0..n` in lexicographic order.
pub fn for_each_roster(n: usize, visit: &mut dyn FnMut(&[usize])) {
    if n < ROLE_COUNT {
        return;
    }
    let mut idx: [usize; ROLE_COUNT] = [0, 1, 2, 3, 4];
    loop {
        visit(&idx);
        let Some(i) = (0..ROLE_COUNT)
            .rev()
            .find(|&i| idx[i] < n - ROLE_COUNT + i)
        else {
            return;
        };
        idx[i] += 1;
        for j in i + 1..ROLE_COUNT {
            idx[j] = idx[j - 1] + 1;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/roster.rs"]
mod tests;
