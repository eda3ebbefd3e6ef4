use crate::model::roles::{ROLE_COUNT, ROLE_ORDER};
use crate::pipeline::stage3_cost_matrix::{CostMatrix, FORBIDDEN_COST};

/// Costs closer than this are treated as equal.
pub const TIE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Matrix row assigned to each role, in `ROLE_ORDER`.
    pub player_for_role: [usize; ROLE_COUNT],
    pub total_cost: f64,
}

impl Solution {
    fn from_rows(matrix: &CostMatrix, rows: [usize; ROLE_COUNT]) -> Self {
        Self {
            total_cost: assignment_cost(matrix, &rows),
            player_for_role: rows,
        }
    }

    /// Candidate indices in role order.
    pub fn candidates(&self, matrix: &CostMatrix) -> [usize; ROLE_COUNT] {
        self.player_for_role.map(|row| matrix.players[row])
    }

    pub fn uses_forbidden(&self, matrix: &CostMatrix) -> bool {
        ROLE_ORDER
            .iter()
            .zip(self.player_for_role)
            .any(|(&role, row)| matrix.is_forbidden(row, role))
    }
}

pub fn assignment_cost(matrix: &CostMatrix, rows: &[usize; ROLE_COUNT]) -> f64 {
    ROLE_ORDER
        .iter()
        .zip(rows)
        .map(|(&role, &row)| matrix.cell(row, role))
        .sum()
}

/// Minimum-cost assignment of the five roles to distinct matrix rows.
///
/// Among equal-cost optima the one with the strongest weakest player wins,
/// then the lexicographically smallest candidate sequence in role order.
/// Both refinements re-solve with cells masked out, so they hold for any
/// number of rows. Returns `None` when the matrix has fewer rows than roles.
pub fn solve(matrix: &CostMatrix) -> Option<Solution> {
    let optimum = hungarian(matrix)?;
    let target = assignment_cost(matrix, &optimum);
    let mut tie = TieBreak {
        matrix,
        target,
        allowed: vec![[true; ROLE_COUNT]; matrix.n_players()],
    };

    let rows = tie.weakest_link(optimum);
    let rows = tie.lexicographic(rows);
    Some(Solution::from_rows(matrix, rows))
}

/// Co-optimal refinement over a mask of still-allowed cells.
struct TieBreak<'a> {
    matrix: &'a CostMatrix,
    target: f64,
    allowed: Vec<[bool; ROLE_COUNT]>,
}

impl TieBreak<'_> {
    /// Optimal rows under `allowed`, if they still reach the target cost.
    fn optimal_under(&self, allowed: &[[bool; ROLE_COUNT]]) -> Option<[usize; ROLE_COUNT]> {
        let masked = CostMatrix {
            players: self.matrix.players.clone(),
            cells: self
                .matrix
                .cells
                .iter()
                .zip(allowed)
                .map(|(row, keep)| {
                    let mut out = *row;
                    for (cell, &k) in out.iter_mut().zip(keep) {
                        if !k {
                            *cell = FORBIDDEN_COST;
                        }
                    }
                    out
                })
                .collect(),
        };
        let rows = hungarian(&masked)?;
        (assignment_cost(&masked, &rows) <= self.target + TIE_EPSILON).then_some(rows)
    }

    fn worst_cell(&self, rows: &[usize; ROLE_COUNT]) -> f64 {
        ROLE_ORDER
            .iter()
            .zip(rows)
            .map(|(&role, &row)| self.matrix.cell(row, role))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Smallest worst cell reachable at the target cost. Cells above the
    /// chosen threshold stay masked for the lexicographic pass.
    fn weakest_link(&mut self, optimum: [usize; ROLE_COUNT]) -> [usize; ROLE_COUNT] {
        let ceiling = self.worst_cell(&optimum);
        let mut levels: Vec<f64> = self
            .matrix
            .cells
            .iter()
            .flatten()
            .copied()
            .filter(|&c| c <= ceiling)
            .collect();
        levels.sort_by(f64::total_cmp);
        levels.dedup();

        // levels[hi] is always feasible: it is the optimum's own worst cell.
        let mut best = optimum;
        let (mut lo, mut hi) = (0usize, levels.len().saturating_sub(1));
        while lo < hi {
            let mid = (lo + hi) / 2;
            match self.optimal_under(&self.capped(levels[mid])) {
                Some(rows) => {
                    best = rows;
                    hi = mid;
                }
                None => lo = mid + 1,
            }
        }
        if let Some(&level) = levels.get(hi) {
            self.allowed = self.capped(level);
            if let Some(rows) = self.optimal_under(&self.allowed) {
                best = rows;
            }
        }
        best
    }

    fn capped(&self, level: f64) -> Vec<[bool; ROLE_COUNT]> {
        self.matrix
            .cells
            .iter()
            .zip(&self.allowed)
            .map(|(row, keep)| {
                let mut out = *keep;
                for (k, &cell) in out.iter_mut().zip(row) {
                    *k = *k && cell <= level;
                }
                out
            })
            .collect()
    }

    /// Fixes roles front to back to the smallest candidate that keeps a
    /// co-optimal completion.
    fn lexicographic(&mut self, mut current: [usize; ROLE_COUNT]) -> [usize; ROLE_COUNT] {
        let mut order: Vec<usize> = (0..self.matrix.n_players()).collect();
        order.sort_by_key(|&row| self.matrix.players[row]);

        for role in 0..ROLE_COUNT {
            let incumbent = self.matrix.players[current[role]];
            for &row in &order {
                if self.matrix.players[row] >= incumbent {
                    break;
                }
                if !self.allowed[row][role] {
                    continue;
                }
                let trial = self.pinned(role, row);
                if let Some(rows) = self.optimal_under(&trial) {
                    current = rows;
                    break;
                }
            }
            self.allowed = self.pinned(role, current[role]);
        }
        current
    }

    fn pinned(&self, role: usize, row: usize) -> Vec<[bool; ROLE_COUNT]> {
        let mut out = self.allowed.clone();
        for (r, keep) in out.iter_mut().enumerate() {
            for (c, k) in keep.iter_mut().enumerate() {
                if (r == row) != (c == role) {
                    *k = false;
                }
            }
        }
        out
    }
}

/// Shortest augmenting path Hungarian algorithm with potentials, O(n^2 m)
/// for n roles and m >= n players.
fn hungarian(matrix: &CostMatrix) -> Option<[usize; ROLE_COUNT]> {
    let n = ROLE_COUNT;
    let m = matrix.n_players();
    if m < n {
        return None;
    }

    // 1-based, column 0 is the virtual start.
    let cost = |role: usize, player: usize| matrix.cell(player - 1, ROLE_ORDER[role - 1]);
    let mut u = vec![0.0f64; n + 1];
    let mut v = vec![0.0f64; m + 1];
    let mut p = vec![0usize; m + 1];
    let mut way = vec![0usize; m + 1];

    for i in 1..=n {
        p[0] = i;
        let mut j0 = 0usize;
        let mut minv = vec![f64::INFINITY; m + 1];
        let mut used = vec![false; m + 1];
        loop {
            used[j0] = true;
            let i0 = p[j0];
            let mut delta = f64::INFINITY;
            let mut j1 = 0usize;
            for j in 1..=m {
                if used[j] {
                    continue;
                }
                let cur = cost(i0, j) - u[i0] - v[j];
                if cur < minv[j] {
                    minv[j] = cur;
                    way[j] = j0;
                }
                if minv[j] < delta {
                    delta = minv[j];
                    j1 = j;
                }
            }
            if j1 == 0 {
                return None;
            }
            for j in 0..=m {
                if used[j] {
                    u[p[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }
            j0 = j1;
            if p[j0] == 0 {
                break;
            }
        }
        loop {
            let j1 = way[j0];
            p[j0] = p[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut rows = [usize::MAX; ROLE_COUNT];
    for j in 1..=m {
        if p[j] != 0 {
            rows[p[j] - 1] = j - 1;
        }
    }
    if rows.contains(&usize::MAX) {
        return None;
    }
    Some(rows)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_assign.rs"]
mod tests;
