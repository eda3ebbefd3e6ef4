use std::collections::BTreeSet;

use crate::model::assignment::PlayerBreakdown;
use crate::model::player::{MAX_PREFERENCE, PlayerCandidate};
use crate::model::roles::{ROLE_COUNT, ROLE_ORDER, Role};
use crate::model::scores::guard;
use crate::model::weights::EngineConfig;
use crate::pipeline::stage1_role_scores::RoleScoreTable;

/// Cost placed on excluded (player, role) cells. Any real cell lies in [-1, 0].
pub const FORBIDDEN_COST: f64 = 1.0e6;

/// Excluded pairings, keyed by candidate index and role.
pub type ForbiddenSet = BTreeSet<(usize, Role)>;

/// Players x roles cost matrix. Row `i` is `players[i]` (a candidate index).
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    pub players: Vec<usize>,
    pub cells: Vec<[f64; ROLE_COUNT]>,
}

impl CostMatrix {
    pub fn from_cells(cells: Vec<[f64; ROLE_COUNT]>) -> Self {
        let players = (0..cells.len()).collect();
        Self { players, cells }
    }

    pub fn n_players(&self) -> usize {
        self.cells.len()
    }

    pub fn cell(&self, row: usize, role: Role) -> f64 {
        self.cells[row][role.index()]
    }

    pub fn is_forbidden(&self, row: usize, role: Role) -> bool {
        self.cell(row, role) >= FORBIDDEN_COST
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CostMatrixBuilder<'a> {
    config: &'a EngineConfig,
}

impl<'a> CostMatrixBuilder<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Individual score decomposition for a candidate in a role.
    pub fn breakdown(
        &self,
        player: &PlayerCandidate,
        table: &RoleScoreTable,
        index: usize,
        role: Role,
    ) -> PlayerBreakdown {
        let w = &self.config.weights;
        let score = table.get(index, role);
        let (suitability, _) = guard(score.value, 0.0, 1.0);
        let preference = player.preference(role);
        let performance_component = suitability * w.performance;
        let preference_component = normalized_preference(preference) * w.preference;
        PlayerBreakdown {
            role,
            player_id: player.id.clone(),
            suitability,
            confidence: score.confidence,
            preference,
            preference_stated: player.has_stated_preference(role),
            performance_component,
            preference_component,
            individual_score: performance_component + preference_component,
        }
    }

    /// Negated individual scores so the solver can minimize.
    pub fn build(
        &self,
        roster: &[usize],
        players: &[PlayerCandidate],
        table: &RoleScoreTable,
        forbidden: &ForbiddenSet,
    ) -> CostMatrix {
        let mut cells = Vec::with_capacity(roster.len());
        for &idx in roster {
            let row = ROLE_ORDER.map(|role| {
                if forbidden.contains(&(idx, role)) {
                    FORBIDDEN_COST
                } else {
                    -self
                        .breakdown(&players[idx], table, idx, role)
                        .individual_score
                }
            });
            cells.push(row);
        }
        CostMatrix {
            players: roster.to_vec(),
            cells,
        }
    }
}

pub fn normalized_preference(preference: u8) -> f64 {
    preference as f64 / MAX_PREFERENCE as f64
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_cost_matrix.rs"]
mod tests;
