use serde::Serialize;

use crate::model::flags::DataQualityWarning;
use crate::model::roles::{ROLE_COUNT, Role};
use crate::model::scores::{Confidence, PairSynergy, RoleScore};

/// Individual contribution of one assigned player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerBreakdown {
    pub role: Role,
    pub player_id: String,
    pub suitability: f64,
    pub confidence: Confidence,
    pub preference: u8,
    pub preference_stated: bool,
    pub performance_component: f64,
    pub preference_component: f64,
    pub individual_score: f64,
}

/// A finalized role -> player bijection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    /// One entry per role in `ROLE_ORDER`.
    pub players: Vec<PlayerBreakdown>,
    /// The ten unordered pairs, in (role, role) order.
    pub pairs: Vec<PairSynergy>,
    pub base_score: f64,
    pub synergy_score: f64,
    pub total_score: f64,
    pub explanation: String,
}

impl Assignment {
    pub fn player_for(&self, role: Role) -> Option<&str> {
        self.players
            .iter()
            .find(|p| p.role == role)
            .map(|p| p.player_id.as_str())
    }

    /// Player ids in role order.
    pub fn lineup(&self) -> Vec<&str> {
        self.players.iter().map(|p| p.player_id.as_str()).collect()
    }

    pub fn min_individual(&self) -> f64 {
        self.players
            .iter()
            .map(|p| p.individual_score)
            .fold(f64::INFINITY, f64::min)
    }

    pub fn same_lineup(&self, other: &Assignment) -> bool {
        self.players.len() == ROLE_COUNT
            && other.players.len() == ROLE_COUNT
            && self
                .players
                .iter()
                .zip(&other.players)
                .all(|(a, b)| a.role == b.role && a.player_id == b.player_id)
    }

    pub fn with_explanation(self, explanation: String) -> Self {
        Self {
            explanation,
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationResult {
    pub best: Assignment,
    pub alternatives: Vec<Assignment>,
    pub warnings: Vec<DataQualityWarning>,
    /// Suitability of every used candidate, candidate-major in role order.
    pub role_scores: Vec<RoleScore>,
    pub candidates_supplied: usize,
    pub candidates_used: usize,
}
