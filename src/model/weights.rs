use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::model::roles::{ROLE_ORDER, Role};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Split of the overall score budget. Synergy is applied after matching, its
/// share is the room left for the (already small) pair deltas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub performance: f64,
    pub preference: f64,
    pub synergy: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            performance: 0.60,
            preference: 0.25,
            synergy: 0.15,
        }
    }
}

/// Metric weights inside one role. Farm and vision together form the
/// role-appropriate metric component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricWeights {
    pub win_rate: f64,
    pub kda: f64,
    pub farm: f64,
    pub vision: f64,
    pub competency: f64,
}

impl MetricWeights {
    pub const fn new(win_rate: f64, kda: f64, farm: f64, vision: f64, competency: f64) -> Self {
        Self {
            win_rate,
            kda,
            farm,
            vision,
            competency,
        }
    }

    pub fn sum(&self) -> f64 {
        self.win_rate + self.kda + self.farm + self.vision + self.competency
    }

    fn values(&self) -> [f64; 5] {
        [
            self.win_rate,
            self.kda,
            self.farm,
            self.vision,
            self.competency,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleWeightTable {
    pub top: MetricWeights,
    pub jungle: MetricWeights,
    pub mid: MetricWeights,
    pub bot: MetricWeights,
    pub support: MetricWeights,
}

impl Default for RoleWeightTable {
    fn default() -> Self {
        Self {
            top: MetricWeights::new(0.35, 0.25, 0.20, 0.05, 0.15),
            jungle: MetricWeights::new(0.35, 0.25, 0.10, 0.15, 0.15),
            mid: MetricWeights::new(0.30, 0.30, 0.20, 0.05, 0.15),
            bot: MetricWeights::new(0.30, 0.25, 0.30, 0.00, 0.15),
            support: MetricWeights::new(0.35, 0.15, 0.00, 0.35, 0.15),
        }
    }
}

impl RoleWeightTable {
    pub fn for_role(&self, role: Role) -> &MetricWeights {
        match role {
            Role::Top => &self.top,
            Role::Jungle => &self.jungle,
            Role::Mid => &self.mid,
            Role::Bot => &self.bot,
            Role::Support => &self.support,
        }
    }
}

/// Metric values at or above the cap earn full credit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricCaps {
    pub kda: f64,
    pub cs_per_min: f64,
    pub vision_per_min: f64,
}

impl Default for MetricCaps {
    fn default() -> Self {
        Self {
            kda: 3.0,
            cs_per_min: 8.0,
            vision_per_min: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynergyParams {
    pub win_rate_scale: f64,
    pub kda_neutral: f64,
    pub kda_margin: f64,
    pub kda_adjustment: f64,
    pub recent_games_min: u32,
    pub recency_bonus_min: f64,
    pub recency_bonus_step: f64,
    pub recency_bonus_max: f64,
    pub confidence_games: u32,
    pub role_confidence_games: u32,
}

impl Default for SynergyParams {
    fn default() -> Self {
        Self {
            win_rate_scale: 0.4,
            kda_neutral: 2.0,
            kda_margin: 0.5,
            kda_adjustment: 0.05,
            recent_games_min: 3,
            recency_bonus_min: 0.02,
            recency_bonus_step: 0.01,
            recency_bonus_max: 0.05,
            confidence_games: 15,
            role_confidence_games: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub max_alternatives: usize,
    /// Alternatives trailing the best by more than this end the search.
    pub min_score_diff: f64,
    /// Largest pool for which every 5-player roster is tried.
    pub max_exhaustive_pool: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_alternatives: 5,
            min_score_diff: 0.1,
            max_exhaustive_pool: 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub weights: ScoreWeights,
    pub role_weights: RoleWeightTable,
    pub caps: MetricCaps,
    pub min_role_samples: u32,
    pub competency_full_games: u32,
    pub form_weight: f64,
    pub synergy: SynergyParams,
    pub search: SearchParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::default_v1()
    }
}

impl EngineConfig {
    pub fn default_v1() -> Self {
        Self {
            weights: ScoreWeights::default(),
            role_weights: RoleWeightTable::default(),
            caps: MetricCaps::default(),
            min_role_samples: 10,
            competency_full_games: 10,
            form_weight: 0.05,
            synergy: SynergyParams::default(),
            search: SearchParams::default(),
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let w = &self.weights;
        for (name, v) in [
            ("performance", w.performance),
            ("preference", w.preference),
            ("synergy", w.synergy),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(EngineError::InvalidConfig(format!(
                    "weight {name} must be finite and non-negative, got {v}"
                )));
            }
        }
        let total = w.performance + w.preference + w.synergy;
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(EngineError::InvalidConfig(format!(
                "performance + preference + synergy weights must sum to 1, got {total}"
            )));
        }

        for role in ROLE_ORDER {
            let mw = self.role_weights.for_role(role);
            if mw.values().iter().any(|v| !v.is_finite() || *v < 0.0) {
                return Err(EngineError::InvalidConfig(format!(
                    "{role} metric weights must be finite and non-negative"
                )));
            }
            if (mw.sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
                return Err(EngineError::InvalidConfig(format!(
                    "{role} metric weights must sum to 1, got {}",
                    mw.sum()
                )));
            }
        }

        let caps = &self.caps;
        for (name, v) in [
            ("kda", caps.kda),
            ("cs_per_min", caps.cs_per_min),
            ("vision_per_min", caps.vision_per_min),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(EngineError::InvalidConfig(format!(
                    "cap {name} must be positive, got {v}"
                )));
            }
        }

        if self.min_role_samples == 0 {
            return Err(EngineError::InvalidConfig(
                "min_role_samples must be at least 1".to_string(),
            ));
        }
        if self.synergy.confidence_games == 0 || self.synergy.role_confidence_games == 0 {
            return Err(EngineError::InvalidConfig(
                "synergy confidence game counts must be at least 1".to_string(),
            ));
        }
        if !self.search.min_score_diff.is_finite() || self.search.min_score_diff < 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "min_score_diff must be non-negative, got {}",
                self.search.min_score_diff
            )));
        }
        Ok(())
    }
}
