use crate::model::flags::{DataQualityWarning, Diagnostics};
use crate::model::player::PlayerCandidate;
use crate::model::roles::{ROLE_COUNT, ROLE_ORDER, Role};
use crate::model::scores::{Confidence, RoleScore, clip01};
use crate::model::weights::EngineConfig;

/// Suitability used when a role has no games at all.
pub const MIDPOINT_SUITABILITY: f64 = 0.5;

#[derive(Debug, Clone, Copy)]
pub struct RoleSuitabilityScorer<'a> {
    config: &'a EngineConfig,
}

impl<'a> RoleSuitabilityScorer<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, player: &PlayerCandidate, role: Role) -> RoleScore {
        let perf = player.performance(role);
        let samples = perf.games;

        let Some(raw) = self.raw_score(player, role) else {
            return RoleScore {
                player_id: player.id.clone(),
                role,
                value: MIDPOINT_SUITABILITY,
                samples,
                confidence: Confidence::NoData,
            };
        };

        let factor = self.confidence_factor(samples);
        let confidence = if samples >= self.config.min_role_samples {
            Confidence::High
        } else {
            Confidence::Low
        };

        RoleScore {
            player_id: player.id.clone(),
            role,
            value: clip01(raw * factor),
            samples,
            confidence,
        }
    }

    /// Linear penalty below the sample threshold.
    pub fn confidence_factor(&self, samples: u32) -> f64 {
        let min = self.config.min_role_samples.max(1) as f64;
        (samples as f64 / min).min(1.0)
    }

    /// Weighted metric blend before confidence scaling, `None` without data.
    /// Unknown metrics drop out and the remaining weights are renormalized.
    /// Role games are the sample size: champion competency alone, with no
    /// games logged in the role, counts as no role data.
    pub fn raw_score(&self, player: &PlayerCandidate, role: Role) -> Option<f64> {
        let perf = player.performance(role);
        if perf.games == 0 {
            return None;
        }
        let weights = self.config.role_weights.for_role(role);
        let caps = &self.config.caps;

        let competency = player.competency(role).map(|c| {
            let full = self.config.competency_full_games.max(1) as f64;
            clip01(c.proficiency) * (c.games as f64 / full).min(1.0)
        });

        let components = [
            (weights.win_rate, perf.win_rate.map(clip01)),
            (weights.kda, perf.kda.map(|v| capped(v, caps.kda))),
            (weights.farm, perf.cs_per_min.map(|v| capped(v, caps.cs_per_min))),
            (
                weights.vision,
                perf.vision_per_min.map(|v| capped(v, caps.vision_per_min)),
            ),
            (weights.competency, competency),
        ];

        let mut weighted = 0.0;
        let mut known_weight = 0.0;
        for (weight, value) in components {
            if let Some(v) = value {
                weighted += weight * v;
                known_weight += weight;
            }
        }
        if known_weight <= 0.0 {
            return None;
        }

        let form = perf
            .form_trend
            .filter(|t| t.is_finite())
            .map(|t| t.clamp(-1.0, 1.0) * self.config.form_weight)
            .unwrap_or(0.0);

        Some(clip01(weighted / known_weight + form))
    }

    /// Data-quality findings for one (player, role) cell.
    pub fn audit(&self, player: &PlayerCandidate, role: Role) -> Vec<DataQualityWarning> {
        let mut out = Vec::new();
        let perf = player.performance(role);
        if self.raw_score(player, role).is_none() {
            out.push(DataQualityWarning::NoRoleData {
                player_id: player.id.clone(),
                role,
            });
        } else if perf.games < self.config.min_role_samples {
            out.push(DataQualityWarning::LowRoleSamples {
                player_id: player.id.clone(),
                role,
                samples: perf.games,
            });
        }
        if let Some(wr) = perf.win_rate {
            if !(0.0..=1.0).contains(&wr) {
                out.push(DataQualityWarning::ValueClamped {
                    context: format!("{} {} win rate {}", player.id, role, wr),
                });
            }
        }
        for (name, value) in [
            ("kda", perf.kda),
            ("cs_per_min", perf.cs_per_min),
            ("vision_per_min", perf.vision_per_min),
        ] {
            if let Some(v) = value {
                if v.is_nan() || v < 0.0 {
                    out.push(DataQualityWarning::ValueClamped {
                        context: format!("{} {} {} {}", player.id, role, name, v),
                    });
                }
            }
        }
        out
    }
}

fn capped(value: f64, cap: f64) -> f64 {
    clip01(value / cap)
}

/// Suitability for every candidate and role; rows follow the candidate slice.
#[derive(Debug, Clone)]
pub struct RoleScoreTable {
    pub rows: Vec<[RoleScore; ROLE_COUNT]>,
}

impl RoleScoreTable {
    pub fn get(&self, player: usize, role: Role) -> &RoleScore {
        &self.rows[player][role.index()]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn run_stage1(
    players: &[PlayerCandidate],
    config: &EngineConfig,
    diagnostics: &mut Diagnostics,
) -> RoleScoreTable {
    let scorer = RoleSuitabilityScorer::new(config);
    let mut rows = Vec::with_capacity(players.len());
    for player in players {
        for role in ROLE_ORDER {
            for warning in scorer.audit(player, role) {
                diagnostics.record(warning);
            }
        }
        rows.push(ROLE_ORDER.map(|role| scorer.score(player, role)));
    }
    RoleScoreTable { rows }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_role_scores.rs"]
mod tests;
