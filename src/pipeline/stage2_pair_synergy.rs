use crate::model::compat::neutral_compatibility;
use crate::model::flags::DataQualityWarning;
use crate::model::roles::{Role, RolePair};
use crate::model::scores::{PairSynergy, SynergySourceKind, clamp_synergy, clip01};
use crate::model::weights::SynergyParams;

/// Shared-match summary for two players.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PairHistory {
    pub games: u32,
    pub win_rate: f64,
    pub avg_kda: Option<f64>,
    pub recent_games: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HistoryLookup {
    Found(PairHistory),
    /// The source cannot answer for this pair at all.
    NoData,
}

/// Lookup capability for shared history, supplied by the caller.
pub trait SynergySource {
    fn pair_history(&self, a: &str, b: &str) -> HistoryLookup;

    /// History of the two players in exactly these roles, if tracked.
    fn role_pair_history(&self, _a: &str, _role_a: Role, _b: &str, _role_b: Role) -> Option<PairHistory> {
        None
    }
}

/// Source for callers without any shared-history data.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHistory;

impl SynergySource for NoHistory {
    fn pair_history(&self, _a: &str, _b: &str) -> HistoryLookup {
        HistoryLookup::NoData
    }
}

#[derive(Clone, Copy)]
pub struct PairSynergyScorer<'a> {
    source: &'a dyn SynergySource,
    params: &'a SynergyParams,
}

impl<'a> PairSynergyScorer<'a> {
    pub fn new(source: &'a dyn SynergySource, params: &'a SynergyParams) -> Self {
        Self { source, params }
    }

    pub fn score(&self, a: &str, role_a: Role, b: &str, role_b: Role) -> PairSynergy {
        let (a, role_a, b, role_b) = canonical(a, role_a, b, role_b);

        let history = match self.source.pair_history(a, b) {
            HistoryLookup::Found(h) => h,
            HistoryLookup::NoData => {
                return PairSynergy {
                    player_a: a.to_string(),
                    role_a,
                    player_b: b.to_string(),
                    role_b,
                    value: clamp_synergy(neutral_compatibility(RolePair::new(role_a, role_b))),
                    games: 0,
                    confidence: 0.0,
                    source: SynergySourceKind::NeutralTable,
                };
            }
        };

        let general_conf = ratio(history.games, self.params.confidence_games);
        let general = if history.games == 0 {
            0.0
        } else {
            self.raw_value(&history) * general_conf
        };

        let role_history = self
            .source
            .role_pair_history(a, role_a, b, role_b)
            .filter(|h| h.games > 0);

        let (value, confidence, source) = match role_history {
            Some(rh) => {
                let role_conf = ratio(rh.games, self.params.role_confidence_games);
                let role_value = self.raw_value(&rh);
                (
                    general + role_conf * (role_value - general),
                    general_conf.max(role_conf),
                    SynergySourceKind::RoleRefined,
                )
            }
            None if history.games == 0 => (0.0, 0.0, SynergySourceKind::NoSharedGames),
            None => (general, general_conf, SynergySourceKind::History),
        };

        PairSynergy {
            player_a: a.to_string(),
            role_a,
            player_b: b.to_string(),
            role_b,
            value: clamp_synergy(value),
            games: history.games,
            confidence,
            source,
        }
    }

    /// Unscaled synergy: win-rate swing, KDA adjustment and recency bonus.
    pub fn raw_value(&self, history: &PairHistory) -> f64 {
        let p = self.params;
        let base = (clip01(history.win_rate) - 0.5) * p.win_rate_scale;

        let kda_adj = match history.avg_kda.filter(|k| k.is_finite()) {
            Some(kda) if kda >= p.kda_neutral + p.kda_margin => p.kda_adjustment,
            Some(kda) if kda <= p.kda_neutral - p.kda_margin => -p.kda_adjustment,
            _ => 0.0,
        };

        let recent = history.recent_games.min(history.games);
        let recency = if recent >= p.recent_games_min && p.recent_games_min > 0 {
            let extra = (recent - p.recent_games_min) as f64;
            (p.recency_bonus_min + p.recency_bonus_step * extra).min(p.recency_bonus_max)
        } else {
            0.0
        };

        base + kda_adj + recency
    }

    pub fn audit(&self, a: &str, b: &str) -> Option<DataQualityWarning> {
        let (a, _, b, _) = canonical(a, Role::Top, b, Role::Top);
        match self.source.pair_history(a, b) {
            HistoryLookup::NoData => Some(DataQualityWarning::NeutralSynergyTable),
            HistoryLookup::Found(h) if h.games == 0 => Some(DataQualityWarning::MissingPairHistory {
                player_a: a.to_string(),
                player_b: b.to_string(),
            }),
            HistoryLookup::Found(_) => None,
        }
    }
}

fn canonical<'s>(
    a: &'s str,
    role_a: Role,
    b: &'s str,
    role_b: Role,
) -> (&'s str, Role, &'s str, Role) {
    if a <= b {
        (a, role_a, b, role_b)
    } else {
        (b, role_b, a, role_a)
    }
}

fn ratio(games: u32, full: u32) -> f64 {
    (games as f64 / full.max(1) as f64).min(1.0)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_pair_synergy.rs"]
mod tests;
