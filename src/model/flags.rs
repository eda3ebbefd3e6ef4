use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::model::roles::Role;

/// Non-fatal input anomaly. Optimization continues on documented fallbacks.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataQualityWarning {
    DuplicateCandidate {
        player_id: String,
    },
    PreferenceOutOfRange {
        player_id: String,
        role: Role,
        value: i64,
    },
    NoRoleData {
        player_id: String,
        role: Role,
    },
    LowRoleSamples {
        player_id: String,
        role: Role,
        samples: u32,
    },
    MissingPairHistory {
        player_a: String,
        player_b: String,
    },
    NeutralSynergyTable,
    ValueClamped {
        context: String,
    },
    LargePoolHeuristic {
        pool_size: usize,
    },
}

impl fmt::Display for DataQualityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataQualityWarning::DuplicateCandidate { player_id } => {
                write!(f, "duplicate candidate {player_id}; keeping first")
            }
            DataQualityWarning::PreferenceOutOfRange {
                player_id,
                role,
                value,
            } => write!(
                f,
                "preference {value} for {player_id}/{role} outside 1..=5; clamped"
            ),
            DataQualityWarning::NoRoleData { player_id, role } => {
                write!(f, "no {role} data for {player_id}; using midpoint suitability")
            }
            DataQualityWarning::LowRoleSamples {
                player_id,
                role,
                samples,
            } => write!(
                f,
                "only {samples} {role} games for {player_id}; suitability scaled down"
            ),
            DataQualityWarning::MissingPairHistory { player_a, player_b } => {
                write!(f, "no shared history for {player_a} + {player_b}; synergy neutral")
            }
            DataQualityWarning::NeutralSynergyTable => {
                f.write_str("no shared-history source; using neutral role-compatibility table")
            }
            DataQualityWarning::ValueClamped { context } => {
                write!(f, "out-of-range value clamped: {context}")
            }
            DataQualityWarning::LargePoolHeuristic { pool_size } => write!(
                f,
                "pool of {pool_size} candidates too large for exhaustive roster search; synergy ignored during selection"
            ),
        }
    }
}

/// Collects warnings for one optimization call, logging each once.
#[derive(Debug, Default)]
pub struct Diagnostics {
    seen: BTreeSet<DataQualityWarning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, warning: DataQualityWarning) {
        if !self.seen.contains(&warning) {
            tracing::warn!("{warning}");
            self.seen.insert(warning);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn contains(&self, warning: &DataQualityWarning) -> bool {
        self.seen.contains(warning)
    }

    /// Warnings in stable order.
    pub fn into_vec(self) -> Vec<DataQualityWarning> {
        self.seen.into_iter().collect()
    }
}
