use serde::Serialize;

use crate::model::roles::Role;

pub const SYNERGY_MIN: f64 = -0.3;
pub const SYNERGY_MAX: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Low,
    NoData,
}

impl Confidence {
    pub fn name(self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Low => "low",
            Confidence::NoData => "no_data",
        }
    }
}

/// Suitability of one player for one role, already confidence scaled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleScore {
    pub player_id: String,
    pub role: Role,
    pub value: f64,
    pub samples: u32,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SynergySourceKind {
    /// General shared history between the two players.
    History,
    /// General history refined by role-pair history.
    RoleRefined,
    /// No shared games; neutral zero.
    NoSharedGames,
    /// No history capability; fixed role-compatibility default.
    NeutralTable,
}

/// Symmetric synergy between two assigned players, ids stored in sorted order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairSynergy {
    pub player_a: String,
    pub role_a: Role,
    pub player_b: String,
    pub role_b: Role,
    pub value: f64,
    pub games: u32,
    pub confidence: f64,
    pub source: SynergySourceKind,
}

impl PairSynergy {
    pub fn involves(&self, player_id: &str) -> bool {
        self.player_a == player_id || self.player_b == player_id
    }

    pub fn partner_of(&self, player_id: &str) -> Option<(&str, Role)> {
        if self.player_a == player_id {
            Some((&self.player_b, self.role_b))
        } else if self.player_b == player_id {
            Some((&self.player_a, self.role_a))
        } else {
            None
        }
    }
}

pub fn clip01(x: f64) -> f64 {
    guard(x, 0.0, 1.0).0
}

pub fn clamp_synergy(x: f64) -> f64 {
    guard(x, SYNERGY_MIN, SYNERGY_MAX).0
}

/// Forces a value into `[lo, hi]`. NaN maps to zero clamped into range.
/// The flag reports whether the input had to be changed.
pub fn guard(x: f64, lo: f64, hi: f64) -> (f64, bool) {
    if x.is_nan() {
        return (0.0f64.clamp(lo, hi), true);
    }
    if x < lo {
        (lo, true)
    } else if x > hi {
        (hi, true)
    } else {
        (x, false)
    }
}
