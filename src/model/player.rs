use serde::Serialize;

use crate::model::roles::{ROLE_COUNT, Role};

pub const NEUTRAL_PREFERENCE: u8 = 3;
pub const MIN_PREFERENCE: u8 = 1;
pub const MAX_PREFERENCE: u8 = 5;

/// Per-role match summary. Every metric may be unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RolePerformance {
    pub games: u32,
    pub win_rate: Option<f64>,
    pub kda: Option<f64>,
    pub cs_per_min: Option<f64>,
    pub vision_per_min: Option<f64>,
    /// Recent form in [-1, 1]; positive means improving.
    pub form_trend: Option<f64>,
}

impl RolePerformance {
    pub fn has_metrics(&self) -> bool {
        self.win_rate.is_some()
            || self.kda.is_some()
            || self.cs_per_min.is_some()
            || self.vision_per_min.is_some()
    }
}

/// Aggregate champion proficiency for a role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Competency {
    pub proficiency: f64,
    pub games: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerCandidate {
    pub id: String,
    pub preferences: [Option<u8>; ROLE_COUNT],
    pub performance: [RolePerformance; ROLE_COUNT],
    pub competency: [Option<Competency>; ROLE_COUNT],
}

impl PlayerCandidate {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            preferences: [None; ROLE_COUNT],
            performance: Default::default(),
            competency: [None; ROLE_COUNT],
        }
    }

    pub fn with_preference(mut self, role: Role, value: u8) -> Self {
        self.preferences[role.index()] = Some(value);
        self
    }

    pub fn with_performance(mut self, role: Role, perf: RolePerformance) -> Self {
        self.performance[role.index()] = perf;
        self
    }

    pub fn with_competency(mut self, role: Role, competency: Competency) -> Self {
        self.competency[role.index()] = Some(competency);
        self
    }

    /// Stated preference, neutral when absent, always within 1..=5.
    pub fn preference(&self, role: Role) -> u8 {
        self.preferences[role.index()]
            .unwrap_or(NEUTRAL_PREFERENCE)
            .clamp(MIN_PREFERENCE, MAX_PREFERENCE)
    }

    pub fn has_stated_preference(&self, role: Role) -> bool {
        self.preferences[role.index()].is_some()
    }

    pub fn performance(&self, role: Role) -> &RolePerformance {
        &self.performance[role.index()]
    }

    pub fn competency(&self, role: Role) -> Option<Competency> {
        self.competency[role.index()]
    }
}
