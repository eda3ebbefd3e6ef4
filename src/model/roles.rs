use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const ROLE_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[serde(alias = "toplane")]
    Top,
    #[serde(alias = "jungler", alias = "jg")]
    Jungle,
    #[serde(alias = "middle", alias = "midlane")]
    Mid,
    #[serde(alias = "adc", alias = "bottom", alias = "carry")]
    Bot,
    #[serde(alias = "utility", alias = "sup")]
    Support,
}

/// Fixed role order. Every per-role array in the crate is indexed by it and
/// the solver's lexicographic tie-break walks it front to back.
pub const ROLE_ORDER: [Role; ROLE_COUNT] = [
    Role::Top,
    Role::Jungle,
    Role::Mid,
    Role::Bot,
    Role::Support,
];

impl Role {
    pub fn index(self) -> usize {
        match self {
            Role::Top => 0,
            Role::Jungle => 1,
            Role::Mid => 2,
            Role::Bot => 3,
            Role::Support => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Role::Top => "top",
            Role::Jungle => "jungle",
            Role::Mid => "mid",
            Role::Bot => "bot",
            Role::Support => "support",
        }
    }

    pub fn lane(self) -> Lane {
        match self {
            Role::Top => Lane::Top,
            Role::Jungle => Lane::Jungle,
            Role::Mid => Lane::Mid,
            Role::Bot | Role::Support => Lane::Bottom,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" | "toplane" => Ok(Role::Top),
            "jungle" | "jungler" | "jg" => Ok(Role::Jungle),
            "mid" | "middle" | "midlane" => Ok(Role::Mid),
            "bot" | "adc" | "bottom" | "carry" => Ok(Role::Bot),
            "support" | "utility" | "sup" => Ok(Role::Support),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    Top,
    Jungle,
    Mid,
    Bottom,
}

/// Unordered role pair, stored with the lower role first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RolePair(Role, Role);

impl RolePair {
    pub fn new(a: Role, b: Role) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    pub fn same_lane(self) -> bool {
        self.0.lane() == self.1.lane()
    }
}
