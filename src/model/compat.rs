use crate::model::roles::{Role, RolePair};

#[derive(Debug, Clone, Copy)]
pub struct CompatDef {
    pub a: Role,
    pub b: Role,
    pub value: f64,
}

// Same-lane pairs stay at zero.
const BUILTIN_COMPAT: &[CompatDef] = &[
    CompatDef {
        a: Role::Top,
        b: Role::Jungle,
        value: 0.02,
    },
    CompatDef {
        a: Role::Jungle,
        b: Role::Mid,
        value: 0.03,
    },
    CompatDef {
        a: Role::Jungle,
        b: Role::Bot,
        value: 0.01,
    },
    CompatDef {
        a: Role::Jungle,
        b: Role::Support,
        value: 0.02,
    },
    CompatDef {
        a: Role::Mid,
        b: Role::Support,
        value: 0.01,
    },
    CompatDef {
        a: Role::Mid,
        b: Role::Bot,
        value: 0.01,
    },
];

pub fn builtin_compat() -> &'static [CompatDef] {
    BUILTIN_COMPAT
}

/// Default synergy for a role pair when no shared history can be looked up.
pub fn neutral_compatibility(pair: RolePair) -> f64 {
    if pair.same_lane() {
        return 0.0;
    }
    BUILTIN_COMPAT
        .iter()
        .find(|def| RolePair::new(def.a, def.b) == pair)
        .map(|def| def.value)
        .unwrap_or(0.0)
}
