use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::input::InputError;
use crate::input::cache::read_to_string_maybe_gz;
use crate::model::roles::Role;
use crate::pipeline::stage2_pair_synergy::{HistoryLookup, PairHistory, SynergySource};

const NEUTRAL_WIN_RATE: f64 = 0.5;

#[derive(Debug, Deserialize)]
struct HistoryFile {
    pairs: Vec<PairRecord>,
}

#[derive(Debug, Deserialize)]
struct PairRecord {
    a: String,
    b: String,
    #[serde(flatten)]
    stats: StatsRecord,
    #[serde(default)]
    roles: Vec<RolePairRecord>,
}

#[derive(Debug, Deserialize)]
struct RolePairRecord {
    role_a: Role,
    role_b: Role,
    #[serde(flatten)]
    stats: StatsRecord,
}

#[derive(Debug, Deserialize)]
struct StatsRecord {
    #[serde(default)]
    games: u32,
    wins: Option<u32>,
    win_rate: Option<f64>,
    avg_kda: Option<f64>,
    #[serde(default)]
    recent_games: u32,
}

impl StatsRecord {
    fn to_history(&self) -> PairHistory {
        let win_rate = match (self.wins, self.win_rate) {
            (Some(wins), _) if self.games > 0 => wins.min(self.games) as f64 / self.games as f64,
            (_, Some(rate)) => rate,
            _ => NEUTRAL_WIN_RATE,
        };
        PairHistory {
            games: self.games,
            win_rate,
            avg_kda: self.avg_kda,
            recent_games: self.recent_games,
        }
    }
}

type PairKey = (String, String);
type RolePairKey = (String, Role, String, Role);

/// In-memory shared history. Lookups ignore argument order; pairs never seen
/// together report zero games.
#[derive(Debug, Clone, Default)]
pub struct SharedHistoryTable {
    pairs: BTreeMap<PairKey, PairHistory>,
    role_pairs: BTreeMap<RolePairKey, PairHistory>,
}

impl SharedHistoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns false when the pair was already present (first record kept).
    pub fn insert(&mut self, a: &str, b: &str, history: PairHistory) -> bool {
        let key = pair_key(a, b);
        if self.pairs.contains_key(&key) {
            return false;
        }
        self.pairs.insert(key, history);
        true
    }

    pub fn insert_role_pair(
        &mut self,
        a: &str,
        role_a: Role,
        b: &str,
        role_b: Role,
        history: PairHistory,
    ) -> bool {
        let key = role_pair_key(a, role_a, b, role_b);
        if self.role_pairs.contains_key(&key) {
            return false;
        }
        self.role_pairs.insert(key, history);
        true
    }
}

impl SynergySource for SharedHistoryTable {
    fn pair_history(&self, a: &str, b: &str) -> HistoryLookup {
        let history = self.pairs.get(&pair_key(a, b)).copied().unwrap_or_default();
        HistoryLookup::Found(history)
    }

    fn role_pair_history(&self, a: &str, role_a: Role, b: &str, role_b: Role) -> Option<PairHistory> {
        self.role_pairs
            .get(&role_pair_key(a, role_a, b, role_b))
            .copied()
    }
}

fn pair_key(a: &str, b: &str) -> PairKey {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

fn role_pair_key(a: &str, role_a: Role, b: &str, role_b: Role) -> RolePairKey {
    if a <= b {
        (a.to_string(), role_a, b.to_string(), role_b)
    } else {
        (b.to_string(), role_b, a.to_string(), role_a)
    }
}

pub fn load_history(path: &Path) -> Result<SharedHistoryTable, InputError> {
    let text = read_to_string_maybe_gz(path)?;
    parse_history(&text)
}

pub fn parse_history(text: &str) -> Result<SharedHistoryTable, InputError> {
    let file: HistoryFile = serde_json::from_str(text)?;
    let mut table = SharedHistoryTable::new();

    for (line, record) in file.pairs.iter().enumerate() {
        let a = record.a.trim();
        let b = record.b.trim();
        if a.is_empty() || b.is_empty() {
            return Err(InputError::InvalidInput(format!(
                "history pair {} has an empty player id",
                line + 1
            )));
        }
        if a == b {
            tracing::warn!("history pair {} pairs {} with itself; skipping", line + 1, a);
            continue;
        }
        if !table.insert(a, b, record.stats.to_history()) {
            tracing::warn!(
                "duplicate history for {} + {}; keeping first (pair {})",
                a,
                b,
                line + 1
            );
            continue;
        }
        for role_record in &record.roles {
            if !table.insert_role_pair(
                a,
                role_record.role_a,
                b,
                role_record.role_b,
                role_record.stats.to_history(),
            ) {
                tracing::warn!(
                    "duplicate {}/{} history for {} + {}; keeping first",
                    role_record.role_a,
                    role_record.role_b,
                    a,
                    b
                );
            }
        }
    }

    Ok(table)
}
