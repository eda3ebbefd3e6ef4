use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::input::InputError;
use crate::input::cache::read_to_string_maybe_gz;
use crate::model::player::{
    Competency, MAX_PREFERENCE, MIN_PREFERENCE, PlayerCandidate, RolePerformance,
};
use crate::model::roles::Role;

#[derive(Debug, Deserialize)]
struct PoolFile {
    players: Vec<PlayerRecord>,
}

#[derive(Debug, Deserialize)]
struct PlayerRecord {
    id: String,
    #[serde(default)]
    preferences: RoleEntries<i64>,
    #[serde(default)]
    roles: RoleEntries<RoleRecord>,
    #[serde(default)]
    competency: RoleEntries<CompetencyRecord>,
}

/// Role-keyed object kept in file order, so that two aliases of one role
/// (`mid` and `middle`) can be detected instead of silently overwritten.
#[derive(Debug)]
struct RoleEntries<T>(Vec<(Role, T)>);

impl<T> Default for RoleEntries<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for RoleEntries<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for EntriesVisitor<T> {
            type Value = RoleEntries<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object keyed by role name")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                while let Some((role, value)) = map.next_entry::<Role, T>()? {
                    entries.push((role, value));
                }
                Ok(RoleEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

impl<T> RoleEntries<T> {
    /// First entry per role; later aliases of the same role are dropped with a warning.
    fn first_per_role(self, player_id: &str, field: &str) -> Vec<(Role, T)> {
        let mut kept: Vec<(Role, T)> = Vec::with_capacity(self.0.len());
        for (role, value) in self.0 {
            if kept.iter().any(|(r, _)| *r == role) {
                tracing::warn!(
                    "{} for {}/{} given more than once (role alias); keeping first",
                    field,
                    player_id,
                    role
                );
                continue;
            }
            kept.push((role, value));
        }
        kept
    }
}

#[derive(Debug, Deserialize)]
struct RoleRecord {
    #[serde(default)]
    games: u32,
    win_rate: Option<f64>,
    kda: Option<f64>,
    cs_per_min: Option<f64>,
    vision_per_min: Option<f64>,
    form_trend: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CompetencyRecord {
    proficiency: f64,
    #[serde(default)]
    games: u32,
}

pub fn load_players(path: &Path) -> Result<Vec<PlayerCandidate>, InputError> {
    let text = read_to_string_maybe_gz(path)?;
    parse_players(&text)
}

pub fn parse_players(text: &str) -> Result<Vec<PlayerCandidate>, InputError> {
    let file: PoolFile = serde_json::from_str(text)?;
    if file.players.is_empty() {
        return Err(InputError::InvalidInput(
            "candidate pool has no players".to_string(),
        ));
    }
    Ok(file.players.into_iter().map(into_candidate).collect())
}

fn into_candidate(record: PlayerRecord) -> PlayerCandidate {
    let mut player = PlayerCandidate::new(record.id.trim());
    let id = player.id.clone();

    for (role, value) in record.preferences.first_per_role(&id, "preference") {
        let clamped = value.clamp(MIN_PREFERENCE as i64, MAX_PREFERENCE as i64);
        if clamped != value {
            tracing::warn!(
                "preference {} for {}/{} outside 1..=5; clamped to {}",
                value,
                player.id,
                role,
                clamped
            );
        }
        player = player.with_preference(role, clamped as u8);
    }

    for (role, r) in record.roles.first_per_role(&id, "role stats") {
        player = player.with_performance(
            role,
            RolePerformance {
                games: r.games,
                win_rate: r.win_rate,
                kda: r.kda,
                cs_per_min: r.cs_per_min,
                vision_per_min: r.vision_per_min,
                form_trend: r.form_trend,
            },
        );
    }

    for (role, c) in record.competency.first_per_role(&id, "competency") {
        player = player.with_competency(
            role,
            Competency {
                proficiency: c.proficiency,
                games: c.games,
            },
        );
    }

    player
}
