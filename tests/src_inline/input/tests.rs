use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;

use super::config::load_config;
use super::history::{SharedHistoryTable, parse_history};
use super::players::parse_players;
use super::*;
use crate::model::roles::{ROLE_ORDER, Role};
use crate::pipeline::stage2_pair_synergy::{HistoryLookup, PairHistory, SynergySource};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_teamcomp_input_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(path: &Path, contents: &str) {
    let mut f = BufWriter::new(File::create(path).unwrap());
    f.write_all(contents.as_bytes()).unwrap();
}

fn write_gz(path: &Path, contents: &str) {
    let mut encoder = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    encoder.write_all(contents.as_bytes()).unwrap();
    encoder.finish().unwrap();
}

const POOL: &str = r#"{
  "players": [
    {
      "id": " ana ",
      "preferences": { "adc": 5, "jg": 9, "support": 0 },
      "roles": {
        "bot": { "games": 40, "win_rate": 0.58, "kda": 3.4, "cs_per_min": 8.1 },
        "middle": { "games": 3, "win_rate": 0.33 }
      },
      "competency": { "top": { "proficiency": 0.7, "games": 12 } }
    },
    { "id": "ben" }
  ]
}"#;

const HISTORY: &str = r#"{
  "pairs": [
    { "a": "ben", "b": "ana", "games": 10, "wins": 7, "avg_kda": 3.0, "recent_games": 4,
      "roles": [ { "role_a": "support", "role_b": "bot", "games": 6, "win_rate": 0.8 } ] },
    { "a": "ana", "b": "ben", "games": 99, "win_rate": 0.1 },
    { "a": "cid", "b": "cid", "games": 5, "win_rate": 1.0 },
    { "a": "cid", "b": "dee", "games": 8, "win_rate": 0.25 },
    { "a": "eli", "b": "fay" }
  ]
}"#;

#[test]
fn test_parse_players_aliases_and_clamp() {
    let players = parse_players(POOL).unwrap();
    assert_eq!(players.len(), 2);

    let ana = &players[0];
    assert_eq!(ana.id, "ana");
    assert_eq!(ana.preference(Role::Bot), 5);
    assert_eq!(ana.preference(Role::Jungle), 5);
    assert_eq!(ana.preference(Role::Support), 1);
    assert_eq!(ana.preference(Role::Top), 3);
    assert!(!ana.has_stated_preference(Role::Top));

    let bot = ana.performance(Role::Bot);
    assert_eq!(bot.games, 40);
    assert_eq!(bot.win_rate, Some(0.58));
    assert_eq!(bot.vision_per_min, None);
    assert_eq!(ana.performance(Role::Mid).games, 3);
    assert_eq!(ana.competency(Role::Top).unwrap().games, 12);

    let ben = &players[1];
    assert!(ROLE_ORDER.iter().all(|r| !ben.performance(*r).has_metrics()));
}

#[test]
fn test_role_alias_collision_keeps_first() {
    let players = parse_players(
        r#"{ "players": [ {
            "id": "ana",
            "preferences": { "mid": 5, "middle": 2 },
            "roles": { "bot": { "games": 12 }, "adc": { "games": 30 } },
            "competency": { "sup": { "proficiency": 0.4 }, "support": { "proficiency": 0.9 } }
        } ] }"#,
    )
    .unwrap();
    let ana = &players[0];
    assert_eq!(ana.preference(Role::Mid), 5);
    assert_eq!(ana.performance(Role::Bot).games, 12);
    assert_eq!(ana.competency(Role::Support).unwrap().proficiency, 0.4);
}

#[test]
fn test_unknown_role_key_rejected() {
    let err = parse_players(r#"{ "players": [ { "id": "a", "preferences": { "goalie": 3 } } ] }"#)
        .unwrap_err();
    assert!(matches!(err, InputError::Json(_)));
}

#[test]
fn test_parse_players_rejects_empty_pool() {
    let err = parse_players(r#"{ "players": [] }"#).unwrap_err();
    assert!(matches!(err, InputError::InvalidInput(_)));
    let err = parse_players("{ not json").unwrap_err();
    assert!(matches!(err, InputError::Json(_)));
}

#[test]
fn test_parse_history_rules() {
    let table = parse_history(HISTORY).unwrap();
    assert_eq!(table.len(), 3);

    // first record kept, lookups symmetric, wins take precedence over win_rate
    let HistoryLookup::Found(h) = table.pair_history("ana", "ben") else {
        panic!("expected history");
    };
    assert_eq!(h.games, 10);
    assert!((h.win_rate - 0.7).abs() < 1e-12);
    assert_eq!(h.avg_kda, Some(3.0));
    assert_eq!(h.recent_games, 4);
    assert_eq!(table.pair_history("ben", "ana"), HistoryLookup::Found(h));

    let role = table
        .role_pair_history("ana", Role::Bot, "ben", Role::Support)
        .unwrap();
    assert_eq!(role.games, 6);
    assert!(table
        .role_pair_history("ana", Role::Support, "ben", Role::Bot)
        .is_none());

    // self-pair skipped, unseen pairs report zero games
    assert_eq!(
        table.pair_history("cid", "zed"),
        HistoryLookup::Found(PairHistory::default())
    );
    let HistoryLookup::Found(empty) = table.pair_history("eli", "fay") else {
        panic!("expected history");
    };
    assert_eq!(empty.games, 0);
    assert!((empty.win_rate - 0.5).abs() < 1e-12);
}

#[test]
fn test_history_table_insert_keeps_first() {
    let mut table = SharedHistoryTable::new();
    assert!(table.is_empty());
    let first = PairHistory {
        games: 3,
        win_rate: 0.6,
        avg_kda: None,
        recent_games: 0,
    };
    assert!(table.insert("b", "a", first));
    assert!(!table.insert("a", "b", PairHistory::default()));
    assert_eq!(table.pair_history("a", "b"), HistoryLookup::Found(first));
}

#[test]
fn test_parse_history_rejects_blank_ids() {
    let err = parse_history(r#"{ "pairs": [ { "a": " ", "b": "x", "games": 1 } ] }"#).unwrap_err();
    assert!(matches!(err, InputError::InvalidInput(_)));
}

#[test]
fn test_load_input_plain_and_gz() {
    let dir = make_temp_dir();
    let players_path = dir.join("players.json");
    let history_path = dir.join("history.json.gz");
    write_file(&players_path, POOL);
    write_gz(&history_path, HISTORY);

    let bundle = load_input(&players_path, Some(&history_path)).unwrap();
    assert_eq!(bundle.players.len(), 2);
    assert_eq!(bundle.history.as_ref().map(|h| h.len()), Some(3));

    let bundle = load_input(&players_path, None).unwrap();
    assert!(bundle.history.is_none());
}

#[test]
fn test_load_input_missing_files() {
    let dir = make_temp_dir();
    let err = load_input(&dir.join("absent.json"), None).unwrap_err();
    assert!(matches!(err, InputError::MissingInput(_)));

    let players_path = dir.join("players.json");
    write_file(&players_path, POOL);
    let err = load_input(&players_path, Some(&dir.join("absent.json"))).unwrap_err();
    assert!(matches!(err, InputError::MissingInput(_)));
}

#[test]
fn test_empty_file_is_invalid() {
    let dir = make_temp_dir();
    let path = dir.join("players.json");
    write_file(&path, "  \n");
    let err = load_input(&path, None).unwrap_err();
    assert!(matches!(err, InputError::InvalidInput(_)));
}

#[test]
fn test_load_config_partial_and_invalid() {
    let dir = make_temp_dir();
    let path = dir.join("config.json");
    write_file(&path, r#"{ "search": { "max_alternatives": 2 } }"#);
    let config = load_config(&path).unwrap();
    assert_eq!(config.search.max_alternatives, 2);
    assert!((config.search.min_score_diff - 0.1).abs() < 1e-12);
    assert_eq!(config.min_role_samples, 10);

    write_file(
        &path,
        r#"{ "weights": { "performance": 0.7, "preference": 0.25, "synergy": 0.15 } }"#,
    );
    let err = load_config(&path).unwrap_err();
    assert!(matches!(err, InputError::InvalidInput(_)));
}
