use super::*;
use crate::fixtures::varied_pool;
use crate::model::weights::EngineConfig;
use crate::pipeline::optimize;
use crate::pipeline::stage2_pair_synergy::NoHistory;
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> std::path::PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_teamcomp_report_test_{}_{}", std::process::id(), id));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_write_reports_outputs() {
    let config = EngineConfig::default_v1();
    let result = optimize(&varied_pool(), &NoHistory, &config).unwrap();
    let dir = make_temp_dir().join("nested");

    write_reports(&result, &config, &dir).unwrap();

    let json = std::fs::read_to_string(dir.join(SUMMARY_FILE)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["tool"]["name"], "kira-teamcomp");
    assert_eq!(value["candidates"]["supplied"], 6);
    assert_eq!(value["best"]["players"].as_array().unwrap().len(), 5);
    let warnings = value["warnings"].as_array().unwrap();
    assert!(warnings.iter().any(|w| w["kind"] == "neutral_synergy_table"));
    assert!(warnings.iter().all(|w| w["message"].is_string()));
    assert!(value["config"]["search"]["max_alternatives"].is_u64());

    let report = std::fs::read_to_string(dir.join(REPORT_FILE)).unwrap();
    assert!(report.starts_with("Team Composition Report"));
    assert!(report.contains("1. Recommended composition"));
    assert!(report.contains(&result.best.explanation));

    let tsv = std::fs::read_to_string(dir.join(ROLE_SCORES_FILE)).unwrap();
    let mut lines = tsv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "player\trole\tsuitability\tsamples\tconfidence\tassigned"
    );
    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 30);
    let assigned = rows.iter().filter(|r| r.ends_with("\tyes")).count();
    assert_eq!(assigned, 5);
    assert!(rows[0].starts_with("ana\ttop\t"));
}
