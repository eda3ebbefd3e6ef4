use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::model::assignment::OptimizationResult;
use crate::model::weights::EngineConfig;
use crate::report::format_f64_6;
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;

pub const SUMMARY_FILE: &str = "assignment.json";
pub const REPORT_FILE: &str = "report.txt";
pub const ROLE_SCORES_FILE: &str = "role_scores.tsv";

pub fn write_reports(
    result: &OptimizationResult,
    config: &EngineConfig,
    out_dir: &Path,
) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)?;

    let json = render_summary_json(result, config)?;
    write_text(&out_dir.join(SUMMARY_FILE), &json)?;

    let report = render_report_text(result);
    write_text(&out_dir.join(REPORT_FILE), &report)?;

    write_role_scores(result, &out_dir.join(ROLE_SCORES_FILE))?;
    tracing::info!("reports written to {}", out_dir.display());
    Ok(())
}

fn write_role_scores(result: &OptimizationResult, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "player\trole\tsuitability\tsamples\tconfidence\tassigned")?;
    for score in &result.role_scores {
        let assigned = result.best.player_for(score.role) == Some(score.player_id.as_str());
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}",
            score.player_id,
            score.role,
            format_f64_6(score.value),
            score.samples,
            score.confidence.name(),
            if assigned { "yes" } else { "no" }
        )?;
    }
    w.flush()
}

fn write_text(path: &Path, text: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(text.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage8_report.rs"]
mod tests;
