use serde::Serialize;

use crate::model::assignment::{Assignment, OptimizationResult};
use crate::model::flags::DataQualityWarning;
use crate::model::weights::EngineConfig;

#[derive(Debug, Serialize)]
struct ToolMeta<'a> {
    name: &'a str,
    version: &'a str,
}

#[derive(Debug, Serialize)]
struct CandidateCounts {
    supplied: usize,
    used: usize,
}

#[derive(Debug, Serialize)]
struct Summary<'a> {
    tool: ToolMeta<'a>,
    candidates: CandidateCounts,
    best: &'a Assignment,
    alternatives: &'a [Assignment],
    warnings: Vec<WarningEntry<'a>>,
    config: &'a EngineConfig,
}

#[derive(Debug, Serialize)]
struct WarningEntry<'a> {
    message: String,
    #[serde(flatten)]
    detail: &'a DataQualityWarning,
}

pub fn render_summary_json(
    result: &OptimizationResult,
    config: &EngineConfig,
) -> Result<String, serde_json::Error> {
    let summary = Summary {
        tool: ToolMeta {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        },
        candidates: CandidateCounts {
            supplied: result.candidates_supplied,
            used: result.candidates_used,
        },
        best: &result.best,
        alternatives: &result.alternatives,
        warnings: result
            .warnings
            .iter()
            .map(|w| WarningEntry {
                message: w.to_string(),
                detail: w,
            })
            .collect(),
        config,
    };
    serde_json::to_string_pretty(&summary)
}
