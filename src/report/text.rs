use crate::model::assignment::OptimizationResult;
use crate::report::{format_f64_6, format_signed_6, mean};

pub fn render_report_text(result: &OptimizationResult) -> String {
    let mut out = String::new();

    out.push_str("Team Composition Report\n");
    out.push_str("=======================\n\n");
    out.push_str(&format!(
        "Candidates: {} supplied, {} used\n\n",
        result.candidates_supplied, result.candidates_used
    ));

    out.push_str("1. Recommended composition\n");
    out.push_str(&result.best.explanation);
    out.push('\n');

    out.push_str("2. Alternatives\n");
    if result.alternatives.is_empty() {
        out.push_str("No distinct alternative within the allowed score gap.\n\n");
    }
    for (i, alt) in result.alternatives.iter().enumerate() {
        out.push_str(&format!(
            "Alternative {} ({} vs best, lineup {})\n",
            i + 1,
            format_signed_6(alt.total_score - result.best.total_score),
            alt.lineup().join(" / ")
        ));
        out.push_str(&alt.explanation);
        out.push('\n');
    }

    out.push_str("3. Data quality\n");
    let suitability = result
        .role_scores
        .iter()
        .map(|s| s.value)
        .collect::<Vec<_>>();
    out.push_str(&format!(
        "Mean role suitability: {}\n",
        format_f64_6(mean(&suitability))
    ));
    if result.warnings.is_empty() {
        out.push_str("No data-quality warnings.\n");
    } else {
        for warning in &result.warnings {
            out.push_str(&format!("- {warning}\n"));
        }
    }
    out
}
