use std::cmp::Ordering;

use crate::model::assignment::{Assignment, PlayerBreakdown};
use crate::model::flags::DataQualityWarning;
use crate::model::scores::{Confidence, PairSynergy, SynergySourceKind};
use crate::report::{format_f64_6, format_signed_6};

const SYNERGY_HIGHLIGHTS: usize = 2;

/// Human-readable justification of an assignment. Missing details are
/// left out rather than failing.
pub fn explain(assignment: &Assignment, warnings: &[DataQualityWarning]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Total score {} = individual {} + synergy {}\n",
        format_f64_6(assignment.total_score),
        format_f64_6(assignment.base_score),
        format_signed_6(assignment.synergy_score)
    ));

    for slot in &assignment.players {
        out.push_str(&format!(
            "{:<8} {:<16} score {}  suitability {} ({})  preference {}\n",
            slot.role.name(),
            slot.player_id,
            format_f64_6(slot.individual_score),
            format_f64_6(slot.suitability),
            confidence_label(slot.confidence),
            preference_label(slot)
        ));
        let highlights = top_synergies(&assignment.pairs, &slot.player_id);
        if highlights.is_empty() {
            out.push_str("         synergy: none notable\n");
        } else {
            let parts = highlights
                .iter()
                .filter_map(|pair| {
                    let (partner, role) = pair.partner_of(&slot.player_id)?;
                    Some(format!(
                        "{} with {} ({}){}",
                        format_signed_6(pair.value),
                        partner,
                        role.name(),
                        source_note(pair.source)
                    ))
                })
                .collect::<Vec<_>>();
            out.push_str(&format!("         synergy: {}\n", parts.join("; ")));
        }
    }

    let notes = relevant_notes(assignment, warnings);
    if !notes.is_empty() {
        out.push_str("Notes:\n");
        for note in notes {
            out.push_str(&format!("  - {note}\n"));
        }
    }
    out
}

fn confidence_label(confidence: Confidence) -> &'static str {
    match confidence {
        Confidence::High => "high confidence",
        Confidence::Low => "low sample size",
        Confidence::NoData => "no role data, midpoint",
    }
}

fn preference_label(slot: &PlayerBreakdown) -> String {
    if !slot.preference_stated {
        return "none stated".to_string();
    }
    let word = match slot.preference {
        5 => "main role",
        4 => "preferred",
        3 => "neutral",
        2 => "reluctant",
        _ => "off-role",
    };
    format!("{}/5 ({word})", slot.preference)
}

fn source_note(source: SynergySourceKind) -> &'static str {
    match source {
        SynergySourceKind::History | SynergySourceKind::NoSharedGames => "",
        SynergySourceKind::RoleRefined => " [role history]",
        SynergySourceKind::NeutralTable => " [role default]",
    }
}

/// Largest-magnitude non-zero pairs involving the player, ties by partner id.
fn top_synergies<'p>(pairs: &'p [PairSynergy], player_id: &str) -> Vec<&'p PairSynergy> {
    let mut involved: Vec<&PairSynergy> = pairs
        .iter()
        .filter(|p| p.involves(player_id) && p.value != 0.0)
        .collect();
    involved.sort_by(|a, b| {
        match b.value.abs().partial_cmp(&a.value.abs()).unwrap_or(Ordering::Equal) {
            Ordering::Equal => {
                let pa = a.partner_of(player_id).map(|(id, _)| id);
                let pb = b.partner_of(player_id).map(|(id, _)| id);
                pa.cmp(&pb)
            }
            other => other,
        }
    });
    involved.truncate(SYNERGY_HIGHLIGHTS);
    involved
}

fn relevant_notes(assignment: &Assignment, warnings: &[DataQualityWarning]) -> Vec<String> {
    let on_team = |id: &str| assignment.players.iter().any(|p| p.player_id == id);
    warnings
        .iter()
        .filter(|w| match w {
            DataQualityWarning::NoRoleData { player_id, role }
            | DataQualityWarning::LowRoleSamples {
                player_id, role, ..
            } => assignment.player_for(*role) == Some(player_id.as_str()),
            DataQualityWarning::MissingPairHistory { player_a, player_b } => {
                on_team(player_a) && on_team(player_b)
            }
            DataQualityWarning::NeutralSynergyTable
            | DataQualityWarning::LargePoolHeuristic { .. } => true,
            _ => false,
        })
        .map(|w| w.to_string())
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage7_explain.rs"]
mod tests;
