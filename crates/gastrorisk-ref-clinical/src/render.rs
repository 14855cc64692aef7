//! Plain-text presentation of assessments and reference tables.

use std::fmt::Write;

use gastrorisk_contracts::assessment::AssessmentReport;
use gastrorisk_engine::ReferenceTables;

/// Render an assessment the way a clinician reads it.
///
/// ```text
/// --- Risk Assessment Result ---
/// BMI: 25.51
/// Risk Score: 5
/// Risk Rating: 🟡 Moderate Risk – Consider Step-down Therapy
///
/// Recommendations: Consider gradual dose reduction. ...
/// ```
///
/// The BMI line is omitted when weight or height was not captured.
pub fn render_assessment(report: &AssessmentReport) -> String {
    let result = &report.result;
    let mut out = String::from("--- Risk Assessment Result ---\n");

    if let Some(bmi) = report.bmi {
        let _ = writeln!(out, "BMI: {bmi:.2}");
    }
    let _ = writeln!(out, "Risk Score: {}", result.score);
    let _ = writeln!(out, "Risk Rating: {} {}", result.tier.marker(), result.label);
    if !report.breakdown.fired_indications.is_empty() {
        let _ = writeln!(
            out,
            "Indications: {}",
            report.breakdown.fired_indications.join(", ")
        );
    }
    let _ = write!(out, "\nRecommendations: {}", result.recommendation);
    out
}

/// Render every reference table and scoring constant.
pub fn render_reference(tables: &ReferenceTables) -> String {
    let mut out = String::new();

    out.push_str("NSAIDs\n");
    for entry in tables.nsaids() {
        let _ = writeln!(
            out,
            "  {} / {}: base risk {}, max {} mg/day ({})",
            entry.group, entry.name, entry.base_risk, entry.max_dose, entry.dosing
        );
    }

    out.push_str("\nPPIs\n");
    for ppi in tables.ppis() {
        let doses: Vec<String> = ppi.doses.iter().map(|d| format!("{d} mg")).collect();
        let _ = writeln!(out, "  {}: {}", ppi.name, doses.join(", "));
    }

    out.push_str("\nIndication weights\n");
    for (indication, weight) in tables.indications() {
        let _ = writeln!(out, "  {indication}: {weight}");
    }

    out.push_str("\nGates\n");
    for gate in tables.gates() {
        let mut line = format!("  {} -> {}: all {:?}", gate.id, gate.indication, gate.all);
        if !gate.any.is_empty() {
            let _ = write!(line, ", any {:?}", gate.any);
        }
        let _ = writeln!(out, "{line}");
    }

    let c = tables.constants();
    out.push_str("\nScoring constants\n");
    let _ = writeln!(
        out,
        "  high dose: > {} x max dose adds {}",
        c.high_dose_fraction, c.high_dose_penalty
    );
    let _ = writeln!(
        out,
        "  antiplatelet {}, anticoagulant {}, triple therapy {}",
        c.antiplatelet_weight, c.anticoagulant_weight, c.triple_therapy_bonus
    );
    let _ = writeln!(
        out,
        "  high-risk bonus {} (medication >= {} or indication >= {})",
        c.high_risk_bonus, c.high_risk_medication_threshold, c.high_risk_indication_threshold
    );
    let _ = writeln!(out, "  elderly: age > {}", c.elderly_age_threshold);
    let _ = write!(
        out,
        "  PPI: oral >= {} mg takes off {}, IV >= {} mg takes off {}",
        c.ppi_oral_min_dose, c.ppi_oral_reduction, c.ppi_iv_min_dose, c.ppi_iv_reduction
    );
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use gastrorisk_contracts::assessment::{
        AssessmentId, AssessmentReport, AssessmentResult, ScoreBreakdown,
    };
    use gastrorisk_engine::ReferenceTables;

    use super::{render_assessment, render_reference};

    fn report(score: i32, bmi: Option<f64>, fired: &[&str]) -> AssessmentReport {
        AssessmentReport {
            assessment_id: AssessmentId::new(),
            assessed_at: Default::default(),
            bmi,
            breakdown: ScoreBreakdown {
                fired_indications: fired.iter().map(|s| s.to_string()).collect(),
                total: score,
                ..Default::default()
            },
            result: AssessmentResult::from_score(score),
        }
    }

    #[test]
    fn test_render_full_assessment() {
        let text = render_assessment(&report(5, Some(25.5102), &["NSAID & age > 60"]));

        let expected = "--- Risk Assessment Result ---\n\
                        BMI: 25.51\n\
                        Risk Score: 5\n\
                        Risk Rating: 🟡 Moderate Risk – Consider Step-down Therapy\n\
                        Indications: NSAID & age > 60\n\
                        \n\
                        Recommendations: Consider gradual dose reduction. Implement step-down protocol. \
                        Monitor for symptom recurrence. Schedule follow-up in 4 weeks.";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_without_bmi_or_indications() {
        let text = render_assessment(&report(0, None, &[]));

        assert!(!text.contains("BMI"));
        assert!(!text.contains("Indications"));
        assert!(text.contains("Risk Rating: 🟢 Low Risk Assessment"));
    }

    #[test]
    fn test_render_reference_lists_everything() {
        let tables = ReferenceTables::builtin().unwrap();
        let text = render_reference(&tables);

        assert!(text.contains("Propionic acid derivatives (Profens) / Ibuprofen: base risk 3, max 2400 mg/day"));
        assert!(text.contains("Rabeprazole: 10 mg, 20 mg"));
        assert!(text.contains("Stress ulcer prophylaxis: 2"));
        assert!(text.contains("nsaid-combination -> NSAID + cortico/antiplatelet/anticoag: all [NsaidUse], any [SteroidUse, AntiplateletUse, AnticoagulantUse]"));
        assert!(text.contains("elderly: age > 60"));
    }
}
