//! Assessment output types.
//!
//! `AssessmentResult` is the deterministic output of the engine. The
//! `Assessor` wraps it in an `AssessmentReport`, which adds the per-run
//! identity and timestamp plus the full score breakdown.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One of the four fixed risk bands.
///
/// Bands are lower-bound inclusive and evaluated top-down:
/// `>= 10` very high, `7..=9` high, `4..=6` moderate, below 4 low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    VeryHigh,
    High,
    Moderate,
    Low,
}

impl RiskTier {
    pub const VERY_HIGH_FLOOR: i32 = 10;
    pub const HIGH_FLOOR: i32 = 7;
    pub const MODERATE_FLOOR: i32 = 4;

    /// Map a total score onto its band.
    pub fn from_score(score: i32) -> Self {
        if score >= Self::VERY_HIGH_FLOOR {
            RiskTier::VeryHigh
        } else if score >= Self::HIGH_FLOOR {
            RiskTier::High
        } else if score >= Self::MODERATE_FLOOR {
            RiskTier::Moderate
        } else {
            RiskTier::Low
        }
    }

    /// The tier label shown to the clinician, verbatim.
    pub fn label(self) -> &'static str {
        match self {
            RiskTier::VeryHigh => "Very High Risk – Continue Current PPI Therapy",
            RiskTier::High => "High Risk – Optimize PPI Therapy",
            RiskTier::Moderate => "Moderate Risk – Consider Step-down Therapy",
            RiskTier::Low => "Low Risk Assessment – PPI Deprescribing Protocol Initiation",
        }
    }

    /// The fixed recommendation text for this tier, verbatim.
    pub fn recommendation(self) -> &'static str {
        match self {
            RiskTier::VeryHigh => {
                "Review risk factors every 3 months. Consider GI specialist consultation. \
                 Monitor for long-term PPI complications. Full guidelines apply."
            }
            RiskTier::High => {
                "Reassess in 4-6 weeks. Monitor for breakthrough symptoms. \
                 Consider dose adjustment based on full clinical picture."
            }
            RiskTier::Moderate => {
                "Consider gradual dose reduction. Implement step-down protocol. \
                 Monitor for symptom recurrence. Schedule follow-up in 4 weeks."
            }
            RiskTier::Low => {
                "Implement gradual dose reduction protocol. Consider step-down to on-demand therapy. \
                 Assess for symptom recurrence. Initial review: 2 weeks post-initiation."
            }
        }
    }

    /// Colour marker the presentation layer prefixes to the label.
    pub fn marker(self) -> &'static str {
        match self {
            RiskTier::VeryHigh => "🔴",
            RiskTier::High => "🟠",
            RiskTier::Moderate => "🟡",
            RiskTier::Low => "🟢",
        }
    }
}

/// The engine's answer for one patient record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub score: i32,
    pub tier: RiskTier,
    pub label: String,
    pub recommendation: String,
}

impl AssessmentResult {
    /// Build the result for a total score, filling in the tier texts.
    pub fn from_score(score: i32) -> Self {
        let tier = RiskTier::from_score(score);
        Self {
            score,
            tier,
            label: tier.label().to_string(),
            recommendation: tier.recommendation().to_string(),
        }
    }
}

/// Every intermediate term of a score, in the order they are summed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub nsaid: i32,
    pub antiplatelet: i32,
    pub anticoagulant: i32,
    /// `nsaid + antiplatelet + anticoagulant`.
    pub medication_subtotal: i32,
    pub indication: i32,
    /// Indication names whose gates fired, in gate order.
    pub fired_indications: Vec<String>,
    pub triple_therapy_bonus: i32,
    pub high_risk_bonus: i32,
    /// Zero or negative.
    pub ppi_reduction: i32,
    pub total: i32,
}

/// Unique identifier for one run of the assessor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssessmentId(pub uuid::Uuid);

impl AssessmentId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for AssessmentId {
    fn default() -> Self {
        Self::new()
    }
}

/// What the `Assessor` hands to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub assessment_id: AssessmentId,
    pub assessed_at: DateTime<Utc>,
    /// Absent when weight or height was not captured.
    pub bmi: Option<f64>,
    pub breakdown: ScoreBreakdown,
    pub result: AssessmentResult,
}
