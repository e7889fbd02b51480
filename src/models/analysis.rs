use serde::{Deserialize, Serialize};

use super::enums::{ConfidenceLevel, CyclePhase, HormoneCategory, PhaseConfidence};

/// Accumulated points per hormone category.
///
/// The category set is closed: every score lives in one of the six
/// named fields, addressed through [`HormoneCategory`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HormoneScores {
    pub androgens: i32,
    pub progesterone: i32,
    pub estrogen: i32,
    pub thyroid: i32,
    pub cortisol: i32,
    pub insulin: i32,
}

impl HormoneScores {
    pub fn get(&self, category: HormoneCategory) -> i32 {
        match category {
            HormoneCategory::Androgens => self.androgens,
            HormoneCategory::Progesterone => self.progesterone,
            HormoneCategory::Estrogen => self.estrogen,
            HormoneCategory::Thyroid => self.thyroid,
            HormoneCategory::Cortisol => self.cortisol,
            HormoneCategory::Insulin => self.insulin,
        }
    }

    fn slot(&mut self, category: HormoneCategory) -> &mut i32 {
        match category {
            HormoneCategory::Androgens => &mut self.androgens,
            HormoneCategory::Progesterone => &mut self.progesterone,
            HormoneCategory::Estrogen => &mut self.estrogen,
            HormoneCategory::Thyroid => &mut self.thyroid,
            HormoneCategory::Cortisol => &mut self.cortisol,
            HormoneCategory::Insulin => &mut self.insulin,
        }
    }

    /// Add (or, with a negative delta, subtract) points.
    pub fn add(&mut self, category: HormoneCategory, points: i32) {
        *self.slot(category) += points;
    }

    /// Copy with every negative category raised to zero.
    pub fn clamped(mut self) -> Self {
        for category in HormoneCategory::ALL {
            let slot = self.slot(category);
            *slot = (*slot).max(0);
        }
        self
    }

    pub fn total(&self) -> i32 {
        HormoneCategory::ALL.iter().map(|c| self.get(*c)).sum()
    }

    /// Categories with a positive score, highest first. Equal scores keep
    /// declaration order.
    pub fn ranked(&self) -> Vec<(HormoneCategory, i32)> {
        let mut ranked: Vec<_> = HormoneCategory::ALL
            .iter()
            .map(|c| (*c, self.get(*c)))
            .filter(|(_, score)| *score > 0)
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

/// Outcome of one survey submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub primary_imbalance: Option<HormoneCategory>,
    pub secondary_imbalances: Vec<HormoneCategory>,
    pub confidence_level: ConfidenceLevel,
    pub explanations: Vec<String>,
    pub scores: HormoneScores,
    pub total_score: i32,
    pub cycle_phase: CyclePhase,
}

/// Position within the menstrual cycle relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CyclePhaseResult {
    pub cycle_day: i64,
    pub phase: CyclePhase,
    pub phase_confidence: PhaseConfidence,
    pub use_estimated_cycle: bool,
    pub ovulation_day: i64,
    pub days_until_next_period: i64,
}

impl CyclePhaseResult {
    /// Result for a missing last-period date.
    pub fn unknown() -> Self {
        Self {
            cycle_day: 0,
            phase: CyclePhase::Unknown,
            phase_confidence: PhaseConfidence::Low,
            use_estimated_cycle: true,
            ovulation_day: 0,
            days_until_next_period: 0,
        }
    }
}

/// Detailed cycle result together with the scored analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub analysis: AnalysisResult,
    pub cycle: CyclePhaseResult,
}
