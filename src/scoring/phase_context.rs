//! Descriptive context for each cycle phase: display text, symptoms that
//! are expected in a phase, and the typical hormone trajectory.

use serde::Serialize;

use crate::models::{CyclePhase, HormoneTrend, PhaseConfidence};

/// Symptoms that swing with the cycle and are discounted when the phase
/// itself is uncertain.
const CYCLE_SENSITIVE_SYMPTOMS: &[&str] = &[
    "bloating",
    "breast tenderness",
    "mood swings",
    "cravings",
    "acne",
    "irritability",
    "fatigue",
    "cramps",
];

impl CyclePhase {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Menstrual => "Menstrual",
            Self::Follicular => "Follicular",
            Self::Ovulatory => "Ovulatory",
            Self::Luteal => "Luteal",
            Self::Unknown => "Unknown",
        }
    }
}

pub fn phase_description(phase: CyclePhase) -> &'static str {
    match phase {
        CyclePhase::Menstrual => "Period phase - estrogen and progesterone are low",
        CyclePhase::Follicular => "Pre-ovulation phase - estrogen rises, preparing for ovulation",
        CyclePhase::Ovulatory => "Ovulation occurs - egg is released, estrogen peaks",
        CyclePhase::Luteal => {
            "Post-ovulation phase - progesterone rises, preparing for potential pregnancy"
        }
        CyclePhase::Unknown => "Unable to determine cycle phase",
    }
}

fn normal_symptoms(phase: CyclePhase) -> &'static [&'static str] {
    match phase {
        CyclePhase::Menstrual => &["cramps", "fatigue", "mood changes", "back pain"],
        CyclePhase::Follicular => &["increased energy", "clear skin"],
        CyclePhase::Ovulatory => &["mid-cycle pain", "increased libido", "cervical mucus changes"],
        CyclePhase::Luteal => &[
            "bloating",
            "breast tenderness",
            "mood swings",
            "cravings",
            "acne",
            "irritability",
        ],
        CyclePhase::Unknown => &[],
    }
}

/// Case-insensitive check against the symptoms expected in `phase`.
pub fn is_symptom_normal_for_phase(symptom: &str, phase: CyclePhase) -> bool {
    let symptom = symptom.to_lowercase();
    normal_symptoms(phase).contains(&symptom.as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExpectedHormoneLevels {
    pub estrogen: HormoneTrend,
    pub progesterone: HormoneTrend,
    pub lh: HormoneTrend,
    pub fsh: HormoneTrend,
}

pub fn expected_hormone_levels(phase: CyclePhase) -> ExpectedHormoneLevels {
    use HormoneTrend::*;

    let (estrogen, progesterone, lh, fsh) = match phase {
        CyclePhase::Menstrual => (Low, Low, Low, Rising),
        CyclePhase::Follicular => (Rising, Low, Low, Low),
        CyclePhase::Ovulatory => (High, Low, High, High),
        CyclePhase::Luteal => (Falling, Rising, Low, Low),
        CyclePhase::Unknown => (Unknown, Unknown, Unknown, Unknown),
    };
    ExpectedHormoneLevels {
        estrogen,
        progesterone,
        lh,
        fsh,
    }
}

/// Discount a symptom's points given the phase context.
///
/// With LOW phase confidence, cycle-sensitive symptoms keep half their
/// points. Otherwise a symptom that is normal for the phase keeps 30%.
/// Fractions round down.
pub fn adjust_symptom_score_for_phase(
    symptom: &str,
    phase: CyclePhase,
    phase_confidence: PhaseConfidence,
    base_score: u32,
) -> u32 {
    if phase_confidence == PhaseConfidence::Low {
        let lower = symptom.to_lowercase();
        if CYCLE_SENSITIVE_SYMPTOMS.contains(&lower.as_str()) {
            return base_score / 2;
        }
    }

    if is_symptom_normal_for_phase(symptom, phase) {
        return base_score * 3 / 10;
    }

    base_score
}
