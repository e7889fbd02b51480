//! End-to-end assessment of one survey submission: cycle phase first,
//! then symptom scoring with that phase.

use chrono::NaiveDate;

use crate::models::{Assessment, CyclePhaseResult, SurveyResponses};

use super::cycle::{
    calculate_cycle_phase_observed, parse_period_date, CycleInput, NoopObserver, PhaseObserver,
    DEFAULT_CYCLE_LENGTH,
};
use super::symptoms::score_symptoms;

/// Leading whole number of days ("30 days" → 30). Zero is not a length.
pub fn parse_cycle_length(raw: &str) -> Option<u32> {
    let digits: String = raw.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse::<u32>().ok().filter(|len| *len > 0)
}

/// Cycle length as the survey reports it. A blank answer means the
/// standard 28 days; an answer that doesn't parse is left unknown so the
/// calculator marks the cycle as estimated.
fn reported_cycle_length(raw: &str) -> Option<u32> {
    if raw.is_empty() {
        Some(DEFAULT_CYCLE_LENGTH)
    } else {
        parse_cycle_length(raw)
    }
}

pub fn assess(answers: &SurveyResponses, reference_date: NaiveDate) -> Assessment {
    assess_observed(answers, reference_date, &NoopObserver)
}

/// Only a respondent reporting regular periods is placed on the calendar
/// model; everyone else scores with an unknown phase.
pub fn assess_observed(
    answers: &SurveyResponses,
    reference_date: NaiveDate,
    observer: &dyn PhaseObserver,
) -> Assessment {
    let is_regular = answers.q1_period == "Yes";
    let last_period = parse_period_date(&answers.q2_last_period);

    let cycle = if is_regular && last_period.is_some() {
        let input = CycleInput::new(last_period, reported_cycle_length(&answers.q1_cycle_length));
        calculate_cycle_phase_observed(&input, reference_date, observer)
    } else {
        CyclePhaseResult::unknown()
    };

    Assessment {
        analysis: score_symptoms(answers, cycle.phase),
        cycle,
    }
}
