//! Cycle phase calculator.
//!
//! Maps a last-period start date and an optional cycle length onto a
//! discrete phase plus a confidence level. The reference date is an
//! explicit argument so the calculation stays a pure function; callers
//! that want a record of each calculation pass a [`PhaseObserver`].

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{CyclePhase, CyclePhaseResult, PhaseConfidence};

pub const DEFAULT_CYCLE_LENGTH: u32 = 28;

/// Cycle days 1..=5 are always menstrual.
const MENSTRUAL_LAST_DAY: i64 = 5;

/// Inputs to [`calculate_cycle_phase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleInput {
    pub last_period: Option<NaiveDate>,
    /// Reported average cycle length in days. Zero counts as not reported.
    pub cycle_length: Option<u32>,
    /// Treat a missing cycle length as an estimate (lowers confidence).
    pub fallback_to_default: bool,
}

impl CycleInput {
    pub fn new(last_period: Option<NaiveDate>, cycle_length: Option<u32>) -> Self {
        Self {
            last_period,
            cycle_length,
            fallback_to_default: true,
        }
    }

    pub fn without_fallback(mut self) -> Self {
        self.fallback_to_default = false;
        self
    }
}

impl Default for CycleInput {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One completed phase calculation, handed to a [`PhaseObserver`].
#[derive(Debug, Clone, Copy)]
pub struct PhaseCalculation {
    pub input: CycleInput,
    pub reference_date: NaiveDate,
    pub effective_cycle_length: u32,
    pub result: CyclePhaseResult,
}

/// Hook for recording phase calculations outside the calculator.
pub trait PhaseObserver: Send + Sync {
    fn phase_calculated(&self, event: &PhaseCalculation);
}

/// Observer that records nothing.
pub struct NoopObserver;

impl PhaseObserver for NoopObserver {
    fn phase_calculated(&self, _event: &PhaseCalculation) {}
}

/// Emits every calculation as a `debug` tracing event.
pub struct TracingPhaseObserver;

impl PhaseObserver for TracingPhaseObserver {
    fn phase_calculated(&self, event: &PhaseCalculation) {
        tracing::debug!(
            last_period = ?event.input.last_period,
            cycle_length = ?event.input.cycle_length,
            effective_cycle_length = event.effective_cycle_length,
            reference_date = %event.reference_date,
            cycle_day = event.result.cycle_day,
            ovulation_day = event.result.ovulation_day,
            phase = %event.result.phase,
            phase_confidence = %event.result.phase_confidence,
            use_estimated_cycle = event.result.use_estimated_cycle,
            "Cycle phase calculated"
        );
    }
}

/// Parse the survey's last-period answer.
///
/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (date taken in UTC).
pub fn parse_period_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    })
}

pub fn calculate_cycle_phase(input: &CycleInput, reference_date: NaiveDate) -> CyclePhaseResult {
    calculate_cycle_phase_observed(input, reference_date, &NoopObserver)
}

/// Calculate the phase and report the calculation to `observer`.
///
/// A last-period date after `reference_date` yields `unknown`.
pub fn calculate_cycle_phase_observed(
    input: &CycleInput,
    reference_date: NaiveDate,
    observer: &dyn PhaseObserver,
) -> CyclePhaseResult {
    let Some(last_period) = input.last_period else {
        return CyclePhaseResult::unknown();
    };

    let reported_length = input.cycle_length.filter(|len| *len > 0);
    let use_estimated_cycle = reported_length.is_none() && input.fallback_to_default;
    let effective_cycle_length = reported_length.unwrap_or(DEFAULT_CYCLE_LENGTH);
    let cycle_length = i64::from(effective_cycle_length);

    let days_since = (reference_date - last_period).num_days();
    let ovulation_day = cycle_length / 2;

    let result = if days_since < 0 {
        CyclePhaseResult {
            cycle_day: 0,
            phase: CyclePhase::Unknown,
            phase_confidence: PhaseConfidence::Low,
            use_estimated_cycle,
            ovulation_day,
            days_until_next_period: 0,
        }
    } else {
        let cycle_day = days_since % cycle_length + 1;
        let phase = phase_for_day(cycle_day, ovulation_day, cycle_length);
        CyclePhaseResult {
            cycle_day,
            phase,
            phase_confidence: phase_confidence(phase, use_estimated_cycle),
            use_estimated_cycle,
            ovulation_day,
            days_until_next_period: cycle_length - cycle_day + 1,
        }
    };

    observer.phase_calculated(&PhaseCalculation {
        input: *input,
        reference_date,
        effective_cycle_length,
        result,
    });

    result
}

fn phase_for_day(cycle_day: i64, ovulation_day: i64, cycle_length: i64) -> CyclePhase {
    if (1..=MENSTRUAL_LAST_DAY).contains(&cycle_day) {
        CyclePhase::Menstrual
    } else if cycle_day > MENSTRUAL_LAST_DAY && cycle_day <= ovulation_day - 2 {
        CyclePhase::Follicular
    } else if (ovulation_day - 1..=ovulation_day + 1).contains(&cycle_day) {
        CyclePhase::Ovulatory
    } else if (ovulation_day + 2..=cycle_length).contains(&cycle_day) {
        CyclePhase::Luteal
    } else {
        CyclePhase::Unknown
    }
}

/// Ovulation timing is inherently fuzzier than the other bands. An
/// estimated cycle length lowers confidence by exactly one step.
fn phase_confidence(phase: CyclePhase, use_estimated_cycle: bool) -> PhaseConfidence {
    let base = match phase {
        CyclePhase::Menstrual | CyclePhase::Follicular | CyclePhase::Luteal => PhaseConfidence::High,
        CyclePhase::Ovulatory => PhaseConfidence::Medium,
        CyclePhase::Unknown => return PhaseConfidence::Low,
    };
    if use_estimated_cycle {
        base.downgrade()
    } else {
        base
    }
}

/// Phase-only shortcut used by the survey flow.
///
/// Irregular cycles are never mapped onto the calendar model.
pub fn get_cycle_phase(
    last_period: Option<NaiveDate>,
    is_regular: bool,
    cycle_length: u32,
    reference_date: NaiveDate,
) -> CyclePhase {
    if !is_regular || last_period.is_none() {
        return CyclePhase::Unknown;
    }
    calculate_cycle_phase(&CycleInput::new(last_period, Some(cycle_length)), reference_date).phase
}
