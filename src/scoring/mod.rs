//! Rule-based scoring engine.
//!
//! Everything here is a pure function of its inputs. The cycle
//! calculator takes its reference date as an argument rather than
//! reading the clock.

pub mod adjust;
pub mod assess;
pub mod cycle;
pub mod labs;
pub mod phase_context;
pub mod symptoms;

pub use adjust::{adjust_scores_with_labs, LabAdjustment};
pub use assess::{assess, assess_observed};
pub use cycle::{
    calculate_cycle_phase, calculate_cycle_phase_observed, get_cycle_phase, parse_period_date,
    CycleInput, PhaseObserver, TracingPhaseObserver,
};
pub use labs::analyze_lab_values;
pub use symptoms::score_symptoms;
