//! Score adjuster: reconciles symptom-derived scores with lab values.
//!
//! Every rule reads the symptom scores as they were passed in and writes
//! to a separate copy, so rule order never changes which rules fire.

use serde::{Deserialize, Serialize};

use crate::models::lab::{
    DHEA, FASTING_INSULIN, FREE_TESTOSTERONE, GONADOTROPIN_ELEVATED, HBA1C, LH_FSH_RATIO_PCOS,
    T3, TSH,
};
use crate::models::{HormoneCategory, HormoneScores, NumericLabs};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabAdjustment {
    pub adjusted_scores: HormoneScores,
    /// Confirmation and conflict notes, one per rule that fired.
    pub conflicts: Vec<String>,
}

pub fn adjust_scores_with_labs(symptom_scores: &HormoneScores, labs: &NumericLabs) -> LabAdjustment {
    use HormoneCategory::*;

    let prior = symptom_scores;
    let mut adjusted = *symptom_scores;
    let mut conflicts = Vec::new();

    if let Some(value) = labs.free_testosterone {
        let unit = FREE_TESTOSTERONE.unit;
        if value > FREE_TESTOSTERONE.high {
            if prior.androgens > 0 {
                adjusted.add(Androgens, 2);
                conflicts.push(format!(
                    "Lab confirms high testosterone ({value} {unit}) - strengthens androgen imbalance assessment"
                ));
            } else {
                adjusted.add(Androgens, 1);
                conflicts.push(format!(
                    "High testosterone ({value} {unit}) detected despite minimal symptoms - consider subclinical androgen excess"
                ));
            }
        } else if value < FREE_TESTOSTERONE.low && prior.androgens > 3 {
            adjusted.add(Androgens, -2);
            conflicts.push(format!(
                "Low testosterone ({value} {unit}) conflicts with androgen symptoms - may indicate different underlying cause"
            ));
        }
    }

    if let Some(value) = labs.dhea {
        let unit = DHEA.unit;
        if value > DHEA.high {
            if prior.cortisol > 0 {
                adjusted.add(Cortisol, 1);
                conflicts.push(format!(
                    "High DHEA ({value} {unit}) suggests adrenal stress - supports cortisol imbalance"
                ));
            }
            if prior.androgens > 0 {
                adjusted.add(Androgens, 1);
                conflicts.push(format!("High DHEA ({value} {unit}) can contribute to androgen excess"));
            }
        } else if value < DHEA.low && prior.cortisol > 0 {
            adjusted.add(Cortisol, 1);
            conflicts.push(format!(
                "Low DHEA ({value} {unit}) suggests adrenal fatigue - supports cortisol imbalance"
            ));
        }
    }

    if let (Some(lh), Some(fsh)) = (labs.lh, labs.fsh) {
        let ratio = lh / fsh;
        if ratio > LH_FSH_RATIO_PCOS {
            if prior.androgens > 0 {
                adjusted.add(Androgens, 2);
                conflicts.push(format!(
                    "LH/FSH ratio of {ratio:.1} strongly suggests PCOS - significantly strengthens androgen imbalance assessment"
                ));
            }
            if prior.insulin > 0 {
                adjusted.add(Insulin, 1);
                conflicts.push(format!(
                    "PCOS pattern (LH/FSH ratio {ratio:.1}) typically involves insulin resistance"
                ));
            }
        } else if lh > GONADOTROPIN_ELEVATED && fsh > GONADOTROPIN_ELEVATED && prior.estrogen > 0 {
            adjusted.add(Estrogen, 1);
            conflicts.push(format!(
                "Elevated LH ({lh}) and FSH ({fsh}) suggest diminished ovarian reserve - may indicate low estrogen"
            ));
        }
    }

    if let Some(value) = labs.tsh {
        let unit = TSH.unit;
        if value > TSH.high {
            if prior.thyroid > 0 {
                adjusted.add(Thyroid, 2);
                conflicts.push(format!(
                    "Elevated TSH ({value} {unit}) confirms hypothyroidism - significantly strengthens thyroid imbalance assessment"
                ));
            } else {
                adjusted.add(Thyroid, 1);
                conflicts.push(format!(
                    "Elevated TSH ({value} {unit}) detected despite minimal symptoms - consider subclinical hypothyroidism"
                ));
            }
        } else if value < TSH.low && prior.thyroid > 0 {
            adjusted.add(Thyroid, -1);
            conflicts.push(format!(
                "Low TSH ({value} {unit}) suggests hyperthyroidism - conflicts with hypothyroid symptoms"
            ));
        }
    }

    if let Some(value) = labs.t3 {
        if value < T3.low && prior.thyroid > 0 {
            adjusted.add(Thyroid, 1);
            conflicts.push(format!("Low T3 ({value} {}) supports thyroid dysfunction", T3.unit));
        }
    }

    if let Some(value) = labs.fasting_insulin {
        let unit = FASTING_INSULIN.unit;
        if value > FASTING_INSULIN.high {
            if prior.insulin > 0 {
                adjusted.add(Insulin, 2);
                conflicts.push(format!(
                    "High fasting insulin ({value} {unit}) confirms insulin resistance - significantly strengthens insulin imbalance assessment"
                ));
            } else {
                adjusted.add(Insulin, 1);
                conflicts.push(format!(
                    "High fasting insulin ({value} {unit}) detected despite minimal symptoms - consider subclinical insulin resistance"
                ));
            }
        } else if value < FASTING_INSULIN.low && prior.insulin > 3 {
            adjusted.add(Insulin, -1);
            conflicts.push(format!(
                "Low fasting insulin ({value} {unit}) conflicts with insulin resistance symptoms"
            ));
        }
    }

    if let Some(value) = labs.hba1c {
        if value > HBA1C.high && prior.insulin > 0 {
            adjusted.add(Insulin, 1);
            conflicts.push(format!(
                "Elevated HbA1c ({value}{}) confirms blood sugar dysregulation - supports insulin imbalance",
                HBA1C.unit
            ));
        }
    }

    LabAdjustment {
        adjusted_scores: adjusted.clamped(),
        conflicts,
    }
}
