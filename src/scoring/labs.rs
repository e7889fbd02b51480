//! Lab reference evaluator: plain-language findings for out-of-range labs.

use crate::models::lab::{
    parse_lab_value, DHEA, FASTING_INSULIN, FREE_TESTOSTERONE, GONADOTROPIN_ELEVATED, HBA1C,
    LH_FSH_RATIO_PCOS, TSH,
};
use crate::models::{LabKey, LabValues};

/// Findings for every lab above its threshold, in a fixed order.
/// Missing and non-numeric values are skipped.
pub fn analyze_lab_values(labs: &LabValues) -> Vec<String> {
    let value = |key: LabKey| labs.get(key).and_then(parse_lab_value);
    let mut findings = Vec::new();

    if value(LabKey::FreeT).is_some_and(|v| v > FREE_TESTOSTERONE.high) {
        findings.push("Elevated free testosterone suggests androgen excess".to_string());
    }

    if value(LabKey::Dhea).is_some_and(|v| v > DHEA.high) {
        findings.push("High DHEA can indicate adrenal stress or PCOS".to_string());
    }

    if let (Some(lh), Some(fsh)) = (value(LabKey::Lh), value(LabKey::Fsh)) {
        if lh > GONADOTROPIN_ELEVATED && fsh > GONADOTROPIN_ELEVATED {
            findings.push("Elevated LH and FSH suggest diminished ovarian reserve".to_string());
        } else if lh / fsh > LH_FSH_RATIO_PCOS {
            findings.push("LH/FSH ratio >2 suggests PCOS".to_string());
        }
    }

    if value(LabKey::Tsh).is_some_and(|v| v > TSH.high) {
        findings.push("Elevated TSH suggests hypothyroidism".to_string());
    }

    if value(LabKey::Insulin).is_some_and(|v| v > FASTING_INSULIN.high) {
        findings.push("High insulin suggests insulin resistance".to_string());
    }

    if value(LabKey::Hba1c).is_some_and(|v| v > HBA1C.high) {
        findings.push("Elevated HbA1c suggests blood sugar dysregulation".to_string());
    }

    findings
}
