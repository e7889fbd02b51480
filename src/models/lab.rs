use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::enums::LabKey;
use super::survey::LabValues;

/// Physiological reference interval for one lab test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceRange {
    pub low: f64,
    pub high: f64,
    pub unit: &'static str,
}

pub const FREE_TESTOSTERONE: ReferenceRange = ReferenceRange { low: 0.1, high: 2.1, unit: "ng/dL" };
pub const DHEA: ReferenceRange = ReferenceRange { low: 35.0, high: 350.0, unit: "μg/dL" };
pub const LH: ReferenceRange = ReferenceRange { low: 2.4, high: 12.6, unit: "mIU/mL" };
pub const FSH: ReferenceRange = ReferenceRange { low: 3.5, high: 12.5, unit: "mIU/mL" };
pub const TSH: ReferenceRange = ReferenceRange { low: 0.4, high: 4.5, unit: "μIU/mL" };
pub const T3: ReferenceRange = ReferenceRange { low: 2.3, high: 4.2, unit: "pg/mL" };
pub const FASTING_INSULIN: ReferenceRange = ReferenceRange { low: 3.0, high: 25.0, unit: "μIU/mL" };
pub const HBA1C: ReferenceRange = ReferenceRange { low: 4.0, high: 5.7, unit: "%" };

/// LH and FSH both above this (mIU/mL) reads as diminished ovarian reserve.
pub const GONADOTROPIN_ELEVATED: f64 = 10.0;

/// LH/FSH ratio above this reads as a PCOS pattern.
pub const LH_FSH_RATIO_PCOS: f64 = 2.0;

impl LabKey {
    pub fn reference_range(&self) -> ReferenceRange {
        match self {
            Self::FreeT => FREE_TESTOSTERONE,
            Self::Dhea => DHEA,
            Self::Lh => LH,
            Self::Fsh => FSH,
            Self::Tsh => TSH,
            Self::T3 => T3,
            Self::Insulin => FASTING_INSULIN,
            Self::Hba1c => HBA1C,
        }
    }
}

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").unwrap()
});

/// Parse a form-entered lab value. Leading whitespace is ignored and
/// trailing text such as a unit is tolerated ("3.2 ng/dL" → 3.2).
/// Returns `None` for empty or non-numeric input.
pub fn parse_lab_value(raw: &str) -> Option<f64> {
    let m = LEADING_NUMBER.find(raw.trim_start())?;
    m.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Lab values after parsing; absent or non-numeric entries are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericLabs {
    pub free_testosterone: Option<f64>,
    pub dhea: Option<f64>,
    pub lh: Option<f64>,
    pub fsh: Option<f64>,
    pub tsh: Option<f64>,
    pub t3: Option<f64>,
    pub fasting_insulin: Option<f64>,
    pub hba1c: Option<f64>,
}

impl NumericLabs {
    pub fn from_values(labs: &LabValues) -> Self {
        let parsed = |key: LabKey| labs.get(key).and_then(parse_lab_value);
        Self {
            free_testosterone: parsed(LabKey::FreeT),
            dhea: parsed(LabKey::Dhea),
            lh: parsed(LabKey::Lh),
            fsh: parsed(LabKey::Fsh),
            tsh: parsed(LabKey::Tsh),
            t3: parsed(LabKey::T3),
            fasting_insulin: parsed(LabKey::Insulin),
            hba1c: parsed(LabKey::Hba1c),
        }
    }

    pub fn get(&self, key: LabKey) -> Option<f64> {
        match key {
            LabKey::FreeT => self.free_testosterone,
            LabKey::Dhea => self.dhea,
            LabKey::Lh => self.lh,
            LabKey::Fsh => self.fsh,
            LabKey::Tsh => self.tsh,
            LabKey::T3 => self.t3,
            LabKey::Insulin => self.fasting_insulin,
            LabKey::Hba1c => self.hba1c,
        }
    }

    /// Number of labs that parsed to a number.
    pub fn count(&self) -> usize {
        LabKey::ALL.iter().filter(|k| self.get(**k).is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}
