use serde::{Deserialize, Serialize};

/// Unrecognised string for one of the closed enums below.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid value for {field}: {value}")]
pub struct InvalidEnum {
    pub field: &'static str,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The string form is also the serde wire form.
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(
    /// The six scored imbalance classes. Declaration order is the
    /// tie-break order when ranking.
    HormoneCategory {
        Androgens => "androgens",
        Progesterone => "progesterone",
        Estrogen => "estrogen",
        Thyroid => "thyroid",
        Cortisol => "cortisol",
        Insulin => "insulin",
    }
);

impl HormoneCategory {
    pub const ALL: [HormoneCategory; 6] = [
        HormoneCategory::Androgens,
        HormoneCategory::Progesterone,
        HormoneCategory::Estrogen,
        HormoneCategory::Thyroid,
        HormoneCategory::Cortisol,
        HormoneCategory::Insulin,
    ];
}

str_enum!(
    /// Coarse menstrual cycle stage inferred from days since last period.
    CyclePhase {
        Menstrual => "menstrual",
        Follicular => "follicular",
        Ovulatory => "ovulatory",
        Luteal => "luteal",
        Unknown => "unknown",
    }
);

str_enum!(
    /// How far the calendar model can be trusted for the reported dates.
    PhaseConfidence {
        High => "HIGH",
        Medium => "MEDIUM",
        Low => "LOW",
    }
);

impl PhaseConfidence {
    pub fn downgrade(self) -> Self {
        match self {
            Self::High => Self::Medium,
            Self::Medium | Self::Low => Self::Low,
        }
    }
}

str_enum!(
    /// Strength of evidence behind the reported imbalance.
    ConfidenceLevel {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
);

impl ConfidenceLevel {
    pub fn raise(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium | Self::High => Self::High,
        }
    }

    pub fn lower(self) -> Self {
        match self {
            Self::High => Self::Medium,
            Self::Medium | Self::Low => Self::Low,
        }
    }
}

str_enum!(
    /// Lab tests the survey accepts, keyed by their form field ids.
    LabKey {
        FreeT => "free_t",
        Dhea => "dhea",
        Lh => "lh",
        Fsh => "fsh",
        Tsh => "tsh",
        T3 => "t3",
        Insulin => "insulin",
        Hba1c => "hba1c",
    }
);

impl LabKey {
    pub const ALL: [LabKey; 8] = [
        LabKey::FreeT,
        LabKey::Dhea,
        LabKey::Lh,
        LabKey::Fsh,
        LabKey::Tsh,
        LabKey::T3,
        LabKey::Insulin,
        LabKey::Hba1c,
    ];
}

str_enum!(HormoneTrend {
    Low => "low",
    Rising => "rising",
    High => "high",
    Falling => "falling",
    Unknown => "unknown",
});
