use serde::{Deserialize, Serialize};

/// Tax residency for the year of assessment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Residency {
    #[default]
    Resident,
    NonResident,
}

impl Residency {
    pub fn from_resident_flag(is_resident: bool) -> Self {
        if is_resident {
            Self::Resident
        } else {
            Self::NonResident
        }
    }

    pub fn is_resident(&self) -> bool {
        matches!(self, Self::Resident)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resident => "resident",
            Self::NonResident => "non-resident",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    #[default]
    Single,
    Married,
}

impl MaritalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Married => "married",
        }
    }
}
