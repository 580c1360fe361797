use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionCategory {
    Operations,
    Marketing,
    Assets,
    Other,
    SmeOnly,
}

impl DeductionCategory {
    pub fn all() -> &'static [DeductionCategory] {
        &[
            DeductionCategory::Operations,
            DeductionCategory::Marketing,
            DeductionCategory::Assets,
            DeductionCategory::Other,
            DeductionCategory::SmeOnly,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Operations => "operations",
            Self::Marketing => "marketing",
            Self::Assets => "assets",
            Self::Other => "other",
            Self::SmeOnly => "sme_only",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "operations" => Some(Self::Operations),
            "marketing" => Some(Self::Marketing),
            "assets" => Some(Self::Assets),
            "other" => Some(Self::Other),
            "sme_only" => Some(Self::SmeOnly),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Operations => "Operations",
            Self::Marketing => "Marketing & Entertainment",
            Self::Assets => "Assets & Equipment",
            Self::Other => "Other Deductions",
            Self::SmeOnly => "SME Special Incentives",
        }
    }
}

/// An allowable business expense and the rate at which it is deductible.
///
/// `deduction_rate` is a multiplier on the amount spent: 1.0 for a full
/// deduction, 0.5 for entertainment, 2.0 for double deductions, or a capital
/// allowance fraction such as 0.2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionItem {
    pub id: String,
    pub category: DeductionCategory,
    pub name: String,
    pub name_ms: String,
    pub deduction_rate: Decimal,
    /// Statutory ceiling on the expense. Shown to the user, not enforced
    /// by the deduction totals.
    pub limit: Option<Decimal>,
    /// Ceiling expressed as a fraction of aggregate income.
    pub limit_percent: Option<Decimal>,
    pub sme_only: bool,
    pub description: String,
}

impl DeductionItem {
    pub fn display_name(
        &self,
        locale: Locale,
    ) -> &str {
        match locale {
            Locale::En => &self.name,
            Locale::Ms => &self.name_ms,
        }
    }

    /// Human readable rate, e.g. `100%`, `200% (Double)`, `20% CA`.
    pub fn rate_label(&self) -> String {
        let percent = (self.deduction_rate * Decimal::ONE_HUNDRED).normalize();
        if self.deduction_rate == Decimal::ONE || self.deduction_rate == Decimal::new(5, 1) {
            format!("{percent}%")
        } else if self.deduction_rate == Decimal::TWO {
            format!("{percent}% (Double)")
        } else {
            format!("{percent}% CA")
        }
    }
}
