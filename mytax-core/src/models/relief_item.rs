use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Locale;

/// Grouping used for relief catalog display and per-category totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReliefCategory {
    /// Granted to every resident without a claim.
    Automatic,
    Family,
    Medical,
    Education,
    Lifestyle,
    Insurance,
}

impl ReliefCategory {
    pub fn all() -> &'static [ReliefCategory] {
        &[
            ReliefCategory::Automatic,
            ReliefCategory::Family,
            ReliefCategory::Medical,
            ReliefCategory::Education,
            ReliefCategory::Lifestyle,
            ReliefCategory::Insurance,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Automatic => "automatic",
            Self::Family => "family",
            Self::Medical => "medical",
            Self::Education => "education",
            Self::Lifestyle => "lifestyle",
            Self::Insurance => "insurance",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "automatic" => Some(Self::Automatic),
            "family" => Some(Self::Family),
            "medical" => Some(Self::Medical),
            "education" => Some(Self::Education),
            "lifestyle" => Some(Self::Lifestyle),
            "insurance" => Some(Self::Insurance),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Automatic => "Automatic Reliefs",
            Self::Family => "Family & Dependents",
            Self::Medical => "Medical & Health",
            Self::Education => "Education",
            Self::Lifestyle => "Lifestyle",
            Self::Insurance => "Insurance & Savings",
        }
    }
}

/// A statutory personal relief with its annual cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReliefItem {
    pub id: String,
    pub category: ReliefCategory,
    pub name: String,
    pub name_ms: String,
    pub limit: Decimal,
    /// Marks reliefs granted per dependent. The cap is not multiplied by a
    /// dependent count anywhere in the engine.
    pub per_unit: bool,
    pub description: String,
}

impl ReliefItem {
    pub fn display_name(
        &self,
        locale: Locale,
    ) -> &str {
        match locale {
            Locale::En => &self.name,
            Locale::Ms => &self.name_ms,
        }
    }

    pub fn is_automatic(&self) -> bool {
        self.category == ReliefCategory::Automatic
    }
}
