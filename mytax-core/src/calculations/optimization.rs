//! Suggestions for reliefs with unused headroom.
//!
//! Only the high-impact reliefs listed in the rate table are considered. A
//! suggestion is raised when the unused portion of the cap is material and
//! claiming it in full would cut resident tax by more than the minimum saving.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::calculations::common::max;
use crate::calculations::personal::PersonalTaxEngine;
use crate::{ClaimSet, RateTable};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationSuggestion {
    pub relief_id: String,
    pub name: String,
    pub claimed: Decimal,
    pub limit: Decimal,
    pub remaining: Decimal,
    /// Resident tax avoided by claiming `remaining` in full.
    pub saving: Decimal,
}

#[derive(Debug, Clone, Copy)]
pub struct OptimizationEngine<'a> {
    table: &'a RateTable,
}

impl<'a> OptimizationEngine<'a> {
    pub fn new(table: &'a RateTable) -> Self {
        Self { table }
    }

    /// Resident tax on `chargeable_income` less the tax once `additional_relief`
    /// is also deducted.
    pub fn calculate_relief_savings(
        &self,
        additional_relief: Decimal,
        chargeable_income: Decimal,
    ) -> Decimal {
        let personal = PersonalTaxEngine::new(self.table);
        let current = personal.resident_tax(chargeable_income);
        let reduced = personal.resident_tax(max(chargeable_income - additional_relief, Decimal::ZERO));
        current - reduced
    }

    /// Suggestions ordered by descending saving, ties by relief id.
    pub fn suggest(
        &self,
        relief_claims: &ClaimSet,
        chargeable_income: Decimal,
    ) -> Vec<OptimizationSuggestion> {
        let rules = &self.table.config().optimization;
        let mut suggestions = Vec::new();

        for id in &rules.high_impact_reliefs {
            let Some(relief) = self.table.find_relief(id) else {
                continue;
            };

            let claimed = relief_claims.amount(id);
            let remaining = relief.limit - claimed;
            if remaining <= rules.materiality_threshold {
                continue;
            }

            let saving = self.calculate_relief_savings(remaining, chargeable_income);
            if saving <= rules.minimum_saving {
                trace!(relief_id = %id, saving = %saving, "saving below minimum");
                continue;
            }

            suggestions.push(OptimizationSuggestion {
                relief_id: relief.id.clone(),
                name: relief.name.clone(),
                claimed,
                limit: relief.limit,
                remaining,
                saving,
            });
        }

        suggestions.sort_by(|a, b| match b.saving.cmp(&a.saving) {
            Ordering::Equal => a.relief_id.cmp(&b.relief_id),
            other => other,
        });
        suggestions
    }
}
