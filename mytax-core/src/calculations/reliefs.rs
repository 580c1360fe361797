//! Relief and business-deduction aggregation.
//!
//! Personal reliefs are clamped to their statutory caps and subtracted from
//! income together with EPF. Business deductions are a separate computation:
//! each claim is scaled by its deduction rate and never clamped here.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::calculations::common::max;
use crate::{ClaimSet, DeductionCategory, RateTable, ReliefCategory};

/// One relief counted towards the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReliefLine {
    pub id: String,
    pub name: String,
    pub category: ReliefCategory,
    /// Amount counted after clamping to `limit`.
    pub amount: Decimal,
    pub limit: Decimal,
    /// The amount originally claimed.
    pub claimed: Decimal,
}

impl ReliefLine {
    pub fn was_clamped(&self) -> bool {
        self.claimed > self.amount
    }
}

/// Income after EPF and reliefs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeableIncome {
    pub gross_income: Decimal,
    pub epf_contribution: Decimal,
    pub total_reliefs: Decimal,
    pub chargeable_income: Decimal,
    pub relief_breakdown: Vec<ReliefLine>,
    /// Claimed ids the catalog does not know, or that cannot be claimed.
    pub unrecognised_claims: Vec<String>,
}

/// Input for [`ReliefAggregator::compute_deduction_totals`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionTotalsRequest {
    pub deduction_claims: ClaimSet,
}

/// A business expense scaled by its deduction rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLine {
    pub id: String,
    pub name: String,
    pub category: DeductionCategory,
    pub claimed: Decimal,
    pub deduction_rate: Decimal,
    pub allowable: Decimal,
    pub limit: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub claimed: Decimal,
    pub allowable: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionTotals {
    pub total_claimed: Decimal,
    pub total_allowable: Decimal,
    pub lines: Vec<DeductionLine>,
    pub by_category: BTreeMap<DeductionCategory, CategoryTotal>,
    pub unrecognised_claims: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct ReliefAggregator<'a> {
    table: &'a RateTable,
}

impl<'a> ReliefAggregator<'a> {
    pub fn new(table: &'a RateTable) -> Self {
        Self { table }
    }

    /// Applies EPF and relief claims to gross income.
    ///
    /// Automatic reliefs are always included at their full amount. Every
    /// positive claim with a known, claimable id is capped at the item's
    /// limit. Unknown ids are skipped and listed in `unrecognised_claims`.
    pub fn compute_chargeable_income(
        &self,
        gross_income: Decimal,
        epf_contribution: Decimal,
        relief_claims: &ClaimSet,
    ) -> ChargeableIncome {
        let mut total_reliefs = Decimal::ZERO;
        let mut relief_breakdown = Vec::new();
        let mut unrecognised_claims = Vec::new();

        for relief in self.table.automatic_reliefs() {
            total_reliefs += relief.limit;
            relief_breakdown.push(ReliefLine {
                id: relief.id.clone(),
                name: relief.name.clone(),
                category: relief.category,
                amount: relief.limit,
                limit: relief.limit,
                claimed: relief.limit,
            });
        }

        for (id, claimed) in relief_claims.iter() {
            if claimed <= Decimal::ZERO {
                continue;
            }
            let Some(relief) = self.table.find_relief(id).filter(|r| !r.is_automatic()) else {
                trace!(relief_id = id, "ignoring claim for unknown relief");
                unrecognised_claims.push(id.to_string());
                continue;
            };

            let amount = claimed.min(relief.limit);
            if amount < claimed {
                debug!(
                    relief_id = id,
                    claimed = %claimed,
                    limit = %relief.limit,
                    "relief claim clamped to limit"
                );
            }

            total_reliefs += amount;
            relief_breakdown.push(ReliefLine {
                id: relief.id.clone(),
                name: relief.name.clone(),
                category: relief.category,
                amount,
                limit: relief.limit,
                claimed,
            });
        }

        let chargeable_income = max(
            gross_income - epf_contribution - total_reliefs,
            Decimal::ZERO,
        );

        ChargeableIncome {
            gross_income,
            epf_contribution,
            total_reliefs,
            chargeable_income,
            relief_breakdown,
            unrecognised_claims,
        }
    }

    /// Totals business expenses at their deduction rates.
    ///
    /// Claims are not clamped to the item's `limit`; unknown ids are skipped.
    /// Totals saturate at [`Decimal::MAX`].
    pub fn compute_deduction_totals(
        &self,
        request: &DeductionTotalsRequest,
    ) -> DeductionTotals {
        let mut totals = DeductionTotals::default();

        for (id, claimed) in request.deduction_claims.iter() {
            if claimed <= Decimal::ZERO {
                continue;
            }
            let Some(item) = self.table.find_deduction(id) else {
                trace!(deduction_id = id, "ignoring claim for unknown deduction");
                totals.unrecognised_claims.push(id.to_string());
                continue;
            };

            let allowable = claimed.saturating_mul(item.deduction_rate);
            totals.total_claimed = totals.total_claimed.saturating_add(claimed);
            totals.total_allowable = totals.total_allowable.saturating_add(allowable);

            let category = totals.by_category.entry(item.category).or_default();
            category.claimed = category.claimed.saturating_add(claimed);
            category.allowable = category.allowable.saturating_add(allowable);

            totals.lines.push(DeductionLine {
                id: item.id.clone(),
                name: item.name.clone(),
                category: item.category,
                claimed,
                deduction_rate: item.deduction_rate,
                allowable,
                limit: item.limit,
            });
        }

        debug!(
            total_claimed = %totals.total_claimed,
            total_allowable = %totals.total_allowable,
            "business deductions totalled"
        );

        totals
    }

    /// Sum of claimed amounts per relief category, for catalog display.
    ///
    /// Amounts are the raw claims of known, claimable reliefs.
    pub fn category_totals(
        &self,
        relief_claims: &ClaimSet,
    ) -> BTreeMap<ReliefCategory, Decimal> {
        let mut totals = BTreeMap::new();
        for (id, claimed) in relief_claims.iter() {
            if let Some(relief) = self.table.find_relief(id).filter(|r| !r.is_automatic()) {
                let total = totals.entry(relief.category).or_insert(Decimal::ZERO);
                *total = total.saturating_add(claimed);
            }
        }
        totals
    }
}
