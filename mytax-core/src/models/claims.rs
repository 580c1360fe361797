use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Amounts claimed against relief or deduction ids.
///
/// Ids are not checked on insertion; aggregation ignores any id the catalog
/// does not know. Iteration is ordered by id, so repeated calculations over
/// the same claims visit them in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet(BTreeMap<String, Decimal>);

impl ClaimSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the claim for `id`, replacing any previous amount.
    pub fn insert(
        &mut self,
        id: impl Into<String>,
        amount: Decimal,
    ) -> Option<Decimal> {
        self.0.insert(id.into(), amount)
    }

    pub fn with(
        mut self,
        id: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        self.insert(id, amount);
        self
    }

    pub fn get(
        &self,
        id: &str,
    ) -> Option<Decimal> {
        self.0.get(id).copied()
    }

    /// Claimed amount for `id`, zero when absent.
    pub fn amount(
        &self,
        id: &str,
    ) -> Decimal {
        self.get(id).unwrap_or(Decimal::ZERO)
    }

    pub fn remove(
        &mut self,
        id: &str,
    ) -> Option<Decimal> {
        self.0.remove(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().map(|(id, amount)| (id.as_str(), *amount))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Decimal)> for ClaimSet {
    fn from_iter<T: IntoIterator<Item = (K, Decimal)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
