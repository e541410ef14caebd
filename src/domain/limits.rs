//! Per-category spending ceilings.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{category::Category, transaction::validated_amount};
use crate::errors::TrackerError;

/// Mapping from category to a positive monthly ceiling. Absent means "no limit".
///
/// Iteration follows [`Category`] declaration order, which makes the
/// "first exceeded limit" check deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LimitsMap(BTreeMap<Category, Decimal>);

impl LimitsMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets or overwrites a limit, rounding to currency units.
    pub fn set(&mut self, category: Category, amount: Decimal) -> Result<Decimal, TrackerError> {
        let amount = validated_amount(amount)
            .map_err(|_| TrackerError::validation("Limit must be a positive amount."))?;
        self.0.insert(category, amount);
        Ok(amount)
    }

    /// Removes a limit, returning the previous value if any.
    pub fn clear(&mut self, category: Category) -> Option<Decimal> {
        self.0.remove(&category)
    }

    pub fn clear_all(&mut self) {
        self.0.clear();
    }

    pub fn get(&self, category: Category) -> Option<Decimal> {
        self.0.get(&category).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, Decimal)> + '_ {
        self.0.iter().map(|(category, amount)| (*category, *amount))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Category, Decimal)> for LimitsMap {
    fn from_iter<I: IntoIterator<Item = (Category, Decimal)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_rounds_and_overwrites() {
        let mut limits = LimitsMap::new();
        limits.set(Category::Transport, Decimal::new(100_005, 3)).unwrap();
        assert_eq!(limits.get(Category::Transport), Some(Decimal::new(10001, 2)));
        limits.set(Category::Transport, Decimal::new(50, 0)).unwrap();
        assert_eq!(limits.get(Category::Transport), Some(Decimal::new(50, 0)));
        assert_eq!(limits.len(), 1);
    }

    #[test]
    fn non_positive_limits_are_rejected() {
        let mut limits = LimitsMap::new();
        assert!(limits.set(Category::Other, Decimal::ZERO).is_err());
        assert!(limits.is_empty());
    }

    #[test]
    fn iteration_follows_category_order() {
        let mut limits = LimitsMap::new();
        limits.set(Category::Other, Decimal::ONE).unwrap();
        limits.set(Category::Necessities, Decimal::ONE).unwrap();
        limits.set(Category::Subscriptions, Decimal::ONE).unwrap();
        let order: Vec<_> = limits.iter().map(|(category, _)| category).collect();
        assert_eq!(
            order,
            vec![Category::Necessities, Category::Subscriptions, Category::Other]
        );
    }

    #[test]
    fn serializes_as_label_keyed_object() {
        let mut limits = LimitsMap::new();
        limits.set(Category::FoodAndDrinks, Decimal::new(200, 0)).unwrap();
        let json = serde_json::to_string(&limits).unwrap();
        assert_eq!(json, r#"{"Food & Drinks":200.0}"#);
        let back: LimitsMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, limits);
    }
}
