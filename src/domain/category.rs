//! The closed set of labels used to bucket transactions for reporting.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reporting bucket attached to every transaction.
///
/// The declaration order is significant: summaries pre-seed categories in this
/// order and limit checks walk the [`crate::domain::LimitsMap`] in this order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Category {
    #[serde(rename = "Necessities")]
    Necessities,
    #[serde(rename = "Unnecessary")]
    Unnecessary,
    #[serde(rename = "Food & Drinks")]
    FoodAndDrinks,
    #[serde(rename = "Transport")]
    Transport,
    #[serde(rename = "Subscriptions")]
    Subscriptions,
    #[serde(rename = "Health & Fitness")]
    HealthAndFitness,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Savings/Investing")]
    SavingsAndInvesting,
    #[default]
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Necessities,
        Category::Unnecessary,
        Category::FoodAndDrinks,
        Category::Transport,
        Category::Subscriptions,
        Category::HealthAndFitness,
        Category::Entertainment,
        Category::SavingsAndInvesting,
        Category::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Necessities => "Necessities",
            Category::Unnecessary => "Unnecessary",
            Category::FoodAndDrinks => "Food & Drinks",
            Category::Transport => "Transport",
            Category::Subscriptions => "Subscriptions",
            Category::HealthAndFitness => "Health & Fitness",
            Category::Entertainment => "Entertainment",
            Category::SavingsAndInvesting => "Savings/Investing",
            Category::Other => "Other",
        }
    }

    /// Case-insensitive lookup by label. Unknown labels yield `None`.
    pub fn from_label(raw: &str) -> Option<Category> {
        let needle = raw.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(needle))
    }

    /// Maps any unrecognised label to [`Category::Other`].
    ///
    /// This is the only place an unknown label is silently accepted; it backs
    /// bulk import, where a bad category must not reject the whole record.
    pub fn coerce(raw: Option<&str>) -> Category {
        raw.and_then(Category::from_label).unwrap_or(Category::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_roundtrip_through_lookup() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.label()), Some(category));
        }
        assert_eq!(
            Category::from_label("  food & drinks "),
            Some(Category::FoodAndDrinks)
        );
        assert_eq!(Category::from_label("Groceries"), None);
    }

    #[test]
    fn coerce_falls_back_to_other() {
        assert_eq!(Category::coerce(Some("Transport")), Category::Transport);
        assert_eq!(Category::coerce(Some("Pets")), Category::Other);
        assert_eq!(Category::coerce(None), Category::Other);
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&Category::SavingsAndInvesting).unwrap();
        assert_eq!(json, "\"Savings/Investing\"");
        let parsed: Category = serde_json::from_str("\"Health & Fitness\"").unwrap();
        assert_eq!(parsed, Category::HealthAndFitness);
    }
}
