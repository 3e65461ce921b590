//! Budget tiers: named cost profiles applied by the budget model.
//!
//! A [`TierTable`] is validated once when constructed and is read-only
//! afterwards. Tiers are stored cheapest first and every cost coefficient is
//! non-decreasing along the table, so the last tier is the premium tier and
//! budgets can never get cheaper as the tier rises.

use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named cost profile.
///
/// # Examples
/// ```
/// use waymark_core::BudgetTier;
///
/// let tier = BudgetTier::new("moderate", "Moderate", 12.0, 1500.0, 1200.0);
/// assert_eq!(tier.transport_cost_per_km, 12.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BudgetTier {
    /// Stable identifier, e.g. `"moderate"`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Transport cost per kilometre for the shared vehicle.
    pub transport_cost_per_km: f64,
    /// Accommodation cost per room per night.
    pub accommodation_per_night: f64,
    /// Food cost per person per day.
    pub food_per_day: f64,
}

impl BudgetTier {
    /// Construct a tier.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        transport_cost_per_km: f64,
        accommodation_per_night: f64,
        food_per_day: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            transport_cost_per_km,
            accommodation_per_night,
            food_per_day,
        }
    }

    fn coefficients(&self) -> [(&'static str, f64); 3] {
        [
            ("transport cost per km", self.transport_cost_per_km),
            ("accommodation per night", self.accommodation_per_night),
            ("food per day", self.food_per_day),
        ]
    }

    /// Whether no coefficient of `self` exceeds the matching one in `other`.
    fn is_at_most(&self, other: &Self) -> bool {
        self.coefficients()
            .iter()
            .zip(other.coefficients())
            .all(|((_, mine), (_, theirs))| *mine <= theirs)
    }
}

/// Errors returned by [`TierTable::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TierTableError {
    /// No tiers were supplied.
    #[error("tier table must contain at least one tier")]
    Empty,
    /// Two tiers share an id (compared case-insensitively).
    #[error("tier id '{id}' appears more than once")]
    DuplicateId {
        /// Repeated identifier.
        id: String,
    },
    /// A coefficient was negative, NaN or infinite.
    #[error("tier '{id}' has an invalid {field}")]
    InvalidCoefficient {
        /// Offending tier.
        id: String,
        /// Name of the coefficient.
        field: &'static str,
    },
    /// A tier costs less than the tier before it in at least one category.
    #[error("tier '{higher}' must not be cheaper than '{lower}' in any category")]
    NotAscending {
        /// The earlier, cheaper tier.
        lower: String,
        /// The later tier that undercuts it.
        higher: String,
    },
}

/// Immutable, validated table of budget tiers ordered cheapest first.
///
/// # Examples
/// ```
/// use waymark_core::TierTable;
///
/// let table = TierTable::standard();
/// assert_eq!(table.premium().id, "luxury");
/// assert_eq!(table.get("Moderate").map(|t| t.food_per_day), Some(1200.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<BudgetTier>", into = "Vec<BudgetTier>")
)]
pub struct TierTable {
    lower: Vec<BudgetTier>,
    premium: BudgetTier,
}

impl TierTable {
    /// Validate `tiers` (cheapest first) and build a table.
    pub fn new(tiers: Vec<BudgetTier>) -> Result<Self, TierTableError> {
        validate_coefficients(&tiers)?;
        validate_unique_ids(&tiers)?;
        validate_ascending(&tiers)?;
        let mut lower = tiers;
        let premium = lower.pop().ok_or(TierTableError::Empty)?;
        Ok(Self { lower, premium })
    }

    /// The Budget / Moderate / Luxury table used when no table is configured.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            lower: vec![
                BudgetTier::new("budget", "Budget", 8.0, 800.0, 600.0),
                BudgetTier::new("moderate", "Moderate", 12.0, 1500.0, 1200.0),
            ],
            premium: BudgetTier::new("luxury", "Luxury", 20.0, 4000.0, 2500.0),
        }
    }

    /// The highest-cost tier, used as the savings baseline.
    #[must_use]
    pub const fn premium(&self) -> &BudgetTier {
        &self.premium
    }

    /// Look up a tier by id, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&BudgetTier> {
        self.iter().find(|tier| tier.id.eq_ignore_ascii_case(id))
    }

    /// Iterate over the tiers, cheapest first.
    pub fn iter(&self) -> impl Iterator<Item = &BudgetTier> {
        self.lower.iter().chain(std::iter::once(&self.premium))
    }

    /// Number of tiers in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lower.len() + 1
    }

    /// Always `false`; a table holds at least one tier.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<BudgetTier>> for TierTable {
    type Error = TierTableError;

    fn try_from(tiers: Vec<BudgetTier>) -> Result<Self, Self::Error> {
        Self::new(tiers)
    }
}

impl From<TierTable> for Vec<BudgetTier> {
    fn from(table: TierTable) -> Self {
        let mut tiers = table.lower;
        tiers.push(table.premium);
        tiers
    }
}

fn validate_coefficients(tiers: &[BudgetTier]) -> Result<(), TierTableError> {
    for tier in tiers {
        if let Some((field, _)) = tier
            .coefficients()
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(TierTableError::InvalidCoefficient {
                id: tier.id.clone(),
                field,
            });
        }
    }
    Ok(())
}

fn validate_unique_ids(tiers: &[BudgetTier]) -> Result<(), TierTableError> {
    let mut seen = HashSet::new();
    for tier in tiers {
        if !seen.insert(tier.id.to_ascii_lowercase()) {
            return Err(TierTableError::DuplicateId {
                id: tier.id.clone(),
            });
        }
    }
    Ok(())
}

fn validate_ascending(tiers: &[BudgetTier]) -> Result<(), TierTableError> {
    for window in tiers.windows(2) {
        if let [lower, higher] = window
            && !lower.is_at_most(higher)
        {
            return Err(TierTableError::NotAscending {
                lower: lower.id.clone(),
                higher: higher.id.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn standard_table_is_valid() {
        let tiers: Vec<BudgetTier> = TierTable::standard().into();
        let rebuilt = TierTable::new(tiers).expect("standard table validates");
        assert_eq!(rebuilt, TierTable::standard());
    }

    #[rstest]
    fn empty_table_is_rejected() {
        assert_eq!(TierTable::new(Vec::new()), Err(TierTableError::Empty));
    }

    #[rstest]
    fn single_tier_is_its_own_premium() {
        let table = TierTable::new(vec![BudgetTier::new("only", "Only", 1.0, 2.0, 3.0)])
            .expect("single tier is valid");
        assert_eq!(table.premium().id, "only");
        assert_eq!(table.len(), 1);
    }

    #[rstest]
    fn duplicate_ids_are_rejected_case_insensitively() {
        let err = TierTable::new(vec![
            BudgetTier::new("basic", "Basic", 1.0, 1.0, 1.0),
            BudgetTier::new("BASIC", "Basic again", 2.0, 2.0, 2.0),
        ])
        .expect_err("duplicate ids");
        assert_eq!(
            err,
            TierTableError::DuplicateId {
                id: "BASIC".to_owned()
            }
        );
    }

    #[rstest]
    #[case(-1.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn invalid_coefficients_are_rejected(#[case] value: f64) {
        let err = TierTable::new(vec![BudgetTier::new("x", "X", 1.0, value, 1.0)])
            .expect_err("invalid coefficient");
        assert_eq!(
            err,
            TierTableError::InvalidCoefficient {
                id: "x".to_owned(),
                field: "accommodation per night",
            }
        );
    }

    #[rstest]
    fn tiers_must_ascend_in_every_category() {
        let err = TierTable::new(vec![
            BudgetTier::new("a", "A", 10.0, 500.0, 500.0),
            BudgetTier::new("b", "B", 12.0, 400.0, 900.0),
        ])
        .expect_err("accommodation decreases");
        assert_eq!(
            err,
            TierTableError::NotAscending {
                lower: "a".to_owned(),
                higher: "b".to_owned(),
            }
        );
    }

    #[rstest]
    fn iteration_is_cheapest_first() {
        let table = TierTable::standard();
        let ids: Vec<&str> = table.iter().map(|tier| tier.id.as_str()).collect();
        assert_eq!(ids, vec!["budget", "moderate", "luxury"]);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn deserialisation_validates_the_table() {
        let json = r#"[
            {"id": "cheap", "name": "Cheap", "transportCostPerKm": 5, "accommodationPerNight": 900, "foodPerDay": 400},
            {"id": "dear", "name": "Dear", "transportCostPerKm": 4, "accommodationPerNight": 1000, "foodPerDay": 500}
        ]"#;
        assert!(serde_json::from_str::<TierTable>(json).is_err());
    }
}
