//! Descriptive statistics and the tier-independent budget summary for an
//! itinerary.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::budget::usize_as_f64;
use crate::config::validate_rate;
use crate::place::validate_places;
use crate::{ConfigError, EngineConfig, InputError, Place};

/// Bucket for places without a category.
pub const OTHER_CATEGORY: &str = "Other";

/// Bucket for places without a state.
pub const UNKNOWN_STATE: &str = "Unknown";

/// Summary of an itinerary's places.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ItineraryStats {
    /// Number of places.
    pub place_count: usize,
    /// Entrance fees for a single traveller.
    pub total_entrance_fee: f64,
    /// Visit time in hours, rounded to one decimal.
    pub total_time_hrs: f64,
    /// Mean review rating, rounded to one decimal; zero when empty.
    pub average_rating: f64,
    /// Places per category.
    pub category_counts: BTreeMap<String, usize>,
    /// Places per state.
    pub state_counts: BTreeMap<String, usize>,
}

/// Flat rates behind [`DefaultBudgetSummary`].
///
/// # Examples
/// ```
/// use waymark_core::SummaryRates;
///
/// let rates = SummaryRates::default();
/// assert_eq!(rates.travel_per_hour(), 100.0);
/// assert!(SummaryRates::new(-1.0, 1500.0, 500.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryRates {
    travel_per_hour: f64,
    accommodation_per_place: f64,
    food_per_place: f64,
}

impl SummaryRates {
    /// Travel cost per hour of visit time.
    pub const DEFAULT_TRAVEL_PER_HOUR: f64 = 100.0;
    /// Accommodation cost per place.
    pub const DEFAULT_ACCOMMODATION_PER_PLACE: f64 = 1500.0;
    /// Food cost per place.
    pub const DEFAULT_FOOD_PER_PLACE: f64 = 500.0;

    /// Validate and build the rates.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRate`] when a rate is negative or not
    /// finite.
    pub fn new(
        travel_per_hour: f64,
        accommodation_per_place: f64,
        food_per_place: f64,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            travel_per_hour: validate_rate("travel per hour", travel_per_hour)?,
            accommodation_per_place: validate_rate(
                "accommodation per place",
                accommodation_per_place,
            )?,
            food_per_place: validate_rate("food per place", food_per_place)?,
        })
    }

    /// Travel cost per hour of visit time.
    #[must_use]
    pub const fn travel_per_hour(&self) -> f64 {
        self.travel_per_hour
    }

    /// Accommodation cost per place.
    #[must_use]
    pub const fn accommodation_per_place(&self) -> f64 {
        self.accommodation_per_place
    }

    /// Food cost per place.
    #[must_use]
    pub const fn food_per_place(&self) -> f64 {
        self.food_per_place
    }
}

impl Default for SummaryRates {
    fn default() -> Self {
        Self {
            travel_per_hour: Self::DEFAULT_TRAVEL_PER_HOUR,
            accommodation_per_place: Self::DEFAULT_ACCOMMODATION_PER_PLACE,
            food_per_place: Self::DEFAULT_FOOD_PER_PLACE,
        }
    }
}

/// Amounts of the default budget summary.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SummaryBreakdown {
    /// Entrance fees for one traveller.
    pub entrance: f64,
    /// Travel cost derived from visit time.
    pub travel: f64,
    /// Accommodation cost.
    pub accommodation: f64,
    /// Food cost.
    pub food: f64,
    /// Sum of the four categories.
    pub total: f64,
}

/// Whole-number share of the total per category.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SummaryPercentages {
    /// Entrance share.
    pub entrance: f64,
    /// Travel share.
    pub travel: f64,
    /// Accommodation share.
    pub accommodation: f64,
    /// Food share.
    pub food: f64,
}

/// Simplified budget that needs no tier or distance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DefaultBudgetSummary {
    /// Amounts per category.
    pub breakdown: SummaryBreakdown,
    /// Percentages per category.
    pub percentages: SummaryPercentages,
}

/// Computes itinerary statistics.
///
/// # Examples
/// ```
/// use waymark_core::{ItineraryAggregator, Place, SummaryRates};
///
/// let rates = SummaryRates::default();
/// let aggregator = ItineraryAggregator::new(&rates);
/// let places = vec![Place::new("1", "Beach", 15.5, 73.7).with_category("Beach")];
///
/// let stats = aggregator.compute_stats(&places)?;
/// assert_eq!(stats.category_counts.get("Beach"), Some(&1));
/// assert_eq!(stats.state_counts.get("Unknown"), Some(&1));
/// # Ok::<(), waymark_core::InputError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ItineraryAggregator<'a> {
    rates: &'a SummaryRates,
}

impl<'a> ItineraryAggregator<'a> {
    /// Build an aggregator using `rates` for the default summary.
    #[must_use]
    pub const fn new(rates: &'a SummaryRates) -> Self {
        Self { rates }
    }

    /// Build an aggregator from the engine configuration.
    #[must_use]
    pub const fn from_config(config: &'a EngineConfig) -> Self {
        Self::new(&config.summary)
    }

    /// Count, total and average the places.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::NonFiniteValue`] when a place carries a NaN or
    /// infinite number.
    pub fn compute_stats(&self, places: &[Place]) -> Result<ItineraryStats, InputError> {
        validate_places(places)?;
        if places.is_empty() {
            return Ok(ItineraryStats::default());
        }

        let mut stats = ItineraryStats {
            place_count: places.len(),
            ..ItineraryStats::default()
        };
        let mut time_hrs = 0.0;
        let mut rating_sum = 0.0;
        for place in places {
            stats.total_entrance_fee += place.effective_entrance_fee();
            time_hrs += place.effective_time_needed_hrs();
            rating_sum += place.effective_review_rating();
            *stats
                .category_counts
                .entry(bucket(place.category.as_deref(), OTHER_CATEGORY))
                .or_default() += 1;
            *stats
                .state_counts
                .entry(bucket(place.state.as_deref(), UNKNOWN_STATE))
                .or_default() += 1;
        }
        stats.total_time_hrs = round_one_decimal(time_hrs);
        stats.average_rating = round_one_decimal(rating_sum / usize_as_f64(places.len()));
        Ok(stats)
    }

    /// Flat-rate budget from visit time and place count.
    ///
    /// Travel is charged on the rounded total visit time. Percentages are
    /// rounded half away from zero and are all zero when the total is zero.
    ///
    /// # Errors
    ///
    /// As [`Self::compute_stats`].
    pub fn compute_default_budget_summary(
        &self,
        places: &[Place],
    ) -> Result<DefaultBudgetSummary, InputError> {
        let stats = self.compute_stats(places)?;
        let count = usize_as_f64(stats.place_count);
        let entrance = stats.total_entrance_fee;
        let travel = (stats.total_time_hrs * self.rates.travel_per_hour).round();
        let accommodation = count * self.rates.accommodation_per_place;
        let food = count * self.rates.food_per_place;
        let total = entrance + travel + accommodation + food;

        Ok(DefaultBudgetSummary {
            breakdown: SummaryBreakdown {
                entrance,
                travel,
                accommodation,
                food,
                total,
            },
            percentages: SummaryPercentages {
                entrance: percentage(entrance, total),
                travel: percentage(travel, total),
                accommodation: percentage(accommodation, total),
                food: percentage(food, total),
            },
        })
    }
}

fn bucket(value: Option<&str>, missing: &str) -> String {
    value
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .unwrap_or(missing)
        .to_owned()
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn percentage(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        (part / total * 100.0).round()
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn rates() -> SummaryRates {
        SummaryRates::default()
    }

    #[fixture]
    fn itinerary() -> Vec<Place> {
        vec![
            Place::new("1", "Amber Fort", 26.98, 75.85)
                .with_entrance_fee(100.0)
                .with_time_needed_hrs(2.0)
                .with_category("Fort")
                .with_state("Rajasthan")
                .with_review_rating(4.6),
            Place::new("2", "Galta Ji", 26.92, 75.86)
                .with_time_needed_hrs(3.0)
                .with_category("Temple")
                .with_state("Rajasthan")
                .with_review_rating(4.3),
            Place::new("3", "Jal Mahal", 26.95, 75.84)
                .with_entrance_fee(250.0)
                .with_category("  ")
                .with_review_rating(4.4),
        ]
    }

    #[rstest]
    fn totals_fees_and_time(rates: SummaryRates, itinerary: Vec<Place>) {
        let stats = ItineraryAggregator::new(&rates)
            .compute_stats(&itinerary)
            .expect("valid places");

        assert_eq!(stats.place_count, 3);
        assert_eq!(stats.total_entrance_fee, 350.0);
        assert_eq!(stats.total_time_hrs, 7.0);
        assert_eq!(stats.average_rating, 4.4);
    }

    #[rstest]
    fn buckets_blank_labels(rates: SummaryRates, itinerary: Vec<Place>) {
        let stats = ItineraryAggregator::new(&rates)
            .compute_stats(&itinerary)
            .expect("valid places");

        let categories: Vec<(&str, usize)> = stats
            .category_counts
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        assert_eq!(categories, vec![("Fort", 1), ("Other", 1), ("Temple", 1)]);
        assert_eq!(stats.state_counts.get("Rajasthan"), Some(&2));
        assert_eq!(stats.state_counts.get(UNKNOWN_STATE), Some(&1));
    }

    #[rstest]
    fn empty_itinerary_is_all_zero(rates: SummaryRates) {
        let aggregator = ItineraryAggregator::new(&rates);

        let stats = aggregator.compute_stats(&[]).expect("empty is valid");
        let summary = aggregator
            .compute_default_budget_summary(&[])
            .expect("empty is valid");

        assert_eq!(stats, ItineraryStats::default());
        assert_eq!(summary, DefaultBudgetSummary::default());
    }

    #[rstest]
    fn default_summary_uses_flat_rates(rates: SummaryRates, itinerary: Vec<Place>) {
        let summary = ItineraryAggregator::new(&rates)
            .compute_default_budget_summary(&itinerary)
            .expect("valid places");

        assert_eq!(
            summary.breakdown,
            SummaryBreakdown {
                entrance: 350.0,
                travel: 700.0,
                accommodation: 4500.0,
                food: 1500.0,
                total: 7050.0,
            }
        );
        assert_eq!(
            summary.percentages,
            SummaryPercentages {
                entrance: 5.0,
                travel: 10.0,
                accommodation: 64.0,
                food: 21.0,
            }
        );
    }

    #[rstest]
    fn rejects_infinite_fee(rates: SummaryRates) {
        let places = vec![Place::new("x", "Dome", 0.0, 0.0).with_entrance_fee(f64::INFINITY)];

        let err = ItineraryAggregator::new(&rates)
            .compute_stats(&places)
            .expect_err("infinite fee");

        assert!(matches!(err, InputError::NonFiniteValue { index: 0, .. }));
    }

    #[rstest]
    #[case(0.25, 0.3)]
    #[case(4.349_999, 4.3)]
    #[case(0.0, 0.0)]
    fn rounds_to_one_decimal(#[case] raw: f64, #[case] expected: f64) {
        assert_eq!(round_one_decimal(raw), expected);
    }
}
