//! Tiered, group-scaled trip budgets.
//!
//! The model is a pure function of the place list, the travel distance, a
//! tier and the group size. Entrance fees and food scale with the group,
//! accommodation scales with rooms, and transport is a single shared vehicle.
//! A fixed share of the subtotal is added for miscellaneous costs.

use std::num::NonZeroU32;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::validate_rate;
use crate::place::validate_places;
use crate::{BudgetTier, ConfigError, EngineConfig, InputError, Place, TierTable};

/// Heuristics used to derive nights, rooms and the miscellaneous surcharge.
///
/// # Examples
/// ```
/// use waymark_core::BudgetParameters;
///
/// let params = BudgetParameters::new(3, 2, 0.15)?;
/// assert_eq!(params.places_per_night().get(), 3);
/// assert!(BudgetParameters::new(0, 2, 0.2).is_err());
/// # Ok::<(), waymark_core::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetParameters {
    places_per_night: NonZeroU32,
    travellers_per_room: NonZeroU32,
    misc_rate: f64,
}

impl BudgetParameters {
    /// Places visited per night of accommodation.
    pub const DEFAULT_PLACES_PER_NIGHT: NonZeroU32 = NonZeroU32::MIN.saturating_add(1);
    /// Travellers sharing one room.
    pub const DEFAULT_TRAVELLERS_PER_ROOM: NonZeroU32 = NonZeroU32::MIN.saturating_add(1);
    /// Miscellaneous surcharge as a fraction of the subtotal.
    pub const DEFAULT_MISC_RATE: f64 = 0.2;

    /// Validate and build the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroCount`] when either count is zero and
    /// [`ConfigError::InvalidRate`] when `misc_rate` is negative or not
    /// finite.
    pub fn new(
        places_per_night: u32,
        travellers_per_room: u32,
        misc_rate: f64,
    ) -> Result<Self, ConfigError> {
        let places_per_night = NonZeroU32::new(places_per_night).ok_or(ConfigError::ZeroCount {
            field: "places per night",
        })?;
        let travellers_per_room =
            NonZeroU32::new(travellers_per_room).ok_or(ConfigError::ZeroCount {
                field: "travellers per room",
            })?;
        let misc_rate = validate_rate("misc rate", misc_rate)?;
        Ok(Self {
            places_per_night,
            travellers_per_room,
            misc_rate,
        })
    }

    /// Places visited per night of accommodation.
    #[must_use]
    pub const fn places_per_night(&self) -> NonZeroU32 {
        self.places_per_night
    }

    /// Travellers sharing one room.
    #[must_use]
    pub const fn travellers_per_room(&self) -> NonZeroU32 {
        self.travellers_per_room
    }

    /// Miscellaneous surcharge rate.
    #[must_use]
    pub const fn misc_rate(&self) -> f64 {
        self.misc_rate
    }

    /// Nights of accommodation for `place_count` places; never fewer than one.
    #[must_use]
    pub fn nights(&self, place_count: usize) -> u64 {
        let count = u64::try_from(place_count).unwrap_or(u64::MAX);
        count
            .div_ceil(u64::from(self.places_per_night.get()))
            .max(1)
    }

    /// Rooms needed for `group_size` travellers.
    #[must_use]
    pub const fn rooms(&self, group_size: NonZeroU32) -> u32 {
        group_size.get().div_ceil(self.travellers_per_room.get())
    }
}

impl Default for BudgetParameters {
    fn default() -> Self {
        Self {
            places_per_night: Self::DEFAULT_PLACES_PER_NIGHT,
            travellers_per_room: Self::DEFAULT_TRAVELLERS_PER_ROOM,
            misc_rate: Self::DEFAULT_MISC_RATE,
        }
    }
}

/// Itemised cost of a trip under one tier.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BudgetBreakdown {
    /// Entrance fees for the whole group.
    pub entrance_total: f64,
    /// Shared vehicle cost for the route.
    pub transport_total: f64,
    /// Rooms for every night.
    pub accommodation_total: f64,
    /// Food for every traveller and place.
    pub food_total: f64,
    /// Miscellaneous surcharge on the four categories above.
    pub misc_total: f64,
    /// Sum of every category including the surcharge.
    pub grand_total: f64,
    /// Grand total divided by the group size.
    pub per_person: f64,
    /// How much cheaper this is than the premium tier; never negative.
    pub savings_vs_premium: f64,
    /// Nights of accommodation charged.
    pub nights: u64,
    /// Rooms booked per night.
    pub rooms: u32,
}

/// A breakdown labelled with the tier that produced it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TierBudget {
    /// Tier identifier.
    pub tier_id: String,
    /// Tier display name.
    pub tier_name: String,
    /// Costs under this tier.
    pub breakdown: BudgetBreakdown,
}

/// Computes budgets against a tier table.
///
/// # Examples
/// ```
/// use waymark_core::{BudgetModel, BudgetParameters, Place, TierTable};
///
/// let tiers = TierTable::standard();
/// let params = BudgetParameters::default();
/// let model = BudgetModel::new(&tiers, &params);
/// let places = vec![Place::new("a", "Lake", 10.0, 76.0).with_entrance_fee(50.0)];
///
/// let luxury = model.compute_budget_for_tier(&places, 30.0, "luxury", 1)?;
/// assert_eq!(luxury.savings_vs_premium, 0.0);
/// # Ok::<(), waymark_core::InputError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BudgetModel<'a> {
    tiers: &'a TierTable,
    params: &'a BudgetParameters,
}

impl<'a> BudgetModel<'a> {
    /// Build a model over `tiers` using `params`.
    #[must_use]
    pub const fn new(tiers: &'a TierTable, params: &'a BudgetParameters) -> Self {
        Self { tiers, params }
    }

    /// Build a model from the engine configuration.
    #[must_use]
    pub const fn from_config(config: &'a EngineConfig) -> Self {
        Self::new(&config.tiers, &config.budget)
    }

    /// The tier table in use.
    #[must_use]
    pub const fn tiers(&self) -> &'a TierTable {
        self.tiers
    }

    /// Check the parts of a request that do not depend on the travel
    /// distance, so callers can reject it before routing.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::ZeroGroupSize`] for an empty group and
    /// [`InputError::NonFiniteValue`] when a place carries a NaN or infinite
    /// number.
    pub fn validate_request(places: &[Place], group_size: u32) -> Result<(), InputError> {
        Request::validate(places, 0.0, group_size).map(|_| ())
    }

    /// Compute the budget for `places` under `tier`.
    ///
    /// Savings are measured against the premium tier of the model's table.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::ZeroGroupSize`] for an empty group,
    /// [`InputError::InvalidDistance`] for a negative or non-finite
    /// distance, and [`InputError::NonFiniteValue`] when a place carries a
    /// NaN or infinite number.
    pub fn compute_budget(
        &self,
        places: &[Place],
        distance_km: f64,
        tier: &BudgetTier,
        group_size: u32,
    ) -> Result<BudgetBreakdown, InputError> {
        let request = Request::validate(places, distance_km, group_size)?;
        let mut breakdown = self.breakdown(&request, tier);
        let premium = self.breakdown(&request, self.tiers.premium());
        breakdown.savings_vs_premium = (premium.grand_total - breakdown.grand_total).max(0.0);
        Ok(breakdown)
    }

    /// Compute the budget for the tier whose id matches `tier_id`, ignoring
    /// case.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::UnknownTier`] when no tier matches, otherwise
    /// as [`Self::compute_budget`].
    pub fn compute_budget_for_tier(
        &self,
        places: &[Place],
        distance_km: f64,
        tier_id: &str,
        group_size: u32,
    ) -> Result<BudgetBreakdown, InputError> {
        let tier = self
            .tiers
            .get(tier_id)
            .ok_or_else(|| InputError::UnknownTier {
                id: tier_id.to_owned(),
            })?;
        self.compute_budget(places, distance_km, tier, group_size)
    }

    /// Compute one budget per tier, cheapest first.
    ///
    /// # Errors
    ///
    /// As [`Self::compute_budget`].
    pub fn compare_tiers(
        &self,
        places: &[Place],
        distance_km: f64,
        group_size: u32,
    ) -> Result<Vec<TierBudget>, InputError> {
        let request = Request::validate(places, distance_km, group_size)?;
        let premium_total = self.breakdown(&request, self.tiers.premium()).grand_total;
        Ok(self
            .tiers
            .iter()
            .map(|tier| {
                let mut breakdown = self.breakdown(&request, tier);
                breakdown.savings_vs_premium = (premium_total - breakdown.grand_total).max(0.0);
                TierBudget {
                    tier_id: tier.id.clone(),
                    tier_name: tier.name.clone(),
                    breakdown,
                }
            })
            .collect())
    }

    fn breakdown(&self, request: &Request, tier: &BudgetTier) -> BudgetBreakdown {
        let group = f64::from(request.group_size.get());
        let nights = self.params.nights(request.place_count);
        let rooms = self.params.rooms(request.group_size);

        let entrance_total = request.fee_total * group;
        let transport_total = request.distance_km * tier.transport_cost_per_km;
        let accommodation_total =
            u64_as_f64(nights) * tier.accommodation_per_night * f64::from(rooms);
        let food_total = usize_as_f64(request.place_count) * tier.food_per_day * group;
        let subtotal = entrance_total + transport_total + accommodation_total + food_total;
        let misc_total = subtotal * self.params.misc_rate;
        let grand_total = subtotal + misc_total;

        BudgetBreakdown {
            entrance_total,
            transport_total,
            accommodation_total,
            food_total,
            misc_total,
            grand_total,
            per_person: grand_total / group,
            savings_vs_premium: 0.0,
            nights,
            rooms,
        }
    }
}

/// Validated inputs shared by every tier of one request.
struct Request {
    place_count: usize,
    fee_total: f64,
    distance_km: f64,
    group_size: NonZeroU32,
}

impl Request {
    fn validate(places: &[Place], distance_km: f64, group_size: u32) -> Result<Self, InputError> {
        let group_size = NonZeroU32::new(group_size).ok_or(InputError::ZeroGroupSize)?;
        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(InputError::InvalidDistance { value: distance_km });
        }
        validate_places(places)?;
        let fee_total = places
            .iter()
            .fold(0.0, |total, place| total + place.effective_entrance_fee());
        Ok(Self {
            place_count: places.len(),
            fee_total,
            distance_km,
            group_size,
        })
    }
}

/// Convert a count to `f64`, saturating above `u32::MAX`.
pub(crate) fn usize_as_f64(count: usize) -> f64 {
    u32::try_from(count).map_or(f64::from(u32::MAX), f64::from)
}

fn u64_as_f64(count: u64) -> f64 {
    u32::try_from(count).map_or(f64::from(u32::MAX), f64::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn tiers() -> TierTable {
        TierTable::standard()
    }

    #[fixture]
    fn three_places() -> Vec<Place> {
        vec![
            Place::new("1", "Fort", 26.91, 75.82).with_entrance_fee(100.0),
            Place::new("2", "Palace", 26.92, 75.82).with_entrance_fee(150.0),
            Place::new("3", "Garden", 26.93, 75.81).with_entrance_fee(50.0),
        ]
    }

    #[rstest]
    fn moderate_group_of_four(tiers: TierTable, three_places: Vec<Place>) {
        let params = BudgetParameters::default();
        let model = BudgetModel::new(&tiers, &params);

        let breakdown = model
            .compute_budget_for_tier(&three_places, 120.0, "moderate", 4)
            .expect("valid request");

        assert_eq!(breakdown.entrance_total, 1200.0);
        assert_eq!(breakdown.nights, 2);
        assert_eq!(breakdown.rooms, 2);
        assert_eq!(breakdown.accommodation_total, 6000.0);
        assert_eq!(breakdown.food_total, 14400.0);
        assert_eq!(breakdown.transport_total, 1440.0);
        assert!((breakdown.misc_total - 4608.0).abs() < 1e-9);
        assert!((breakdown.grand_total - 27648.0).abs() < 1e-9);
        assert!((breakdown.per_person - 6912.0).abs() < 1e-9);
    }

    #[rstest]
    fn zero_places_still_charges_one_night(tiers: TierTable) {
        let params = BudgetParameters::default();
        let model = BudgetModel::new(&tiers, &params);

        let breakdown = model
            .compute_budget_for_tier(&[], 0.0, "budget", 1)
            .expect("empty itinerary is valid");

        assert_eq!(breakdown.nights, 1);
        assert_eq!(breakdown.accommodation_total, 800.0);
        assert_eq!(breakdown.food_total, 0.0);
        assert!((breakdown.grand_total - 960.0).abs() < 1e-9);
    }

    #[rstest]
    fn premium_tier_saves_nothing(tiers: TierTable, three_places: Vec<Place>) {
        let params = BudgetParameters::default();
        let model = BudgetModel::new(&tiers, &params);

        let luxury = model
            .compute_budget(&three_places, 80.0, tiers.premium(), 3)
            .expect("valid request");

        assert_eq!(luxury.savings_vs_premium, 0.0);
    }

    #[rstest]
    fn comparison_lists_every_tier_with_savings(tiers: TierTable, three_places: Vec<Place>) {
        let params = BudgetParameters::default();
        let model = BudgetModel::new(&tiers, &params);

        let budgets = model
            .compare_tiers(&three_places, 120.0, 2)
            .expect("valid request");

        let ids: Vec<&str> = budgets.iter().map(|b| b.tier_id.as_str()).collect();
        assert_eq!(ids, vec!["budget", "moderate", "luxury"]);
        let premium_total = budgets
            .last()
            .map(|b| b.breakdown.grand_total)
            .expect("three tiers");
        for budget in &budgets {
            let expected = premium_total - budget.breakdown.grand_total;
            assert!((budget.breakdown.savings_vs_premium - expected).abs() < 1e-9);
        }
    }

    #[rstest]
    fn tier_lookup_ignores_case(tiers: TierTable, three_places: Vec<Place>) {
        let params = BudgetParameters::default();
        let model = BudgetModel::new(&tiers, &params);

        let upper = model.compute_budget_for_tier(&three_places, 10.0, "MODERATE", 2);
        let lower = model.compute_budget_for_tier(&three_places, 10.0, "moderate", 2);

        assert_eq!(upper, lower);
    }

    #[rstest]
    #[case::zero_group(0, 10.0, InputError::ZeroGroupSize)]
    #[case::negative_distance(2, -1.0, InputError::InvalidDistance { value: -1.0 })]
    fn rejects_invalid_requests(
        tiers: TierTable,
        three_places: Vec<Place>,
        #[case] group_size: u32,
        #[case] distance_km: f64,
        #[case] expected: InputError,
    ) {
        let params = BudgetParameters::default();
        let model = BudgetModel::new(&tiers, &params);

        let err = model
            .compute_budget_for_tier(&three_places, distance_km, "budget", group_size)
            .expect_err("invalid request");

        assert_eq!(err, expected);
    }

    #[rstest]
    fn rejects_nan_distance(tiers: TierTable) {
        let params = BudgetParameters::default();
        let model = BudgetModel::new(&tiers, &params);

        let err = model
            .compute_budget_for_tier(&[], f64::NAN, "budget", 1)
            .expect_err("NaN distance");

        assert!(matches!(err, InputError::InvalidDistance { .. }));
    }

    #[rstest]
    fn unknown_tier_is_reported(tiers: TierTable) {
        let params = BudgetParameters::default();
        let model = BudgetModel::new(&tiers, &params);

        let err = model
            .compute_budget_for_tier(&[], 1.0, "backpacker", 1)
            .expect_err("no such tier");

        assert_eq!(
            err,
            InputError::UnknownTier {
                id: "backpacker".to_owned()
            }
        );
    }

    #[rstest]
    #[case::zero_group(vec![Place::new("a", "Fort", 26.98, 75.85)], 0)]
    #[case::nan_fee(vec![Place::new("a", "Fort", 26.98, 75.85).with_entrance_fee(f64::NAN)], 2)]
    fn request_checks_run_without_a_distance(#[case] places: Vec<Place>, #[case] group_size: u32) {
        assert!(BudgetModel::validate_request(&places, group_size).is_err());
    }

    #[rstest]
    fn valid_request_passes_the_early_check(three_places: Vec<Place>) {
        assert_eq!(BudgetModel::validate_request(&three_places, 3), Ok(()));
    }

    #[rstest]
    fn tuned_parameters_change_nights_rooms_and_misc(tiers: TierTable, three_places: Vec<Place>) {
        let params = BudgetParameters::new(1, 3, 0.0).expect("valid parameters");
        let model = BudgetModel::new(&tiers, &params);

        let breakdown = model
            .compute_budget_for_tier(&three_places, 0.0, "budget", 4)
            .expect("valid request");

        assert_eq!(breakdown.nights, 3);
        assert_eq!(breakdown.rooms, 2);
        assert_eq!(breakdown.misc_total, 0.0);
    }

    #[rstest]
    fn negative_fees_are_ignored(tiers: TierTable) {
        let params = BudgetParameters::default();
        let model = BudgetModel::new(&tiers, &params);
        let places = vec![Place::new("x", "Shrine", 0.0, 0.0).with_entrance_fee(-40.0)];

        let breakdown = model
            .compute_budget_for_tier(&places, 0.0, "budget", 2)
            .expect("valid request");

        assert_eq!(breakdown.entrance_total, 0.0);
    }
}
