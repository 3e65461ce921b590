//! Place snapshots supplied by the catalogue.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::InputError;

/// Visit duration assumed when a place does not record one.
pub const DEFAULT_TIME_NEEDED_HRS: f64 = 2.0;

/// Rating assumed when a place has no reviews.
pub const DEFAULT_REVIEW_RATING: f64 = 4.0;

/// Upper bound of the review scale.
pub const MAX_REVIEW_RATING: f64 = 5.0;

/// A place on an itinerary, as read from the place catalogue.
///
/// Coordinates are WGS84 degrees. Optional fields fall back to the catalogue
/// defaults when read through the `effective_*` accessors.
///
/// # Examples
/// ```
/// use waymark_core::Place;
///
/// let place = Place::new("amber", "Amber Fort", 26.9855, 75.8513)
///     .with_category("Fort")
///     .with_entrance_fee(100.0);
///
/// assert_eq!(place.effective_entrance_fee(), 100.0);
/// assert_eq!(place.effective_time_needed_hrs(), 2.0);
/// assert_eq!(place.effective_review_rating(), 4.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Place {
    /// Catalogue identifier.
    pub id: String,
    /// Display name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// State or region, if known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub state: Option<String>,
    /// City, if known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub city: Option<String>,
    /// Category label such as "Fort" or "Beach".
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: Option<String>,
    /// Latitude in degrees.
    #[cfg_attr(feature = "serde", serde(alias = "lat"))]
    pub latitude: f64,
    /// Longitude in degrees.
    #[cfg_attr(feature = "serde", serde(alias = "lon", alias = "lng"))]
    pub longitude: f64,
    /// Entrance fee per person.
    #[cfg_attr(feature = "serde", serde(default))]
    pub entrance_fee: f64,
    /// Hours needed for a visit.
    #[cfg_attr(feature = "serde", serde(default))]
    pub time_needed_hrs: Option<f64>,
    /// Average review rating on a 0–5 scale.
    #[cfg_attr(feature = "serde", serde(default))]
    pub review_rating: Option<f64>,
}

impl Place {
    /// Construct a place with no fee, category or region information.
    pub fn new(id: impl Into<String>, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            state: None,
            city: None,
            category: None,
            latitude,
            longitude,
            entrance_fee: 0.0,
            time_needed_hrs: None,
            review_rating: None,
        }
    }

    /// Set the state or region.
    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Set the city.
    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Set the category label.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the per-person entrance fee.
    #[must_use]
    pub const fn with_entrance_fee(mut self, fee: f64) -> Self {
        self.entrance_fee = fee;
        self
    }

    /// Set the visit duration in hours.
    #[must_use]
    pub const fn with_time_needed_hrs(mut self, hours: f64) -> Self {
        self.time_needed_hrs = Some(hours);
        self
    }

    /// Set the review rating.
    #[must_use]
    pub const fn with_review_rating(mut self, rating: f64) -> Self {
        self.review_rating = Some(rating);
        self
    }

    /// Entrance fee with negative values clamped to zero.
    #[must_use]
    pub fn effective_entrance_fee(&self) -> f64 {
        self.entrance_fee.max(0.0)
    }

    /// Visit duration, defaulting to [`DEFAULT_TIME_NEEDED_HRS`]. Negative
    /// durations count as zero.
    #[must_use]
    pub fn effective_time_needed_hrs(&self) -> f64 {
        self.time_needed_hrs
            .map_or(DEFAULT_TIME_NEEDED_HRS, |hours| hours.max(0.0))
    }

    /// Review rating, defaulting to [`DEFAULT_REVIEW_RATING`] and clamped into
    /// `0.0..=MAX_REVIEW_RATING`.
    #[must_use]
    pub fn effective_review_rating(&self) -> f64 {
        self.review_rating
            .map_or(DEFAULT_REVIEW_RATING, |rating| {
                rating.clamp(0.0, MAX_REVIEW_RATING)
            })
    }

    /// Reject places whose fee, duration or rating is NaN or infinite.
    ///
    /// `index` is the position of the place in the caller's list and is only
    /// used to build the error.
    pub(crate) fn validate_numbers(&self, index: usize) -> Result<(), InputError> {
        let fields = [
            ("entrance fee", Some(self.entrance_fee)),
            ("time needed", self.time_needed_hrs),
            ("review rating", self.review_rating),
        ];
        for (field, value) in fields {
            if value.is_some_and(|number| !number.is_finite()) {
                return Err(InputError::NonFiniteValue {
                    index,
                    id: self.id.clone(),
                    field,
                });
            }
        }
        Ok(())
    }
}

/// Validate the numeric fields of every place in `places`.
pub(crate) fn validate_places(places: &[Place]) -> Result<(), InputError> {
    places
        .iter()
        .enumerate()
        .try_for_each(|(index, place)| place.validate_numbers(index))
}
