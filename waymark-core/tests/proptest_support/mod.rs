//! Proptest strategies for itinerary property tests.

use proptest::prelude::*;
use waymark_core::{Place, Waypoint};

/// Strategy for a waypoint anywhere on the globe.
pub fn waypoint_strategy() -> impl Strategy<Value = Waypoint> {
    (-90.0_f64..=90.0, -180.0_f64..=180.0).prop_filter_map("coordinates in range", |(lat, lon)| {
        Waypoint::new(lat, lon).ok()
    })
}

/// Strategy for `min_count..=max_count` places with non-negative fees.
pub fn place_set_strategy(min_count: usize, max_count: usize) -> impl Strategy<Value = Vec<Place>> {
    proptest::collection::vec(place_strategy(), min_count..=max_count).prop_map(|places| {
        places
            .into_iter()
            .enumerate()
            .map(|(index, mut place)| {
                place.id = format!("place-{index}");
                place
            })
            .collect()
    })
}

fn place_strategy() -> impl Strategy<Value = Place> {
    (
        -60.0_f64..60.0,
        -170.0_f64..170.0,
        0.0_f64..2_000.0,
        proptest::option::of(0.0_f64..8.0),
    )
        .prop_map(|(lat, lon, fee, hours)| {
            let place = Place::new(String::new(), "Generated", lat, lon).with_entrance_fee(fee);
            match hours {
                Some(value) => place.with_time_needed_hrs(value),
                None => place,
            }
        })
}
