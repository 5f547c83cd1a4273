//! Building estimate queries from a trip form.

use tripcost_core::{DurationMode, TripForm};
use tripcost_pricing::{FlightQuery, LodgingQuery};

use crate::road_trip::route_distance_miles;

/// Flight query for the form, or `None` while either code is unresolved.
///
/// Dates may be empty for offline estimates.
pub fn flight_query(form: &TripForm, days: u32, depart: &str, ret: &str) -> Option<FlightQuery> {
    Some(FlightQuery {
        origin_code: form.origin.primary_code()?.to_string(),
        destination_code: form.destination.primary_code()?.to_string(),
        depart_date: depart.to_string(),
        return_date: ret.to_string(),
        adults: form.adults,
        kids: form.kids,
        length_mode: form.duration_mode == DurationMode::Length,
        length_days: days,
        distance_miles: route_distance_miles(form),
    })
}

/// Flight query used only to size the sanity floor; codes may be empty.
pub fn floor_query(form: &TripForm, days: u32) -> FlightQuery {
    FlightQuery {
        origin_code: form.origin.primary_code().unwrap_or_default().to_string(),
        destination_code: form.destination.primary_code().unwrap_or_default().to_string(),
        depart_date: String::new(),
        return_date: String::new(),
        adults: form.adults,
        kids: form.kids,
        length_mode: form.duration_mode == DurationMode::Length,
        length_days: days,
        distance_miles: route_distance_miles(form),
    }
}

/// Lodging query for the form, or `None` while the destination is unresolved.
pub fn lodging_query(form: &TripForm, nights: u32, check_in: &str, check_out: &str) -> Option<LodgingQuery> {
    Some(LodgingQuery {
        destination_code: form.destination.primary_code()?.to_string(),
        check_in: check_in.to_string(),
        check_out: check_out.to_string(),
        adults: form.adults,
        kids: form.kids,
        nights,
    })
}
