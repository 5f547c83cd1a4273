//! Search deep links for flights, hotels, and car rentals.
//!
//! Query parameter names follow what the target sites expect and must not
//! change.

use reqwest::Url;
use tripcost_core::TripForm;

const GOOGLE_FLIGHTS_BASE: &str = "https://www.google.com/travel/flights?hl=en#flt=";
const BOOKING_SEARCH_URL: &str = "https://www.booking.com/searchresults.html";
const GOOGLE_SEARCH_URL: &str = "https://www.google.com/search";

/// Google Flights round-trip search.
pub fn google_flights_url(form: &TripForm, depart: &str, ret: &str) -> String {
    let origin = form.origin.primary_code().unwrap_or_default();
    let destination = form.destination.primary_code().unwrap_or_default();
    let outbound = encode_component(&format!("{origin}.{destination}.{depart}"));
    let inbound = encode_component(&format!("{destination}.{origin}.{ret}"));
    format!("{GOOGLE_FLIGHTS_BASE}{outbound}*{inbound}")
}

/// Booking.com hotel search for the destination city.
pub fn hotels_url(form: &TripForm, check_in: &str, check_out: &str) -> String {
    with_query(
        BOOKING_SEARCH_URL,
        &[
            ("ss", form.destination.city_or_text()),
            ("checkin", check_in),
            ("checkout", check_out),
            ("group_adults", form.adults.to_string().as_str()),
            ("group_children", form.kids.to_string().as_str()),
            ("no_rooms", "1"),
        ],
    )
}

/// Google search for car rentals at the destination.
pub fn car_rentals_url(form: &TripForm, check_in: &str, check_out: &str) -> String {
    let query = format!(
        "{} car rentals {check_in} {check_out}",
        form.destination.city_or_text()
    );
    with_query(GOOGLE_SEARCH_URL, &[("q", query.as_str())])
}

/// Percent-encode one leg of the flight fragment.
fn encode_component(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn with_query(base: &str, pairs: &[(&str, &str)]) -> String {
    match Url::parse(base) {
        Ok(mut url) => {
            url.query_pairs_mut().extend_pairs(pairs.iter().copied());
            url.into()
        }
        Err(e) => {
            tracing::warn!(base, error = %e, "invalid search base url");
            base.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tripcost_core::{LocationInput, LocationKind, LocationSource, ResolvedLocation};

    fn city(code: &str, name: &str) -> LocationInput {
        LocationInput::resolved(ResolvedLocation {
            kind: LocationKind::City,
            label: name.into(),
            city_name: name.into(),
            country: String::new(),
            lat: 0.0,
            lon: 0.0,
            primary_iata: code.into(),
            alternate_iata: vec![],
            source: LocationSource::Dataset,
        })
    }

    fn form() -> TripForm {
        TripForm {
            origin: city("ORF", "Virginia Beach"),
            destination: city("GIG", "Rio de Janeiro"),
            adults: 2,
            kids: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_google_flights_url() {
        let url = google_flights_url(&form(), "2026-10-30", "2026-11-06");
        assert_eq!(
            url,
            "https://www.google.com/travel/flights?hl=en#flt=ORF.GIG.2026-10-30*GIG.ORF.2026-11-06"
        );
    }

    #[test]
    fn test_hotels_url() {
        let url = hotels_url(&form(), "2026-10-30", "2026-11-06");
        assert_eq!(
            url,
            "https://www.booking.com/searchresults.html?ss=Rio+de+Janeiro&checkin=2026-10-30\
             &checkout=2026-11-06&group_adults=2&group_children=1&no_rooms=1"
        );
    }

    #[test]
    fn test_car_rentals_url_falls_back_to_text() {
        let form = TripForm {
            destination: LocationInput::text("Lake Tahoe"),
            ..form()
        };
        let url = car_rentals_url(&form, "2026-10-30", "2026-11-06");
        assert_eq!(
            url,
            "https://www.google.com/search?q=Lake+Tahoe+car+rentals+2026-10-30+2026-11-06"
        );
    }
}
