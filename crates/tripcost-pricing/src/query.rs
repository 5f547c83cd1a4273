//! Estimate queries.
//!
//! Both queries are posted verbatim to the pricing proxy, so their serialized
//! camelCase shape is part of the proxy contract.

use serde::{Deserialize, Serialize};
use tripcost_core::KID_FARE_MULTIPLIER;

/// Round-trip flight query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightQuery {
    pub origin_code: String,
    pub destination_code: String,
    pub depart_date: String,
    pub return_date: String,
    pub adults: u32,
    pub kids: u32,
    /// True when the trip is described by length rather than exact dates
    pub length_mode: bool,
    pub length_days: u32,
    /// Great-circle distance between the endpoints, when both are geocoded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_miles: Option<f64>,
}

impl FlightQuery {
    /// Headcount with kids weighted at the kid fare multiplier.
    pub fn traveler_weight(&self) -> f64 {
        f64::from(self.adults) + f64::from(self.kids) * KID_FARE_MULTIPLIER
    }
}

/// Lodging query for one stay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LodgingQuery {
    pub destination_code: String,
    pub check_in: String,
    pub check_out: String,
    pub adults: u32,
    pub kids: u32,
    pub nights: u32,
}

impl LodgingQuery {
    pub fn travelers(&self) -> u32 {
        self.adults.saturating_add(self.kids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flight_query_wire_shape() {
        let query = FlightQuery {
            origin_code: "ORF".into(),
            destination_code: "GIG".into(),
            depart_date: "2026-10-30".into(),
            return_date: "2026-11-06".into(),
            adults: 2,
            kids: 1,
            length_mode: false,
            length_days: 7,
            distance_miles: None,
        };

        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["originCode"], "ORF");
        assert_eq!(json["lengthMode"], false);
        assert!(json.get("distanceMiles").is_none());
        assert!((query.traveler_weight() - 2.74).abs() < 1e-9);
    }

    #[test]
    fn test_lodging_query_wire_shape() {
        let query = LodgingQuery {
            destination_code: "LIS".into(),
            check_in: "2026-10-30".into(),
            check_out: "2026-11-06".into(),
            adults: 2,
            kids: 2,
            nights: 6,
        };
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["checkIn"], "2026-10-30");
        assert_eq!(query.travelers(), 4);
    }
}
