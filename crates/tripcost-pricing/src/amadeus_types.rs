//! Amadeus Self-Service API wire types.
//!
//! Only the fields the estimator reads are modelled; everything else in the
//! offer payloads is ignored.

use serde::Deserialize;
use serde_json::Value;

use crate::amount::parse_amount;

/// OAuth2 client-credentials token response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// `GET /v2/shopping/flight-offers` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightOffersResponse {
    #[serde(default)]
    pub data: Vec<FlightOffer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightOffer {
    #[serde(default)]
    pub price: Option<FlightOfferPrice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOfferPrice {
    /// Decimal string such as `"1234.56"`
    #[serde(default)]
    pub grand_total: Option<Value>,
}

impl FlightOffersResponse {
    /// Positive grand totals, ascending.
    pub fn sorted_totals(&self) -> Vec<f64> {
        sorted_positive(
            self.data
                .iter()
                .filter_map(|offer| offer.price.as_ref())
                .filter_map(|price| parse_amount(price.grand_total.as_ref())),
        )
    }
}

/// `GET /v3/shopping/hotel-offers` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HotelOffersResponse {
    #[serde(default)]
    pub data: Vec<HotelOffers>,
}

/// One hotel and its offers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HotelOffers {
    #[serde(default)]
    pub offers: Vec<HotelOffer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HotelOffer {
    #[serde(default)]
    pub price: Option<HotelOfferPrice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HotelOfferPrice {
    /// Whole-stay total
    #[serde(default)]
    pub total: Option<Value>,
}

impl HotelOffersResponse {
    /// Positive stay totals across every hotel, ascending.
    pub fn sorted_totals(&self) -> Vec<f64> {
        sorted_positive(
            self.data
                .iter()
                .flat_map(|hotel| hotel.offers.iter())
                .filter_map(|offer| offer.price.as_ref())
                .filter_map(|price| parse_amount(price.total.as_ref())),
        )
    }
}

fn sorted_positive(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut values: Vec<f64> = values.filter(|v| v.is_finite() && *v > 0.0).collect();
    values.sort_by(f64::total_cmp);
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flight_offer_totals() {
        let response: FlightOffersResponse = serde_json::from_value(json!({
            "data": [
                { "price": { "grandTotal": "950.10", "currency": "USD" } },
                { "price": { "grandTotal": "0" } },
                { "price": {} },
                {},
                { "price": { "grandTotal": "812.00" } }
            ],
            "meta": { "count": 5 }
        }))
        .unwrap();
        assert_eq!(response.sorted_totals(), vec![812.0, 950.1]);
    }

    #[test]
    fn test_hotel_offer_totals_flatten() {
        let response: HotelOffersResponse = serde_json::from_value(json!({
            "data": [
                { "hotel": { "name": "A" }, "offers": [{ "price": { "total": "700" } }] },
                { "offers": [{ "price": { "total": "500" } }, { "price": { "total": "bad" } }] },
                { "offers": [] }
            ]
        }))
        .unwrap();
        assert_eq!(response.sorted_totals(), vec![500.0, 700.0]);
    }

    #[test]
    fn test_empty_response() {
        let response: FlightOffersResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.sorted_totals().is_empty());
    }
}
