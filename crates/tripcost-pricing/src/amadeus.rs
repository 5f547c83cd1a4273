//! Amadeus Self-Service tier.
//!
//! Authenticates with the OAuth2 client-credentials flow, then samples flight
//! offers and hotel offers to turn a list of live prices into one
//! representative estimate:
//!
//! - Flights: the 3rd-cheapest of up to 6 offers per date pair, median across
//!   date pairs (up to 3 in length mode, 1 for exact dates)
//! - Lodging: the 5th-cheapest best-rate hotel offer for the stay
//!
//! Without credentials the tier answers `Ok(None)` and never touches the
//! network.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use tokio::sync::Mutex;
use tokio::time::Duration;
use tracing::debug;
use tripcost_core::dates::{add_days, format_date, next_month_date};
use tripcost_core::{FlightEstimate, LodgingEstimate, PriceSource};

use crate::amadeus_types::{FlightOffersResponse, HotelOffersResponse, TokenResponse};
use crate::config::AmadeusConfig;
use crate::error::{PricingError, Result};
use crate::provider::{FlightSource, LodgingSource};
use crate::query::{FlightQuery, LodgingQuery};

const SOURCE_NAME: &str = "amadeus";

pub const FLIGHT_OFFERS_PROVIDER: &str = "Amadeus Flight Offers API";
pub const HOTEL_OFFERS_PROVIDER: &str = "Amadeus Hotel Offers API";

/// Offers requested per flight search.
const MAX_FLIGHT_OFFERS: u32 = 6;

/// Index of the representative flight offer (lower tercile of 6).
const FLIGHT_SAMPLE_INDEX: usize = 2;

/// Index of the representative hotel offer.
const HOTEL_SAMPLE_INDEX: usize = 4;

/// Kid fares weigh this much against an adult when splitting a sampled total.
const KID_PRICE_WEIGHT: f64 = 0.78;

/// Months sampled in length mode.
const LENGTH_MODE_SAMPLES: u32 = 3;

/// Departure day-of-month for length-mode samples.
const SAMPLE_DEPARTURE_DAY: u32 = 10;

/// Tokens are refreshed this long before they expire.
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;

struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Client for Amadeus flight and hotel offers.
pub struct AmadeusClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Option<(String, String)>,
    token: Mutex<Option<CachedToken>>,
}

impl AmadeusClient {
    /// Create a client from config. Credentials are resolved once, here.
    pub fn from_config(config: &AmadeusConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PricingError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials: config.credentials(),
            token: Mutex::new(None),
        })
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Bearer token, fetched or reused from the in-process cache.
    async fn access_token(&self) -> Result<String> {
        let (client_id, client_secret) = self
            .credentials
            .as_ref()
            .ok_or(PricingError::MissingCredentials { provider: "Amadeus" })?;

        // Held across the exchange so concurrent lookups share one token.
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref()
            && token.expires_at > Utc::now()
        {
            return Ok(token.value.clone());
        }

        debug!("requesting Amadeus access token");

        let response = self
            .client
            .post(format!("{}/v1/security/oauth2/token", self.base_url))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", client_id.as_str()),
                ("client_secret", client_secret.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(PricingError::from_http_status(status, &body));
        }

        let token: TokenResponse = response.json().await?;
        if token.access_token.is_empty() {
            return Err(PricingError::invalid_response(SOURCE_NAME, "empty access token"));
        }

        if let Some(expires_in) = token.expires_in {
            let lifetime = (expires_in as i64 - TOKEN_EXPIRY_MARGIN_SECS).max(0);
            *cached = Some(CachedToken {
                value: token.access_token.clone(),
                expires_at: Utc::now() + TimeDelta::seconds(lifetime),
            });
        }

        Ok(token.access_token)
    }

    /// Drop the cached token after the API rejects it.
    async fn invalidate_token(&self) {
        *self.token.lock().await = None;
    }

    /// Representative price for one date pair, or `None` if the search failed
    /// or returned no priced offers.
    async fn sample_flight_offers(
        &self,
        token: &str,
        query: &FlightQuery,
        depart: &str,
        ret: &str,
    ) -> Result<Option<f64>> {
        let mut params = vec![
            ("originLocationCode", query.origin_code.clone()),
            ("destinationLocationCode", query.destination_code.clone()),
            ("departureDate", depart.to_string()),
            ("returnDate", ret.to_string()),
            ("adults", query.adults.max(1).to_string()),
            ("nonStop", "false".to_string()),
            ("max", MAX_FLIGHT_OFFERS.to_string()),
        ];
        if query.kids > 0 {
            params.push(("children", query.kids.to_string()));
        }

        let response = self
            .client
            .get(format!("{}/v2/shopping/flight-offers", self.base_url))
            .bearer_auth(token)
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            if status.as_u16() == 401 {
                self.invalidate_token().await;
            }
            debug!(status = status.as_u16(), depart, ret, "flight offer sample skipped");
            return Ok(None);
        }

        let offers: FlightOffersResponse = response.json().await?;
        Ok(pick_sample(&offers.sorted_totals(), FLIGHT_SAMPLE_INDEX))
    }
}

/// Element at `index`, or the last one when the list is shorter.
fn pick_sample(sorted: &[f64], index: usize) -> Option<f64> {
    sorted.get(index.min(sorted.len().checked_sub(1)?)).copied()
}

/// Upper median: `sorted[len / 2]`.
fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    Some(values[values.len() / 2])
}

/// Date pairs to sample for a flight query.
///
/// Exact mode uses the query's own dates. Length mode departs on the 10th of
/// each of the next three months and returns `length_days` later.
pub fn sample_date_pairs(query: &FlightQuery, today: NaiveDate) -> Vec<(String, String)> {
    if !query.length_mode {
        return vec![(query.depart_date.clone(), query.return_date.clone())];
    }

    (1..=LENGTH_MODE_SAMPLES)
        .map(|offset| {
            let depart = next_month_date(today, offset, SAMPLE_DEPARTURE_DAY);
            let ret = add_days(depart, query.length_days);
            (format_date(depart), format_date(ret))
        })
        .collect()
}

/// Split a party total into adult and kid fares.
///
/// Kids weigh [`KID_PRICE_WEIGHT`] of an adult; a party without kids puts the
/// whole total on the adults.
pub fn split_party_fare(total: f64, adults: u32, kids: u32) -> (f64, f64) {
    let kid_share = if kids > 0 { KID_PRICE_WEIGHT } else { 0.0 };
    let weight = f64::from(adults) + f64::from(kids) * kid_share;
    let per_unit = total / weight.max(1.0);
    (per_unit * f64::from(adults), per_unit * f64::from(kids) * kid_share)
}

#[async_trait]
impl FlightSource for AmadeusClient {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn flight_estimate(&self, query: &FlightQuery) -> Result<Option<FlightEstimate>> {
        if !self.has_credentials() {
            return Ok(None);
        }

        let token = self.access_token().await?;
        let pairs = sample_date_pairs(query, Utc::now().date_naive());

        let mut samples = Vec::with_capacity(pairs.len());
        for (depart, ret) in &pairs {
            if let Some(sample) = self.sample_flight_offers(&token, query, depart, ret).await? {
                samples.push(sample);
            }
        }

        let Some(representative) = median(&mut samples) else {
            return Ok(None);
        };

        debug!(samples = samples.len(), representative, "flight offers sampled");

        let (adult_fare, kid_fare) = split_party_fare(representative, query.adults, query.kids);
        let detail = if query.length_mode {
            "Median sampled across next 3 months for selected trip length"
        } else {
            "Live offer sample for selected exact dates"
        };

        Ok(Some(FlightEstimate::new(
            adult_fare,
            kid_fare,
            PriceSource::api(FLIGHT_OFFERS_PROVIDER, detail),
        )))
    }
}

#[async_trait]
impl LodgingSource for AmadeusClient {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn lodging_estimate(&self, query: &LodgingQuery) -> Result<Option<LodgingEstimate>> {
        if !self.has_credentials() {
            return Ok(None);
        }

        let token = self.access_token().await?;
        let rooms = query.travelers().div_ceil(2).max(1);
        let params = [
            ("cityCode", query.destination_code.clone()),
            ("checkInDate", query.check_in.clone()),
            ("checkOutDate", query.check_out.clone()),
            ("adults", query.adults.max(1).to_string()),
            ("roomQuantity", rooms.to_string()),
            ("bestRateOnly", "true".to_string()),
        ];

        let response = self
            .client
            .get(format!("{}/v3/shopping/hotel-offers", self.base_url))
            .bearer_auth(&token)
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            if status == 401 {
                self.invalidate_token().await;
            }
            let body = response.text().await.unwrap_or_default();
            return Err(PricingError::from_http_status(status, &body));
        }

        let offers: HotelOffersResponse = response.json().await?;
        let Some(stay_total) = pick_sample(&offers.sorted_totals(), HOTEL_SAMPLE_INDEX) else {
            return Ok(None);
        };

        Ok(Some(LodgingEstimate::new(
            stay_total / f64::from(query.nights.max(1)),
            stay_total,
            PriceSource::api(
                HOTEL_OFFERS_PROVIDER,
                "Live hotel offer sample for destination and stay dates",
            ),
        )))
    }
}
