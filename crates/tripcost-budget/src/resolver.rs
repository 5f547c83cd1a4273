//! Turning free-text locations into airport codes.
//!
//! The calculator only needs `resolved.primary_iata`; anything implementing
//! [`LocationResolver`] can provide it. [`CatalogResolver`] is the built-in
//! implementation backed by a static catalog of commercial airports.
//!
//! Resolution order for text input:
//!
//! 1. An exact IATA code (`"lis"`, `"GIG"`) resolves to that airport
//! 2. Otherwise the best-ranked suggestion wins. Cities come before airports
//!    at the same rank; a city with several airports becomes a metro location
//!    (`"Rio de Janeiro (All airports)"`) whose primary code is its busiest
//!    airport
//!
//! Coordinates without a code resolve through
//! [`CatalogResolver::resolve_coordinates`].

use std::collections::BTreeMap;
use std::sync::LazyLock;

use async_trait::async_trait;
use tripcost_core::{GeoPoint, LocationInput, LocationKind, LocationSource, ResolvedLocation, haversine_km};

/// Resolves a location input to something with a primary airport code.
#[async_trait]
pub trait LocationResolver: Send + Sync {
    /// Resolve `input`, passing already-resolved input through.
    ///
    /// Returns `None` for empty or unrecognized text.
    async fn resolve(&self, input: &LocationInput) -> Option<LocationInput>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AirportSize {
    Large,
    Medium,
}

/// A catalog airport.
#[derive(Debug, Clone, Copy)]
pub struct Airport {
    pub iata: &'static str,
    pub name: &'static str,
    pub city: &'static str,
    /// State or region code; empty where not used
    pub state: &'static str,
    pub country: &'static str,
    pub lat: f64,
    pub lon: f64,
    size: AirportSize,
    international: bool,
    importance: u32,
}

impl Airport {
    pub fn is_large(&self) -> bool {
        self.size == AirportSize::Large
    }

    fn weight(&self) -> u32 {
        let intl = if self.international { 180 } else { 0 };
        let size = match self.size {
            AirportSize::Large => 250,
            AirportSize::Medium => 120,
        };
        self.importance + intl + size
    }

    fn resolved(&self) -> ResolvedLocation {
        ResolvedLocation {
            kind: LocationKind::Airport,
            label: format!("{} ({})", self.name, self.iata),
            city_name: self.city.to_string(),
            country: self.country.to_string(),
            lat: self.lat,
            lon: self.lon,
            primary_iata: self.iata.to_string(),
            alternate_iata: Vec::new(),
            source: LocationSource::Dataset,
        }
    }
}

macro_rules! airport {
    ($iata:literal, $name:literal, $city:literal, $state:literal, $country:literal,
     $lat:literal, $lon:literal, $size:ident, $intl:literal, $importance:literal) => {
        Airport {
            iata: $iata,
            name: $name,
            city: $city,
            state: $state,
            country: $country,
            lat: $lat,
            lon: $lon,
            size: AirportSize::$size,
            international: $intl,
            importance: $importance,
        }
    };
}

const US: &str = "United States";

#[rustfmt::skip]
static AIRPORTS: &[Airport] = &[
    airport!("ORF", "Norfolk International", "Norfolk", "VA", "United States", 36.8946, -76.2012, Medium, false, 300),
    airport!("PHF", "Newport News/Williamsburg International", "Newport News", "VA", "United States", 37.1319, -76.4930, Medium, false, 120),
    airport!("RIC", "Richmond International", "Richmond", "VA", "United States", 37.5052, -77.3197, Medium, false, 260),
    airport!("IAD", "Washington Dulles International", "Washington", "DC", "United States", 38.9531, -77.4565, Large, true, 800),
    airport!("DCA", "Ronald Reagan Washington National", "Washington", "DC", "United States", 38.8512, -77.0402, Large, false, 700),
    airport!("BWI", "Baltimore/Washington International", "Baltimore", "MD", "United States", 39.1754, -76.6683, Large, true, 650),
    airport!("JFK", "John F. Kennedy International", "New York", "NY", "United States", 40.6413, -73.7781, Large, true, 1000),
    airport!("LGA", "LaGuardia", "New York", "NY", "United States", 40.7769, -73.8740, Large, false, 800),
    airport!("EWR", "Newark Liberty International", "Newark", "NJ", "United States", 40.6895, -74.1745, Large, true, 850),
    airport!("BOS", "Logan International", "Boston", "MA", "United States", 42.3656, -71.0096, Large, true, 800),
    airport!("ATL", "Hartsfield-Jackson Atlanta International", "Atlanta", "GA", "United States", 33.6407, -84.4277, Large, true, 1000),
    airport!("ORD", "O'Hare International", "Chicago", "IL", "United States", 41.9742, -87.9073, Large, true, 950),
    airport!("MDW", "Chicago Midway International", "Chicago", "IL", "United States", 41.7868, -87.7522, Large, false, 500),
    airport!("MIA", "Miami International", "Miami", "FL", "United States", 25.7959, -80.2870, Large, true, 850),
    airport!("MCO", "Orlando International", "Orlando", "FL", "United States", 28.4312, -81.3081, Large, true, 800),
    airport!("DEN", "Denver International", "Denver", "CO", "United States", 39.8561, -104.6737, Large, true, 900),
    airport!("DFW", "Dallas/Fort Worth International", "Dallas", "TX", "United States", 32.8998, -97.0403, Large, true, 950),
    airport!("AUS", "Austin-Bergstrom International", "Austin", "TX", "United States", 30.1975, -97.6664, Large, true, 550),
    airport!("BNA", "Nashville International", "Nashville", "TN", "United States", 36.1263, -86.6774, Large, true, 550),
    airport!("LAS", "Harry Reid International", "Las Vegas", "NV", "United States", 36.0840, -115.1537, Large, true, 750),
    airport!("ABQ", "Albuquerque International Sunport", "Albuquerque", "NM", "United States", 35.0402, -106.6090, Medium, false, 250),
    airport!("LAX", "Los Angeles International", "Los Angeles", "CA", "United States", 33.9416, -118.4085, Large, true, 1000),
    airport!("SFO", "San Francisco International", "San Francisco", "CA", "United States", 37.6213, -122.3790, Large, true, 900),
    airport!("SEA", "Seattle-Tacoma International", "Seattle", "WA", "United States", 47.4502, -122.3088, Large, true, 850),
    airport!("HNL", "Daniel K. Inouye International", "Honolulu", "HI", "United States", 21.3187, -157.9225, Large, true, 600),
    airport!("YYZ", "Toronto Pearson International", "Toronto", "ON", "Canada", 43.6777, -79.6248, Large, true, 850),
    airport!("MEX", "Mexico City International", "Mexico City", "", "Mexico", 19.4361, -99.0719, Large, true, 850),
    airport!("CUN", "Cancun International", "Cancun", "", "Mexico", 21.0365, -86.8771, Large, true, 700),
    airport!("GIG", "Rio de Janeiro-Galeao International", "Rio de Janeiro", "RJ", "Brazil", -22.8090, -43.2506, Large, true, 700),
    airport!("SDU", "Santos Dumont", "Rio de Janeiro", "RJ", "Brazil", -22.9105, -43.1631, Medium, false, 300),
    airport!("GRU", "Sao Paulo/Guarulhos International", "Sao Paulo", "SP", "Brazil", -23.4356, -46.4731, Large, true, 850),
    airport!("LHR", "Heathrow", "London", "", "United Kingdom", 51.4700, -0.4543, Large, true, 1000),
    airport!("LGW", "Gatwick", "London", "", "United Kingdom", 51.1537, -0.1821, Large, true, 750),
    airport!("DUB", "Dublin", "Dublin", "", "Ireland", 53.4264, -6.2499, Large, true, 650),
    airport!("CDG", "Charles de Gaulle", "Paris", "", "France", 49.0097, 2.5479, Large, true, 950),
    airport!("ORY", "Orly", "Paris", "", "France", 48.7262, 2.3652, Large, true, 600),
    airport!("AMS", "Amsterdam Schiphol", "Amsterdam", "", "Netherlands", 52.3105, 4.7683, Large, true, 900),
    airport!("FRA", "Frankfurt", "Frankfurt", "", "Germany", 50.0379, 8.5622, Large, true, 900),
    airport!("LIS", "Humberto Delgado", "Lisbon", "", "Portugal", 38.7742, -9.1342, Large, true, 700),
    airport!("MAD", "Adolfo Suarez Madrid-Barajas", "Madrid", "", "Spain", 40.4983, -3.5676, Large, true, 800),
    airport!("BCN", "Josep Tarradellas Barcelona-El Prat", "Barcelona", "", "Spain", 41.2974, 2.0833, Large, true, 750),
    airport!("FCO", "Leonardo da Vinci-Fiumicino", "Rome", "", "Italy", 41.8003, 12.2389, Large, true, 800),
    airport!("CIA", "Ciampino", "Rome", "", "Italy", 41.7994, 12.5949, Medium, true, 200),
    airport!("DXB", "Dubai International", "Dubai", "", "United Arab Emirates", 25.2532, 55.3657, Large, true, 950),
    airport!("BKK", "Suvarnabhumi", "Bangkok", "", "Thailand", 13.6900, 100.7501, Large, true, 850),
    airport!("DMK", "Don Mueang International", "Bangkok", "", "Thailand", 13.9126, 100.6068, Large, true, 500),
    airport!("SIN", "Singapore Changi", "Singapore", "", "Singapore", 1.3644, 103.9915, Large, true, 950),
    airport!("HKG", "Hong Kong International", "Hong Kong", "", "Hong Kong", 22.3080, 113.9185, Large, true, 900),
    airport!("ICN", "Incheon International", "Seoul", "", "South Korea", 37.4602, 126.4407, Large, true, 900),
    airport!("HND", "Haneda", "Tokyo", "", "Japan", 35.5494, 139.7798, Large, true, 900),
    airport!("NRT", "Narita International", "Tokyo", "", "Japan", 35.7720, 140.3929, Large, true, 850),
    airport!("KIX", "Kansai International", "Osaka", "", "Japan", 34.4320, 135.2304, Large, true, 650),
    airport!("SYD", "Sydney Kingsford Smith", "Sydney", "NSW", "Australia", -33.9399, 151.1753, Large, true, 850),
];

/// Full names for the US state codes used in the catalog.
const US_STATE_NAMES: &[(&str, &str)] = &[
    ("CA", "California"),
    ("CO", "Colorado"),
    ("DC", "District of Columbia"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("IL", "Illinois"),
    ("MA", "Massachusetts"),
    ("MD", "Maryland"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NV", "Nevada"),
    ("NY", "New York"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
];

/// Airports sharing a city, busiest first.
#[derive(Debug)]
struct CityGroup {
    city: &'static str,
    state: &'static str,
    country: &'static str,
    lat: f64,
    lon: f64,
    airports: Vec<&'static Airport>,
}

impl CityGroup {
    fn weight(&self) -> u32 {
        self.airports.iter().map(|a| a.weight()).sum()
    }

    fn is_metro(&self) -> bool {
        self.airports.len() >= 2
    }

    fn label(&self) -> String {
        let base = if self.country == US {
            format!("{}, {}", self.city, self.state)
        } else {
            self.city.to_string()
        };
        if self.is_metro() {
            format!("{base} (All airports)")
        } else {
            base
        }
    }

    fn resolved(&self) -> Option<ResolvedLocation> {
        let (primary, rest) = self.airports.split_first()?;
        Some(ResolvedLocation {
            kind: LocationKind::City,
            label: self.label(),
            city_name: self.city.to_string(),
            country: self.country.to_string(),
            lat: self.lat,
            lon: self.lon,
            primary_iata: primary.iata.to_string(),
            alternate_iata: rest.iter().take(2).map(|a| a.iata.to_string()).collect(),
            source: LocationSource::Dataset,
        })
    }
}

static CITY_GROUPS: LazyLock<Vec<CityGroup>> = LazyLock::new(|| {
    let mut grouped: BTreeMap<(String, String, String), Vec<&'static Airport>> = BTreeMap::new();
    for airport in AIRPORTS {
        let key = (normalize(airport.city), normalize(airport.state), normalize(airport.country));
        grouped.entry(key).or_default().push(airport);
    }

    grouped
        .into_values()
        .map(|mut airports| {
            airports.sort_by(|a, b| b.weight().cmp(&a.weight()));
            let count = airports.len() as f64;
            let lat = airports.iter().map(|a| a.lat).sum::<f64>() / count;
            let lon = airports.iter().map(|a| a.lon).sum::<f64>() / count;
            let top = airports[0];
            CityGroup {
                city: top.city,
                state: top.state,
                country: top.country,
                lat,
                lon,
                airports,
            }
        })
        .collect()
});

/// Suggestion kind; cities sort before airports at equal rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SuggestionGroup {
    City,
    Airport,
}

/// A ranked autocomplete candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub group: SuggestionGroup,
    pub primary_label: String,
    pub secondary_label: String,
    pub resolved: ResolvedLocation,
    /// 0 = prefix match, 1 = substring match
    pub rank: u8,
    pub weight: u32,
}

const NO_MATCH: u8 = 9;

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Lowercase, drop "(all airports)" and punctuation, collapse whitespace.
fn normalize_lookup_text(value: &str) -> String {
    normalize(value)
        .replace("(all airports)", "")
        .replace(['(', ')', ','], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn state_label(state: &'static str, country: &str) -> &'static str {
    if country != US {
        return state;
    }
    US_STATE_NAMES
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(state))
        .map(|(_, name)| *name)
        .unwrap_or(state)
}

/// 0 when a field starts with the query, 1 when either contains the other.
fn rank_match(query: &str, fields: &[&str]) -> u8 {
    if query.is_empty() {
        return 0;
    }
    let fields: Vec<String> = fields.iter().map(|f| normalize(f)).filter(|f| !f.is_empty()).collect();
    if fields.iter().any(|f| f.starts_with(query)) {
        0
    } else if fields.iter().any(|f| f.contains(query) || query.contains(f.as_str())) {
        1
    } else {
        NO_MATCH
    }
}

/// Resolver over the built-in airport catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogResolver;

impl CatalogResolver {
    pub fn new() -> Self {
        Self
    }

    /// Airport by IATA code, case-insensitive.
    pub fn airport(&self, code: &str) -> Option<&'static Airport> {
        let code = code.trim();
        AIRPORTS.iter().find(|a| a.iata.eq_ignore_ascii_case(code))
    }

    /// Up to `max` ranked suggestions for free text.
    pub fn suggestions(&self, text: &str, max: usize) -> Vec<Suggestion> {
        let query = normalize_lookup_text(text);

        let cities = CITY_GROUPS.iter().filter_map(|city| {
            let resolved = city.resolved()?;
            let rank = rank_match(
                &query,
                &[city.city, city.state, state_label(city.state, city.country), city.country],
            );
            Some(Suggestion {
                group: SuggestionGroup::City,
                primary_label: city.label(),
                secondary_label: format!("{} · {}", resolved.primary_iata, city.country),
                resolved,
                rank,
                weight: city.weight(),
            })
        });

        let airports = AIRPORTS.iter().map(|airport| Suggestion {
            group: SuggestionGroup::Airport,
            primary_label: format!("{} ({})", airport.name, airport.iata),
            secondary_label: format!("{} · {}", airport.iata, airport.country),
            resolved: airport.resolved(),
            rank: rank_match(
                &query,
                &[
                    airport.name,
                    airport.city,
                    airport.iata,
                    airport.state,
                    state_label(airport.state, airport.country),
                ],
            ),
            weight: airport.weight(),
        });

        let mut suggestions: Vec<Suggestion> = cities
            .chain(airports)
            .filter(|s| s.rank < NO_MATCH)
            .collect();
        suggestions.sort_by(|a, b| {
            a.rank
                .cmp(&b.rank)
                .then(a.group.cmp(&b.group))
                .then(b.weight.cmp(&a.weight))
                .then_with(|| a.primary_label.cmp(&b.primary_label))
        });
        suggestions.truncate(max);
        suggestions
    }

    /// Resolve free text: exact code first, then the best suggestion.
    pub fn resolve_text(&self, text: &str) -> Option<ResolvedLocation> {
        let query = normalize_lookup_text(text);
        if query.is_empty() {
            return None;
        }
        if let Some(airport) = self.airport(&query) {
            return Some(airport.resolved());
        }
        self.suggestions(&query, 1).into_iter().next().map(|s| s.resolved)
    }

    /// Up to `limit` commercial airports near a point, large airports first.
    pub fn nearest_airports(&self, point: GeoPoint, limit: usize) -> Vec<&'static Airport> {
        let mut ranked: Vec<(&'static Airport, f64)> = AIRPORTS
            .iter()
            .map(|a| (a, haversine_km(point, GeoPoint::new(a.lat, a.lon))))
            .collect();
        ranked.sort_by(|(a, da), (b, db)| {
            b.is_large()
                .cmp(&a.is_large())
                .then(da.total_cmp(db))
        });
        ranked.into_iter().take(limit).map(|(a, _)| a).collect()
    }

    /// City location for geocoded coordinates, served by the nearest
    /// airports (one primary, up to two alternates).
    pub fn resolve_coordinates(
        &self,
        point: GeoPoint,
        label: &str,
        city_name: &str,
        country: &str,
    ) -> Option<ResolvedLocation> {
        let nearest = self.nearest_airports(point, 3);
        let (primary, rest) = nearest.split_first()?;
        Some(ResolvedLocation {
            kind: LocationKind::City,
            label: label.to_string(),
            city_name: city_name.to_string(),
            country: country.to_string(),
            lat: point.lat,
            lon: point.lon,
            primary_iata: primary.iata.to_string(),
            alternate_iata: rest.iter().map(|a| a.iata.to_string()).collect(),
            source: LocationSource::Geocode,
        })
    }
}

#[async_trait]
impl LocationResolver for CatalogResolver {
    async fn resolve(&self, input: &LocationInput) -> Option<LocationInput> {
        let display_text = input.display_text.trim();
        if input.primary_code().is_some() {
            return Some(input.clone());
        }
        if display_text.is_empty() {
            return None;
        }

        let resolved = self.resolve_text(display_text);
        match &resolved {
            Some(location) => tracing::debug!(input = display_text, code = %location.primary_iata, "location resolved"),
            None => tracing::debug!(input = display_text, "location not found in catalog"),
        }
        resolved.map(|location| LocationInput {
            display_text: display_text.to_string(),
            resolved: Some(location),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_code() {
        let resolver = CatalogResolver::new();
        let lis = resolver.resolve_text(" lis ").unwrap();
        assert_eq!(lis.kind, LocationKind::Airport);
        assert_eq!(lis.primary_iata, "LIS");
        assert_eq!(lis.label, "Humberto Delgado (LIS)");
    }

    #[test]
    fn test_metro_city() {
        let resolver = CatalogResolver::new();
        let rio = resolver.resolve_text("Rio de Janeiro").unwrap();
        assert_eq!(rio.kind, LocationKind::City);
        assert_eq!(rio.label, "Rio de Janeiro (All airports)");
        assert_eq!(rio.primary_iata, "GIG");
        assert_eq!(rio.alternate_iata, vec!["SDU".to_string()]);
        assert!(rio.geo_point().is_some());
    }

    #[test]
    fn test_us_city_label() {
        let resolver = CatalogResolver::new();
        let norfolk = resolver.resolve_text("norfolk").unwrap();
        assert_eq!(norfolk.label, "Norfolk, VA");
        assert_eq!(norfolk.primary_iata, "ORF");

        let nyc = resolver.resolve_text("New York (All airports)").unwrap();
        assert_eq!(nyc.label, "New York, NY (All airports)");
        assert_eq!(nyc.primary_iata, "JFK");
        assert_eq!(nyc.alternate_iata, vec!["LGA".to_string()]);
    }

    #[test]
    fn test_unknown_text() {
        assert!(CatalogResolver::new().resolve_text("zzzz qqq").is_none());
        assert!(CatalogResolver::new().resolve_text("   ").is_none());
    }

    #[test]
    fn test_suggestions_rank_cities_first() {
        let suggestions = CatalogResolver::new().suggestions("Par", 3);
        assert_eq!(suggestions[0].group, SuggestionGroup::City);
        assert_eq!(suggestions[0].primary_label, "Paris (All airports)");
        assert!(suggestions.len() <= 3);
    }

    #[test]
    fn test_nearest_prefers_large_airports() {
        let resolver = CatalogResolver::new();
        let nearest = resolver.nearest_airports(GeoPoint::new(36.8529, -75.978), 3);
        assert!(nearest.iter().all(|a| a.is_large()));
        let codes: Vec<&str> = nearest.iter().map(|a| a.iata).collect();
        assert_eq!(codes, vec!["DCA", "BWI", "IAD"]);
    }

    #[test]
    fn test_resolve_coordinates() {
        let resolver = CatalogResolver::new();
        let location = resolver
            .resolve_coordinates(GeoPoint::new(38.72, -9.14), "Lisbon, Lisbon", "Lisbon", "Portugal")
            .unwrap();
        assert_eq!(location.primary_iata, "LIS");
        assert_eq!(location.alternate_iata.len(), 2);
        assert_eq!(location.source, LocationSource::Geocode);
    }

    #[tokio::test]
    async fn test_resolved_input_passes_through() {
        let resolver = CatalogResolver::new();
        let input = LocationInput {
            display_text: "anything".into(),
            resolved: resolver.resolve_text("GIG"),
        };
        assert_eq!(resolver.resolve(&input).await, Some(input.clone()));
        assert_eq!(resolver.resolve(&LocationInput::text("")).await, None);

        let resolved = resolver.resolve(&LocationInput::text(" Lisbon ")).await.unwrap();
        assert_eq!(resolved.display_text, "Lisbon");
        assert_eq!(resolved.primary_code(), Some("LIS"));
    }
}
