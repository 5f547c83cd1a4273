//! Pre-flight checks for a live calculation.
//!
//! Everything here runs before any network I/O.

use tripcost_core::{Result, TripDuration, TripError, TripForm};

use crate::duration::resolve_duration;

/// Validate a form for calculation and return its duration.
///
/// Checks run in order: at least one traveler, both location codes
/// resolved, then a resolvable duration.
pub fn validate_for_calculation(form: &TripForm) -> Result<TripDuration> {
    validate_travelers(form)?;

    let has_origin = form.origin.primary_code().is_some();
    let has_destination = form.destination.primary_code().is_some();
    if !has_origin || !has_destination {
        return Err(TripError::missing_codes(has_origin, has_destination));
    }

    resolve_duration(form)
}

/// Validate a form for a network-free recalculation.
///
/// Locations may still be unresolved; the budget then waits on them.
pub fn validate_for_derived(form: &TripForm) -> Result<TripDuration> {
    validate_travelers(form)?;
    resolve_duration(form)
}

/// Reject a form with nobody traveling.
pub fn validate_travelers(form: &TripForm) -> Result<()> {
    if form.travelers() == 0 {
        return Err(TripError::NoTravelers {
            adults: form.adults,
            kids: form.kids,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tripcost_core::{LocationInput, LocationKind, LocationSource, ResolvedLocation};

    fn airport(code: &str) -> LocationInput {
        LocationInput::resolved(ResolvedLocation {
            kind: LocationKind::Airport,
            label: code.into(),
            city_name: code.into(),
            country: String::new(),
            lat: 0.0,
            lon: 0.0,
            primary_iata: code.into(),
            alternate_iata: vec![],
            source: LocationSource::Dataset,
        })
    }

    fn valid_form() -> TripForm {
        TripForm {
            origin: airport("ORF"),
            destination: airport("LIS"),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_form() {
        assert!(validate_for_calculation(&valid_form()).is_ok());
    }

    #[test]
    fn test_zero_travelers_rejected_first() {
        let form = TripForm {
            adults: 0,
            kids: 0,
            ..Default::default()
        };
        assert!(matches!(
            validate_for_calculation(&form),
            Err(TripError::NoTravelers { adults: 0, kids: 0 })
        ));
    }

    #[test]
    fn test_kids_only_party_is_valid() {
        let form = TripForm {
            adults: 0,
            kids: 2,
            ..valid_form()
        };
        assert!(validate_for_calculation(&form).is_ok());
    }

    #[test]
    fn test_missing_destination_code() {
        let form = TripForm {
            destination: LocationInput::text("Atlantis"),
            ..valid_form()
        };
        match validate_for_calculation(&form) {
            Err(TripError::MissingLocationCodes { origin, destination }) => {
                assert!(!origin);
                assert!(destination);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_derived_allows_unresolved_locations() {
        let form = TripForm::default();
        assert!(validate_for_calculation(&form).is_err());
        assert!(validate_for_derived(&form).is_ok());
    }
}
