use tracing::error;

use crate::error::ValidationError;

/// Non-ASCII letters accepted in city names, matching the service's
/// documented character class.
const ALLOWED_DIACRITICS: &str = "áéíóöőúüűÁÉÍÓÖŐÚÜŰ";

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == ' ' || c == '-' || c == '.' || ALLOWED_DIACRITICS.contains(c)
}

/// Validate a city name before any network call.
///
/// Checks run in a fixed order so the first failing rule decides the
/// user-facing message: digits, then character set, then trimmed length.
pub fn validate_city_name(city: &str) -> Result<(), ValidationError> {
    if city.chars().any(|c| c.is_ascii_digit()) {
        error!("Invalid city name: '{city}' contains numbers");
        return Err(ValidationError::NumbersNotAllowed(city.to_string()));
    }

    // The empty string fails the format rule: the name must consist of
    // one or more allowed characters, not zero.
    if city.is_empty() || !city.chars().all(is_allowed_char) {
        error!("Invalid city name format: '{city}'");
        return Err(ValidationError::InvalidFormat(city.to_string()));
    }

    let trimmed_len = city.trim().chars().count();
    if trimmed_len <= 2 || trimmed_len > 50 {
        error!("City name too short or too long: '{city}'");
        return Err(ValidationError::LengthOutOfRange(city.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_city_names() {
        for city in ["Budapest", "Kuala Lumpur", "Winston-Salem", "St. Louis"] {
            assert_eq!(validate_city_name(city), Ok(()), "{city} should be valid");
        }
    }

    #[test]
    fn accepts_diacritics() {
        for city in ["Győr", "Hódmezővásárhely", "Málaga"] {
            assert_eq!(validate_city_name(city), Ok(()), "{city} should be valid");
        }
    }

    #[test]
    fn rejects_digits() {
        assert_eq!(
            validate_city_name("London1"),
            Err(ValidationError::NumbersNotAllowed("London1".into()))
        );
    }

    #[test]
    fn digit_check_runs_before_format_and_length() {
        // "1@" fails every rule; the digit rule must win.
        assert_eq!(
            validate_city_name("1@"),
            Err(ValidationError::NumbersNotAllowed("1@".into()))
        );
    }

    #[test]
    fn rejects_disallowed_characters() {
        for city in ["B@dapest", "Lon#don", "Москва"] {
            assert_eq!(
                validate_city_name(city),
                Err(ValidationError::InvalidFormat(city.to_string())),
                "{city} should be rejected on format"
            );
        }
    }

    #[test]
    fn rejects_empty_name_on_format() {
        assert_eq!(
            validate_city_name(""),
            Err(ValidationError::InvalidFormat(String::new()))
        );
        // All-whitespace is non-empty and well-formed, so it falls through
        // to the trimmed-length rule.
        assert_eq!(
            validate_city_name("   "),
            Err(ValidationError::LengthOutOfRange("   ".into()))
        );
    }

    #[test]
    fn rejects_short_names() {
        assert_eq!(
            validate_city_name("ab"),
            Err(ValidationError::LengthOutOfRange("ab".into()))
        );
        // Padding does not rescue a short name; length is measured trimmed.
        assert_eq!(
            validate_city_name("  ab  "),
            Err(ValidationError::LengthOutOfRange("  ab  ".into()))
        );
    }

    #[test]
    fn length_boundaries() {
        assert!(validate_city_name("abc").is_ok());
        assert!(validate_city_name(&"a".repeat(50)).is_ok());
        assert_eq!(
            validate_city_name(&"a".repeat(51)),
            Err(ValidationError::LengthOutOfRange("a".repeat(51)))
        );
    }
}
