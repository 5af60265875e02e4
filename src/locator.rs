// Maidenhead Locator Validation
// Reference: https://en.wikipedia.org/wiki/Maidenhead_Locator_System
//
// Used to tell grid squares apart from callsigns in a token stream.
// Coordinate conversion lives in the geodesy module.
//
//   FN        field      A-R (18 x 18)
//   FN31      square     0-9
//   FN31pr    subsquare  A-X (24 x 24)
//   FN31pr45  extended   0-9
//   ...       pairs keep alternating letters A-X and digits 0-9

/// Check whether `token` is a syntactically valid Maidenhead locator.
///
/// Length must be even and at least 4. The first pair is the field (A-R).
/// After it, positions where `position % 4 < 2` are subsquare letters (A-X)
/// and the others are digits. Letters are accepted in either case.
pub fn is_valid_locator(token: &str) -> bool {
    let bytes = token.as_bytes();
    if bytes.len() < 4 || bytes.len() % 2 != 0 {
        return false;
    }

    bytes.iter().enumerate().all(|(position, &b)| {
        let upper = b.to_ascii_uppercase();
        if position < 2 {
            (b'A'..=b'R').contains(&upper)
        } else if position % 4 < 2 {
            (b'A'..=b'X').contains(&upper)
        } else {
            b.is_ascii_digit()
        }
    })
}

/// Four-character, uppercase form of a locator (FN31pr -> FN31), used when
/// counting distinct grid squares. `None` when shorter than four characters.
pub fn normalize_locator(locator: &str) -> Option<String> {
    let square: String = locator.chars().take(4).collect();
    if square.chars().count() < 4 {
        return None;
    }
    Some(square.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_locators() {
        assert!(is_valid_locator("FN31"));
        assert!(is_valid_locator("FN31pr"));
        assert!(is_valid_locator("FN31PR"));
        assert!(is_valid_locator("fn31pr"));
        assert!(is_valid_locator("JO22xx"));
        assert!(is_valid_locator("FN31pr45"));
        assert!(is_valid_locator("FN31pr45ab"));
        assert!(is_valid_locator("AA00"));
        assert!(is_valid_locator("RR99xx"));
    }

    #[test]
    fn test_invalid_length() {
        assert!(!is_valid_locator(""));
        assert!(!is_valid_locator("FN"));
        assert!(!is_valid_locator("FN3"));
        assert!(!is_valid_locator("FN31p"));
    }

    #[test]
    fn test_invalid_characters() {
        assert!(!is_valid_locator("ZZ31")); // field beyond R
        assert!(!is_valid_locator("FS31")); // field beyond R
        assert!(!is_valid_locator("FNAB")); // square must be digits
        assert!(!is_valid_locator("FN31py")); // subsquare beyond X
        assert!(!is_valid_locator("FN3112")); // subsquare must be letters
        assert!(!is_valid_locator("FN31prab")); // extended square must be digits
    }

    #[test]
    fn test_callsigns_are_not_locators() {
        assert!(!is_valid_locator("W1AW"));
        assert!(!is_valid_locator("PA3ABC"));
        assert!(!is_valid_locator("K0AR/2"));
        // RR73 is an FT8 sign-off that happens to be a valid square
        assert!(is_valid_locator("RR73"));
    }

    #[test]
    fn test_normalize_locator() {
        assert_eq!(normalize_locator("fn31pr").as_deref(), Some("FN31"));
        assert_eq!(normalize_locator("JO22").as_deref(), Some("JO22"));
        assert_eq!(normalize_locator("FN3"), None);
        assert_eq!(normalize_locator(""), None);
    }
}
