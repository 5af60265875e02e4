// Callsign normalization
//
// Portable and compound callsigns (K0AR/2, W1AW/KH6, DL/W1AW/P) need to be
// reduced to the part that actually identifies the operating location before
// a prefix match makes sense.
//
// Only the first two '/'-separated segments are considered: `head/tail/...`.
// Anything after a second slash (typically /P, /M, /QRP) is ignored.

/// Location qualifiers that say nothing about the DXCC entity
const UNKNOWN_LOCATION: [&str; 2] = ["AM", "MM"];
const SAME_LOCATION: &str = "QRP";

/// Derive the string used for longest-prefix matching.
///
/// Returns `None` when the callsign is aeronautical or maritime mobile, where
/// the location cannot be derived from the callsign at all.
///
/// - `W1AW`      -> `W1AW`
/// - `K0AR/2`    -> `K2AR` (call area changed)
/// - `W1AW/KH6`  -> `KH6`
/// - `W1AW/QRP`  -> `W1AW`
/// - `W1AW/MM`   -> `None`
/// - `DL/W1AW`   -> `DL` (tail longer than head: head wins)
pub fn search_key(callsign: &str) -> Option<String> {
    let mut segments = callsign.split('/');
    let head = segments.next().unwrap_or_default();
    let Some(tail) = segments.next() else {
        return Some(callsign.to_string());
    };

    let mut tail_chars = tail.chars();
    if let (Some(digit), None) = (tail_chars.next(), tail_chars.next()) {
        if digit.is_ascii_digit() {
            return Some(change_area(head, digit));
        }
    }

    if tail.len() > 1 && tail.len() < head.len() {
        if UNKNOWN_LOCATION.iter().any(|q| tail.eq_ignore_ascii_case(q)) {
            return None;
        }
        if tail.eq_ignore_ascii_case(SAME_LOCATION) {
            return Some(head.to_string());
        }
        return Some(tail.to_string());
    }

    Some(head.to_string())
}

/// Replace the call area digit: the last digit that is not the very first
/// character (`K0AR` + `2` -> `K2AR`, `3DA0XY` + `1` -> `3DA1XY`).
fn change_area(head: &str, area: char) -> String {
    let position = head
        .char_indices()
        .skip(1)
        .filter(|(_, c)| c.is_ascii_digit())
        .map(|(i, _)| i)
        .last();

    match position {
        Some(i) => {
            let mut changed = String::with_capacity(head.len());
            changed.push_str(&head[..i]);
            changed.push(area);
            changed.push_str(&head[i + 1..]);
            changed
        }
        None => head.to_string(),
    }
}

/// Callsign area digit: the first digit after a '/', otherwise the first
/// digit of the callsign itself.
pub fn callsign_area(callsign: &str) -> Option<char> {
    let first_digit = |s: &str| s.chars().find(char::is_ascii_digit);

    callsign
        .split_once('/')
        .and_then(|(_, rest)| first_digit(rest))
        .or_else(|| first_digit(callsign))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_callsign() {
        assert_eq!(search_key("W1AW").as_deref(), Some("W1AW"));
        assert_eq!(search_key("PA3ABC").as_deref(), Some("PA3ABC"));
    }

    #[test]
    fn test_area_change() {
        assert_eq!(search_key("K0AR/2").as_deref(), Some("K2AR"));
        assert_eq!(search_key("W1AW/6").as_deref(), Some("W6AW"));
        // first character is never treated as the call area
        assert_eq!(search_key("3DA0XY/1").as_deref(), Some("3DA1XY"));
        assert_eq!(search_key("4X/5").as_deref(), Some("4X"));
    }

    #[test]
    fn test_location_qualifiers() {
        assert_eq!(search_key("W1AW/MM"), None);
        assert_eq!(search_key("W1AW/am"), None);
        assert_eq!(search_key("W1AW/QRP").as_deref(), Some("W1AW"));
        assert_eq!(search_key("W1AW/qrp").as_deref(), Some("W1AW"));
        assert_eq!(search_key("W1AW/KH6").as_deref(), Some("KH6"));
    }

    #[test]
    fn test_tail_too_long_falls_back_to_head() {
        assert_eq!(search_key("DL/W1AW").as_deref(), Some("DL"));
        assert_eq!(search_key("KH6/W1AW").as_deref(), Some("KH6"));
        assert_eq!(search_key("W1AW/").as_deref(), Some("W1AW"));
        // single non-digit character: not an area change, not a qualifier
        assert_eq!(search_key("W1AW/P").as_deref(), Some("W1AW"));
    }

    #[test]
    fn test_multi_slash_uses_first_two_segments() {
        assert_eq!(search_key("W1AW/KH6/P").as_deref(), Some("KH6"));
        assert_eq!(search_key("DL/W1AW/P").as_deref(), Some("DL"));
        assert_eq!(search_key("K0AR/2/QRP").as_deref(), Some("K2AR"));
        assert_eq!(search_key("W1AW/MM/2"), None);
    }

    #[test]
    fn test_callsign_area() {
        assert_eq!(callsign_area("W1AW"), Some('1'));
        assert_eq!(callsign_area("K0AR/2"), Some('2'));
        assert_eq!(callsign_area("W1AW/KH6"), Some('6'));
        assert_eq!(callsign_area("W1AW/P"), Some('1'));
        assert_eq!(callsign_area("ABC"), None);
    }
}
