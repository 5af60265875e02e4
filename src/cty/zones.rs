// Alias token parsing
//
// An alias token in CTY.DAT looks like `BT3L(23)[33]` or `=VE2ABC(2)`:
// a prefix (or full callsign when it starts with '='), optionally followed by
// suffix markers that override the entity defaults for that alias only.
//
//   (#)    CQ zone
//   [#]    ITU zone
//   {XX}   continent
//   <a/b>  latitude/longitude (terminates the prefix, not interpreted)
//   ~#~    local time offset (terminates the prefix, not interpreted)
//
// Overrides are re-parsed at lookup time for the matched record only; the
// stored record keeps the raw alias text.

use super::continent::Continent;

const SUFFIX_MARKERS: [char; 6] = ['(', '[', ';', '<', '{', '~'];

/// Per-alias overrides recovered from an alias token's suffix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZoneOverride {
    pub cq: Option<u8>,
    pub itu: Option<u8>,
    pub continent: Option<Continent>,
}

impl ZoneOverride {
    pub fn is_empty(&self) -> bool {
        self.cq.is_none() && self.itu.is_none() && self.continent.is_none()
    }

    /// Layer `other` on top of `self`; values present in `other` win
    fn merge(self, other: ZoneOverride) -> ZoneOverride {
        ZoneOverride {
            cq: other.cq.or(self.cq),
            itu: other.itu.or(self.itu),
            continent: other.continent.or(self.continent),
        }
    }
}

/// One parsed entry of a record's alias list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasToken<'a> {
    /// Prefix portion with the '=' marker and all suffixes removed
    pub prefix: &'a str,
    /// Token started with '=': an exact callsign, not a prefix
    pub full_callsign: bool,
    pub overrides: ZoneOverride,
}

/// Split one comma-separated alias entry into prefix and overrides
pub fn parse_alias(token: &str) -> AliasToken<'_> {
    let token = token.trim();
    let cut = token.find(SUFFIX_MARKERS).unwrap_or(token.len());
    let (head, suffix) = token.split_at(cut);

    let (prefix, full_callsign) = match head.strip_prefix('=') {
        Some(call) => (call, true),
        None => (head, false),
    };

    AliasToken {
        prefix: prefix.trim(),
        full_callsign,
        overrides: parse_suffix(suffix),
    }
}

fn parse_suffix(suffix: &str) -> ZoneOverride {
    if suffix.is_empty() {
        return ZoneOverride::default();
    }
    ZoneOverride {
        cq: delimited(suffix, '(', ')').and_then(zone_number),
        itu: delimited(suffix, '[', ']').and_then(zone_number),
        continent: delimited(suffix, '{', '}')
            .map(Continent::from_code)
            .filter(Continent::is_known),
    }
}

/// Text between the first `open` and the next `close` after it
fn delimited(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)? + open.len_utf8();
    let len = text[start..].find(close)?;
    Some(&text[start..start + len])
}

/// Zones are written as one or two digits; zero means "no override"
fn zone_number(body: &str) -> Option<u8> {
    if body.is_empty() || body.len() > 2 || !body.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    body.parse::<u8>().ok().filter(|&z| z > 0)
}

/// Whether an alias list carries any override markers at all
pub fn has_overrides(raw_exceptions: &str) -> bool {
    raw_exceptions.contains(['(', '[', '{'])
}

/// Find the overrides attached to the alias that equals `key`
/// (case-insensitive). Later matching tokens win field by field.
pub fn override_for(raw_exceptions: &str, key: &str) -> Option<ZoneOverride> {
    if !has_overrides(raw_exceptions) {
        return None;
    }

    raw_exceptions
        .split(',')
        .map(parse_alias)
        .filter(|alias| alias.prefix.eq_ignore_ascii_case(key))
        .map(|alias| alias.overrides)
        .fold(None, |acc: Option<ZoneOverride>, o| {
            Some(acc.unwrap_or_default().merge(o))
        })
        .filter(|o| !o.is_empty())
}
