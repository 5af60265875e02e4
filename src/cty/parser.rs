// CTY.DAT Parser
//
// Reference: https://www.country-files.com/cty-dat-format/
//
// A CTY.DAT record is one header line of nine ':'-terminated fields followed
// by one or more lines of comma-separated aliases, terminated by ';':
//
//   Sov Mil Order of Malta:   15:  28:  EU:   41.90:   -12.43:    -1.0:  1A:
//       1A;
//
// Field order:
// 0: Country name
// 1: CQ zone
// 2: ITU zone
// 3: Continent (2 letters)
// 4: Latitude, degrees, + for North
// 5: Longitude, degrees, + for West
// 6: Local time offset from UTC, hours
// 7: Primary DXCC prefix ('*' marks a WAE-only entity)
// 8: Aliases: prefixes, or full callsigns when starting with '='
//
// Line breaks and carriage returns are not significant. Spaces are kept in
// the country name only; everything after the first ':' is compacted.

use std::collections::HashMap;
use std::path::Path;

use super::continent::Continent;
use super::zones::parse_alias;
use super::CountryRecord;
use crate::error::{CtyError, Result};

/// Prefix (uppercased) -> record index
pub type PrefixIndex = HashMap<String, usize>;
/// Full callsign (uppercased) -> record index
pub type ExceptionIndex = HashMap<String, usize>;

const VERSION_MARKER: &str = "VER2";

/// Splits CTY-style text into ';'-terminated records.
///
/// Carriage returns and newlines are dropped, and so are spaces once the
/// first ':' of the record has been seen. Trailing text with no closing ';'
/// is not a record and is discarded.
pub struct RecordTokenizer<'a> {
    chars: std::str::Chars<'a>,
}

impl<'a> RecordTokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { chars: text.chars() }
    }
}

impl Iterator for RecordTokenizer<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let mut buf = String::new();
        let mut seen_colon = false;

        for ch in self.chars.by_ref() {
            match ch {
                ';' => return Some(buf),
                '\r' | '\n' => continue,
                ' ' if seen_colon => continue,
                ':' => {
                    seen_colon = true;
                    buf.push(ch);
                }
                _ => buf.push(ch),
            }
        }
        None
    }
}

/// The nine fields of one CTY record, borrowed from the tokenized buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawRecord<'a> {
    pub name: &'a str,
    pub cq_zone: &'a str,
    pub itu_zone: &'a str,
    pub continent: &'a str,
    pub latitude: &'a str,
    pub longitude: &'a str,
    pub utc_offset: &'a str,
    pub primary_prefix: &'a str,
    pub aliases: &'a str,
}

impl<'a> RawRecord<'a> {
    /// Split a record on ':' into its nine fields. The alias field keeps any
    /// further ':' characters. Returns `None` when fewer than nine fields exist.
    pub fn split(record: &'a str) -> Option<Self> {
        let mut fields = record.splitn(9, ':').map(str::trim);
        Some(RawRecord {
            name: fields.next()?,
            cq_zone: fields.next()?,
            itu_zone: fields.next()?,
            continent: fields.next()?,
            latitude: fields.next()?,
            longitude: fields.next()?,
            utc_offset: fields.next()?,
            primary_prefix: fields.next()?,
            aliases: fields.next()?,
        })
    }

    /// WAE-only entities count for CQ contests but not for DXCC
    pub fn is_excluded(&self) -> bool {
        self.primary_prefix.contains('*')
    }

    pub fn to_country(&self) -> CountryRecord {
        CountryRecord {
            name: self.name.to_string(),
            cq_zone: parse_number(self.cq_zone),
            itu_zone: parse_number(self.itu_zone),
            continent: Continent::from_code(self.continent),
            latitude: hundredths(parse_number::<f64>(self.latitude)),
            // stored East-positive
            longitude: -hundredths(parse_number::<f64>(self.longitude)),
            timezone_offset: (parse_number::<f64>(self.utc_offset) * 10.0) as i16,
            primary_prefix: self.primary_prefix.to_string(),
            raw_exceptions: self.aliases.to_string(),
        }
    }
}

/// Degrees truncated to two decimals. The product is rounded to 1e-6 first
/// so binary representation error (0.29 * 100 = 28.999...) does not lose a
/// hundredth.
pub(crate) fn hundredths(degrees: f64) -> f64 {
    let scaled = (degrees * 100.0 * 1e6).round() / 1e6;
    scaled.trunc() / 100.0
}

/// Lenient numeric field parsing: unparsable fields become zero
fn parse_number<T: std::str::FromStr + Default>(field: &str) -> T {
    field.trim().parse().unwrap_or_default()
}

/// Everything the loader produces: record array plus both indices.
/// Index 0 of `records` is the "Unknown" sentinel.
#[derive(Debug, Default)]
pub struct ParsedCty {
    pub records: Vec<CountryRecord>,
    pub prefixes: PrefixIndex,
    pub exceptions: ExceptionIndex,
    pub skipped: usize,
    pub excluded: usize,
}

/// Load and index a CTY.DAT file
pub fn load_cty(path: &Path) -> Result<ParsedCty> {
    log::info!("Loading country file: {:?}", path);
    let bytes = std::fs::read(path).map_err(|e| CtyError::unavailable(path, e))?;
    let parsed = parse_cty(&String::from_utf8_lossy(&bytes));

    log::info!(
        "Loaded {} entities, {} prefixes, {} callsign exceptions ({} excluded, {} malformed)",
        parsed.records.len() - 1,
        parsed.prefixes.len(),
        parsed.exceptions.len(),
        parsed.excluded,
        parsed.skipped
    );
    Ok(parsed)
}

/// Parse CTY.DAT content. Malformed records are skipped, never fatal.
pub fn parse_cty(content: &str) -> ParsedCty {
    let mut parsed = ParsedCty {
        records: vec![CountryRecord::unknown()],
        ..Default::default()
    };

    for (n, record) in RecordTokenizer::new(content).enumerate() {
        if record.trim().is_empty() {
            continue;
        }

        let Some(raw) = RawRecord::split(&record) else {
            log::warn!("Skipping malformed CTY record #{}: {:?}", n + 1, record);
            parsed.skipped += 1;
            continue;
        };

        if raw.is_excluded() {
            log::debug!("Excluding WAE entity {} ({})", raw.name, raw.primary_prefix);
            parsed.excluded += 1;
            continue;
        }

        let index = parsed.records.len();
        parsed.records.push(raw.to_country());

        // compound primary prefixes (3D2/R) can be typed in directly
        if raw.primary_prefix.contains('/') {
            parsed
                .prefixes
                .insert(raw.primary_prefix.to_uppercase(), index);
        }

        for token in raw.aliases.split(',') {
            let alias = parse_alias(token);
            if alias.prefix.is_empty() {
                continue;
            }
            let key = alias.prefix.to_uppercase();
            if alias.full_callsign {
                parsed.exceptions.insert(key, index);
            } else {
                parsed.prefixes.insert(key, index);
            }
        }
    }

    parsed
}

/// Read the database version without parsing records.
///
/// The version lives in a pseudo-callsign such as `=VER20240101,`; the number
/// starts at the '2' of the `VER2` marker and runs up to the next comma.
pub fn read_version(path: &Path) -> Result<Option<u32>> {
    let bytes = std::fs::read(path).map_err(|e| CtyError::unavailable(path, e))?;
    Ok(scan_version(&String::from_utf8_lossy(&bytes)))
}

pub fn scan_version(content: &str) -> Option<u32> {
    let start = content.find(VERSION_MARKER)? + VERSION_MARKER.len() - 1;
    let rest = &content[start..];
    let end = rest.find(',')?;
    let digits: String = rest[..end]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
