// Country database - DXCC entity lookup from CTY.DAT
// Source: https://www.country-files.com/ (AD1C country files)
//
// Lookup strategy:
// 1. Exact full-callsign exception (=CALL aliases) wins outright
// 2. Exact prefix match on the whole callsign
// 3. Normalize portable/compound calls, then longest prefix match
// 4. Re-parse the matched alias for CQ/ITU/continent overrides
//
// A miss is not an error: it resolves to the "Unknown" record at index 0.
// Keys are uppercased when indexed and when looked up.

pub mod abbreviations;
pub mod area;
pub mod callsign;
pub mod continent;
pub mod parser;
pub mod zones;

use std::path::Path;

use serde::Serialize;

pub use abbreviations::AbbreviationIndex;
pub use area::{AreaRecord, AreaTable};
pub use callsign::{callsign_area, search_key};
pub use continent::Continent;
pub use parser::{read_version, ExceptionIndex, PrefixIndex};
pub use zones::ZoneOverride;

use crate::error::Result;

/// One DXCC entity from the country file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryRecord {
    pub name: String,
    pub cq_zone: u8,
    pub itu_zone: u8,
    pub continent: Continent,
    /// Degrees, North positive
    pub latitude: f64,
    /// Degrees, East positive (the file itself is West positive)
    pub longitude: f64,
    /// Tenths of an hour, positive West of Greenwich as in the file
    pub timezone_offset: i16,
    pub primary_prefix: String,
    /// Alias list exactly as read; overrides are parsed per lookup
    pub raw_exceptions: String,
}

impl CountryRecord {
    /// Sentinel stored at index 0
    pub fn unknown() -> Self {
        CountryRecord {
            name: "Unknown".to_string(),
            cq_zone: 0,
            itu_zone: 0,
            continent: Continent::Unknown,
            latitude: 0.0,
            longitude: 0.0,
            timezone_offset: 0,
            primary_prefix: String::new(),
            raw_exceptions: String::new(),
        }
    }

    /// Local time offset as hours relative to UTC (East positive),
    /// e.g. "UTC-5.0" for the file value 5.0
    pub fn utc_offset_label(&self) -> String {
        let hours = -f64::from(self.timezone_offset) / 10.0;
        format!("UTC{:+.1}", hours)
    }
}

/// Which index produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    /// `=CALL` full callsign exception
    Exception,
    /// The whole callsign is itself a listed prefix
    ExactPrefix,
    /// Longest prefix of the normalized search key
    LongestPrefix,
    /// Nothing matched; the Unknown record was returned
    Miss,
}

/// Result of a callsign lookup
///
/// `country` is a copy of the matched record with any per-alias zone or
/// continent override applied; the database itself is never modified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallsignLookup {
    /// Record index; 0 means unknown
    pub index: usize,
    pub callsign: String,
    /// Prefix, exception or callsign that produced the match
    pub matched: String,
    pub source: MatchSource,
    /// An alias override changed zones or continent
    pub overridden: bool,
    /// Position came from an observed locator rather than the entity
    pub refined_position: bool,
    pub country: CountryRecord,
}

impl CallsignLookup {
    pub fn is_unknown(&self) -> bool {
        self.index == 0
    }

    /// Replace the entity reference point with a position derived from the
    /// station's locator. Zones, continent and name are left as resolved.
    pub fn refine_position(&mut self, longitude: f64, latitude: f64) {
        self.country.longitude = longitude;
        self.country.latitude = latitude;
        self.refined_position = true;
    }
}

/// Country file loaded into memory: record array plus both lookup indices.
/// Built once, read-only afterwards.
#[derive(Debug)]
pub struct Database {
    records: Vec<CountryRecord>,
    prefixes: PrefixIndex,
    exceptions: ExceptionIndex,
}

impl Database {
    /// Load CTY.DAT from disk. Fails only if the file cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::from_parsed(parser::load_cty(path)?))
    }

    /// Build from CTY.DAT content already in memory
    pub fn parse(content: &str) -> Self {
        Self::from_parsed(parser::parse_cty(content))
    }

    fn from_parsed(parsed: parser::ParsedCty) -> Self {
        Database {
            records: parsed.records,
            prefixes: parsed.prefixes,
            exceptions: parsed.exceptions,
        }
    }

    /// All records, including the sentinel at index 0
    pub fn records(&self) -> &[CountryRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&CountryRecord> {
        self.records.get(index)
    }

    /// Number of entities, not counting the sentinel
    pub fn entity_count(&self) -> usize {
        self.records.len() - 1
    }

    pub fn prefixes(&self) -> &PrefixIndex {
        &self.prefixes
    }

    pub fn exceptions(&self) -> &ExceptionIndex {
        &self.exceptions
    }

    /// Resolve a callsign to its entity. Never fails; unknown callsigns
    /// resolve to index 0.
    pub fn lookup(&self, callsign: &str) -> CallsignLookup {
        let call = callsign.trim().to_uppercase();
        let (index, matched, source) = self.find(&call);
        let record = &self.records[index];

        let mut country = record.clone();
        let mut overridden = false;
        if let Some(o) = zones::override_for(&record.raw_exceptions, &matched) {
            if let Some(cq) = o.cq {
                country.cq_zone = cq;
            }
            if let Some(itu) = o.itu {
                country.itu_zone = itu;
            }
            if let Some(continent) = o.continent {
                country.continent = continent;
            }
            overridden = true;
        }

        log::debug!(
            "lookup {} -> #{} {} via {:?} {:?}{}",
            call,
            index,
            country.name,
            source,
            matched,
            if overridden { " (override)" } else { "" }
        );

        CallsignLookup {
            index,
            callsign: call,
            matched,
            source,
            overridden,
            refined_position: false,
            country,
        }
    }

    fn find(&self, call: &str) -> (usize, String, MatchSource) {
        if let Some(&index) = self.exceptions.get(call) {
            return (index, call.to_string(), MatchSource::Exception);
        }
        if let Some(&index) = self.prefixes.get(call) {
            return (index, call.to_string(), MatchSource::ExactPrefix);
        }

        let Some(key) = search_key(call) else {
            // aeronautical/maritime mobile: location unknown
            return (0, call.to_string(), MatchSource::Miss);
        };

        // truncation points on char boundaries, longest first
        let mut ends: Vec<usize> = key.char_indices().map(|(i, c)| i + c.len_utf8()).collect();
        ends.reverse();

        for end in ends {
            let candidate = &key[..end];
            if let Some(&index) = self.prefixes.get(candidate) {
                return (index, candidate.to_string(), MatchSource::LongestPrefix);
            }
        }

        (0, key, MatchSource::Miss)
    }

    /// First entity whose primary prefix equals `prefix` (case-insensitive)
    pub fn lookup_by_prefix(&self, prefix: &str) -> Option<(usize, &CountryRecord)> {
        self.records
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, record)| record.primary_prefix.eq_ignore_ascii_case(prefix))
    }
}
