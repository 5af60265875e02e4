// Call area table (area.dat)
//
// Same record syntax as CTY.DAT without the alias list: eight ':'-separated
// fields terminated by ';'. Entries describe call areas within an entity
// (K1, VE3, JA6, ...), each with its own zones and reference position.

use std::path::Path;

use serde::Serialize;

use super::parser::{hundredths, RecordTokenizer};
use crate::error::{CtyError, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaRecord {
    pub name: String,
    pub cq_zone: u8,
    pub itu_zone: u8,
    /// Kept verbatim; area files use free-form continent text
    pub continent: String,
    pub latitude: f64,
    /// East-positive, like `CountryRecord::longitude`
    pub longitude: f64,
    pub timezone_offset: i16,
    pub prefix: String,
}

#[derive(Debug, Clone, Default)]
pub struct AreaTable {
    records: Vec<AreaRecord>,
}

impl AreaTable {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| CtyError::unavailable(path, e))?;
        let table = Self::parse(&String::from_utf8_lossy(&bytes));
        log::info!("Loaded {} call areas from {:?}", table.records.len(), path);
        Ok(table)
    }

    pub fn parse(content: &str) -> Self {
        let records = RecordTokenizer::new(content)
            .filter(|record| !record.trim().is_empty())
            .filter_map(|record| {
                let parsed = parse_area(&record);
                if parsed.is_none() {
                    log::warn!("Skipping malformed area record: {:?}", record);
                }
                parsed
            })
            .collect();
        Self { records }
    }

    /// Area whose prefix equals `prefix`, case-insensitively
    pub fn by_prefix(&self, prefix: &str) -> Option<&AreaRecord> {
        self.records
            .iter()
            .find(|area| area.prefix.eq_ignore_ascii_case(prefix))
    }

    pub fn records(&self) -> &[AreaRecord] {
        &self.records
    }
}

fn parse_area(record: &str) -> Option<AreaRecord> {
    let fields: Vec<&str> = record.split(':').map(str::trim).collect();
    if fields.len() < 8 {
        return None;
    }
    let number = |s: &str| s.parse::<f64>().unwrap_or_default();

    Some(AreaRecord {
        name: fields[0].to_string(),
        cq_zone: fields[1].parse().unwrap_or_default(),
        itu_zone: fields[2].parse().unwrap_or_default(),
        continent: fields[3].to_string(),
        latitude: hundredths(number(fields[4])),
        longitude: -hundredths(number(fields[5])),
        timezone_offset: (number(fields[6]) * 10.0) as i16,
        prefix: fields[7].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
New England:            05:  08:  NA:   42.00:    72.00:     5.0:  K1;
Ontario:                04:  04:  NA:   45.00:    80.00:     5.0:  VE3:;
";

    #[test]
    fn test_parse_area_records() {
        let table = AreaTable::parse(SAMPLE);
        assert_eq!(table.records().len(), 2);

        let k1 = table.by_prefix("k1").unwrap();
        assert_eq!(k1.name, "New England");
        assert_eq!(k1.cq_zone, 5);
        assert_eq!(k1.continent, "NA");
        assert!((k1.longitude + 72.0).abs() < 1e-9);

        let ve3 = table.by_prefix("VE3").unwrap();
        assert_eq!(ve3.itu_zone, 4);
        assert_eq!(ve3.timezone_offset, 50);
    }

    #[test]
    fn test_malformed_and_missing() {
        let table = AreaTable::parse("Nowhere:1:2;");
        assert!(table.records().is_empty());
        assert!(table.by_prefix("K1").is_none());
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let table = AreaTable::load(file.path()).unwrap();
        assert_eq!(table.records().len(), 2);

        let err = AreaTable::load(Path::new("/nonexistent/area.dat")).unwrap_err();
        assert!(matches!(err, CtyError::DatabaseUnavailable { .. }));
    }
}
