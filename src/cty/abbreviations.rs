// Country abbreviation table
//
// Each line is `<abbreviation>\t<country name>`. The index is keyed the other
// way round (name -> abbreviation) since lookups start from a resolved
// country. Loading stops at the first line without a tab.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{CtyError, Result};

use super::CountryRecord;

#[derive(Debug, Clone, Default)]
pub struct AbbreviationIndex {
    by_name: HashMap<String, String>,
}

impl AbbreviationIndex {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CtyError::unavailable(path, e))?;
        let index = Self::parse(&content);
        log::info!("Loaded {} country abbreviations from {:?}", index.len(), path);
        Ok(index)
    }

    pub fn parse(content: &str) -> Self {
        let mut by_name = HashMap::new();

        for (n, line) in content.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            let Some((abbreviation, name)) = line.split_once('\t') else {
                let err = CtyError::MalformedAbbreviation {
                    line: n + 1,
                    text: line.to_string(),
                };
                log::warn!("{}; ignoring the rest of the table", err);
                break;
            };
            by_name.insert(name.trim().to_string(), abbreviation.trim().to_string());
        }

        Self { by_name }
    }

    /// Abbreviation for a country display name
    pub fn get(&self, country_name: &str) -> Option<&str> {
        self.by_name.get(country_name).map(String::as_str)
    }

    pub fn for_country(&self, country: &CountryRecord) -> Option<&str> {
        self.get(&country.name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inverts_columns() {
        let index = AbbreviationIndex::parse("USA\tUnited States\nGER\tFed. Rep. of Germany\r\n");
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("United States"), Some("USA"));
        assert_eq!(index.get("Fed. Rep. of Germany"), Some("GER"));
        assert_eq!(index.get("USA"), None);
    }

    #[test]
    fn test_stops_at_malformed_line() {
        let index = AbbreviationIndex::parse("USA\tUnited States\nbroken line\nJPN\tJapan\n");
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("Japan"), None);
    }

    #[test]
    fn test_blank_lines_are_not_malformed() {
        let index = AbbreviationIndex::parse("USA\tUnited States\n\nJPN\tJapan\n");
        assert_eq!(index.get("Japan"), Some("JPN"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = AbbreviationIndex::load(Path::new("/nonexistent/abbreviations")).unwrap_err();
        assert!(matches!(err, CtyError::DatabaseUnavailable { .. }));
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"USA\tUnited States\r\nJPN\tJapan\r\n").unwrap();

        let index = AbbreviationIndex::load(file.path()).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("Japan"), Some("JPN"));
    }
}
