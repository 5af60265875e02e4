// Error types for CTY loading and geodesy
//
// Lookups never fail: a miss resolves to the "Unknown" record at index 0.
// Only loading the reference files and talking to the geodesy layer can error.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, CtyError>;

/// Errors raised while loading reference data
#[derive(Debug, Error)]
pub enum CtyError {
    /// The reference file could not be opened or read. Fatal: no lookup
    /// is possible without the country database.
    #[error("database unavailable at {path}: {source}")]
    DatabaseUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line in the abbreviation table had no tab separator
    #[error("malformed abbreviation entry on line {line}: {text:?}")]
    MalformedAbbreviation { line: usize, text: String },

    #[error(transparent)]
    Geodesy(#[from] GeodesyError),
}

impl CtyError {
    pub(crate) fn unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CtyError::DatabaseUnavailable {
            path: path.into(),
            source,
        }
    }
}

/// Failures reported by a geodesy implementation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeodesyError {
    #[error("invalid locator: {0:?}")]
    InvalidLocator(String),

    #[error("coordinates out of range: lon {lon}, lat {lat}")]
    OutOfRange { lon: f64, lat: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_message_names_path() {
        let err = CtyError::unavailable(
            "/nonexistent/cty.dat",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/nonexistent/cty.dat"), "{}", msg);
    }

    #[test]
    fn test_geodesy_error_converts() {
        let err: CtyError = GeodesyError::InvalidLocator("ZZ99".to_string()).into();
        assert!(matches!(err, CtyError::Geodesy(GeodesyError::InvalidLocator(_))));
    }
}
