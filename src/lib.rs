// CLU Library
// Re-export modules for use in main.rs

pub mod commands;
pub mod config;
pub mod cty;
pub mod error;
pub mod geodesy;
pub mod locator;

pub use cty::{CallsignLookup, CountryRecord, Database};
pub use error::{CtyError, GeodesyError};
