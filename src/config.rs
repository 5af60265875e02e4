//! Reference File Locations
//!
//! Defaults follow the legacy xlog install layout. Each path can be
//! overridden through the environment, and the CLI can override again.

use std::path::PathBuf;

pub const DEFAULT_CTY_PATH: &str = "/usr/share/xlog/dxcc/cty.dat";
pub const DEFAULT_AREA_PATH: &str = "/usr/share/xlog/dxcc/area.dat";
pub const DEFAULT_ABBREVIATION_PATH: &str = "/usr/share/xlog/dxcc/abbreviations";

pub const CTY_ENV: &str = "CLU_CTY";
pub const AREA_ENV: &str = "CLU_AREA";
pub const ABBREVIATION_ENV: &str = "CLU_ABBREV";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub cty_path: PathBuf,
    pub area_path: PathBuf,
    pub abbreviation_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cty_path: PathBuf::from(DEFAULT_CTY_PATH),
            area_path: PathBuf::from(DEFAULT_AREA_PATH),
            abbreviation_path: PathBuf::from(DEFAULT_ABBREVIATION_PATH),
        }
    }
}

impl Config {
    /// Defaults, overridden by CLU_CTY / CLU_AREA / CLU_ABBREV when set
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key).map(PathBuf::from))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<PathBuf>) -> Self {
        let defaults = Self::default();
        Self {
            cty_path: lookup(CTY_ENV).unwrap_or(defaults.cty_path),
            area_path: lookup(AREA_ENV).unwrap_or(defaults.area_path),
            abbreviation_path: lookup(ABBREVIATION_ENV).unwrap_or(defaults.abbreviation_path),
        }
    }

    /// Apply explicit overrides (command line flags); `None` keeps the current value
    pub fn with_overrides(
        mut self,
        cty: Option<PathBuf>,
        area: Option<PathBuf>,
        abbreviations: Option<PathBuf>,
    ) -> Self {
        if let Some(path) = cty {
            self.cty_path = path;
        }
        if let Some(path) = area {
            self.area_path = path;
        }
        if let Some(path) = abbreviations {
            self.abbreviation_path = path;
        }
        self
    }
}
