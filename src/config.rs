use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::input::census::DEFAULT_PREAMBLE_LINES;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub census_path: PathBuf,
    pub simd_path: PathBuf,
    /// Oldest age counted in the population total.
    pub age_boundary: u32,
    pub census_preamble_lines: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            census_path: PathBuf::from("DC1117SC.csv"),
            simd_path: PathBuf::from("SIMD_2020v2csv.csv"),
            age_boundary: 15,
            census_preamble_lines: DEFAULT_PREAMBLE_LINES,
        }
    }
}

pub fn load_config(path: &Path) -> Result<AnalysisConfig, ConfigError> {
    let text = fs::read_to_string(path)?;
    parse_config(&text)
}

pub fn parse_config(text: &str) -> Result<AnalysisConfig, ConfigError> {
    Ok(toml::from_str(text)?)
}

#[cfg(test)]
#[path = "../tests/src_inline/config.rs"]
mod tests;
