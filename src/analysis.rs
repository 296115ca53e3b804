use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::input::InputError;
use crate::input::census::CensusStore;
use crate::input::simd::SimdStore;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("input not loaded: {0}")]
    NotLoaded(PathBuf),
    #[error("simd data contains no regions")]
    NoRegions,
    #[error("census error: {0}")]
    Input(#[from] InputError),
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolSummary {
    pub name: String,
    pub version: String,
}

impl Default for ToolSummary {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSummary {
    pub tool: ToolSummary,
    pub region: String,
    pub average_rank: f64,
    pub age_boundary: u32,
    /// `None` when the region has no census rows.
    pub population: Option<u64>,
}

/// Finds the most deprived region and its population at or under `age_boundary`.
pub fn run_analysis(
    census: &CensusStore,
    simd: &SimdStore,
    age_boundary: u32,
) -> Result<AnalysisSummary, AnalysisError> {
    if !census.is_loaded() {
        return Err(AnalysisError::NotLoaded(census.path().to_path_buf()));
    }
    if !simd.is_loaded() {
        return Err(AnalysisError::NotLoaded(simd.path().to_path_buf()));
    }
    let (region, average_rank) = simd.lowest().ok_or(AnalysisError::NoRegions)?;
    let population = census.total_population(region, age_boundary)?;
    Ok(AnalysisSummary {
        tool: ToolSummary::default(),
        region: region.to_string(),
        average_rank,
        age_boundary,
        population,
    })
}

#[cfg(test)]
#[path = "../tests/src_inline/analysis.rs"]
mod tests;
