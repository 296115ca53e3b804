use std::path::{Path, PathBuf};
use std::time::Instant;

use csv::ByteRecord;
use tracing::{debug, info, warn};

use crate::input::{
    InputError, column_index, csv_reader, field, open_reader, parse_number, path_display,
    record_line,
};
use crate::model::ordered::OrderedMap;

pub const REGION_COLUMN: &str = "MMWname";
pub const RANK_COLUMN: &str = "SIMD2020v2_Rank";

/// Region -> mean SIMD rank of its data zones, in first-seen order.
#[derive(Debug, Clone)]
pub struct SimdStore {
    path: PathBuf,
    data: OrderedMap<String, f64>,
    loaded: bool,
}

impl SimdStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            data: OrderedMap::new(),
            loaded: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Reads the bound file, replacing any previous contents.
    ///
    /// Returns `Ok(false)` when the path is not a regular file. On error the
    /// store is left empty.
    pub fn load(&mut self) -> Result<bool, InputError> {
        self.data.clear();
        self.loaded = false;

        if !self.path.is_file() {
            warn!(path = %path_display(&self.path), "simd file not found");
            return Ok(false);
        }

        let start = Instant::now();
        let by_region = read_ranks(&self.path)?;
        let mut rows = 0usize;
        let mut data = OrderedMap::new();
        for (region, ranks) in by_region.iter() {
            rows += ranks.len();
            if let Some(avg) = mean_rank(ranks) {
                data.insert(region.clone(), avg);
            }
        }
        info!(
            path = %path_display(&self.path),
            rows,
            regions = data.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "loaded simd data"
        );
        self.data = data;
        self.loaded = true;
        Ok(true)
    }

    pub fn regions(&self) -> Vec<&str> {
        self.data.keys().map(String::as_str).collect()
    }

    pub fn average_rank(&self, region: &str) -> Option<f64> {
        self.data.get(region).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.data.iter().map(|(region, avg)| (region.as_str(), *avg))
    }

    /// Region with the smallest average rank; the first one seen wins a tie.
    pub fn lowest(&self) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for (region, avg) in self.iter() {
            match best {
                Some((_, best_avg)) if avg >= best_avg => {}
                _ => best = Some((region, avg)),
            }
        }
        best
    }

    pub fn lowest_simd(&self) -> Option<&str> {
        self.lowest().map(|(region, _)| region)
    }
}

fn read_ranks(path: &Path) -> Result<OrderedMap<String, Vec<i64>>, InputError> {
    let mut ranks: OrderedMap<String, Vec<i64>> = OrderedMap::new();
    let mut csv = csv_reader(open_reader(path)?);
    let headers = csv.byte_headers()?.clone();
    if headers.is_empty() {
        debug!("simd file has no header row");
        return Ok(ranks);
    }
    let region_idx = column_index(&headers, REGION_COLUMN)?;
    let rank_idx = column_index(&headers, RANK_COLUMN)?;

    let mut record = ByteRecord::new();
    while csv.read_byte_record(&mut record)? {
        let line = record_line(&record, 0);
        let region = field(&record, region_idx, REGION_COLUMN, line)?;
        let rank_text = field(&record, rank_idx, RANK_COLUMN, line)?;
        let rank = parse_number(&rank_text, RANK_COLUMN, line)?;
        ranks.get_or_insert_with(region, Vec::new).push(rank);
    }
    Ok(ranks)
}

/// Arithmetic mean rounded to two decimals, `None` for no ranks.
pub fn mean_rank(ranks: &[i64]) -> Option<f64> {
    if ranks.is_empty() {
        return None;
    }
    let sum: i128 = ranks.iter().map(|&r| i128::from(r)).sum();
    let mean = sum as f64 / ranks.len() as f64;
    Some(round2(mean))
}

/// Rounds the exact binary value to two decimals, ties to even.
///
/// Fixed-precision formatting works on the exact expansion of the float, so
/// `1.125` goes to `1.12` while `0.025` (stored slightly above) goes to `0.03`.
fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/simd.rs"]
mod tests;
