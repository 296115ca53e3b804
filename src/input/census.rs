use std::path::{Path, PathBuf};
use std::time::Instant;

use csv::ByteRecord;
use tracing::{debug, info, warn};

use crate::input::{
    InputError, column_index, csv_reader, field, open_reader, parse_number, path_display,
    record_line, skip_lines,
};
use crate::model::age_band::AgeBand;
use crate::model::ordered::OrderedMap;

pub const REGION_COLUMN: &str = "Region";
pub const RANGE_COLUMN: &str = "Range";
/// Holds the count for the row's own `Range` band, not a grand total.
pub const COUNT_COLUMN: &str = "All people";
/// Metadata rows ahead of the column header in census exports.
pub const DEFAULT_PREAMBLE_LINES: usize = 4;

/// One `Range` row of a region, kept as read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandRow {
    pub line: u64,
    /// Raw `All people` cell, parsed only when summed.
    pub count: String,
}

pub type RegionBands = OrderedMap<String, OrderedMap<String, BandRow>>;

/// Region -> age band -> population, bands kept in file order.
#[derive(Debug, Clone)]
pub struct CensusStore {
    path: PathBuf,
    preamble_lines: usize,
    data: RegionBands,
    loaded: bool,
}

impl CensusStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_preamble(path, DEFAULT_PREAMBLE_LINES)
    }

    pub fn with_preamble(path: impl Into<PathBuf>, preamble_lines: usize) -> Self {
        Self {
            path: path.into(),
            preamble_lines,
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
            warn!(path = %path_display(&self.path), "census file not found");
            return Ok(false);
        }

        let start = Instant::now();
        let (data, rows) = read_census(&self.path, self.preamble_lines)?;
        info!(
            path = %path_display(&self.path),
            rows,
            regions = data.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "loaded census data"
        );
        self.data = data;
        self.loaded = true;
        Ok(true)
    }

    pub fn regions(&self) -> Vec<&str> {
        self.data.keys().map(String::as_str).collect()
    }

    /// Band rows of `region` in the order they appeared in the file.
    pub fn bands(&self, region: &str) -> Option<impl Iterator<Item = (&str, &BandRow)> + '_> {
        self.data
            .get(region)
            .map(|bands| bands.iter().map(|(label, row)| (label.as_str(), row)))
    }

    /// Population of `region` in bands whose representative age is at most
    /// `age_boundary`, `Ok(None)` for an unknown region.
    ///
    /// Bands are walked in file order and the walk stops at the first band
    /// above the boundary, so rows must be sorted by ascending age within each
    /// region. A later, younger band is never counted. Labels and counts are
    /// parsed here, so bad values past the stopping point or in `All people`
    /// rows never raise.
    pub fn total_population(
        &self,
        region: &str,
        age_boundary: u32,
    ) -> Result<Option<u64>, InputError> {
        let Some(bands) = self.data.get(region) else {
            return Ok(None);
        };
        let mut total = 0u64;
        for (label, row) in bands.iter() {
            let age = match AgeBand::from_label(label) {
                Some(AgeBand::AllPeople) => continue,
                Some(AgeBand::Age(age)) => age,
                None => {
                    return Err(InputError::InvalidAgeBand {
                        line: row.line,
                        label: label.clone(),
                    });
                }
            };
            if age > age_boundary {
                break;
            }
            let count: u64 = parse_number(&row.count, COUNT_COLUMN, row.line)?;
            total = total
                .checked_add(count)
                .ok_or_else(|| InputError::Overflow(region.to_string()))?;
        }
        Ok(Some(total))
    }
}

fn read_census(path: &Path, preamble_lines: usize) -> Result<(RegionBands, usize), InputError> {
    let mut data = RegionBands::new();
    let mut reader = open_reader(path)?;
    if !skip_lines(&mut reader, preamble_lines)? {
        debug!(preamble_lines, "census file ended inside preamble");
        return Ok((data, 0));
    }

    let mut csv = csv_reader(reader);
    let headers = csv.byte_headers()?.clone();
    if headers.is_empty() {
        debug!("census file has no header row");
        return Ok((data, 0));
    }
    let region_idx = column_index(&headers, REGION_COLUMN)?;
    let range_idx = column_index(&headers, RANGE_COLUMN)?;
    let count_idx = column_index(&headers, COUNT_COLUMN)?;

    let mut rows = 0usize;
    let mut record = ByteRecord::new();
    while csv.read_byte_record(&mut record)? {
        let line = record_line(&record, preamble_lines);
        let region = field(&record, region_idx, REGION_COLUMN, line)?;
        let label = field(&record, range_idx, RANGE_COLUMN, line)?;
        let count = field(&record, count_idx, COUNT_COLUMN, line)?;

        data.get_or_insert_with(region, OrderedMap::new)
            .insert(label, BandRow { line, count });
        rows += 1;
    }

    Ok((data, rows))
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/census.rs"]
mod tests;
