use std::fmt;

/// Label of the pre-aggregated total row, excluded from every sum.
pub const ALL_PEOPLE: &str = "All people";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBand {
    AllPeople,
    /// Representative age used for threshold comparison.
    Age(u32),
}

impl AgeBand {
    /// Classifies a census `Range` label.
    ///
    /// Open-ended and upper bands use fixed ages (`85 to 89` is 89, `90 to 94`
    /// is 94, `95 and over` is 100); every other label is read from its integer
    /// prefix, so `1 to 4` is 1. Returns `None` when no prefix can be read.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            ALL_PEOPLE => Some(AgeBand::AllPeople),
            "Under 1" => Some(AgeBand::Age(0)),
            "85 to 89" => Some(AgeBand::Age(89)),
            "90 to 94" => Some(AgeBand::Age(94)),
            "95 and over" => Some(AgeBand::Age(100)),
            other => {
                let trimmed = other.trim_start();
                let end = trimmed
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(trimmed.len());
                trimmed[..end].parse().ok().map(AgeBand::Age)
            }
        }
    }
}

impl fmt::Display for AgeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgeBand::AllPeople => f.write_str("total"),
            AgeBand::Age(age) => write!(f, "{age}"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/age_band.rs"]
mod tests;
