pub mod age_band;
pub mod ordered;
