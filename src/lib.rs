pub mod analysis;
pub mod cli;
pub mod config;
pub mod input;
pub mod model;
pub mod report;

pub mod prelude {
    pub use crate::analysis::{AnalysisSummary, run_analysis};
    pub use crate::input::census::CensusStore;
    pub use crate::input::simd::SimdStore;
}
