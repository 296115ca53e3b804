use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use tracing::info;

use crate::analysis::run_analysis;
use crate::config::{AnalysisConfig, load_config};
use crate::input::census::CensusStore;
use crate::input::path_display;
use crate::input::simd::SimdStore;
use crate::report::json::{to_json, write_summary};
use crate::report::text::render_report;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Optional TOML config
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,

    /// Census CSV (overrides config)
    #[arg(long)]
    pub(crate) census: Option<PathBuf>,

    /// SIMD CSV (overrides config)
    #[arg(long)]
    pub(crate) simd: Option<PathBuf>,

    /// Oldest age counted in the population total (overrides config)
    #[arg(long)]
    pub(crate) age_boundary: Option<u32>,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "text")]
    pub(crate) format: Format,

    /// Optional directory for summary.json
    #[arg(long)]
    pub(crate) out: Option<PathBuf>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

impl RunArgs {
    pub(crate) fn resolve(&self) -> anyhow::Result<AnalysisConfig> {
        let mut cfg = match &self.config {
            Some(path) => load_config(path)?,
            None => AnalysisConfig::default(),
        };
        if let Some(path) = &self.census {
            cfg.census_path = path.clone();
        }
        if let Some(path) = &self.simd {
            cfg.simd_path = path.clone();
        }
        if let Some(age) = self.age_boundary {
            cfg.age_boundary = age;
        }
        Ok(cfg)
    }
}

pub fn handle(args: RunArgs) -> anyhow::Result<()> {
    let cfg = args.resolve()?;

    let start = Instant::now();
    info!(stage = "census", "loading");
    let mut census = CensusStore::with_preamble(&cfg.census_path, cfg.census_preamble_lines);
    if !census.load()? {
        anyhow::bail!("census file not found: {}", path_display(census.path()));
    }
    info!(
        stage = "census",
        elapsed_ms = start.elapsed().as_millis(),
        "finished"
    );

    let start = Instant::now();
    info!(stage = "simd", "loading");
    let mut simd = SimdStore::new(&cfg.simd_path);
    if !simd.load()? {
        anyhow::bail!("simd file not found: {}", path_display(simd.path()));
    }
    info!(
        stage = "simd",
        elapsed_ms = start.elapsed().as_millis(),
        "finished"
    );

    let summary = run_analysis(&census, &simd, cfg.age_boundary)?;
    if summary.population.is_none() {
        tracing::warn!(region = %summary.region, "region has no census rows");
    }

    match args.format {
        Format::Text => print!("{}", render_report(&summary)),
        Format::Json => println!("{}", to_json(&summary)?),
    }

    if let Some(out) = &args.out {
        std::fs::create_dir_all(out)?;
        write_summary(out, &summary)?;
    }
    Ok(())
}
