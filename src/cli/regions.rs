use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::input::census::{CensusStore, DEFAULT_PREAMBLE_LINES};
use crate::input::path_display;
use crate::input::simd::SimdStore;

#[derive(Args, Debug)]
pub struct RegionsArgs {
    /// Which kind of file `--input` is
    #[arg(value_enum)]
    pub(crate) dataset: Dataset,

    /// Input CSV
    #[arg(long)]
    pub(crate) input: PathBuf,

    /// Metadata lines before the census header
    #[arg(long, default_value_t = DEFAULT_PREAMBLE_LINES)]
    pub(crate) preamble: usize,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dataset {
    Census,
    Simd,
}

pub fn handle(args: RegionsArgs) -> anyhow::Result<()> {
    match args.dataset {
        Dataset::Census => {
            let mut store = CensusStore::with_preamble(&args.input, args.preamble);
            if !store.load()? {
                anyhow::bail!("census file not found: {}", path_display(store.path()));
            }
            for region in store.regions() {
                println!("{region}");
            }
        }
        Dataset::Simd => {
            let mut store = SimdStore::new(&args.input);
            if !store.load()? {
                anyhow::bail!("simd file not found: {}", path_display(store.path()));
            }
            println!("region\taverage_rank");
            for (region, avg) in store.iter() {
                println!("{region}\t{avg:.2}");
            }
        }
    }
    Ok(())
}
