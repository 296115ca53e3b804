use std::path::PathBuf;

use clap::Args;

use crate::input::census::{CensusStore, DEFAULT_PREAMBLE_LINES};
use crate::input::path_display;
use crate::model::age_band::AgeBand;

#[derive(Args, Debug)]
pub struct BandsArgs {
    /// Census CSV
    #[arg(long)]
    input: PathBuf,

    /// Region name, matched exactly
    #[arg(long)]
    region: String,

    /// Metadata lines before the census header
    #[arg(long, default_value_t = DEFAULT_PREAMBLE_LINES)]
    preamble: usize,
}

pub fn handle(args: BandsArgs) -> anyhow::Result<()> {
    let mut store = CensusStore::with_preamble(&args.input, args.preamble);
    if !store.load()? {
        anyhow::bail!("census file not found: {}", path_display(store.path()));
    }
    let Some(bands) = store.bands(&args.region) else {
        anyhow::bail!("region not in census: {}", args.region);
    };
    println!("range\tage\tcount");
    for (label, row) in bands {
        let age = match AgeBand::from_label(label) {
            Some(band) => band.to_string(),
            None => "?".to_string(),
        };
        println!("{}\t{}\t{}", label, age, row.count);
    }
    Ok(())
}
