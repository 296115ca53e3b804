use clap::{Parser, Subcommand};

mod bands;
mod regions;
mod run;

#[derive(Parser, Debug)]
#[command(name = "simd-census", version, about = "SIMD and census region analysis")]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report the lowest-ranked region and its young population
    Run(run::RunArgs),
    /// List regions of one input file
    Regions(regions::RegionsArgs),
    /// List the age bands of one census region
    Bands(bands::BandsArgs),
}

impl Cli {
    pub fn dispatch(self) -> anyhow::Result<()> {
        match self.command {
            Command::Run(args) => run::handle(args),
            Command::Regions(args) => regions::handle(args),
            Command::Bands(args) => bands::handle(args),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/cli/mod.rs"]
mod tests;
