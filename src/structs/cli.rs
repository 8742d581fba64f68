use clap::Parser;
use crate::enums::commands::Commands;

#[derive(Parser)]
#[clap(name = "onramp")]
#[clap(about = "Contribution guide generator for GitHub repositories", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}
