use clap::Subcommand;
use crate::config::constants::DEFAULT_ISSUE_LIMIT;

#[derive(Subcommand)]
pub enum Commands {
    Init,
    Analyze {
        #[clap(short, long)]
        repo: Option<String>,
        #[clap(short, long)]
        labels: Vec<String>,
        #[clap(short, long)]
        keywords: Vec<String>,
        #[clap(long, default_value_t = DEFAULT_ISSUE_LIMIT)]
        limit: usize,
        #[clap(short, long)]
        output: Option<String>,
    },
    List,
    Validate,
}
