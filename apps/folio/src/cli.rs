use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub const DEFAULT_PUSH_MESSAGE: &str = "Auto commit: push full repo";

#[derive(Parser, Debug)]
#[command(
    name = "folio",
    version,
    about = "Generate portfolio pages from a resume and publish them to GitHub"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate index.html from the resume and publish it
    Portfolio {
        #[arg(long, default_value_t = false, help = "Write files locally only")]
        no_publish: bool,
    },
    /// Generate summary.html and summary.css and publish them
    Summary {
        #[arg(long, default_value_t = false, help = "Write files locally only")]
        no_publish: bool,
    },
    /// Publish every eligible file under a directory in one commit
    Push {
        #[arg(long, default_value = ".")]
        root: PathBuf,
        #[arg(long, default_value = DEFAULT_PUSH_MESSAGE)]
        message: String,
    },
}
