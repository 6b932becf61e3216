use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Strip known tracking parameters from URLs", long_about = None)]
pub struct CommandLineArgs {
    /// URLs to clean in one shot; with none given, an interactive session starts
    pub urls: Vec<String>,

    /// Emit each result as a single JSON line instead of the text report
    #[arg(long)]
    pub json: bool,

    /// Print the persisted running total of removed parameters and exit
    #[arg(long)]
    pub stats: bool,

    /// Database URL for the stats store (overrides DATABASE_URL)
    #[arg(long)]
    pub database: Option<String>,
}

impl CommandLineArgs {
    pub fn parse_args() -> Self {
        let args = CommandLineArgs::parse();

        info!("Parsed {} URL(s) from the command line", args.urls.len());

        args
    }
}
