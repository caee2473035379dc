//! Command-line arguments

use clap::Parser;

/// Live terminal weather dashboard
#[derive(Debug, Parser)]
#[command(name = "weatherdash-live")]
#[command(author, version, about = "Live terminal weather dashboard", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// City to follow; prompts on the terminal when omitted
    #[arg(short, long, env = "WEATHERDASH_LOCATION")]
    pub location: Option<String>,

    /// Width of the sparklines in characters
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Disable ANSI colors
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Log filter level from the verbosity count
    #[must_use]
    pub const fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
