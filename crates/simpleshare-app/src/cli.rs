use clap::Parser;

/// Simple Share — share text snippets between your devices.
#[derive(Parser, Debug)]
#[command(name = "simpleshare", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
