// CLI module for vizor

use clap::Parser;

/// vizor - Azure AI Vision image analysis demo server
#[derive(Parser, Debug)]
#[command(name = "vizor", version, about, long_about = None)]
pub struct Args {
    /// Override the address the server binds to
    #[arg(long)]
    pub host: Option<String>,

    /// Override the port the server listens on
    #[arg(long)]
    pub port: Option<u16>,
}
