use crate::commands::Commands;

use mn_cli::DEFAULT_SERVER_URL;

use clap::Parser;

#[derive(Parser)]
#[command(name = "mn")]
#[command(about = "MicroNet control plane CLI")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Control plane URL
    #[arg(long, global = true, default_value = DEFAULT_SERVER_URL)]
    pub(crate) server: String,

    /// Role to declare (`client` or `manager`) when auth is disabled
    #[arg(long, global = true)]
    pub(crate) role: Option<String>,

    /// Bearer token carrying the role claim when auth is enabled
    #[arg(long, global = true)]
    pub(crate) token: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub(crate) pretty: bool,
}
