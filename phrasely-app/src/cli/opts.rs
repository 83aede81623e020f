use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[command(name = "phrasely", version, about = "Phrasely scheduler preview CLI/API")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Compute interval previews for all four ratings (CLI)
    Preview(PreviewCmd),
    /// Commit one rating and print the updated snapshot (CLI)
    Apply(ApplyCmd),
    /// Launch the Axum HTTP API
    Api(ApiCmd),
}

#[derive(Debug, Args, Clone)]
pub struct PreviewCmd {
    /// Request JSON file; reads stdin when omitted
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Print the full response JSON instead of the summary lines
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ApplyCmd {
    /// Request JSON file; reads stdin when omitted
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Rating to commit (again/hard/good/easy); overrides the request body
    #[arg(long)]
    pub rating: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct ApiCmd {
    /// Bind address (host:port)
    #[arg(long, default_value = "127.0.0.1:8787")]
    pub addr: String,
}
