use crate::check::{run_check, CheckArgs};
use crate::generate::{run_generate, GenerateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use ihic::config::AppConfig;
use ihic::error::AppError;
use ihic::telemetry;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ihic-site",
    about = "Generate and preview the i-HIC halal inventory pages from a spreadsheet export",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate item pages and the index from the inventory CSV (default command)
    Generate(GenerateArgs),
    /// Classify a single expiry value
    Check(CheckArgs),
    /// Serve the generated pages locally for preview
    Serve(ServeArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the preview server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the preview server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Directory to serve (defaults to the configured output directory)
    #[arg(long)]
    pub(crate) dir: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Generate(GenerateArgs::default()));

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match command {
        Command::Generate(args) => run_generate(&config.site, args),
        Command::Check(args) => run_check(args),
        Command::Serve(args) => server::run(config, args).await,
    }
}
