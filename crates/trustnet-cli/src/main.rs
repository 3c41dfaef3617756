// crates/trustnet-cli/src/main.rs
//
// CLI entrypoint for the TrustNet developer tools.
//
// Subcommands score an evidence file offline, sign and verify request
// messages, manage the local account key, and query a running daemon.

mod commands;
mod output;
mod rpc_client;

use clap::{Parser, Subcommand};
use commands::score::ScoreArgs;
use commands::sign::{SignArgs, VerifyArgs};
use commands::wallet::WalletCmd;
use output::OutputFormat;

/// TrustNet CLI: composite trust scoring tools.
#[derive(Parser, Debug)]
#[command(
    name = "trustnet",
    version,
    about = "TrustNet CLI: score evidence, sign requests, check the daemon"
)]
struct Cli {
    /// RPC endpoint of the trustnet-daemon.
    #[arg(long, global = true, default_value = "http://localhost:50061")]
    rpc: String,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Score an evidence file with the in-process collaborators.
    Score(ScoreArgs),

    /// Sign a message or a request message with the local account key.
    Sign(SignArgs),

    /// Verify a personal-message signature.
    Verify(VerifyArgs),

    /// Account key management: create, import, export.
    #[command(subcommand)]
    Wallet(WalletCmd),

    /// Query the daemon's health.
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Score(args) => commands::score::run(args, &cli.output).await?,
        Commands::Sign(args) => commands::sign::run_sign(args)?,
        Commands::Verify(args) => commands::sign::run_verify(args, &cli.output)?,
        Commands::Wallet(cmd) => commands::wallet::run(cmd)?,
        Commands::Status => commands::status::run(&cli.rpc, &cli.output).await?,
    }

    Ok(())
}
