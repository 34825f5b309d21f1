use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use xrate::core::CurrencyCode;
use xrate::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List all known currency codes
    List,
    /// Show the exchange rate from one currency to another
    Rate {
        /// Base currency code, e.g. USD
        base: String,
        /// Target currency code, e.g. EUR
        target: String,
    },
    /// Pick currencies and watch rates interactively
    Interactive,
}

impl From<Commands> for xrate::AppCommand {
    fn from(cmd: Commands) -> xrate::AppCommand {
        match cmd {
            Commands::List => xrate::AppCommand::List,
            Commands::Rate { base, target } => xrate::AppCommand::Rate {
                base: CurrencyCode::new(base.to_uppercase()),
                target: CurrencyCode::new(target.to_uppercase()),
            },
            Commands::Interactive => xrate::AppCommand::Interactive,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => xrate::cli::setup::setup(),
        Some(cmd) => xrate::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
