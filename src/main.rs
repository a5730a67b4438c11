use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use curconv::core::log::init_logging;

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

impl From<Commands> for curconv::AppCommand {
    fn from(cmd: Commands) -> curconv::AppCommand {
        match cmd {
            Commands::Convert { from, to, amount } => {
                curconv::AppCommand::Convert { from, to, amount }
            }
            Commands::Form => curconv::AppCommand::Form,
            Commands::Currencies => curconv::AppCommand::Currencies,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount between two currencies
    Convert {
        /// Source currency code (defaults to the configured currency)
        #[arg(short, long)]
        from: Option<String>,
        /// Target currency code (defaults to the configured currency)
        #[arg(short, long)]
        to: Option<String>,
        /// Amount in the source currency
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Fill in the converter form interactively
    Form,
    /// List supported currencies
    Currencies,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let result = match cli.command {
        Some(Commands::Setup) => curconv::cli::setup::setup(),
        Some(cmd) => curconv::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
