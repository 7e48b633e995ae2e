use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use valuta::core::log::init_logging;
use valuta::store::ThemeMode;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Use the live rate table even when mock mode is enabled
    #[arg(short, long, global = true)]
    live: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount between two currencies
    Convert {
        amount: String,
        from: String,
        to: String,
    },
    /// Convert an amount into several currencies at once
    Multi {
        amount: String,
        /// Base currency followed by quote currencies; favourites when omitted
        currencies: Vec<String>,
        /// Cyclic shifts promoting the last row to the base
        #[arg(short, long, default_value_t = 0)]
        rotate: u32,
    },
    /// Show the historical cross rate for a currency pair
    History {
        from: String,
        to: String,
        /// Number of calendar days, today going backward
        #[arg(short, long, default_value_t = 7)]
        days: u32,
    },
    /// Fetch the latest live rates
    Sync,
    /// Inspect or change persisted settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Display current settings
    Show,
    /// Store the rate provider API key
    SetKey { key: String },
    /// Toggle offline mock rates
    Mock { state: Toggle },
    /// Toggle the premium plan (switches the provider to HTTPS)
    Premium { state: Toggle },
    /// Replace the three favourite currencies
    Favourites { codes: Vec<String> },
    /// Switch the colour theme
    Theme { mode: ThemeArg },
}

#[derive(Clone, Copy, ValueEnum)]
enum Toggle {
    On,
    Off,
}

impl From<Toggle> for bool {
    fn from(toggle: Toggle) -> bool {
        matches!(toggle, Toggle::On)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
    /// Follow the terminal/system appearance
    System,
}

impl From<Commands> for valuta::AppCommand {
    fn from(cmd: Commands) -> valuta::AppCommand {
        match cmd {
            Commands::Convert { amount, from, to } => {
                valuta::AppCommand::Convert { amount, from, to }
            }
            Commands::Multi {
                amount,
                currencies,
                rotate,
            } => valuta::AppCommand::Multi {
                amount,
                currencies,
                rotate,
            },
            Commands::History { from, to, days } => valuta::AppCommand::History { from, to, days },
            Commands::Sync => valuta::AppCommand::Sync,
            Commands::Settings { command } => match command {
                SettingsCommands::Show => valuta::AppCommand::ShowSettings,
                SettingsCommands::SetKey { key } => valuta::AppCommand::SetApiKey { key },
                SettingsCommands::Mock { state } => valuta::AppCommand::SetMockMode {
                    enabled: state.into(),
                },
                SettingsCommands::Premium { state } => valuta::AppCommand::SetPremium {
                    enabled: state.into(),
                },
                SettingsCommands::Favourites { codes } => {
                    valuta::AppCommand::SetFavourites { codes }
                }
                SettingsCommands::Theme { mode } => valuta::AppCommand::SetTheme {
                    theme: match mode {
                        ThemeArg::Light => Some(ThemeMode::Light),
                        ThemeArg::Dark => Some(ThemeMode::Dark),
                        ThemeArg::System => None,
                    },
                },
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => valuta::cli::setup::setup(),
        Some(cmd) => valuta::run_command(cmd.into(), cli.config_path.as_deref(), cli.live).await,
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
