//! P2P CLI
//!
//! Drive the P2P form engine from the command line.
//!
//! # Usage
//!
//! ```bash
//! p2p categories
//! p2p schema bank_transfer --format json
//! p2p payment-methods add --category alipay --field alipay_id=me@example.com
//! p2p ads validate --total 100 --rate 15.5 --min 50 --max 80
//! p2p ads create --type sell --total 100 --rate 15.5 --min 50 --max 80 --method alipay
//! ```

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use p2p_forms::{FormsConfig, TradeType};

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "p2p")]
#[command(version)]
#[command(about = "P2P payment method and ad forms", long_about = None)]
struct Cli {
    /// Output format
    #[arg(long, short, global = true, default_value = "table")]
    format: output::OutputFormat,

    /// Profile name from config file
    #[arg(long, short, global = true, env = "P2P_PROFILE")]
    profile: Option<String>,

    /// Log filter when RUST_LOG is unset (overrides config)
    #[arg(long, global = true, env = "P2P_LOG")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List payment method categories
    Categories,
    /// Show the compiled form schema of a category
    Schema { category: String },
    /// Add or inspect payment methods
    PaymentMethods {
        #[command(subcommand)]
        action: PaymentMethodCommands,
    },
    /// Validate or create ads
    Ads {
        #[command(subcommand)]
        action: AdCommands,
    },
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum PaymentMethodCommands {
    /// Fill and submit an add-payment-method form
    Add {
        #[arg(long)]
        category: String,
        /// Field value as name=value; repeatable
        #[arg(long = "field", short = 'F')]
        fields: Vec<String>,
        #[arg(long)]
        notes: Option<String>,
        /// JSON file of already saved methods, checked for duplicates
        #[arg(long)]
        saved: Option<String>,
    },
    /// Display saved methods from a JSON file
    Show { file: String },
}

#[derive(Args)]
struct AdAmounts {
    #[arg(long, allow_hyphen_values = true)]
    total: String,
    #[arg(long, allow_hyphen_values = true)]
    rate: String,
    #[arg(long, allow_hyphen_values = true)]
    min: String,
    #[arg(long, allow_hyphen_values = true)]
    max: String,
}

#[derive(Subcommand)]
enum AdCommands {
    /// Check ad amounts against the cross-field rules
    Validate {
        #[command(flatten)]
        amounts: AdAmounts,
    },
    /// Fill and submit an ad-details form
    Create {
        #[arg(long = "type", default_value = "buy", value_parser = parse_trade_type)]
        trade_type: TradeType,
        #[command(flatten)]
        amounts: AdAmounts,
        /// Accepted payment method key; repeatable
        #[arg(long = "method", short = 'm')]
        methods: Vec<String>,
        #[arg(long, default_value = "")]
        description: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write the default configuration
    Init,
    /// Print the effective configuration
    Show,
    /// Print the configuration file path
    Path,
}

fn parse_trade_type(raw: &str) -> Result<TradeType, String> {
    TradeType::from_str_loose(raw).ok_or_else(|| format!("expected buy or sell, got `{raw}`"))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = FormsConfig::load(cli.profile.as_deref()).unwrap_or_else(|e| {
        eprintln!("Warning: {e}; using defaults");
        FormsConfig::default()
    });
    let log_level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or(log_level),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!(profile = ?cli.profile, "configuration loaded");

    let format = cli.format;
    let result = match cli.command {
        Commands::Categories => commands::categories::list(format),
        Commands::Schema { category } => commands::categories::schema(&category, format),
        Commands::PaymentMethods { action } => commands::payment_methods::handle(action, format).await,
        Commands::Ads { action } => match action {
            AdCommands::Validate { amounts } => commands::ads::validate(&amounts, format),
            AdCommands::Create { trade_type, amounts, methods, description } => {
                commands::ads::create(trade_type, &amounts, &methods, &description, config.ads, format)
                    .await
            }
        },
        Commands::Config { action } => {
            commands::config::handle(action, cli.profile.as_deref(), format)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
