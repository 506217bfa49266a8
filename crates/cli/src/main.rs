use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use lykke_core::{Exchange, OrderFilter, OrderType, Params, Side};
use lykke_exchange::{LykkeConfig, LykkeExchange};
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "lykke")]
#[command(about = "Query Lykke market data and manage orders through the unified exchange interface")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// HFT API key (overrides the config file)
    #[arg(long, env = "LYKKE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Use the test environment
    #[arg(long)]
    sandbox: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tradeable asset pairs
    Markets,

    /// Best bid/ask for a market
    Ticker {
        /// Unified symbol (e.g. "BTC/USD")
        symbol: String,
    },

    /// Order book for a market
    Book { symbol: String },

    /// Wallet balances
    Balance,

    /// List orders
    Orders {
        #[arg(short, long, value_enum, default_value = "all")]
        status: StatusArg,
    },

    /// Look up one order by id
    Order { id: String },

    /// Buy (limit when --price is given, market otherwise)
    Buy {
        symbol: String,
        amount: Decimal,
        #[arg(short, long)]
        price: Option<Decimal>,
    },

    /// Sell (limit when --price is given, market otherwise)
    Sell {
        symbol: String,
        amount: Decimal,
        #[arg(short, long)]
        price: Option<Decimal>,
    },

    /// Cancel an order
    Cancel { id: String },

    /// Print exchange metadata, fees and endpoint URLs
    Describe,
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    All,
    Open,
    Closed,
}

impl From<StatusArg> for OrderFilter {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::All => OrderFilter::All,
            StatusArg::Open => OrderFilter::Open,
            StatusArg::Closed => OrderFilter::Closed,
        }
    }
}

fn load_config(cli: &Cli) -> Result<LykkeConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            LykkeConfig::from_toml_str(&text)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => LykkeConfig::default(),
    };
    if cli.api_key.is_some() {
        config.api_key = cli.api_key.clone();
    }
    if cli.sandbox {
        config.sandbox = true;
    }
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn place(
    exchange: &LykkeExchange,
    symbol: &str,
    side: Side,
    amount: Decimal,
    price: Option<Decimal>,
) -> Result<()> {
    let order_type = if price.is_some() {
        OrderType::Limit
    } else {
        OrderType::Market
    };
    let placement = exchange
        .create_order(symbol, order_type, side, amount, price, Params::new())
        .await?;
    print_json(&placement)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli)?;
    tracing::debug!(sandbox = config.sandbox, "Configuration loaded");
    let exchange = LykkeExchange::new(config)?;

    match cli.command {
        Commands::Markets => {
            let mut markets: Vec<_> = exchange.load_markets(false).await?.into_values().collect();
            markets.sort_by(|a, b| a.symbol.cmp(&b.symbol));
            print_json(&markets)?;
        }
        Commands::Ticker { symbol } => {
            print_json(&exchange.fetch_ticker(&symbol, Params::new()).await?)?;
        }
        Commands::Book { symbol } => {
            print_json(&exchange.fetch_order_book(&symbol, Params::new()).await?)?;
        }
        Commands::Balance => {
            print_json(&exchange.fetch_balance().await?)?;
        }
        Commands::Orders { status } => {
            let orders = exchange.fetch_orders_by(status.into(), Params::new()).await?;
            tracing::info!(count = orders.len(), "Fetched orders");
            print_json(&orders)?;
        }
        Commands::Order { id } => {
            print_json(&exchange.fetch_order(&id, Params::new()).await?)?;
        }
        Commands::Buy {
            symbol,
            amount,
            price,
        } => place(&exchange, &symbol, Side::Buy, amount, price).await?,
        Commands::Sell {
            symbol,
            amount,
            price,
        } => place(&exchange, &symbol, Side::Sell, amount, price).await?,
        Commands::Cancel { id } => {
            print_json(&exchange.cancel_order(&id).await?)?;
        }
        Commands::Describe => {
            print_json(&exchange.describe())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_limit_sell() {
        let cli = Cli::try_parse_from(["lykke", "sell", "BTC/USD", "0.5", "--price", "9000"]).unwrap();
        match cli.command {
            Commands::Sell {
                symbol,
                amount,
                price,
            } => {
                assert_eq!(symbol, "BTC/USD");
                assert_eq!(amount, Decimal::new(5, 1));
                assert_eq!(price, Some(Decimal::new(9000, 0)));
            }
            _ => panic!("Expected sell"),
        }
    }

    #[test]
    fn test_flags_override_config_defaults() {
        let cli = Cli::try_parse_from(["lykke", "--api-key", "k", "--sandbox", "balance"]).unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert!(config.sandbox);
    }

    #[test]
    fn test_orders_status_filter() {
        let cli = Cli::try_parse_from(["lykke", "orders", "--status", "closed"]).unwrap();
        match cli.command {
            Commands::Orders { status } => {
                assert_eq!(OrderFilter::from(status), OrderFilter::Closed)
            }
            _ => panic!("Expected orders"),
        }
    }
}
