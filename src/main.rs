//! fxdesk CLI.
//!
//! Computes indicators, trading signals, position sizes, account exposure,
//! and journal performance from exported account, trade, and price records.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use fxdesk::indicators::{fibonacci, snapshot, SignalAggregator, SignalConfig};
use fxdesk::metrics::{Leaderboard, LeaderboardConfig, MetricsCalculator};
use fxdesk::models::{SignalDirection, SignalReport, TimeWindow, TradeType};
use fxdesk::risk::{account_exposure, margin, risk_reward, PositionSizer, RiskAssessor, RiskConfig};
use fxdesk::store::RecordStore;

/// Forex desk analytics CLI.
#[derive(Parser)]
#[command(name = "fxdesk")]
#[command(about = "Risk metrics and technical indicators for forex trading accounts", long_about = None)]
struct Cli {
    /// Directory holding account, journal, and price exports
    #[arg(short, long, env = "FXDESK_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "FXDESK_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute every indicator for a price series
    Indicators {
        /// Price series file (JSON array, oldest first)
        #[arg(short, long)]
        prices: PathBuf,
    },

    /// Aggregate RSI, MACD, and Bollinger votes into a recommendation
    Signals {
        /// Price series file (JSON array, oldest first)
        #[arg(short, long)]
        prices: PathBuf,
    },

    /// Fibonacci retracement levels between a swing high and low
    Fibonacci {
        #[arg(long)]
        high: f64,

        #[arg(long)]
        low: f64,
    },

    /// Position size for a fixed-risk trade
    PositionSize {
        /// Account balance
        #[arg(short, long)]
        balance: f64,

        /// Percentage of balance to risk (e.g. 1 for 1%)
        #[arg(short, long)]
        risk: f64,

        /// Stop loss distance in pips
        #[arg(short, long)]
        stop_loss_pips: f64,

        /// Value of one pip per lot
        #[arg(short, long, default_value = "10")]
        pip_value: f64,
    },

    /// Margin required to open a position
    Margin {
        /// Position size in lots
        #[arg(long)]
        lots: f64,

        /// Units per lot
        #[arg(long, default_value = "100000")]
        contract_size: f64,

        /// Leverage in broker notation
        #[arg(long, default_value = "1:100")]
        leverage: String,

        /// Current price
        #[arg(long)]
        price: f64,
    },

    /// Risk/reward ratio of a trade setup
    RiskReward {
        #[arg(long)]
        entry: f64,

        #[arg(long)]
        stop_loss: f64,

        #[arg(long)]
        take_profit: f64,

        /// buy/long or sell/short
        #[arg(long, default_value = "buy")]
        side: TradeType,
    },

    /// Aggregate exposure across trading accounts
    Exposure {
        #[arg(short, long, default_value = "accounts.json")]
        accounts: PathBuf,
    },

    /// Journal performance metrics over a time window
    Metrics {
        #[arg(short, long, default_value = "trades.json")]
        trades: PathBuf,

        #[arg(short, long, default_value = "accounts.json")]
        accounts: PathBuf,

        /// Time window (1d, 7d, 30d, 90d, 1y, all)
        #[arg(short, long, default_value = "30d")]
        window: TimeWindow,
    },

    /// Qualitative risk assessment of accounts and journal
    Assess {
        #[arg(short, long, default_value = "trades.json")]
        trades: PathBuf,

        #[arg(short, long, default_value = "accounts.json")]
        accounts: PathBuf,

        /// Time window (1d, 7d, 30d, 90d, 1y, all)
        #[arg(short, long, default_value = "30d")]
        window: TimeWindow,
    },

    /// Rank traders by journal performance
    Leaderboard {
        #[arg(short, long, default_value = "trades.json")]
        trades: PathBuf,

        /// Time window (1d, 7d, 30d, 90d, 1y, all)
        #[arg(short, long, default_value = "30d")]
        window: TimeWindow,

        /// Maximum number of traders to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Setup logging; RUST_LOG takes precedence over --log-level
    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(LevelFilter::from_level(log_level).into()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let store = RecordStore::new(&cli.data_dir);
    let signal_config = SignalConfig::default();
    let risk_config = RiskConfig::default();
    let leaderboard_config = LeaderboardConfig::default();

    match cli.command {
        Commands::Indicators { prices } => {
            let points = store.load_prices(&prices).await?;
            info!(points = points.len(), file = %prices.display(), "Computing indicators");

            let result = snapshot(&points, &signal_config);

            if cli.json {
                return print_json(&result);
            }

            println!("\n=== Indicators ({} points) ===", points.len());
            println!("SMA 20:          {}", fmt_opt(result.sma20));
            println!("SMA 50:          {}", fmt_opt(result.sma50));
            println!("EMA 12:          {}", fmt_opt(result.ema12));
            println!("EMA 26:          {}", fmt_opt(result.ema26));
            println!("RSI:             {}", fmt_opt(result.rsi));

            match result.macd {
                Some(m) => println!(
                    "MACD:            {:.5} (signal {:.5}, histogram {:.5})",
                    m.macd, m.signal, m.histogram
                ),
                None => println!("MACD:            n/a"),
            }
            match result.bollinger_bands {
                Some(b) => println!(
                    "Bollinger:       {:.5} / {:.5} / {:.5} (width {:.5})",
                    b.upper,
                    b.middle,
                    b.lower,
                    b.width()
                ),
                None => println!("Bollinger:       n/a"),
            }
            match result.stochastic {
                Some(s) => println!("Stochastic:      %K {:.2}  %D {:.2}", s.k, s.d),
                None => println!("Stochastic:      n/a"),
            }
            match result.support_resistance {
                Some(l) => println!(
                    "Support/Resist:  {:.5} / {:.5} (last {:.5})",
                    l.support, l.resistance, l.current_price
                ),
                None => println!("Support/Resist:  n/a"),
            }

            let withheld = result.withheld();
            if !withheld.is_empty() {
                println!("\nNot enough data for: {}", withheld.join(", "));
            }
        }

        Commands::Signals { prices } => {
            let points = store.load_prices(&prices).await?;
            info!(points = points.len(), file = %prices.display(), "Evaluating trading signals");

            let min_points = signal_config.min_points;
            let report = SignalAggregator::new(signal_config).evaluate(&points);

            if cli.json {
                return print_json(&report);
            }

            match report {
                SignalReport::Insufficient { summary, .. } => {
                    println!("{} (need at least {} price points, got {})", summary, min_points, points.len());
                }
                SignalReport::Summary(summary) => {
                    println!("\n{:<18} {:<6} {:<8} {:>12}", "INDICATOR", "VOTE", "STRENGTH", "VALUE");
                    println!("{}", "-".repeat(47));
                    for s in &summary.signals {
                        println!(
                            "{:<18} {:<6} {:<8} {:>12.5}",
                            s.indicator,
                            if s.signal == SignalDirection::Buy { "BUY" } else { "SELL" },
                            s.strength.as_str(),
                            s.value
                        );
                    }
                    println!(
                        "\nRecommendation: {} ({}), {} buy / {} sell",
                        summary.recommendation.as_str(),
                        summary.strength.as_str(),
                        summary.buy_signals,
                        summary.sell_signals
                    );
                }
            }
        }

        Commands::Fibonacci { high, low } => {
            let levels = fibonacci(high, low);

            if cli.json {
                return print_json(&levels);
            }

            println!("\n=== Fibonacci Retracement {:.5} -> {:.5} ===", high, low);
            for level in &levels {
                println!("  {:<6} {:>12.5}", level.level, level.price);
            }
        }

        Commands::PositionSize {
            balance,
            risk,
            stop_loss_pips,
            pip_value,
        } => {
            let size = PositionSizer::new(risk_config).position_size(balance, risk, stop_loss_pips, pip_value);

            if cli.json {
                return print_json(&serde_json::json!({ "positionSize": size }));
            }
            println!("Position size: {:.2} lots", size);
        }

        Commands::Margin {
            lots,
            contract_size,
            leverage,
            price,
        } => {
            let required = margin(lots, contract_size, &leverage, price);

            if cli.json {
                return print_json(&serde_json::json!({ "margin": required }));
            }
            println!("Required margin: ${:.2}", required);
        }

        Commands::RiskReward {
            entry,
            stop_loss,
            take_profit,
            side,
        } => {
            let result = risk_reward(entry, stop_loss, take_profit, side);

            if cli.json {
                return print_json(&result);
            }

            match result {
                Some(rr) => {
                    println!("Risk:    {:.5}", rr.risk);
                    println!("Reward:  {:.5}", rr.reward);
                    println!("Ratio:   1:{:.2}", rr.ratio);
                }
                None => println!("Invalid setup: stop loss is not on the losing side of entry for a {} trade", side),
            }
        }

        Commands::Exposure { accounts } => {
            let accounts = store.load_accounts(&accounts).await?;
            let report = account_exposure(&accounts);

            if cli.json {
                return print_json(&report);
            }

            println!(
                "\n{:<14} {:>12} {:>12} {:>12} {:>10} {:>12}",
                "ACCOUNT", "BALANCE", "EQUITY", "MARGIN", "LEVEL%", "FREE"
            );
            println!("{}", "-".repeat(77));
            for line in &report.accounts {
                println!(
                    "{:<14} {:>12.2} {:>12.2} {:>12.2} {:>10.1} {:>12.2}",
                    truncate(line.account_id.as_deref().unwrap_or("-"), 14),
                    line.balance,
                    line.equity,
                    line.margin,
                    line.margin_level,
                    line.free_margin
                );
            }
            println!("{}", "-".repeat(77));
            println!(
                "{:<14} {:>12.2} {:>12.2} {:>12.2} {:>10.1} {:>12.2}",
                "TOTAL",
                report.total_balance,
                report.total_equity,
                report.total_margin,
                report.margin_level,
                report.free_margin
            );
        }

        Commands::Metrics {
            trades,
            accounts,
            window,
        } => {
            let (accounts, trades) =
                futures::try_join!(store.load_accounts(&accounts), store.load_trades(&trades))?;
            info!(trades = trades.len(), window = %window, "Calculating journal metrics");

            let exposure = account_exposure(&accounts);
            let m = MetricsCalculator::calculate(&trades, window, Utc::now(), Some(&exposure));

            if cli.json {
                return print_json(&m);
            }

            println!("\n--- Performance ({}) ---", m.time_window);
            println!("Total Trades:   {}", m.total_trades);
            println!("Total Profit:   ${:.2}", m.total_profit);
            println!("Avg Profit:     ${:.2}", m.average_profit);

            println!("\n--- Win/Loss ---");
            println!("Win Rate:       {:.1}%", m.win_rate);
            println!("Winning Trades: {}", m.winning_trades);
            println!("Losing Trades:  {}", m.losing_trades);
            println!("Avg Win:        ${:.2}", m.average_win);
            println!("Avg Loss:       ${:.2}", m.average_loss);
            println!("Largest Win:    ${:.2}", m.largest_win);
            println!("Largest Loss:   ${:.2}", m.largest_loss);
            println!("Profit Factor:  {:.2}", m.profit_factor);

            println!("\n--- Risk Metrics ---");
            println!("Max Drawdown:   ${:.2}", m.max_drawdown);
            println!("Sharpe Ratio:   {:.2}", m.sharpe_ratio);
            println!("Margin/Equity:  {:.1}%", m.risk_to_equity_ratio);
        }

        Commands::Assess {
            trades,
            accounts,
            window,
        } => {
            let (accounts, trades) =
                futures::try_join!(store.load_accounts(&accounts), store.load_trades(&trades))?;
            info!(accounts = accounts.len(), trades = trades.len(), "Assessing risk");

            let exposure = account_exposure(&accounts);
            let m = MetricsCalculator::calculate(&trades, window, Utc::now(), Some(&exposure));
            let assessment = RiskAssessor::new(risk_config).assess(&exposure, &m);

            if cli.json {
                return print_json(&serde_json::json!({
                    "exposure": exposure,
                    "metrics": m,
                    "assessment": assessment,
                }));
            }

            println!("\n=== Risk Assessment ({}) ===", window);
            println!("Risk Level:     {}", assessment.risk_level);
            println!("Margin Level:   {:.1}%", exposure.margin_level);
            println!("Margin/Equity:  {:.1}%", m.risk_to_equity_ratio);
            println!("Max Drawdown:   ${:.2}", m.max_drawdown);

            if assessment.warnings.is_empty() {
                println!("\nNo warnings.");
            }
            for (warning, recommendation) in assessment.warnings.iter().zip(&assessment.recommendations) {
                println!("\n  ! {}", warning);
                println!("    -> {}", recommendation);
            }
        }

        Commands::Leaderboard {
            trades,
            window,
            limit,
        } => {
            let trades = store.load_trades(&trades).await?;
            info!(trades = trades.len(), window = %window, limit = limit, "Building leaderboard");

            let board = Leaderboard::new(leaderboard_config).rank(&trades, window, Utc::now(), limit);

            if cli.json {
                return print_json(&board);
            }

            if board.is_empty() {
                println!("No traders with enough journal trades in the last {}.", window);
                return Ok(());
            }

            println!(
                "\n{:>4} {:<20} {:>7} {:>8} {:>12} {:>8} {:>8}",
                "RANK", "TRADER", "TRADES", "WIN%", "PROFIT", "PF", "SCORE"
            );
            println!("{}", "-".repeat(72));
            for entry in &board {
                println!(
                    "{:>4} {:<20} {:>7} {:>7.1}% {:>12.2} {:>8.2} {:>8.1}",
                    entry.rank,
                    truncate(&entry.trader, 20),
                    entry.total_trades,
                    entry.win_rate,
                    entry.total_profit,
                    entry.profit_factor,
                    entry.score
                );
            }
        }

        Commands::Config => {
            if cli.json {
                return print_json(&serde_json::json!({
                    "dataDir": store.root(),
                    "signals": signal_config,
                    "risk": risk_config,
                    "leaderboard": leaderboard_config,
                }));
            }

            println!("\n=== Data ===\n");
            println!("  Data Directory:       {}", store.root().display());

            println!("\n=== Signal Configuration ===\n");
            println!("  Min Price Points:     {}", signal_config.min_points);
            println!("  RSI Period:           {}", signal_config.rsi_period);
            println!(
                "  RSI Oversold/Bought:  {}/{}",
                signal_config.rsi_oversold, signal_config.rsi_overbought
            );
            println!(
                "  MACD Periods:         {}/{}/{}",
                signal_config.macd_fast, signal_config.macd_slow, signal_config.macd_signal
            );
            println!(
                "  Bollinger:            {} periods, {} sigma",
                signal_config.bollinger_period, signal_config.bollinger_std_dev
            );
            println!("  Stochastic Period:    {}", signal_config.stochastic_period);
            println!("  S/R Lookback:         {}", signal_config.support_resistance_lookback);
            println!(
                "  Votes (dir/strong):   {}/{}",
                signal_config.min_votes, signal_config.strong_votes
            );

            println!("\n=== Risk Configuration ===\n");
            println!("  Max Position:         {}% of balance", risk_config.max_position_fraction * 100.0);
            println!(
                "  Margin Levels:        critical <{}%, high <{}%, medium <{}%",
                risk_config.critical_margin_level,
                risk_config.high_margin_level,
                risk_config.medium_margin_level
            );
            println!("  Max Margin/Equity:    {}%", risk_config.max_risk_to_equity);
            println!("  Drawdown Warning:     {}% of equity", risk_config.max_drawdown_fraction * 100.0);

            println!("\n=== Leaderboard Configuration ===\n");
            println!("  Min Trades:           {}", leaderboard_config.min_trades);
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format an optional indicator reading.
fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.5}", v))
}

/// Truncate a string with ellipsis if too long.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
