use anyhow::{Context, Result, bail};
use backtester::Backtester;
use clap::{Args, Parser, Subcommand};
use configuration::{Config, Logging};
use core_types::{Goal, Transaction};
use goals::{MilestoneEngine, evaluate_goals};
use indicators::{IndicatorSeries, IndicatorSpec};
use portfolio::Holding;
use rust_decimal::Decimal;
use scenario::ScenarioProjector;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

mod input;
mod output;

use input::{ScenarioInput, read_json, read_series};

/// The main entry point for the Finsight analytics CLI.
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // A missing .env file is fine; FINSIGHT__* variables may come from the shell.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => configuration::load_config_from(&path.to_string_lossy()),
        None => configuration::load_config(),
    }
    .context("Failed to load configuration")?;

    // Keeps the file writer flushing until the process exits.
    let _guard = init_logging(&config.logging)?;
    tracing::debug!(command = ?cli.command, "Starting");

    match cli.command {
        Commands::Indicators(args) => handle_indicators(args, &config, cli.json),
        Commands::Growth(args) => handle_growth(args, &config, cli.json),
        Commands::Networth(args) => handle_networth(args, &config, cli.json),
        Commands::Goals(args) => handle_goals(args, cli.json),
        Commands::Align(args) => handle_align(args, cli.json),
        Commands::Scenario(args) => handle_scenario(args, &config, cli.json),
        Commands::Spending(args) => handle_spending(args, &config, cli.json),
        Commands::Subscriptions(args) => handle_subscriptions(args, cli.json),
        Commands::Portfolio(args) => handle_portfolio(args, cli.json),
        Commands::Backtest(args) => handle_backtest(args, &config, cli.json),
    }
}

/// Logs to stderr, and additionally to a daily file when `logging.directory` is set.
///
/// `RUST_LOG` takes precedence over `logging.level`.
fn init_logging(logging: &Logging) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .context("Invalid log filter")?;
    let stderr = fmt::layer().with_writer(std::io::stderr);

    match &logging.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "finsight.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .try_init()?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry().with(filter).with(stderr).try_init()?;
            Ok(None)
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Personal-finance analytics: projections, goals, comparisons and backtests.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (defaults to ./config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Overlay SMA and EMA on a dated series.
    Indicators(IndicatorsArgs),
    /// Compound-growth table with inflation-adjusted values.
    Growth(GrowthArgs),
    /// Net-worth progress toward a goal, with milestones.
    Networth(NetworthArgs),
    /// Evaluate monthly spending goals against a transaction ledger.
    Goals(GoalsArgs),
    /// Merge several dated series into one table.
    Align(AlignArgs),
    /// Compare current habits with an adjusted budget.
    Scenario(ScenarioArgs),
    /// Summarise spending, trends and anomalies in a ledger.
    Spending(SpendingArgs),
    /// List merchants that charge repeatedly for the same amount.
    Subscriptions(SpendingArgs),
    /// Value holdings against current quotes, optionally with cash for net worth.
    Portfolio(PortfolioArgs),
    /// Backtest strategies or an allocation preset over price history.
    Backtest(BacktestArgs),
}

#[derive(Args, Debug)]
struct IndicatorsArgs {
    /// JSON file with one series: {"name": ..., "points": [{"date", "value"}]}.
    input: PathBuf,
    /// SMA period (defaults to indicators.sma_period).
    #[arg(long)]
    sma: Option<usize>,
    /// EMA period (defaults to indicators.ema_period).
    #[arg(long)]
    ema: Option<usize>,
}

#[derive(Args, Debug)]
struct GrowthArgs {
    #[arg(long)]
    principal: Decimal,
    #[arg(long, default_value = "0")]
    monthly: Decimal,
    /// Annual return in percent (defaults to scenario.investment_return_rate).
    #[arg(long)]
    rate: Option<Decimal>,
    /// Horizon in years (defaults to scenario.projection_years).
    #[arg(long)]
    years: Option<u32>,
    /// Annual inflation in percent (defaults to scenario.inflation_rate).
    #[arg(long)]
    inflation: Option<Decimal>,
}

#[derive(Args, Debug)]
struct NetworthArgs {
    #[arg(long, allow_hyphen_values = true)]
    current: Decimal,
    /// Explicit goal; the next milestone on the ladder when omitted.
    #[arg(long)]
    target: Option<Decimal>,
    /// Estimated net change per month.
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    monthly_change: Decimal,
    /// Also express the target in today's money at this inflation rate.
    #[arg(long)]
    inflation: Option<Decimal>,
}

#[derive(Args, Debug)]
struct GoalsArgs {
    /// JSON array of goals: [{"name", "target_amount", "category"}].
    #[arg(long)]
    goals: PathBuf,
    /// JSON array of transactions.
    #[arg(long)]
    transactions: PathBuf,
}

#[derive(Args, Debug)]
struct AlignArgs {
    /// Files holding one series or an array of series.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct ScenarioArgs {
    /// JSON with "baseline" and optional adjustments.
    input: PathBuf,
    /// Months of cumulative savings (defaults to scenario.months).
    #[arg(long)]
    months: Option<u32>,
}

#[derive(Args, Debug)]
struct SpendingArgs {
    /// JSON array of transactions.
    transactions: PathBuf,
}

#[derive(Args, Debug)]
struct PortfolioArgs {
    /// JSON array of holdings: [{"symbol", "shares", "purchase_price", "purchase_date", "asset_class"}].
    holdings: PathBuf,
    /// JSON object of current prices keyed by symbol.
    #[arg(long)]
    prices: PathBuf,
    /// Cash savings; adds a net-worth breakdown.
    #[arg(long, allow_hyphen_values = true)]
    cash: Option<Decimal>,
}

#[derive(Args, Debug)]
struct BacktestArgs {
    /// Files holding price series, one per asset.
    #[arg(required = true)]
    prices: Vec<PathBuf>,
    /// Run a configured allocation preset (e.g. 60_40) instead of the strategy comparison.
    #[arg(long)]
    preset: Option<String>,
    /// Series to compare strategies on (defaults to the first one).
    #[arg(long)]
    symbol: Option<String>,
}

// ==============================================================================
// Command Handlers
// ==============================================================================

fn handle_indicators(args: IndicatorsArgs, config: &Config, json: bool) -> Result<()> {
    let series = read_series(&[&args.input])?
        .into_iter()
        .next()
        .context("input holds no series")?;
    let specs = [
        IndicatorSpec::Sma(args.sma.unwrap_or(config.indicators.sma_period)),
        IndicatorSpec::Ema(args.ema.unwrap_or(config.indicators.ema_period)),
    ];
    let annotated = IndicatorSeries::annotate(&series, &specs);
    output::emit(json, &annotated, output::indicators)
}

fn handle_growth(args: GrowthArgs, config: &Config, json: bool) -> Result<()> {
    let s = &config.scenario;
    let rows = projection::growth_table(
        args.principal,
        args.monthly,
        args.rate.unwrap_or(s.investment_return_rate),
        args.years.unwrap_or(s.projection_years),
        args.inflation.unwrap_or(s.inflation_rate),
    )?;
    output::emit(json, rows.as_slice(), output::growth)
}

fn handle_networth(args: NetworthArgs, config: &Config, json: bool) -> Result<()> {
    let engine = MilestoneEngine::new(config.milestones.clone());
    let analysis = engine.analyze(args.current, args.target, args.monthly_change, args.inflation)?;
    output::emit(json, &analysis, output::networth)
}

fn handle_goals(args: GoalsArgs, json: bool) -> Result<()> {
    let goals: Vec<Goal> = read_json(&args.goals)?;
    let transactions: Vec<Transaction> = read_json(&args.transactions)?;
    let averages = spending::monthly_averages(&transactions);
    let results = evaluate_goals(&goals, &averages)?;
    output::emit(json, results.as_slice(), output::goals)
}

fn handle_align(args: AlignArgs, json: bool) -> Result<()> {
    let series = read_series(&args.inputs)?;
    let table = comparison::align_by_date(&series)?;
    output::emit(json, &table, output::aligned)
}

fn handle_scenario(args: ScenarioArgs, config: &Config, json: bool) -> Result<()> {
    let input: ScenarioInput = read_json(&args.input)?;
    let mut settings = config.scenario.clone();
    if let Some(months) = args.months {
        settings.months = months;
    }
    let projector = ScenarioProjector::new(settings);
    let adjustment = input.adjustment(projector.default_adjustment());
    let projection = projector.project(&input.baseline, &adjustment)?;
    output::emit(json, &projection, output::scenario)
}

fn handle_spending(args: SpendingArgs, config: &Config, json: bool) -> Result<()> {
    let transactions: Vec<Transaction> = read_json(&args.transactions)?;
    let summary = spending::summarize(&transactions, &config.spending)?;
    output::emit(json, &summary, output::spending)
}

fn handle_subscriptions(args: SpendingArgs, json: bool) -> Result<()> {
    let transactions: Vec<Transaction> = read_json(&args.transactions)?;
    let charges = spending::detect_recurring_charges(&transactions);
    output::emit(json, charges.as_slice(), output::recurring)
}

fn handle_portfolio(args: PortfolioArgs, json: bool) -> Result<()> {
    let holdings: Vec<Holding> = read_json(&args.holdings)?;
    let prices: BTreeMap<String, Decimal> = read_json(&args.prices)?;
    let summary = portfolio::summarize_portfolio(&holdings, &prices)?;
    let net_worth = args.cash.map(|cash| portfolio::net_worth(cash, &summary));
    output::emit(json, &output::PortfolioReport { summary, net_worth }, output::portfolio)
}

fn handle_backtest(args: BacktestArgs, config: &Config, json: bool) -> Result<()> {
    let prices = read_series(&args.prices)?;
    let backtester = Backtester::new(config.backtest.clone());

    if let Some(key) = args.preset {
        let result = backtester.preset(&key, &prices)?;
        return output::emit(json, &result, output::preset);
    }

    let series = match &args.symbol {
        Some(symbol) => prices.iter().find(|s| s.name() == symbol.as_str()),
        None => prices.first(),
    };
    let Some(series) = series else {
        bail!("no price series named {}", args.symbol.unwrap_or_default());
    };
    let comparison = backtester.compare_strategies(series)?;
    output::emit(json, &comparison, output::comparison)
}
