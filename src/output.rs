use anyhow::Result;
use backtester::{BacktestResult, PresetBacktest, StrategyComparison};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use core_types::{AlignedTable, GoalResult, fixed};
use goals::ProgressAnalysis;
use indicators::IndicatorSeries;
use portfolio::{NetWorth, PortfolioSummary};
use projection::GrowthRow;
use rust_decimal::Decimal;
use scenario::ScenarioProjection;
use serde::Serialize;
use spending::{RecurringCharge, SpendingSummary};

/// Prints `value` as pretty JSON, or as the table built by `render`.
pub fn emit<T: Serialize + ?Sized>(json: bool, value: &T, render: impl FnOnce(&T) -> Vec<Table>) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        for table in render(value) {
            println!("{table}");
        }
    }
    Ok(())
}

fn table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

fn money(value: Decimal) -> String {
    fixed(value, 2)
}

fn maybe(value: Option<Decimal>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| fixed(v, 2))
}

pub fn indicators(series: &IndicatorSeries) -> Vec<Table> {
    let sma = format!("SMA({})", series.sma_period.map_or("-".to_string(), |p| p.to_string()));
    let ema = format!("EMA({})", series.ema_period.map_or("-".to_string(), |p| p.to_string()));
    let mut t = table(&["Date", series.name.as_str(), sma.as_str(), ema.as_str()]);
    for p in &series.points {
        t.add_row(vec![p.date.to_string(), money(p.value), maybe(p.sma), maybe(p.ema)]);
    }
    vec![t]
}

pub fn growth(rows: &[GrowthRow]) -> Vec<Table> {
    let mut t = table(&["Year", "Balance", "In today's money", "Contributions", "Interest"]);
    for r in rows {
        t.add_row(vec![
            r.year.to_string(),
            money(r.nominal),
            money(r.real),
            money(r.contributions),
            money(r.interest),
        ]);
    }
    vec![t]
}

pub fn networth(a: &ProgressAnalysis) -> Vec<Table> {
    let mut summary = table(&["Metric", "Value"]);
    summary
        .add_row(vec!["Current".to_string(), money(a.current_value)])
        .add_row(vec!["Target".to_string(), money(a.target_value)])
        .add_row(vec!["Progress %".to_string(), fixed(a.progress_percent, 1)])
        .add_row(vec!["Remaining".to_string(), money(a.remaining)])
        .add_row(vec!["Months to goal".to_string(), maybe(a.months_to_goal)])
        .add_row(vec!["On track".to_string(), a.on_track.to_string()])
        .add_row(vec!["Target in today's money".to_string(), maybe(a.target_in_todays_money)]);

    let mut ladder = table(&["Milestone", "Amount", "", "Reached"]);
    for m in &a.milestones {
        let reached = a.achieved.iter().any(|x| x.percent == m.percent);
        ladder.add_row(vec![
            format!("{}%", m.percent.normalize()),
            money(m.amount),
            m.label.clone(),
            if reached { "yes" } else { "" }.to_string(),
        ]);
    }
    vec![summary, ladder]
}

pub fn goals(results: &[GoalResult]) -> Vec<Table> {
    let mut t = table(&["Goal", "Category", "Target", "Average", "Progress %", "Status", "Trend", "Forecast"]);
    for r in results {
        t.add_row(vec![
            r.goal.name.clone(),
            r.goal.category.clone().unwrap_or_else(|| "total".to_string()),
            money(r.goal.target_amount),
            money(r.current_average),
            fixed(r.progress_percent, 1),
            r.status.to_string(),
            r.trend.to_string(),
            r.forecast_text.clone(),
        ]);
    }
    vec![t]
}

pub fn aligned(aligned: &AlignedTable) -> Vec<Table> {
    let mut header = vec!["Date"];
    header.extend(aligned.series.iter().map(String::as_str));
    let mut t = table(&header);
    for row in &aligned.rows {
        let mut cells = vec![row.date.to_string()];
        cells.extend(aligned.series.iter().map(|s| row.get(s).map_or_else(String::new, money)));
        t.add_row(cells);
    }
    vec![t]
}

pub fn scenario(p: &ScenarioProjection) -> Vec<Table> {
    let mut summary = table(&["", "Current", "Scenario"]);
    summary
        .add_row(vec!["Income".to_string(), money(p.current_monthly_income), money(p.scenario_monthly_income)])
        .add_row(vec!["Expenses".to_string(), money(p.current_monthly_expenses), money(p.scenario_monthly_expenses)])
        .add_row(vec!["Savings".to_string(), money(p.current_monthly_savings), money(p.scenario_monthly_savings)])
        .add_row(vec!["Savings rate %".to_string(), maybe(p.current_savings_rate), maybe(p.scenario_savings_rate)])
        .add_row(vec![
            "Emergency fund (months)".to_string(),
            maybe(p.current_emergency_fund_months),
            maybe(p.scenario_emergency_fund_months),
        ])
        .add_row(vec![
            "Months to retirement goal".to_string(),
            maybe(p.current_time_to_goal),
            maybe(p.scenario_time_to_goal),
        ]);

    let mut categories = table(&["Category", "Current", "Scenario", "Difference"]);
    for c in &p.category_comparison {
        categories.add_row(vec![c.category.to_string(), money(c.current), money(c.scenario), money(c.difference)]);
    }

    let mut months = table(&["Month", "Current savings", "Scenario savings", "Difference"]);
    for m in &p.projection_months {
        months.add_row(vec![
            m.month.to_string(),
            money(m.current_savings),
            money(m.scenario_savings),
            money(m.difference),
        ]);
    }

    let mut growth = table(&["Year", "Current", "Scenario", "Current (real)", "Scenario (real)"]);
    for y in &p.investment_growth_projection {
        growth.add_row(vec![
            y.year.to_string(),
            money(y.current_nominal),
            money(y.scenario_nominal),
            money(y.current_real),
            money(y.scenario_real),
        ]);
    }
    vec![summary, categories, months, growth]
}

pub fn spending(s: &SpendingSummary) -> Vec<Table> {
    let mut totals = table(&["Income", "Expenses", "Net savings", "Avg monthly spend"]);
    totals.add_row(vec![
        money(s.total_income),
        money(s.total_expenses),
        money(s.net_savings),
        money(s.avg_monthly_spending),
    ]);

    let mut categories = table(&["Category", "Total", "Share %", "Trend", "Change %"]);
    for c in &s.spending_by_category {
        categories.add_row(vec![
            c.category.clone(),
            money(c.total),
            fixed(c.percentage, 1),
            c.trend.to_string(),
            fixed(c.change_percent, 1),
        ]);
    }

    let mut anomalies = table(&["Date", "Merchant", "Category", "Amount", "Reason"]);
    for a in &s.anomalies {
        let reason = match (&a.note, a.deviation) {
            (Some(note), _) => note.clone(),
            (None, Some(dev)) => format!("{} sigma above average", fixed(dev, 1)),
            (None, None) => String::new(),
        };
        anomalies.add_row(vec![a.date.to_string(), a.merchant.clone(), a.category.clone(), money(a.amount), reason]);
    }
    vec![totals, categories, anomalies]
}

/// The `portfolio` command's output: the valuation plus net worth when cash was given.
#[derive(Serialize)]
pub struct PortfolioReport {
    #[serde(flatten)]
    pub summary: PortfolioSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_worth: Option<NetWorth>,
}

pub fn recurring(charges: &[RecurringCharge]) -> Vec<Table> {
    let mut t = table(&["Merchant", "Amount", "Charges", "Frequency", "Last charge", "Total", "Confidence"]);
    for c in charges {
        t.add_row(vec![
            c.merchant.clone(),
            money(c.amount),
            c.charges.to_string(),
            c.frequency.to_string(),
            c.last_charge.to_string(),
            money(c.total_spent),
            c.confidence.to_string(),
        ]);
    }
    vec![t]
}

pub fn portfolio(report: &PortfolioReport) -> Vec<Table> {
    let s = &report.summary;
    let mut lots = table(&["Symbol", "Class", "Shares", "Cost", "Price", "Value", "Gain/Loss", "Gain %"]);
    for h in &s.holdings {
        let price = if h.priced { money(h.current_price) } else { format!("{} (cost)", money(h.current_price)) };
        lots.add_row(vec![
            h.symbol.clone(),
            h.asset_class.to_string(),
            h.shares.normalize().to_string(),
            money(h.cost_basis),
            price,
            money(h.current_value),
            money(h.gain_loss),
            maybe(h.gain_loss_percent),
        ]);
    }
    lots.add_row(vec![
        "Total".to_string(),
        String::new(),
        String::new(),
        money(s.total_cost),
        String::new(),
        money(s.total_value),
        money(s.total_gain_loss),
        maybe(s.total_return_percent),
    ]);

    let mut allocation = table(&["Class", "Value", "Share %"]);
    for (class, slice) in &s.allocation {
        allocation.add_row(vec![class.to_string(), money(slice.value), fixed(slice.percent, 1)]);
    }

    let mut tables = vec![lots, allocation];
    if let Some(nw) = &report.net_worth {
        let mut t = table(&["Net worth", "Cash", "Portfolio", "Cash %", "Portfolio %"]);
        t.add_row(vec![
            money(nw.total_net_worth),
            money(nw.cash_savings),
            money(nw.portfolio_value),
            maybe(nw.cash_percent),
            maybe(nw.portfolio_percent),
        ]);
        tables.push(t);
    }
    tables
}

fn strategy_table(results: &[BacktestResult]) -> Table {
    let mut t = table(&[
        "Strategy", "Total %", "CAGR %", "Volatility %", "Sharpe", "Sortino", "Max DD %", "Win %", "Trades", "Final",
    ]);
    for r in results {
        let m = &r.report;
        t.add_row(vec![
            r.strategy_name.clone(),
            money(m.total_return_pct),
            maybe(m.cagr_pct),
            money(m.volatility_pct),
            maybe(m.sharpe_ratio),
            maybe(m.sortino_ratio),
            money(m.max_drawdown_pct),
            money(m.win_rate_pct),
            r.total_trades.to_string(),
            money(m.final_value),
        ]);
    }
    t
}

pub fn comparison(c: &StrategyComparison) -> Vec<Table> {
    vec![strategy_table(&c.strategies)]
}

pub fn preset(p: &PresetBacktest) -> Vec<Table> {
    let mut info = table(&["Preset", "Name", "Description", "Allocation"]);
    let allocation = p
        .allocation
        .iter()
        .map(|(asset, w)| format!("{asset} {}", w.normalize()))
        .collect::<Vec<_>>()
        .join(", ");
    info.add_row(vec![p.preset.clone(), p.name.clone(), p.description.clone(), allocation]);
    vec![info, strategy_table(std::slice::from_ref(&p.result))]
}
