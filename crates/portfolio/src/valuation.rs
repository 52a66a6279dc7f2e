use crate::error::PortfolioError;
use crate::holding::{AssetClass, Holding, HoldingValuation};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Share of the portfolio held in one asset class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationSlice {
    pub value: Decimal,
    /// Zero when the portfolio is worth nothing.
    pub percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub holdings: Vec<HoldingValuation>,
    pub total_value: Decimal,
    pub total_cost: Decimal,
    pub total_gain_loss: Decimal,
    /// `None` when nothing was paid in.
    pub total_return_percent: Option<Decimal>,
    /// Only classes that are actually held appear.
    pub allocation: BTreeMap<AssetClass, AllocationSlice>,
}

/// Cash plus investments, and the share of each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetWorth {
    pub total_net_worth: Decimal,
    pub cash_savings: Decimal,
    pub portfolio_value: Decimal,
    /// `None` unless the total is positive.
    pub portfolio_percent: Option<Decimal>,
    pub cash_percent: Option<Decimal>,
}

fn percent_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole <= Decimal::ZERO {
        return None;
    }
    part.checked_div(whole).map(|share| share * dec!(100))
}

fn value(holding: &Holding, prices: &BTreeMap<String, Decimal>) -> Result<HoldingValuation, PortfolioError> {
    for (field, amount) in [("shares", holding.shares), ("purchase price", holding.purchase_price)] {
        if amount.is_sign_negative() {
            return Err(PortfolioError::NegativeAmount {
                symbol: holding.symbol.clone(),
                field,
                value: amount,
            });
        }
    }

    let (current_price, priced) = match prices.get(&holding.symbol) {
        Some(price) if *price <= Decimal::ZERO => {
            return Err(PortfolioError::InvalidPrice { symbol: holding.symbol.clone(), price: *price });
        }
        Some(price) => (*price, true),
        None => {
            tracing::warn!(symbol = %holding.symbol, "No quote; valuing at purchase price");
            (holding.purchase_price, false)
        }
    };

    let cost_basis = holding.shares * holding.purchase_price;
    let current_value = holding.shares * current_price;
    let gain_loss = current_value - cost_basis;

    Ok(HoldingValuation {
        symbol: holding.symbol.clone(),
        asset_class: holding.asset_class,
        shares: holding.shares,
        purchase_price: holding.purchase_price,
        current_price,
        priced,
        cost_basis,
        current_value,
        gain_loss,
        gain_loss_percent: percent_of(gain_loss, cost_basis),
        purchase_date: holding.purchase_date,
        notes: holding.notes.clone(),
    })
}

/// Marks every lot to `prices` (keyed by symbol) and rolls the lots up.
///
/// A symbol without a quote is valued at its purchase price, so it shows no gain.
pub fn summarize_portfolio(
    holdings: &[Holding],
    prices: &BTreeMap<String, Decimal>,
) -> Result<PortfolioSummary, PortfolioError> {
    let holdings = holdings
        .iter()
        .map(|h| value(h, prices))
        .collect::<Result<Vec<_>, _>>()?;

    let total_value: Decimal = holdings.iter().map(|h| h.current_value).sum();
    let total_cost: Decimal = holdings.iter().map(|h| h.cost_basis).sum();
    let total_gain_loss = total_value - total_cost;

    let mut by_class: BTreeMap<AssetClass, Decimal> = BTreeMap::new();
    for h in &holdings {
        *by_class.entry(h.asset_class).or_insert(Decimal::ZERO) += h.current_value;
    }
    let allocation = by_class
        .into_iter()
        .map(|(class, value)| {
            let percent = percent_of(value, total_value).unwrap_or(Decimal::ZERO);
            (class, AllocationSlice { value, percent })
        })
        .collect();

    tracing::debug!(
        lots = holdings.len(),
        %total_value,
        %total_gain_loss,
        "Portfolio valued"
    );

    Ok(PortfolioSummary {
        holdings,
        total_value,
        total_cost,
        total_gain_loss,
        total_return_percent: percent_of(total_gain_loss, total_cost),
        allocation,
    })
}

/// Combines cash savings with the portfolio's market value.
pub fn net_worth(cash_savings: Decimal, portfolio: &PortfolioSummary) -> NetWorth {
    let portfolio_value = portfolio.total_value;
    let total_net_worth = cash_savings + portfolio_value;
    NetWorth {
        total_net_worth,
        cash_savings,
        portfolio_value,
        portfolio_percent: percent_of(portfolio_value, total_net_worth),
        cash_percent: percent_of(cash_savings, total_net_worth),
    }
}
