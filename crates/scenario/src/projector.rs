use crate::error::ScenarioError;
use crate::model::{
    Baseline, CategoryComparison, InvestmentYear, MonthProjection, ScenarioAdjustment,
    ScenarioProjection,
};
use configuration::ScenarioSettings;
use projection::growth_table;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Months of expenses covered by `balance`. Not computable when nothing is spent.
pub fn emergency_fund_months(balance: Decimal, monthly_burn: Decimal) -> Option<Decimal> {
    if monthly_burn <= Decimal::ZERO {
        return None;
    }
    balance.checked_div(monthly_burn)
}

/// Months of saving needed to grow `current_balance` to `goal_amount`.
///
/// Only defined for positive savings; a balance already at the goal needs zero months.
pub fn months_to_goal(
    goal_amount: Decimal,
    current_balance: Decimal,
    monthly_savings: Decimal,
) -> Option<Decimal> {
    if monthly_savings <= Decimal::ZERO {
        return None;
    }
    (goal_amount - current_balance)
        .max(Decimal::ZERO)
        .checked_div(monthly_savings)
}

fn apply_pct(amount: Decimal, delta_pct: Decimal) -> Decimal {
    amount * (Decimal::ONE + delta_pct / dec!(100))
}

fn savings_rate(savings: Decimal, income: Decimal) -> Option<Decimal> {
    if income <= Decimal::ZERO {
        return None;
    }
    Some(savings / income * dec!(100))
}

/// Compares the baseline month against the adjusted one over `months` months
/// of saving and `projection_years` years of investing.
pub fn project_scenario(
    baseline: &Baseline,
    adjustment: &ScenarioAdjustment,
    months: u32,
    projection_years: u32,
) -> Result<ScenarioProjection, ScenarioError> {
    if let Some(category) = adjustment
        .category_deltas
        .keys()
        .find(|c| !baseline.category_spend.contains_key(*c))
    {
        return Err(ScenarioError::UnknownCategory(*category));
    }

    let category_comparison: Vec<CategoryComparison> = baseline
        .category_spend
        .iter()
        .map(|(category, current)| {
            let delta = adjustment
                .category_deltas
                .get(category)
                .copied()
                .unwrap_or(Decimal::ZERO);
            if delta < dec!(-100) {
                tracing::warn!(%category, %delta, "Adjustment removes more than the whole category");
            }
            let scenario = apply_pct(*current, delta);
            CategoryComparison {
                category: *category,
                current: *current,
                scenario,
                difference: scenario - *current,
            }
        })
        .collect();

    let current_income = baseline.monthly_income;
    let current_expenses = baseline.monthly_expenses();
    let current_savings = current_income - current_expenses;

    let scenario_income = apply_pct(current_income, adjustment.income_adjustment);
    let scenario_expenses: Decimal = category_comparison.iter().map(|c| c.scenario).sum();
    let scenario_savings = scenario_income - scenario_expenses;

    let savings_difference = scenario_savings - current_savings;
    let savings_difference_percent = if current_savings.is_zero() {
        None
    } else {
        Some(savings_difference / current_savings.abs() * dec!(100))
    };

    let mut projection_months = Vec::with_capacity(months as usize);
    let (mut current_total, mut scenario_total) = (Decimal::ZERO, Decimal::ZERO);
    for month in 1..=months {
        current_total += current_savings;
        scenario_total += scenario_savings;
        projection_months.push(MonthProjection {
            month,
            current_savings: current_total,
            scenario_savings: scenario_total,
            difference: scenario_total - current_total,
        });
    }

    let balance = baseline.current_balance;
    let current_growth = growth_table(
        balance,
        current_savings.max(Decimal::ZERO),
        adjustment.investment_return_rate,
        projection_years,
        adjustment.inflation_rate,
    )?;
    let scenario_growth = growth_table(
        balance,
        scenario_savings.max(Decimal::ZERO),
        adjustment.investment_return_rate,
        projection_years,
        adjustment.inflation_rate,
    )?;
    let investment_growth_projection = current_growth
        .iter()
        .zip(&scenario_growth)
        .map(|(current, scenario)| InvestmentYear {
            year: current.year,
            current_nominal: current.nominal,
            scenario_nominal: scenario.nominal,
            current_real: current.real,
            scenario_real: scenario.real,
        })
        .collect();

    let current_time_to_goal = months_to_goal(adjustment.retirement_goal, balance, current_savings);
    let scenario_time_to_goal = months_to_goal(adjustment.retirement_goal, balance, scenario_savings);
    let goal_time_saved = match (current_time_to_goal, scenario_time_to_goal) {
        (Some(current), Some(scenario)) => Some(current - scenario),
        _ => None,
    };

    tracing::debug!(
        %current_savings,
        %scenario_savings,
        months,
        "Scenario projected"
    );

    Ok(ScenarioProjection {
        current_monthly_income: current_income,
        current_monthly_expenses: current_expenses,
        current_monthly_savings: current_savings,
        current_savings_rate: savings_rate(current_savings, current_income),
        scenario_monthly_income: scenario_income,
        scenario_monthly_expenses: scenario_expenses,
        scenario_monthly_savings: scenario_savings,
        scenario_savings_rate: savings_rate(scenario_savings, scenario_income),
        savings_difference,
        savings_difference_percent,
        category_comparison,
        projection_months,
        current_emergency_fund_months: emergency_fund_months(balance, current_expenses),
        scenario_emergency_fund_months: emergency_fund_months(balance, scenario_expenses),
        months_to_emergency_fund_goal: months_to_goal(
            adjustment.emergency_fund_target,
            balance,
            scenario_savings,
        ),
        investment_growth_projection,
        current_time_to_goal,
        scenario_time_to_goal,
        goal_time_saved,
    })
}

/// Scenario projection bound to the configured horizons.
#[derive(Debug, Clone)]
pub struct ScenarioProjector {
    settings: ScenarioSettings,
}

impl ScenarioProjector {
    pub fn new(settings: ScenarioSettings) -> Self {
        Self { settings }
    }

    /// An adjustment with no deltas and the configured rates and targets.
    pub fn default_adjustment(&self) -> ScenarioAdjustment {
        ScenarioAdjustment::from_settings(&self.settings)
    }

    pub fn project(
        &self,
        baseline: &Baseline,
        adjustment: &ScenarioAdjustment,
    ) -> Result<ScenarioProjection, ScenarioError> {
        project_scenario(baseline, adjustment, self.settings.months, self.settings.projection_years)
    }
}
