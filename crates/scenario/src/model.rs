use configuration::ScenarioSettings;
use core_types::Category;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The user's current month: income, spend per category and savings on hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Baseline {
    pub monthly_income: Decimal,
    pub category_spend: BTreeMap<Category, Decimal>,
    /// Liquid savings today; the emergency fund and the starting investment balance.
    #[serde(default)]
    pub current_balance: Decimal,
}

impl Baseline {
    pub fn monthly_expenses(&self) -> Decimal {
        self.category_spend.values().sum()
    }
}

/// What-if parameters. Percentages are signed and applied multiplicatively.
///
/// Deltas are not clamped: `-150` for a category models spend
/// turning negative. Callers that find that meaningless must guard it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioAdjustment {
    #[serde(default)]
    pub category_deltas: BTreeMap<Category, Decimal>,
    #[serde(default)]
    pub income_adjustment: Decimal,
    /// Annual return in percent.
    pub investment_return_rate: Decimal,
    /// Annual inflation in percent.
    pub inflation_rate: Decimal,
    pub emergency_fund_target: Decimal,
    pub retirement_goal: Decimal,
}

impl ScenarioAdjustment {
    /// No adjustments, with rates and targets taken from configuration.
    pub fn from_settings(settings: &ScenarioSettings) -> Self {
        Self {
            category_deltas: BTreeMap::new(),
            income_adjustment: Decimal::ZERO,
            investment_return_rate: settings.investment_return_rate,
            inflation_rate: settings.inflation_rate,
            emergency_fund_target: settings.emergency_fund_target,
            retirement_goal: settings.retirement_goal,
        }
    }

    pub fn with_delta(mut self, category: Category, delta_pct: Decimal) -> Self {
        self.category_deltas.insert(category, delta_pct);
        self
    }

    pub fn with_income_adjustment(mut self, delta_pct: Decimal) -> Self {
        self.income_adjustment = delta_pct;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryComparison {
    pub category: Category,
    pub current: Decimal,
    pub scenario: Decimal,
    pub difference: Decimal,
}

/// Cumulative savings after `month` months under each assumption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthProjection {
    pub month: u32,
    pub current_savings: Decimal,
    pub scenario_savings: Decimal,
    pub difference: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentYear {
    pub year: u32,
    pub current_nominal: Decimal,
    pub scenario_nominal: Decimal,
    pub current_real: Decimal,
    pub scenario_real: Decimal,
}

/// Current-versus-scenario comparison. `None` marks a metric that is not
/// computable for these inputs (no income, no burn, no positive savings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioProjection {
    pub current_monthly_income: Decimal,
    pub current_monthly_expenses: Decimal,
    pub current_monthly_savings: Decimal,
    pub current_savings_rate: Option<Decimal>,

    pub scenario_monthly_income: Decimal,
    pub scenario_monthly_expenses: Decimal,
    pub scenario_monthly_savings: Decimal,
    pub scenario_savings_rate: Option<Decimal>,

    pub savings_difference: Decimal,
    pub savings_difference_percent: Option<Decimal>,

    pub category_comparison: Vec<CategoryComparison>,
    pub projection_months: Vec<MonthProjection>,

    pub current_emergency_fund_months: Option<Decimal>,
    pub scenario_emergency_fund_months: Option<Decimal>,
    pub months_to_emergency_fund_goal: Option<Decimal>,

    pub investment_growth_projection: Vec<InvestmentYear>,

    pub current_time_to_goal: Option<Decimal>,
    pub scenario_time_to_goal: Option<Decimal>,
    pub goal_time_saved: Option<Decimal>,
}
