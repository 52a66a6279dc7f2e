use crate::error::GoalError;
use core_types::{Goal, GoalResult, GoalStatus, GoalTrend, SpendingAverages, fixed};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn forecast(status: GoalStatus, target: Decimal, current: Decimal) -> String {
    match status {
        GoalStatus::OnTrack => format!(
            "Maintaining current spending keeps you under ${}/month target",
            fixed(target, 2)
        ),
        GoalStatus::OverBudget => {
            let overage = current - target;
            let cut_pct = overage / current * dec!(100);
            format!(
                "Currently ${}/month over target. Reduce spending by {}% to reach goal",
                fixed(overage, 2),
                fixed(cut_pct, 1)
            )
        }
    }
}

/// Direction of recent spend relative to the long-run average.
///
/// Lower recent spend is improving. Without a recent figure, or when the two
/// agree, the trend is stable.
pub fn goal_trend(average: Decimal, recent: Option<Decimal>) -> GoalTrend {
    match recent {
        Some(recent) if recent < average => GoalTrend::Improving,
        Some(recent) if recent > average => GoalTrend::Worsening,
        _ => GoalTrend::Stable,
    }
}

/// Compares an observed monthly average against a spending goal.
///
/// A single average carries no history, so the trend is stable.
///
/// The goal is on track while spend stays at or below 100% of the target.
/// A non-positive target is rejected rather than divided by.
pub fn evaluate_goal(goal: &Goal, observed_monthly_average: Decimal) -> Result<GoalResult, GoalError> {
    if goal.target_amount <= Decimal::ZERO {
        return Err(GoalError::InvalidGoal {
            name: goal.name.clone(),
            target: goal.target_amount,
        });
    }

    let progress_percent = observed_monthly_average / goal.target_amount * dec!(100);
    let status = if progress_percent <= dec!(100) {
        GoalStatus::OnTrack
    } else {
        GoalStatus::OverBudget
    };

    Ok(GoalResult {
        goal: goal.clone(),
        current_average: observed_monthly_average,
        progress_percent,
        status,
        forecast_text: forecast(status, goal.target_amount, observed_monthly_average),
        trend: GoalTrend::Stable,
    })
}

/// Evaluates every goal independently, preserving the caller's order.
///
/// Category goals read that category's average and total goals read the overall
/// average. A category with no observed spend evaluates against zero. Each
/// result's trend compares the scope's recent average with its overall one.
pub fn evaluate_goals(
    goals: &[Goal],
    averages: &SpendingAverages,
) -> Result<Vec<GoalResult>, GoalError> {
    goals
        .iter()
        .map(|goal| {
            let category = goal.category.as_deref();
            if let Some(name) = category {
                if !averages.by_category.contains_key(name) {
                    tracing::debug!(goal = %goal.name, category = name, "No spend observed for category");
                }
            }
            let average = averages.for_category(category);
            let mut result = evaluate_goal(goal, average)?;
            result.trend = goal_trend(average, averages.recent_for(category));
            Ok(result)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(target: Decimal, category: Option<&str>) -> Goal {
        Goal {
            name: "Dining".to_string(),
            target_amount: target,
            category: category.map(str::to_string),
        }
    }

    #[test]
    fn spending_exactly_at_target_is_on_track() {
        let result = evaluate_goal(&goal(dec!(500), None), dec!(500)).unwrap();
        assert_eq!(result.progress_percent, dec!(100));
        assert_eq!(result.status, GoalStatus::OnTrack);
        assert_eq!(
            result.forecast_text,
            "Maintaining current spending keeps you under $500.00/month target"
        );
    }

    #[test]
    fn spending_above_target_is_over_budget() {
        let result = evaluate_goal(&goal(dec!(500), None), dec!(501)).unwrap();
        assert_eq!(result.status, GoalStatus::OverBudget);
        assert_eq!(
            result.forecast_text,
            "Currently $1.00/month over target. Reduce spending by 0.2% to reach goal"
        );
    }

    #[test]
    fn overage_forecast_uses_share_of_current_spend() {
        let result = evaluate_goal(&goal(dec!(300), Some("Dining")), dec!(400)).unwrap();
        assert_eq!(result.progress_percent.round_dp(2), dec!(133.33));
        assert_eq!(
            result.forecast_text,
            "Currently $100.00/month over target. Reduce spending by 25.0% to reach goal"
        );
    }

    #[test]
    fn trend_compares_recent_with_overall_average() {
        assert_eq!(goal_trend(dec!(400), Some(dec!(350))), GoalTrend::Improving);
        assert_eq!(goal_trend(dec!(400), Some(dec!(450))), GoalTrend::Worsening);
        assert_eq!(goal_trend(dec!(400), Some(dec!(400))), GoalTrend::Stable);
        assert_eq!(goal_trend(dec!(400), None), GoalTrend::Stable);
    }

    #[test]
    fn non_positive_target_is_invalid() {
        assert!(matches!(
            evaluate_goal(&goal(dec!(0), None), dec!(10)),
            Err(GoalError::InvalidGoal { .. })
        ));
        assert!(evaluate_goal(&goal(dec!(-5), None), dec!(10)).is_err());
    }
}
