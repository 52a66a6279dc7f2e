use crate::error::GoalError;
use crate::milestones::{Milestone, achieved_milestones, milestone_ladder, next_milestone_goal};
use configuration::MilestoneSettings;
use projection::{ProjectionError, real_value};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Progress of a growing quantity (typically net worth) toward a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressAnalysis {
    pub current_value: Decimal,
    pub target_value: Decimal,
    /// Uncapped; values above 100 mean the target has been exceeded.
    pub progress_percent: Decimal,
    pub remaining: Decimal,
    /// `None` when the monthly change estimate is not positive and the goal is not yet reached.
    pub months_to_goal: Option<Decimal>,
    pub on_track: bool,
    pub milestones: Vec<Milestone>,
    pub achieved: Vec<Milestone>,
    pub next_milestone: Option<Milestone>,
    /// The target expressed in today's money at the projected completion year.
    pub target_in_todays_money: Option<Decimal>,
}

/// Combines current value, target and externally-estimated pacing into a progress report.
///
/// `monthly_net_change` and `on_track_threshold_pct` come from the caller's
/// analytics; this function only combines them. When `inflation_rate_pct` is
/// given and a completion time is computable, the target is also discounted to
/// today's money over the whole years it will take to reach it.
pub fn analyze_progress(
    current_value: Decimal,
    target_value: Decimal,
    monthly_net_change: Decimal,
    on_track_threshold_pct: Decimal,
    checkpoints: &[Decimal],
    inflation_rate_pct: Option<Decimal>,
) -> Result<ProgressAnalysis, GoalError> {
    if target_value <= Decimal::ZERO {
        return Err(GoalError::InvalidGoal {
            name: "net worth".to_string(),
            target: target_value,
        });
    }

    let progress_percent = current_value / target_value * dec!(100);
    let remaining = (target_value - current_value).max(Decimal::ZERO);

    let months_to_goal = if remaining.is_zero() {
        Some(Decimal::ZERO)
    } else if monthly_net_change > Decimal::ZERO {
        remaining.checked_div(monthly_net_change)
    } else {
        None
    };

    let target_in_todays_money = match (months_to_goal, inflation_rate_pct) {
        (Some(months), Some(inflation)) => match (months / dec!(12)).ceil().to_u32() {
            Some(years) => match real_value(target_value, years, inflation) {
                Ok(value) => Some(value),
                // A horizon too distant to discount is reported as not computable.
                Err(ProjectionError::Overflow(what)) => {
                    tracing::warn!(years, %inflation, %what, "Discounting overflowed");
                    None
                }
                Err(e) => return Err(e.into()),
            },
            None => None,
        },
        _ => None,
    };

    let milestones = milestone_ladder(target_value, checkpoints);
    let status = achieved_milestones(progress_percent, checkpoints);
    let achieved = milestones
        .iter()
        .filter(|m| status.achieved.contains(&m.percent))
        .cloned()
        .collect();
    let next_milestone = status
        .next
        .and_then(|next| milestones.iter().find(|m| m.percent == next).cloned());

    tracing::debug!(
        %current_value,
        %target_value,
        %progress_percent,
        months = ?months_to_goal,
        "Goal progress analysed"
    );

    Ok(ProgressAnalysis {
        current_value,
        target_value,
        progress_percent,
        remaining,
        months_to_goal,
        on_track: progress_percent >= on_track_threshold_pct,
        milestones,
        achieved,
        next_milestone,
        target_in_todays_money,
    })
}

/// Milestone logic bound to the configured ladder and checkpoints.
#[derive(Debug, Clone)]
pub struct MilestoneEngine {
    settings: MilestoneSettings,
}

impl MilestoneEngine {
    pub fn new(settings: MilestoneSettings) -> Self {
        Self { settings }
    }

    /// The auto-escalated goal for `current_value`.
    pub fn next_goal(&self, current_value: Decimal) -> Decimal {
        next_milestone_goal(current_value, &self.settings.ladder)
    }

    /// Analyses progress against an explicit target, or against the next ladder goal when `None`.
    pub fn analyze(
        &self,
        current_value: Decimal,
        target_value: Option<Decimal>,
        monthly_net_change: Decimal,
        inflation_rate_pct: Option<Decimal>,
    ) -> Result<ProgressAnalysis, GoalError> {
        let target = target_value.unwrap_or_else(|| self.next_goal(current_value));
        analyze_progress(
            current_value,
            target,
            monthly_net_change,
            self.settings.on_track_threshold_pct,
            &self.settings.checkpoints,
            inflation_rate_pct,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkpoints() -> Vec<Decimal> {
        vec![dec!(25), dec!(50), dec!(75), dec!(90), dec!(100)]
    }

    #[test]
    fn progress_remaining_and_months() {
        let a = analyze_progress(dec!(60000), dec!(100000), dec!(2000), dec!(50), &checkpoints(), None)
            .unwrap();
        assert_eq!(a.progress_percent, dec!(60));
        assert_eq!(a.remaining, dec!(40000));
        assert_eq!(a.months_to_goal, Some(dec!(20)));
        assert!(a.on_track);
        assert_eq!(a.achieved.len(), 2);
        assert_eq!(a.next_milestone.as_ref().map(|m| m.amount), Some(dec!(75000)));
        assert_eq!(a.target_in_todays_money, None);
    }

    #[test]
    fn non_positive_pace_is_not_computable() {
        let a = analyze_progress(dec!(10000), dec!(100000), dec!(0), dec!(50), &checkpoints(), None)
            .unwrap();
        assert_eq!(a.months_to_goal, None);
        assert!(!a.on_track);

        let a = analyze_progress(dec!(10000), dec!(100000), dec!(-500), dec!(50), &checkpoints(), Some(dec!(3)))
            .unwrap();
        assert_eq!(a.months_to_goal, None);
        assert_eq!(a.target_in_todays_money, None);
    }

    #[test]
    fn exceeded_goal_is_uncapped_with_zero_remaining() {
        let a = analyze_progress(dec!(150), dec!(100), dec!(-10), dec!(50), &checkpoints(), None).unwrap();
        assert_eq!(a.progress_percent, dec!(150));
        assert_eq!(a.remaining, Decimal::ZERO);
        assert_eq!(a.months_to_goal, Some(Decimal::ZERO));
        assert_eq!(a.next_milestone, None);
    }

    #[test]
    fn target_is_discounted_over_whole_years() {
        // 13 months to go rounds up to 2 years; 121 / 1.1^2 = 100.
        let a = analyze_progress(dec!(0), dec!(121), dec!(121) / dec!(13), dec!(50), &checkpoints(), Some(dec!(10)))
            .unwrap();
        assert_eq!(a.target_in_todays_money.map(|v| v.round_dp(6)), Some(dec!(100)));
    }

    #[test]
    fn distant_horizon_keeps_the_rest_of_the_report() {
        // 33,333.33 months to go at $3/month; 2,778 years of 3% inflation is out of range.
        let a = analyze_progress(dec!(0), dec!(100000), dec!(3), dec!(50), &checkpoints(), Some(dec!(3)))
            .unwrap();
        assert_eq!(a.target_in_todays_money, None);
        assert_eq!(a.remaining, dec!(100000));
        assert_eq!(a.months_to_goal.map(|m| m.round_dp(2)), Some(dec!(33333.33)));
        assert_eq!(a.progress_percent, Decimal::ZERO);
    }

    #[test]
    fn impossible_inflation_rate_is_still_an_error() {
        let err = analyze_progress(dec!(0), dec!(100), dec!(10), dec!(50), &checkpoints(), Some(dec!(-100)))
            .unwrap_err();
        assert!(matches!(err, GoalError::Projection(ProjectionError::InvalidRate(_))));
    }

    #[test]
    fn zero_target_is_invalid() {
        let err = analyze_progress(dec!(1), dec!(0), dec!(1), dec!(50), &checkpoints(), None).unwrap_err();
        assert!(matches!(err, GoalError::InvalidGoal { .. }));
    }

    #[test]
    fn engine_escalates_to_next_ladder_goal() {
        let engine = MilestoneEngine::new(MilestoneSettings::default());
        assert_eq!(engine.next_goal(dec!(60000)), dec!(100000));
        let a = engine.analyze(dec!(60000), None, dec!(1000), None).unwrap();
        assert_eq!(a.target_value, dec!(100000));
        assert_eq!(a.months_to_goal, Some(dec!(40)));
    }
}
