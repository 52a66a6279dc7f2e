use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

const MILLION: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// A percent-of-goal checkpoint resolved against a concrete target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub percent: Decimal,
    pub amount: Decimal,
    pub label: String,
}

/// Which checkpoints a given progress percentage has reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneProgress {
    pub achieved: Vec<Decimal>,
    pub next: Option<Decimal>,
}

/// The next net-worth goal: the first ladder rung strictly above `current`.
///
/// Past the top of the ladder the goal becomes `current` rounded up to a whole
/// million, plus one million.
pub fn next_milestone_goal(current: Decimal, ladder: &[Decimal]) -> Decimal {
    match ladder.iter().find(|rung| **rung > current) {
        Some(rung) => *rung,
        None => (current / MILLION).ceil() * MILLION + MILLION,
    }
}

/// Every checkpoint at or below `progress_percent` is achieved; the smallest one above is next.
pub fn achieved_milestones(progress_percent: Decimal, checkpoints: &[Decimal]) -> MilestoneProgress {
    let (achieved, pending): (Vec<Decimal>, Vec<Decimal>) =
        checkpoints.iter().copied().partition(|c| *c <= progress_percent);
    MilestoneProgress { achieved, next: pending.into_iter().min() }
}

/// Encouraging label shown next to a checkpoint.
pub fn milestone_label(percent: Decimal) -> String {
    let label = match percent.normalize().to_string().as_str() {
        "25" => "Quarter Way There!",
        "50" => "Halfway Milestone!",
        "75" => "Three Quarters Complete!",
        "90" => "Almost There!",
        "100" => "Goal Achieved!",
        other => return format!("{other}% Complete"),
    };
    label.to_string()
}

/// Resolves each checkpoint to an amount of `target`.
pub fn milestone_ladder(target: Decimal, checkpoints: &[Decimal]) -> Vec<Milestone> {
    checkpoints
        .iter()
        .map(|percent| Milestone {
            percent: *percent,
            amount: target * *percent / dec!(100),
            label: milestone_label(*percent),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ladder() -> Vec<Decimal> {
        vec![
            dec!(50000),
            dec!(100000),
            dec!(250000),
            dec!(500000),
            dec!(1000000),
            dec!(2500000),
            dec!(5000000),
        ]
    }

    fn checkpoints() -> Vec<Decimal> {
        vec![dec!(25), dec!(50), dec!(75), dec!(90), dec!(100)]
    }

    #[test]
    fn next_goal_is_first_rung_above_current() {
        assert_eq!(next_milestone_goal(dec!(60000), &ladder()), dec!(100000));
        assert_eq!(next_milestone_goal(dec!(0), &ladder()), dec!(50000));
    }

    #[test]
    fn reaching_a_rung_exactly_escalates_to_the_next() {
        assert_eq!(next_milestone_goal(dec!(100000), &ladder()), dec!(250000));
    }

    #[test]
    fn beyond_the_ladder_rounds_up_to_the_next_million() {
        assert_eq!(next_milestone_goal(dec!(6000000), &ladder()), dec!(7000000));
        assert_eq!(next_milestone_goal(dec!(6200000), &ladder()), dec!(8000000));
        assert_eq!(next_milestone_goal(dec!(5000000), &ladder()), dec!(6000000));
    }

    #[test]
    fn achieved_and_next_checkpoints() {
        let progress = achieved_milestones(dec!(60), &checkpoints());
        assert_eq!(progress.achieved, vec![dec!(25), dec!(50)]);
        assert_eq!(progress.next, Some(dec!(75)));

        let done = achieved_milestones(dec!(130), &checkpoints());
        assert_eq!(done.achieved.len(), 5);
        assert_eq!(done.next, None);

        let none = achieved_milestones(dec!(0), &checkpoints());
        assert!(none.achieved.is_empty());
        assert_eq!(none.next, Some(dec!(25)));
    }

    #[test]
    fn checkpoint_boundary_counts_as_achieved() {
        let progress = achieved_milestones(dec!(90), &checkpoints());
        assert_eq!(progress.achieved.last(), Some(&dec!(90)));
        assert_eq!(progress.next, Some(dec!(100)));
    }

    #[test]
    fn ladder_amounts_and_labels() {
        let ladder = milestone_ladder(dec!(200000), &checkpoints());
        assert_eq!(ladder[0].amount, dec!(50000));
        assert_eq!(ladder[0].label, "Quarter Way There!");
        assert_eq!(ladder[3].amount, dec!(180000));
        assert_eq!(ladder[4].label, "Goal Achieved!");
        assert_eq!(milestone_label(dec!(33)), "33% Complete");
        assert_eq!(milestone_label(dec!(50.0)), "Halfway Milestone!");
    }
}
