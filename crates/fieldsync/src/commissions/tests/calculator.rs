use super::common::board;
use crate::commissions::calculator::{board_commission, flat_commission, survey_commission};
use crate::commissions::domain::{BoardProfile, BonusRule, CoverageReward};

fn tiered_board() -> BoardProfile {
    board(
        10.0,
        vec![
            BonusRule::Coverage {
                min_coverage: 50.0,
                reward: CoverageReward::Amount(5.0),
            },
            BonusRule::Coverage {
                min_coverage: 80.0,
                reward: CoverageReward::Amount(10.0),
            },
            BonusRule::Quality { amount: 3.0 },
        ],
    )
}

#[test]
fn qualifying_rules_stack() {
    let result = board_commission(&tiered_board(), 85.0);

    assert_eq!(result.base_amount, 10.0);
    assert_eq!(result.bonus_amount, 18.0);
    assert_eq!(result.total_amount, 28.0);
    assert_eq!(result.factors.applied_bonuses.len(), 3);
    assert_eq!(result.factors.coverage_percentage, 85.0);
}

#[test]
fn rules_above_the_achieved_coverage_stay_silent() {
    let result = board_commission(&tiered_board(), 60.0);

    assert_eq!(result.bonus_amount, 5.0);
    assert_eq!(result.total_amount, 15.0);
    assert_eq!(result.factors.applied_bonuses.len(), 1);
}

#[test]
fn coverage_thresholds_are_inclusive() {
    let profile = board(
        10.0,
        vec![BonusRule::Coverage {
            min_coverage: 50.0,
            reward: CoverageReward::Amount(5.0),
        }],
    );

    assert_eq!(board_commission(&profile, 50.0).bonus_amount, 5.0);
    assert_eq!(board_commission(&profile, 49.99).bonus_amount, 0.0);
}

#[test]
fn multiplier_rewards_scale_off_the_base_rate() {
    let profile = board(
        10.0,
        vec![BonusRule::Coverage {
            min_coverage: 70.0,
            reward: CoverageReward::Multiplier(1.5),
        }],
    );

    let result = board_commission(&profile, 75.0);

    assert_eq!(result.bonus_amount, 15.0);
    assert_eq!(result.total_amount, 25.0);
    assert_eq!(result.factors.applied_bonuses[0].amount, 15.0);
}

#[test]
fn quality_bonus_requires_eighty_percent_coverage() {
    let profile = board(10.0, vec![BonusRule::Quality { amount: 3.0 }]);

    assert_eq!(board_commission(&profile, 79.99).total_amount, 10.0);
    assert_eq!(board_commission(&profile, 80.0).total_amount, 13.0);
}

#[test]
fn amounts_round_to_cents() {
    let profile = board(
        10.0,
        vec![BonusRule::Coverage {
            min_coverage: 0.0,
            reward: CoverageReward::Multiplier(0.3333),
        }],
    );

    let result = board_commission(&profile, 100.0);

    assert_eq!(result.bonus_amount, 3.33);
    assert_eq!(result.total_amount, 13.33);
}

#[test]
fn boards_without_rules_pay_base_only() {
    let result = board_commission(&board(10.0, Vec::new()), 100.0);

    assert_eq!(result.bonus_amount, 0.0);
    assert_eq!(result.total_amount, 10.0);
    assert!(result.factors.applied_bonuses.is_empty());
}

#[test]
fn flat_commission_scales_with_quantity() {
    assert_eq!(flat_commission(0.5, 24), 12.0);
    assert_eq!(flat_commission(0.5, 0), 0.0);
}

#[test]
fn survey_commission_pays_zero_when_unset() {
    assert_eq!(survey_commission(None), 0.0);
    assert_eq!(survey_commission(Some(5.0)), 5.0);
}
