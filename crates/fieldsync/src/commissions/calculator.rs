use super::domain::{
    AppliedBonus, BoardProfile, BonusRule, CommissionFactors, CommissionResult, CoverageReward,
    round_cents, QUALITY_BONUS_MIN_COVERAGE,
};

/// Base plus stacked bonuses for one board placement at the achieved
/// coverage. Amounts are rounded to cents at the result boundary.
pub fn board_commission(board: &BoardProfile, coverage_percentage: f64) -> CommissionResult {
    let base_amount = board.commission_rate;
    let mut bonus_amount = 0.0;
    let mut applied_bonuses = Vec::new();

    for rule in &board.bonus_rules {
        let awarded = match rule {
            BonusRule::Coverage { min_coverage, reward } => {
                if coverage_percentage >= *min_coverage {
                    Some(match reward {
                        CoverageReward::Amount(amount) => *amount,
                        CoverageReward::Multiplier(multiplier) => base_amount * multiplier,
                    })
                } else {
                    None
                }
            }
            BonusRule::Quality { amount } => {
                if coverage_percentage >= QUALITY_BONUS_MIN_COVERAGE {
                    Some(*amount)
                } else {
                    None
                }
            }
        };
        if let Some(amount) = awarded {
            bonus_amount += amount;
            applied_bonuses.push(AppliedBonus {
                rule: rule.clone(),
                amount: round_cents(amount),
            });
        }
    }

    CommissionResult {
        base_amount: round_cents(base_amount),
        bonus_amount: round_cents(bonus_amount),
        total_amount: round_cents(base_amount + bonus_amount),
        factors: CommissionFactors {
            coverage_percentage,
            applied_bonuses,
        },
    }
}

/// Per-unit commission for product distribution.
pub fn flat_commission(rate_per_unit: f64, quantity: u32) -> f64 {
    round_cents(rate_per_unit * f64::from(quantity))
}

/// Flat commission for a completed survey; boards without a configured rate
/// pay nothing.
pub fn survey_commission(rate: Option<f64>) -> f64 {
    round_cents(rate.unwrap_or(0.0))
}
