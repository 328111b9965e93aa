use serde::{Deserialize, Serialize};

/// Identifier wrapper for advertising boards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardId(pub String);

/// Coverage threshold the flat quality bonus requires.
pub const QUALITY_BONUS_MIN_COVERAGE: f64 = 80.0;

/// Rounds a monetary or percentage value to two decimals, half away from
/// zero.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Catalog entry for a board: its fixed rate plus configured bonus rules.
/// Rules are typed at load time; malformed configuration fails there rather
/// than mid-calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardProfile {
    pub board_id: BoardId,
    pub commission_rate: f64,
    #[serde(default)]
    pub bonus_rules: Vec<BonusRule>,
}

/// One bonus rule from board configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BonusRule {
    /// Stacks whenever the achieved coverage reaches `min_coverage`. Every
    /// qualifying rule contributes; rules are not mutually exclusive.
    Coverage { min_coverage: f64, reward: CoverageReward },
    /// Flat amount awarded once coverage reaches the quality threshold.
    Quality { amount: f64 },
}

/// How a qualifying coverage rule pays: a fixed amount or a multiple of the
/// board's base rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageReward {
    Amount(f64),
    Multiplier(f64),
}

/// Commission for one board placement. Derived, never persisted here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommissionResult {
    pub base_amount: f64,
    pub bonus_amount: f64,
    pub total_amount: f64,
    pub factors: CommissionFactors,
}

/// Inputs and rule trace behind a commission figure, kept for audit
/// payloads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommissionFactors {
    pub coverage_percentage: f64,
    pub applied_bonuses: Vec<AppliedBonus>,
}

/// One bonus rule that fired, with the amount it contributed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedBonus {
    pub rule: BonusRule,
    pub amount: f64,
}
