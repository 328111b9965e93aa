//! Commission math for field activities.
//!
//! Board placements pay a base rate plus stacked coverage and quality
//! bonuses driven by an image-metadata heuristic; surveys, distributions and
//! photo captures pay flat rates off a rate card. Everything here is pure
//! arithmetic; persistence of the resulting figures belongs to the caller.

pub(crate) mod calculator;
pub mod domain;
pub(crate) mod imagery;
pub(crate) mod placement;
pub(crate) mod rates;

#[cfg(test)]
mod tests;

pub use calculator::{board_commission, flat_commission, survey_commission};
pub use domain::{
    round_cents, AppliedBonus, BoardId, BoardProfile, BonusRule, CommissionFactors,
    CommissionResult, CoverageReward, QUALITY_BONUS_MIN_COVERAGE,
};
pub use imagery::{analyze_board_imagery, CoverageAnalysis, ImageMetadata};
pub use placement::{
    review_placement, ImageAnalysisConfig, PlacementError, PlacementReview, PlacementSubmission,
};
pub use rates::{
    settle_visit, ActivityClaim, ActivityKind, RateCard, SettlementLine, VisitSettlement,
};
