use super::common::{board, image};
use crate::commissions::domain::{BoardProfile, BonusRule, CoverageReward};
use crate::commissions::placement::{
    review_placement, ImageAnalysisConfig, PlacementError, PlacementSubmission,
};

fn covered_board() -> BoardProfile {
    board(
        10.0,
        vec![BonusRule::Coverage {
            min_coverage: 50.0,
            reward: CoverageReward::Amount(5.0),
        }],
    )
}

#[test]
fn confident_placements_earn_the_board_commission() {
    let submission = PlacementSubmission {
        board_image: image(1920, 1080),
        storefront_image: image(1920, 1080),
    };

    let review = review_placement(&covered_board(), &submission, &ImageAnalysisConfig::default())
        .expect("review");

    assert_eq!(review.analysis.coverage_percentage, 100.0);
    assert_eq!(review.analysis.confidence, 1.0);
    assert_eq!(review.commission.total_amount, 15.0);
}

#[test]
fn low_confidence_imagery_fails_the_gate() {
    let submission = PlacementSubmission {
        board_image: image(800, 600),
        storefront_image: image(1920, 1080),
    };

    match review_placement(&covered_board(), &submission, &ImageAnalysisConfig::default()) {
        Err(PlacementError::LowConfidence {
            confidence,
            threshold,
        }) => {
            assert_eq!(confidence, 0.23);
            assert_eq!(threshold, 0.85);
        }
        other => panic!("expected a low-confidence failure, got {other:?}"),
    }
}

#[test]
fn the_confidence_threshold_is_configurable() {
    let submission = PlacementSubmission {
        board_image: image(800, 600),
        storefront_image: image(1920, 1080),
    };
    let config = ImageAnalysisConfig {
        confidence_threshold: 0.2,
    };

    let review = review_placement(&covered_board(), &submission, &config).expect("review");

    assert_eq!(review.commission.base_amount, 10.0);
    assert_eq!(review.commission.bonus_amount, 0.0);
}

#[test]
fn a_confidence_exactly_at_the_threshold_passes() {
    let submission = PlacementSubmission {
        board_image: image(800, 600),
        storefront_image: image(1920, 1080),
    };
    let config = ImageAnalysisConfig {
        confidence_threshold: 0.23,
    };

    assert!(review_placement(&covered_board(), &submission, &config).is_ok());
}
