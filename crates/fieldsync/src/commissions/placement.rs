use serde::{Deserialize, Serialize};

use super::calculator::board_commission;
use super::domain::{BoardProfile, CommissionResult};
use super::imagery::{analyze_board_imagery, CoverageAnalysis, ImageMetadata};

/// Knobs for the imagery gate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageAnalysisConfig {
    pub confidence_threshold: f64,
}

impl Default for ImageAnalysisConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.85,
        }
    }
}

/// The two images a placement claim ships: the board close-up and the full
/// storefront shot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementSubmission {
    pub board_image: ImageMetadata,
    pub storefront_image: ImageMetadata,
}

/// Validation failure of the imagery gate; non-retryable without new images.
#[derive(Debug, thiserror::Error)]
pub enum PlacementError {
    #[error("image analysis confidence {confidence:.2} is below the required {threshold:.2}")]
    LowConfidence { confidence: f64, threshold: f64 },
}

/// Accepted placement: the analysis that passed the gate and the commission
/// it earned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementReview {
    pub analysis: CoverageAnalysis,
    pub commission: CommissionResult,
}

/// Reviews a board placement claim: runs the imagery heuristic, rejects
/// low-confidence analyses, and prices the rest from the achieved coverage.
/// Pure; recording the outcome is the caller's job.
pub fn review_placement(
    board: &BoardProfile,
    submission: &PlacementSubmission,
    config: &ImageAnalysisConfig,
) -> Result<PlacementReview, PlacementError> {
    let analysis = analyze_board_imagery(&submission.board_image, &submission.storefront_image);
    if analysis.confidence < config.confidence_threshold {
        return Err(PlacementError::LowConfidence {
            confidence: analysis.confidence,
            threshold: config.confidence_threshold,
        });
    }

    let commission = board_commission(board, analysis.coverage_percentage);
    Ok(PlacementReview {
        analysis,
        commission,
    })
}
