use crate::commissions::domain::{BoardId, BoardProfile, BonusRule};
use crate::commissions::imagery::ImageMetadata;

pub(super) fn board(rate: f64, rules: Vec<BonusRule>) -> BoardProfile {
    BoardProfile {
        board_id: BoardId("board-hilltop-kiosk".to_string()),
        commission_rate: rate,
        bonus_rules: rules,
    }
}

/// Image that scores full marks on every rubric term at the given size.
pub(super) fn image(width: u32, height: u32) -> ImageMetadata {
    ImageMetadata {
        width_pixels: width,
        height_pixels: height,
        format: Some("jpeg".to_string()),
        file_size_bytes: Some(2 * 1024 * 1024),
        pixel_density: Some(300),
    }
}
