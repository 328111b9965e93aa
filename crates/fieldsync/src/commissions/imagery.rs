use serde::{Deserialize, Serialize};

/// Pixel count of the reference full-HD frame the rubric scores against.
const REFERENCE_PIXELS: f64 = 1920.0 * 1080.0;
const MEGABYTE: f64 = 1024.0 * 1024.0;

/// Metadata extracted from an uploaded image. Only dimensions are required;
/// the remaining fields degrade to rubric defaults when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub width_pixels: u32,
    pub height_pixels: u32,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub file_size_bytes: Option<u64>,
    #[serde(default)]
    pub pixel_density: Option<u32>,
}

impl ImageMetadata {
    fn pixel_count(&self) -> f64 {
        f64::from(self.width_pixels) * f64::from(self.height_pixels)
    }
}

/// Outcome of the metadata heuristic, all values rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageAnalysis {
    pub coverage_percentage: f64,
    pub quality_score: f64,
    pub confidence: f64,
}

/// Estimates how much of the storefront a placed board covers, from image
/// metadata alone. This is a metadata heuristic, not computer vision: area
/// ratio for coverage, a weighted rubric for quality (resolution 40, format
/// 20, file-size band 20, pixel density 20) and board resolution for
/// confidence.
pub fn analyze_board_imagery(board: &ImageMetadata, storefront: &ImageMetadata) -> CoverageAnalysis {
    let board_pixels = board.pixel_count();
    let storefront_pixels = storefront.pixel_count();

    let coverage_percentage = (board_pixels / storefront_pixels * 100.0).min(100.0);

    let average_pixels = (board_pixels + storefront_pixels) / 2.0;
    let resolution_score = (average_pixels / REFERENCE_PIXELS * 40.0).min(40.0);

    let format_score = match board.format.as_deref() {
        Some("jpeg") | Some("png") => 20.0,
        _ => 10.0,
    };

    // Unknown file size is scored as a nominal one-megabyte upload.
    let megabytes = board
        .file_size_bytes
        .map(|bytes| bytes as f64 / MEGABYTE)
        .unwrap_or(1.0);
    let size_score = if (0.5..=5.0).contains(&megabytes) {
        20.0
    } else {
        10.0
    };

    let density_score = match board.pixel_density {
        Some(density) if density >= 72 => 20.0,
        _ => 10.0,
    };

    let quality_score = (resolution_score + format_score + size_score + density_score).min(100.0);
    let confidence = (board_pixels / REFERENCE_PIXELS).min(1.0);

    CoverageAnalysis {
        coverage_percentage: round2(coverage_percentage),
        quality_score: round2(quality_score),
        confidence: round2(confidence),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
