//! Visual similarity capability
//!
//! Scores how close a generated site renders to the original, as a value in
//! [0, 1]. Total by contract: any missing or undecodable input degrades to
//! the neutral default instead of erroring, so comparison can never fail a
//! pipeline run.

use std::path::Path;

use async_trait::async_trait;
use image::imageops::FilterType;
use tracing::{info, warn};

/// Score reported when images cannot be compared.
pub const DEFAULT_SIMILARITY: f64 = 0.5;

/// Capability for scoring visual similarity between two images on disk.
#[async_trait]
pub trait SimilarityCapability: Send + Sync {
    /// Compare two images; returns a score in [0, 1]. Never errors.
    async fn compare(&self, original: &Path, generated: &Path) -> f64;
}

/// Pixel-level comparison: grayscale both images, resize the generated one
/// to the original's dimensions, and invert the mean absolute difference.
pub struct PixelSimilarity;

#[async_trait]
impl SimilarityCapability for PixelSimilarity {
    async fn compare(&self, original: &Path, generated: &Path) -> f64 {
        if !original.exists() || !generated.exists() {
            warn!(
                original = %original.display(),
                generated = %generated.display(),
                "screenshot files not found for comparison"
            );
            return DEFAULT_SIMILARITY;
        }

        let first = match image::open(original) {
            Ok(img) => img.to_luma8(),
            Err(e) => {
                warn!(path = %original.display(), error = %e, "failed to decode image");
                return DEFAULT_SIMILARITY;
            }
        };
        let second = match image::open(generated) {
            Ok(img) => img.to_luma8(),
            Err(e) => {
                warn!(path = %generated.display(), error = %e, "failed to decode image");
                return DEFAULT_SIMILARITY;
            }
        };

        let (width, height) = first.dimensions();
        if width == 0 || height == 0 {
            return DEFAULT_SIMILARITY;
        }
        let second = image::imageops::resize(&second, width, height, FilterType::Triangle);

        let total_diff: u64 = first
            .pixels()
            .zip(second.pixels())
            .map(|(a, b)| u64::from(a.0[0].abs_diff(b.0[0])))
            .sum();
        let pixel_count = u64::from(width) * u64::from(height);
        let mean_diff = total_diff as f64 / pixel_count as f64;

        let score = (1.0 - mean_diff / 255.0).clamp(0.0, 1.0);
        info!(score, "similarity comparison complete");
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    fn write_gray(path: &Path, shade: u8) {
        let img = GrayImage::from_pixel(8, 8, Luma([shade]));
        img.save(path).unwrap();
    }

    #[tokio::test]
    async fn test_missing_files_degrade_to_default() {
        let score = PixelSimilarity
            .compare(Path::new("/nonexistent/a.png"), Path::new("/nonexistent/b.png"))
            .await;
        assert_eq!(score, DEFAULT_SIMILARITY);
    }

    #[tokio::test]
    async fn test_identical_images_score_one() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.png");
        let b = dir.path().join("b.png");
        write_gray(&a, 128);
        write_gray(&b, 128);

        let score = PixelSimilarity.compare(&a, &b).await;
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_opposite_images_score_zero() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.png");
        let b = dir.path().join("b.png");
        write_gray(&a, 0);
        write_gray(&b, 255);

        let score = PixelSimilarity.compare(&a, &b).await;
        assert!(score < 1e-9);
    }

    #[tokio::test]
    async fn test_undecodable_file_degrades_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.png");
        let b = dir.path().join("b.png");
        std::fs::write(&a, b"not a png").unwrap();
        write_gray(&b, 10);

        let score = PixelSimilarity.compare(&a, &b).await;
        assert_eq!(score, DEFAULT_SIMILARITY);
    }
}
