//! DCT based perceptual hash
//!
//! The image is reduced to a `4k x 4k` luminance grid, transformed with a
//! two-dimensional DCT-II, and `k x k` low frequency coefficients are compared
//! against their mean. The coefficients are the top-left `k x k` block with
//! the DC term swapped for the next coefficient of the first row, `(0, k)`.
//! The DC term carries the overall brightness only, so leaving it out keeps
//! every payload bit informative and makes the hash insensitive to global
//! brightness shifts.

use image::DynamicImage;
use rustdct::DctPlanner;

use crate::algorithm::{derive_algorithm_id, BitResolution, HashingAlgorithm};
use crate::error::{Error, Result};
use crate::hash::{Hash, HashBuilder};
use crate::resize::gray_scaled_instance;

/// Oversampling factor between the DCT input and the kept coefficient block
const OVERSAMPLE: u32 = 4;

/// Perceptual hash (pHash) over the low frequency DCT coefficients
#[derive(Debug, Clone)]
pub struct PerceptualHash {
    bit_resolution: BitResolution,
    side: u32,
    algorithm_id: i32,
}

impl PerceptualHash {
    pub const NAME: &'static str = "PerceptualHash";

    pub fn new(bit_resolution: i32) -> Result<Self> {
        let bit_resolution = BitResolution::new(bit_resolution)?;
        let side = bit_resolution.grid_side();

        Ok(Self {
            bit_resolution,
            side,
            algorithm_id: derive_algorithm_id(Self::NAME, &[bit_resolution.get() as i64]),
        })
    }

    /// Side length of the kept coefficient block
    pub fn grid_side(&self) -> u32 {
        self.side
    }
}

impl HashingAlgorithm for PerceptualHash {
    fn hash(&self, image: &DynamicImage) -> Result<Hash> {
        let size = self
            .side
            .checked_mul(OVERSAMPLE)
            .ok_or(Error::ResolutionTooLarge {
                width: u32::MAX,
                height: u32::MAX,
                max_pixels: crate::resize::MAX_TARGET_PIXELS,
            })?;
        let small = gray_scaled_instance(image, size, size)?;

        let size = size as usize;
        let mut matrix: Vec<f32> = small.pixels().map(|p| p.0[0] as f32).collect();
        dct_2d(&mut matrix, size);

        let coefficients = low_frequency_coefficients(&matrix, size, self.side as usize);
        let mean =
            coefficients.iter().map(|&c| c as f64).sum::<f64>() / coefficients.len() as f64;

        let mut builder = HashBuilder::with_capacity(coefficients.len());
        for &coefficient in &coefficients {
            builder.push(coefficient as f64 > mean);
        }

        Ok(builder.finish(self.algorithm_id))
    }

    fn algorithm_id(&self) -> i32 {
        self.algorithm_id
    }

    fn bit_resolution(&self) -> BitResolution {
        self.bit_resolution
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

/// The `side * side` lowest AC coefficients of a row-major `size x size` DCT
/// matrix: the top-left block in row-major order, DC replaced by `(0, side)`.
/// Requires `size > side`.
fn low_frequency_coefficients(matrix: &[f32], size: usize, side: usize) -> Vec<f32> {
    let mut coefficients: Vec<f32> = (0..side)
        .flat_map(|row| matrix[row * size..row * size + side].iter().copied())
        .collect();
    coefficients[0] = matrix[side];
    coefficients
}

/// In-place two-dimensional DCT-II of a row-major `size x size` matrix
fn dct_2d(matrix: &mut [f32], size: usize) {
    let dct = DctPlanner::<f32>::new().plan_dct2(size);

    for row in matrix.chunks_exact_mut(size) {
        dct.process_dct2(row);
    }
    transpose(matrix, size);

    for row in matrix.chunks_exact_mut(size) {
        dct.process_dct2(row);
    }
    transpose(matrix, size);
}

fn transpose(matrix: &mut [f32], size: usize) {
    for row in 0..size {
        for col in row + 1..size {
            matrix.swap(row * size + col, col * size + row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn pattern(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            let v = if (x * 4 / width + y * 4 / height) % 2 == 0 { 30 } else { 220 };
            Rgb([v, v, v])
        }))
    }

    #[test]
    fn test_hash_length() {
        let image = pattern(128, 128);
        for (bits, expected) in [(0, 2), (9, 10), (64, 65), (50, 65)] {
            let hasher = PerceptualHash::new(bits).unwrap();
            assert_eq!(hasher.hash(&image).unwrap().bit_len(), expected);
        }
    }

    #[test]
    fn test_low_frequency_coefficients_skip_dc() {
        // 4x4 matrix holding its own indices
        let matrix: Vec<f32> = (0..16).map(|v| v as f32).collect();

        assert_eq!(low_frequency_coefficients(&matrix, 4, 1), vec![1.0]);
        assert_eq!(
            low_frequency_coefficients(&matrix, 4, 2),
            vec![2.0, 1.0, 4.0, 5.0]
        );
    }

    #[test]
    fn test_brightness_shift_keeps_hash() {
        let hasher = PerceptualHash::new(64).unwrap();
        let shifted = |offset: u8| {
            DynamicImage::ImageRgb8(RgbImage::from_fn(128, 128, |x, y| {
                let base = if (x / 32 + y / 32) % 2 == 0 { 40 } else { 160 };
                let v = base + offset;
                Rgb([v, v, v])
            }))
        };

        let dark = hasher.hash(&shifted(0)).unwrap();
        let bright = hasher.hash(&shifted(30)).unwrap();
        assert_eq!(dark.hamming_distance(&bright).unwrap(), 0);
    }

    #[test]
    fn test_oversized_resolution_is_an_error() {
        let hasher = PerceptualHash::new(i32::MAX).unwrap();
        assert!(matches!(
            hasher.hash(&pattern(8, 8)),
            Err(Error::ResolutionTooLarge { .. })
        ));
    }

    #[test]
    fn test_transpose_round_trip() {
        let original: Vec<f32> = (0..9).map(|v| v as f32).collect();
        let mut matrix = original.clone();

        transpose(&mut matrix, 3);
        assert_eq!(matrix, vec![0.0, 3.0, 6.0, 1.0, 4.0, 7.0, 2.0, 5.0, 8.0]);

        transpose(&mut matrix, 3);
        assert_eq!(matrix, original);
    }

    #[test]
    fn test_dct_of_constant_is_dc_only() {
        let mut matrix = vec![10.0f32; 16];
        dct_2d(&mut matrix, 4);

        assert!(matrix[0] > 0.0);
        for &coefficient in &matrix[1..] {
            assert!(coefficient.abs() < 1e-3);
        }
    }

    #[test]
    fn test_rescaled_copy_is_closer_than_different_image() {
        let hasher = PerceptualHash::new(64).unwrap();
        let original = hasher.hash(&pattern(400, 400)).unwrap();
        let rescaled = hasher.hash(&pattern(173, 173)).unwrap();
        let inverted = {
            let mut image = pattern(400, 400);
            image.invert();
            hasher.hash(&image).unwrap()
        };

        let near = original.hamming_distance(&rescaled).unwrap();
        let far = original.hamming_distance(&inverted).unwrap();
        assert!(near < far, "near {} far {}", near, far);
    }
}
