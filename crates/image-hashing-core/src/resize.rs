//! Resampling helpers shared by the hashing algorithms
//!
//! Both helpers are pure: the input image is never modified and the returned
//! buffer is owned independently of it.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, GrayImage, RgbaImage};

use crate::error::{Error, Result};

/// Bicubic resampling filter
pub const BICUBIC: FilterType = FilterType::CatmullRom;

/// Largest resize target accepted, in pixels (an 8192x8192 grid)
pub const MAX_TARGET_PIXELS: u64 = 1 << 26;

fn check_dimensions(image: &DynamicImage, width: u32, height: u32) -> Result<()> {
    let (src_width, src_height) = image.dimensions();
    if src_width == 0 || src_height == 0 {
        return Err(Error::DegenerateImage {
            width: src_width,
            height: src_height,
        });
    }
    if width == 0 || height == 0 {
        return Err(Error::DegenerateImage { width, height });
    }
    if width as u64 * height as u64 > MAX_TARGET_PIXELS {
        return Err(Error::ResolutionTooLarge {
            width,
            height,
            max_pixels: MAX_TARGET_PIXELS,
        });
    }
    Ok(())
}

/// Create a luminance-only copy of `image` scaled to exactly `width` x `height`
pub fn gray_scaled_instance(image: &DynamicImage, width: u32, height: u32) -> Result<GrayImage> {
    check_dimensions(image, width, height)?;

    // Scale in colour first, then reduce to luminance
    Ok(image.resize_exact(width, height, BICUBIC).to_luma8())
}

/// Create an RGBA copy of `image` scaled to exactly `width` x `height`
pub fn scaled_instance(image: &DynamicImage, width: u32, height: u32) -> Result<RgbaImage> {
    check_dimensions(image, width, height)?;

    Ok(image::imageops::resize(&image.to_rgba8(), width, height, BICUBIC))
}
