use image::{DynamicImage, Rgb, RgbImage};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// A solid single-colour image
pub fn solid(width: u32, height: u32, colour: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(colour)))
}

/// Diagonal colour gradient with a bright square in the upper left quadrant
pub fn scene(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        if x < width / 2 && y < height / 2 && x > width / 8 && y > height / 8 {
            Rgb([250, 250, 240])
        } else {
            let r = (x * 200 / width) as u8;
            let g = (y * 200 / height) as u8;
            Rgb([r, g, 60])
        }
    }))
}

/// Save `image` as `<name>.<ext>` in `dir`
pub fn save_test_image(dir: &Path, name: &str, ext: &str, image: &DynamicImage) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(format!("{}.{}", name, ext));
    image.save(&path).unwrap();
    path
}

/// Create a file with an image extension but no image data
pub fn create_corrupt_image(dir: &Path, name: &str) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(format!("{}.png", name));
    let mut file = File::create(&path).unwrap();
    file.write_all(b"DUMMY IMAGE DATA").unwrap();
    path
}
