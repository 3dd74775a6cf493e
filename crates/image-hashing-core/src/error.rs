use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Custom error types for the image-hashing library
#[derive(Error, Debug)]
pub enum Error {
    /// Argument outside the accepted range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O operation error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding or processing error
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// Image or resize target without any pixels
    #[error("Degenerate image: {width}x{height} has no pixels")]
    DegenerateImage { width: u32, height: u32 },

    /// Resize target above the supported pixel count
    #[error("Resolution too large: {width}x{height} exceeds {max_pixels} pixels")]
    ResolutionTooLarge {
        width: u32,
        height: u32,
        max_pixels: u64,
    },

    /// Hashes produced by different algorithms or of different lengths
    #[error("Incompatible hashes: {0}")]
    IncompatibleHash(String),

    /// Invalid configuration error
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl Error {
    /// Whether the error stems from reading or decoding an image file
    pub fn is_io_failure(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Image(_))
    }
}
