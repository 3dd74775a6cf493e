//! # Hashing algorithm contract
//!
//! Every perceptual hashing algorithm implements [`HashingAlgorithm`]. An
//! implementation must uphold the following for every image it accepts:
//!
//! - **Determinism**: hashing the same image content twice yields a
//!   bit-identical [`Hash`].
//! - **Similarity**: the Hamming distance between two hashes of the same
//!   algorithm instance grows with the visual difference of the images.
//!   Identical images have distance 0.
//! - **Guard bit**: every hash starts with a 1 bit (use [`HashBuilder`](crate::HashBuilder)), and
//!   all hashes of one instance have the same length.
//!
//! The hash length is driven by the requested [`BitResolution`] but may be
//! marginally larger or smaller when the algorithm's sampling grid cannot
//! divide the resolution evenly.

use image::DynamicImage;
use log::debug;
use std::path::Path;

use crate::error::{Error, Result};
use crate::hash::Hash;

/// Requested number of payload bits for an algorithm, excluding the guard bit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitResolution(u32);

impl BitResolution {
    /// Validate a requested resolution. Negative values are rejected.
    pub fn new(bit_resolution: i32) -> Result<Self> {
        u32::try_from(bit_resolution).map(Self).map_err(|_| {
            Error::InvalidArgument(format!(
                "bit resolution for hashing algorithms has to be positive, got {}",
                bit_resolution
            ))
        })
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Side length of the smallest square grid holding at least this many bits.
    /// Never smaller than 1.
    pub fn grid_side(self) -> u32 {
        let mut side = (self.0 as f64).sqrt().ceil() as u32;
        // Guard against float rounding on large resolutions
        while side.saturating_mul(side) < self.0 {
            side += 1;
        }
        side.max(1)
    }
}

/// A perceptual image hashing algorithm
pub trait HashingAlgorithm: Send + Sync {
    /// Calculate the hash of an image held in memory
    fn hash(&self, image: &DynamicImage) -> Result<Hash>;

    /// Decode the image at `path` and hash it.
    ///
    /// Read and decode failures are returned unchanged, see
    /// [`Error::is_io_failure`].
    fn hash_file(&self, path: &Path) -> Result<Hash> {
        debug!("{}: hashing '{}'", self.name(), path.display());
        let image = image::open(path)?;
        self.hash(&image)
    }

    /// Id of this algorithm and its settings, stable across restarts
    fn algorithm_id(&self) -> i32;

    /// The resolution the algorithm was constructed with
    fn bit_resolution(&self) -> BitResolution;

    /// Short human readable name, e.g. `"AverageHash"`
    fn name(&self) -> &'static str;
}

/// Derive a stable algorithm id from an algorithm name and its parameters.
///
/// The id is the first four bytes of the BLAKE3 digest over the name
/// followed by each parameter in little-endian order, so equal
/// configurations always map to the same id.
pub fn derive_algorithm_id(name: &str, params: &[i64]) -> i32 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(name.as_bytes());
    for param in params {
        hasher.update(&param.to_le_bytes());
    }

    let digest = hasher.finalize();
    let bytes = digest.as_bytes();
    i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
