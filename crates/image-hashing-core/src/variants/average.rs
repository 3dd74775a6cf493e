use image::DynamicImage;

use crate::algorithm::{derive_algorithm_id, BitResolution, HashingAlgorithm};
use crate::error::Result;
use crate::hash::{Hash, HashBuilder};
use crate::resize::gray_scaled_instance;

/// Average hash: one bit per cell of a square luminance grid, set when the
/// cell is brighter than the grid mean.
///
/// The grid side is the smallest square holding `bit_resolution` bits, so
/// a resolution of 64 yields an 8x8 grid and a 65 bit hash.
#[derive(Debug, Clone)]
pub struct AverageHash {
    bit_resolution: BitResolution,
    side: u32,
    algorithm_id: i32,
}

impl AverageHash {
    pub const NAME: &'static str = "AverageHash";

    pub fn new(bit_resolution: i32) -> Result<Self> {
        let bit_resolution = BitResolution::new(bit_resolution)?;
        let side = bit_resolution.grid_side();

        Ok(Self {
            bit_resolution,
            side,
            algorithm_id: derive_algorithm_id(Self::NAME, &[bit_resolution.get() as i64]),
        })
    }

    /// Side length of the luminance grid
    pub fn grid_side(&self) -> u32 {
        self.side
    }
}

impl HashingAlgorithm for AverageHash {
    fn hash(&self, image: &DynamicImage) -> Result<Hash> {
        let small = gray_scaled_instance(image, self.side, self.side)?;
        let cells = (self.side * self.side) as usize;

        let sum: u64 = small.pixels().map(|p| p.0[0] as u64).sum();
        let mean = sum as f64 / cells as f64;

        let mut builder = HashBuilder::with_capacity(cells);
        for pixel in small.pixels() {
            builder.push(pixel.0[0] as f64 > mean);
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
