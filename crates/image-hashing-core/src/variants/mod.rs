//! Reference hashing algorithms

mod average;
mod perceptual;

pub use average::AverageHash;
pub use perceptual::PerceptualHash;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::algorithm::HashingAlgorithm;
use crate::error::{Error, Result};

/// Available hash algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmKind {
    /// Average Hash (aHash) - mean luminance threshold, fast
    Average,
    /// Perceptual Hash (pHash) - DCT based, robust to edits and rescaling
    #[default]
    Perceptual,
}

impl AlgorithmKind {
    /// Construct the algorithm with the requested bit resolution
    pub fn build(self, bit_resolution: i32) -> Result<Box<dyn HashingAlgorithm>> {
        Ok(match self {
            Self::Average => Box::new(AverageHash::new(bit_resolution)?),
            Self::Perceptual => Box::new(PerceptualHash::new(bit_resolution)?),
        })
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Average => write!(f, "average"),
            Self::Perceptual => write!(f, "perceptual"),
        }
    }
}

impl FromStr for AlgorithmKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "average" | "ahash" => Ok(Self::Average),
            "perceptual" | "phash" => Ok(Self::Perceptual),
            other => Err(Error::InvalidArgument(format!(
                "unknown hashing algorithm '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!("average".parse::<AlgorithmKind>().unwrap(), AlgorithmKind::Average);
        assert_eq!("pHash".parse::<AlgorithmKind>().unwrap(), AlgorithmKind::Perceptual);
        assert!("wavelet".parse::<AlgorithmKind>().is_err());
    }

    #[test]
    fn test_build_matches_kind() {
        let average = AlgorithmKind::Average.build(64).unwrap();
        assert_eq!(average.name(), AverageHash::NAME);
        assert_eq!(average.bit_resolution().get(), 64);

        let perceptual = AlgorithmKind::Perceptual.build(32).unwrap();
        assert_eq!(perceptual.name(), PerceptualHash::NAME);
        assert_ne!(average.algorithm_id(), perceptual.algorithm_id());

        assert!(matches!(
            AlgorithmKind::Average.build(-1),
            Err(Error::InvalidArgument(_))
        ));
    }
}
