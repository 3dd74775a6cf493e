//! Core functionality for perceptual image hashing.
//!
//! This library provides:
//! - The [`HashingAlgorithm`] contract every hashing algorithm implements
//! - Shared bicubic resize helpers for algorithm implementations
//! - The [`Hash`] bit vector with Hamming distance comparison
//! - Average and DCT based reference algorithms
//!
//! ```no_run
//! use image_hashing_core::{HashingAlgorithm, PerceptualHash};
//! use std::path::Path;
//!
//! let hasher = PerceptualHash::new(64)?;
//! let a = hasher.hash_file(Path::new("a.jpg"))?;
//! let b = hasher.hash_file(Path::new("b.jpg"))?;
//! println!("distance: {}", a.hamming_distance(&b)?);
//! # Ok::<(), image_hashing_core::Error>(())
//! ```

// -- Internal Modules --
mod error;

// -- Public Modules --
pub mod algorithm;
pub mod config;
pub mod hash;
pub mod logging;
pub mod resize;
pub mod variants;

// -- Public Re-exports --
pub use algorithm::{derive_algorithm_id, BitResolution, HashingAlgorithm};
pub use config::{HasherConfig, LogLevel};
pub use error::{Error, Result};
pub use hash::{Hash, HashBuilder};
pub use resize::{gray_scaled_instance, scaled_instance};
pub use variants::{AlgorithmKind, AverageHash, PerceptualHash};
