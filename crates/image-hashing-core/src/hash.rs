//! # Hash values
//!
//! A [`Hash`] is the bit vector a [`HashingAlgorithm`](crate::HashingAlgorithm)
//! produces for an image. Bits are stored most significant first: bit 0 is the
//! leading guard bit, which is always 1 so that a hash rendered as a number
//! never loses leading zero payload bits and every hash of one algorithm
//! instance has the same length.
//!
//! ## Distance interpretation
//!
//! Similarity is measured with the Hamming distance (count of differing bits).
//! Because hash lengths vary with the requested bit resolution, the normalized
//! distance (distance / length) is the better value to threshold on:
//!
//! - 0.0: identical hashes
//! - below ~0.15: same image with minor modifications
//! - above ~0.3: different images

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

const WORD_BITS: u32 = u64::BITS;

/// A perceptual hash with its leading guard bit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawHash")]
pub struct Hash {
    /// Bits packed most significant first; bits past `bit_len` are always zero
    words: Vec<u64>,
    /// Number of bits including the guard bit
    bit_len: u32,
    /// Id of the algorithm configuration that produced the hash
    algorithm_id: i32,
}

impl Hash {
    /// Total number of bits, guard bit included
    pub fn bit_len(&self) -> u32 {
        self.bit_len
    }

    /// Id of the algorithm configuration that produced this hash
    pub fn algorithm_id(&self) -> i32 {
        self.algorithm_id
    }

    /// Read a single bit, where index 0 is the guard bit
    pub fn bit(&self, index: u32) -> Option<bool> {
        (index < self.bit_len).then(|| self.get(index))
    }

    /// The guard bit. Always `true` for hashes built through [`HashBuilder`].
    pub fn leading_bit(&self) -> bool {
        self.get(0)
    }

    fn get(&self, index: u32) -> bool {
        let word = self.words[(index / WORD_BITS) as usize];
        word & (1u64 << (WORD_BITS - 1 - index % WORD_BITS)) != 0
    }

    /// Calculate the Hamming distance between two hashes
    pub fn hamming_distance(&self, other: &Hash) -> Result<u32> {
        self.check_compatible(other)?;

        Ok(self
            .words
            .iter()
            .zip(other.words.iter())
            .map(|(a, b)| (a ^ b).count_ones())
            .sum())
    }

    /// Hamming distance divided by the hash length, in `[0, 1]`
    pub fn normalized_hamming_distance(&self, other: &Hash) -> Result<f64> {
        let distance = self.hamming_distance(other)?;
        Ok(distance as f64 / self.bit_len as f64)
    }

    /// Check if two images are perceptually similar based on a normalized threshold
    pub fn is_similar(&self, other: &Hash, threshold: f64) -> Result<bool> {
        Ok(self.normalized_hamming_distance(other)? <= threshold)
    }

    fn check_compatible(&self, other: &Hash) -> Result<()> {
        if self.algorithm_id != other.algorithm_id {
            return Err(Error::IncompatibleHash(format!(
                "algorithm id {} vs {}",
                self.algorithm_id, other.algorithm_id
            )));
        }

        if self.bit_len != other.bit_len {
            return Err(Error::IncompatibleHash(format!(
                "length {} vs {} bits",
                self.bit_len, other.bit_len
            )));
        }

        Ok(())
    }

    /// Render the bits as a hexadecimal number, guard bit included
    pub fn to_hex(&self) -> String {
        // Left-pad with zero bits so the bit count is a multiple of four
        let pad = (4 - self.bit_len % 4) % 4;
        let mut out = String::with_capacity(((self.bit_len + pad) / 4) as usize);

        let mut nibble = 0u32;
        let mut filled = pad;
        for index in 0..self.bit_len {
            nibble = (nibble << 1) | self.get(index) as u32;
            filled += 1;
            if filled == 4 {
                // nibble < 16 so the digit always exists
                out.push(char::from_digit(nibble, 16).unwrap_or('0'));
                nibble = 0;
                filled = 0;
            }
        }

        out
    }
}

/// Serialized form of [`Hash`], checked before it becomes one
#[derive(Deserialize)]
struct RawHash {
    words: Vec<u64>,
    bit_len: u32,
    algorithm_id: i32,
}

impl TryFrom<RawHash> for Hash {
    type Error = Error;

    fn try_from(raw: RawHash) -> Result<Self> {
        if raw.bit_len == 0 {
            return Err(Error::InvalidArgument(
                "malformed hash: missing guard bit".to_string(),
            ));
        }

        let expected_words = raw.bit_len.div_ceil(WORD_BITS) as usize;
        if raw.words.len() != expected_words {
            return Err(Error::InvalidArgument(format!(
                "malformed hash: {} bits need {} words, got {}",
                raw.bit_len,
                expected_words,
                raw.words.len()
            )));
        }

        let used = raw.bit_len % WORD_BITS;
        if used != 0 && raw.words[expected_words - 1] & (u64::MAX >> used) != 0 {
            return Err(Error::InvalidArgument(
                "malformed hash: padding bits past the hash length are set".to_string(),
            ));
        }

        let hash = Hash {
            words: raw.words,
            bit_len: raw.bit_len,
            algorithm_id: raw.algorithm_id,
        };
        if !hash.leading_bit() {
            return Err(Error::InvalidArgument(
                "malformed hash: guard bit is not set".to_string(),
            ));
        }

        Ok(hash)
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Accumulates payload bits behind the guard bit
#[derive(Debug, Clone)]
pub struct HashBuilder {
    words: Vec<u64>,
    bit_len: u32,
}

impl HashBuilder {
    /// Start a hash expecting roughly `payload_bits` bits after the guard bit
    pub fn with_capacity(payload_bits: usize) -> Self {
        let total = payload_bits + 1;
        let mut builder = Self {
            words: Vec::with_capacity(total.div_ceil(WORD_BITS as usize)),
            bit_len: 0,
        };
        builder.push(true);
        builder
    }

    /// Append one payload bit
    pub fn push(&mut self, bit: bool) {
        let index = self.bit_len;
        if index % WORD_BITS == 0 {
            self.words.push(0);
        }
        if bit {
            self.words[(index / WORD_BITS) as usize] |= 1u64 << (WORD_BITS - 1 - index % WORD_BITS);
        }
        self.bit_len += 1;
    }

    /// Number of bits pushed so far, guard bit included
    pub fn len(&self) -> u32 {
        self.bit_len
    }

    /// Always false: the guard bit is present from construction
    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// Seal the bits into a [`Hash`] tagged with the producing algorithm
    pub fn finish(self, algorithm_id: i32) -> Hash {
        Hash {
            words: self.words,
            bit_len: self.bit_len,
            algorithm_id,
        }
    }
}
