//! Per-frequency signal-to-quantization-noise statistics

use dctq_core::consts::{BLOCK_AREA, BLOCK_SIZE};
use std::fmt;

/// SQNR of one frequency bin
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sqnr {
    /// Decibels
    Finite(f64),
    /// No quantization error was accumulated at this frequency
    Infinite,
}

impl Sqnr {
    /// `10 * log10(power / mse)`, or infinite when `mse` is zero
    pub fn from_sums(power: f64, mse: f64) -> Self {
        if mse > 0.0 {
            Sqnr::Finite(10.0 * (power / mse).log10())
        } else {
            Sqnr::Infinite
        }
    }

    pub fn db(&self) -> Option<f64> {
        match self {
            Sqnr::Finite(db) => Some(*db),
            Sqnr::Infinite => None,
        }
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Sqnr::Infinite)
    }
}

impl fmt::Display for Sqnr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sqnr::Finite(db) => write!(f, "{:.2}", db),
            Sqnr::Infinite => f.write_str("inf"),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Sqnr {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Sqnr::Finite(db) => serializer.serialize_f64(*db),
            Sqnr::Infinite => serializer.serialize_str("inf"),
        }
    }
}

/// Running `power` and `mse` sums for each of the 64 frequency positions
#[derive(Debug, Clone, PartialEq)]
pub struct SqnrAccumulator {
    power: [f64; BLOCK_AREA],
    mse: [f64; BLOCK_AREA],
}

impl Default for SqnrAccumulator {
    fn default() -> Self {
        Self {
            power: [0.0; BLOCK_AREA],
            mse: [0.0; BLOCK_AREA],
        }
    }
}

impl SqnrAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one coefficient and its residual into bin `index`
    ///
    /// Squares are taken in `f32` and summed in `f64`.
    #[inline]
    pub fn add(&mut self, index: usize, coefficient: f32, residual: f32) {
        self.power[index] += (coefficient * coefficient) as f64;
        self.mse[index] += (residual * residual) as f64;
    }

    pub fn power(&self, index: usize) -> f64 {
        self.power[index]
    }

    pub fn mse(&self, index: usize) -> f64 {
        self.mse[index]
    }

    pub fn finish(&self) -> SqnrReport {
        SqnrReport {
            entries: core::array::from_fn(|i| Sqnr::from_sums(self.power[i], self.mse[i])),
        }
    }
}

/// 8x8 table of per-frequency SQNR values, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct SqnrReport {
    entries: [Sqnr; BLOCK_AREA],
}

impl SqnrReport {
    pub fn get(&self, row: usize, col: usize) -> Sqnr {
        self.entries[row * BLOCK_SIZE + col]
    }

    pub fn entries(&self) -> &[Sqnr; BLOCK_AREA] {
        &self.entries
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, Sqnr> {
        self.entries.chunks_exact(BLOCK_SIZE)
    }

    pub fn infinite_count(&self) -> usize {
        self.entries.iter().filter(|s| s.is_infinite()).count()
    }
}

impl fmt::Display for SqnrReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for entry in row {
                write!(f, "{} ", entry)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SqnrReport {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(BLOCK_SIZE))?;
        for row in self.rows() {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}
