//! Transform operations for dctq
//!
//! This crate implements the 8x8 matrix-form DCT, the fixed quantization tables and
//! per-coefficient quantization.

pub mod dct;
pub mod quantization;

pub use dct::*;
pub use quantization::*;
