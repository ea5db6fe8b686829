//! Fixed-table quantization

use crate::Block;
use dctq_core::consts::BLOCK_AREA;
use dctq_core::Channel;

/// Quantization table for 8x8 blocks, row-major
pub type QuantTable = [u16; BLOCK_AREA];

/// Luminance table (JPEG Annex K.1)
pub const LUMA_QUANT_TABLE: QuantTable = [
    16, 11, 10, 16, 24, 40, 51, 61, //
    12, 12, 14, 19, 26, 58, 60, 55, //
    14, 13, 16, 24, 40, 57, 69, 56, //
    14, 17, 22, 29, 51, 87, 80, 62, //
    18, 22, 37, 56, 68, 109, 103, 77, //
    24, 35, 55, 64, 81, 104, 113, 92, //
    49, 64, 78, 87, 103, 121, 120, 101, //
    72, 92, 95, 98, 112, 100, 103, 99,
];

/// Chrominance table shared by Cb and Cr (JPEG Annex K.2)
pub const CHROMA_QUANT_TABLE: QuantTable = [
    17, 18, 24, 47, 99, 99, 99, 99, //
    18, 21, 26, 66, 99, 99, 99, 99, //
    24, 26, 56, 99, 99, 99, 99, 99, //
    47, 66, 99, 99, 99, 99, 99, 99, //
    99, 99, 99, 99, 99, 99, 99, 99, //
    99, 99, 99, 99, 99, 99, 99, 99, //
    99, 99, 99, 99, 99, 99, 99, 99, //
    99, 99, 99, 99, 99, 99, 99, 99,
];

/// Table used for a given plane
pub fn quant_table(channel: Channel) -> &'static QuantTable {
    if channel.is_chroma() {
        &CHROMA_QUANT_TABLE
    } else {
        &LUMA_QUANT_TABLE
    }
}

/// One coefficient after quantization
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantized {
    pub value: i16,
    /// `coefficient - value * step`
    pub residual: f32,
}

/// Round `coefficient / step` to the nearest integer, ties away from zero
#[inline]
pub fn quantize_coefficient(coefficient: f32, step: u16) -> i16 {
    (coefficient / step as f32).round() as i16
}

#[inline]
pub fn dequantize_coefficient(value: i16, step: u16) -> f32 {
    (value as i32 * step as i32) as f32
}

/// Quantize and compute the reconstruction error in one step
#[inline]
pub fn quantize_with_residual(coefficient: f32, step: u16) -> Quantized {
    let value = quantize_coefficient(coefficient, step);
    Quantized {
        value,
        residual: coefficient - dequantize_coefficient(value, step),
    }
}

/// Quantize DCT coefficients
pub fn quantize(coeffs: &Block, quant_table: &QuantTable, output: &mut [i16; BLOCK_AREA]) {
    for i in 0..BLOCK_AREA {
        output[i] = quantize_coefficient(coeffs[i], quant_table[i]);
    }
}

/// Dequantize DCT coefficients
pub fn dequantize(coeffs: &[i16; BLOCK_AREA], quant_table: &QuantTable, output: &mut Block) {
    for i in 0..BLOCK_AREA {
        output[i] = dequantize_coefficient(coeffs[i], quant_table[i]);
    }
}
