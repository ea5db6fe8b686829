//! Core types for dctq

use std::fmt;

use crate::consts::BLOCK_SIZE;

/// Image dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Number of whole blocks along the vertical axis
    pub fn block_rows(&self) -> usize {
        self.height as usize / BLOCK_SIZE
    }

    /// Number of whole blocks along the horizontal axis
    pub fn block_cols(&self) -> usize {
        self.width as usize / BLOCK_SIZE
    }

    pub fn block_count(&self) -> usize {
        self.block_rows() * self.block_cols()
    }

    pub fn is_block_aligned(&self) -> bool {
        self.width as usize % BLOCK_SIZE == 0 && self.height as usize % BLOCK_SIZE == 0
    }

    /// Dimensions rounded down to the block grid
    pub fn truncated(&self) -> Self {
        Self {
            width: (self.block_cols() * BLOCK_SIZE) as u32,
            height: (self.block_rows() * BLOCK_SIZE) as u32,
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Luma/chroma plane identifier, in processing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Channel {
    /// Y
    Luma,
    /// Cb
    BlueChroma,
    /// Cr
    RedChroma,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Luma, Channel::BlueChroma, Channel::RedChroma];

    /// Short label used in file names and reports
    pub fn label(&self) -> &'static str {
        match self {
            Channel::Luma => "Y",
            Channel::BlueChroma => "Cb",
            Channel::RedChroma => "Cr",
        }
    }

    pub fn is_chroma(&self) -> bool {
        !matches!(self, Channel::Luma)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The two binary outputs produced for every plane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    /// 16-bit quantized coefficients
    Quantized,
    /// 32-bit quantization residuals
    Residual,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Quantized => f.write_str("quantized"),
            StreamKind::Residual => f.write_str("residual"),
        }
    }
}

/// Plane sample type
pub trait Sample: Copy + Default + PartialOrd + Send + Sync {}

impl Sample for u8 {}
impl Sample for i16 {}
impl Sample for f32 {}
