//! Constants used throughout the pipeline

/// Edge length of a transform block
pub const BLOCK_SIZE: usize = 8;

/// Number of coefficients (and frequency bins) in one block
pub const BLOCK_AREA: usize = BLOCK_SIZE * BLOCK_SIZE;

/// Offset subtracted from every converted sample to center it on zero
pub const LEVEL_SHIFT: f32 = 128.0;

/// Chroma planes are biased by this value before the level shift
pub const CHROMA_BIAS: f64 = 128.0;
