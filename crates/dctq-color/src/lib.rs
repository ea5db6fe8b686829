//! Color space transformations for dctq
//!
//! This crate implements the BT.601 / JFIF conversion between 8-bit RGB and
//! level-shifted floating-point YCbCr planes.

pub mod ycbcr;

pub use ycbcr::*;
