//! Core types and utilities for the dctq block-transform analyzer
//!
//! This crate provides the fundamental data structures shared by every stage of the
//! pipeline: owned sample planes with block-aligned views, image dimensions, channel
//! identifiers and the common error type.

pub mod consts;
pub mod error;
pub mod image;
pub mod plane;
pub mod types;

pub use error::{DctqError, DctqResult};
pub use image::*;
pub use plane::*;
pub use types::*;
