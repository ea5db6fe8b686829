//! # dctq - block DCT quantization analyzer
//!
//! This crate provides a high-level API for measuring how a fixed JPEG-style
//! quantization stage affects each DCT frequency of an image.
//!
//! ## Quick Start
//!
//! ```no_run
//! use dctq::{load_rgb_planes, Analyzer, AnalyzerOptions, Channel};
//!
//! let image = load_rgb_planes("input.bmp").unwrap();
//! let analyzer = Analyzer::new(AnalyzerOptions::new().output_dir("out"));
//! let analysis = analyzer.analyze_to_files(&image).unwrap();
//!
//! if let Some(report) = analysis.report(Channel::Luma) {
//!     println!("Y channel SQNR (dB):\n{}", report);
//! }
//! ```
//!
//! ## Pipeline
//!
//! - RGB to level-shifted YCbCr (BT.601 / JFIF coefficients)
//! - 8x8 orthonormal DCT-II on every whole block
//! - Quantization with the standard luminance and chrominance tables
//! - Little-endian `i16` coefficient and `f32` residual streams per plane
//! - Per-frequency SQNR, infinite where no error was accumulated

// Re-export core types
pub use dctq_core::{
    consts, BlockRef, Channel, DctqError, DctqResult, Dimensions, Plane, RgbPlanes, Sample,
    StreamKind,
};

// Re-export stages
pub use dctq_bitmap::{
    load_rgb_planes, load_rgb_planes_with, save_rgb_planes, save_rgb_planes_with, RowOrder,
};
pub use dctq_color::{convert_planes, rgb_to_ycbcr, ycbcr_to_rgb, YccPlanes};
pub use dctq_encoder::{
    analyze_plane, dump, Analyzer, AnalyzerOptions, CoefficientSink, FileSinks, ImageAnalysis,
    MemorySinks, OutputLayout, Pipeline, PlaneAbort, PlaneResult, PlaneStats, RunOutcome,
    SinkProvider, Sqnr, SqnrAccumulator, SqnrReport,
};
pub use dctq_transform::{
    quant_table, Block, DctMatrix, QuantTable, CHROMA_QUANT_TABLE, DCT_MATRIX, LUMA_QUANT_TABLE,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
