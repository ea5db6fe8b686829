//! Per-plane quantization and error analysis
//!
//! Each plane is transformed block by block, every coefficient is quantized against
//! the plane's table and pushed to the sink, and the squared coefficient and residual
//! are folded into a [`SqnrAccumulator`]. A sink failure stops the fold at the
//! failing coefficient; whatever was accumulated up to that point is returned with the
//! error.

use crate::sink::CoefficientSink;
use crate::sqnr::{SqnrAccumulator, SqnrReport};
use dctq_core::{Channel, DctqError, Plane};
use dctq_transform::{quantize_with_residual, DctMatrix, QuantTable};
use std::io::Write;
use thiserror::Error;

/// Statistics of one analyzed plane
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneStats {
    pub channel: Channel,
    /// Blocks fully processed
    pub blocks: usize,
    /// Coefficients written to both streams
    pub coefficients: usize,
    pub accumulator: SqnrAccumulator,
}

impl PlaneStats {
    fn empty(channel: Channel) -> Self {
        Self {
            channel,
            blocks: 0,
            coefficients: 0,
            accumulator: SqnrAccumulator::new(),
        }
    }

    pub fn report(&self) -> SqnrReport {
        self.accumulator.finish()
    }
}

/// A plane whose processing stopped early
#[derive(Debug, Error)]
#[error("{channel} plane aborted: {error}")]
pub struct PlaneAbort {
    pub channel: Channel,
    #[source]
    pub error: DctqError,
    /// Statistics gathered before a mid-stream failure; `None` if nothing was processed
    pub partial: Option<PlaneStats>,
}

/// Outcome of analyzing one plane
pub type PlaneResult = Result<PlaneStats, PlaneAbort>;

/// Transform, quantize and analyze one plane into `sink`
pub fn analyze_plane<Q: Write, E: Write>(
    channel: Channel,
    plane: &Plane<f32>,
    table: &QuantTable,
    matrix: &DctMatrix,
    sink: &mut CoefficientSink<Q, E>,
) -> PlaneResult {
    let folded = matrix
        .transform_plane(plane)
        .try_fold(PlaneStats::empty(channel), |mut stats, coeffs| {
            for (index, (&coefficient, &step)) in coeffs.iter().zip(table).enumerate() {
                let quantized = quantize_with_residual(coefficient, step);
                if let Err(error) = sink.push(quantized) {
                    return Err((stats, error));
                }
                stats.accumulator.add(index, coefficient, quantized.residual);
                stats.coefficients += 1;
            }
            stats.blocks += 1;
            Ok(stats)
        });

    let stats = match folded {
        Ok(stats) => stats,
        Err((partial, error)) => {
            return Err(PlaneAbort {
                channel,
                error,
                partial: Some(partial),
            })
        }
    };

    match sink.flush() {
        Ok(()) => Ok(stats),
        Err(error) => Err(PlaneAbort {
            channel,
            error,
            partial: Some(stats),
        }),
    }
}
