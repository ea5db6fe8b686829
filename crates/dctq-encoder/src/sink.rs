//! Binary coefficient and residual streams
//!
//! Quantized values are written as little-endian `i16`, residuals as little-endian
//! `f32`, one of each per coefficient and with no framing.

use crate::options::OutputLayout;
use byteorder::{LittleEndian, WriteBytesExt};
use dctq_core::{Channel, DctqError, DctqResult, StreamKind};
use dctq_transform::Quantized;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Paired output streams for one plane
pub struct CoefficientSink<Q: Write, E: Write> {
    quantized: Q,
    residual: E,
    written: usize,
}

impl<Q: Write, E: Write> CoefficientSink<Q, E> {
    pub fn new(quantized: Q, residual: E) -> Self {
        Self {
            quantized,
            residual,
            written: 0,
        }
    }

    /// Append one coefficient to both streams, quantized value first
    pub fn push(&mut self, coefficient: Quantized) -> DctqResult<()> {
        self.quantized
            .write_i16::<LittleEndian>(coefficient.value)
            .map_err(|source| DctqError::WriteFailure {
                stream: StreamKind::Quantized,
                source,
            })?;
        self.residual
            .write_f32::<LittleEndian>(coefficient.residual)
            .map_err(|source| DctqError::WriteFailure {
                stream: StreamKind::Residual,
                source,
            })?;
        self.written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> DctqResult<()> {
        self.quantized
            .flush()
            .map_err(|source| DctqError::WriteFailure {
                stream: StreamKind::Quantized,
                source,
            })?;
        self.residual
            .flush()
            .map_err(|source| DctqError::WriteFailure {
                stream: StreamKind::Residual,
                source,
            })
    }

    /// Number of coefficients pushed so far
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> (Q, E) {
        (self.quantized, self.residual)
    }
}

/// Source of output streams, opened once per plane
pub trait SinkProvider {
    type Quantized: Write;
    type Residual: Write;

    fn open(
        &mut self,
        channel: Channel,
    ) -> DctqResult<CoefficientSink<Self::Quantized, Self::Residual>>;
}

/// Opens `qF_<plane>.raw` / `eF_<plane>.raw` files under an output layout
#[derive(Debug, Clone)]
pub struct FileSinks {
    layout: OutputLayout,
}

impl FileSinks {
    pub fn new(layout: OutputLayout) -> Self {
        Self { layout }
    }
}

impl SinkProvider for FileSinks {
    type Quantized = BufWriter<File>;
    type Residual = BufWriter<File>;

    fn open(&mut self, channel: Channel) -> DctqResult<CoefficientSink<Self::Quantized, Self::Residual>> {
        let quantized = create(&self.layout.quantized_path(channel))?;
        let residual = create(&self.layout.residual_path(channel))?;
        Ok(CoefficientSink::new(quantized, residual))
    }
}

fn create(path: &Path) -> DctqResult<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| DctqError::SinkUnavailable {
            path: path.to_path_buf(),
            source,
        })
}

/// Keeps both streams in memory
#[derive(Debug, Default)]
pub struct MemorySinks {
    opened: Vec<Channel>,
}

impl MemorySinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Channels opened so far, in order
    pub fn opened(&self) -> &[Channel] {
        &self.opened
    }
}

impl SinkProvider for MemorySinks {
    type Quantized = Vec<u8>;
    type Residual = Vec<u8>;

    fn open(&mut self, channel: Channel) -> DctqResult<CoefficientSink<Vec<u8>, Vec<u8>>> {
        self.opened.push(channel);
        Ok(CoefficientSink::new(Vec::new(), Vec::new()))
    }
}
