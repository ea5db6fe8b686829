//! Matrix-form 8x8 DCT
//!
//! The 2D transform is computed separably as `M * (X * M^T)`: a row pass against
//! the transposed basis followed by a column pass against the basis itself. Both
//! passes accumulate in `f32` in index order so results are reproducible.

use dctq_core::consts::{BLOCK_AREA, BLOCK_SIZE};
use dctq_core::{BlockRef, Plane};
use std::f64::consts::PI;

/// 8x8 block in row-major order
pub type Block = [f32; BLOCK_AREA];

lazy_static::lazy_static! {
    /// Shared orthonormal DCT-II basis
    pub static ref DCT_MATRIX: DctMatrix = DctMatrix::new();
}

/// Orthonormal DCT-II basis, row `i` holding the `i`-th cosine
#[derive(Debug, Clone, PartialEq)]
pub struct DctMatrix {
    m: [[f32; BLOCK_SIZE]; BLOCK_SIZE],
}

impl DctMatrix {
    /// Build the basis `alpha(i) * cos((2j + 1) * i * pi / 16) / 2`
    pub fn new() -> Self {
        let mut m = [[0.0f32; BLOCK_SIZE]; BLOCK_SIZE];
        for (i, row) in m.iter_mut().enumerate() {
            let alpha = if i == 0 { 1.0 / 2.0f64.sqrt() } else { 1.0 };
            for (j, entry) in row.iter_mut().enumerate() {
                let angle = ((2 * j + 1) * i) as f64 * PI / 16.0;
                *entry = (alpha * angle.cos() / 2.0) as f32;
            }
        }
        Self { m }
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.m[row][col]
    }

    /// Forward transform: row pass `T = X * M^T`, then column pass `Y = M * T`
    pub fn forward(&self, input: &Block) -> Block {
        let m = &self.m;
        let mut temp = [0.0f32; BLOCK_AREA];
        for i in 0..BLOCK_SIZE {
            for j in 0..BLOCK_SIZE {
                let mut sum = 0.0f32;
                for k in 0..BLOCK_SIZE {
                    sum += input[i * BLOCK_SIZE + k] * m[j][k];
                }
                temp[i * BLOCK_SIZE + j] = sum;
            }
        }

        let mut output = [0.0f32; BLOCK_AREA];
        for i in 0..BLOCK_SIZE {
            for j in 0..BLOCK_SIZE {
                let mut sum = 0.0f32;
                for k in 0..BLOCK_SIZE {
                    sum += m[i][k] * temp[k * BLOCK_SIZE + j];
                }
                output[i * BLOCK_SIZE + j] = sum;
            }
        }
        output
    }

    /// Inverse transform: `T = M^T * Y`, then `X = T * M`
    pub fn inverse(&self, input: &Block) -> Block {
        let m = &self.m;
        let mut temp = [0.0f32; BLOCK_AREA];
        for i in 0..BLOCK_SIZE {
            for j in 0..BLOCK_SIZE {
                let mut sum = 0.0f32;
                for k in 0..BLOCK_SIZE {
                    sum += m[k][i] * input[k * BLOCK_SIZE + j];
                }
                temp[i * BLOCK_SIZE + j] = sum;
            }
        }

        let mut output = [0.0f32; BLOCK_AREA];
        for i in 0..BLOCK_SIZE {
            for j in 0..BLOCK_SIZE {
                let mut sum = 0.0f32;
                for k in 0..BLOCK_SIZE {
                    sum += temp[i * BLOCK_SIZE + k] * m[k][j];
                }
                output[i * BLOCK_SIZE + j] = sum;
            }
        }
        output
    }

    /// Transform a borrowed block of a plane
    pub fn forward_block(&self, block: &BlockRef<'_, f32>) -> Block {
        self.forward(&block.to_array())
    }

    /// Transform every whole block of a plane in raster order
    pub fn transform_plane<'a>(
        &'a self,
        plane: &'a Plane<f32>,
    ) -> impl ExactSizeIterator<Item = Block> + 'a {
        plane.blocks().map(move |block| self.forward_block(&block))
    }
}

impl Default for DctMatrix {
    fn default() -> Self {
        Self::new()
    }
}
