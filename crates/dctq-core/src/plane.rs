//! Plane data structures

use crate::consts::{BLOCK_AREA, BLOCK_SIZE};
use crate::{DctqError, DctqResult, Dimensions, Sample};

/// A single-channel sample grid stored row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Plane<T: Sample> {
    dimensions: Dimensions,
    data: Vec<T>,
}

impl<T: Sample> Plane<T> {
    /// Allocate a plane filled with the default sample value
    pub fn new(dimensions: Dimensions) -> DctqResult<Self> {
        check_dimensions(dimensions)?;
        Ok(Self {
            dimensions,
            data: vec![T::default(); dimensions.pixel_count()],
        })
    }

    /// Wrap an existing row-major buffer
    pub fn from_vec(dimensions: Dimensions, data: Vec<T>) -> DctqResult<Self> {
        check_dimensions(dimensions)?;
        let expected = dimensions.pixel_count();
        if data.len() != expected {
            return Err(DctqError::ShapeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { dimensions, data })
    }

    /// Build a plane by evaluating `f(row, col)` for every sample
    pub fn from_fn<F>(dimensions: Dimensions, mut f: F) -> DctqResult<Self>
    where
        F: FnMut(usize, usize) -> T,
    {
        check_dimensions(dimensions)?;
        let width = dimensions.width as usize;
        let data = (0..dimensions.pixel_count())
            .map(|i| f(i / width, i % width))
            .collect();
        Ok(Self { dimensions, data })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn width(&self) -> usize {
        self.dimensions.width as usize
    }

    pub fn height(&self) -> usize {
        self.dimensions.height as usize
    }

    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row < self.height() && col < self.width() {
            Some(self.data[row * self.width() + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> &[T] {
        let width = self.width();
        &self.data[row * width..(row + 1) * width]
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, T> {
        self.data.chunks_exact(self.width())
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn block_rows(&self) -> usize {
        self.dimensions.block_rows()
    }

    pub fn block_cols(&self) -> usize {
        self.dimensions.block_cols()
    }

    /// View the block at grid position `(block_row, block_col)`
    ///
    /// Panics if the block does not lie fully inside the plane.
    pub fn block(&self, block_row: usize, block_col: usize) -> BlockRef<'_, T> {
        assert!(
            block_row < self.block_rows() && block_col < self.block_cols(),
            "block ({block_row}, {block_col}) outside {}x{} grid",
            self.block_rows(),
            self.block_cols()
        );
        BlockRef {
            plane: self,
            block_row,
            block_col,
        }
    }

    /// Iterate whole blocks top-to-bottom, left-to-right
    ///
    /// Rows and columns past the last multiple of the block size are never visited.
    pub fn blocks(&self) -> Blocks<'_, T> {
        Blocks {
            plane: self,
            next: 0,
            count: self.dimensions.block_count(),
        }
    }
}

fn check_dimensions(dimensions: Dimensions) -> DctqResult<()> {
    if dimensions.width == 0 || dimensions.height == 0 {
        return Err(DctqError::InvalidDimensions {
            width: dimensions.width,
            height: dimensions.height,
        });
    }
    Ok(())
}

/// Borrowed 8x8 window into a plane at a block-aligned offset
#[derive(Debug, Clone, Copy)]
pub struct BlockRef<'a, T: Sample> {
    plane: &'a Plane<T>,
    block_row: usize,
    block_col: usize,
}

impl<T: Sample> BlockRef<'_, T> {
    /// Grid position of the block
    pub fn position(&self) -> (usize, usize) {
        (self.block_row, self.block_col)
    }

    /// Sample offset of the top-left corner within the plane
    pub fn origin(&self) -> (usize, usize) {
        (self.block_row * BLOCK_SIZE, self.block_col * BLOCK_SIZE)
    }

    pub fn get(&self, row: usize, col: usize) -> T {
        assert!(row < BLOCK_SIZE && col < BLOCK_SIZE);
        let (y, x) = self.origin();
        self.plane.data[(y + row) * self.plane.width() + x + col]
    }

    /// Copy the window out in row-major order
    pub fn to_array(&self) -> [T; BLOCK_AREA] {
        let (y, x) = self.origin();
        let width = self.plane.width();
        let mut out = [T::default(); BLOCK_AREA];
        for (r, dst) in out.chunks_exact_mut(BLOCK_SIZE).enumerate() {
            let start = (y + r) * width + x;
            dst.copy_from_slice(&self.plane.data[start..start + BLOCK_SIZE]);
        }
        out
    }
}

/// Raster-order iterator over the whole blocks of a plane
pub struct Blocks<'a, T: Sample> {
    plane: &'a Plane<T>,
    next: usize,
    count: usize,
}

impl<'a, T: Sample> Iterator for Blocks<'a, T> {
    type Item = BlockRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }
        let cols = self.plane.block_cols();
        let block = BlockRef {
            plane: self.plane,
            block_row: self.next / cols,
            block_col: self.next % cols,
        };
        self.next += 1;
        Some(block)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl<T: Sample> ExactSizeIterator for Blocks<'_, T> {}
