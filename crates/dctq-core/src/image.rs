//! Source image data structures

use crate::{DctqError, DctqResult, Dimensions, Plane};

/// The three 8-bit channel planes of a source image
#[derive(Debug, Clone, PartialEq)]
pub struct RgbPlanes {
    pub red: Plane<u8>,
    pub green: Plane<u8>,
    pub blue: Plane<u8>,
}

impl RgbPlanes {
    /// Group three planes, rejecting mismatched shapes
    pub fn new(red: Plane<u8>, green: Plane<u8>, blue: Plane<u8>) -> DctqResult<Self> {
        let dimensions = red.dimensions();
        for other in [&green, &blue] {
            if other.dimensions() != dimensions {
                return Err(DctqError::ShapeMismatch {
                    expected: dimensions.pixel_count(),
                    actual: other.dimensions().pixel_count(),
                });
            }
        }
        Ok(Self { red, green, blue })
    }

    /// Split a packed `RGBRGB...` buffer into planes
    pub fn from_interleaved(dimensions: Dimensions, rgb: &[u8]) -> DctqResult<Self> {
        let expected = dimensions.pixel_count() * 3;
        if rgb.len() != expected {
            return Err(DctqError::ShapeMismatch {
                expected,
                actual: rgb.len(),
            });
        }

        let channel = |offset: usize| -> Vec<u8> {
            rgb.chunks_exact(3).map(|px| px[offset]).collect()
        };
        Ok(Self {
            red: Plane::from_vec(dimensions, channel(0))?,
            green: Plane::from_vec(dimensions, channel(1))?,
            blue: Plane::from_vec(dimensions, channel(2))?,
        })
    }

    /// Pack the planes back into an `RGBRGB...` buffer
    pub fn to_interleaved(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.dimensions().pixel_count() * 3);
        for ((&r, &g), &b) in self
            .red
            .as_slice()
            .iter()
            .zip(self.green.as_slice())
            .zip(self.blue.as_slice())
        {
            out.extend_from_slice(&[r, g, b]);
        }
        out
    }

    pub fn dimensions(&self) -> Dimensions {
        self.red.dimensions()
    }

    pub fn width(&self) -> u32 {
        self.dimensions().width
    }

    pub fn height(&self) -> u32 {
        self.dimensions().height
    }

    /// Planes paired with their one-letter labels
    pub fn labeled(&self) -> [(&'static str, &Plane<u8>); 3] {
        [("R", &self.red), ("G", &self.green), ("B", &self.blue)]
    }
}
