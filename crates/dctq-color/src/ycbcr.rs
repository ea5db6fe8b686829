//! RGB <-> YCbCr conversion
//!
//! The forward transform uses the four-digit JFIF coefficients. Each sample is
//! evaluated in double precision, stored as `f32`, then level shifted in `f32`.

use dctq_core::consts::{CHROMA_BIAS, LEVEL_SHIFT};
use dctq_core::{Channel, DctqError, DctqResult, Dimensions, Plane, RgbPlanes};
use rayon::prelude::*;

/// Convert one RGB sample to unshifted YCbCr
pub fn rgb_to_ycbcr(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let (r, g, b) = (r as f64, g as f64, b as f64);

    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let cb = -0.1687 * r - 0.3313 * g + 0.5 * b + CHROMA_BIAS;
    let cr = 0.5 * r - 0.4187 * g - 0.0813 * b + CHROMA_BIAS;

    (y as f32, cb as f32, cr as f32)
}

/// Convert unshifted YCbCr back to 8-bit RGB, rounding and clamping
pub fn ycbcr_to_rgb(y: f32, cb: f32, cr: f32) -> (u8, u8, u8) {
    let y = y as f64;
    let cb = cb as f64 - CHROMA_BIAS;
    let cr = cr as f64 - CHROMA_BIAS;

    let r = y + 1.402 * cr;
    let g = y - 0.344136 * cb - 0.714136 * cr;
    let b = y + 1.772 * cb;

    (to_u8(r), to_u8(g), to_u8(b))
}

fn to_u8(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Center a converted sample on zero
#[inline]
pub fn level_shift(value: f32) -> f32 {
    value - LEVEL_SHIFT
}

/// Inverse of [`level_shift`]
#[inline]
pub fn level_unshift(value: f32) -> f32 {
    value + LEVEL_SHIFT
}

/// Level-shifted luma and chroma planes of one image
#[derive(Debug, Clone)]
pub struct YccPlanes {
    pub luma: Plane<f32>,
    pub blue_chroma: Plane<f32>,
    pub red_chroma: Plane<f32>,
}

impl YccPlanes {
    pub fn dimensions(&self) -> Dimensions {
        self.luma.dimensions()
    }

    pub fn plane(&self, channel: Channel) -> &Plane<f32> {
        match channel {
            Channel::Luma => &self.luma,
            Channel::BlueChroma => &self.blue_chroma,
            Channel::RedChroma => &self.red_chroma,
        }
    }

    /// Planes paired with their channel, in processing order
    pub fn iter(&self) -> impl Iterator<Item = (Channel, &Plane<f32>)> {
        Channel::ALL.into_iter().map(move |c| (c, self.plane(c)))
    }
}

/// Convert a source image into level-shifted YCbCr planes
pub fn convert_planes(rgb: &RgbPlanes) -> DctqResult<YccPlanes> {
    rgb_planes_to_ycbcr(&rgb.red, &rgb.green, &rgb.blue)
}

/// Convert three 8-bit planes into level-shifted YCbCr planes of the same shape
pub fn rgb_planes_to_ycbcr(
    red: &Plane<u8>,
    green: &Plane<u8>,
    blue: &Plane<u8>,
) -> DctqResult<YccPlanes> {
    let dimensions = red.dimensions();
    for other in [green, blue] {
        if other.dimensions() != dimensions {
            return Err(DctqError::ShapeMismatch {
                expected: dimensions.pixel_count(),
                actual: other.dimensions().pixel_count(),
            });
        }
    }

    let mut luma = Plane::new(dimensions)?;
    let mut blue_chroma = Plane::new(dimensions)?;
    let mut red_chroma = Plane::new(dimensions)?;

    (
        luma.as_mut_slice(),
        blue_chroma.as_mut_slice(),
        red_chroma.as_mut_slice(),
        red.as_slice(),
        green.as_slice(),
        blue.as_slice(),
    )
        .into_par_iter()
        .for_each(|(y, cb, cr, &r, &g, &b)| {
            let (ys, cbs, crs) = rgb_to_ycbcr(r, g, b);
            *y = level_shift(ys);
            *cb = level_shift(cbs);
            *cr = level_shift(crs);
        });

    Ok(YccPlanes {
        luma,
        blue_chroma,
        red_chroma,
    })
}
