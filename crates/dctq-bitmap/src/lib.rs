//! Bitmap loading and saving
//!
//! Decodes any image the `image` crate understands into three 8-bit planes and
//! writes planes back out as an uncompressed 24-bit BMP. By default plane row 0 is
//! the first row stored in a standard BMP, which is the bottom row of the picture.

use dctq_core::{DctqError, DctqResult, Dimensions, RgbPlanes};
use image::{imageops, ImageFormat, RgbImage};
use std::path::Path;
use tracing::debug;

/// Order in which picture rows map onto plane rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowOrder {
    /// Bottom row of the picture first, as stored in a bottom-up BMP
    #[default]
    BottomUp,
    /// Top row of the picture first
    TopDown,
}

/// Load an image file in BMP storage order
pub fn load_rgb_planes<P: AsRef<Path>>(path: P) -> DctqResult<RgbPlanes> {
    load_rgb_planes_with(path, RowOrder::default())
}

/// Load an image file and split it into R, G and B planes
pub fn load_rgb_planes_with<P: AsRef<Path>>(path: P, order: RowOrder) -> DctqResult<RgbPlanes> {
    let path = path.as_ref();
    let decoded = image::open(path).map_err(|e| image_error(path, e))?;
    let mut rgb = decoded.to_rgb8();
    if order == RowOrder::BottomUp {
        imageops::flip_vertical_in_place(&mut rgb);
    }
    debug!(
        path = %path.display(),
        width = rgb.width(),
        height = rgb.height(),
        ?order,
        "loaded image"
    );
    from_rgb_image(&rgb)
}

/// Split a decoded RGB buffer into planes, first buffer row first
pub fn from_rgb_image(image: &RgbImage) -> DctqResult<RgbPlanes> {
    let dimensions = Dimensions::new(image.width(), image.height());
    RgbPlanes::from_interleaved(dimensions, image.as_raw())
}

/// Interleave planes into an RGB buffer
pub fn to_rgb_image(planes: &RgbPlanes) -> DctqResult<RgbImage> {
    let dimensions = planes.dimensions();
    let data = planes.to_interleaved();
    let len = data.len();
    RgbImage::from_raw(dimensions.width, dimensions.height, data).ok_or(DctqError::ShapeMismatch {
        expected: dimensions.pixel_count() * 3,
        actual: len,
    })
}

/// Write planes held in BMP storage order as a 24-bit BMP
pub fn save_rgb_planes<P: AsRef<Path>>(path: P, planes: &RgbPlanes) -> DctqResult<()> {
    save_rgb_planes_with(path, planes, RowOrder::default())
}

/// Write planes as a 24-bit BMP
pub fn save_rgb_planes_with<P: AsRef<Path>>(
    path: P,
    planes: &RgbPlanes,
    order: RowOrder,
) -> DctqResult<()> {
    let path = path.as_ref();
    let mut image = to_rgb_image(planes)?;
    if order == RowOrder::BottomUp {
        imageops::flip_vertical_in_place(&mut image);
    }
    image
        .save_with_format(path, ImageFormat::Bmp)
        .map_err(|e| image_error(path, e))?;
    debug!(path = %path.display(), dimensions = %planes.dimensions(), ?order, "saved bitmap");
    Ok(())
}

fn image_error(path: &Path, error: image::ImageError) -> DctqError {
    match error {
        image::ImageError::IoError(io) => DctqError::Io(io),
        other => DctqError::Image(format!("{}: {}", path.display(), other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dctq_core::Plane;

    fn sample_planes() -> RgbPlanes {
        let dims = Dimensions::new(5, 3);
        RgbPlanes::new(
            Plane::from_fn(dims, |r, c| (r * 50 + c) as u8).unwrap(),
            Plane::from_fn(dims, |r, c| (c * 40 + r) as u8).unwrap(),
            Plane::from_fn(dims, |r, c| (200 - r * c) as u8).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_bmp_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let planes = sample_planes();

        for order in [RowOrder::BottomUp, RowOrder::TopDown] {
            let path = dir.path().join(format!("{:?}.bmp", order));
            save_rgb_planes_with(&path, &planes, order).unwrap();
            let loaded = load_rgb_planes_with(&path, order).unwrap();
            assert_eq!(loaded, planes);
        }
    }

    #[test]
    fn test_buffer_row_order_preserved() {
        let mut image = RgbImage::new(2, 2);
        image.put_pixel(0, 0, image::Rgb([10, 20, 30]));
        image.put_pixel(1, 1, image::Rgb([40, 50, 60]));
        let planes = from_rgb_image(&image).unwrap();
        assert_eq!(planes.red.get(0, 0), Some(10));
        assert_eq!(planes.blue.get(1, 1), Some(60));
    }

    #[test]
    fn test_default_load_is_bottom_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("split.bmp");
        // Picture with a black top half and a white bottom half
        let image = RgbImage::from_fn(4, 6, |_, y| {
            if y < 3 {
                image::Rgb([0, 0, 0])
            } else {
                image::Rgb([255, 255, 255])
            }
        });
        image.save_with_format(&path, ImageFormat::Bmp).unwrap();

        let stored = load_rgb_planes(&path).unwrap();
        assert_eq!(stored.red.row(0), &[255; 4]);
        assert_eq!(stored.red.row(5), &[0; 4]);

        let picture = load_rgb_planes_with(&path, RowOrder::TopDown).unwrap();
        assert_eq!(picture.red.row(0), &[0; 4]);
        assert_eq!(picture.red.row(5), &[255; 4]);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_rgb_planes(dir.path().join("absent.bmp")).is_err());
    }
}
