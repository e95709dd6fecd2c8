//! Decode/encode helpers on top of the `image` crate.

use std::path::Path;

use image::ImageReader;
use otsu_threshold_core::{
    BinaryImage, GrayImage, GrayImageView, ImageBufferError, RgbImage, RgbImageView,
};

use crate::io::IoError;

/// Decode any supported format and convert it to 8-bit RGB (alpha dropped).
pub fn load_rgb(path: impl AsRef<Path>) -> Result<RgbImage, IoError> {
    let decoded = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    from_image_rgb(decoded.to_rgb8())
}

pub fn from_image_rgb(img: ::image::RgbImage) -> Result<RgbImage, IoError> {
    let (w, h) = img.dimensions();
    Ok(RgbImage::new(w as usize, h as usize, img.into_raw())?)
}

/// Borrow an `image::RgbImage` as a core view.
pub fn rgb_view(img: &::image::RgbImage) -> RgbImageView<'_> {
    RgbImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

pub fn gray_view(img: &::image::GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

fn dims_u32(width: usize, height: usize) -> Result<(u32, u32), ImageBufferError> {
    let w = u32::try_from(width).ok();
    let h = u32::try_from(height).ok();
    w.zip(h)
        .ok_or(ImageBufferError::InvalidDimensions { width, height })
}

pub fn to_image_gray(img: &GrayImage) -> Result<::image::GrayImage, IoError> {
    let (w, h) = dims_u32(img.width, img.height)?;
    ::image::GrayImage::from_raw(w, h, img.data.clone()).ok_or_else(|| {
        ImageBufferError::InvalidBufferLength {
            kind: "gray",
            expected: img.width * img.height,
            got: img.data.len(),
        }
        .into()
    })
}

pub fn to_image_rgb(img: &RgbImage) -> Result<::image::RgbImage, IoError> {
    let (w, h) = dims_u32(img.width, img.height)?;
    ::image::RgbImage::from_raw(w, h, img.data.clone()).ok_or_else(|| {
        ImageBufferError::InvalidBufferLength {
            kind: "rgb",
            expected: img.width * img.height * 3,
            got: img.data.len(),
        }
        .into()
    })
}

/// Save a grayscale image; the format follows the file extension.
pub fn save_gray(path: impl AsRef<Path>, img: &GrayImage) -> Result<(), IoError> {
    to_image_gray(img)?.save(path)?;
    Ok(())
}

pub fn save_binary(path: impl AsRef<Path>, img: &BinaryImage) -> Result<(), IoError> {
    save_gray(path, img.as_gray())
}

pub fn save_rgb(path: impl AsRef<Path>, img: &RgbImage) -> Result<(), IoError> {
    to_image_rgb(img)?.save(path)?;
    Ok(())
}
