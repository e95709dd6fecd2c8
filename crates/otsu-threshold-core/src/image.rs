use serde::{Deserialize, Serialize};

use crate::error::{check_len, ImageBufferError};

/// Borrowed RGB8 image, row-major with interleaved `R, G, B` bytes.
#[derive(Clone, Copy, Debug)]
pub struct RgbImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // len = w*h*3
}

impl<'a> RgbImageView<'a> {
    /// Wrap a raw buffer, checking that it holds exactly `width * height` pixels.
    pub fn new(width: usize, height: usize, data: &'a [u8]) -> Result<Self, ImageBufferError> {
        check_len("rgb", width, height, 3, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl RgbImage {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, ImageBufferError> {
        check_len("rgb", width, height, 3, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Image filled with a single color.
    pub fn filled(width: usize, height: usize, rgb: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity(width * height * 3);
        for _ in 0..width * height {
            data.extend_from_slice(&rgb);
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn view(&self) -> RgbImageView<'_> {
        RgbImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        let i = (y * self.width + x) * 3;
        self.data[i..i + 3].copy_from_slice(&rgb);
    }
}

/// Borrowed single-channel 8-bit image.
#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

impl<'a> GrayImageView<'a> {
    pub fn new(width: usize, height: usize, data: &'a [u8]) -> Result<Self, ImageBufferError> {
        check_len("gray", width, height, 1, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Smallest and largest intensity, `None` for an empty image.
    pub fn min_max(&self) -> Option<(u8, u8)> {
        let mut it = self.data.iter().copied();
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, ImageBufferError> {
        check_len("gray", width, height, 1, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }
}

/// Two-level image whose pixels are all either `0` (background) or `255`
/// (foreground).
///
/// The value restriction is enforced at construction, so the inner buffer is
/// only reachable read-only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BinaryImage(GrayImage);

impl BinaryImage {
    pub const BACKGROUND: u8 = 0;
    pub const FOREGROUND: u8 = 255;

    /// Validate that every pixel of `gray` is 0 or 255.
    pub fn try_from_gray(gray: GrayImage) -> Result<Self, ImageBufferError> {
        if let Some((index, &value)) = gray
            .data
            .iter()
            .enumerate()
            .find(|&(_, &v)| v != Self::BACKGROUND && v != Self::FOREGROUND)
        {
            return Err(ImageBufferError::NotBinary { index, value });
        }
        Ok(Self(gray))
    }

    pub(crate) fn from_gray_unchecked(gray: GrayImage) -> Self {
        debug_assert!(gray
            .data
            .iter()
            .all(|&v| v == Self::BACKGROUND || v == Self::FOREGROUND));
        Self(gray)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.0.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.0.height
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.0.data
    }

    pub fn as_gray(&self) -> &GrayImage {
        &self.0
    }

    pub fn into_gray(self) -> GrayImage {
        self.0
    }

    pub fn view(&self) -> GrayImageView<'_> {
        self.0.view()
    }
}

impl<'de> Deserialize<'de> for BinaryImage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let gray = GrayImage::deserialize(deserializer)?;
        check_len("gray", gray.width, gray.height, 1, gray.data.len())
            .map_err(serde::de::Error::custom)?;
        BinaryImage::try_from_gray(gray).map_err(serde::de::Error::custom)
    }
}
