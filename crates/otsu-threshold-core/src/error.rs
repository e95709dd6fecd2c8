/// Errors raised when wrapping raw pixel buffers.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageBufferError {
    #[error("invalid image dimensions (width={width}, height={height})")]
    InvalidDimensions { width: usize, height: usize },

    #[error("invalid {kind} image buffer length (expected {expected} bytes, got {got})")]
    InvalidBufferLength {
        kind: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("pixel at index {index} has value {value}, binary images only hold 0 or 255")]
    NotBinary { index: usize, value: u8 },
}

/// Errors raised when building a histogram from external counts.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HistogramError {
    #[error("histogram needs exactly 256 bins, got {got}")]
    LengthMismatch { got: usize },
}

/// Number of bytes needed for `width * height * channels`, or `None` on overflow.
pub(crate) fn buffer_len(width: usize, height: usize, channels: usize) -> Option<usize> {
    width.checked_mul(height)?.checked_mul(channels)
}

pub(crate) fn check_len(
    kind: &'static str,
    width: usize,
    height: usize,
    channels: usize,
    got: usize,
) -> Result<(), ImageBufferError> {
    let Some(expected) = buffer_len(width, height, channels) else {
        return Err(ImageBufferError::InvalidDimensions { width, height });
    };
    if got != expected {
        return Err(ImageBufferError::InvalidBufferLength {
            kind,
            expected,
            got,
        });
    }
    Ok(())
}
