//! GIF container error types.

use lzgif_lzw::LzwError;
use std::io;
use thiserror::Error;

/// Errors raised while building or writing a GIF document.
#[derive(Debug, Error)]
pub enum GifError {
    /// Canvas with a zero dimension.
    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Canvas width.
        width: u16,
        /// Canvas height.
        height: u16,
    },

    /// Color count outside 1..=256.
    #[error("Invalid color count: {0} (must be 1-256)")]
    InvalidColorCount(u16),

    /// Color table holds fewer RGB bytes than the color count needs.
    #[error("Color table too short: need {needed} bytes, have {available}")]
    ColorTableTooShort {
        /// Bytes needed (3 per color).
        needed: usize,
        /// Bytes supplied.
        available: usize,
    },

    /// Frame is not exactly width * height pixels.
    #[error("Frame size mismatch: expected {expected} pixels, got {actual}")]
    FrameSizeMismatch {
        /// Canvas area.
        expected: usize,
        /// Pixels supplied.
        actual: usize,
    },

    /// Pixel refers to a color past the end of the color table.
    #[error("Pixel index {index} out of range for {num_colors} colors")]
    PixelOutOfRange {
        /// The offending color index.
        index: u8,
        /// Number of colors in the table.
        num_colors: u16,
    },

    /// Error from the LZW layer.
    #[error("LZW error: {0}")]
    Lzw(#[from] LzwError),

    /// I/O error from the underlying writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for GIF operations.
pub type Result<T> = std::result::Result<T, GifError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GifError::ColorTableTooShort {
            needed: 12,
            available: 9,
        };
        assert_eq!(
            err.to_string(),
            "Color table too short: need 12 bytes, have 9"
        );

        let err = GifError::PixelOutOfRange {
            index: 5,
            num_colors: 4,
        };
        assert!(err.to_string().contains("4 colors"));
    }

    #[test]
    fn test_lzw_error_conversion() {
        let err: GifError = LzwError::InvalidCode(7).into();
        assert!(matches!(err, GifError::Lzw(LzwError::InvalidCode(7))));
    }
}
