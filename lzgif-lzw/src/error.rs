//! LZW-specific error types.

use thiserror::Error;

/// LZW compression/decompression errors.
#[derive(Debug, Error)]
pub enum LzwError {
    /// A multi-symbol path was inserted whose prefix is not in the dictionary.
    #[error("Invalid dictionary path of length {len}: prefix is not a known entry")]
    InvalidDictionaryPath {
        /// Length of the rejected path.
        len: usize,
    },

    /// Invalid LZW code encountered.
    #[error("Invalid LZW code: {0}")]
    InvalidCode(u16),

    /// Input symbol outside of the literal alphabet.
    #[error("Symbol {symbol} outside of alphabet of size {alphabet_size}")]
    SymbolOutOfRange {
        /// The offending symbol.
        symbol: u8,
        /// Number of literal symbols in the alphabet.
        alphabet_size: u16,
    },

    /// Invalid alphabet size specified.
    #[error("Invalid alphabet size: {0} (must be 1-256)")]
    InvalidAlphabet(u16),

    /// Invalid bit width specified.
    #[error("Invalid bit width: {0}")]
    InvalidBitWidth(u8),

    /// A code does not fit in the requested bit width.
    #[error("Code {code} does not fit in {width} bits")]
    CodeTooWide {
        /// The code value.
        code: u16,
        /// The requested width.
        width: u8,
    },

    /// Sub-block payload longer than 255 bytes.
    #[error("Sub-block of {0} bytes exceeds the 255-byte limit")]
    BlockTooLarge(usize),

    /// Unexpected end of data.
    #[error("Unexpected end of data at bit position {position}")]
    UnexpectedEof {
        /// Bit position where EOF occurred.
        position: u64,
    },

    /// Code stream ended without a stop code.
    #[error("Code stream ended without a stop code")]
    MissingStopCode,

    /// Codes follow the stop code.
    #[error("{0} codes follow the stop code")]
    TrailingCodes(usize),
}

/// Result type for LZW operations.
pub type Result<T> = std::result::Result<T, LzwError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LzwError::SymbolOutOfRange {
            symbol: 7,
            alphabet_size: 4,
        };
        assert_eq!(err.to_string(), "Symbol 7 outside of alphabet of size 4");

        let err = LzwError::CodeTooWide { code: 9, width: 3 };
        assert!(err.to_string().contains("3 bits"));
    }

    #[test]
    fn test_stream_end_errors() {
        assert_eq!(
            LzwError::MissingStopCode.to_string(),
            "Code stream ended without a stop code"
        );
        assert_eq!(
            LzwError::TrailingCodes(3).to_string(),
            "3 codes follow the stop code"
        );
    }
}
