//! LZW configuration for the standalone and GIF code layouts.

use crate::error::{LzwError, Result};

/// Widest code any configuration may use.
pub const MAX_CODE_BITS: u8 = 16;

/// Maximum code width allowed inside a GIF image data stream.
pub const GIF_MAX_CODE_BITS: u8 = 12;

/// Number of bits needed to write every code below `n`, i.e. `ceil(log2(n))`.
///
/// `n <= 1` yields 1 so that a width is always defined.
pub fn bit_width(n: u32) -> u8 {
    if n <= 1 {
        return 1;
    }
    (u32::BITS - (n - 1).leading_zeros()) as u8
}

/// LZW configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzwConfig {
    /// Number of literal symbols; literal codes are `0..alphabet_size`.
    pub alphabet_size: u16,
    /// Code that resets the dictionary.
    pub clear_code: u16,
    /// Maximum code size in bits.
    pub max_bits: u8,
}

impl LzwConfig {
    /// Standalone layout for an alphabet of `alphabet_size` symbols.
    ///
    /// - Clear code: `alphabet_size + 1`
    /// - Stop code: `alphabet_size + 2`
    /// - First assigned code: `alphabet_size + 3`
    /// - Codes up to 16 bits (max code 65535)
    pub fn new(alphabet_size: u16) -> Self {
        Self {
            alphabet_size,
            clear_code: alphabet_size.saturating_add(1),
            max_bits: MAX_CODE_BITS,
        }
    }

    /// GIF89a layout for the given LZW minimum code size.
    ///
    /// - Alphabet of `2^min_code_size` color indices
    /// - Clear code `2^min_code_size`, stop code one above it
    /// - Codes up to 12 bits (max code 4095)
    pub fn gif(min_code_size: u8) -> Result<Self> {
        if !(2..=8).contains(&min_code_size) {
            return Err(LzwError::InvalidBitWidth(min_code_size));
        }
        let alphabet_size = 1u16 << min_code_size;
        Ok(Self {
            alphabet_size,
            clear_code: alphabet_size,
            max_bits: GIF_MAX_CODE_BITS,
        })
    }

    /// Return a copy with a different maximum code width.
    pub fn with_max_bits(mut self, max_bits: u8) -> Self {
        self.max_bits = max_bits;
        self
    }

    /// Check that the layout is usable.
    pub fn validate(&self) -> Result<()> {
        if self.alphabet_size == 0 || self.alphabet_size > 256 {
            return Err(LzwError::InvalidAlphabet(self.alphabet_size));
        }
        if self.clear_code < self.alphabet_size {
            return Err(LzwError::InvalidAlphabet(self.alphabet_size));
        }
        if self.max_bits == 0 || self.max_bits > MAX_CODE_BITS {
            return Err(LzwError::InvalidBitWidth(self.max_bits));
        }
        if self.max_code() <= self.first_code() {
            return Err(LzwError::InvalidBitWidth(self.max_bits));
        }
        Ok(())
    }

    /// Get the clear code value.
    pub fn clear_code(&self) -> u16 {
        self.clear_code
    }

    /// Get the stop (end-of-information) code value.
    pub fn stop_code(&self) -> u16 {
        self.clear_code + 1
    }

    /// Get the first code available for dictionary entries.
    pub fn first_code(&self) -> u32 {
        u32::from(self.clear_code) + 2
    }

    /// Get the largest code representable with `max_bits`.
    pub fn max_code(&self) -> u32 {
        (1u32 << self.max_bits) - 1
    }

    /// Width of the first code written after a reset.
    pub fn initial_width(&self) -> u8 {
        bit_width(self.first_code()).min(self.max_bits)
    }
}
