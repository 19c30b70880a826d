//! # lzgif-lzw: Adaptive LZW for GIF image data
//!
//! This crate provides LZW (Lempel-Ziv-Welch) compression built on an
//! incrementally growing prefix trie, and the LSB-first bit packer that
//! turns its variable-width codes into GIF data sub-blocks.
//!
//! ## Features
//!
//! - **Pure Rust**: No C dependencies, 100% safe Rust
//! - **Arena trie**: Dictionary nodes addressed by index, cheap resets
//! - **Streaming**: Byte-at-a-time encoder, code-at-a-time decoder
//! - **GIF sub-blocks**: Codes packed into payloads of at most 255 bytes,
//!   with code widths tracked live off the dictionary
//!
//! ## Code Layouts
//!
//! Two layouts are provided by [`LzwConfig`]:
//!
//! - **Standalone** ([`LzwConfig::new`]): for an alphabet of `a` symbols the
//!   clear code is `a + 1`, the stop code `a + 2`, and entries start at
//!   `a + 3`. Codes go up to 16 bits.
//! - **GIF** ([`LzwConfig::gif`]): for minimum code size `m` the clear code
//!   is `2^m`, the stop code `2^m + 1`, and codes go up to 12 bits.
//!
//! In both, the dictionary resets (and a clear code is emitted) as soon
//! as the last representable code has been assigned.
//!
//! ## Example
//!
//! ```rust
//! use lzgif_lzw::{compress, decompress};
//!
//! let original = b"TOBEORNOTTOBEORTOBEORNOT";
//!
//! let codes = compress(original, 256).unwrap();
//! assert_eq!(codes[0], 257); // clear code first
//!
//! let decompressed = decompress(&codes, 256).unwrap();
//! assert_eq!(decompressed, original);
//! ```
//!
//! ## GIF Image Data
//!
//! ```rust
//! use lzgif_lzw::{LzwConfig, pack_frame, unpack_frame};
//!
//! let pixels = vec![1u8; 100];
//! let config = LzwConfig::gif(2).unwrap();
//!
//! let blocks = pack_frame(&pixels, config).unwrap();
//! assert!(blocks.iter().all(|b| b.len() <= 255));
//!
//! assert_eq!(unpack_frame(&blocks, config).unwrap(), pixels);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod decoder;
mod dictionary;
mod encoder;
mod error;
mod packer;
mod trie;

pub use config::{GIF_MAX_CODE_BITS, LzwConfig, MAX_CODE_BITS, bit_width};
pub use decoder::{DecodeStatus, LzwDecoder};
pub use dictionary::Dictionary;
pub use encoder::{CodeSink, EncoderState, LzwEncoder};
pub use error::{LzwError, Result};
pub use packer::{BitPacker, DataBlock, MAX_SUB_BLOCK_LEN, SubBlockReader};
pub use trie::{CodeTrie, Insertion};

/// Compress data with LZW using the given configuration.
///
/// The code stream starts with a clear code and ends with the code of the
/// last pending sequence followed by the stop code.
///
/// # Example
///
/// ```rust
/// use lzgif_lzw::{compress_with, LzwConfig};
///
/// let codes = compress_with(b"", LzwConfig::new(256)).unwrap();
/// assert_eq!(codes, vec![257, 258]);
/// ```
pub fn compress_with(data: &[u8], config: LzwConfig) -> Result<Vec<u16>> {
    let mut encoder = LzwEncoder::new(config)?;
    let mut codes = Vec::with_capacity(data.len() / 2 + 2);
    encoder.begin(&mut codes)?;
    encoder.encode(data, &mut codes)?;
    encoder.finish(&mut codes)?;
    Ok(codes)
}

/// Decompress an LZW code stream with the given configuration.
///
/// Decoding ends at the stop code or at the end of `codes`.
pub fn decompress_with(codes: &[u16], config: LzwConfig) -> Result<Vec<u8>> {
    let mut decoder = LzwDecoder::new(config)?;
    decoder.decode(codes)
}

/// Compress data over an alphabet of `alphabet_size` symbols.
///
/// This is equivalent to `compress_with(data, LzwConfig::new(alphabet_size))`.
/// Every byte of `data` must be below `alphabet_size`.
pub fn compress(data: &[u8], alphabet_size: u16) -> Result<Vec<u16>> {
    compress_with(data, LzwConfig::new(alphabet_size))
}

/// Decompress codes produced by [`compress`] with the same alphabet size.
pub fn decompress(codes: &[u16], alphabet_size: u16) -> Result<Vec<u8>> {
    decompress_with(codes, LzwConfig::new(alphabet_size))
}

/// Decompress a complete code stream produced by [`compress`].
///
/// Unlike [`decompress`], the stream must end with the stop code: a
/// truncated stream fails with [`LzwError::MissingStopCode`] and codes
/// after the stop code with [`LzwError::TrailingCodes`].
pub fn decompress_exact(codes: &[u16], alphabet_size: u16) -> Result<Vec<u8>> {
    let mut decoder = LzwDecoder::new(LzwConfig::new(alphabet_size))?;
    decoder.decode_complete(codes)
}

/// Compress `data` and pack the codes into GIF data sub-blocks.
///
/// The encoder and the packer run in lockstep: each code is packed at the
/// width the dictionary prescribes at the moment it is emitted. The
/// output starts with a clear code, ends with the stop code and a
/// zero-padded trailing byte.
pub fn pack_frame(data: &[u8], config: LzwConfig) -> Result<Vec<DataBlock>> {
    let mut encoder = LzwEncoder::new(config)?;
    let mut packer = BitPacker::new();
    encoder.begin(&mut packer)?;
    encoder.encode(data, &mut packer)?;
    encoder.finish(&mut packer)?;

    let bits = packer.bits_written();
    let blocks = packer.finish();
    log::debug!(
        "packed {} symbols into {} bits across {} sub-blocks",
        data.len(),
        bits,
        blocks.len()
    );
    Ok(blocks)
}

/// Decode sub-blocks produced by [`pack_frame`].
///
/// Fails with [`LzwError::UnexpectedEof`] if the data ends before the
/// stop code.
pub fn unpack_frame(blocks: &[DataBlock], config: LzwConfig) -> Result<Vec<u8>> {
    let mut reader = SubBlockReader::new(blocks);
    let mut decoder = LzwDecoder::new(config)?;
    let mut output = Vec::new();

    loop {
        let code = reader.read_code(decoder.code_width())?;
        if decoder.decode_code(code, &mut output)? == DecodeStatus::Stop {
            break;
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_standalone() {
        let original = b"TOBEORNOTTOBEORTOBEORNOT";
        let codes = compress(original, 256).unwrap();
        assert_eq!(codes.first(), Some(&257));
        assert_eq!(codes.last(), Some(&258));
        // Repetition must shrink the code count.
        assert!(codes.len() < original.len());
        assert_eq!(decompress(&codes, 256).unwrap(), original);
    }

    #[test]
    fn test_empty_input() {
        let codes = compress(b"", 256).unwrap();
        assert_eq!(codes, vec![257, 258]);
        assert!(decompress(&codes, 256).unwrap().is_empty());
    }

    #[test]
    fn test_single_byte() {
        let codes = compress(b"A", 256).unwrap();
        assert_eq!(codes, vec![257, 65, 258]);
        assert_eq!(decompress(&codes, 256).unwrap(), b"A");
    }

    #[test]
    fn test_decompress_exact_rejects_damaged_streams() {
        let codes = compress(b"TOBEORNOT", 256).unwrap();
        assert_eq!(decompress_exact(&codes, 256).unwrap(), b"TOBEORNOT");

        let truncated = &codes[..codes.len() - 1];
        assert!(matches!(
            decompress_exact(truncated, 256),
            Err(LzwError::MissingStopCode)
        ));
        // The lenient form still returns what it could decode.
        assert_eq!(decompress(truncated, 256).unwrap(), b"TOBEORNOT");

        let mut padded = codes.clone();
        padded.push(65);
        assert!(matches!(
            decompress_exact(&padded, 256),
            Err(LzwError::TrailingCodes(1))
        ));
    }

    #[test]
    fn test_small_alphabet() {
        let original = [0u8, 1, 2, 2, 2, 1, 0, 0, 0, 0, 2];
        let codes = compress(&original, 3).unwrap();
        assert_eq!(codes[0], 4);
        assert_eq!(decompress(&codes, 3).unwrap(), original);
    }

    #[test]
    fn test_symbol_outside_alphabet() {
        assert!(matches!(
            compress(&[0, 1, 4], 4),
            Err(LzwError::SymbolOutOfRange { symbol: 4, .. })
        ));
    }

    #[test]
    fn test_pack_frame_known_bytes() {
        // Two pixels of color 1 with a 4-color table: clear(4)@3, 1@3,
        // 1@3 (adds 6, reserves 7), stop(5)@3.
        let blocks = pack_frame(&[1, 1], LzwConfig::gif(2).unwrap()).unwrap();
        assert_eq!(blocks.len(), 1);
        // 100 | 001 << 3 | 001 << 6 | 101 << 9 = 0b1010_0100_1100
        assert_eq!(blocks[0].as_bytes(), &[0x4C, 0x0A]);
    }

    #[test]
    fn test_pack_unpack_frame() {
        let config = LzwConfig::gif(8).unwrap();
        let pixels: Vec<u8> = (0..20_000u32).map(|i| ((i / 7) ^ (i % 13)) as u8).collect();
        let blocks = pack_frame(&pixels, config).unwrap();
        assert!(blocks.len() > 1);
        assert!(blocks.iter().all(|b| b.len() <= MAX_SUB_BLOCK_LEN));
        assert_eq!(unpack_frame(&blocks, config).unwrap(), pixels);
    }

    #[test]
    fn test_unpack_truncated_frame() {
        let config = LzwConfig::gif(2).unwrap();
        let blocks = pack_frame(&[0, 1, 2, 3, 0, 1, 2, 3], config).unwrap();
        let mut bytes = blocks[0].as_bytes().to_vec();
        bytes.truncate(1);
        let truncated = vec![DataBlock::new(bytes).unwrap()];
        assert!(matches!(
            unpack_frame(&truncated, config),
            Err(LzwError::UnexpectedEof { .. })
        ));
    }
}
