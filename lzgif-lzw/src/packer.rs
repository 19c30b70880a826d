//! LSB-first bit packing of LZW codes into GIF data sub-blocks.
//!
//! GIF image data is a sequence of sub-blocks, each a length byte
//! followed by at most 255 payload bytes. Codes are packed starting at
//! the least significant bit of each byte and run straight across byte
//! and sub-block boundaries: a code that does not fit in the rest of a
//! full sub-block continues in the next one.

use crate::encoder::CodeSink;
use crate::error::{LzwError, Result};

/// Maximum payload length of a GIF data sub-block.
pub const MAX_SUB_BLOCK_LEN: usize = 255;

/// Widest code the packer accepts.
const MAX_WIDTH: u8 = 16;

/// One data sub-block: at most [`MAX_SUB_BLOCK_LEN`] packed bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataBlock {
    data: Vec<u8>,
}

impl DataBlock {
    /// Wrap a payload, failing if it is longer than a sub-block allows.
    pub fn new(data: Vec<u8>) -> Result<Self> {
        if data.len() > MAX_SUB_BLOCK_LEN {
            return Err(LzwError::BlockTooLarge(data.len()));
        }
        Ok(Self { data })
    }

    /// Payload length (the sub-block's length byte).
    pub fn block_size(&self) -> u8 {
        self.data.len() as u8
    }

    /// Payload length.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Payload bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Take the payload.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

impl AsRef<[u8]> for DataBlock {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

/// Packs variable-width codes into sub-blocks.
///
/// Bits that do not yet make up a whole byte are held in `carry`, which
/// is per-packer state: a code split by a sub-block boundary continues
/// from `carry` as the first bits of the next sub-block.
#[derive(Debug, Default)]
pub struct BitPacker {
    /// Sealed sub-blocks.
    blocks: Vec<DataBlock>,
    /// Sub-block being filled.
    current: Vec<u8>,
    /// Pending bits (LSB-first).
    carry: u32,
    /// Number of valid bits in `carry`.
    carry_bits: u8,
}

impl BitPacker {
    /// Create an empty packer.
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            current: Vec::with_capacity(MAX_SUB_BLOCK_LEN),
            carry: 0,
            carry_bits: 0,
        }
    }

    /// Append `code` using exactly `width` bits.
    pub fn write_code(&mut self, code: u16, width: u8) -> Result<()> {
        if width == 0 || width > MAX_WIDTH {
            return Err(LzwError::InvalidBitWidth(width));
        }
        if u32::from(code) >> width != 0 {
            return Err(LzwError::CodeTooWide { code, width });
        }

        self.carry |= u32::from(code) << self.carry_bits;
        self.carry_bits += width;

        while self.carry_bits >= 8 {
            self.push_byte(self.carry as u8);
            self.carry >>= 8;
            self.carry_bits -= 8;
        }

        Ok(())
    }

    fn push_byte(&mut self, byte: u8) {
        self.current.push(byte);
        if self.current.len() == MAX_SUB_BLOCK_LEN {
            self.seal();
        }
    }

    fn seal(&mut self) {
        let data = std::mem::replace(&mut self.current, Vec::with_capacity(MAX_SUB_BLOCK_LEN));
        log::trace!("sealed sub-block #{} ({} bytes)", self.blocks.len(), data.len());
        self.blocks.push(DataBlock { data });
    }

    /// Number of bits written so far.
    pub fn bits_written(&self) -> u64 {
        let bytes = self.blocks.len() * MAX_SUB_BLOCK_LEN + self.current.len();
        bytes as u64 * 8 + u64::from(self.carry_bits)
    }

    /// Flush the partial trailing byte (zero padded) and return the sub-blocks.
    pub fn finish(mut self) -> Vec<DataBlock> {
        if self.carry_bits > 0 {
            self.push_byte(self.carry as u8);
            self.carry = 0;
            self.carry_bits = 0;
        }
        if !self.current.is_empty() {
            self.seal();
        }
        self.blocks
    }
}

impl CodeSink for BitPacker {
    fn put_code(&mut self, code: u16, width: u8) -> Result<()> {
        self.write_code(code, width)
    }
}

/// Reads LSB-first codes back out of a run of sub-blocks.
#[derive(Debug)]
pub struct SubBlockReader<'a> {
    /// Input sub-blocks.
    blocks: &'a [DataBlock],
    /// Index of the sub-block being read.
    block: usize,
    /// Byte offset inside that sub-block.
    offset: usize,
    /// Bit buffer (LSB-first).
    buffer: u32,
    /// Number of valid bits in buffer.
    bits_in_buffer: u8,
    /// Total bits read (for error reporting).
    total_bits_read: u64,
}

impl<'a> SubBlockReader<'a> {
    /// Create a reader over `blocks`.
    pub fn new(blocks: &'a [DataBlock]) -> Self {
        Self {
            blocks,
            block: 0,
            offset: 0,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_read: 0,
        }
    }

    fn next_byte(&mut self) -> Option<u8> {
        while let Some(block) = self.blocks.get(self.block) {
            if let Some(&byte) = block.data.get(self.offset) {
                self.offset += 1;
                return Some(byte);
            }
            self.block += 1;
            self.offset = 0;
        }
        None
    }

    /// Read a `width`-bit code.
    pub fn read_code(&mut self, width: u8) -> Result<u16> {
        if width == 0 || width > MAX_WIDTH {
            return Err(LzwError::InvalidBitWidth(width));
        }

        while self.bits_in_buffer < width {
            let byte = self.next_byte().ok_or(LzwError::UnexpectedEof {
                position: self.total_bits_read,
            })?;
            self.buffer |= u32::from(byte) << self.bits_in_buffer;
            self.bits_in_buffer += 8;
        }

        let value = self.buffer & ((1u32 << width) - 1);
        self.buffer >>= width;
        self.bits_in_buffer -= width;
        self.total_bits_read += u64::from(width);

        Ok(value as u16)
    }

    /// Get total bits read.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }
}
