//! GIF89a header, global color table and looping extension.

use crate::error::Result;
use lzgif_lzw::bit_width;
use std::io::Write;

/// Signature and version.
pub const GIF_SIGNATURE: &[u8; 6] = b"GIF89a";

/// Extension introducer.
pub const EXTENSION_INTRODUCER: u8 = 0x21;

/// Graphic control extension label.
pub const GRAPHIC_CONTROL_LABEL: u8 = 0xF9;

/// Application extension label.
pub const APPLICATION_LABEL: u8 = 0xFF;

/// Image descriptor separator.
pub const IMAGE_SEPARATOR: u8 = 0x2C;

/// File trailer.
pub const TRAILER: u8 = 0x3B;

/// Netscape looping extension up to (not including) the repeat count.
pub const NETSCAPE_HEADER: [u8; 16] = [
    EXTENSION_INTRODUCER,
    APPLICATION_LABEL,
    0x0B, // 11 bytes of identifier
    b'N',
    b'E',
    b'T',
    b'S',
    b'C',
    b'A',
    b'P',
    b'E',
    b'2',
    b'.',
    b'0',
    0x03, // 3 bytes of data follow
    0x01, // sub-block index
];

/// Size exponent of a color table holding `num_colors` entries.
///
/// The table written to the file has `2^(exponent + 1)` entries, the
/// smallest power of two not below `num_colors` (at least 2).
pub fn color_table_exponent(num_colors: u16) -> u8 {
    bit_width(u32::from(num_colors)) - 1
}

/// LZW minimum code size for a table of the given exponent.
pub fn min_code_size(exponent: u8) -> u8 {
    (exponent + 1).max(2)
}

/// Logical screen descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenDescriptor {
    /// Canvas width.
    pub width: u16,
    /// Canvas height.
    pub height: u16,
    /// Packed flags: global table present, color resolution, table size.
    pub flags: u8,
    /// Background color index.
    pub background: u8,
    /// Pixel aspect ratio.
    pub aspect_ratio: u8,
}

impl ScreenDescriptor {
    /// Descriptor for a canvas with a global color table of the given exponent.
    pub fn new(width: u16, height: u16, exponent: u8) -> Self {
        Self {
            width,
            height,
            flags: 0xF0 | (exponent & 0x07),
            background: 0,
            aspect_ratio: 0,
        }
    }

    /// Number of entries in the global color table.
    pub fn table_entries(&self) -> usize {
        1 << ((self.flags & 0x07) + 1)
    }

    /// Write the signature followed by the descriptor.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(GIF_SIGNATURE)?;
        writer.write_all(&self.width.to_le_bytes())?;
        writer.write_all(&self.height.to_le_bytes())?;
        writer.write_all(&[self.flags, self.background, self.aspect_ratio])?;
        Ok(())
    }
}

/// Write `table` as a global color table of `entries` RGB triples.
///
/// Entries past the end of `table` are written as black.
pub fn write_color_table<W: Write>(writer: &mut W, table: &[u8], entries: usize) -> Result<()> {
    let len = table.len().min(entries * 3);
    writer.write_all(&table[..len])?;
    let padding = entries * 3 - len;
    if padding > 0 {
        writer.write_all(&vec![0u8; padding])?;
    }
    Ok(())
}

/// Netscape 2.0 looping extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetscapeExtension {
    /// Loop count.
    pub repeat: u16,
}

impl NetscapeExtension {
    /// Write the extension. The loop count goes high byte first.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&NETSCAPE_HEADER)?;
        writer.write_all(&self.repeat.to_be_bytes())?;
        writer.write_all(&[0x00])?;
        Ok(())
    }
}
