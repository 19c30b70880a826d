//! Image records: graphic control extension, image descriptor and data.

use crate::error::{GifError, Result};
use crate::header::{EXTENSION_INTRODUCER, GRAPHIC_CONTROL_LABEL, IMAGE_SEPARATOR};
use lzgif_lzw::{DataBlock, LzwConfig, pack_frame, unpack_frame};
use std::io::Write;

/// One compressed full-canvas frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// Delay after this frame, in hundredths of a second.
    delay: u16,
    /// Frame width.
    width: u16,
    /// Frame height.
    height: u16,
    /// LZW minimum code size.
    min_code_size: u8,
    /// Packed LZW data.
    blocks: Vec<DataBlock>,
}

impl Image {
    /// Compress `pixels` into a new frame.
    ///
    /// The caller is responsible for checking the pixel count and color
    /// indices against the canvas.
    pub fn encode(
        pixels: &[u8],
        width: u16,
        height: u16,
        min_code_size: u8,
        delay: u16,
    ) -> Result<Self> {
        let config = LzwConfig::gif(min_code_size)?;
        let blocks = pack_frame(pixels, config)?;
        Ok(Self {
            delay,
            width,
            height,
            min_code_size,
            blocks,
        })
    }

    /// Decompress the frame back to pixel indices.
    pub fn decode(&self) -> Result<Vec<u8>> {
        let config = LzwConfig::gif(self.min_code_size)?;
        let pixels = unpack_frame(&self.blocks, config)?;
        let expected = usize::from(self.width) * usize::from(self.height);
        if pixels.len() != expected {
            return Err(GifError::FrameSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(pixels)
    }

    /// Delay in hundredths of a second.
    pub fn delay(&self) -> u16 {
        self.delay
    }

    /// Frame width.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Frame height.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// LZW minimum code size.
    pub fn min_code_size(&self) -> u8 {
        self.min_code_size
    }

    /// Packed data sub-blocks.
    pub fn blocks(&self) -> &[DataBlock] {
        &self.blocks
    }

    /// Serialized size of this record in bytes.
    pub fn encoded_len(&self) -> usize {
        // 8 (control) + 10 (descriptor) + 1 (code size) + 1 (terminator)
        20 + self.blocks.iter().map(|b| b.len() + 1).sum::<usize>()
    }

    /// Write the record: control extension, descriptor, sub-blocks, terminator.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        // Graphic control extension
        writer.write_all(&[EXTENSION_INTRODUCER, GRAPHIC_CONTROL_LABEL, 4, 0])?;
        writer.write_all(&self.delay.to_le_bytes())?;
        writer.write_all(&[0, 0])?; // transparent index, terminator

        // Image descriptor, always at the canvas origin
        writer.write_all(&[IMAGE_SEPARATOR])?;
        writer.write_all(&0u16.to_le_bytes())?;
        writer.write_all(&0u16.to_le_bytes())?;
        writer.write_all(&self.width.to_le_bytes())?;
        writer.write_all(&self.height.to_le_bytes())?;
        writer.write_all(&[0, self.min_code_size])?;

        for block in &self.blocks {
            writer.write_all(&[block.block_size()])?;
            writer.write_all(block.as_bytes())?;
        }
        writer.write_all(&[0])?;
        Ok(())
    }
}
