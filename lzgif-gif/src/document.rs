//! GIF document assembly.
//!
//! A [`GifDocument`] borrows the caller's color table, collects
//! compressed frames in order and writes the whole file at once:
//! header, global color table, optional looping extension, one record
//! per frame and the trailer.

use crate::error::{GifError, Result};
use crate::frame::Image;
use crate::header::{
    NetscapeExtension, ScreenDescriptor, TRAILER, color_table_exponent, min_code_size,
    write_color_table,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// An animated GIF under construction.
#[derive(Debug)]
pub struct GifDocument<'a> {
    /// Logical screen descriptor.
    screen: ScreenDescriptor,
    /// Caller-owned RGB triples.
    color_table: &'a [u8],
    /// Colors actually in use.
    num_colors: u16,
    /// Loop count; 0 omits the looping extension.
    repeat: u16,
    /// Frames in display order.
    images: Vec<Image>,
}

impl<'a> GifDocument<'a> {
    /// Start a document for a `width` x `height` canvas.
    ///
    /// `color_table` holds at least `3 * num_colors` bytes of RGB triples.
    /// A non-zero `repeat` adds a Netscape looping extension.
    pub fn create(
        width: u16,
        height: u16,
        color_table: &'a [u8],
        num_colors: u16,
        repeat: u16,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GifError::InvalidDimensions { width, height });
        }
        if num_colors == 0 || num_colors > 256 {
            return Err(GifError::InvalidColorCount(num_colors));
        }
        let needed = usize::from(num_colors) * 3;
        if color_table.len() < needed {
            return Err(GifError::ColorTableTooShort {
                needed,
                available: color_table.len(),
            });
        }

        let exponent = color_table_exponent(num_colors);
        log::debug!(
            "creating {}x{} document, {} colors (table exponent {}), repeat {}",
            width,
            height,
            num_colors,
            exponent,
            repeat
        );

        Ok(Self {
            screen: ScreenDescriptor::new(width, height, exponent),
            color_table: &color_table[..needed],
            num_colors,
            repeat,
            images: Vec::new(),
        })
    }

    /// Canvas width.
    pub fn width(&self) -> u16 {
        self.screen.width
    }

    /// Canvas height.
    pub fn height(&self) -> u16 {
        self.screen.height
    }

    /// Number of colors in use.
    pub fn num_colors(&self) -> u16 {
        self.num_colors
    }

    /// Loop count.
    pub fn repeat(&self) -> u16 {
        self.repeat
    }

    /// LZW minimum code size used for every frame.
    pub fn min_code_size(&self) -> u8 {
        min_code_size(color_table_exponent(self.num_colors))
    }

    /// Frames appended so far.
    pub fn frames(&self) -> &[Image] {
        &self.images
    }

    fn frame_len(&self) -> usize {
        usize::from(self.screen.width) * usize::from(self.screen.height)
    }

    fn check_frame(&self, pixels: &[u8]) -> Result<()> {
        let expected = self.frame_len();
        if pixels.len() != expected {
            return Err(GifError::FrameSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        if let Some(&index) = pixels.iter().find(|&&p| u16::from(p) >= self.num_colors) {
            return Err(GifError::PixelOutOfRange {
                index,
                num_colors: self.num_colors,
            });
        }
        Ok(())
    }

    fn encode_frame(&self, pixels: &[u8], delay: u16) -> Result<Image> {
        self.check_frame(pixels)?;
        Image::encode(
            pixels,
            self.screen.width,
            self.screen.height,
            self.min_code_size(),
            delay,
        )
    }

    /// Compress one frame of pixel indices and append it.
    ///
    /// `delay` is in hundredths of a second. On error the document is
    /// unchanged.
    pub fn append_frame(&mut self, pixels: &[u8], delay: u16) -> Result<()> {
        let image = self.encode_frame(pixels, delay)?;
        log::debug!(
            "frame #{}: {} sub-blocks, delay {}",
            self.images.len(),
            image.blocks().len(),
            delay
        );
        self.images.push(image);
        Ok(())
    }

    /// Compress a batch of `(pixels, delay)` frames and append them in order.
    ///
    /// With the `parallel` feature each frame is compressed on the rayon
    /// pool with its own encoder and packer. The result is identical to
    /// calling [`append_frame`](Self::append_frame) for each frame. If any
    /// frame fails nothing is appended.
    pub fn append_frames<P>(&mut self, frames: &[(P, u16)]) -> Result<()>
    where
        P: AsRef<[u8]> + Sync,
    {
        #[cfg(feature = "parallel")]
        let images: Vec<Result<Image>> = frames
            .par_iter()
            .map(|(pixels, delay)| self.encode_frame(pixels.as_ref(), *delay))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let images: Vec<Result<Image>> = frames
            .iter()
            .map(|(pixels, delay)| self.encode_frame(pixels.as_ref(), *delay))
            .collect();

        let images = images.into_iter().collect::<Result<Vec<_>>>()?;
        log::debug!(
            "appended {} frames (#{} onwards)",
            images.len(),
            self.images.len()
        );
        self.images.extend(images);
        Ok(())
    }

    /// Serialized size of the document in bytes.
    pub fn encoded_len(&self) -> usize {
        let extension = if self.repeat > 0 { 19 } else { 0 };
        13 + self.screen.table_entries() * 3
            + extension
            + self.images.iter().map(Image::encoded_len).sum::<usize>()
            + 1
    }

    /// Write the complete GIF to `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.screen.write(writer)?;
        write_color_table(writer, self.color_table, self.screen.table_entries())?;

        if self.repeat > 0 {
            NetscapeExtension {
                repeat: self.repeat,
            }
            .write(writer)?;
        }

        for image in &self.images {
            image.write(writer)?;
        }

        writer.write_all(&[TRAILER])?;
        Ok(())
    }

    /// Serialize the complete GIF into memory.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut out)?;
        log::debug!(
            "serialized {} frames into {} bytes",
            self.images.len(),
            out.len()
        );
        Ok(out)
    }

    /// Write the complete GIF to a file at `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        log::debug!("wrote {}", path.as_ref().display());
        Ok(())
    }

    /// Release the document and every compressed frame it holds.
    ///
    /// The borrowed color table is left untouched.
    pub fn release(self) {
        log::debug!("releasing document with {} frames", self.images.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PALETTE: [u8; 12] = [0, 0, 0, 255, 0, 0, 0, 255, 0, 0, 0, 255];

    #[test]
    fn test_create_validation() {
        assert!(matches!(
            GifDocument::create(0, 10, &PALETTE, 4, 0),
            Err(GifError::InvalidDimensions { width: 0, .. })
        ));
        assert!(matches!(
            GifDocument::create(10, 10, &PALETTE, 0, 0),
            Err(GifError::InvalidColorCount(0))
        ));
        assert!(matches!(
            GifDocument::create(10, 10, &PALETTE, 257, 0),
            Err(GifError::InvalidColorCount(257))
        ));
        assert!(matches!(
            GifDocument::create(10, 10, &PALETTE, 5, 0),
            Err(GifError::ColorTableTooShort {
                needed: 15,
                available: 12
            })
        ));
    }

    #[test]
    fn test_min_code_size_follows_colors() {
        let table = [0u8; 768];
        let cases = [(1, 2), (2, 2), (4, 2), (5, 3), (16, 4), (17, 5), (256, 8)];
        for (colors, expected) in cases {
            let doc = GifDocument::create(1, 1, &table, colors, 0).unwrap();
            assert_eq!(doc.min_code_size(), expected, "{colors} colors");
        }
    }

    #[test]
    fn test_append_frame_validation() {
        let mut doc = GifDocument::create(2, 2, &PALETTE, 4, 0).unwrap();
        assert!(matches!(
            doc.append_frame(&[0, 1, 2], 0),
            Err(GifError::FrameSizeMismatch {
                expected: 4,
                actual: 3
            })
        ));
        assert!(matches!(
            doc.append_frame(&[0, 1, 2, 4], 0),
            Err(GifError::PixelOutOfRange {
                index: 4,
                num_colors: 4
            })
        ));
        assert!(doc.frames().is_empty());

        doc.append_frame(&[0, 1, 2, 3], 7).unwrap();
        assert_eq!(doc.frames().len(), 1);
        assert_eq!(doc.frames()[0].delay(), 7);
    }

    #[test]
    fn test_no_extension_without_repeat() {
        let mut doc = GifDocument::create(2, 2, &PALETTE, 4, 0).unwrap();
        doc.append_frame(&[0, 0, 0, 0], 0).unwrap();
        let bytes = doc.serialize().unwrap();

        assert_eq!(bytes.len(), doc.encoded_len());
        // Header and color table are followed directly by the first record.
        assert_eq!(&bytes[25..27], &[0x21, 0xF9]);
        assert_eq!(bytes.last(), Some(&0x3B));
    }

    #[test]
    fn test_padded_color_table() {
        let table = [9u8; 9];
        let mut doc = GifDocument::create(1, 1, &table, 3, 0).unwrap();
        doc.append_frame(&[2], 0).unwrap();
        let bytes = doc.serialize().unwrap();

        assert_eq!(bytes[10], 0xF1);
        assert_eq!(&bytes[13..22], &[9; 9]);
        assert_eq!(&bytes[22..25], &[0, 0, 0]);
        assert_eq!(table, [9u8; 9]);
    }

    #[test]
    fn test_append_frames_matches_sequential() {
        let frames: Vec<(Vec<u8>, u16)> = (0..6u8)
            .map(|f| {
                let pixels = (0..400u32).map(|i| ((i / 20 + u32::from(f)) % 4) as u8).collect();
                (pixels, u16::from(f) * 5)
            })
            .collect();

        let mut batch = GifDocument::create(20, 20, &PALETTE, 4, 1).unwrap();
        batch.append_frames(&frames).unwrap();

        let mut sequential = GifDocument::create(20, 20, &PALETTE, 4, 1).unwrap();
        for (pixels, delay) in &frames {
            sequential.append_frame(pixels, *delay).unwrap();
        }

        assert_eq!(batch.frames(), sequential.frames());
        assert_eq!(batch.serialize().unwrap(), sequential.serialize().unwrap());
    }

    #[test]
    fn test_append_frames_is_atomic() {
        let mut doc = GifDocument::create(2, 2, &PALETTE, 4, 0).unwrap();
        let frames = [(vec![0u8, 0, 0, 0], 1u16), (vec![0u8, 0, 0], 1)];
        assert!(doc.append_frames(&frames).is_err());
        assert!(doc.frames().is_empty());
    }
}
