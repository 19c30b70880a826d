//! # lzgif-gif: GIF89a animation writer
//!
//! Builds animated GIF89a files from frames of palette indices. Every
//! frame covers the full canvas and is compressed with the adaptive LZW
//! codec from [`lzgif_lzw`], packed straight into 255-byte data
//! sub-blocks.
//!
//! ## File Layout
//!
//! ```text
//! "GIF89a" | screen descriptor | global color table
//! [ Netscape looping extension ]          (repeat > 0)
//! { graphic control | image descriptor | sub-blocks | 0x00 } per frame
//! 0x3B
//! ```
//!
//! ## Features
//!
//! - `parallel`: compress batches of frames on the rayon thread pool
//!   through [`GifDocument::append_frames`]
//!
//! ## Example
//!
//! ```rust
//! use lzgif_gif::GifDocument;
//!
//! let palette = [0, 0, 0, 255, 255, 255];
//! let mut doc = GifDocument::create(4, 4, &palette, 2, 0xFFFF).unwrap();
//! doc.append_frame(&[0; 16], 50).unwrap();
//! doc.append_frame(&[1; 16], 50).unwrap();
//!
//! let bytes = doc.serialize().unwrap();
//! assert!(bytes.starts_with(b"GIF89a"));
//! assert_eq!(bytes.last(), Some(&0x3B));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod document;
mod error;
mod frame;
mod header;

pub use document::GifDocument;
pub use error::{GifError, Result};
pub use frame::Image;
pub use header::{
    APPLICATION_LABEL, EXTENSION_INTRODUCER, GIF_SIGNATURE, GRAPHIC_CONTROL_LABEL,
    IMAGE_SEPARATOR, NETSCAPE_HEADER, NetscapeExtension, ScreenDescriptor, TRAILER,
    color_table_exponent, min_code_size, write_color_table,
};
