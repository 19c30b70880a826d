//! Command implementations for the lzgif CLI.

pub mod compress;
pub mod gif;

pub use compress::{cmd_compress, cmd_decompress};
pub use gif::cmd_gif;
