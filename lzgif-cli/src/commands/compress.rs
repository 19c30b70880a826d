//! Standalone code-stream compress/decompress commands.

use crate::utils::{
    bytes_to_codes, codes_to_bytes, compressed_path, decompressed_path, format_size,
};
use lzgif_lzw::{compress, decompress_exact};
use std::fs;
use std::path::Path;

/// Byte-oriented alphabet of the standalone format.
const ALPHABET_SIZE: u16 = 256;

pub fn cmd_compress(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let codes = compress(&data, ALPHABET_SIZE)?;
    let output = compressed_path(input);
    let bytes = codes_to_bytes(&codes);
    fs::write(&output, &bytes)?;

    log::debug!("{} bytes -> {} codes", data.len(), codes.len());
    println!(
        "Compressed {} ({}) -> {} ({})",
        input.display(),
        format_size(data.len() as u64),
        output.display(),
        format_size(bytes.len() as u64)
    );
    Ok(())
}

pub fn cmd_decompress(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = fs::read(input)?;
    let codes = bytes_to_codes(&bytes)?;
    let data = decompress_exact(&codes, ALPHABET_SIZE)?;
    let output = decompressed_path(input);
    fs::write(&output, &data)?;

    println!(
        "Decompressed {} ({}) -> {} ({})",
        input.display(),
        format_size(bytes.len() as u64),
        output.display(),
        format_size(data.len() as u64)
    );
    Ok(())
}
