//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Extension of standalone code-stream files.
pub const LZW_EXTENSION: &str = "lzw";

/// `file` -> `file.lzw`.
pub fn compressed_path(input: &Path) -> PathBuf {
    append_suffix(input, ".lzw")
}

/// `file.lzw` -> `file`, anything else -> `file.orig`.
pub fn decompressed_path(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == LZW_EXTENSION) {
        input.with_extension("")
    } else {
        append_suffix(input, ".orig")
    }
}

fn append_suffix(input: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Serialize codes as little-endian u16 values.
pub fn codes_to_bytes(codes: &[u16]) -> Vec<u8> {
    codes.iter().flat_map(|code| code.to_le_bytes()).collect()
}

/// Parse little-endian u16 codes. Fails on an odd byte count.
pub fn bytes_to_codes(bytes: &[u8]) -> Result<Vec<u16>, String> {
    if bytes.len() % 2 != 0 {
        return Err(format!(
            "code stream has odd length {} (expected 16-bit codes)",
            bytes.len()
        ));
    }
    Ok(bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect())
}

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    let template = "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";
    if let Ok(style) = ProgressStyle::default_bar().template(template) {
        pb.set_style(style.progress_chars("█▓▒░ "));
    }
    pb
}

/// Human-readable size.
pub fn format_size(size: u64) -> String {
    if size < 1024 {
        format!("{} B", size)
    } else if size < 1024 * 1024 {
        format!("{:.1} KB", size as f64 / 1024.0)
    } else {
        format!("{:.1} MB", size as f64 / (1024.0 * 1024.0))
    }
}
