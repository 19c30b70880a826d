//! Raw frames to animated GIF.

use crate::utils::{create_progress_bar, format_size};
use lzgif_gif::GifDocument;
use std::fs;
use std::io::IsTerminal;
use std::path::Path;

/// Frames handed to the encoder per batch.
const BATCH_FRAMES: usize = 16;

/// Options for the `gif` command.
pub struct GifOptions<'a> {
    pub frames: &'a Path,
    pub palette: &'a Path,
    pub output: &'a Path,
    pub width: u16,
    pub height: u16,
    pub delay: u16,
    pub repeat: u16,
}

pub fn cmd_gif(options: &GifOptions<'_>) -> Result<(), Box<dyn std::error::Error>> {
    let palette = fs::read(options.palette)?;
    if palette.is_empty() || palette.len() % 3 != 0 || palette.len() > 256 * 3 {
        return Err(format!(
            "palette must hold 1-256 RGB triples, got {} bytes",
            palette.len()
        )
        .into());
    }
    let num_colors = (palette.len() / 3) as u16;

    let raw = fs::read(options.frames)?;
    let frame_len = usize::from(options.width) * usize::from(options.height);
    if frame_len == 0 || raw.is_empty() || raw.len() % frame_len != 0 {
        return Err(format!(
            "frame data of {} bytes is not a whole number of {}x{} frames",
            raw.len(),
            options.width,
            options.height
        )
        .into());
    }

    let mut doc = GifDocument::create(
        options.width,
        options.height,
        &palette,
        num_colors,
        options.repeat,
    )?;
    let frames: Vec<(&[u8], u16)> = raw
        .chunks(frame_len)
        .map(|frame| (frame, options.delay))
        .collect();

    let pb = create_progress_bar(frames.len() as u64, std::io::stderr().is_terminal());
    pb.set_message("compressing");
    for batch in frames.chunks(BATCH_FRAMES) {
        doc.append_frames(batch)?;
        pb.inc(batch.len() as u64);
    }
    pb.finish_and_clear();

    doc.save(options.output)?;

    println!(
        "Wrote {} frames ({} colors) to {} ({})",
        doc.frames().len(),
        num_colors,
        options.output.display(),
        format_size(doc.encoded_len() as u64)
    );
    doc.release();
    Ok(())
}
