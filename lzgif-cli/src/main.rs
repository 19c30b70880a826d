//! lzgif CLI - adaptive LZW compression and GIF89a encoding
//!
//! Compresses arbitrary files into standalone LZW code streams and turns
//! raw palette-index frames into animated GIFs.

mod commands;
mod utils;

use clap::{Parser, Subcommand};
use commands::gif::GifOptions;
use commands::{cmd_compress, cmd_decompress, cmd_gif};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "lzgif")]
#[command(author, version, about = "Adaptive LZW compression and GIF89a encoding")]
#[command(long_about = "
lzgif compresses files with adaptive LZW and writes animated GIF89a files.

Set RUST_LOG=debug for per-frame details.

Examples:
  lzgif compress notes.txt            # writes notes.txt.lzw
  lzgif decompress notes.txt.lzw      # writes notes.txt
  lzgif gif -W 320 -H 240 -p pal.rgb --delay 10 frames.raw -o anim.gif
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file into a 16-bit LZW code stream (appends .lzw)
    #[command(alias = "c")]
    Compress {
        /// File to compress
        file: PathBuf,
    },

    /// Decompress a code stream (strips .lzw or appends .orig)
    #[command(alias = "d")]
    Decompress {
        /// File to decompress
        file: PathBuf,
    },

    /// Encode raw palette-index frames as an animated GIF
    Gif {
        /// Concatenated frames, one byte per pixel, width * height bytes each
        frames: PathBuf,

        /// Output GIF file
        #[arg(short, long)]
        output: PathBuf,

        /// Palette file of RGB triples (1-256 colors)
        #[arg(short, long)]
        palette: PathBuf,

        /// Canvas width in pixels
        #[arg(short = 'W', long)]
        width: u16,

        /// Canvas height in pixels
        #[arg(short = 'H', long)]
        height: u16,

        /// Delay between frames in hundredths of a second
        #[arg(short, long, default_value_t = 10)]
        delay: u16,

        /// Loop count (0 plays once)
        #[arg(short, long, default_value_t = 0)]
        repeat: u16,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    let result = match cli.command {
        Commands::Compress { file } => cmd_compress(&file),
        Commands::Decompress { file } => cmd_decompress(&file),
        Commands::Gif {
            frames,
            output,
            palette,
            width,
            height,
            delay,
            repeat,
        } => cmd_gif(&GifOptions {
            frames: &frames,
            palette: &palette,
            output: &output,
            width,
            height,
            delay,
            repeat,
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    println!("\nElapsed: {:.6}s", start.elapsed().as_secs_f64());
}
