/*
    src/bin/pngdump.rs
 */

//! A small CLI for manually inspecting PNG files decoded by this crate:
//! prints the header fields and, optionally, dumps the decoded pixels as a
//! binary PPM for visual inspection with any ordinary image viewer.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use pngdec::{load_png, ColorType};

#[derive(Parser, Debug)]
#[command(name = "pngdump", about = "Decode and inspect a PNG file")]
struct Args {
    /// Path to the PNG file to decode.
    path: PathBuf,

    /// Write the decoded RGBA pixels out as a binary PPM (P6) file.
    #[arg(long, value_name = "FILE")]
    ppm: Option<PathBuf>,
}

fn color_type_name(color_type: ColorType) -> &'static str {
    match color_type {
        ColorType::Gray => "grayscale",
        ColorType::Rgb => "rgb",
        ColorType::Indexed => "indexed",
        ColorType::GrayAlpha => "grayscale+alpha",
        ColorType::Rgba => "rgba",
    }
}

/// Writes a binary PPM (P6), dropping the alpha channel — PPM has no alpha
/// plane, so this is for eyeballing color output only.
fn write_ppm(path: &PathBuf, width: u32, height: u32, rgba: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    write!(file, "P6\n{width} {height}\n255\n")?;
    let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
    for pixel in rgba.chunks_exact(4) {
        rgb.extend_from_slice(&pixel[..3]);
    }
    file.write_all(&rgb)
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let image = load_png(&args.path)?;

    println!("{}", args.path.display());
    println!("  size:       {}x{}", image.width, image.height);
    println!("  color type: {}", color_type_name(image.color_type));
    println!("  pixels:     {} bytes (rgba)", image.pixels.len());

    if let Some(ppm_path) = &args.ppm {
        write_ppm(ppm_path, image.width, image.height, &image.pixels)?;
        println!("  wrote ppm:  {}", ppm_path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "pngdump failed");
            eprintln!("pngdump: {e}");
            ExitCode::FAILURE
        }
    }
}
