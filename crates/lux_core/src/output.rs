//! Pixel output: 8-bit quantization and image encoders.
//!
//! A [`PixelSink`] receives gamma-corrected colors one at a time in row-major
//! order starting at the top-left pixel, and serializes them.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use lux_math::{Color, Interval};
use thiserror::Error;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Expected {expected} pixels, received {actual}")]
    PixelCount { expected: u64, actual: u64 },
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Consumer of rendered pixels.
pub trait PixelSink {
    /// Called once before the first pixel.
    fn begin(&mut self, width: u32, height: u32) -> OutputResult<()>;

    /// Accept the next pixel (gamma-corrected, nominally in [0, 1]).
    fn write_pixel(&mut self, color: Color) -> OutputResult<()>;

    /// Called once after the last pixel.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Quantize a gamma-corrected color to 8 bits per channel.
///
/// Each channel is clamped to [0, 0.999] and scaled as `floor(256 * c)`.
pub fn to_rgb8(color: Color) -> [u8; 3] {
    const INTENSITY: Interval = Interval::new(0.0, 0.999);
    let quantize = |c: f64| (256.0 * INTENSITY.clamp(c)) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Tracks how many pixels a sink has received against how many it expects.
#[derive(Debug, Default)]
struct PixelCounter {
    expected: u64,
    written: u64,
}

impl PixelCounter {
    fn reset(&mut self, width: u32, height: u32) {
        self.expected = width as u64 * height as u64;
        self.written = 0;
    }

    fn check_complete(&self) -> OutputResult<()> {
        if self.written != self.expected {
            return Err(OutputError::PixelCount {
                expected: self.expected,
                actual: self.written,
            });
        }
        Ok(())
    }
}

/// Plain-text PPM (P3) writer.
pub struct PpmWriter<W: Write> {
    out: W,
    counter: PixelCounter,
}

impl<W: Write> PpmWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            counter: PixelCounter::default(),
        }
    }

    /// Consume the writer and return the underlying output.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PixelSink for PpmWriter<W> {
    fn begin(&mut self, width: u32, height: u32) -> OutputResult<()> {
        self.counter.reset(width, height);
        writeln!(self.out, "P3")?;
        writeln!(self.out, "{} {}", width, height)?;
        writeln!(self.out, "255")?;
        Ok(())
    }

    fn write_pixel(&mut self, color: Color) -> OutputResult<()> {
        let [r, g, b] = to_rgb8(color);
        writeln!(self.out, "{} {} {}", r, g, b)?;
        self.counter.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.out.flush()?;
        self.counter.check_complete()
    }
}

/// Writes a PNG file through the `image` crate.
pub struct PngWriter {
    path: PathBuf,
    image: image::RgbImage,
    counter: PixelCounter,
}

impl PngWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            image: image::RgbImage::new(0, 0),
            counter: PixelCounter::default(),
        }
    }
}

impl PixelSink for PngWriter {
    fn begin(&mut self, width: u32, height: u32) -> OutputResult<()> {
        self.counter.reset(width, height);
        self.image = image::RgbImage::new(width, height);
        Ok(())
    }

    fn write_pixel(&mut self, color: Color) -> OutputResult<()> {
        let width = self.image.width() as u64;
        if self.counter.written >= self.counter.expected {
            return Err(OutputError::PixelCount {
                expected: self.counter.expected,
                actual: self.counter.written + 1,
            });
        }
        let x = (self.counter.written % width) as u32;
        let y = (self.counter.written / width) as u32;
        self.image.put_pixel(x, y, image::Rgb(to_rgb8(color)));
        self.counter.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.counter.check_complete()?;
        self.image.save_with_format(&self.path, image::ImageFormat::Png)?;
        log::info!("Wrote {}", self.path.display());
        Ok(())
    }
}

/// Choose an encoder from the file extension (`.ppm` or `.png`).
pub fn sink_for_path(path: &Path) -> OutputResult<Box<dyn PixelSink>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "ppm" => {
            let file = File::create(path)?;
            Ok(Box::new(PpmWriter::new(BufWriter::new(file))))
        }
        "png" => Ok(Box::new(PngWriter::new(path))),
        _ => Err(OutputError::UnsupportedFormat(path.display().to_string())),
    }
}
