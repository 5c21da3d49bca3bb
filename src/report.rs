//! Coverage statistics and PNG output
//!
//! Images are always written as PNG, whatever the file extension.

use std::fmt;
use std::fs;
use std::path::Path;

use image::ImageEncoder;
use image::codecs::png::PngEncoder;

use crate::buffer::Canvas;
use crate::error::{Error, Result};

/// Pixel coverage of a rendered canvas
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq)]
pub struct Coverage {
    /// Pixels not equal to pure white
    pub non_white: usize,
    /// All pixels
    pub total: usize,
}

impl Coverage {
    /// Count non-white pixels of a canvas
    pub fn from_canvas(canvas: &Canvas) -> Self {
        Coverage { non_white: canvas.non_white(), total: canvas.len() }
    }
    /// Percentage of non-white pixels
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        100.0 * self.non_white as f64 / self.total as f64
    }
}

/// The `RESULT:` line
///
///     use osmtile::Coverage;
///     let c = Coverage { non_white: 256, total: 65536 };
///     assert_eq!(c.to_string(), "RESULT: 256 non-white pixels / 65536 total (0.4%)");
///
impl fmt::Display for Coverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RESULT: {} non-white pixels / {} total ({:.1}%)",
               self.non_white, self.total, self.percentage())
    }
}

impl Canvas {
    /// Encode as an 8-bit RGB PNG
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        PngEncoder::new(&mut out).write_image(&self.data,
                                              self.width as u32,
                                              self.height as u32,
                                              image::ExtendedColorType::Rgb8)?;
        Ok(out)
    }
    /// Write the canvas to `filename` as PNG
    ///
    /// Encoding happens before the file is created, so a failed encode
    /// leaves no file behind.
    pub fn to_file<P: AsRef<Path>>(&self, filename: P) -> Result<()> {
        let path = filename.as_ref();
        let png = self.encode_png()?;
        fs::write(path, png).map_err(|source| Error::OutputWrite { path: path.to_path_buf(), source })?;
        log::info!("wrote {} ({}x{})", path.display(), self.width, self.height);
        Ok(())
    }
    /// Read an image file back into a canvas
    pub fn from_file<P: AsRef<Path>>(filename: P) -> Result<Canvas> {
        let img = image::open(filename)?.to_rgb8();
        let (w, h) = img.dimensions();
        Ok(Canvas { data: img.into_raw(), width: w as usize, height: h as usize })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb8;

    #[test]
    fn blank_and_full() {
        let blank = Coverage::from_canvas(&Canvas::tile());
        assert_eq!(blank.to_string(), "RESULT: 0 non-white pixels / 65536 total (0.0%)");
        let full = Coverage::from_canvas(&Canvas::new(256, 256, Rgb8::black()));
        assert_eq!(full.to_string(), "RESULT: 65536 non-white pixels / 65536 total (100.0%)");
    }

    #[test]
    fn rounding() {
        let c = Coverage { non_white: 1527, total: 65536 };
        assert_eq!(format!("{:.3}", c.percentage()), "2.330");
        assert!(c.to_string().ends_with("(2.3%)"));
    }

    #[test]
    fn png_signature() {
        let png = Canvas::tile().encode_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tile.png");
        let mut c = Canvas::tile();
        c.copy_hline(0, 100, 256, Rgb8::black());
        c.to_file(&path).unwrap();
        let back = Canvas::from_file(&path).unwrap();
        assert_eq!(back, c);
        assert_eq!(back.non_white(), 256);
    }

    #[test]
    fn unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("tile.png");
        match Canvas::tile().to_file(&path) {
            Err(Error::OutputWrite { path: p, .. }) => assert_eq!(p, path),
            other => panic!("unexpected {:?}", other),
        }
    }
}
