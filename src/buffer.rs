//! Rendering buffer

use crate::color::Rgb8;

/// Width and height of a rendered tile, in pixels
pub const TILE_SIZE: usize = 256;
/// Bytes per pixel
const BPP: usize = 3;

/// Canvas of RGB pixels
///
/// Data is stored as row-major order (C-format), three bytes per pixel.
/// A new canvas is filled with the background color; after that only the
/// rasterizer writes to it.
#[derive(Debug,Clone,PartialEq)]
pub struct Canvas {
    /// Pixel / Component level data of Image
    pub data: Vec<u8>,
    /// Image Width in pixels
    pub width: usize,
    /// Image Height in pixels
    pub height: usize,
}

impl Canvas {
    /// Create a new canvas of width and height filled with `background`
    pub fn new(width: usize, height: usize, background: Rgb8) -> Self {
        let data = background.to_array().iter()
            .copied()
            .cycle()
            .take(width * height * BPP)
            .collect();
        Canvas { width, height, data }
    }
    /// Create a white 256x256 canvas
    ///
    ///     let c = osmtile::Canvas::tile();
    ///     assert_eq!(c.len(), 65536);
    ///     assert_eq!(c.non_white(), 0);
    ///
    pub fn tile() -> Self {
        Self::new(TILE_SIZE, TILE_SIZE, Rgb8::white())
    }
    /// Number of pixels
    pub fn len(&self) -> usize {
        self.width * self.height
    }
    /// Check for a canvas without pixels
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * BPP
    }
    /// Color at (`x`,`y`), None outside of the canvas
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some(Rgb8::new(self.data[i], self.data[i+1], self.data[i+2]))
    }
    /// Copies the color `c` to pixel at (`x`,`y`)
    ///
    /// Locations outside of the region are ignored. Returns true if the
    /// pixel was written.
    ///
    ///     use osmtile::{Canvas, Rgb8};
    ///     let mut c = Canvas::new(2, 2, Rgb8::white());
    ///     assert!(c.copy_pixel(1, 0, Rgb8::black()));
    ///     assert!(!c.copy_pixel(-1, 0, Rgb8::black()));
    ///     assert!(!c.copy_pixel(2, 0, Rgb8::black()));
    ///     assert_eq!(c.get(1, 0), Some(Rgb8::black()));
    ///     assert_eq!(c.non_white(), 1);
    ///
    pub fn copy_pixel(&mut self, x: i64, y: i64, c: Rgb8) -> bool {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return false;
        }
        let i = self.offset(x as usize, y as usize);
        self.data[i..i+BPP].copy_from_slice(&c.to_array());
        true
    }
    /// Copies the color `c` to pixels from (`x`,`y`) to (`x+n-1`,`y`)
    pub fn copy_hline(&mut self, x: i64, y: i64, n: usize, c: Rgb8) {
        for i in 0 .. n as i64 {
            self.copy_pixel(x + i, y, c);
        }
    }
    /// Copies the color `c` to pixels from (`x`,`y`) to (`x`,`y+n-1`)
    pub fn copy_vline(&mut self, x: i64, y: i64, n: usize, c: Rgb8) {
        for i in 0 .. n as i64 {
            self.copy_pixel(x, y + i, c);
        }
    }
    /// Iterate over all pixels in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = Rgb8> + '_ {
        self.data.chunks_exact(BPP).map(|p| Rgb8::new(p[0], p[1], p[2]))
    }
    /// Number of pixels that are not pure white
    pub fn non_white(&self) -> usize {
        self.pixels().filter(|p| !p.is_white()).count()
    }
}
