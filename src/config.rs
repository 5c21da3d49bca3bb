//! Render settings

use crate::color::Rgb8;
use crate::projection::Projection;

/// Settings for one render
///
/// Built once per invocation; nothing is read from or written to disk.
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct RenderOptions {
    /// Geometry to pixel mapping
    pub projection: Projection,
    /// Line color
    pub foreground: Rgb8,
    /// Initial canvas color
    pub background: Rgb8,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            projection: Projection::Mercator,
            foreground: Rgb8::black(),
            background: Rgb8::white(),
        }
    }
}

impl RenderOptions {
    /// Default colors with the given projection
    ///
    ///     use osmtile::{Projection, RenderOptions};
    ///     let opts = RenderOptions::with_projection(Projection::Simple);
    ///     assert_eq!(opts.projection, Projection::Simple);
    ///     assert_eq!(opts.background, osmtile::Rgb8::white());
    ///
    pub fn with_projection(projection: Projection) -> Self {
        RenderOptions { projection, ..Self::default() }
    }
    /// Set the line color
    pub fn foreground(mut self, c: Rgb8) -> Self {
        self.foreground = c;
        self
    }
    /// Set the canvas color
    pub fn background(mut self, c: Rgb8) -> Self {
        self.background = c;
        self
    }
}
