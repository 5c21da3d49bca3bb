//! Projection variants
//!
//! A projection maps a geographic point and the tile bounding box to a
//! pixel position. Choosing one changes nothing upstream: decoding,
//! selection and clipping are the same for every variant.

use std::fmt;

use crate::buffer::TILE_SIZE;
use crate::clip::BoundingBox;
use crate::tile::lat_to_mercator;
use crate::transform::Transform;
use crate::types::{Pixel, Point};

/// Geometry to pixel mapping
#[derive(Debug,Copy,Clone,PartialEq,Eq,Default)]
pub enum Projection {
    /// Web Mercator, consistent with the tiling scheme
    #[default]
    Mercator,
    /// Equirectangular: latitude and longitude scaled linearly
    Simple,
    /// Diagnostic pattern, geometry is ignored
    Debug,
}

impl Projection {
    /// Build the mapping for one tile on a `size` x `size` canvas
    pub fn projector(self, bbox: &BoundingBox, size: f64) -> Projector {
        let (y0, y1) = match self {
            Projection::Mercator => (lat_to_mercator(bbox.lat_min), lat_to_mercator(bbox.lat_max)),
            Projection::Simple | Projection::Debug => (bbox.lat_min, bbox.lat_max),
        };
        let transform = Transform::new(bbox.lon_min, y0, bbox.lon_max, y1, size, size);
        Projector { projection: self, transform }
    }
    /// Project a single point onto a tile sized canvas
    ///
    ///     use osmtile::{Projection, Tile};
    ///     let b = Tile::new(1081, 660, 11).bounding_box();
    ///     let p = Projection::Mercator.project(b.center(), &b);
    ///     assert!(p.x > 127.9 && p.x < 128.1);
    ///
    pub fn project(self, p: Point, bbox: &BoundingBox) -> Pixel {
        self.projector(bbox, TILE_SIZE as f64).project(p)
    }
    /// Name used on the command line and in logs
    pub fn name(self) -> &'static str {
        match self {
            Projection::Mercator => "mercator",
            Projection::Simple   => "simple",
            Projection::Debug    => "debug",
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Projection bound to a single tile
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct Projector {
    pub projection: Projection,
    pub transform: Transform,
}

impl Projector {
    /// Map a geographic point to a pixel position
    ///
    /// The Debug variant returns the canvas center for every input.
    pub fn project(&self, p: Point) -> Pixel {
        let (x, y) = match self.projection {
            Projection::Mercator => self.transform.transform(p.lon, lat_to_mercator(p.lat)),
            Projection::Simple   => self.transform.transform(p.lon, p.lat),
            Projection::Debug    => (self.transform.width / 2.0, self.transform.height / 2.0),
        };
        Pixel::new(x, y)
    }
}
