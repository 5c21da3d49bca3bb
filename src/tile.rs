//! Tile addressing in the Web Mercator tiling scheme
//!
//! The bounding box computed here is the only definition of the area a
//! tile covers. Clipping and every projection take it as input instead of
//! deriving their own.

use std::f64::consts::PI;
use std::fmt;

use crate::clip::BoundingBox;
use crate::error::{Error, Result};

/// Largest latitude representable in Web Mercator
pub const MAX_LAT: f64 = 85.0511287798;
/// Deepest zoom level accepted
pub const MAX_ZOOM: u32 = 30;

/// Convert latitude in degrees to a Mercator y coordinate
///
/// Latitudes beyond [MAX_LAT](constant.MAX_LAT.html) are clamped.
///
///     assert!(osmtile::lat_to_mercator(0.0).abs() < 1e-12);
///     assert!(osmtile::lat_to_mercator(89.9) > 3.14);
///
pub fn lat_to_mercator(lat: f64) -> f64 {
    let lat = lat.clamp(-MAX_LAT, MAX_LAT).to_radians();
    (PI / 4.0 + lat / 2.0).tan().ln()
}

/// Latitude of the northern edge of tile row `y` out of `n` rows
fn row_to_lat(y: f64, n: f64) -> f64 {
    (PI * (1.0 - 2.0 * y / n)).sinh().atan().to_degrees()
}

/// Tile address
///
/// `x` is the column counted eastward from 180°W, `y` the row counted
/// southward from the top of the map.
#[derive(Debug,Copy,Clone,PartialEq,Eq,Hash)]
pub struct Tile {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl Tile {
    /// Create a Tile without checking the address
    pub fn new(x: u32, y: u32, z: u32) -> Self {
        Tile { x, y, z }
    }
    /// Create a Tile, failing if the address is outside the scheme
    ///
    ///     use osmtile::Tile;
    ///     assert!(Tile::checked(1081, 660, 11).is_ok());
    ///     assert!(Tile::checked(2, 0, 1).is_err());
    ///
    pub fn checked(x: u32, y: u32, z: u32) -> Result<Self> {
        let tile = Tile { x, y, z };
        if !tile.is_valid() {
            return Err(Error::InvalidTileAddress { zoom: z, column: x, row: y });
        }
        Ok(tile)
    }
    /// Check `0 <= x,y < 2^z` and `z <= MAX_ZOOM`
    pub fn is_valid(&self) -> bool {
        if self.z > MAX_ZOOM {
            return false;
        }
        let n = 1u64 << self.z;
        u64::from(self.x) < n && u64::from(self.y) < n
    }
    /// Number of tiles along each axis at this zoom
    fn count(&self) -> f64 {
        2.0_f64.powi(self.z as i32)
    }
    /// Geographic area covered by the tile
    pub fn bounding_box(&self) -> BoundingBox {
        let n = self.count();
        let lon_min = f64::from(self.x) / n * 360.0 - 180.0;
        let lon_max = f64::from(self.x + 1) / n * 360.0 - 180.0;
        let lat_max = row_to_lat(f64::from(self.y), n);
        let lat_min = row_to_lat(f64::from(self.y + 1), n);
        BoundingBox::new(lon_min, lat_min, lon_max, lat_max)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}
