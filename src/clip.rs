//! Clipping Region
//!
//! Ways are selected by comparing their extent with the tile bounding box,
//! then each segment is clipped with the
//! [Liang-Barsky algorithm](https://en.wikipedia.org/wiki/Liang-Barsky_algorithm).
//! Endpoints inside the box are passed through untouched; only endpoints
//! that are moved onto the boundary change.

use crate::types::{Dataset, Point};

/// Geographic bounding box in degrees
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct BoundingBox {
    pub lon_min: f64,
    pub lat_min: f64,
    pub lon_max: f64,
    pub lat_max: f64,
}

impl BoundingBox {
    /// Create a new BoundingBox
    ///
    /// Values are sorted before storing
    pub fn new(lon_min: f64, lat_min: f64, lon_max: f64, lat_max: f64) -> Self {
        let (lon_min, lon_max) = if lon_min > lon_max { (lon_max, lon_min) } else { (lon_min, lon_max) };
        let (lat_min, lat_max) = if lat_min > lat_max { (lat_max, lat_min) } else { (lat_min, lat_max) };
        Self { lon_min, lat_min, lon_max, lat_max }
    }
    /// Smallest box holding all `points`, None if there are none
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut b = Self::new(first.lon, first.lat, first.lon, first.lat);
        for p in rest {
            b.expand(p.lon, p.lat);
        }
        Some(b)
    }
    /// Get location of point relative to the box
    ///
    /// Returned is an a u8 made up of the following bits:
    /// - [INSIDE](constant.INSIDE.html)
    /// - [LEFT](constant.LEFT.html)
    /// - [RIGHT](constant.RIGHT.html)
    /// - [BOTTOM](constant.BOTTOM.html)
    /// - [TOP](constant.TOP.html)
    ///
    pub fn clip_flags(&self, p: &Point) -> u8 {
        let mut code = INSIDE;
        if p.lon < self.lon_min { code |= LEFT; }
        if p.lon > self.lon_max { code |= RIGHT; }
        if p.lat < self.lat_min { code |= BOTTOM; }
        if p.lat > self.lat_max { code |= TOP; }
        code
    }
    /// Check if a point is inside or on the edge of the box
    pub fn contains(&self, p: &Point) -> bool {
        self.clip_flags(p) == INSIDE
    }
    /// Check if the boxes share at least one point
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.lon_min <= other.lon_max && self.lon_max >= other.lon_min &&
            self.lat_min <= other.lat_max && self.lat_max >= other.lat_min
    }
    /// Expand if the point (lon,lat) is outside
    pub fn expand(&mut self, lon: f64, lat: f64) {
        if lon < self.lon_min { self.lon_min = lon; }
        if lon > self.lon_max { self.lon_max = lon; }
        if lat < self.lat_min { self.lat_min = lat; }
        if lat > self.lat_max { self.lat_max = lat; }
    }
    /// Center of the box
    pub fn center(&self) -> Point {
        Point::new((self.lon_min + self.lon_max) / 2.0,
                   (self.lat_min + self.lat_max) / 2.0)
    }
    /// Move a clipped point exactly onto the edge it crossed
    fn snap(&self, p: Point, edge: u8) -> Point {
        let mut p = Point::new(p.lon.max(self.lon_min).min(self.lon_max),
                               p.lat.max(self.lat_min).min(self.lat_max));
        match edge {
            LEFT   => p.lon = self.lon_min,
            RIGHT  => p.lon = self.lon_max,
            BOTTOM => p.lat = self.lat_min,
            TOP    => p.lat = self.lat_max,
            _ => {}
        }
        p
    }
}

/// Inside Region
pub const INSIDE : u8 = 0b0000;
/// Left of Region (west)
pub const LEFT   : u8 = 0b0000_0001;
/// Right of Region (east)
pub const RIGHT  : u8 = 0b0000_0010;
/// Below Region (south)
pub const BOTTOM : u8 = 0b0000_0100;
/// Above Region (north)
pub const TOP    : u8 = 0b0000_1000;

/// Straight segment between two geographic points
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

/// Clip the segment from `a` to `b` against `bbox`
///
/// Returns None when no part of the segment lies inside the box. A
/// zero-length segment inside the box is returned as is.
///
///     use osmtile::{BoundingBox, Point, clip_segment};
///
///     let b = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
///     let s = clip_segment(Point::new(-5.0, 5.0), Point::new(5.0, 5.0), &b).unwrap();
///     assert_eq!(s.a, Point::new(0.0, 5.0));
///     assert_eq!(s.b, Point::new(5.0, 5.0));
///
///     assert!(clip_segment(Point::new(-5.0, 5.0), Point::new(-1.0, 9.0), &b).is_none());
///
pub fn clip_segment(a: Point, b: Point, bbox: &BoundingBox) -> Option<Segment> {
    let dx = b.lon - a.lon;
    let dy = b.lat - a.lat;
    let checks = [
        (-dx, a.lon - bbox.lon_min, LEFT),
        ( dx, bbox.lon_max - a.lon, RIGHT),
        (-dy, a.lat - bbox.lat_min, BOTTOM),
        ( dy, bbox.lat_max - a.lat, TOP),
    ];
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    let (mut e0, mut e1) = (INSIDE, INSIDE);
    for &(p, q, edge) in checks.iter() {
        if p == 0.0 {
            // Parallel to this edge
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            if r > t0 {
                t0 = r;
                e0 = edge;
            }
        } else {
            if r < t0 {
                return None;
            }
            if r < t1 {
                t1 = r;
                e1 = edge;
            }
        }
    }
    let start = if e0 == INSIDE {
        a
    } else {
        bbox.snap(Point::new(a.lon + t0 * dx, a.lat + t0 * dy), e0)
    };
    let end = if e1 == INSIDE {
        b
    } else {
        bbox.snap(Point::new(a.lon + t1 * dx, a.lat + t1 * dy), e1)
    };
    Some(Segment { a: start, b: end })
}

/// Clip every segment of a polyline, dropping the invisible ones
pub fn clip_polyline(points: &[Point], bbox: &BoundingBox) -> Vec<Segment> {
    points.windows(2)
        .filter_map(|w| clip_segment(w[0], w[1], bbox))
        .collect()
}

/// Visible part of a way
#[derive(Debug,Clone,PartialEq)]
pub struct ClippedWay {
    pub id: i64,
    pub segments: Vec<Segment>,
}

/// Select the ways of `data` that intersect `bbox` and clip them to it
///
/// Ways are returned in dataset order. Ways entirely outside are dropped.
pub fn clip_ways(data: &Dataset, bbox: &BoundingBox) -> Vec<ClippedWay> {
    let mut out = vec![];
    for way in &data.ways {
        let points = data.points(way);
        let extent = match BoundingBox::from_points(&points) {
            Some(e) => e,
            None => continue,
        };
        if !extent.overlaps(bbox) {
            log::debug!("way {}: outside tile", way.id);
            continue;
        }
        let segments = clip_polyline(&points, bbox);
        if segments.is_empty() {
            log::debug!("way {}: extent overlaps but no segment is visible", way.id);
            continue;
        }
        log::debug!("way {}: {} of {} segments visible",
                    way.id, segments.len(), points.len().saturating_sub(1));
        out.push(ClippedWay { id: way.id, segments });
    }
    out
}
