#![allow(dead_code)]

use std::fs::File;
use std::path::{Path, PathBuf};

use osmtile::{Dataset, Tile, Way, WriteOptions};

/// Synthetic dataset builder
///
/// Node and way ids are handed out sequentially starting at 1.
#[derive(Debug, Default)]
pub struct Fixture {
    pub data: Dataset,
    next_node: i64,
    next_way: i64,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }
    /// Add a node at (`lon`,`lat`), returning its id
    pub fn node(&mut self, lon: f64, lat: f64) -> i64 {
        self.next_node += 1;
        self.data.add_node(self.next_node, lat, lon);
        self.next_node
    }
    /// Add a way through the (lon, lat) points
    pub fn way(&mut self, points: &[(f64, f64)]) -> i64 {
        let refs = points.iter().map(|&(lon, lat)| self.node(lon, lat)).collect();
        self.next_way += 1;
        let mut way = Way { id: self.next_way, refs, ..Default::default() };
        way.tags.insert("highway".to_string(), "primary".to_string());
        self.data.add_way(way);
        self.next_way
    }
    /// Add a two point way
    pub fn line(&mut self, a: (f64, f64), b: (f64, f64)) -> i64 {
        self.way(&[a, b])
    }
    /// Write as a compressed PBF file
    pub fn write(&self, dir: &Path, name: &str) -> PathBuf {
        self.write_with(dir, name, &WriteOptions::default())
    }
    pub fn write_with(&self, dir: &Path, name: &str, opts: &WriteOptions) -> PathBuf {
        let path = dir.join(name);
        let mut f = File::create(&path).unwrap();
        osmtile::write_dataset(&mut f, &self.data, opts).unwrap();
        path
    }
}

/// Point at a fraction of the tile: (0,0) is the north west corner,
/// (1,1) the south east corner. Fractions outside [0,1] leave the tile.
pub fn at(tile: &Tile, fx: f64, fy: f64) -> (f64, f64) {
    let b = tile.bounding_box();
    (b.lon_min + fx * (b.lon_max - b.lon_min),
     b.lat_max - fy * (b.lat_max - b.lat_min))
}

/// Horizontal line across the whole tile at fraction `fy`
pub fn hline(f: &mut Fixture, tile: &Tile, fy: f64) -> i64 {
    f.line(at(tile, -0.1, fy), at(tile, 1.1, fy))
}

/// Vertical line across the whole tile at fraction `fx`
pub fn vline(f: &mut Fixture, tile: &Tile, fx: f64) -> i64 {
    f.line(at(tile, fx, -0.1), at(tile, fx, 1.1))
}

/// Diamond with corners just outside the middle of each tile edge
pub fn diamond(f: &mut Fixture, tile: &Tile) -> i64 {
    f.way(&[at(tile, 0.5, -0.1), at(tile, 1.1, 0.5), at(tile, 0.5, 1.1),
            at(tile, -0.1, 0.5), at(tile, 0.5, -0.1)])
}

/// Hamburg, well inside the Mercator range
pub fn hamburg() -> Tile {
    Tile::new(1081, 660, 11)
}

/// High latitude tile, where Mercator and linear scaling differ visibly
pub fn arctic() -> Tile {
    Tile::new(1, 0, 2)
}

/// Parse `RESULT: <n> non-white pixels / <total> total (<pct>%)`
pub fn parse_result(line: &str) -> Option<(usize, usize, String)> {
    let rest = line.strip_prefix("RESULT: ")?;
    let words: Vec<&str> = rest.split(' ').collect();
    if words.len() != 7 || words[1..6] != ["non-white", "pixels", "/", words[4], "total"] {
        return None;
    }
    let pct = words[6].strip_prefix('(')?.strip_suffix("%)")?;
    Some((words[0].parse().ok()?, words[4].parse().ok()?, pct.to_string()))
}
