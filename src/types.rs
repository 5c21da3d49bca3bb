//! Geographic entities decoded from a dataset

use std::collections::BTreeMap;
use std::collections::HashMap;

/// Geographic point in degrees
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Point {
    pub lon: f64,
    pub lat: f64,
}

impl Point {
    pub fn new(lon: f64, lat: f64) -> Self {
        Point { lon, lat }
    }
}

/// Position on the canvas, in (possibly fractional) pixels
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Pixel {
    pub x: f64,
    pub y: f64,
}

impl Pixel {
    pub fn new(x: f64, y: f64) -> Self {
        Pixel { x, y }
    }
    /// Integer pixel containing this position
    pub fn floor(&self) -> (i64, i64) {
        (self.x.floor() as i64, self.y.floor() as i64)
    }
}

/// OSM node
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct Node {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
}

impl Node {
    pub fn point(&self) -> Point {
        Point::new(self.lon, self.lat)
    }
}

/// OSM way
///
/// Node order is the order of the polyline and is kept exactly as decoded.
/// Tags are carried along but never change how a way is drawn.
#[derive(Debug,Clone,PartialEq,Default)]
pub struct Way {
    pub id: i64,
    pub refs: Vec<i64>,
    pub tags: BTreeMap<String, String>,
}

/// Feature lists from the file header
#[derive(Debug,Clone,PartialEq,Default)]
pub struct Header {
    pub required_features: Vec<String>,
    pub optional_features: Vec<String>,
}

/// Decoded dataset: the node table and the ways referencing it
///
/// Every id in every `Way::refs` is present in `nodes` once the decoder
/// has accepted the file.
#[derive(Debug,Clone,Default)]
pub struct Dataset {
    pub header: Header,
    pub nodes: HashMap<i64, Node>,
    pub ways: Vec<Way>,
}

impl Dataset {
    /// Create an empty dataset
    pub fn new() -> Self {
        Self::default()
    }
    /// Insert a node, replacing any node with the same id
    pub fn add_node(&mut self, id: i64, lat: f64, lon: f64) {
        self.nodes.insert(id, Node { id, lat, lon });
    }
    /// Append a way
    pub fn add_way(&mut self, way: Way) {
        self.ways.push(way);
    }
    /// Points of a way, in path order
    ///
    /// Refs without a node are skipped; a decoded dataset has none.
    pub fn points(&self, way: &Way) -> Vec<Point> {
        way.refs.iter()
            .filter_map(|id| self.nodes.get(id))
            .map(Node::point)
            .collect()
    }
    /// First node id referenced by a way but absent from the node table
    pub fn missing_node(&self, way: &Way) -> Option<i64> {
        way.refs.iter().copied().find(|id| !self.nodes.contains_key(id))
    }
}
