//! OSM PBF writing
//!
//! Produces files the decoder reads back: an `OSMHeader` block followed by
//! `OSMData` blocks of dense nodes and ways at the default granularity of
//! 100 nanodegrees.

use std::collections::HashMap;
use std::io::{self, Write};

use byteorder::{BigEndian, WriteBytesExt};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use prost::Message;

use crate::clip::BoundingBox;
use crate::pbf;
use crate::types::{Dataset, Node, Way};

/// Entities per block
const BLOCK_SIZE: usize = 8000;
/// Coordinate unit at the default granularity, per degree
const UNITS: f64 = 1e7;

/// Output layout
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct WriteOptions {
    /// zlib compress blocks
    pub compress: bool,
    /// Store node coordinates on every way
    pub locations_on_ways: bool,
    /// Write the node table; without it ways only resolve through their
    /// own locations
    pub nodes: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions { compress: true, locations_on_ways: false, nodes: true }
    }
}

/// Encode `data` as an OSM PBF stream
///
/// Nodes are written in id order, ways in dataset order. A dataset
/// without nodes and ways is written as a header only.
pub fn write_dataset<W: Write>(w: &mut W, data: &Dataset, opts: &WriteOptions) -> io::Result<()> {
    let mut nodes: Vec<&Node> = data.nodes.values().collect();
    nodes.sort_by_key(|n| n.id);

    let mut required = vec!["OsmSchema-V0.6".to_string()];
    if opts.nodes && !nodes.is_empty() {
        required.push("DenseNodes".to_string());
    }
    let mut optional = vec![];
    if opts.locations_on_ways {
        optional.push("LocationsOnWays".to_string());
    }
    let points: Vec<_> = nodes.iter().map(|n| n.point()).collect();
    let header = pbf::HeaderBlock {
        bbox: BoundingBox::from_points(&points).map(|b| pbf::HeaderBBox {
            left: nano(b.lon_min),
            right: nano(b.lon_max),
            top: nano(b.lat_max),
            bottom: nano(b.lat_min),
        }),
        required_features: required,
        optional_features: optional,
        writingprogram: Some(concat!("osmtile ", env!("CARGO_PKG_VERSION")).to_string()),
    };
    write_blob(w, "OSMHeader", &header.encode_to_vec(), opts.compress)?;

    if opts.nodes {
        for chunk in nodes.chunks(BLOCK_SIZE) {
            let block = BlockBuilder::new().dense(chunk).finish();
            write_blob(w, "OSMData", &block.encode_to_vec(), opts.compress)?;
        }
    }
    for chunk in data.ways.chunks(BLOCK_SIZE) {
        let mut b = BlockBuilder::new();
        let ways = chunk.iter()
            .map(|way| b.way(way, data, opts.locations_on_ways))
            .collect();
        let block = b.ways(ways).finish();
        write_blob(w, "OSMData", &block.encode_to_vec(), opts.compress)?;
    }
    log::debug!("wrote {} nodes and {} ways", if opts.nodes { nodes.len() } else { 0 }, data.ways.len());
    Ok(())
}

/// Degrees to nanodegrees
fn nano(deg: f64) -> i64 {
    (deg * 1e9).round() as i64
}

/// Degrees to granularity units
fn units(deg: f64) -> i64 {
    (deg * UNITS).round() as i64
}

/// Delta code a column
fn delta(v: impl IntoIterator<Item = i64>) -> Vec<i64> {
    let mut prev = 0;
    v.into_iter()
        .map(|x| {
            let d = x - prev;
            prev = x;
            d
        })
        .collect()
}

/// Assembles one PrimitiveBlock and its string table
struct BlockBuilder {
    strings: Vec<Vec<u8>>,
    index: HashMap<String, u32>,
    groups: Vec<pbf::PrimitiveGroup>,
}

impl BlockBuilder {
    fn new() -> Self {
        // Entry 0 is reserved as a delimiter
        BlockBuilder { strings: vec![vec![]], index: HashMap::new(), groups: vec![] }
    }
    fn string(&mut self, s: &str) -> u32 {
        if let Some(&i) = self.index.get(s) {
            return i;
        }
        let i = self.strings.len() as u32;
        self.strings.push(s.as_bytes().to_vec());
        self.index.insert(s.to_string(), i);
        i
    }
    fn dense(mut self, nodes: &[&Node]) -> Self {
        let dense = pbf::DenseNodes {
            id: delta(nodes.iter().map(|n| n.id)),
            lat: delta(nodes.iter().map(|n| units(n.lat))),
            lon: delta(nodes.iter().map(|n| units(n.lon))),
        };
        self.groups.push(pbf::PrimitiveGroup { dense: Some(dense), ..Default::default() });
        self
    }
    fn way(&mut self, way: &Way, data: &Dataset, locations: bool) -> pbf::Way {
        let (keys, vals) = way.tags.iter()
            .map(|(k, v)| (self.string(k), self.string(v)))
            .unzip();
        let mut out = pbf::Way {
            id: way.id,
            keys,
            vals,
            refs: delta(way.refs.iter().copied()),
            lat: vec![],
            lon: vec![],
        };
        if locations && data.missing_node(way).is_none() {
            let pts = data.points(way);
            out.lat = delta(pts.iter().map(|p| units(p.lat)));
            out.lon = delta(pts.iter().map(|p| units(p.lon)));
        }
        out
    }
    fn ways(mut self, ways: Vec<pbf::Way>) -> Self {
        self.groups.push(pbf::PrimitiveGroup { ways, ..Default::default() });
        self
    }
    fn finish(self) -> pbf::PrimitiveBlock {
        pbf::PrimitiveBlock {
            stringtable: pbf::StringTable { s: self.strings },
            primitivegroup: self.groups,
            granularity: Some(100),
        }
    }
}

/// Frame and write a single block
fn write_blob<W: Write>(w: &mut W, kind: &str, data: &[u8], compress: bool) -> io::Result<()> {
    let mut blob = pbf::Blob { raw_size: Some(data.len() as i32), ..Default::default() };
    if compress {
        let mut z = ZlibEncoder::new(Vec::new(), Compression::default());
        z.write_all(data)?;
        blob.zlib_data = Some(z.finish()?);
    } else {
        blob.raw = Some(data.to_vec());
    }
    let blob = blob.encode_to_vec();
    let header = pbf::BlobHeader {
        r#type: kind.to_string(),
        datasize: blob.len() as i32,
    }.encode_to_vec();
    w.write_u32::<BigEndian>(header.len() as u32)?;
    w.write_all(&header)?;
    w.write_all(&blob)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use crate::decode::decode_reader;
    use crate::error::DecodeError;

    fn sample() -> Dataset {
        let mut d = Dataset::new();
        d.add_node(3, 53.551086, 9.993682);
        d.add_node(1, -33.868820, 151.209296);
        d.add_node(2, 0.0, -0.0000001);
        let mut way = Way { id: 20, refs: vec![3, 1, 2, 3], ..Default::default() };
        way.tags.insert("highway".into(), "primary".into());
        way.tags.insert("name".into(), "Ring".into());
        d.add_way(way);
        d.add_way(Way { id: 10, refs: vec![2, 2], ..Default::default() });
        d
    }

    fn roundtrip(opts: WriteOptions) -> Result<Dataset, DecodeError> {
        let mut buf = vec![];
        write_dataset(&mut buf, &sample(), &opts).unwrap();
        decode_reader(Cursor::new(buf))
    }

    fn assert_same(a: &Dataset, b: &Dataset) {
        let ways: Vec<_> = a.ways.iter().map(|w| (w.id, &w.refs, &w.tags)).collect();
        let back: Vec<_> = b.ways.iter().map(|w| (w.id, &w.refs, &w.tags)).collect();
        assert_eq!(ways, back);
        assert_eq!(a.nodes.len(), b.nodes.len());
        for (id, n) in &a.nodes {
            let m = b.nodes[id];
            assert!((n.lat - m.lat).abs() < 1e-7, "node {} lat {} {}", id, n.lat, m.lat);
            assert!((n.lon - m.lon).abs() < 1e-7, "node {} lon {} {}", id, n.lon, m.lon);
        }
    }

    #[test]
    fn compressed() {
        assert_same(&sample(), &roundtrip(WriteOptions::default()).unwrap());
    }

    #[test]
    fn raw() {
        let opts = WriteOptions { compress: false, ..Default::default() };
        assert_same(&sample(), &roundtrip(opts).unwrap());
    }

    #[test]
    fn locations_without_nodes() {
        let opts = WriteOptions { locations_on_ways: true, nodes: false, ..Default::default() };
        let d = roundtrip(opts).unwrap();
        assert_same(&sample(), &d);
        assert_eq!(d.header.optional_features, vec!["LocationsOnWays".to_string()]);
    }

    #[test]
    fn nodes_required_without_locations() {
        let opts = WriteOptions { nodes: false, ..Default::default() };
        assert!(matches!(roundtrip(opts), Err(DecodeError::MissingNode { .. })));
    }

    #[test]
    fn empty_dataset_is_header_only() {
        let mut buf = vec![];
        write_dataset(&mut buf, &Dataset::new(), &WriteOptions::default()).unwrap();
        let d = decode_reader(Cursor::new(buf)).unwrap();
        assert!(d.ways.is_empty());
        assert_eq!(d.header.required_features, vec!["OsmSchema-V0.6"]);
    }

    #[test]
    fn many_blocks() {
        let mut d = Dataset::new();
        let n = BLOCK_SIZE as i64 * 2 + 5;
        for id in 1 ..= n {
            d.add_node(id, (id % 90) as f64 * 0.5, (id % 180) as f64 * 0.25);
        }
        d.add_way(Way { id: 1, refs: (1 ..= n).collect(), ..Default::default() });
        let mut buf = vec![];
        write_dataset(&mut buf, &d, &WriteOptions::default()).unwrap();
        let back = decode_reader(Cursor::new(buf)).unwrap();
        assert_eq!(back.nodes.len(), n as usize);
        assert_eq!(back.ways[0].refs.len(), n as usize);
    }

    #[test]
    fn header_features() {
        let d = roundtrip(WriteOptions::default()).unwrap();
        assert_eq!(d.header.required_features, vec!["OsmSchema-V0.6", "DenseNodes"]);
        assert!(d.header.optional_features.is_empty());
    }
}
