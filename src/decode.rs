//! OSM PBF decoding
//!
//! The first blob of a file must be an `OSMHeader` whose required features
//! are all understood. Elements of the following `OSMData` blobs are read
//! with `osmpbf`: nodes and dense nodes fill the node table, ways keep
//! their refs and tags, and coordinates stored on ways fill in nodes the
//! file does not carry. Decoding is all or nothing: a dataset is only
//! returned once every way resolves against the node table.
//!
//! See <https://wiki.openstreetmap.org/wiki/PBF_Format>

use std::any::Any;
use std::error::Error as _;
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use osmpbf::{BlobReader, BlobType, Element, ElementReader};

use crate::error::{DecodeError, Error, Result};
use crate::types::{Dataset, Header, Node, Way};

/// Required features the decoder understands
pub const SUPPORTED_FEATURES: [&str; 3] = ["OsmSchema-V0.6", "DenseNodes", "HistoricalInformation"];

type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Decode the dataset at `path`
///
/// A path that cannot be opened is reported as
/// [Error::InputNotFound](enum.Error.html), everything after that as
/// [Error::Decode](enum.Error.html).
pub fn decode_path<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|source| Error::InputNotFound { path: path.to_path_buf(), source })?;
    log::info!("reading {}", path.display());
    Ok(decode_reader(BufReader::new(file))?)
}

/// Decode a dataset from a seekable byte stream
///
/// The stream is read twice from its current position: once for the
/// header blob and once for the elements.
pub fn decode_reader<R: Read + Seek + Send>(mut reader: R) -> DecodeResult<Dataset> {
    let start = reader.stream_position()?;
    let mut dataset = Dataset::new();
    dataset.header = read_header(&mut reader)?;
    log::debug!("required features {:?}, optional features {:?}",
                dataset.header.required_features, dataset.header.optional_features);
    reader.seek(SeekFrom::Start(start))?;

    let mut embedded = vec![];
    let mut failure = None;
    // Delta sums in the element reader are unchecked and panic on overflow
    let pass = panic::catch_unwind(AssertUnwindSafe(|| {
        ElementReader::new(reader).for_each(|element| {
            if failure.is_none() {
                failure = add_element(element, &mut dataset, &mut embedded).err();
            }
        })
    }));
    match pass {
        Ok(r) => r.map_err(pbf_error)?,
        Err(payload) => return Err(DecodeError::Malformed(panic_message(payload))),
    }
    if let Some(e) = failure {
        return Err(e);
    }

    let n = dataset.nodes.len();
    for node in embedded {
        dataset.nodes.entry(node.id).or_insert(node);
    }
    if dataset.nodes.len() > n {
        log::debug!("{} nodes taken from way locations", dataset.nodes.len() - n);
    }
    check_references(&dataset)?;
    log::info!("decoded {} nodes and {} ways", dataset.nodes.len(), dataset.ways.len());
    Ok(dataset)
}

/// Feature lists of the leading `OSMHeader` blob
fn read_header<R: Read + Send>(reader: &mut R) -> DecodeResult<Header> {
    let blob = match BlobReader::new(reader).next() {
        Some(blob) => blob.map_err(pbf_error)?,
        None => return Err(DecodeError::MissingHeader),
    };
    if !matches!(blob.get_type(), BlobType::OsmHeader) {
        return Err(DecodeError::MissingHeader);
    }
    let block = blob.to_headerblock().map_err(pbf_error)?;
    if let Some(f) = block.required_features().iter().find(|f| !SUPPORTED_FEATURES.contains(&f.as_str())) {
        return Err(DecodeError::UnsupportedFeature(f.clone()));
    }
    Ok(Header {
        required_features: block.required_features().to_vec(),
        optional_features: block.optional_features().to_vec(),
    })
}

/// Short reads surface as truncation, everything else as the reader's error
fn pbf_error(e: osmpbf::Error) -> DecodeError {
    let eof = e.source()
        .and_then(|s| s.downcast_ref::<io::Error>())
        .map_or(false, |io| io.kind() == io::ErrorKind::UnexpectedEof);
    if eof {
        return DecodeError::Truncated { context: "blob" };
    }
    DecodeError::Pbf(e)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "element reader panicked".to_string()
    }
}

fn add_element(element: Element<'_>, dataset: &mut Dataset, embedded: &mut Vec<Node>) -> DecodeResult<()> {
    match element {
        Element::Node(n) => dataset.add_node(n.id(), n.lat(), n.lon()),
        Element::DenseNode(n) => dataset.add_node(n.id(), n.lat(), n.lon()),
        Element::Way(w) => dataset.add_way(decode_way(&w, embedded)?),
        _ => {}
    }
    Ok(())
}

fn decode_way(w: &osmpbf::Way<'_>, embedded: &mut Vec<Node>) -> DecodeResult<Way> {
    let mut way = Way { id: w.id(), refs: w.refs().collect(), ..Default::default() };
    if way.refs.is_empty() {
        return Err(DecodeError::EmptyWay(way.id));
    }
    for (k, v) in w.tags() {
        way.tags.insert(k.to_string(), v.to_string());
    }
    let locations: Vec<_> = w.node_locations().collect();
    if !locations.is_empty() {
        if locations.len() != way.refs.len() {
            return Err(DecodeError::MismatchedArrays {
                what: "way location",
                left: way.refs.len(),
                right: locations.len(),
            });
        }
        for (&id, loc) in way.refs.iter().zip(&locations) {
            embedded.push(Node { id, lat: loc.lat(), lon: loc.lon() });
        }
    }
    Ok(way)
}

/// Every way must resolve against the node table, at coordinates on the globe
fn check_references(dataset: &Dataset) -> DecodeResult<()> {
    if let Some(n) = dataset.nodes.values().find(|n| !on_globe(n)) {
        return Err(DecodeError::InvalidCoordinate { id: n.id, lat: n.lat, lon: n.lon });
    }
    for way in &dataset.ways {
        if way.refs.is_empty() {
            return Err(DecodeError::EmptyWay(way.id));
        }
        if let Some(node) = dataset.missing_node(way) {
            return Err(DecodeError::MissingNode { way: way.id, node });
        }
    }
    Ok(())
}

fn on_globe(n: &Node) -> bool {
    (-90.0 ..= 90.0).contains(&n.lat) && (-180.0 ..= 180.0).contains(&n.lon)
}
