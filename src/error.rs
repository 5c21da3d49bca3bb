//! Error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for rendering operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that end a render
#[derive(Error, Debug)]
pub enum Error {
    /// Dataset path does not exist or cannot be opened
    #[error("input not found: {}: {source}", path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Dataset could not be decoded
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Tile address outside the tiling scheme
    #[error("invalid tile address {zoom}/{column}/{row}")]
    InvalidTileAddress { zoom: u32, column: u32, row: u32 },

    /// Output image could not be written
    #[error("failed to write {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Canvas could not be encoded
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Failures while reading an OSM PBF stream
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("read failed: {0}")]
    Io(#[from] io::Error),

    #[error("truncated stream while reading {context}")]
    Truncated { context: &'static str },

    #[error("stream does not start with an OSMHeader blob")]
    MissingHeader,

    #[error("unsupported required feature {0:?}")]
    UnsupportedFeature(String),

    #[error("{0}")]
    Pbf(#[from] osmpbf::Error),

    /// Element data the reader could not make sense of, such as deltas
    /// that run past the id or coordinate range
    #[error("malformed block: {0}")]
    Malformed(String),

    #[error("node {id} has coordinates outside the globe ({lat}, {lon})")]
    InvalidCoordinate { id: i64, lat: f64, lon: f64 },

    #[error("{what} arrays differ in length ({left} vs {right})")]
    MismatchedArrays {
        what: &'static str,
        left: usize,
        right: usize,
    },

    #[error("way {0} has no nodes")]
    EmptyWay(i64),

    #[error("way {way} references missing node {node}")]
    MissingNode { way: i64, node: i64 },
}
