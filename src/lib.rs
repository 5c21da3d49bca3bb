//! Single tile rendering of OpenStreetMap PBF data
//!
//! How does this work
//!
//! ```text
//!     data = decode_path( input )          -- Node table + Way list
//!     bbox = Tile::new(x, y, z).bounding_box()
//!     clip_ways(data, bbox)                -- Liang-Barsky, per segment
//!       projector(bbox).project(point)     -- Mercator | Simple | Debug
//!         draw_segment(canvas, a, b)       -- Bresenham, black on white
//!     Coverage::from_canvas(canvas)        -- RESULT: line
//!     canvas.to_file( output )             -- PNG
//! ```
//!
//! The tile bounding box is computed once per render and handed to both
//! the clipper and the projection.
//!
//! ```no_run
//! use osmtile::{decode_path, render_tile, Coverage, RenderOptions, Tile};
//!
//! let data = decode_path("hamburg.osm.pbf")?;
//! let tile = Tile::checked(1081, 660, 11)?;
//! let canvas = render_tile(&data, &tile, &RenderOptions::default())?;
//! canvas.to_file("hamburg.png")?;
//! println!("{}", Coverage::from_canvas(&canvas));
//! # Ok::<(), osmtile::Error>(())
//! ```

pub mod error;
pub mod pbf;
pub mod decode;
pub mod writer;
pub mod types;
pub mod tile;
pub mod transform;
pub mod projection;
pub mod clip;
pub mod color;
pub mod buffer;
pub mod line;
pub mod config;
pub mod render;
pub mod report;

pub use error::*;
pub use decode::*;
pub use writer::*;
pub use types::*;
pub use tile::*;
pub use transform::*;
pub use projection::*;
pub use clip::*;
pub use color::*;
pub use buffer::*;
pub use line::*;
pub use config::*;
pub use render::*;
pub use report::*;
