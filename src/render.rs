//! Renderer
//!
//! Drives one tile through the pipeline: the tile bounding box is computed
//! once, the ways are clipped to it, and the visible segments are
//! projected and drawn onto a fresh canvas.

use crate::buffer::{Canvas, TILE_SIZE};
use crate::clip::clip_ways;
use crate::color::Rgb8;
use crate::config::RenderOptions;
use crate::error::Result;
use crate::line::draw_segment;
use crate::projection::Projection;
use crate::tile::Tile;
use crate::types::Dataset;

/// Tiles with at most this many non-white pixels are reported as near blank
pub const NEAR_BLANK: usize = 100;

/// Render `tile` from `data`
///
/// Fails only for an invalid tile address. Empty datasets and tiles with
/// no visible way produce a blank canvas.
///
///     use osmtile::{Dataset, RenderOptions, Projection, Tile, render_tile};
///     let data = Dataset::new();
///     let tile = Tile::new(0, 0, 0);
///     let c = render_tile(&data, &tile, &RenderOptions::default()).unwrap();
///     assert_eq!(c.non_white(), 0);
///
///     let opts = RenderOptions::with_projection(Projection::Debug);
///     let c = render_tile(&data, &tile, &opts).unwrap();
///     assert_eq!(c.non_white(), 1527);
///
pub fn render_tile(data: &Dataset, tile: &Tile, opts: &RenderOptions) -> Result<Canvas> {
    let tile = Tile::checked(tile.x, tile.y, tile.z)?;
    let bbox = tile.bounding_box();
    log::info!("tile {} covers lon {:.6}..{:.6} lat {:.6}..{:.6} ({} projection)",
               tile, bbox.lon_min, bbox.lon_max, bbox.lat_min, bbox.lat_max, opts.projection);

    let mut canvas = Canvas::new(TILE_SIZE, TILE_SIZE, opts.background);
    if opts.projection == Projection::Debug {
        debug_pattern(&mut canvas, opts.foreground);
    } else {
        let visible = clip_ways(data, &bbox);
        log::info!("{} of {} ways visible", visible.len(), data.ways.len());
        let proj = opts.projection.projector(&bbox, TILE_SIZE as f64);
        for way in &visible {
            for seg in &way.segments {
                draw_segment(&mut canvas, proj.project(seg.a), proj.project(seg.b), opts.foreground);
            }
        }
    }

    let n = canvas.non_white();
    if n <= NEAR_BLANK {
        log::warn!("tile {} is nearly blank: {} non-white pixels", tile, n);
    }
    Ok(canvas)
}

/// Border frame and a crosshair through the canvas center
fn debug_pattern(canvas: &mut Canvas, c: Rgb8) {
    let w = canvas.width as i64;
    let h = canvas.height as i64;
    canvas.copy_hline(0, 0, canvas.width, c);
    canvas.copy_hline(0, h - 1, canvas.width, c);
    canvas.copy_vline(0, 0, canvas.height, c);
    canvas.copy_vline(w - 1, 0, canvas.height, c);
    canvas.copy_hline(0, h / 2, canvas.width, c);
    canvas.copy_vline(w / 2, 0, canvas.height, c);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::Way;

    /// Single way through the given (lon, lat) points
    fn dataset(points: &[(f64, f64)]) -> Dataset {
        let mut data = Dataset::new();
        let mut refs = vec![];
        for (i, &(lon, lat)) in points.iter().enumerate() {
            let id = i as i64 + 1;
            data.add_node(id, lat, lon);
            refs.push(id);
        }
        data.add_way(Way { id: 1, refs, ..Default::default() });
        data
    }

    #[test]
    fn horizontal_line_across_tile() {
        let tile = Tile::new(1081, 660, 11);
        let b = tile.bounding_box();
        let lat = b.center().lat;
        let data = dataset(&[(b.lon_min - 0.1, lat), (b.lon_max + 0.1, lat)]);
        let c = render_tile(&data, &tile, &RenderOptions::default()).unwrap();
        assert_eq!(c.non_white(), 256);
    }

    #[test]
    fn outside_tile_is_blank() {
        let tile = Tile::new(1081, 660, 11);
        let b = tile.bounding_box();
        let data = dataset(&[(b.lon_max + 0.1, b.lat_min), (b.lon_max + 0.2, b.lat_max)]);
        let c = render_tile(&data, &tile, &RenderOptions::default()).unwrap();
        assert_eq!(c.non_white(), 0);
    }

    #[test]
    fn degenerate_way_draws_one_pixel() {
        let tile = Tile::new(1081, 660, 11);
        let p = tile.bounding_box().center();
        let data = dataset(&[(p.lon, p.lat), (p.lon, p.lat)]);
        let c = render_tile(&data, &tile, &RenderOptions::default()).unwrap();
        assert_eq!(c.non_white(), 1);
    }

    #[test]
    fn single_node_way_draws_nothing() {
        let tile = Tile::new(1081, 660, 11);
        let p = tile.bounding_box().center();
        let data = dataset(&[(p.lon, p.lat)]);
        let c = render_tile(&data, &tile, &RenderOptions::default()).unwrap();
        assert_eq!(c.non_white(), 0);
    }

    #[test]
    fn debug_ignores_data() {
        let tile = Tile::new(3, 5, 4);
        let opts = RenderOptions::with_projection(Projection::Debug);
        let empty = render_tile(&Dataset::new(), &tile, &opts).unwrap();
        let b = tile.bounding_box();
        let data = dataset(&[(b.lon_min, b.lat_min), (b.lon_max, b.lat_max)]);
        let full = render_tile(&data, &tile, &opts).unwrap();
        assert_eq!(empty, full);
        assert_eq!(empty.get(128, 128), Some(Rgb8::black()));
        assert_eq!(empty.get(0, 255), Some(Rgb8::black()));
        assert_eq!(empty.get(64, 64), Some(Rgb8::white()));
    }

    #[test]
    fn colors_follow_options() {
        let tile = Tile::new(0, 0, 0);
        let red = Rgb8::new(255, 0, 0);
        let opts = RenderOptions::with_projection(Projection::Debug)
            .foreground(red)
            .background(Rgb8::gray(200));
        let c = render_tile(&Dataset::new(), &tile, &opts).unwrap();
        assert_eq!(c.get(0, 0), Some(red));
        assert_eq!(c.get(10, 20), Some(Rgb8::gray(200)));
    }

    #[test]
    fn invalid_tile() {
        let r = render_tile(&Dataset::new(), &Tile::new(8, 0, 3), &RenderOptions::default());
        assert!(matches!(r, Err(Error::InvalidTileAddress { zoom: 3, column: 8, row: 0 })));
    }
}
