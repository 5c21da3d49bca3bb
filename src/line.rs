//! Aliased line drawing

use crate::buffer::Canvas;
use crate::color::Rgb8;
use crate::types::Pixel;

/// Draw a line from `(x1,y1)` to `(x2,y2)` of color `c`
///
/// Uses [Bresenham's line drawing algorithm](https://en.wikipedia.org/wiki/Bresenham%27s_line_algorithm)
/// on integer pixel positions. Both end points are drawn; positions
/// outside of the canvas are skipped.
///
///     use osmtile::{Canvas, Rgb8, line};
///     let mut c = Canvas::tile();
///     line(&mut c, 0, 0, 9, 3, Rgb8::black());
///     assert_eq!(c.non_white(), 10);
///
pub fn line(canvas: &mut Canvas, x1: i64, y1: i64, x2: i64, y2: i64, c: Rgb8) {
    let dx = (x2 - x1).abs();
    let dy = -(y2 - y1).abs();
    let sx = if x1 < x2 { 1 } else { -1 };
    let sy = if y1 < y2 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x1, y1);
    loop {
        canvas.copy_pixel(x, y, c);
        if x == x2 && y == y2 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Draw a segment between two projected positions
///
/// Positions are floored to the pixel containing them, so a position of
/// exactly 256.0 falls just outside a tile canvas.
pub fn draw_segment(canvas: &mut Canvas, a: Pixel, b: Pixel, c: Rgb8) {
    let (x1, y1) = a.floor();
    let (x2, y2) = b.floor();
    line(canvas, x1, y1, x2, y2, c);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(x1: i64, y1: i64, x2: i64, y2: i64) -> usize {
        let mut c = Canvas::tile();
        line(&mut c, x1, y1, x2, y2, Rgb8::black());
        c.non_white()
    }

    #[test]
    fn all_octants() {
        let ends = [(20, 3), (3, 20), (-3, 20), (-20, 3), (-20, -3), (-3, -20), (3, -20), (20, -3)];
        for &(dx, dy) in ends.iter() {
            assert_eq!(count(100, 100, 100 + dx, 100 + dy), 21, "({},{})", dx, dy);
        }
    }

    #[test]
    fn symmetric() {
        let mut a = Canvas::tile();
        let mut b = Canvas::tile();
        line(&mut a, 10, 10, 10, 200, Rgb8::black());
        line(&mut b, 10, 200, 10, 10, Rgb8::black());
        assert_eq!(a, b);
        line(&mut a, 5, 5, 50, 5, Rgb8::black());
        line(&mut b, 50, 5, 5, 5, Rgb8::black());
        assert_eq!(a, b);
    }

    #[test]
    fn single_point() {
        assert_eq!(count(7, 7, 7, 7), 1);
    }

    #[test]
    fn partly_outside() {
        assert_eq!(count(-10, 5, 9, 5), 10);
        assert_eq!(count(0, 128, 256, 128), 256);
    }

    #[test]
    fn segment_floors() {
        let mut c = Canvas::tile();
        draw_segment(&mut c, Pixel::new(0.0, 0.7), Pixel::new(256.0, 0.2), Rgb8::black());
        assert_eq!(c.non_white(), 256);
        assert_eq!(c.get(255, 0), Some(Rgb8::black()));
    }
}
