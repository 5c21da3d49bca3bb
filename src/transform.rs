//! Transformations

/// Mapping of a rectangular window onto a pixel grid
///
/// `x0..x1` maps to columns `0..width` and `y0..y1` to rows `height..0`,
/// i.e. y grows upward in the window and downward on the canvas. The
/// window edges land exactly on pixel 0 and on `width` / `height`.
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Transform {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub width: f64,
    pub height: f64,
}

impl Transform {
    /// Creates a new Transform from a window and a pixel size
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64, width: f64, height: f64) -> Self {
        Self { x0, y0, x1, y1, width, height }
    }
    /// Perform the transform
    ///
    ///     use osmtile::Transform;
    ///     let t = Transform::new(-10.0, 20.0, 30.0, 60.0, 256.0, 256.0);
    ///     assert_eq!(t.transform(-10.0, 60.0), (0.0, 0.0));
    ///     assert_eq!(t.transform(30.0, 20.0), (256.0, 256.0));
    ///     assert_eq!(t.transform(10.0, 40.0), (128.0, 128.0));
    ///
    pub fn transform(&self, x: f64, y: f64) -> (f64, f64) {
        let fx = (x - self.x0) / (self.x1 - self.x0);
        let fy = (y - self.y0) / (self.y1 - self.y0);
        (fx * self.width, (1.0 - fy) * self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_corners_hit_canvas_corners() {
        let t = Transform::new(9.84375, 53.330872, 10.01953, 53.435719, 256.0, 256.0);
        assert_eq!(t.transform(9.84375, 53.435719), (0.0, 0.0));
        assert_eq!(t.transform(10.01953, 53.330872), (256.0, 256.0));
        let (x, y) = t.transform(9.9, 53.4);
        assert!(x > 0.0 && x < 256.0 && y > 0.0 && y < 256.0);
    }
}
