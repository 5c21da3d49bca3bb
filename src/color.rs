//! Colors

/// Color as Red, Green and Blue
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq)]
pub struct Rgb8 {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Rgb8 {
    /// White Color (255,255,255)
    pub fn white() -> Self {
        Self::new(255,255,255)
    }
    /// Black Color (0,0,0)
    pub fn black() -> Self {
        Self::new(0,0,0)
    }
    /// Create new color
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb8 { r, g, b }
    }
    /// Gray scale color
    pub fn gray(g: u8) -> Self {
        Self::new(g,g,g)
    }
    /// Components in memory order
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
    /// Check for pure white
    pub fn is_white(self) -> bool {
        self == Self::white()
    }
}
