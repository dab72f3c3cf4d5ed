use std::fmt::Display;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct PixelPoint {
    pub x: u32,
    pub y: u32,
}

/// An ordered vertex triple. The order carries the triangle's orientation,
/// so two triples compare equal only when their vertices match position for
/// position.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Triangle {
    pub v1: PixelPoint,
    pub v2: PixelPoint,
    pub v3: PixelPoint,
}

impl PixelPoint {
    pub fn new(x: u32, y: u32) -> Self {
        PixelPoint { x, y }
    }

    pub fn offset(self, dx: u32, dy: u32) -> Self {
        PixelPoint {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl Display for PixelPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl Triangle {
    pub fn new(v1: PixelPoint, v2: PixelPoint, v3: PixelPoint) -> Self {
        Triangle { v1, v2, v3 }
    }

    pub fn points(&self) -> [PixelPoint; 3] {
        [self.v1, self.v2, self.v3]
    }
}

impl Display for Triangle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.v1, self.v2, self.v3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_the_cli_syntax() {
        let t = Triangle::new(
            PixelPoint::new(0, 10),
            PixelPoint::new(0, 0),
            PixelPoint::new(10, 10),
        );
        assert_eq!(t.to_string(), "0,10 0,0 10,10");
    }

    #[test]
    fn equality_is_order_sensitive() {
        let a = Triangle::new(
            PixelPoint::new(0, 10),
            PixelPoint::new(0, 0),
            PixelPoint::new(10, 10),
        );
        let b = Triangle::new(a.v3, a.v2, a.v1);
        assert_ne!(a, b);
    }
}
