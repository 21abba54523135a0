//! Integer placement geometry for atlas packing
//!
//! All coordinates are texels with the origin at the top-left of the
//! backing texture, y growing downwards.

/// Axis-aligned rectangle in texel coordinates
///
/// Pure data type; the packing logic in [`crate::atlas::TextureAtlas`] owns
/// all placement decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Left edge in texels
    pub x: u32,
    /// Top edge in texels
    pub y: u32,
    /// Width in texels
    pub width: u32,
    /// Height in texels
    pub height: u32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Exclusive right edge
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Number of texels covered
    pub const fn area(&self) -> u32 {
        self.width * self.height
    }

    /// Byte length of an RGBA8 pixel buffer covering this rectangle
    pub const fn byte_len(&self) -> usize {
        self.area() as usize * 4
    }

    /// Whether two rectangles share any texel
    ///
    /// Touching edges do not count as overlap.
    pub const fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Whether `other` lies entirely within this rectangle
    pub const fn contains(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_area() {
        let rect = Rect::new(6, 0, 10, 12);

        assert_eq!(rect.right(), 16);
        assert_eq!(rect.bottom(), 12);
        assert_eq!(rect.area(), 120);
        assert_eq!(rect.byte_len(), 480);
    }

    #[test]
    fn test_intersects_overlapping() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_intersects_touching_edges_is_false() {
        let a = Rect::new(0, 0, 10, 10);
        let right_neighbor = Rect::new(10, 0, 10, 10);
        let below_neighbor = Rect::new(0, 10, 10, 10);

        assert!(!a.intersects(&right_neighbor));
        assert!(!a.intersects(&below_neighbor));
    }

    #[test]
    fn test_contains() {
        let outer = Rect::new(0, 0, 100, 100);
        let inner = Rect::new(90, 90, 10, 10);
        let spilling = Rect::new(95, 95, 10, 10);

        assert!(outer.contains(&inner));
        assert!(!outer.contains(&spilling));
        assert!(outer.contains(&outer));
    }
}
