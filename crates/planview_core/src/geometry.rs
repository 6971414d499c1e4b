//! Core Geometry Types
//!
//! Points, sizes, rectangles and the 2D affine matrix used to place a plan
//! on screen. All coordinates are `f32` in drawing units unless stated
//! otherwise.

// ─────────────────────────────────────────────────────────────────────────────
// Point / Size / Rect
// ─────────────────────────────────────────────────────────────────────────────

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Convert to a Rect at the origin (0, 0)
    pub const fn to_rect(self) -> Rect {
        Rect {
            origin: Point::ZERO,
            size: self,
        }
    }

    /// True when either side is zero, negative or not a number
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

impl From<Size> for Rect {
    fn from(size: Size) -> Self {
        size.to_rect()
    }
}

/// 2D rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x <= self.right()
            && point.y >= self.origin.y
            && point.y <= self.bottom()
    }

    /// The four corners, clockwise from the origin
    pub fn corners(&self) -> [Point; 4] {
        [
            self.origin,
            Point::new(self.right(), self.origin.y),
            Point::new(self.right(), self.bottom()),
            Point::new(self.origin.x, self.bottom()),
        ]
    }

    /// Smallest rect containing every point. `None` for an empty iterator.
    pub fn bounding(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    pub fn is_finite(&self) -> bool {
        self.origin.x.is_finite()
            && self.origin.y.is_finite()
            && self.size.width.is_finite()
            && self.size.height.is_finite()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Affine2D
// ─────────────────────────────────────────────────────────────────────────────

/// 2D affine transformation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2D {
    /// Matrix elements [a, b, c, d, tx, ty]
    /// | a  c  tx |
    /// | b  d  ty |
    /// | 0  0   1 |
    pub elements: [f32; 6],
}

impl Default for Affine2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine2D {
    pub const IDENTITY: Affine2D = Affine2D {
        elements: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    pub fn translation(x: f32, y: f32) -> Self {
        Self {
            elements: [1.0, 0.0, 0.0, 1.0, x, y],
        }
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            elements: [sx, 0.0, 0.0, sy, 0.0, 0.0],
        }
    }

    /// Uniform scale followed by a translation:
    ///
    /// ```text
    /// | scale   0      tx |
    /// | 0       scale  ty |
    /// | 0       0      1  |
    /// ```
    pub fn scale_translate(scale: f32, tx: f32, ty: f32) -> Self {
        Self {
            elements: [scale, 0.0, 0.0, scale, tx, ty],
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn determinant(&self) -> f32 {
        let [a, b, c, d, _, _] = self.elements;
        a * d - b * c
    }

    pub fn is_finite(&self) -> bool {
        self.elements.iter().all(|e| e.is_finite())
    }

    /// Finite with a non-zero determinant
    pub fn is_invertible(&self) -> bool {
        let det = self.determinant();
        self.is_finite() && det.is_finite() && det != 0.0
    }

    pub fn transform_point(&self, point: Point) -> Point {
        let [a, b, c, d, tx, ty] = self.elements;
        Point::new(
            a * point.x + c * point.y + tx,
            b * point.x + d * point.y + ty,
        )
    }

    /// Map a rectangle through the matrix and return the bounds of the
    /// mapped corners.
    pub fn map_rect(&self, rect: Rect) -> Rect {
        let corners = rect.corners().map(|p| self.transform_point(p));
        Rect::bounding(corners).unwrap_or(Rect::ZERO)
    }

    /// Concatenate this transform with another (self * other)
    /// The resulting transform first applies `other`, then `self`.
    pub fn then(&self, other: &Affine2D) -> Affine2D {
        let [a1, b1, c1, d1, tx1, ty1] = self.elements;
        let [a2, b2, c2, d2, tx2, ty2] = other.elements;

        Affine2D {
            elements: [
                a1 * a2 + c1 * b2,
                b1 * a2 + d1 * b2,
                a1 * c2 + c1 * d2,
                b1 * c2 + d1 * d2,
                a1 * tx2 + c1 * ty2 + tx1,
                b1 * tx2 + d1 * ty2 + ty1,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_translate_layout() {
        let m = Affine2D::scale_translate(2.0, 10.0, 5.0);
        assert_eq!(m.elements, [2.0, 0.0, 0.0, 2.0, 10.0, 5.0]);
        assert_eq!(m.transform_point(Point::new(1.0, 1.0)), Point::new(12.0, 7.0));
    }

    #[test]
    fn test_scale_translate_matches_composition() {
        let composed = Affine2D::translation(10.0, 5.0).then(&Affine2D::scale(2.0, 2.0));
        assert_eq!(composed, Affine2D::scale_translate(2.0, 10.0, 5.0));
    }

    #[test]
    fn test_map_rect_identity() {
        let rect = Rect::new(0.0, 0.0, 100.0, 200.0);
        assert_eq!(Affine2D::IDENTITY.map_rect(rect), rect);
    }

    #[test]
    fn test_map_rect_negative_scale_normalizes() {
        // Mirroring flips the corners; the mapped rect is still well-formed
        let mapped = Affine2D::scale(-1.0, 1.0).map_rect(Rect::new(0.0, 0.0, 10.0, 20.0));
        assert_eq!(mapped, Rect::new(-10.0, 0.0, 10.0, 20.0));
    }

    #[test]
    fn test_invertible() {
        assert!(Affine2D::IDENTITY.is_invertible());
        assert!(!Affine2D::scale_translate(0.0, 1.0, 1.0).is_invertible());
        assert!(!Affine2D::scale_translate(f32::NAN, 0.0, 0.0).is_invertible());
        assert!(!Affine2D::translation(f32::INFINITY, 0.0).is_invertible());
    }

    #[test]
    fn test_size_is_empty() {
        assert!(Size::ZERO.is_empty());
        assert!(Size::new(10.0, 0.0).is_empty());
        assert!(!Size::new(1.0, 1.0).is_empty());
    }

    #[test]
    fn test_bounding_empty() {
        assert!(Rect::bounding(std::iter::empty()).is_none());
    }
}
