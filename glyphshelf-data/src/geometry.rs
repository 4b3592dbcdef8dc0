use std::ops::{Add, Neg, Sub};

/// An integer pixel coordinate. The y axis points down.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate, growing downwards.
    pub y: i32,
}

impl Point {
    /// The origin.
    pub const ZERO: Point = Point { x: 0, y: 0 };

    /// A point at `(x, y)`.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// An integer pixel rectangle spanning `min` (inclusive) to `max` (exclusive).
///
/// A rectangle whose `max` does not exceed its `min` on either axis is empty;
/// such rectangles have zero width, height and area.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Inclusive top-left corner.
    pub min: Point,
    /// Exclusive bottom-right corner.
    pub max: Point,
}

impl Rect {
    /// A rectangle from `(x0, y0)` inclusive to `(x1, y1)` exclusive.
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0, y0),
            max: Point::new(x1, y1),
        }
    }

    /// Creates a rectangle from its top-left corner and size.
    pub const fn from_origin_size(origin: Point, width: i32, height: i32) -> Self {
        Self::new(origin.x, origin.y, origin.x + width, origin.y + height)
    }

    /// Horizontal extent, `max.x - min.x`.
    pub fn width(&self) -> i32 {
        (self.max.x - self.min.x).max(0)
    }

    /// Vertical extent, `max.y - min.y`.
    pub fn height(&self) -> i32 {
        (self.max.y - self.min.y).max(0)
    }

    /// Width and height as a point.
    pub fn size(&self) -> Point {
        Point::new(self.width(), self.height())
    }

    /// Number of pixels covered by the rectangle.
    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// `true` when the rectangle encloses no pixels.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Returns true if both rectangles share at least one pixel.
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Returns true if `other` lies entirely inside this rectangle.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }

    /// The rectangle moved by `delta`.
    pub fn translate(&self, delta: Point) -> Rect {
        Rect {
            min: self.min + delta,
            max: self.max + delta,
        }
    }
}
