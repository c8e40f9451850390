use std::ops::{Add, Mul, Sub};

/// A location in document space.
///
/// Path command fields are integers, but everything derived from them
/// (sampled curve points, arc centres, vertex buffers) is `f32`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0., y: 0. };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Reflect this point through `center`
    pub fn reflect_about(&self, center: Point) -> Self {
        Self::new(2. * center.x - self.x, 2. * center.y - self.y)
    }

    pub fn distance(&self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
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

impl Mul<f32> for Point {
    type Output = Point;

    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}
