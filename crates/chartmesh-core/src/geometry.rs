// File: crates/chartmesh-core/src/geometry.rs
// Summary: Lightweight geometry helpers for chart-space math.
// Notes:
// - Chart space has its origin at the bottom-left of the chart and y grows
//   upward. Backends with a top-left origin flip y when rasterizing.

/// A point (or vector) in chart space, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn lerp(self, to: Self, t: f32) -> Self {
        Self::new(lerp(self.x, to.x, t), lerp(self.y, to.y, t))
    }

    pub fn normalized(self) -> Self {
        let len = self.length();
        if len <= f32::EPSILON {
            Self::ZERO
        } else {
            Self::new(self.x / len, self.y / len)
        }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Add for Point2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f32> for Point2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Width/height pair, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle anchored at its bottom-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Build from two opposite corners in any order.
    pub fn from_corners(a: Point2, b: Point2) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    pub fn right(&self) -> f32 { self.x + self.width }
    pub fn top(&self) -> f32 { self.y + self.height }
    pub fn origin(&self) -> Point2 { Point2::new(self.x, self.y) }

    pub fn center(&self) -> Point2 {
        Point2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Positive, finite area.
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.x.is_finite() && self.y.is_finite()
    }

    pub fn contains(&self, p: Point2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.top()
    }

    pub fn clamp_point(&self, p: Point2) -> Point2 {
        Point2::new(clamp(p.x, self.x, self.right()), clamp(p.y, self.y, self.top()))
    }
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Angle of `dir` in degrees measured clockwise from "up", in `[0, 360)`.
///
/// The unsigned angle between up and `dir` is disambiguated with the sign of
/// the 2D cross product: a positive z means `dir` lies counter-clockwise of up.
pub fn angle_from_up(dir: Point2) -> f32 {
    let up = Point2::new(0.0, 1.0);
    let len = dir.length();
    if len <= f32::EPSILON {
        return 0.0;
    }
    let cos = clamp((up.x * dir.x + up.y * dir.y) / len, -1.0, 1.0);
    let unsigned = cos.acos().to_degrees();
    let cross_z = up.x * dir.y - up.y * dir.x;
    let signed = if cross_z > 0.0 { -unsigned } else { unsigned };
    (signed + 360.0) % 360.0
}

/// Point at `radius` from `center`, `degrees` clockwise from up.
pub fn polar_point(center: Point2, radius: f32, degrees: f32) -> Point2 {
    let rad = degrees.to_radians();
    Point2::new(center.x + radius * rad.sin(), center.y + radius * rad.cos())
}
