//! Geometry value types shared by draw operations and replay state.

use serde::{Deserialize, Serialize};

/// A point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// X position of the left edge.
    pub x: f32,
    /// Y position of the top edge.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const EMPTY: Self = Self::from_xywh(0.0, 0.0, 0.0, 0.0);

    /// A rectangle large enough to stand in for "no clip applied yet".
    pub const UNBOUNDED: Self = Self::from_xywh(-f32::MAX / 2.0, -f32::MAX / 2.0, f32::MAX, f32::MAX);

    /// Create a rectangle from position and size.
    #[must_use]
    pub const fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Whether the rectangle has zero (or negative) area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is within this rectangle (edges included).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Bounding union of two rectangles; an empty rect contributes
    /// nothing.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::from_xywh(x, y, right - x, bottom - y)
    }

    /// Intersection of two rectangles, or `None` when they do not overlap.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right > x && bottom > y {
            Some(Self::from_xywh(x, y, right - x, bottom - y))
        } else {
            None
        }
    }
}

/// A row-major 2x3 affine transform.
///
/// Maps `(x, y)` to `(sx*x + kx*y + tx, ky*x + sy*y + ty)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    /// Horizontal scale.
    pub sx: f32,
    /// Horizontal skew.
    pub kx: f32,
    /// Horizontal translation.
    pub tx: f32,
    /// Vertical skew.
    pub ky: f32,
    /// Vertical scale.
    pub sy: f32,
    /// Vertical translation.
    pub ty: f32,
}

impl Matrix {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        sx: 1.0,
        kx: 0.0,
        tx: 0.0,
        ky: 0.0,
        sy: 1.0,
        ty: 0.0,
    };

    /// A pure translation.
    #[must_use]
    pub const fn translation(dx: f32, dy: f32) -> Self {
        Self {
            sx: 1.0,
            kx: 0.0,
            tx: dx,
            ky: 0.0,
            sy: 1.0,
            ty: dy,
        }
    }

    /// A pure scale about the origin.
    #[must_use]
    pub const fn scaling(sx: f32, sy: f32) -> Self {
        Self {
            sx,
            kx: 0.0,
            tx: 0.0,
            ky: 0.0,
            sy,
            ty: 0.0,
        }
    }

    /// A rotation about the origin.
    #[must_use]
    pub fn rotation(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            sx: cos,
            kx: -sin,
            tx: 0.0,
            ky: sin,
            sy: cos,
            ty: 0.0,
        }
    }

    /// Whether this is the identity transform.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Compose with another transform, applying `other` first.
    ///
    /// `a.concat(&b)` maps a point the way `a` maps `b`'s output, which is
    /// the order a canvas accumulates transforms in.
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        Self {
            sx: self.sx * other.sx + self.kx * other.ky,
            kx: self.sx * other.kx + self.kx * other.sy,
            tx: self.sx * other.tx + self.kx * other.ty + self.tx,
            ky: self.ky * other.sx + self.sy * other.ky,
            sy: self.ky * other.kx + self.sy * other.sy,
            ty: self.ky * other.tx + self.sy * other.ty + self.ty,
        }
    }

    /// Map a point through this transform.
    #[must_use]
    pub fn map_point(&self, point: Point) -> Point {
        Point::new(
            self.sx * point.x + self.kx * point.y + self.tx,
            self.ky * point.x + self.sy * point.y + self.ty,
        )
    }

    /// Map a rectangle and return the bounding box of the mapped corners.
    #[must_use]
    pub fn map_rect(&self, rect: &Rect) -> Rect {
        let corners = [
            self.map_point(Point::new(rect.x, rect.y)),
            self.map_point(Point::new(rect.right(), rect.y)),
            self.map_point(Point::new(rect.x, rect.bottom())),
            self.map_point(Point::new(rect.right(), rect.bottom())),
        ];
        let mut min_x = corners[0].x;
        let mut min_y = corners[0].y;
        let mut max_x = corners[0].x;
        let mut max_y = corners[0].y;
        for corner in &corners[1..] {
            min_x = min_x.min(corner.x);
            min_y = min_y.min(corner.y);
            max_x = max_x.max(corner.x);
            max_y = max_y.max(corner.y);
        }
        Rect::from_xywh(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Invert the transform, or `None` when it is degenerate.
    #[must_use]
    pub fn invert(&self) -> Option<Self> {
        let det = self.sx * self.sy - self.kx * self.ky;
        if det.abs() < f32::EPSILON {
            return None;
        }
        Some(Self {
            sx: self.sy / det,
            kx: -self.kx / det,
            tx: (self.kx * self.ty - self.sy * self.tx) / det,
            ky: -self.ky / det,
            sy: self.sx / det,
            ty: (self.ky * self.tx - self.sx * self.ty) / det,
        })
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}
