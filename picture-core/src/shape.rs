//! Closed shapes drawable and clippable by path-style operations.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// A closed shape.
///
/// The closed variant set keeps replay and hit-testing exhaustive matches;
/// freeform path verbs are out of scope for the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "data")]
pub enum Shape {
    /// An axis-aligned rectangle.
    Rect(Rect),
    /// An ellipse inscribed in a rectangle.
    Oval(Rect),
    /// A closed polygon (last vertex connects back to the first).
    Polygon(Vec<Point>),
}

impl Shape {
    /// Bounding box of the shape.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Rect(rect) | Self::Oval(rect) => *rect,
            Self::Polygon(points) => polygon_bounds(points),
        }
    }

    /// Check if a point is inside the shape.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        match self {
            Self::Rect(rect) => rect.contains(point),
            Self::Oval(rect) => oval_contains(rect, point),
            Self::Polygon(points) => polygon_contains(points, point),
        }
    }
}

fn polygon_bounds(points: &[Point]) -> Rect {
    let Some(first) = points.first() else {
        return Rect::EMPTY;
    };
    let mut min_x = first.x;
    let mut min_y = first.y;
    let mut max_x = first.x;
    let mut max_y = first.y;
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Rect::from_xywh(min_x, min_y, max_x - min_x, max_y - min_y)
}

fn oval_contains(rect: &Rect, point: Point) -> bool {
    if rect.is_empty() {
        return false;
    }
    let rx = rect.width / 2.0;
    let ry = rect.height / 2.0;
    let dx = (point.x - (rect.x + rx)) / rx;
    let dy = (point.y - (rect.y + ry)) / ry;
    dx * dx + dy * dy <= 1.0
}

/// Even-odd crossing test.
fn polygon_contains(points: &[Point], point: Point) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut prev = points[points.len() - 1];
    for &p in points {
        if (p.y > point.y) != (prev.y > point.y) {
            let x_cross = (prev.x - p.x) * (point.y - p.y) / (prev.y - p.y) + p.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        prev = p;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oval_contains_center_not_corner() {
        let oval = Shape::Oval(Rect::from_xywh(0.0, 0.0, 10.0, 10.0));
        assert!(oval.contains(Point::new(5.0, 5.0)));
        // Corner of the bounding box is outside the inscribed ellipse.
        assert!(!oval.contains(Point::new(0.5, 0.5)));
    }

    #[test]
    fn test_polygon_contains() {
        let triangle = Shape::Polygon(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 10.0),
        ]);
        assert!(triangle.contains(Point::new(5.0, 2.0)));
        assert!(!triangle.contains(Point::new(0.5, 9.0)));
    }

    #[test]
    fn test_polygon_bounds() {
        let triangle = Shape::Polygon(vec![
            Point::new(-2.0, 1.0),
            Point::new(4.0, 3.0),
            Point::new(0.0, 8.0),
        ]);
        assert_eq!(triangle.bounds(), Rect::from_xywh(-2.0, 1.0, 6.0, 7.0));
    }

    #[test]
    fn test_degenerate_polygon_never_contains() {
        let line = Shape::Polygon(vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)]);
        assert!(!line.contains(Point::new(2.5, 2.5)));
        assert_eq!(Shape::Polygon(Vec::new()).bounds(), Rect::EMPTY);
    }
}
