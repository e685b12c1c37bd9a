//! Geometry kernel
//!
//! Pure 2D math shared by the shape model, the renderers and the editor:
//! vector arithmetic, arrowhead offsets, Bezier evaluation and subdivision
//! counts, and axis-aligned bounding boxes. Nothing here holds state.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// Subdivision step (in pixels) for cubic Bezier segments.
pub const CUBIC_STEP_PX: f64 = 10.0;

/// Subdivision step (in pixels) for quadratic arcs.
pub const QUADRATIC_STEP_PX: f64 = 20.0;

/// A point (or free vector) in canvas pixel space. Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (*other - *self).length()
    }

    /// Euclidean length when the point is read as a vector.
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Returns this vector rescaled to `length`, or the zero vector when it
    /// has no direction.
    pub fn with_length(&self, length: f64) -> Point {
        let current = self.length();
        if current <= f64::EPSILON {
            return Point::default();
        }
        *self * (length / current)
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Linear interpolation between `self` (t = 0) and `other` (t = 1).
    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
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

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

fn rotate(v: Point, radians: f64) -> Point {
    let (sin, cos) = radians.sin_cos();
    Point::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Direction of `from -> to` rescaled to `length` and rotated by +45 and -45
/// degrees.
///
/// Arrowheads are drawn as two strokes from the tip `to` back to
/// `to - v1` and `to - v2`. A zero-length segment yields two zero vectors so
/// the head collapses onto the tip instead of dividing by zero.
pub fn rotated_offsets(from: Point, to: Point, length: f64) -> (Point, Point) {
    let v = (to - from).with_length(length);
    let quarter = std::f64::consts::FRAC_PI_4;
    (rotate(v, quarter), rotate(v, -quarter))
}

/// The +90/-90 degree variant of [`rotated_offsets`], used to offset the two
/// parallel shaft strokes of a double-line arrow.
pub fn perpendicular_offsets(from: Point, to: Point, length: f64) -> (Point, Point) {
    let v = (to - from).with_length(length);
    (Point::new(-v.y, v.x), Point::new(v.y, -v.x))
}

/// Quadratic Bezier evaluation by repeated linear interpolation.
pub fn quadratic_point(a: Point, b: Point, c: Point, t: f64) -> Point {
    let ab = a.lerp(&b, t);
    let bc = b.lerp(&c, t);
    ab.lerp(&bc, t)
}

/// Cubic Bezier evaluation from `a` to `b` with controls `c` and `d`.
pub fn cubic_point(a: Point, c: Point, d: Point, b: Point, t: f64) -> Point {
    let ac = a.lerp(&c, t);
    let cd = c.lerp(&d, t);
    let db = d.lerp(&b, t);
    let acd = ac.lerp(&cd, t);
    let cdb = cd.lerp(&db, t);
    acd.lerp(&cdb, t)
}

/// Sum of the edge lengths of a control polygon.
pub fn polygon_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
}

/// Upper bound on the pieces of one flattened curve. Curves long enough to
/// exceed it (or with a non-finite control polygon) use exactly this many.
pub const MAX_SUBDIVISIONS: usize = 1024;

fn segment_count(length: f64, step: f64) -> usize {
    let n = (length / step).ceil();
    if n.is_finite() {
        (n.max(1.0) as usize).min(MAX_SUBDIVISIONS)
    } else {
        MAX_SUBDIVISIONS
    }
}

/// Number of straight pieces used to approximate a quadratic arc.
pub fn quadratic_segments(a: Point, b: Point, c: Point) -> usize {
    segment_count(polygon_length(&[a, b, c]), QUADRATIC_STEP_PX)
}

/// Number of straight pieces used to approximate a cubic segment.
pub fn cubic_segments(a: Point, c: Point, d: Point, b: Point) -> usize {
    segment_count(polygon_length(&[a, c, d, b]), CUBIC_STEP_PX)
}

/// Flattens a quadratic arc into a polyline, both endpoints included.
pub fn flatten_quadratic(a: Point, b: Point, c: Point) -> Vec<Point> {
    let n = quadratic_segments(a, b, c);
    (0..=n)
        .map(|i| quadratic_point(a, b, c, i as f64 / n as f64))
        .collect()
}

/// Flattens a cubic segment into a polyline, both endpoints included.
pub fn flatten_cubic(a: Point, c: Point, d: Point, b: Point) -> Vec<Point> {
    let n = cubic_segments(a, c, d, b);
    (0..=n)
        .map(|i| cubic_point(a, c, d, b, i as f64 / n as f64))
        .collect()
}

/// Rounds both coordinates to the nearest multiple of `grid`. A non-positive
/// grid leaves the point untouched.
pub fn snap_to_grid(p: Point, grid: f64) -> Point {
    if grid <= 0.0 {
        return p;
    }
    Point::new((p.x / grid).round() * grid, (p.y / grid).round() * grid)
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Builds a box from two arbitrary corners.
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Bounds::new(*first, *first);
        for p in iter {
            bounds.include(*p);
        }
        Some(bounds)
    }

    pub fn include(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grows the box by `margin` on every side.
    pub fn expand(&self, margin: f64) -> Bounds {
        Bounds {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Scales every coordinate by `factor` (document scale to pixels).
    pub fn scaled(&self, factor: f64) -> Bounds {
        Bounds {
            min_x: self.min_x * factor,
            min_y: self.min_y * factor,
            max_x: self.max_x * factor,
            max_y: self.max_y * factor,
        }
    }
}
