//! Shape model: the tagged shape type, its defaults, and per-type geometry
//! rules (bounding boxes, resizability, transforms).

use lyon::geom::euclid::default::{Point2D, Transform2D};
use sketchkit_core::{Bounds, ParseError, Point};

mod document;
mod shape_type;
mod style;

pub use document::{CanvasMeta, Document, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
pub use shape_type::{PointCount, ShapeType};
pub use style::{Rgb, ShapeColor, StrokeWidth};

/// Side length of the fixed footprint of `star`/`check`/`done` icons.
pub const ICON_SIZE: f64 = 20.0;

/// Measures rendered text. Text is the one shape whose extent depends on the
/// drawing surface, so bounding boxes delegate to whichever surface (or font
/// cache) is active.
pub trait TextMetrics {
    /// Advance width of `text` in pixels at `font_size`.
    fn text_width(&self, text: &str, font_size: f64) -> f64;
}

/// One vertex of a shape, optionally carrying the two control points of the
/// cubic segment that ends at it.
///
/// `c` is the first control of the incoming segment (it falls back to the
/// previous vertex) and `d` the second (it falls back to this vertex).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    pub pos: Point,
    pub c: Option<Point>,
    pub d: Option<Point>,
}

impl Vertex {
    pub fn new(x: f64, y: f64) -> Self {
        Self::at(Point::new(x, y))
    }

    pub fn at(pos: Point) -> Self {
        Self {
            pos,
            c: None,
            d: None,
        }
    }

    pub fn with_c(mut self, c: Point) -> Self {
        self.c = Some(c);
        self
    }

    pub fn with_d(mut self, d: Point) -> Self {
        self.d = Some(d);
        self
    }

    pub fn is_curved(&self) -> bool {
        self.c.is_some() || self.d.is_some()
    }

    /// Applies `f` to the vertex and both control points.
    pub fn map(&mut self, mut f: impl FnMut(Point) -> Point) {
        self.pos = f(self.pos);
        self.c = self.c.map(&mut f);
        self.d = self.d.map(&mut f);
    }
}

/// One drawable piece of a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line(Point, Point),
    /// from, control 1, control 2, to
    Cubic(Point, Point, Point, Point),
}

impl Segment {
    /// Resolves the segment ending at `cur` with fallbacks applied.
    pub fn between(prev: &Vertex, cur: &Vertex) -> Segment {
        if cur.is_curved() {
            Segment::Cubic(
                prev.pos,
                cur.c.unwrap_or(prev.pos),
                cur.d.unwrap_or(cur.pos),
                cur.pos,
            )
        } else {
            Segment::Line(prev.pos, cur.pos)
        }
    }

    pub fn start(&self) -> Point {
        match self {
            Segment::Line(a, _) | Segment::Cubic(a, _, _, _) => *a,
        }
    }

    pub fn end(&self) -> Point {
        match self {
            Segment::Line(_, b) | Segment::Cubic(_, _, _, b) => *b,
        }
    }

    /// The control-polygon edge leaving the start, as `(towards, start)`.
    /// Skips degenerate controls so an arrowhead still has a direction.
    pub fn start_direction(&self) -> (Point, Point) {
        match *self {
            Segment::Line(a, b) => (b, a),
            Segment::Cubic(a, c1, c2, b) => {
                let towards = [c1, c2, b].into_iter().find(|p| *p != a).unwrap_or(b);
                (towards, a)
            }
        }
    }

    /// The control-polygon edge arriving at the end, as `(from, end)`.
    pub fn end_direction(&self) -> (Point, Point) {
        match *self {
            Segment::Line(a, b) => (a, b),
            Segment::Cubic(a, c1, c2, b) => {
                let from = [c2, c1, a].into_iter().find(|p| *p != b).unwrap_or(a);
                (from, b)
            }
        }
    }
}

/// Arrowhead flags of a freehand path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PathArrows {
    pub start: bool,
    pub end: bool,
}

impl PathArrows {
    pub const NONE: PathArrows = PathArrows {
        start: false,
        end: false,
    };

    pub fn is_none(&self) -> bool {
        !self.start && !self.end
    }

    /// Wire form of the `arrow` field; `None` when no head is set.
    pub fn name(&self) -> Option<&'static str> {
        match (self.start, self.end) {
            (false, false) => None,
            (true, false) => Some("start"),
            (false, true) => Some("end"),
            (true, true) => Some("both"),
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "start" => PathArrows {
                start: true,
                end: false,
            },
            "end" => PathArrows {
                start: false,
                end: true,
            },
            "both" => PathArrows {
                start: true,
                end: true,
            },
            _ => PathArrows::NONE,
        }
    }
}

/// Shape variant. Only `text` and `path` carry extra data.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Line,
    Arrow,
    BiArrow,
    DArrow,
    Arc,
    ArcArrow,
    ArcBiArrow,
    Rect,
    RectFill,
    Ellipse,
    EllipseFill,
    Star,
    Check,
    Done,
    Text(String),
    Path(PathArrows),
}

impl ShapeKind {
    /// Default variant for a type: empty text, arrowless path.
    pub fn plain(shape_type: ShapeType) -> Self {
        match shape_type {
            ShapeType::Line => ShapeKind::Line,
            ShapeType::Arrow => ShapeKind::Arrow,
            ShapeType::BiArrow => ShapeKind::BiArrow,
            ShapeType::DArrow => ShapeKind::DArrow,
            ShapeType::Arc => ShapeKind::Arc,
            ShapeType::ArcArrow => ShapeKind::ArcArrow,
            ShapeType::ArcBiArrow => ShapeKind::ArcBiArrow,
            ShapeType::Rect => ShapeKind::Rect,
            ShapeType::RectFill => ShapeKind::RectFill,
            ShapeType::Ellipse => ShapeKind::Ellipse,
            ShapeType::EllipseFill => ShapeKind::EllipseFill,
            ShapeType::Star => ShapeKind::Star,
            ShapeType::Check => ShapeKind::Check,
            ShapeType::Done => ShapeKind::Done,
            ShapeType::Text => ShapeKind::Text(String::new()),
            ShapeType::Path => ShapeKind::Path(PathArrows::NONE),
        }
    }

    pub fn shape_type(&self) -> ShapeType {
        match self {
            ShapeKind::Line => ShapeType::Line,
            ShapeKind::Arrow => ShapeType::Arrow,
            ShapeKind::BiArrow => ShapeType::BiArrow,
            ShapeKind::DArrow => ShapeType::DArrow,
            ShapeKind::Arc => ShapeType::Arc,
            ShapeKind::ArcArrow => ShapeType::ArcArrow,
            ShapeKind::ArcBiArrow => ShapeType::ArcBiArrow,
            ShapeKind::Rect => ShapeType::Rect,
            ShapeKind::RectFill => ShapeType::RectFill,
            ShapeKind::Ellipse => ShapeType::Ellipse,
            ShapeKind::EllipseFill => ShapeType::EllipseFill,
            ShapeKind::Star => ShapeType::Star,
            ShapeKind::Check => ShapeType::Check,
            ShapeKind::Done => ShapeType::Done,
            ShapeKind::Text(_) => ShapeType::Text,
            ShapeKind::Path(_) => ShapeType::Path,
        }
    }
}

/// A drawable annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub color: ShapeColor,
    pub width: StrokeWidth,
    pub points: Vec<Vertex>,
}

impl Shape {
    /// Builds a shape, checking the point count its type requires. Extra
    /// points on fixed-count types are dropped.
    pub fn try_new(kind: ShapeKind, mut points: Vec<Vertex>) -> Result<Self, ParseError> {
        let shape_type = kind.shape_type();
        let expected = shape_type.min_points();
        if points.len() < expected {
            return Err(ParseError::PointCount {
                shape: shape_type.name().to_string(),
                expected,
                found: points.len(),
            });
        }
        if let PointCount::Fixed(n) = shape_type.point_count() {
            points.truncate(n);
        }
        Ok(Self {
            kind,
            color: ShapeColor::default(),
            width: StrokeWidth::default(),
            points,
        })
    }

    /// Shape of a fixed-count type from plain points.
    pub fn from_points(shape_type: ShapeType, points: &[Point]) -> Result<Self, ParseError> {
        Self::try_new(
            ShapeKind::plain(shape_type),
            points.iter().copied().map(Vertex::at).collect(),
        )
    }

    pub fn line(a: Point, b: Point) -> Self {
        Self::two_point(ShapeKind::Line, a, b)
    }

    pub fn rect(a: Point, b: Point) -> Self {
        Self::two_point(ShapeKind::Rect, a, b)
    }

    pub fn ellipse(a: Point, b: Point) -> Self {
        Self::two_point(ShapeKind::Ellipse, a, b)
    }

    fn two_point(kind: ShapeKind, a: Point, b: Point) -> Self {
        Self {
            kind,
            color: ShapeColor::default(),
            width: StrokeWidth::default(),
            points: vec![Vertex::at(a), Vertex::at(b)],
        }
    }

    pub fn text(anchor: Point, text: impl Into<String>) -> Self {
        Self {
            kind: ShapeKind::Text(text.into()),
            color: ShapeColor::default(),
            width: StrokeWidth::default(),
            points: vec![Vertex::at(anchor)],
        }
    }

    /// Freehand path; an empty vertex list is rejected.
    pub fn path(points: Vec<Vertex>) -> Result<Self, ParseError> {
        Self::try_new(ShapeKind::Path(PathArrows::NONE), points)
    }

    pub fn with_color(mut self, color: ShapeColor) -> Self {
        self.color = color;
        self
    }

    pub fn with_width(mut self, width: StrokeWidth) -> Self {
        self.width = width;
        self
    }

    pub fn shape_type(&self) -> ShapeType {
        self.kind.shape_type()
    }

    pub fn is_resizable(&self) -> bool {
        self.shape_type().is_resizable()
    }

    pub fn text_content(&self) -> Option<&str> {
        match &self.kind {
            ShapeKind::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn anchor(&self) -> Point {
        self.points.first().map(|v| v.pos).unwrap_or_default()
    }

    /// Min/max over vertex positions; control points are excluded.
    pub fn vertex_bounds(&self) -> Bounds {
        Bounds::from_points(self.points.iter().map(|v| &v.pos))
            .unwrap_or_else(|| Bounds::new(Point::default(), Point::default()))
    }

    /// Per-type bounding box used for hit-testing, selection and handles.
    pub fn bounding_box(&self, metrics: &dyn TextMetrics) -> Bounds {
        let anchor = self.anchor();
        if self.shape_type().is_icon() {
            return Bounds::new(
                anchor,
                Point::new(anchor.x + ICON_SIZE, anchor.y + ICON_SIZE),
            );
        }
        match &self.kind {
            ShapeKind::Text(text) => {
                let size = self.width.font_size();
                let w = metrics.text_width(text, size);
                Bounds::new(
                    Point::new(anchor.x, anchor.y - size),
                    Point::new(anchor.x + w, anchor.y),
                )
            }
            _ => self.vertex_bounds(),
        }
    }

    /// Segments of a `path` shape (empty for every other type).
    pub fn path_segments(&self) -> Vec<Segment> {
        if !matches!(self.kind, ShapeKind::Path(_)) {
            return Vec::new();
        }
        self.points
            .windows(2)
            .map(|w| Segment::between(&w[0], &w[1]))
            .collect()
    }

    /// Applies an affine transform to every vertex and control point.
    pub fn transform(&mut self, t: &Transform2D<f64>) {
        for v in &mut self.points {
            v.map(|p| {
                let q = t.transform_point(Point2D::new(p.x, p.y));
                Point::new(q.x, q.y)
            });
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        for v in &mut self.points {
            v.map(|p| p.translated(dx, dy));
        }
    }

    /// Anisotropic scale keeping `anchor` fixed. Negative factors mirror.
    pub fn scale_about(&mut self, anchor: Point, sx: f64, sy: f64) {
        if sx == 1.0 && sy == 1.0 {
            return;
        }
        let t = Transform2D::translation(-anchor.x, -anchor.y)
            .then_scale(sx, sy)
            .then_translate(lyon::geom::euclid::default::Vector2D::new(anchor.x, anchor.y));
        self.transform(&t);
    }
}
