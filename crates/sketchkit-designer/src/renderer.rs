//! Shared shape rendering.
//!
//! Every shape type has exactly one drawing routine here, written against the
//! [`Surface`] trait. The rasterizer and the vector backend both implement
//! `Surface`, so the two outputs come from the same geometry.
//!
//! Document coordinates are multiplied by the render scale; arrowheads and
//! the `star`/`check`/`done` glyphs keep fixed pixel sizes.

use lyon::math::point;
use lyon::path::Path;
use sketchkit_core::{
    flatten_cubic, flatten_quadratic, perpendicular_offsets, rotated_offsets, Bounds, Point,
};

use crate::model::{Document, Rgb, Segment, Shape, ShapeKind, TextMetrics};

/// Arrowhead stroke length for single and arc arrows.
pub const ARROW_HEAD_LENGTH: f64 = 6.0;
/// Arrowhead stroke length for the double-line arrow.
pub const DARROW_HEAD_LENGTH: f64 = 8.0;
/// Offset of each double-line shaft from the center line.
pub const DARROW_SHAFT_OFFSET: f64 = 2.0;
/// Glyph drawn inside the `done` stamp.
pub const DONE_GLYPH: &str = "済";
/// Font size of the `done` glyph.
pub const DONE_FONT_SIZE: f64 = 14.0;

/// Drawing capabilities a backend provides.
pub trait Surface: TextMetrics {
    fn set_stroke_color(&mut self, color: Rgb);
    fn set_fill_color(&mut self, color: Rgb);
    fn set_line_width(&mut self, width: f64);

    fn stroke_path(&mut self, path: &Path);
    fn fill_path(&mut self, path: &Path);

    fn stroke_rect(&mut self, bounds: Bounds);
    fn fill_rect(&mut self, bounds: Bounds);

    /// Ellipse inscribed in `bounds`.
    fn stroke_ellipse(&mut self, bounds: Bounds);
    fn fill_ellipse(&mut self, bounds: Bounds);

    /// Fills `text` with its alphabetic baseline starting at `at`.
    fn draw_text(&mut self, text: &str, at: Point, font_size: f64);

    /// Whether `stroke_path` draws Bezier events natively. When `false` the
    /// engine flattens curves before handing paths over.
    fn supports_curves(&self) -> bool {
        true
    }

    fn stroke_polyline(&mut self, points: &[Point], closed: bool) {
        let mut outline = Outline::new(true);
        if let Some((first, rest)) = points.split_first() {
            outline.move_to(*first);
            for p in rest {
                outline.line_to(*p);
            }
            if closed {
                outline.close();
            }
        }
        self.stroke_path(&outline.build());
    }
}

/// Render-time parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Multiplier from document units to surface pixels.
    pub scale: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

/// Coordinates beyond this magnitude are pinned to it before they reach a
/// path builder, so every emitted point is finite in `f32`.
pub const MAX_DRAW_COORD: f64 = 1.0e7;

pub(crate) fn clamp_coord(v: f64) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(-MAX_DRAW_COORD, MAX_DRAW_COORD) as f32
    }
}

fn to_lyon(p: Point) -> lyon::math::Point {
    point(clamp_coord(p.x), clamp_coord(p.y))
}

/// Path builder that keeps Bezier events or flattens them with the kernel's
/// subdivision rules.
pub struct Outline {
    builder: lyon::path::path::Builder,
    native_curves: bool,
    current: Option<Point>,
}

impl Outline {
    pub fn new(native_curves: bool) -> Self {
        Self {
            builder: Path::builder(),
            native_curves,
            current: None,
        }
    }

    pub fn move_to(&mut self, p: Point) {
        if self.current.is_some() {
            self.builder.end(false);
        }
        self.builder.begin(to_lyon(p));
        self.current = Some(p);
    }

    pub fn line_to(&mut self, p: Point) {
        if self.current.is_none() {
            self.move_to(p);
            return;
        }
        self.builder.line_to(to_lyon(p));
        self.current = Some(p);
    }

    pub fn quad_to(&mut self, ctrl: Point, to: Point) {
        let Some(from) = self.current else {
            self.move_to(to);
            return;
        };
        if self.native_curves {
            self.builder.quadratic_bezier_to(to_lyon(ctrl), to_lyon(to));
            self.current = Some(to);
        } else {
            for p in flatten_quadratic(from, ctrl, to).into_iter().skip(1) {
                self.line_to(p);
            }
        }
    }

    pub fn cubic_to(&mut self, c1: Point, c2: Point, to: Point) {
        let Some(from) = self.current else {
            self.move_to(to);
            return;
        };
        if self.native_curves {
            self.builder.cubic_bezier_to(to_lyon(c1), to_lyon(c2), to_lyon(to));
            self.current = Some(to);
        } else {
            for p in flatten_cubic(from, c1, c2, to).into_iter().skip(1) {
                self.line_to(p);
            }
        }
    }

    pub fn close(&mut self) {
        if self.current.take().is_some() {
            self.builder.end(true);
        }
    }

    pub fn build(mut self) -> Path {
        if self.current.take().is_some() {
            self.builder.end(false);
        }
        self.builder.build()
    }
}

/// Open arrowhead: two strokes from `tip` back along the `from -> tip`
/// direction, rotated +-45 degrees.
fn arrowhead(surface: &mut dyn Surface, from: Point, tip: Point, length: f64) {
    let (v1, v2) = rotated_offsets(from, tip, length);
    surface.stroke_polyline(&[tip - v1, tip, tip - v2], false);
}

fn quadratic_arc(surface: &mut dyn Surface, p: &[Point]) {
    let mut outline = Outline::new(surface.supports_curves());
    outline.move_to(p[0]);
    outline.quad_to(p[1], p[2]);
    surface.stroke_path(&outline.build());
}

fn ellipse(surface: &mut dyn Surface, a: Point, b: Point, fill: bool) {
    let bounds = Bounds::new(a, b);
    if bounds.width() == 0.0 || bounds.height() == 0.0 {
        surface.stroke_polyline(
            &[
                Point::new(bounds.min_x, bounds.min_y),
                Point::new(bounds.max_x, bounds.max_y),
            ],
            false,
        );
    } else if fill {
        surface.fill_ellipse(bounds);
    } else {
        surface.stroke_ellipse(bounds);
    }
}

fn icon_polyline(surface: &mut dyn Surface, at: Point, offsets: &[(f64, f64)], closed: bool) {
    let points: Vec<Point> = offsets
        .iter()
        .map(|(dx, dy)| at.translated(*dx, *dy))
        .collect();
    surface.stroke_polyline(&points, closed);
}

fn star(surface: &mut dyn Surface, at: Point) {
    icon_polyline(
        surface,
        at,
        &[(8.0, -3.0), (14.0, 13.0), (0.0, 2.0), (16.0, 2.0), (2.0, 13.0)],
        true,
    );
}

fn check(surface: &mut dyn Surface, at: Point) {
    icon_polyline(surface, at, &[(0.0, 0.0), (5.0, 7.0), (20.0, 0.0)], false);
}

fn done(surface: &mut dyn Surface, at: Point) {
    surface.draw_text(DONE_GLYPH, at.translated(3.0, 10.0), DONE_FONT_SIZE);
    let center = at.translated(9.0, 5.0);
    surface.stroke_ellipse(Bounds::new(
        center.translated(-8.0, -8.0),
        center.translated(8.0, 8.0),
    ));
}

fn freehand(surface: &mut dyn Surface, shape: &Shape, scale: f64) {
    let ShapeKind::Path(arrows) = &shape.kind else {
        return;
    };
    let segments = shape.path_segments();
    if segments.is_empty() {
        return;
    }
    let s = |p: Point| p * scale;

    let mut outline = Outline::new(surface.supports_curves());
    outline.move_to(s(segments[0].start()));
    for segment in &segments {
        match *segment {
            Segment::Line(_, to) => outline.line_to(s(to)),
            Segment::Cubic(_, c1, c2, to) => outline.cubic_to(s(c1), s(c2), s(to)),
        }
    }
    surface.stroke_path(&outline.build());

    if arrows.start {
        let (towards, start) = segments[0].start_direction();
        arrowhead(surface, s(towards), s(start), ARROW_HEAD_LENGTH);
    }
    if arrows.end {
        if let Some(last) = segments.last() {
            let (from, end) = last.end_direction();
            arrowhead(surface, s(from), s(end), ARROW_HEAD_LENGTH);
        }
    }
}

/// Draws one shape. Color and width are applied once, before the routine.
pub fn render_shape(surface: &mut dyn Surface, shape: &Shape, options: &RenderOptions) {
    let color = shape.color.rgb();
    surface.set_stroke_color(color);
    surface.set_fill_color(color);
    surface.set_line_width(shape.width.line_width());

    let p: Vec<Point> = shape.points.iter().map(|v| v.pos * options.scale).collect();
    let required = shape.shape_type().min_points();
    if p.len() < required {
        tracing::debug!("Skipping {} with {} point(s)", shape.shape_type(), p.len());
        return;
    }

    match &shape.kind {
        ShapeKind::Line => surface.stroke_polyline(&[p[0], p[1]], false),
        ShapeKind::Arrow => {
            surface.stroke_polyline(&[p[0], p[1]], false);
            arrowhead(surface, p[0], p[1], ARROW_HEAD_LENGTH);
        }
        ShapeKind::BiArrow => {
            surface.stroke_polyline(&[p[0], p[1]], false);
            arrowhead(surface, p[0], p[1], ARROW_HEAD_LENGTH);
            arrowhead(surface, p[1], p[0], ARROW_HEAD_LENGTH);
        }
        ShapeKind::DArrow => {
            let (o1, o2) = perpendicular_offsets(p[0], p[1], DARROW_SHAFT_OFFSET);
            surface.stroke_polyline(&[p[0] + o1, p[1] + o1], false);
            surface.stroke_polyline(&[p[0] + o2, p[1] + o2], false);
            arrowhead(surface, p[0], p[1], DARROW_HEAD_LENGTH);
        }
        ShapeKind::Arc => quadratic_arc(surface, &p),
        // Arc heads follow the control-polygon edge, not the exact tangent.
        ShapeKind::ArcArrow => {
            quadratic_arc(surface, &p);
            arrowhead(surface, p[1], p[2], ARROW_HEAD_LENGTH);
        }
        ShapeKind::ArcBiArrow => {
            quadratic_arc(surface, &p);
            arrowhead(surface, p[1], p[2], ARROW_HEAD_LENGTH);
            arrowhead(surface, p[1], p[0], ARROW_HEAD_LENGTH);
        }
        ShapeKind::Rect => surface.stroke_rect(Bounds::new(p[0], p[1])),
        ShapeKind::RectFill => surface.fill_rect(Bounds::new(p[0], p[1])),
        ShapeKind::Ellipse => ellipse(surface, p[0], p[1], false),
        ShapeKind::EllipseFill => ellipse(surface, p[0], p[1], true),
        ShapeKind::Star | ShapeKind::Check | ShapeKind::Done => {
            surface.set_line_width(1.0);
            match shape.kind {
                ShapeKind::Star => star(surface, p[0]),
                ShapeKind::Check => check(surface, p[0]),
                _ => done(surface, p[0]),
            }
        }
        ShapeKind::Text(text) => surface.draw_text(text, p[0], shape.width.font_size()),
        ShapeKind::Path(_) => freehand(surface, shape, options.scale),
    }
}

/// Draws every shape in paint order.
pub fn render_document(surface: &mut dyn Surface, doc: &Document, options: &RenderOptions) {
    for shape in &doc.shapes {
        render_shape(surface, shape, options);
    }
}
