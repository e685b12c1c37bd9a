//! Raster backend and the text-to-PNG rasterizer.
//!
//! [`RasterSurface`] draws onto a `tiny-skia` pixmap; glyphs are rasterized
//! with `rusttype` and blended straight into the premultiplied pixel buffer.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};
use lyon::path::{Event, Path};
use rusttype::{point as rt_point, Scale};
use sketchkit_core::{Bounds, Point, RenderError};
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

use crate::font_manager::FontMetrics;
use crate::model::{Document, Rgb, TextMetrics};
use crate::renderer::{clamp_coord, render_document, RenderOptions, Surface, MAX_DRAW_COORD};
use crate::serialization::decode_strict;

/// Leading line of the rasterizer's failure output.
pub const FAILURE_MARKER: &str = "failed";

fn to_color(c: Rgb) -> Color {
    Color::from_rgba8(c.r, c.g, c.b, 255)
}

/// Converts a lyon path into a tiny-skia path.
fn to_skia_path(path: &Path) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for event in path.iter() {
        match event {
            Event::Begin { at } => pb.move_to(at.x, at.y),
            Event::Line { to, .. } => pb.line_to(to.x, to.y),
            Event::Quadratic { ctrl, to, .. } => pb.quad_to(ctrl.x, ctrl.y, to.x, to.y),
            Event::Cubic {
                ctrl1, ctrl2, to, ..
            } => pb.cubic_to(ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y),
            Event::End { close, .. } => {
                if close {
                    pb.close();
                }
            }
        }
    }
    pb.finish()
}

fn to_rect(b: Bounds) -> Option<Rect> {
    Rect::from_ltrb(
        clamp_coord(b.min_x),
        clamp_coord(b.min_y),
        clamp_coord(b.max_x),
        clamp_coord(b.max_y),
    )
}

/// Pixel surface backed by a `tiny-skia` pixmap.
pub struct RasterSurface {
    pixmap: Pixmap,
    stroke: Rgb,
    fill: Rgb,
    line_width: f32,
    metrics: FontMetrics,
    native_curves: bool,
    anti_alias: bool,
}

impl RasterSurface {
    /// Allocates a transparent surface.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let pixmap =
            Pixmap::new(width, height).ok_or(RenderError::SurfaceAllocation { width, height })?;
        Ok(Self {
            pixmap,
            stroke: Rgb::new(0, 0, 0),
            fill: Rgb::new(0, 0, 0),
            line_width: 1.0,
            metrics: FontMetrics::system(),
            native_curves: true,
            anti_alias: true,
        })
    }

    pub fn with_metrics(mut self, metrics: FontMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// With `false`, curves reach the pixmap already flattened into line
    /// segments.
    pub fn with_native_curves(mut self, native_curves: bool) -> Self {
        self.native_curves = native_curves;
        self
    }

    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn clear(&mut self, color: Rgb) {
        self.pixmap.fill(to_color(color));
    }

    /// Un-premultiplied color at a pixel; `None` outside the surface or where
    /// nothing has been drawn.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        let p = self.pixmap.pixel(x, y)?;
        if p.alpha() == 0 {
            return None;
        }
        let c = p.demultiply();
        Some(Rgb::new(c.red(), c.green(), c.blue()))
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        let data = self.pixmap.data();
        RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            let idx = ((y * self.width() + x) * 4) as usize;
            let a = data[idx + 3];
            let un = |v: u8| {
                if a == 0 {
                    0
                } else {
                    ((u16::from(v) * 255 + u16::from(a) / 2) / u16::from(a)).min(255) as u8
                }
            };
            image::Rgba([un(data[idx]), un(data[idx + 1]), un(data[idx + 2]), a])
        })
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        let mut bytes = Vec::new();
        self.to_rgba_image()
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| RenderError::Encoding(e.to_string()))?;
        Ok(bytes)
    }

    fn paint(&self, color: Rgb) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(to_color(color));
        paint.anti_alias = self.anti_alias;
        paint
    }

    fn skia_stroke(&self) -> Stroke {
        Stroke {
            width: self.line_width,
            ..Default::default()
        }
    }

    /// Source-over blend of `color` at coverage `coverage` into one pixel.
    fn blend(&mut self, x: i32, y: i32, color: Rgb, coverage: f32) {
        let (w, h) = (self.width() as i32, self.height() as i32);
        if x < 0 || y < 0 || x >= w || y >= h || coverage <= 0.0 {
            return;
        }
        let a = coverage.min(1.0);
        let idx = ((y * w + x) * 4) as usize;
        let pixel = &mut self.pixmap.data_mut()[idx..idx + 4];
        let src = [color.r, color.g, color.b, 255];
        for (dst, s) in pixel.iter_mut().zip(src) {
            let v = f32::from(s) * a + f32::from(*dst) * (1.0 - a);
            *dst = v.round().clamp(0.0, 255.0) as u8;
        }
    }
}

impl TextMetrics for RasterSurface {
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        self.metrics.text_width(text, font_size)
    }
}

impl Surface for RasterSurface {
    fn set_stroke_color(&mut self, color: Rgb) {
        self.stroke = color;
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.fill = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width as f32;
    }

    fn supports_curves(&self) -> bool {
        self.native_curves
    }

    fn stroke_path(&mut self, path: &Path) {
        if let Some(p) = to_skia_path(path) {
            let paint = self.paint(self.stroke);
            let stroke = self.skia_stroke();
            self.pixmap
                .stroke_path(&p, &paint, &stroke, Transform::identity(), None);
        }
    }

    fn fill_path(&mut self, path: &Path) {
        if let Some(p) = to_skia_path(path) {
            let paint = self.paint(self.fill);
            self.pixmap
                .fill_path(&p, &paint, FillRule::Winding, Transform::identity(), None);
        }
    }

    fn stroke_rect(&mut self, bounds: Bounds) {
        if let Some(r) = to_rect(bounds) {
            let path = PathBuilder::from_rect(r);
            let paint = self.paint(self.stroke);
            let stroke = self.skia_stroke();
            self.pixmap
                .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }

    fn fill_rect(&mut self, bounds: Bounds) {
        if let Some(r) = to_rect(bounds) {
            let paint = self.paint(self.fill);
            self.pixmap
                .fill_rect(r, &paint, Transform::identity(), None);
        }
    }

    fn stroke_ellipse(&mut self, bounds: Bounds) {
        if let Some(path) = to_rect(bounds).and_then(PathBuilder::from_oval) {
            let paint = self.paint(self.stroke);
            let stroke = self.skia_stroke();
            self.pixmap
                .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }

    fn fill_ellipse(&mut self, bounds: Bounds) {
        if let Some(path) = to_rect(bounds).and_then(PathBuilder::from_oval) {
            let paint = self.paint(self.fill);
            self.pixmap
                .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
    }

    fn draw_text(&mut self, text: &str, at: Point, font_size: f64) {
        let Some(font) = self.metrics.font() else {
            tracing::debug!("No font loaded, skipping text '{}'", text);
            return;
        };
        if !(at.x.abs() < MAX_DRAW_COORD && at.y.abs() < MAX_DRAW_COORD) {
            return;
        }
        let scale = Scale::uniform(font_size as f32);
        let start = rt_point(at.x as f32, at.y as f32);
        let color = self.fill;

        let mut coverage = Vec::new();
        for glyph in font.layout(text, scale, start) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, v| {
                    coverage.push((gx as i32 + bb.min.x, gy as i32 + bb.min.y, v));
                });
            }
        }
        for (x, y, v) in coverage {
            self.blend(x, y, color, v);
        }
    }
}

/// Options for [`rasterize`].
#[derive(Debug, Clone, Copy)]
pub struct RasterOptions {
    pub render: RenderOptions,
    pub native_curves: bool,
    /// Smooth edges; `false` gives hard pixel edges.
    pub anti_alias: bool,
    pub font: FontMetrics,
    /// `None` keeps a transparent background.
    pub background: Option<Rgb>,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            native_curves: true,
            anti_alias: true,
            font: FontMetrics::system(),
            background: Some(Rgb::new(255, 255, 255)),
        }
    }
}

/// Output pixel size for a canvas at `scale`; never below 1x1.
pub fn scaled_size(doc: &Document, scale: f64) -> (u32, u32) {
    let dim = |v: u32| (f64::from(v) * scale).round().max(1.0) as u32;
    (dim(doc.meta.width), dim(doc.meta.height))
}

/// Renders a document into a new surface sized `meta.size * scale`.
pub fn rasterize(doc: &Document, options: &RasterOptions) -> Result<RasterSurface, RenderError> {
    let (width, height) = scaled_size(doc, options.render.scale);
    let mut surface = RasterSurface::new(width, height)?
        .with_metrics(options.font)
        .with_native_curves(options.native_curves)
        .with_anti_alias(options.anti_alias);
    if let Some(bg) = options.background {
        surface.clear(bg);
    }
    render_document(&mut surface, doc, &options.render);
    tracing::debug!(
        "Rasterized {} shape(s) at {}x{}",
        doc.shapes.len(),
        width,
        height
    );
    Ok(surface)
}

/// What the text rasterizer produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RasterOutput {
    /// PNG bytes.
    Image(Vec<u8>),
    /// Decoding or rendering failed.
    Failure(String),
}

impl RasterOutput {
    pub fn is_failure(&self) -> bool {
        matches!(self, RasterOutput::Failure(_))
    }

    /// Bytes to hand back to the caller: the PNG, or `failed\n<message>`.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            RasterOutput::Image(png) => png,
            RasterOutput::Failure(msg) => format!("{}\n{}", FAILURE_MARKER, msg).into_bytes(),
        }
    }
}

/// Decodes serialized text and renders it to PNG. Malformed input never
/// yields a partial image.
pub fn rasterize_text(text: &str, options: &RasterOptions) -> RasterOutput {
    let doc = match decode_strict(text) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!("Rasterizer rejected input: {}", e);
            return RasterOutput::Failure(e.to_string());
        }
    };
    match rasterize(&doc, options).and_then(|s| s.encode_png()) {
        Ok(png) => RasterOutput::Image(png),
        Err(e) => {
            tracing::error!("Rasterizer failed: {}", e);
            RasterOutput::Failure(e.to_string())
        }
    }
}
