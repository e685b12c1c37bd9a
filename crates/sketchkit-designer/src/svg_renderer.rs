//! SVG backend.
//! Implements [`Surface`] by emitting SVG elements, giving the live editor
//! view a vector target and providing SVG export.
//!
//! Paths keep their Bezier commands; ellipses, rectangles and text map to
//! their native SVG elements.

use lyon::path::{Event, Path};
use sketchkit_core::{Bounds, Point};

use crate::font_manager::FontMetrics;
use crate::model::{Rgb, TextMetrics};
use crate::path_data::format_number;
use crate::renderer::Surface;

/// Convert a lyon path to SVG path data.
pub fn path_to_svg_data(path: &Path) -> String {
    let mut d = String::new();
    let n = |v: f32| format_number(f64::from(v));
    for event in path.iter() {
        match event {
            Event::Begin { at } => {
                d.push_str(&format!("M{},{} ", n(at.x), n(at.y)));
            }
            Event::Line { to, .. } => {
                d.push_str(&format!("L{},{} ", n(to.x), n(to.y)));
            }
            Event::Quadratic { ctrl, to, .. } => {
                d.push_str(&format!(
                    "Q{},{} {},{} ",
                    n(ctrl.x),
                    n(ctrl.y),
                    n(to.x),
                    n(to.y)
                ));
            }
            Event::Cubic {
                ctrl1, ctrl2, to, ..
            } => {
                d.push_str(&format!(
                    "C{},{} {},{} {},{} ",
                    n(ctrl1.x),
                    n(ctrl1.y),
                    n(ctrl2.x),
                    n(ctrl2.y),
                    n(to.x),
                    n(to.y)
                ));
            }
            Event::End { close, .. } => {
                if close {
                    d.push_str("Z ");
                }
            }
        }
    }
    d.trim_end().to_string()
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Surface that records SVG markup.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: u32,
    height: u32,
    background: Option<Rgb>,
    stroke: Rgb,
    fill: Rgb,
    line_width: f64,
    font_family: String,
    metrics: FontMetrics,
    elements: Vec<String>,
}

impl SvgSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: Some(Rgb::new(255, 255, 255)),
            stroke: Rgb::new(0, 0, 0),
            fill: Rgb::new(0, 0, 0),
            line_width: 1.0,
            font_family: "sans-serif".to_string(),
            metrics: FontMetrics::system(),
            elements: Vec::new(),
        }
    }

    pub fn with_metrics(mut self, metrics: FontMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    /// `None` leaves the document transparent.
    pub fn with_background(mut self, background: Option<Rgb>) -> Self {
        self.background = background;
        self
    }

    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    fn stroke_attrs(&self) -> String {
        format!(
            r#"fill="none" stroke="{}" stroke-width="{}""#,
            self.stroke.to_css(),
            format_number(self.line_width)
        )
    }

    fn fill_attrs(&self) -> String {
        format!(r#"fill="{}" stroke="none""#, self.fill.to_css())
    }

    /// Serializes the recorded elements into a standalone SVG document.
    pub fn finish(&self) -> String {
        let mut out = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        out.push('\n');
        if let Some(bg) = self.background {
            out.push_str(&format!(
                r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
                self.width,
                self.height,
                bg.to_css()
            ));
            out.push('\n');
        }
        for element in &self.elements {
            out.push_str(element);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }
}

impl TextMetrics for SvgSurface {
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        self.metrics.text_width(text, font_size)
    }
}

impl Surface for SvgSurface {
    fn set_stroke_color(&mut self, color: Rgb) {
        self.stroke = color;
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.fill = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn stroke_path(&mut self, path: &Path) {
        let d = path_to_svg_data(path);
        if d.is_empty() {
            return;
        }
        self.elements
            .push(format!(r#"<path d="{}" {}/>"#, d, self.stroke_attrs()));
    }

    fn fill_path(&mut self, path: &Path) {
        let d = path_to_svg_data(path);
        if d.is_empty() {
            return;
        }
        self.elements
            .push(format!(r#"<path d="{}" {}/>"#, d, self.fill_attrs()));
    }

    fn stroke_rect(&mut self, b: Bounds) {
        self.elements.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" {}/>"#,
            format_number(b.min_x),
            format_number(b.min_y),
            format_number(b.width()),
            format_number(b.height()),
            self.stroke_attrs()
        ));
    }

    fn fill_rect(&mut self, b: Bounds) {
        self.elements.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" {}/>"#,
            format_number(b.min_x),
            format_number(b.min_y),
            format_number(b.width()),
            format_number(b.height()),
            self.fill_attrs()
        ));
    }

    fn stroke_ellipse(&mut self, b: Bounds) {
        let c = b.center();
        self.elements.push(format!(
            r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}" {}/>"#,
            format_number(c.x),
            format_number(c.y),
            format_number(b.width() / 2.0),
            format_number(b.height() / 2.0),
            self.stroke_attrs()
        ));
    }

    fn fill_ellipse(&mut self, b: Bounds) {
        let c = b.center();
        self.elements.push(format!(
            r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}" {}/>"#,
            format_number(c.x),
            format_number(c.y),
            format_number(b.width() / 2.0),
            format_number(b.height() / 2.0),
            self.fill_attrs()
        ));
    }

    fn draw_text(&mut self, text: &str, at: Point, font_size: f64) {
        self.elements.push(format!(
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}" fill="{}">{}</text>"#,
            format_number(at.x),
            format_number(at.y),
            escape_text(&self.font_family),
            format_number(font_size),
            self.fill.to_css(),
            escape_text(text)
        ));
    }
}
