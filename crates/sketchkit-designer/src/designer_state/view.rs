//! Editor view: the document plus selection, handle, path-edit, pending
//! shape and rubber-band overlays.

use super::{EditorState, Gesture};
use crate::canvas::{ResizeHandle, Tool};
use crate::model::{Rgb, Segment, ShapeType, Vertex};
use crate::renderer::{render_shape, Outline, RenderOptions, Surface};
use sketchkit_core::{Bounds, Point};

pub const SELECTION_COLOR: Rgb = Rgb::new(0, 120, 215);
pub const HANDLE_COLOR: Rgb = Rgb::new(255, 255, 255);
const CONTROL_COLOR: Rgb = Rgb::new(255, 0, 255);
const MARK_SIZE: f64 = 3.0;

fn square(center: Point, half: f64) -> Bounds {
    Bounds::new(center.translated(-half, -half), center.translated(half, half))
}

fn mark(surface: &mut dyn Surface, at: Point, half: f64, fill: Rgb) {
    let b = square(at, half);
    surface.set_fill_color(fill);
    surface.fill_rect(b);
    surface.set_stroke_color(SELECTION_COLOR);
    surface.stroke_rect(b);
}

fn draw_controls(surface: &mut dyn Surface, vertices: &[Vertex], scale: f64) {
    for (i, v) in vertices.iter().enumerate() {
        let pos = v.pos * scale;
        surface.set_stroke_color(CONTROL_COLOR);
        if let (Some(c), Some(prev)) = (v.c, i.checked_sub(1).and_then(|j| vertices.get(j))) {
            let c = c * scale;
            surface.stroke_polyline(&[prev.pos * scale, c], false);
            surface.set_fill_color(CONTROL_COLOR);
            surface.fill_ellipse(square(c, MARK_SIZE));
        }
        if let Some(d) = v.d {
            let d = d * scale;
            surface.stroke_polyline(&[pos, d], false);
            surface.set_fill_color(CONTROL_COLOR);
            surface.fill_ellipse(square(d, MARK_SIZE));
        }
        mark(surface, pos, MARK_SIZE, HANDLE_COLOR);
    }
}

fn draw_pending(surface: &mut dyn Surface, state: &EditorState, scale: f64) {
    if state.pending.is_empty() {
        return;
    }
    surface.set_stroke_color(state.color.rgb());
    surface.set_line_width(state.width.line_width());
    if state.tool == Tool::Draw(ShapeType::Path) {
        let mut outline = Outline::new(surface.supports_curves());
        outline.move_to(state.pending[0].pos * scale);
        for w in state.pending.windows(2) {
            match Segment::between(&w[0], &w[1]) {
                Segment::Line(_, to) => outline.line_to(to * scale),
                Segment::Cubic(_, c1, c2, to) => outline.cubic_to(c1 * scale, c2 * scale, to * scale),
            }
        }
        surface.stroke_path(&outline.build());
        surface.set_line_width(1.0);
        draw_controls(surface, &state.pending, scale);
        if let (Some(c), Some(last)) = (state.next_leading, state.pending.last()) {
            surface.set_stroke_color(CONTROL_COLOR);
            surface.stroke_polyline(&[last.pos * scale, c * scale], false);
        }
    } else {
        surface.set_line_width(1.0);
        for v in &state.pending {
            mark(surface, v.pos * scale, MARK_SIZE, state.color.rgb());
        }
    }
}

/// Draws the document and the editor overlays onto `surface`.
pub fn render_canvas(state: &EditorState, surface: &mut dyn Surface) {
    let scale = state.config.scale;
    let options = RenderOptions { scale };
    for obj in state.canvas.objects() {
        render_shape(surface, &obj.shape, &options);
    }
    if !state.config.edit_mode {
        return;
    }

    surface.set_line_width(1.0);
    for id in state.selection.ids() {
        let Some(obj) = state.canvas.get_shape(id) else {
            continue;
        };
        let b = obj.shape.bounding_box(state.canvas.metrics()).scaled(scale);
        surface.set_stroke_color(SELECTION_COLOR);
        surface.stroke_rect(b);
        if state.tool == Tool::PathEdit && obj.shape.shape_type().has_editable_points() {
            draw_controls(surface, &obj.shape.points, scale);
        }
    }

    if state.tool == Tool::Select {
        if let Some(id) = state.selection.single() {
            if let Some(obj) = state.canvas.get_shape(id).filter(|o| o.shape.is_resizable()) {
                let b = obj.shape.bounding_box(state.canvas.metrics()).scaled(scale);
                let half = state.config.handle_size / 2.0;
                for h in ResizeHandle::ALL {
                    mark(surface, h.position(&b), half, HANDLE_COLOR);
                }
            }
        }
    }

    draw_pending(surface, state, scale);

    if let Gesture::BoxSelecting { start, current } = state.gesture {
        surface.set_stroke_color(SELECTION_COLOR);
        surface.stroke_rect(Bounds::new(start * scale, current * scale));
    }
}
