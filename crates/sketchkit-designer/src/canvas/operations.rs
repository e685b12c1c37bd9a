//! Shape manipulation operations for Canvas.

use super::types::{PointRef, PointRole, ResizeHandle};
use super::Canvas;
use crate::model::{PathArrows, ShapeColor, ShapeKind, StrokeWidth};
use sketchkit_core::Point;

impl Canvas {
    /// Moves the given shapes by (dx, dy), control points included.
    pub fn move_shapes(&mut self, ids: &[u64], dx: f64, dy: f64) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        for obj in self.objects.iter_mut().filter(|o| ids.contains(&o.id)) {
            obj.shape.translate(dx, dy);
        }
    }

    /// Drags `handle` of shape `id` to `pointer`, scaling about the opposite
    /// edge or corner.
    ///
    /// When the pointer crosses the anchor the scale factor turns negative,
    /// the shape flips, and the handle now under the pointer is the mirror of
    /// the one grabbed; that handle is returned so the gesture can continue.
    pub fn resize_shape(&mut self, id: u64, handle: ResizeHandle, pointer: Point) -> ResizeHandle {
        let Some(bounds) = self.bounding_box(id) else {
            return handle;
        };
        let Some(obj) = self.get_shape_mut(id) else {
            return handle;
        };
        if !obj.shape.is_resizable() {
            return handle;
        }

        let anchor = handle.anchor(&bounds);
        let current = handle.position(&bounds);
        let mut next = handle;

        // A zero span (e.g. the height of a horizontal line) cannot be scaled,
        // and a zero target would collapse the shape for good.
        let factor = |span: f64, target: f64| (span != 0.0 && target != 0.0).then(|| target / span);

        let mut sx = 1.0;
        if handle.moves_x() {
            if let Some(f) = factor(current.x - anchor.x, pointer.x - anchor.x) {
                sx = f;
                if f < 0.0 {
                    next = next.mirror_x();
                }
            }
        }
        let mut sy = 1.0;
        if handle.moves_y() {
            if let Some(f) = factor(current.y - anchor.y, pointer.y - anchor.y) {
                sy = f;
                if f < 0.0 {
                    next = next.mirror_y();
                }
            }
        }

        obj.shape.scale_about(anchor, sx, sy);
        if next != handle {
            tracing::debug!("Resize crossed the anchor, {:?} -> {:?}", handle, next);
        }
        next
    }

    /// Moves one editable point. A vertex carries its own controls along; a
    /// control point moves alone.
    pub fn move_point(&mut self, r: &PointRef, dx: f64, dy: f64) -> bool {
        let Some(v) = self
            .get_shape_mut(r.object_id)
            .and_then(|o| o.shape.points.get_mut(r.index))
        else {
            return false;
        };
        match r.role {
            PointRole::Vertex => v.map(|p| p.translated(dx, dy)),
            PointRole::Leading => {
                let Some(c) = v.c.as_mut() else { return false };
                *c = c.translated(dx, dy);
            }
            PointRole::Trailing => {
                let Some(d) = v.d.as_mut() else { return false };
                *d = d.translated(dx, dy);
            }
        }
        true
    }

    pub fn set_color(&mut self, ids: &[u64], color: ShapeColor) {
        for obj in self.objects.iter_mut().filter(|o| ids.contains(&o.id)) {
            obj.shape.color = color;
        }
    }

    pub fn set_width(&mut self, ids: &[u64], width: StrokeWidth) {
        for obj in self.objects.iter_mut().filter(|o| ids.contains(&o.id)) {
            obj.shape.width = width;
        }
    }

    /// Replaces the string of a text shape. Returns `false` for other types.
    pub fn set_text(&mut self, id: u64, text: &str) -> bool {
        match self.get_shape_mut(id).map(|o| &mut o.shape.kind) {
            Some(ShapeKind::Text(s)) => {
                *s = text.to_string();
                true
            }
            _ => false,
        }
    }

    /// Sets arrowheads on the given paths; other types are left alone.
    pub fn set_path_arrows(&mut self, ids: &[u64], arrows: PathArrows) {
        for obj in self.objects.iter_mut().filter(|o| ids.contains(&o.id)) {
            if let ShapeKind::Path(a) = &mut obj.shape.kind {
                *a = arrows;
            }
        }
    }

    pub fn remove_shapes(&mut self, ids: &[u64]) -> usize {
        let before = self.objects.len();
        self.objects.retain(|o| !ids.contains(&o.id));
        before - self.objects.len()
    }
}
