//! Pointer and key handling.

use super::{EditOutcome, EditorState, Gesture, Modifiers, TextTarget};
use crate::canvas::Tool;
use crate::commands::EditCommand;
use crate::model::{Shape, ShapeKind, ShapeType, Vertex};
use sketchkit_core::{snap_to_grid, Bounds, Point};

/// Grab radius for vertices and control points in path-edit.
pub const PATH_EDIT_GRAB_RADIUS: f64 = 6.0;
/// Clicking within this distance of the last path vertex finishes the path.
pub const PATH_FINISH_RADIUS: f64 = 3.0;

impl EditorState {
    /// Surface coordinates to document coordinates, snapped to the grid.
    pub fn to_document_point(&self, p: Point) -> Point {
        let scale = if self.config.scale > 0.0 {
            self.config.scale
        } else {
            1.0
        };
        snap_to_grid(p * (1.0 / scale), self.config.grid)
    }

    pub fn pointer_down(&mut self, p: Point, modifiers: Modifiers) -> EditOutcome {
        if !self.config.edit_mode {
            return EditOutcome::Ignored;
        }
        let p = self.to_document_point(p);
        match self.tool {
            Tool::Draw(ShapeType::Text) => {
                self.text_target = Some(TextTarget::New(p));
                EditOutcome::TextRequested { at: p }
            }
            Tool::Draw(ShapeType::Path) => self.path_press(p),
            Tool::Draw(shape_type) => {
                self.pending.push(Vertex::at(p));
                if self.pending.len() >= shape_type.min_points() {
                    self.commit_pending(shape_type)
                } else {
                    EditOutcome::Redraw
                }
            }
            Tool::Delete => match self.canvas.hit_test(p, self.config.hit_tolerance) {
                Some(id) => {
                    if self.apply_edit(EditCommand::DeleteShapes { ids: vec![id] }) {
                        EditOutcome::Changed
                    } else {
                        EditOutcome::Ignored
                    }
                }
                None => EditOutcome::Ignored,
            },
            Tool::Select | Tool::PathEdit => self.select_press(p, modifiers),
        }
    }

    pub fn pointer_move(&mut self, p: Point) -> EditOutcome {
        if !self.config.edit_mode {
            return EditOutcome::Ignored;
        }
        let p = self.to_document_point(p);
        let ids = self.selection.ids();

        match &mut self.gesture {
            Gesture::Idle => EditOutcome::Ignored,
            Gesture::Moving { last, pending } => {
                let delta = p - *last;
                if delta.x == 0.0 && delta.y == 0.0 {
                    return EditOutcome::Ignored;
                }
                if let Some(snapshot) = pending.take() {
                    self.history.push(snapshot);
                }
                self.canvas.move_shapes(&ids, delta.x, delta.y);
                *last = p;
                EditOutcome::Redraw
            }
            Gesture::Sizing {
                id,
                handle,
                pending,
            } => {
                let before = self.canvas.get_shape(*id).map(|o| o.shape.clone());
                *handle = self.canvas.resize_shape(*id, *handle, p);
                if self.canvas.get_shape(*id).map(|o| &o.shape) == before.as_ref() {
                    return EditOutcome::Ignored;
                }
                if let Some(snapshot) = pending.take() {
                    self.history.push(snapshot);
                }
                EditOutcome::Redraw
            }
            Gesture::DraggingPoint {
                point,
                last,
                pending,
            } => {
                let delta = p - *last;
                if delta.x == 0.0 && delta.y == 0.0 {
                    return EditOutcome::Ignored;
                }
                if let Some(snapshot) = pending.take() {
                    self.history.push(snapshot);
                }
                self.canvas.move_point(point, delta.x, delta.y);
                *last = p;
                EditOutcome::Redraw
            }
            Gesture::BoxSelecting { current, .. } => {
                *current = p;
                EditOutcome::Redraw
            }
            Gesture::PlacingVertex => {
                let Some(k) = self.pending.len().checked_sub(1) else {
                    return EditOutcome::Ignored;
                };
                let pos = self.pending[k].pos;
                if p == pos {
                    self.pending[k].d = None;
                    self.next_leading = None;
                } else {
                    if k > 0 {
                        self.pending[k].d = Some(pos * 2.0 - p);
                    }
                    self.next_leading = Some(p);
                }
                EditOutcome::Redraw
            }
        }
    }

    pub fn pointer_up(&mut self, p: Point) -> EditOutcome {
        if !self.config.edit_mode {
            return EditOutcome::Ignored;
        }
        let p = self.to_document_point(p);
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => EditOutcome::Ignored,
            Gesture::Moving { pending, .. }
            | Gesture::Sizing { pending, .. }
            | Gesture::DraggingPoint { pending, .. } => {
                if pending.is_none() {
                    tracing::debug!("Gesture committed ({} undo step(s))", self.history.len());
                    EditOutcome::Changed
                } else {
                    EditOutcome::Ignored
                }
            }
            Gesture::BoxSelecting { start, .. } => {
                let area = Bounds::new(start, p);
                let ids = self.canvas.objects_in_box(&area, self.config.hit_tolerance);
                tracing::debug!("Box selected {} shape(s)", ids.len());
                self.selection.replace(ids);
                EditOutcome::Redraw
            }
            Gesture::PlacingVertex => EditOutcome::Redraw,
        }
    }

    /// Finishes a path, or asks to edit the string of a text shape.
    pub fn double_click(&mut self, p: Point) -> EditOutcome {
        if !self.config.edit_mode {
            return EditOutcome::Ignored;
        }
        self.gesture = Gesture::Idle;
        match self.tool {
            Tool::Draw(ShapeType::Path) if !self.pending.is_empty() => self.commit_path(),
            Tool::Select => {
                let p = self.to_document_point(p);
                let Some(id) = self.canvas.hit_test(p, self.config.hit_tolerance) else {
                    return EditOutcome::Ignored;
                };
                let Some(obj) = self.canvas.get_shape(id) else {
                    return EditOutcome::Ignored;
                };
                if obj.shape.text_content().is_none() {
                    return EditOutcome::Ignored;
                }
                let at = obj.shape.anchor();
                self.selection.select(id, false);
                self.text_target = Some(TextTarget::Existing(id));
                EditOutcome::TextRequested { at }
            }
            _ => EditOutcome::Ignored,
        }
    }

    /// Answers a `TextRequested`. `None` or an empty string cancels.
    pub fn commit_text(&mut self, text: Option<String>) -> EditOutcome {
        let Some(target) = self.text_target.take() else {
            return EditOutcome::Ignored;
        };
        let Some(text) = text.filter(|t| !t.is_empty()) else {
            return EditOutcome::Ignored;
        };
        let changed = match target {
            TextTarget::New(at) => self.apply_edit(EditCommand::AddShape(
                Shape::text(at, text)
                    .with_color(self.color)
                    .with_width(self.width),
            )),
            TextTarget::Existing(id) => self.apply_edit(EditCommand::SetText { id, text }),
        };
        if changed {
            EditOutcome::Changed
        } else {
            EditOutcome::Ignored
        }
    }

    /// Key delete.
    pub fn key_delete(&mut self) -> EditOutcome {
        if self.delete_selected() {
            EditOutcome::Changed
        } else {
            EditOutcome::Ignored
        }
    }

    fn select_press(&mut self, p: Point, modifiers: Modifiers) -> EditOutcome {
        let tolerance = self.config.hit_tolerance;

        if self.tool == Tool::PathEdit {
            let ids = self.selection.ids();
            if let Some(point) = self.canvas.editable_point_at(&ids, p, PATH_EDIT_GRAB_RADIUS) {
                self.gesture = Gesture::DraggingPoint {
                    point,
                    last: p,
                    pending: Some(self.canvas.snapshot()),
                };
                return EditOutcome::Redraw;
            }
        }

        if self.tool == Tool::Select {
            if let Some(id) = self.selection.single() {
                if let Some(handle) = self.canvas.handle_at(id, p, self.config.handle_size) {
                    self.gesture = Gesture::Sizing {
                        id,
                        handle,
                        pending: Some(self.canvas.snapshot()),
                    };
                    return EditOutcome::Redraw;
                }
            }
        }

        match self.canvas.hit_test(p, tolerance) {
            Some(id) => {
                if !self.selection.is_selected(id) {
                    self.selection.select(id, modifiers.shift);
                }
                self.gesture = Gesture::Moving {
                    last: p,
                    pending: Some(self.canvas.snapshot()),
                };
            }
            None => {
                if !modifiers.shift {
                    self.selection.clear();
                }
                self.gesture = Gesture::BoxSelecting {
                    start: p,
                    current: p,
                };
            }
        }
        EditOutcome::Redraw
    }

    fn path_press(&mut self, p: Point) -> EditOutcome {
        if let Some(last) = self.pending.last() {
            if last.pos.distance_to(&p) <= PATH_FINISH_RADIUS {
                return self.commit_path();
            }
        }
        let mut vertex = Vertex::at(p);
        vertex.c = self.next_leading.take();
        self.pending.push(vertex);
        self.gesture = Gesture::PlacingVertex;
        EditOutcome::Redraw
    }

    fn commit_path(&mut self) -> EditOutcome {
        let mut points = std::mem::take(&mut self.pending);
        self.next_leading = None;
        self.gesture = Gesture::Idle;
        if let Some(first) = points.first_mut() {
            first.c = None;
            first.d = None;
        }
        match Shape::try_new(ShapeKind::Path(self.arrows), points) {
            Ok(shape) => self.add_drawn(shape),
            Err(e) => {
                tracing::debug!("Discarding path: {}", e);
                EditOutcome::Ignored
            }
        }
    }

    fn commit_pending(&mut self, shape_type: ShapeType) -> EditOutcome {
        let points = std::mem::take(&mut self.pending);
        match Shape::try_new(ShapeKind::plain(shape_type), points) {
            Ok(shape) => self.add_drawn(shape),
            Err(e) => {
                tracing::warn!("Cannot create {}: {}", shape_type, e);
                EditOutcome::Ignored
            }
        }
    }

    fn add_drawn(&mut self, shape: Shape) -> EditOutcome {
        let shape = shape.with_color(self.color).with_width(self.width);
        tracing::debug!("Committing {} with {} point(s)", shape.shape_type(), shape.points.len());
        if self.apply_edit(EditCommand::AddShape(shape)) {
            EditOutcome::Changed
        } else {
            EditOutcome::Ignored
        }
    }

    /// Rubber-band rectangle while box-selecting.
    pub fn rubber_band(&self) -> Option<Bounds> {
        match self.gesture {
            Gesture::BoxSelecting { start, current } => Some(Bounds::new(start, current)),
            _ => None,
        }
    }
}
