//! Document mutations routed through the editor's single edit entry point.
//!
//! Each command is applied in place; undo works on snapshots taken by the
//! caller before `apply`, so commands carry no inverse.

use crate::canvas::{Canvas, PointRef, ResizeHandle};
use crate::model::{Document, PathArrows, Shape, ShapeColor, ShapeKind, StrokeWidth};
use sketchkit_core::Point;

fn any_shape(canvas: &Canvas, ids: &[u64], pred: impl Fn(&Shape) -> bool) -> bool {
    ids.iter()
        .filter_map(|id| canvas.get_shape(*id))
        .any(|o| pred(&o.shape))
}

#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::large_enum_variant)]
pub enum EditCommand {
    AddShape(Shape),
    DeleteShapes { ids: Vec<u64> },
    MoveShapes { ids: Vec<u64>, dx: f64, dy: f64 },
    ResizeShape {
        id: u64,
        handle: ResizeHandle,
        to: Point,
    },
    MovePoint { point: PointRef, dx: f64, dy: f64 },
    SetColor { ids: Vec<u64>, color: ShapeColor },
    SetWidth { ids: Vec<u64>, width: StrokeWidth },
    SetText { id: u64, text: String },
    SetPathArrows { ids: Vec<u64>, arrows: PathArrows },
    Clear,
    Replace(Document),
}

impl EditCommand {
    /// Returns the name of the command for display.
    pub fn name(&self) -> &'static str {
        match self {
            EditCommand::AddShape(_) => "Add Shape",
            EditCommand::DeleteShapes { .. } => "Delete Shapes",
            EditCommand::MoveShapes { .. } => "Move Shapes",
            EditCommand::ResizeShape { .. } => "Resize Shape",
            EditCommand::MovePoint { .. } => "Move Point",
            EditCommand::SetColor { .. } => "Set Color",
            EditCommand::SetWidth { .. } => "Set Width",
            EditCommand::SetText { .. } => "Set Text",
            EditCommand::SetPathArrows { .. } => "Set Arrows",
            EditCommand::Clear => "Clear",
            EditCommand::Replace(_) => "Replace Document",
        }
    }

    /// Whether applying the command would change `canvas`. Commands that
    /// would not are dropped without taking a snapshot.
    pub fn changes(&self, canvas: &Canvas) -> bool {
        match self {
            EditCommand::AddShape(_) | EditCommand::Replace(_) => true,
            EditCommand::DeleteShapes { ids } => ids.iter().any(|id| canvas.contains(*id)),
            EditCommand::MoveShapes { ids, dx, dy } => {
                (*dx != 0.0 || *dy != 0.0) && any_shape(canvas, ids, |_| true)
            }
            EditCommand::ResizeShape { id, .. } => canvas
                .get_shape(*id)
                .map(|o| o.shape.is_resizable())
                .unwrap_or(false),
            EditCommand::MovePoint { point, dx, dy } => {
                (*dx != 0.0 || *dy != 0.0) && canvas.point_position(point).is_some()
            }
            EditCommand::SetColor { ids, color } => any_shape(canvas, ids, |s| s.color != *color),
            EditCommand::SetWidth { ids, width } => any_shape(canvas, ids, |s| s.width != *width),
            EditCommand::SetText { id, text } => canvas
                .get_shape(*id)
                .and_then(|o| o.shape.text_content())
                .map(|t| t != text)
                .unwrap_or(false),
            EditCommand::SetPathArrows { ids, arrows } => {
                any_shape(canvas, ids, |s| matches!(&s.kind, ShapeKind::Path(a) if a != arrows))
            }
            EditCommand::Clear => !canvas.is_empty(),
        }
    }

    /// Applies the command. Returns the id of a shape it created.
    pub fn apply(&self, canvas: &mut Canvas) -> Option<u64> {
        match self {
            EditCommand::AddShape(shape) => return Some(canvas.add_shape(shape.clone())),
            EditCommand::DeleteShapes { ids } => {
                canvas.remove_shapes(ids);
            }
            EditCommand::MoveShapes { ids, dx, dy } => canvas.move_shapes(ids, *dx, *dy),
            EditCommand::ResizeShape { id, handle, to } => {
                canvas.resize_shape(*id, *handle, *to);
            }
            EditCommand::MovePoint { point, dx, dy } => {
                canvas.move_point(point, *dx, *dy);
            }
            EditCommand::SetColor { ids, color } => canvas.set_color(ids, *color),
            EditCommand::SetWidth { ids, width } => canvas.set_width(ids, *width),
            EditCommand::SetText { id, text } => {
                canvas.set_text(*id, text);
            }
            EditCommand::SetPathArrows { ids, arrows } => canvas.set_path_arrows(ids, *arrows),
            EditCommand::Clear => canvas.clear(),
            EditCommand::Replace(doc) => canvas.load_document(doc.clone()),
        }
        None
    }
}
