//! Canvas type definitions: CanvasSnapshot, DrawingObject, Tool, ResizeHandle, PointRef.

use std::fmt;

use crate::model::{Shape, ShapeType};
use sketchkit_core::{Bounds, Point};

/// Snapshot of the shape list for undo.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasSnapshot {
    pub(crate) objects: Vec<DrawingObject>,
}

impl CanvasSnapshot {
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// A shape on the canvas with a stable id.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingObject {
    pub id: u64,
    pub shape: Shape,
}

impl DrawingObject {
    /// Creates a new drawing object.
    pub fn new(id: u64, shape: Shape) -> Self {
        Self { id, shape }
    }
}

/// The active editor tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Select,
    PathEdit,
    Delete,
    /// Draws a new shape of the given type.
    Draw(ShapeType),
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Select => "select",
            Tool::PathEdit => "path-edit",
            Tool::Delete => "delete",
            Tool::Draw(t) => t.name(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "select" => Some(Tool::Select),
            "path-edit" => Some(Tool::PathEdit),
            "delete" => Some(Tool::Delete),
            other => ShapeType::from_name(other).map(Tool::Draw),
        }
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, Tool::Draw(_))
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the eight resize handles around a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::TopLeft,
        ResizeHandle::Top,
        ResizeHandle::TopRight,
        ResizeHandle::Right,
        ResizeHandle::BottomRight,
        ResizeHandle::Bottom,
        ResizeHandle::BottomLeft,
        ResizeHandle::Left,
    ];

    /// Horizontal position: -1 left edge, 0 center, 1 right edge.
    fn sx(&self) -> i8 {
        match self {
            ResizeHandle::TopLeft | ResizeHandle::Left | ResizeHandle::BottomLeft => -1,
            ResizeHandle::Top | ResizeHandle::Bottom => 0,
            ResizeHandle::TopRight | ResizeHandle::Right | ResizeHandle::BottomRight => 1,
        }
    }

    /// Vertical position: -1 top edge, 0 middle, 1 bottom edge.
    fn sy(&self) -> i8 {
        match self {
            ResizeHandle::TopLeft | ResizeHandle::Top | ResizeHandle::TopRight => -1,
            ResizeHandle::Left | ResizeHandle::Right => 0,
            ResizeHandle::BottomLeft | ResizeHandle::Bottom | ResizeHandle::BottomRight => 1,
        }
    }

    fn from_signs(sx: i8, sy: i8) -> Self {
        match (sx, sy) {
            (-1, -1) => ResizeHandle::TopLeft,
            (0, -1) => ResizeHandle::Top,
            (1, -1) => ResizeHandle::TopRight,
            (1, 0) => ResizeHandle::Right,
            (1, 1) => ResizeHandle::BottomRight,
            (0, 1) => ResizeHandle::Bottom,
            (-1, 1) => ResizeHandle::BottomLeft,
            _ => ResizeHandle::Left,
        }
    }

    pub fn moves_x(&self) -> bool {
        self.sx() != 0
    }

    pub fn moves_y(&self) -> bool {
        self.sy() != 0
    }

    /// Handle on the other side horizontally (left <-> right).
    pub fn mirror_x(&self) -> Self {
        Self::from_signs(-self.sx(), self.sy())
    }

    /// Handle on the other side vertically (top <-> bottom).
    pub fn mirror_y(&self) -> Self {
        Self::from_signs(self.sx(), -self.sy())
    }

    /// Where the handle sits on `b`.
    pub fn position(&self, b: &Bounds) -> Point {
        let pick = |s: i8, lo: f64, hi: f64| match s {
            -1 => lo,
            1 => hi,
            _ => (lo + hi) / 2.0,
        };
        Point::new(
            pick(self.sx(), b.min_x, b.max_x),
            pick(self.sy(), b.min_y, b.max_y),
        )
    }

    /// The fixed point while this handle is dragged: the opposite corner, or
    /// the opposite edge for side handles.
    pub fn anchor(&self, b: &Bounds) -> Point {
        Self::from_signs(-self.sx(), -self.sy()).position(b)
    }
}

/// Which part of a vertex a path-edit grab holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointRole {
    Vertex,
    /// Leading control `c`.
    Leading,
    /// Trailing control `d`.
    Trailing,
}

/// Address of an editable point inside a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointRef {
    pub object_id: u64,
    pub index: usize,
    pub role: PointRole,
}
