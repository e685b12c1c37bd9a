use super::Shape;

pub const DEFAULT_CANVAS_WIDTH: u32 = 640;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 480;

/// Drawable surface size, persisted as the leading `meta` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasMeta {
    pub width: u32,
    pub height: u32,
}

impl CanvasMeta {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for CanvasMeta {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}

/// Canvas size plus shapes in paint order (later shapes paint over earlier).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub meta: CanvasMeta,
    pub shapes: Vec<Shape>,
}

impl Document {
    pub fn new(meta: CanvasMeta) -> Self {
        Self {
            meta,
            shapes: Vec::new(),
        }
    }

    pub fn with_shapes(meta: CanvasMeta, shapes: Vec<Shape>) -> Self {
        Self { meta, shapes }
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }
}
