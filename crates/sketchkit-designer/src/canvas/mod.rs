//! Canvas holding the live shape list and answering geometric queries.

mod operations;
mod types;

pub use types::{CanvasSnapshot, DrawingObject, PointRef, PointRole, ResizeHandle, Tool};

use std::sync::Arc;

use crate::font_manager::FontMetrics;
use crate::model::{CanvasMeta, Document, Shape, TextMetrics};
use sketchkit_core::{Bounds, Point};

/// Margin added around bounding boxes for hit-testing and box selection.
pub const DEFAULT_HIT_TOLERANCE: f64 = 10.0;

/// Canvas state: paint-ordered objects plus the metrics used to size text.
#[derive(Clone)]
pub struct Canvas {
    objects: Vec<DrawingObject>,
    next_id: u64,
    meta: CanvasMeta,
    metrics: Arc<dyn TextMetrics + Send + Sync>,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("objects", &self.objects)
            .field("next_id", &self.next_id)
            .field("meta", &self.meta)
            .finish()
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Creates an empty default-sized canvas measuring text with the system
    /// font.
    pub fn new() -> Self {
        Self::with_metrics(Arc::new(FontMetrics::system()))
    }

    pub fn with_metrics(metrics: Arc<dyn TextMetrics + Send + Sync>) -> Self {
        Self {
            objects: Vec::new(),
            next_id: 1,
            meta: CanvasMeta::default(),
            metrics,
        }
    }

    pub fn metrics(&self) -> &dyn TextMetrics {
        self.metrics.as_ref()
    }

    pub fn meta(&self) -> CanvasMeta {
        self.meta
    }

    pub fn set_meta(&mut self, meta: CanvasMeta) {
        self.meta = meta;
    }

    /// Returns the number of shapes on the canvas.
    pub fn shape_count(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects in paint order.
    pub fn objects(&self) -> &[DrawingObject] {
        &self.objects
    }

    pub fn contains(&self, id: u64) -> bool {
        self.objects.iter().any(|o| o.id == id)
    }

    /// Gets a reference to a shape by ID.
    pub fn get_shape(&self, id: u64) -> Option<&DrawingObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn get_shape_mut(&mut self, id: u64) -> Option<&mut DrawingObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Generates a new unique ID.
    pub fn generate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Appends a shape on top and returns its id.
    pub fn add_shape(&mut self, shape: Shape) -> u64 {
        let id = self.generate_id();
        self.objects.push(DrawingObject::new(id, shape));
        id
    }

    pub fn remove_shape(&mut self, id: u64) -> Option<DrawingObject> {
        let index = self.objects.iter().position(|o| o.id == id)?;
        Some(self.objects.remove(index))
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Replaces every shape with the document's shapes and adopts its size.
    pub fn load_document(&mut self, doc: Document) {
        self.meta = doc.meta;
        self.objects.clear();
        for shape in doc.shapes {
            self.add_shape(shape);
        }
    }

    /// The current content as a document.
    pub fn to_document(&self) -> Document {
        Document::with_shapes(
            self.meta,
            self.objects.iter().map(|o| o.shape.clone()).collect(),
        )
    }

    pub fn snapshot(&self) -> CanvasSnapshot {
        CanvasSnapshot {
            objects: self.objects.clone(),
        }
    }

    /// Replaces the shape list wholesale. Ids issued afterwards stay unique.
    pub fn restore(&mut self, snapshot: CanvasSnapshot) {
        self.objects = snapshot.objects;
        let max_id = self.objects.iter().map(|o| o.id).max().unwrap_or(0);
        self.next_id = self.next_id.max(max_id + 1);
    }

    pub fn bounding_box(&self, id: u64) -> Option<Bounds> {
        self.get_shape(id)
            .map(|o| o.shape.bounding_box(self.metrics()))
    }

    /// Union of the bounding boxes of `ids`.
    pub fn bounds_of(&self, ids: &[u64]) -> Option<Bounds> {
        ids.iter()
            .filter_map(|id| self.bounding_box(*id))
            .reduce(|a, b| a.union(&b))
    }

    /// Topmost object whose bounding box, expanded by `tolerance`, contains
    /// `point`.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> Option<u64> {
        self.objects
            .iter()
            .rev()
            .find(|o| {
                o.shape
                    .bounding_box(self.metrics())
                    .expand(tolerance)
                    .contains(point.x, point.y)
            })
            .map(|o| o.id)
    }

    /// Every object whose expanded bounding box intersects `area`, in paint
    /// order.
    pub fn objects_in_box(&self, area: &Bounds, tolerance: f64) -> Vec<u64> {
        self.objects
            .iter()
            .filter(|o| {
                o.shape
                    .bounding_box(self.metrics())
                    .expand(tolerance)
                    .intersects(area)
            })
            .map(|o| o.id)
            .collect()
    }

    /// Resize handle of `id` whose hot-zone (a square of side `2 * radius`)
    /// contains `point`. Overlapping hot-zones (small shapes) resolve to the
    /// nearest handle. Non-resizable shapes have no handles.
    pub fn handle_at(&self, id: u64, point: Point, radius: f64) -> Option<ResizeHandle> {
        let obj = self.get_shape(id)?;
        if !obj.shape.is_resizable() {
            return None;
        }
        let b = obj.shape.bounding_box(self.metrics());
        ResizeHandle::ALL
            .into_iter()
            .map(|h| {
                let p = h.position(&b);
                ((p.x - point.x).abs().max((p.y - point.y).abs()), h)
            })
            .filter(|(dist, _)| *dist <= radius)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, h)| h)
    }

    /// Nearest editable point within `radius` among `ids`, topmost object
    /// first. Control points win over vertices at equal distance.
    pub fn editable_point_at(&self, ids: &[u64], point: Point, radius: f64) -> Option<PointRef> {
        let mut best: Option<(f64, PointRef)> = None;
        for obj in self.objects.iter().rev() {
            if !ids.contains(&obj.id) || !obj.shape.shape_type().has_editable_points() {
                continue;
            }
            for (index, v) in obj.shape.points.iter().enumerate() {
                let candidates = [
                    (Some(v.pos), PointRole::Vertex),
                    (v.c, PointRole::Leading),
                    (v.d, PointRole::Trailing),
                ];
                for (pos, role) in candidates {
                    let Some(pos) = pos else { continue };
                    let dist = pos.distance_to(&point);
                    if dist > radius {
                        continue;
                    }
                    let better = match best {
                        None => true,
                        Some((d, _)) => dist < d || (dist == d && role != PointRole::Vertex),
                    };
                    if better {
                        best = Some((
                            dist,
                            PointRef {
                                object_id: obj.id,
                                index,
                                role,
                            },
                        ));
                    }
                }
            }
            if best.is_some() {
                break;
            }
        }
        best.map(|(_, r)| r)
    }

    /// Position of an editable point.
    pub fn point_position(&self, r: &PointRef) -> Option<Point> {
        let v = self.get_shape(r.object_id)?.shape.points.get(r.index)?;
        match r.role {
            PointRole::Vertex => Some(v.pos),
            PointRole::Leading => v.c,
            PointRole::Trailing => v.d,
        }
    }
}
