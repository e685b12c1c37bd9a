//! Editor state for host integration.
//! Collects the canvas, selection, undo history, active tool and in-progress
//! gesture into one value, and routes every document mutation through
//! [`EditorState::apply_edit`].
//!
//! This module is split into submodules:
//! - `input`: pointer and key handling
//! - `view`: rendering the document plus editor overlays
//! - `file_io`: text load/save and image export
//! - `host`: the embedding facade with host callbacks and the local store

mod file_io;
mod host;
mod input;
mod view;

pub use host::{HostCallbacks, SketchEditor};
pub use view::{render_canvas, HANDLE_COLOR, SELECTION_COLOR};

use std::sync::Arc;

use crate::canvas::{Canvas, CanvasSnapshot, PointRef, ResizeHandle, Tool, DEFAULT_HIT_TOLERANCE};
use crate::commands::EditCommand;
use crate::font_manager::FontMetrics;
use crate::history::{UndoHistory, DEFAULT_UNDO_LIMIT};
use crate::model::{PathArrows, ShapeColor, StrokeWidth, TextMetrics, Vertex};
use crate::selection_manager::SelectionManager;
use sketchkit_core::Point;

/// Editor behavior chosen by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    /// `false` makes the editor view-only: pointer and key input is ignored.
    pub edit_mode: bool,
    /// Surface pixels per document unit.
    pub scale: f64,
    /// Grid pitch for snapping pointer input; 0 disables snapping.
    pub grid: f64,
    /// Margin around bounding boxes for hit-testing and box selection.
    pub hit_tolerance: f64,
    /// Half-size of the resize handle hot-zone.
    pub handle_size: f64,
    /// Maximum undo depth; 0 is unbounded.
    pub undo_limit: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            edit_mode: true,
            scale: 1.0,
            grid: 0.0,
            hit_tolerance: DEFAULT_HIT_TOLERANCE,
            handle_size: 6.0,
            undo_limit: DEFAULT_UNDO_LIMIT,
        }
    }
}

/// What an input event did, so the host knows whether to redraw or persist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditOutcome {
    /// Nothing happened.
    Ignored,
    /// Only editor overlays (selection, pending points) changed.
    Redraw,
    /// The document changed.
    Changed,
    /// The host should prompt for a string and call `commit_text`.
    TextRequested { at: Point },
}

impl EditOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, EditOutcome::Changed)
    }
}

/// Keyboard modifiers held during a pointer press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false };
    pub const SHIFT: Modifiers = Modifiers { shift: true };
}

/// Where a pending text string will go.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextTarget {
    New(Point),
    Existing(u64),
}

/// Pointer gesture in progress. Gestures that mutate hold the snapshot taken
/// at press until the first real change, when it is pushed onto the history;
/// a gesture that never changed anything drops it on release.
#[derive(Debug, Clone, Default)]
pub(crate) enum Gesture {
    #[default]
    Idle,
    Moving {
        last: Point,
        pending: Option<CanvasSnapshot>,
    },
    Sizing {
        id: u64,
        handle: ResizeHandle,
        pending: Option<CanvasSnapshot>,
    },
    DraggingPoint {
        point: PointRef,
        last: Point,
        pending: Option<CanvasSnapshot>,
    },
    BoxSelecting {
        start: Point,
        current: Point,
    },
    /// Pen drag after placing a path vertex.
    PlacingVertex,
}

/// The complete editor state.
#[derive(Debug, Clone)]
pub struct EditorState {
    pub(crate) config: EditorConfig,
    pub(crate) canvas: Canvas,
    pub(crate) selection: SelectionManager,
    pub(crate) history: UndoHistory,
    pub(crate) tool: Tool,
    pub(crate) color: ShapeColor,
    pub(crate) width: StrokeWidth,
    pub(crate) arrows: PathArrows,
    pub(crate) gesture: Gesture,
    /// Points placed so far by the active drawing tool.
    pub(crate) pending: Vec<Vertex>,
    /// Leading control for the next path vertex, set by a pen drag.
    pub(crate) next_leading: Option<Point>,
    pub(crate) text_target: Option<TextTarget>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorState {
    /// Creates a new editor measuring text with the system font.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_metrics(config, Arc::new(FontMetrics::system()))
    }

    pub fn with_metrics(config: EditorConfig, metrics: Arc<dyn TextMetrics + Send + Sync>) -> Self {
        Self {
            config,
            canvas: Canvas::with_metrics(metrics),
            selection: SelectionManager::new(),
            history: UndoHistory::new(config.undo_limit),
            tool: Tool::default(),
            color: ShapeColor::default(),
            width: StrokeWidth::default(),
            arrows: PathArrows::NONE,
            gesture: Gesture::Idle,
            pending: Vec::new(),
            next_leading: None,
            text_target: None,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EditorConfig) {
        self.history.set_limit(config.undo_limit);
        if !config.edit_mode {
            self.cancel();
        }
        self.config = config;
    }

    pub fn set_edit_mode(&mut self, edit_mode: bool) {
        self.set_config(EditorConfig {
            edit_mode,
            ..self.config
        });
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> ShapeColor {
        self.color
    }

    pub fn width(&self) -> StrokeWidth {
        self.width
    }

    pub fn arrows(&self) -> PathArrows {
        self.arrows
    }

    /// Points placed by the active drawing tool, not yet committed.
    pub fn pending_points(&self) -> &[Vertex] {
        &self.pending
    }

    pub fn text_target(&self) -> Option<TextTarget> {
        self.text_target
    }

    /// Switches tools, dropping any half-drawn shape.
    pub fn set_tool(&mut self, tool: Tool) {
        if tool != self.tool {
            tracing::debug!("Tool {} -> {}", self.tool, tool);
        }
        self.cancel();
        self.tool = tool;
    }

    /// Drops the pending shape, text prompt and gesture. A gesture already in
    /// progress keeps the changes it made.
    pub fn cancel(&mut self) {
        self.pending.clear();
        self.next_leading = None;
        self.text_target = None;
        self.gesture = Gesture::Idle;
    }

    /// The single entry point for document mutations. Takes an undo snapshot
    /// first; commands that would change nothing are dropped.
    pub fn apply_edit(&mut self, command: EditCommand) -> bool {
        if !command.changes(&self.canvas) {
            tracing::debug!("Skipping no-op edit: {}", command.name());
            return false;
        }
        self.history.push(self.canvas.snapshot());
        command.apply(&mut self.canvas);
        match command {
            EditCommand::Clear | EditCommand::Replace(_) => self.selection.clear(),
            _ => self.selection.retain_existing(&self.canvas),
        }
        tracing::debug!("Applied {} ({} undo step(s))", command.name(), self.history.len());
        true
    }

    /// Restores the last snapshot and clears the selection. No-op on an empty
    /// history.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.pop() else {
            return false;
        };
        self.canvas.restore(snapshot);
        self.selection.clear();
        self.cancel();
        true
    }

    /// Removes every shape (undoable).
    pub fn clear(&mut self) -> bool {
        self.cancel();
        self.apply_edit(EditCommand::Clear)
    }

    /// Sets the current color and recolors the selection.
    pub fn set_color(&mut self, color: ShapeColor) -> bool {
        self.color = color;
        let ids = self.selection.ids();
        self.apply_edit(EditCommand::SetColor { ids, color })
    }

    /// Sets the current width class and applies it to the selection.
    pub fn set_width(&mut self, width: StrokeWidth) -> bool {
        self.width = width;
        let ids = self.selection.ids();
        self.apply_edit(EditCommand::SetWidth { ids, width })
    }

    /// Sets arrowheads for new paths and for selected paths.
    pub fn set_arrows(&mut self, arrows: PathArrows) -> bool {
        self.arrows = arrows;
        let ids = self.selection.ids();
        self.apply_edit(EditCommand::SetPathArrows { ids, arrows })
    }

    /// Replaces the string of the single selected text shape.
    pub fn set_selected_text(&mut self, text: &str) -> bool {
        let Some(id) = self.selection.single() else {
            return false;
        };
        self.apply_edit(EditCommand::SetText {
            id,
            text: text.to_string(),
        })
    }

    /// Key delete: removes every selected shape.
    pub fn delete_selected(&mut self) -> bool {
        if !self.config.edit_mode || self.selection.is_empty() {
            return false;
        }
        let ids = self.selection.ids();
        self.apply_edit(EditCommand::DeleteShapes { ids })
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(&self.canvas);
    }
}
