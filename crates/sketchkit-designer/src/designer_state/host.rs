//! Host embedding facade.
//!
//! [`SketchEditor`] wraps [`EditorState`] for a host page: it forwards input,
//! reports document changes through [`HostCallbacks`], and keeps named
//! documents in a [`LocalStore`]. Network transport stays with the host,
//! which delivers listings and documents through `update_server_list` and
//! `load_data`.

use std::path::Path;

use super::{EditOutcome, EditorConfig, EditorState, Modifiers};
use crate::canvas::Tool;
use crate::local_store::LocalStore;
use crate::model::{PathArrows, ShapeColor, StrokeWidth};
use crate::renderer::Surface;
use sketchkit_core::{Callback, DataCallback, Point, Result};

/// Notifications delivered to the host. Every callback is optional.
#[derive(Default)]
pub struct HostCallbacks {
    /// After the local store changed.
    pub on_local_change: Option<Callback>,
    /// After a server listing was delivered.
    pub on_update_server_list: Option<DataCallback<Vec<String>>>,
    /// After every document mutation, with the serialized document.
    pub on_update_data: Option<DataCallback<String>>,
    /// Load diagnostics.
    pub debug_sink: Option<DataCallback<String>>,
}

impl std::fmt::Debug for HostCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostCallbacks")
            .field("on_local_change", &self.on_local_change.is_some())
            .field("on_update_server_list", &self.on_update_server_list.is_some())
            .field("on_update_data", &self.on_update_data.is_some())
            .field("debug_sink", &self.debug_sink.is_some())
            .finish()
    }
}

/// An embeddable sketch editor.
#[derive(Debug)]
pub struct SketchEditor {
    state: EditorState,
    callbacks: HostCallbacks,
    store: LocalStore,
    server_list: Vec<String>,
}

impl SketchEditor {
    pub fn new(config: EditorConfig, callbacks: HostCallbacks) -> Self {
        Self::from_state(EditorState::new(config), callbacks)
    }

    pub fn from_state(state: EditorState, callbacks: HostCallbacks) -> Self {
        Self {
            state,
            callbacks,
            store: LocalStore::in_memory(),
            server_list: Vec::new(),
        }
    }

    pub fn with_store(mut self, store: LocalStore) -> Self {
        self.store = store;
        self
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    fn notify_data(&self) {
        if let Some(cb) = &self.callbacks.on_update_data {
            cb(self.state.data());
        }
    }

    fn notify_local(&self) {
        if let Some(cb) = &self.callbacks.on_local_change {
            cb();
        }
    }

    fn debug(&self, msg: String) {
        if let Some(cb) = &self.callbacks.debug_sink {
            cb(msg);
        }
    }

    fn report(&self, outcome: EditOutcome) -> EditOutcome {
        if outcome.is_changed() {
            self.notify_data();
        }
        outcome
    }

    fn report_changed(&self, changed: bool) -> bool {
        if changed {
            self.notify_data();
        }
        changed
    }

    pub fn pointer_down(&mut self, p: Point, modifiers: Modifiers) -> EditOutcome {
        let outcome = self.state.pointer_down(p, modifiers);
        self.report(outcome)
    }

    pub fn pointer_move(&mut self, p: Point) -> EditOutcome {
        let outcome = self.state.pointer_move(p);
        self.report(outcome)
    }

    pub fn pointer_up(&mut self, p: Point) -> EditOutcome {
        let outcome = self.state.pointer_up(p);
        self.report(outcome)
    }

    pub fn double_click(&mut self, p: Point) -> EditOutcome {
        let outcome = self.state.double_click(p);
        self.report(outcome)
    }

    pub fn key_delete(&mut self) -> EditOutcome {
        let outcome = self.state.key_delete();
        self.report(outcome)
    }

    pub fn commit_text(&mut self, text: Option<String>) -> EditOutcome {
        let outcome = self.state.commit_text(text);
        self.report(outcome)
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.state.set_tool(tool);
    }

    pub fn set_edit_mode(&mut self, edit_mode: bool) {
        self.state.set_edit_mode(edit_mode);
    }

    pub fn set_color(&mut self, color: ShapeColor) -> bool {
        let changed = self.state.set_color(color);
        self.report_changed(changed)
    }

    pub fn set_width(&mut self, width: StrokeWidth) -> bool {
        let changed = self.state.set_width(width);
        self.report_changed(changed)
    }

    pub fn set_arrows(&mut self, arrows: PathArrows) -> bool {
        let changed = self.state.set_arrows(arrows);
        self.report_changed(changed)
    }

    /// Replaces the string of the single selected text shape.
    pub fn set_selected_text(&mut self, text: &str) -> bool {
        let changed = self.state.set_selected_text(text);
        self.report_changed(changed)
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.state.undo();
        self.report_changed(changed)
    }

    pub fn clear(&mut self) -> bool {
        let changed = self.state.clear();
        self.report_changed(changed)
    }

    /// Replaces the document with `text` delivered by the host. Decoding
    /// problems go to the debug sink; the shapes read before the problem are
    /// kept.
    pub fn load_data(&mut self, text: &str) {
        if let Some(err) = self.state.load_data(text) {
            tracing::warn!("Document loaded with errors: {}", err);
            self.debug(format!("load: {}", err));
        }
    }

    pub fn data(&self) -> String {
        self.state.data()
    }

    pub fn save_as_image(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        self.state.save_as_image(path)
    }

    pub fn save_svg(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        self.state.save_svg(path)
    }

    /// Draws the document and overlays.
    pub fn render(&self, surface: &mut dyn Surface) {
        super::render_canvas(&self.state, surface);
    }

    pub fn save_local(&mut self, name: &str) -> Result<()> {
        let data = self.state.data();
        self.store.save(name, &data)?;
        tracing::debug!("Saved local document '{}'", name);
        self.notify_local();
        Ok(())
    }

    pub fn list_local(&self) -> Vec<String> {
        self.store.list()
    }

    pub fn load_local(&mut self, name: &str) -> Result<()> {
        let text = self.store.load(name)?;
        self.load_data(&text);
        Ok(())
    }

    pub fn delete_local(&mut self, name: &str) -> Result<()> {
        self.store.delete(name)?;
        self.notify_local();
        Ok(())
    }

    /// Accepts a document listing fetched by the host.
    pub fn update_server_list(&mut self, list: Vec<String>) {
        self.server_list = list;
        if let Some(cb) = &self.callbacks.on_update_server_list {
            cb(self.server_list.clone());
        }
    }

    pub fn server_list(&self) -> &[String] {
        &self.server_list
    }
}
