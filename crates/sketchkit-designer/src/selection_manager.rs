use crate::canvas::Canvas;
use std::collections::BTreeSet;

/// Manages shape selection state and selection operations.
///
/// `SelectionManager` is responsible for:
/// - Tracking which shapes are selected, by their stable canvas id
/// - Click selection (replace, or add with Shift)
/// - Rubber-band selection, which replaces the selection
/// - Dropping ids whose shapes no longer exist
///
/// # Selection Model
///
/// - **Single Selection**: exactly one id selected; only then are resize
///   handles offered
/// - **Multiple Selection**: any number of ids; moves, recolors and deletes
///   apply to all of them
///
/// # Design
///
/// The manager stores ids only. It never owns shapes, so it is cleared
/// whenever the canvas content is replaced (load, clear, undo).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionManager {
    selected: BTreeSet<u64>,
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with no selection.
    ///
    /// # Examples
    ///
    /// ```
    /// use sketchkit_designer::selection_manager::SelectionManager;
    ///
    /// let manager = SelectionManager::new();
    /// assert!(manager.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_selected(&self, id: u64) -> bool {
        self.selected.contains(&id)
    }

    /// Selected ids in ascending (creation) order.
    pub fn ids(&self) -> Vec<u64> {
        self.selected.iter().copied().collect()
    }

    /// The selected id when exactly one shape is selected.
    ///
    /// # Returns
    ///
    /// `Some(id)` for a single selection, `None` when nothing or several
    /// shapes are selected.
    pub fn single(&self) -> Option<u64> {
        if self.selected.len() == 1 {
            self.selected.iter().next().copied()
        } else {
            None
        }
    }

    /// Selects a shape after a click.
    ///
    /// # Arguments
    ///
    /// * `id` - The clicked shape
    /// * `multi` - If `true` (Shift+click), adds to the current selection;
    ///   otherwise replaces it
    pub fn select(&mut self, id: u64, multi: bool) {
        if !multi {
            self.selected.clear();
        }
        self.selected.insert(id);
    }

    pub fn deselect(&mut self, id: u64) -> bool {
        self.selected.remove(&id)
    }

    /// Replaces the selection, as a finished rubber band does.
    pub fn replace(&mut self, ids: impl IntoIterator<Item = u64>) {
        self.selected = ids.into_iter().collect();
    }

    /// Selects every shape on the canvas.
    pub fn select_all(&mut self, canvas: &Canvas) {
        self.replace(canvas.objects().iter().map(|o| o.id));
    }

    /// Deselects all shapes.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Drops ids that no longer exist on `canvas`.
    pub fn retain_existing(&mut self, canvas: &Canvas) {
        self.selected.retain(|id| canvas.contains(*id));
    }
}
