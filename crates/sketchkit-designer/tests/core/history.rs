use std::sync::Arc;

use sketchkit_designer::history::{UndoHistory, DEFAULT_UNDO_LIMIT};
use sketchkit_designer::{Canvas, FontMetrics, Point, Shape};

fn canvas_with(n: usize) -> Canvas {
    let mut canvas = Canvas::with_metrics(Arc::new(FontMetrics::approximate()));
    for i in 0..n {
        let o = i as f64 * 10.0;
        canvas.add_shape(Shape::line(Point::new(o, 0.0), Point::new(o + 5.0, 5.0)));
    }
    canvas
}

#[test]
fn test_new_history_is_empty() {
    let history = UndoHistory::default();
    assert!(!history.can_undo());
    assert_eq!(history.limit(), DEFAULT_UNDO_LIMIT);
    assert!(history.is_empty());
}

#[test]
fn test_pop_is_last_in_first_out() {
    let mut history = UndoHistory::new(10);
    history.push(canvas_with(1).snapshot());
    history.push(canvas_with(2).snapshot());

    assert_eq!(history.pop().unwrap().len(), 2);
    assert_eq!(history.pop().unwrap().len(), 1);
    assert!(history.pop().is_none());
}

#[test]
fn test_lowering_limit_trims_oldest() {
    let mut history = UndoHistory::new(0);
    for n in 0..5 {
        history.push(canvas_with(n).snapshot());
    }
    assert_eq!(history.len(), 5);

    history.set_limit(2);
    assert_eq!(history.len(), 2);
    assert_eq!(history.pop().unwrap().len(), 4);
    assert_eq!(history.pop().unwrap().len(), 3);
}

#[test]
fn test_restore_snapshot() {
    let mut canvas = canvas_with(3);
    let snapshot = canvas.snapshot();
    canvas.clear();
    canvas.restore(snapshot);
    assert_eq!(canvas.shape_count(), 3);
}
