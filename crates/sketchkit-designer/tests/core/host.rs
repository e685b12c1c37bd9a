use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use sketchkit_designer::{
    EditOutcome, EditorConfig, EditorState, FontMetrics, HostCallbacks, LocalStore, Modifiers,
    Point, ShapeType, SketchEditor, Tool,
};

#[derive(Default)]
struct Recorder {
    data: Mutex<Vec<String>>,
    debug: Mutex<Vec<String>>,
    local: AtomicUsize,
    listings: Mutex<Vec<Vec<String>>>,
}

fn editor(recorder: &Arc<Recorder>) -> SketchEditor {
    let data = recorder.clone();
    let debug = recorder.clone();
    let local = recorder.clone();
    let listings = recorder.clone();
    let callbacks = HostCallbacks {
        on_update_data: Some(Box::new(move |text| {
            data.data.lock().unwrap().push(text);
        })),
        debug_sink: Some(Box::new(move |msg| {
            debug.debug.lock().unwrap().push(msg);
        })),
        on_local_change: Some(Box::new(move || {
            local.local.fetch_add(1, Ordering::SeqCst);
        })),
        on_update_server_list: Some(Box::new(move |list| {
            listings.listings.lock().unwrap().push(list);
        })),
    };
    let state = EditorState::with_metrics(
        EditorConfig::default(),
        Arc::new(FontMetrics::approximate()),
    );
    SketchEditor::from_state(state, callbacks)
}

fn click(editor: &mut SketchEditor, x: f64, y: f64) -> EditOutcome {
    let p = Point::new(x, y);
    let outcome = editor.pointer_down(p, Modifiers::NONE);
    editor.pointer_up(p);
    outcome
}

#[test]
fn test_update_data_fires_once_per_change() {
    let recorder = Arc::new(Recorder::default());
    let mut editor = editor(&recorder);
    editor.set_tool(Tool::Draw(ShapeType::Rect));

    click(&mut editor, 10.0, 10.0);
    assert!(recorder.data.lock().unwrap().is_empty());

    click(&mut editor, 40.0, 30.0);
    let data = recorder.data.lock().unwrap().clone();
    assert_eq!(data.len(), 1);
    assert!(data[0].contains(r#"{"type":"rect","points":"10,10:40,30"}"#));
    assert_eq!(data[0], editor.data());
}

#[test]
fn test_selection_only_does_not_notify() {
    let recorder = Arc::new(Recorder::default());
    let mut editor = editor(&recorder);
    editor.set_tool(Tool::Draw(ShapeType::Star));
    click(&mut editor, 10.0, 10.0);
    editor.set_tool(Tool::Select);
    click(&mut editor, 15.0, 15.0);
    assert_eq!(recorder.data.lock().unwrap().len(), 1);

    assert!(editor.undo());
    assert_eq!(recorder.data.lock().unwrap().len(), 2);
    assert!(!editor.undo());
    assert_eq!(recorder.data.lock().unwrap().len(), 2);
}

#[test]
fn test_replacing_selected_text_notifies() {
    let recorder = Arc::new(Recorder::default());
    let mut editor = editor(&recorder);
    editor.load_data(r#"[{"type":"text","points":"10,30","text":"hello"}]"#);
    editor.set_tool(Tool::Select);
    assert!(!editor.set_selected_text("ignored"));
    assert!(recorder.data.lock().unwrap().is_empty());

    click(&mut editor, 12.0, 26.0);
    assert!(editor.set_selected_text("goodbye"));
    let data = recorder.data.lock().unwrap().clone();
    assert_eq!(data.len(), 1);
    assert!(data[0].contains(r#""text":"goodbye""#));
    assert!(editor.undo());
    assert!(editor.data().contains(r#""text":"hello""#));
}

#[test]
fn test_load_data_reports_problems_to_debug_sink() {
    let recorder = Arc::new(Recorder::default());
    let mut editor = editor(&recorder);

    editor.load_data(
        "[{\"type\":\"meta\",\"size\":[200,100]},\
         {\"type\":\"line\",\"points\":\"0,0:5,5\"},\
         {\"type\":\"rect\",\"points\":\"0,0:oops\"}]",
    );
    assert_eq!(editor.state().canvas().shape_count(), 1);
    let debug = recorder.debug.lock().unwrap().clone();
    assert_eq!(debug.len(), 1);
    assert!(debug[0].starts_with("load: "));
    // loading is host-driven and is not echoed back
    assert!(recorder.data.lock().unwrap().is_empty());
}

#[test]
fn test_local_store_round_trip() {
    let recorder = Arc::new(Recorder::default());
    let mut editor = editor(&recorder).with_store(LocalStore::in_memory());
    editor.set_tool(Tool::Draw(ShapeType::Line));
    click(&mut editor, 0.0, 0.0);
    click(&mut editor, 20.0, 20.0);

    editor.save_local("figure-1").unwrap();
    assert_eq!(recorder.local.load(Ordering::SeqCst), 1);
    assert_eq!(editor.list_local(), vec!["figure-1".to_string()]);

    editor.clear();
    assert!(editor.state().canvas().is_empty());
    editor.load_local("figure-1").unwrap();
    assert_eq!(editor.state().canvas().shape_count(), 1);

    editor.delete_local("figure-1").unwrap();
    assert_eq!(recorder.local.load(Ordering::SeqCst), 2);
    assert!(editor.load_local("figure-1").is_err());
    assert!(editor.save_local("  ").is_err());
}

#[test]
fn test_server_list_is_forwarded() {
    let recorder = Arc::new(Recorder::default());
    let mut editor = editor(&recorder);
    editor.update_server_list(vec!["a".to_string(), "b".to_string()]);
    assert_eq!(editor.server_list(), ["a".to_string(), "b".to_string()]);
    assert_eq!(recorder.listings.lock().unwrap().len(), 1);
}

#[test]
fn test_view_only_editor_never_notifies() {
    let recorder = Arc::new(Recorder::default());
    let mut editor = editor(&recorder);
    editor.set_edit_mode(false);
    editor.set_tool(Tool::Draw(ShapeType::Star));
    assert_eq!(click(&mut editor, 10.0, 10.0), EditOutcome::Ignored);
    assert!(editor.state().canvas().is_empty());
    assert!(recorder.data.lock().unwrap().is_empty());
}
