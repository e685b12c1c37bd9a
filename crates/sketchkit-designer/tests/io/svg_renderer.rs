use std::sync::Arc;

use sketchkit_designer::{
    render_canvas, render_document, render_shape, CanvasMeta, Document, EditorConfig, EditorState,
    FontMetrics, Modifiers, PathArrows, Point, RenderOptions, Shape, ShapeColor, ShapeKind,
    ShapeType, SvgSurface, Tool, Vertex,
};

fn surface() -> SvgSurface {
    SvgSurface::new(100, 100)
        .with_metrics(FontMetrics::approximate())
        .with_background(None)
}

fn render(shape: &Shape) -> Vec<String> {
    let mut svg = surface();
    render_shape(&mut svg, shape, &RenderOptions::default());
    svg.elements().to_vec()
}

#[test]
fn test_every_type_emits_markup() {
    let pts = [Point::new(10.0, 10.0), Point::new(30.0, 20.0), Point::new(50.0, 10.0)];
    for t in ShapeType::ALL {
        let shape = match t {
            ShapeType::Text => Shape::text(pts[0], "hi"),
            ShapeType::Path => Shape::path(pts.iter().copied().map(Vertex::at).collect()).unwrap(),
            _ => Shape::from_points(t, &pts[..t.min_points()]).unwrap(),
        };
        assert!(!render(&shape).is_empty(), "{} drew nothing", t);
    }
}

#[test]
fn test_arrow_heads() {
    let a = Point::new(0.0, 50.0);
    let b = Point::new(60.0, 50.0);
    let arrow = Shape::from_points(ShapeType::Arrow, &[a, b]).unwrap();
    let biarrow = Shape::from_points(ShapeType::BiArrow, &[a, b]).unwrap();
    let darrow = Shape::from_points(ShapeType::DArrow, &[a, b]).unwrap();
    assert_eq!(render(&arrow).len(), 2);
    assert_eq!(render(&biarrow).len(), 3);
    // two shafts and one head
    let elements = render(&darrow);
    assert_eq!(elements.len(), 3);
    assert!(elements[0].contains("M0,52 L60,52") || elements[0].contains("M0,48 L60,48"));
}

#[test]
fn test_fill_variants_use_fill_color() {
    let shape = Shape::from_points(
        ShapeType::RectFill,
        &[Point::new(1.0, 2.0), Point::new(11.0, 22.0)],
    )
    .unwrap()
    .with_color(ShapeColor::Blue);
    let elements = render(&shape);
    assert_eq!(
        elements[0],
        r#"<rect x="1" y="2" width="10" height="20" fill="rgb(0,100,255)" stroke="none"/>"#
    );
}

#[test]
fn test_path_with_curve_keeps_cubic() {
    let path = Shape::try_new(
        ShapeKind::Path(PathArrows::from_name("end")),
        vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(20.0, 0.0).with_c(Point::new(10.0, -10.0)),
        ],
    )
    .unwrap();
    let elements = render(&path);
    assert_eq!(elements.len(), 2);
    assert!(elements[0].contains(r#"d="M0,0 C10,-10 20,0 20,0""#));
}

#[test]
fn test_icons_ignore_scale() {
    let star = Shape::from_points(ShapeType::Check, &[Point::new(10.0, 10.0)]).unwrap();
    let mut svg = surface();
    render_shape(&mut svg, &star, &RenderOptions { scale: 2.0 });
    // anchored at the scaled point, glyph keeps its 20px footprint
    assert!(svg.elements()[0].contains("M20,20 L25,27 L40,20"));
}

#[test]
fn test_document_export() {
    let doc = Document::with_shapes(
        CanvasMeta::new(64, 48),
        vec![
            Shape::line(Point::new(0.0, 0.0), Point::new(64.0, 48.0)),
            Shape::text(Point::new(4.0, 20.0), "a & b"),
        ],
    );
    let mut svg = SvgSurface::new(64, 48).with_metrics(FontMetrics::approximate());
    render_document(&mut svg, &doc, &RenderOptions::default());
    let markup = svg.finish();
    assert!(markup.contains(r#"viewBox="0 0 64 48""#));
    assert!(markup.contains(r#"fill="rgb(255,255,255)""#));
    assert!(markup.contains(">a &amp; b</text>"));
}

#[test]
fn test_editor_overlays_only_in_edit_mode() {
    let mut state = EditorState::with_metrics(
        EditorConfig::default(),
        Arc::new(FontMetrics::approximate()),
    );
    state.set_tool(Tool::Draw(ShapeType::Rect));
    for p in [Point::new(10.0, 10.0), Point::new(40.0, 30.0)] {
        state.pointer_down(p, Modifiers::NONE);
        state.pointer_up(p);
    }
    state.set_tool(Tool::Select);
    state.select_all();

    let mut svg = surface();
    render_canvas(&state, &mut svg);
    let with_overlays = svg.elements().len();

    state.set_edit_mode(false);
    let mut svg = surface();
    render_canvas(&state, &mut svg);
    assert_eq!(svg.elements().len(), 1);
    assert!(with_overlays > 1);
}
