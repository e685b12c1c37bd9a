use proptest::prelude::*;
use sketchkit_designer::path_data::{decode_path, decode_points, encode_path, encode_points};
use sketchkit_designer::serialization::{encode_shape, load_from_file, save_to_file};
use sketchkit_designer::{
    decode, decode_strict, encode, CanvasMeta, Document, PathArrows, Point, Segment, Shape,
    ShapeColor, ShapeKind, ShapeType, StrokeWidth, Vertex,
};
use sketchkit_core::ParseError;

fn sample_of(t: ShapeType) -> Shape {
    let pts = [Point::new(10.0, 10.0), Point::new(30.5, 20.0), Point::new(50.0, -10.0)];
    match t {
        ShapeType::Text => Shape::text(pts[0], "Hello, \"world\""),
        ShapeType::Path => Shape::try_new(
            ShapeKind::Path(PathArrows {
                start: true,
                end: true,
            }),
            vec![
                Vertex::at(pts[0]),
                Vertex::at(pts[1]).with_c(Point::new(15.0, 0.0)),
                Vertex::at(pts[2])
                    .with_c(Point::new(40.0, 30.0))
                    .with_d(Point::new(45.0, 0.0)),
            ],
        )
        .unwrap(),
        _ => Shape::from_points(t, &pts[..t.min_points()]).unwrap(),
    }
}

#[test]
fn test_line_example_record() {
    let line = Shape::line(Point::new(10.0, 10.0), Point::new(50.0, 10.0));
    let record = serde_json::to_string(&encode_shape(&line)).unwrap();
    assert_eq!(record, r#"{"type":"line","points":"10,10:50,10"}"#);

    let doc = decode_strict(&format!("[{}]", record)).unwrap();
    assert_eq!(doc.shapes[0].color, ShapeColor::Black);
    assert_eq!(doc.shapes[0].width, StrokeWidth::THIN);
}

#[test]
fn test_path_example_record() {
    let path = Shape::path(vec![
        Vertex::new(0.0, 0.0),
        Vertex::new(20.0, 0.0).with_c(Point::new(10.0, -10.0)),
    ])
    .unwrap();
    let record = encode_shape(&path);
    assert_eq!(record.d.as_deref(), Some("M0,0C10,-10 20,0 20,0"));
    assert_eq!(record.arrow, None);
}

#[test]
fn test_every_type_round_trips_with_style() {
    for (i, t) in ShapeType::ALL.into_iter().enumerate() {
        let color = ShapeColor::ALL[i % ShapeColor::ALL.len()];
        let width = StrokeWidth::new((i % 3) as u8 + 1);
        let shape = sample_of(t).with_color(color).with_width(width);
        let doc = Document::with_shapes(CanvasMeta::default(), vec![shape]);
        assert_eq!(decode_strict(&encode(&doc)).unwrap(), doc, "{}", t);
    }
}

#[test]
fn test_mixed_document_keeps_paint_order() {
    let shapes: Vec<Shape> = ShapeType::ALL.into_iter().rev().map(sample_of).collect();
    let doc = Document::with_shapes(CanvasMeta::new(800, 600), shapes);
    let text = encode(&doc);
    assert_eq!(text.lines().count(), doc.len() + 3);

    let back = decode_strict(&text).unwrap();
    let types: Vec<ShapeType> = back.shapes.iter().map(Shape::shape_type).collect();
    let expected: Vec<ShapeType> = ShapeType::ALL.into_iter().rev().collect();
    assert_eq!(types, expected);
    assert_eq!(back.meta, CanvasMeta::new(800, 600));
}

#[test]
fn test_unknown_types_are_skipped() {
    let text = r#"[
{"type":"meta","size":[100,100]},
{"type":"hexagon","points":"0,0"},
{"type":"rect","points":"0,0:10,10","color":"blue"}
]"#;
    let decoded = decode(text);
    assert!(decoded.is_complete());
    assert_eq!(decoded.document.len(), 1);
    assert_eq!(decoded.document.shapes[0].color, ShapeColor::Blue);
}

#[test]
fn test_legacy_names_are_accepted() {
    let text = r#"[{"type":"barrow","points":"0,0:10,0"},{"type":"dallow","points":"0,0:10,0"}]"#;
    let doc = decode_strict(text).unwrap();
    assert_eq!(doc.shapes[0].shape_type(), ShapeType::BiArrow);
    assert_eq!(doc.shapes[1].shape_type(), ShapeType::DArrow);
    assert!(encode(&doc).contains(r#""type":"biarrow""#));
}

#[test]
fn test_partial_decode_keeps_prefix() {
    let text = r#"[
{"type":"line","points":"0,0:5,5"},
{"type":"arc","points":"0,0:5,5"},
{"type":"rect","points":"0,0:5,5"}
]"#;
    let decoded = decode(text);
    assert_eq!(decoded.document.len(), 1);
    assert!(matches!(
        decoded.error,
        Some(ParseError::PointCount { expected: 3, found: 2, .. })
    ));
    assert!(decode_strict(text).is_err());
}

#[test]
fn test_missing_fields_are_errors() {
    let decoded = decode(r#"[{"type":"text","points":"1,1"}]"#);
    assert!(matches!(
        decoded.error,
        Some(ParseError::MissingField { field: "text", .. })
    ));
    let decoded = decode(r#"[{"type":"path"}]"#);
    assert!(matches!(
        decoded.error,
        Some(ParseError::MissingField { field: "d", .. })
    ));
}

#[test]
fn test_blank_and_broken_containers() {
    let blank = decode("  \n");
    assert!(blank.is_complete());
    assert!(blank.document.is_empty());
    assert_eq!(blank.document.meta, CanvasMeta::default());

    let broken = decode("[{\"type\":\"line\"");
    assert!(matches!(
        broken.error,
        Some(ParseError::InvalidContainer { .. })
    ));
}

#[test]
fn test_block_yaml_document() {
    let decoded = decode("- type: meta\n  size: [640, 480]\n- type: line\n  points: '10,10:50,10'\n");
    assert!(decoded.is_complete(), "{:?}", decoded.error);
    assert_eq!(decoded.document.meta, CanvasMeta::new(640, 480));
    assert_eq!(
        decoded.document.shapes,
        vec![Shape::line(Point::new(10.0, 10.0), Point::new(50.0, 10.0))]
    );
}

#[test]
fn test_yaml_scalars_keep_their_meaning() {
    let text = "\
- type: meta
  size: [200, 100]
- type: rect
  points: 0,0:20,10
  color: red
  width: 2
- type: text
  points: 5,5
  text: 42
- type: path
  d: M0,0C10,0 10,10 0,10
  arrow: end
- type: blob
  points: 1,1
";
    let decoded = decode(text);
    assert!(decoded.is_complete(), "{:?}", decoded.error);
    let shapes = &decoded.document.shapes;
    assert_eq!(shapes.len(), 3);
    assert_eq!(shapes[0].color, ShapeColor::Red);
    assert_eq!(shapes[0].width, StrokeWidth::MEDIUM);
    assert_eq!(shapes[1].text_content(), Some("42"));
    assert_eq!(shapes[2].shape_type(), ShapeType::Path);
    assert_eq!(shapes[2].points.len(), 2);

    // The same document written as JSON decodes identically.
    let json = encode(&decoded.document);
    assert_eq!(decode_strict(&json).unwrap(), decoded.document);
}

#[test]
fn test_yaml_errors_are_container_errors() {
    let decoded = decode("type: line\npoints: 1,1:2,2\n");
    assert!(matches!(
        decoded.error,
        Some(ParseError::InvalidContainer { .. })
    ));
    let decoded = decode("- type: line\n  points: 1,1\n");
    assert!(matches!(
        decoded.error,
        Some(ParseError::PointCount { .. })
    ));
}

#[test]
fn test_bad_meta_size() {
    let decoded = decode(r#"[{"type":"meta","size":[0,10]}]"#);
    assert!(matches!(
        decoded.error,
        Some(ParseError::InvalidRecord { index: 0, .. })
    ));
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("figure.json");
    let doc = Document::with_shapes(
        CanvasMeta::new(120, 90),
        vec![sample_of(ShapeType::Path), sample_of(ShapeType::Text)],
    );
    save_to_file(&doc, &path).unwrap();
    assert_eq!(load_from_file(&path).unwrap(), doc);

    std::fs::write(&path, "[{\"type\":\"rect\"}]").unwrap();
    let err = load_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse sketch file"));
}

fn arb_coord() -> impl Strategy<Value = f64> {
    prop_oneof![
        (-2000i32..2000).prop_map(f64::from),
        -1.0e6..1.0e6f64,
        -1.0e-3..1.0e-3f64,
        (-1.0e300..1.0e300f64),
    ]
}

fn arb_point() -> impl Strategy<Value = Point> {
    (arb_coord(), arb_coord()).prop_map(|(x, y)| Point::new(x, y))
}

fn arb_vertex() -> impl Strategy<Value = Vertex> {
    (
        arb_point(),
        proptest::option::of(arb_point()),
        proptest::option::of(arb_point()),
    )
        .prop_map(|(pos, c, d)| Vertex { pos, c, d })
}

/// A trailing control equal to the vertex is indistinguishable from none.
fn normalized(v: &Vertex) -> Vertex {
    Vertex {
        d: v.d.filter(|d| *d != v.pos),
        ..*v
    }
}

/// A cubic whose controls sit on its ends draws the same as a line.
fn resolved(points: &[Vertex]) -> Vec<Segment> {
    points
        .windows(2)
        .map(|w| match Segment::between(&w[0], &w[1]) {
            Segment::Cubic(a, c1, c2, b) if c1 == a && c2 == b => Segment::Line(a, b),
            seg => seg,
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_point_tokens_round_trip(vertices in prop::collection::vec(arb_vertex(), 1..8)) {
        let decoded = decode_points(&encode_points(&vertices)).unwrap();
        let expected: Vec<Vertex> = vertices.iter().map(normalized).collect();
        prop_assert_eq!(decoded, expected);
    }

    #[test]
    fn prop_path_data_round_trip(vertices in prop::collection::vec(arb_vertex(), 2..8)) {
        let decoded = decode_path(&encode_path(&vertices)).unwrap();
        prop_assert_eq!(decoded.len(), vertices.len());
        prop_assert_eq!(decoded[0].pos, vertices[0].pos);
        prop_assert_eq!(resolved(&decoded), resolved(&vertices));
    }

    #[test]
    fn prop_document_round_trip(
        a in arb_point(),
        b in arb_point(),
        c in arb_point(),
        path in prop::collection::vec(arb_vertex(), 2..6),
        color in 0..ShapeColor::ALL.len(),
        width in prop_oneof![Just(StrokeWidth::THIN), Just(StrokeWidth::MEDIUM), Just(StrokeWidth::THICK)],
    ) {
        let doc = Document::with_shapes(
            CanvasMeta::new(320, 240),
            vec![
                Shape::rect(a, b).with_color(ShapeColor::ALL[color]).with_width(width),
                Shape::from_points(ShapeType::Arc, &[a, b, c]).unwrap(),
                Shape::path(path.clone()).unwrap(),
            ],
        );
        let back = decode_strict(&encode(&doc)).unwrap();
        prop_assert_eq!(back.meta, doc.meta);
        prop_assert_eq!(&back.shapes[..2], &doc.shapes[..2]);
        prop_assert_eq!(resolved(&back.shapes[2].points), resolved(&path));
    }
}
