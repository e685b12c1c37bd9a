use std::sync::Arc;

use sketchkit_designer::raster::{scaled_size, FAILURE_MARKER};
use sketchkit_designer::{
    encode, rasterize, rasterize_text, CanvasMeta, Document, EditorConfig, EditorState,
    FontMetrics, Point, RasterOptions, RasterOutput, RenderOptions, Rgb, Shape, ShapeColor,
    ShapeType, StrokeWidth, Vertex,
};

fn options() -> RasterOptions {
    RasterOptions {
        font: FontMetrics::approximate(),
        ..Default::default()
    }
}

fn filled(t: ShapeType, a: (f64, f64), b: (f64, f64), color: ShapeColor) -> Shape {
    Shape::from_points(t, &[Point::new(a.0, a.1), Point::new(b.0, b.1)])
        .unwrap()
        .with_color(color)
}

#[test]
fn test_output_size_follows_meta_and_scale() {
    let doc = Document::new(CanvasMeta::new(120, 80));
    assert_eq!(scaled_size(&doc, 1.0), (120, 80));
    assert_eq!(scaled_size(&doc, 0.5), (60, 40));
    assert_eq!(scaled_size(&doc, 0.0), (1, 1));

    let opts = RasterOptions {
        render: RenderOptions { scale: 2.0 },
        ..options()
    };
    let surface = rasterize(&doc, &opts).unwrap();
    assert_eq!((surface.width(), surface.height()), (240, 160));
}

#[test]
fn test_png_header_and_dimensions() {
    let doc = Document::new(CanvasMeta::new(33, 17));
    let out = rasterize_text(&encode(&doc), &options());
    let RasterOutput::Image(png) = out else {
        panic!("expected an image");
    };
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    let img = image::load_from_memory(&png).unwrap();
    assert_eq!((img.width(), img.height()), (33, 17));
}

#[test]
fn test_later_shapes_paint_over_earlier() {
    let doc = Document::with_shapes(
        CanvasMeta::new(40, 40),
        vec![
            filled(ShapeType::RectFill, (0.0, 0.0), (40.0, 40.0), ShapeColor::Red),
            filled(ShapeType::EllipseFill, (10.0, 10.0), (30.0, 30.0), ShapeColor::Blue),
        ],
    );
    let surface = rasterize(&doc, &options()).unwrap();
    assert_eq!(surface.pixel(20, 20), Some(ShapeColor::Blue.rgb()));
    assert_eq!(surface.pixel(2, 2), Some(ShapeColor::Red.rgb()));
}

#[test]
fn test_scale_applies_to_coordinates() {
    let doc = Document::with_shapes(
        CanvasMeta::new(20, 20),
        vec![filled(ShapeType::RectFill, (10.0, 10.0), (20.0, 20.0), ShapeColor::Green)],
    );
    let opts = RasterOptions {
        render: RenderOptions { scale: 2.0 },
        ..options()
    };
    let surface = rasterize(&doc, &opts).unwrap();
    assert_eq!(surface.pixel(30, 30), Some(ShapeColor::Green.rgb()));
    assert_eq!(surface.pixel(15, 15), Some(Rgb::new(255, 255, 255)));
}

#[test]
fn test_thick_line_is_drawn_with_both_curve_modes() {
    let doc = Document::with_shapes(
        CanvasMeta::new(60, 60),
        vec![Shape::path(vec![
            Vertex::new(5.0, 30.0),
            Vertex::new(55.0, 30.0).with_c(Point::new(30.0, 30.0)),
        ])
        .unwrap()
        .with_width(StrokeWidth::THICK)],
    );
    for native_curves in [true, false] {
        let opts = RasterOptions {
            native_curves,
            ..options()
        };
        let surface = rasterize(&doc, &opts).unwrap();
        assert_eq!(surface.pixel(30, 30), Some(Rgb::new(0, 0, 0)), "native={}", native_curves);
        assert_eq!(surface.pixel(30, 10), Some(Rgb::new(255, 255, 255)));
    }
}

#[test]
fn test_anti_alias_can_be_switched_off() {
    let doc = Document::with_shapes(
        CanvasMeta::new(40, 40),
        vec![filled(ShapeType::EllipseFill, (5.0, 5.0), (35.0, 35.0), ShapeColor::Red)],
    );
    let blended = |anti_alias: bool| {
        let opts = RasterOptions {
            anti_alias,
            ..options()
        };
        let surface = rasterize(&doc, &opts).unwrap();
        (0..40)
            .flat_map(|y| (0..40).map(move |x| (x, y)))
            .filter_map(|(x, y)| surface.pixel(x, y))
            .filter(|c| *c != Rgb::new(255, 0, 0) && *c != Rgb::new(255, 255, 255))
            .count()
    };
    assert!(blended(true) > 0);
    assert_eq!(blended(false), 0);
}

#[test]
fn test_far_away_coordinates_still_render() {
    let text = r#"[{"type":"meta","size":[64,64]},
{"type":"arc","points":"0,0:1e300,0:0,10"},
{"type":"arcbiarrow","points":"0,0:-1e300,1e300:20,20"},
{"type":"path","d":"M0,0C1e300,1e300 -1e300,5 30,30","arrow":"both"},
{"type":"ellipsefill","points":"-1e300,-1e300:1e300,1e300"},
{"type":"text","points":"1e300,5","text":"far"}]"#;
    for native_curves in [true, false] {
        let opts = RasterOptions {
            native_curves,
            ..options()
        };
        let out = rasterize_text(text, &opts);
        assert!(matches!(out, RasterOutput::Image(_)), "native={}", native_curves);
    }
}

#[test]
fn test_malformed_input_yields_failure_marker() {
    for text in ["not json", r#"[{"type":"line","points":"1,2"}]"#] {
        let out = rasterize_text(text, &options());
        assert!(out.is_failure());
        let bytes = out.into_bytes();
        let text = String::from_utf8(bytes).unwrap();
        let (marker, message) = text.split_once('\n').unwrap();
        assert_eq!(marker, FAILURE_MARKER);
        assert!(!message.is_empty());
    }
}

#[test]
fn test_save_as_image_writes_png() {
    let mut state = EditorState::with_metrics(
        EditorConfig::default(),
        Arc::new(FontMetrics::approximate()),
    );
    state.load_data(&encode(&Document::with_shapes(
        CanvasMeta::new(50, 30),
        vec![Shape::rect(Point::new(5.0, 5.0), Point::new(45.0, 25.0))],
    )));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sketch.png");
    state.save_as_image(&path).unwrap();
    let img = image::open(&path).unwrap();
    assert_eq!((img.width(), img.height()), (50, 30));

    let missing = dir.path().join("no/such/dir/sketch.png");
    assert!(state.save_as_image(&missing).is_err());
}
