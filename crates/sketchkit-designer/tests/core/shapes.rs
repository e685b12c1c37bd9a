use proptest::prelude::*;
use sketchkit_designer::{
    FontMetrics, PathArrows, Point, Segment, Shape, ShapeColor, ShapeType, StrokeWidth, Vertex,
};

#[test]
fn test_every_type_has_a_footprint() {
    let metrics = FontMetrics::approximate();
    let pts = [Point::new(10.0, 10.0), Point::new(30.0, 20.0), Point::new(50.0, 10.0)];
    for t in ShapeType::ALL {
        let shape = match t {
            ShapeType::Text => Shape::text(pts[0], "x"),
            ShapeType::Path => Shape::path(pts.iter().copied().map(Vertex::at).collect()).unwrap(),
            _ => Shape::from_points(t, &pts[..t.min_points()]).unwrap(),
        };
        let b = shape.bounding_box(&metrics);
        assert!(b.width() > 0.0 || b.height() > 0.0, "{} has an empty box", t);
    }
}

#[test]
fn test_color_and_width_names() {
    for c in ShapeColor::ALL {
        assert_eq!(ShapeColor::from_name(c.name()), Some(c));
    }
    assert_eq!(ShapeColor::from_name("purple"), None);
    assert_eq!(StrokeWidth::new(0), StrokeWidth::THIN);
    assert_eq!(StrokeWidth::new(9), StrokeWidth::THICK);
    assert_eq!(StrokeWidth::MEDIUM.font_size(), 16.0);
}

#[test]
fn test_arrow_names() {
    assert!(PathArrows::from_name("none").is_none());
    assert_eq!(PathArrows::from_name("both").name(), Some("both"));
    assert_eq!(PathArrows::NONE.name(), None);
}

#[test]
fn test_segment_directions_skip_degenerate_controls() {
    let seg = Segment::Cubic(
        Point::new(0.0, 0.0),
        Point::new(0.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(10.0, 10.0),
    );
    assert_eq!(seg.start_direction(), (Point::new(10.0, 10.0), Point::new(0.0, 0.0)));
    assert_eq!(seg.end_direction(), (Point::new(0.0, 0.0), Point::new(10.0, 10.0)));
}

fn arb_point() -> impl Strategy<Value = Point> {
    (-500.0..500.0f64, -500.0..500.0f64).prop_map(|(x, y)| Point::new(x, y))
}

proptest! {
    #[test]
    fn prop_translate_keeps_box_size(
        a in arb_point(),
        b in arb_point(),
        c in arb_point(),
        dx in -100.0..100.0f64,
        dy in -100.0..100.0f64,
    ) {
        let metrics = FontMetrics::approximate();
        let mut shape = Shape::from_points(ShapeType::ArcArrow, &[a, b, c]).unwrap();
        let before = shape.bounding_box(&metrics);
        shape.translate(dx, dy);
        let after = shape.bounding_box(&metrics);
        prop_assert!((after.width() - before.width()).abs() < 1e-6);
        prop_assert!((after.height() - before.height()).abs() < 1e-6);
        prop_assert!((after.min_x - (before.min_x + dx)).abs() < 1e-6);
        prop_assert!((after.min_y - (before.min_y + dy)).abs() < 1e-6);
    }

    #[test]
    fn prop_scale_about_anchor_fixes_anchor(
        a in arb_point(),
        b in arb_point(),
        sx in 0.1..4.0f64,
        sy in 0.1..4.0f64,
    ) {
        let mut shape = Shape::rect(a, b);
        shape.scale_about(a, sx, sy);
        prop_assert!(shape.points[0].pos.distance_to(&a) < 1e-6);
    }

    #[test]
    fn prop_move_and_move_back_restores(
        a in arb_point(),
        b in arb_point(),
        c in arb_point(),
        dx in -500.0..500.0f64,
        dy in -500.0..500.0f64,
    ) {
        let original = Shape::path(vec![
            Vertex::at(a),
            Vertex::at(b).with_c(c),
            Vertex::at(c).with_d(a),
        ])
        .unwrap();
        let mut shape = original.clone();
        shape.translate(dx, dy);
        shape.translate(-dx, -dy);
        for (v, w) in shape.points.iter().zip(&original.points) {
            prop_assert!(v.pos.distance_to(&w.pos) < 1e-6);
            prop_assert_eq!(v.c.is_some(), w.c.is_some());
            if let (Some(p), Some(q)) = (v.c, w.c) {
                prop_assert!(p.distance_to(&q) < 1e-6);
            }
        }
    }

    #[test]
    fn prop_unit_scale_is_noop(a in arb_point(), b in arb_point(), anchor in arb_point()) {
        let original = Shape::ellipse(a, b);
        let mut shape = original.clone();
        shape.scale_about(anchor, 1.0, 1.0);
        prop_assert_eq!(shape, original);
    }
}
