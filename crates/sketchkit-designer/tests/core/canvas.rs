use std::sync::Arc;

use sketchkit_designer::{
    Bounds, Canvas, CanvasMeta, Document, FontMetrics, Point, PointRef, PointRole, ResizeHandle,
    Shape, ShapeColor, ShapeType, Vertex,
};

fn canvas() -> Canvas {
    Canvas::with_metrics(Arc::new(FontMetrics::approximate()))
}

fn curved_path() -> Shape {
    Shape::path(vec![
        Vertex::new(0.0, 0.0),
        Vertex::new(50.0, 0.0).with_d(Point::new(40.0, -10.0)),
        Vertex::new(100.0, 0.0).with_c(Point::new(60.0, 10.0)),
    ])
    .unwrap()
}

#[test]
fn test_new_canvas_is_empty() {
    let c = canvas();
    assert!(c.is_empty());
    assert_eq!(c.shape_count(), 0);
    assert_eq!(c.meta(), CanvasMeta::default());
}

#[test]
fn test_ids_are_unique_and_increasing() {
    let mut c = canvas();
    let a = c.add_shape(Shape::line(Point::new(0.0, 0.0), Point::new(10.0, 10.0)));
    let b = c.add_shape(Shape::line(Point::new(0.0, 0.0), Point::new(20.0, 20.0)));
    assert!(b > a);
    c.remove_shape(b);
    let d = c.add_shape(Shape::line(Point::new(0.0, 0.0), Point::new(30.0, 30.0)));
    assert!(d > b);
}

#[test]
fn test_document_round_trip_keeps_order_and_size() {
    let mut c = canvas();
    let doc = Document::with_shapes(
        CanvasMeta::new(320, 200),
        vec![
            Shape::rect(Point::new(0.0, 0.0), Point::new(10.0, 10.0)),
            Shape::text(Point::new(5.0, 30.0), "label"),
            curved_path(),
        ],
    );
    c.load_document(doc.clone());
    assert_eq!(c.meta(), CanvasMeta::new(320, 200));
    assert_eq!(c.to_document(), doc);
}

#[test]
fn test_box_selection_uses_tolerance() {
    let mut c = canvas();
    let a = c.add_shape(Shape::rect(Point::new(0.0, 0.0), Point::new(20.0, 20.0)));
    let b = c.add_shape(Shape::rect(Point::new(100.0, 0.0), Point::new(120.0, 20.0)));

    let area = Bounds::new(Point::new(25.0, 25.0), Point::new(40.0, 40.0));
    assert_eq!(c.objects_in_box(&area, 10.0), vec![a]);
    assert!(c.objects_in_box(&area, 0.0).is_empty());

    let all = Bounds::new(Point::new(-50.0, -50.0), Point::new(200.0, 200.0));
    assert_eq!(c.objects_in_box(&all, 10.0), vec![a, b]);
}

#[test]
fn test_text_hit_box_sits_above_baseline() {
    let mut c = canvas();
    let id = c.add_shape(Shape::text(Point::new(100.0, 100.0), "abc"));
    let b = c.bounding_box(id).unwrap();
    // 14px font, 0.6em fallback advance
    assert_eq!(b.min_y, 86.0);
    assert!((b.max_x - (100.0 + 3.0 * 14.0 * 0.6)).abs() < 1e-9);
    assert_eq!(c.hit_test(Point::new(110.0, 90.0), 0.0), Some(id));
    assert_eq!(c.hit_test(Point::new(110.0, 120.0), 0.0), None);
}

#[test]
fn test_icon_hit_box_is_fixed() {
    let mut c = canvas();
    let id = c.add_shape(Shape::from_points(ShapeType::Check, &[Point::new(50.0, 50.0)]).unwrap());
    assert_eq!(c.hit_test(Point::new(69.0, 69.0), 0.0), Some(id));
    assert_eq!(c.hit_test(Point::new(71.0, 71.0), 0.0), None);
}

#[test]
fn test_nearest_handle_wins() {
    let mut c = canvas();
    let id = c.add_shape(Shape::line(Point::new(10.0, 10.0), Point::new(30.0, 20.0)));
    assert_eq!(c.handle_at(id, Point::new(30.0, 15.0), 6.0), Some(ResizeHandle::Right));
    assert_eq!(c.handle_at(id, Point::new(29.0, 11.0), 6.0), Some(ResizeHandle::TopRight));
    assert_eq!(c.handle_at(id, Point::new(20.0, 40.0), 6.0), None);
}

#[test]
fn test_editable_points_only_for_curves() {
    let mut c = canvas();
    let rect = c.add_shape(Shape::rect(Point::new(0.0, 0.0), Point::new(10.0, 10.0)));
    let path = c.add_shape(curved_path());

    assert_eq!(c.editable_point_at(&[rect], Point::new(0.0, 0.0), 6.0), None);
    assert_eq!(
        c.editable_point_at(&[rect, path], Point::new(61.0, 9.0), 6.0),
        Some(PointRef {
            object_id: path,
            index: 2,
            role: PointRole::Leading,
        })
    );
    assert_eq!(
        c.editable_point_at(&[path], Point::new(49.0, 1.0), 6.0),
        Some(PointRef {
            object_id: path,
            index: 1,
            role: PointRole::Vertex,
        })
    );
    // unselected shapes expose nothing
    assert_eq!(c.editable_point_at(&[], Point::new(50.0, 0.0), 6.0), None);
}

#[test]
fn test_move_point_vertex_carries_controls() {
    let mut c = canvas();
    let path = c.add_shape(curved_path());
    let vertex = PointRef {
        object_id: path,
        index: 1,
        role: PointRole::Vertex,
    };
    assert!(c.move_point(&vertex, 5.0, 5.0));
    let v = c.get_shape(path).unwrap().shape.points[1];
    assert_eq!(v.pos, Point::new(55.0, 5.0));
    assert_eq!(v.d, Some(Point::new(45.0, -5.0)));

    let missing = PointRef {
        object_id: path,
        index: 0,
        role: PointRole::Trailing,
    };
    assert!(!c.move_point(&missing, 1.0, 1.0));
}

#[test]
fn test_bulk_property_edits() {
    let mut c = canvas();
    let a = c.add_shape(Shape::rect(Point::new(0.0, 0.0), Point::new(10.0, 10.0)));
    let b = c.add_shape(Shape::ellipse(Point::new(0.0, 0.0), Point::new(10.0, 10.0)));
    c.set_color(&[a, b], ShapeColor::Green);
    assert!(c.objects().iter().all(|o| o.shape.color == ShapeColor::Green));

    assert_eq!(c.remove_shapes(&[a, 999]), 1);
    assert_eq!(c.shape_count(), 1);
    assert!(c.contains(b));
}

#[test]
fn test_bounds_of_selection() {
    let mut c = canvas();
    let a = c.add_shape(Shape::rect(Point::new(0.0, 0.0), Point::new(10.0, 10.0)));
    let b = c.add_shape(Shape::rect(Point::new(20.0, 5.0), Point::new(30.0, 40.0)));
    let u = c.bounds_of(&[a, b]).unwrap();
    assert_eq!((u.min_x, u.min_y, u.max_x, u.max_y), (0.0, 0.0, 30.0, 40.0));
    assert!(c.bounds_of(&[]).is_none());
}
