//! Tests for `DragController`.

use crate::drag::DragController;
use crate::store::NodeStore;
use crate::types::{Node, NodeKind, NodeValue, Point};

fn store_with(id: &str, at: Point) -> NodeStore {
  let mut store = NodeStore::default();
  store.insert(Node::new(id, NodeKind::PixelNoise, id, at, NodeValue::Percent(50)));
  store
}

#[test]
fn begin_records_offset() {
  let mut d = DragController::default();
  d.begin_drag("a", Point::new(130.0, 95.0), Point::new(100.0, 80.0));
  let active = d.active().unwrap();
  assert_eq!(active.node_id, "a");
  assert_eq!(active.offset, Point::new(30.0, 15.0));
}

#[test]
fn move_writes_absolute_position() {
  let mut store = store_with("a", Point::new(0.0, 0.0));
  let mut d = DragController::default();
  let canvas = Some(Point::new(288.0, 64.0));
  d.begin_drag("a", Point::new(300.0, 70.0), Point::new(290.0, 66.0));
  assert!(d.on_pointer_move(Point::new(400.0, 200.0), canvas, &mut store));
  assert_eq!(store.get("a").unwrap().position, Point::new(102.0, 132.0));
  // Repeated moves overwrite rather than accumulate.
  assert!(d.on_pointer_move(Point::new(400.0, 200.0), canvas, &mut store));
  assert_eq!(store.get("a").unwrap().position, Point::new(102.0, 132.0));
}

#[test]
fn move_without_drag_is_skipped() {
  let mut store = store_with("a", Point::new(5.0, 5.0));
  let d = DragController::default();
  assert!(!d.on_pointer_move(Point::new(1.0, 1.0), Some(Point::default()), &mut store));
  assert_eq!(store.get("a").unwrap().position, Point::new(5.0, 5.0));
}

#[test]
fn move_without_canvas_geometry_is_skipped() {
  let mut store = store_with("a", Point::new(5.0, 5.0));
  let mut d = DragController::default();
  d.begin_drag("a", Point::new(5.0, 5.0), Point::new(5.0, 5.0));
  assert!(!d.on_pointer_move(Point::new(50.0, 50.0), None, &mut store));
  assert_eq!(store.get("a").unwrap().position, Point::new(5.0, 5.0));
}

#[test]
fn new_drag_replaces_active_one() {
  let mut d = DragController::default();
  d.begin_drag("a", Point::new(1.0, 1.0), Point::default());
  d.begin_drag("b", Point::new(2.0, 2.0), Point::default());
  assert_eq!(d.active().unwrap().node_id, "b");
}

#[test]
fn end_clears_and_stops_moves() {
  let mut store = store_with("a", Point::new(5.0, 5.0));
  let mut d = DragController::default();
  d.begin_drag("a", Point::new(5.0, 5.0), Point::new(5.0, 5.0));
  d.end_drag();
  assert!(!d.is_dragging());
  assert!(!d.on_pointer_move(Point::new(9.0, 9.0), Some(Point::default()), &mut store));
  d.end_drag();
  assert!(!d.is_dragging());
}
