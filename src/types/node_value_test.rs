//! Tests for `NodeValue`.

use super::{NodeValue, Rgb};

#[test]
fn percent_constructor_clamps() {
  assert_eq!(NodeValue::percent(120), NodeValue::Percent(100));
  assert_eq!(NodeValue::percent(-1), NodeValue::Percent(0));
  assert_eq!(NodeValue::percent(37), NodeValue::Percent(37));
}

#[test]
fn color_constructor_clamps_channels() {
  assert_eq!(NodeValue::color(300, -2, 7), NodeValue::Color(Rgb::new(255, 0, 7)));
}

#[test]
fn serializes_untagged() {
  assert_eq!(serde_json::to_string(&NodeValue::Empty).unwrap(), "null");
  assert_eq!(serde_json::to_string(&NodeValue::Percent(20)).unwrap(), "20");
  assert_eq!(serde_json::to_string(&NodeValue::text("hi")).unwrap(), "\"hi\"");
  assert_eq!(
    serde_json::to_value(NodeValue::color(1, 2, 3)).unwrap(),
    serde_json::json!({ "r": 1, "g": 2, "b": 3 })
  );
}

#[test]
fn deserializes_by_shape() {
  let v: NodeValue = serde_json::from_str("null").unwrap();
  assert_eq!(v, NodeValue::Empty);
  let v: NodeValue = serde_json::from_str("75").unwrap();
  assert_eq!(v, NodeValue::Percent(75));
  let v: NodeValue = serde_json::from_str("123456").unwrap();
  assert_eq!(v, NodeValue::Seed(123456));
  let v: NodeValue = serde_json::from_str("\"mushroom\"").unwrap();
  assert_eq!(v, NodeValue::text("mushroom"));
}

#[test]
fn accessors() {
  assert_eq!(NodeValue::Seed(9).as_i64(), Some(9));
  assert_eq!(NodeValue::Percent(9).as_i64(), Some(9));
  assert_eq!(NodeValue::text("a").as_i64(), None);
  assert_eq!(NodeValue::Image("u".into()).as_str(), Some("u"));
  assert!(NodeValue::Empty.is_empty());
}

#[test]
fn display_matches_prompt_formatting() {
  assert_eq!(NodeValue::color(1, 2, 3).to_string(), "(1, 2, 3)");
  assert_eq!(NodeValue::Percent(40).to_string(), "40");
}
