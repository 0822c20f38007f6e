//! Tests for stage prompt composition.

use super::prompts::{
  DEFAULT_FINAL_PROMPT, captured_frame, final_prompt, manipulation_prompt,
};
use crate::types::{Node, NodeKind, NodeValue, Point};

fn node(id: &str, kind: NodeKind, value: NodeValue) -> Node {
  Node::new(id, kind, id, Point::default(), value)
}

#[test]
fn captured_frame_skips_empty_cameras() {
  let nodes = vec![
    node("cam-1", NodeKind::CameraInput, NodeValue::Empty),
    node("cam-2", NodeKind::CameraInput, NodeValue::Image("data:frame".into())),
  ];
  assert_eq!(captured_frame(&nodes), Some("data:frame"));
  assert_eq!(captured_frame(&nodes[..1]), None);
}

#[test]
fn manipulation_prompt_lists_pixel_nodes_in_order() {
  let nodes = vec![
    node("b", NodeKind::PixelBrightness, NodeValue::Percent(70)),
    node("p", NodeKind::TextPrompt, NodeValue::text("ignored")),
    node("n", NodeKind::PixelNoise, NodeValue::Percent(20)),
    node("c", NodeKind::PixelColor, NodeValue::color(255, 0, 10)),
  ];
  assert_eq!(
    manipulation_prompt(&nodes),
    "Apply the following manipulations to the image: adjust brightness by 70%. \
     apply 20% pixel noise. add a color tint of (255, 0, 10)."
  );
}

#[test]
fn manipulation_prompt_without_pixel_nodes_is_passthrough() {
  let nodes = vec![node("p", NodeKind::TextPrompt, NodeValue::text("x"))];
  assert_eq!(
    manipulation_prompt(&nodes),
    "Apply the following manipulations to the image: no manipulations, return the original image."
  );
}

#[test]
fn final_prompt_composes_prompts_settings_and_groups() {
  let mut group = Node::group("g", "Group 1", Point::default(), vec![]);
  group.name = "Mood".to_string();
  let nodes = vec![
    node("p", NodeKind::TextPrompt, NodeValue::text("a red fox")),
    node("d", NodeKind::SettingDiffusion, NodeValue::Percent(75)),
    node("s", NodeKind::SettingSeed, NodeValue::Seed(1234)),
    node("n", NodeKind::PixelNoise, NodeValue::Percent(20)),
    group,
  ];
  assert_eq!(
    final_prompt(&nodes),
    "The main subject is: \"a red fox\". Use a diffusion strength of 75%. \
     Use a generation seed of 1234. This is part of a group called \"Mood\"."
  );
}

#[test]
fn final_prompt_skips_empty_text_and_falls_back() {
  let nodes = vec![node("p", NodeKind::TextPrompt, NodeValue::text(""))];
  assert_eq!(final_prompt(&nodes), DEFAULT_FINAL_PROMPT);
  assert_eq!(final_prompt(&[]), DEFAULT_FINAL_PROMPT);
}
