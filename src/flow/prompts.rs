//! Prompt composition for each generation stage.

use crate::types::{Node, NodeKind, NodeValue};

/// Prompt used to synthesize an input image when no camera frame is available.
pub const NOISE_INPUT_PROMPT: &str = "abstract gray and white noise pattern, 50% gray";

/// Final-stage prompt when the graph contributes nothing.
pub const DEFAULT_FINAL_PROMPT: &str = "A stunningly beautiful mushroom, glowing with bioluminescence in a dark forest, cinematic, hyperrealistic.";

const MANIPULATION_PREAMBLE: &str = "Apply the following manipulations to the image:";
const NO_MANIPULATION: &str = "no manipulations, return the original image.";

/// Captured frame of the first camera-input node that holds one.
pub fn captured_frame(nodes: &[Node]) -> Option<&str> {
  nodes
    .iter()
    .filter(|n| n.kind() == NodeKind::CameraInput)
    .find_map(|n| n.value.as_str().filter(|s| !s.is_empty()))
}

fn manipulation_clause(node: &Node) -> Option<String> {
  match (node.kind(), &node.value) {
    (NodeKind::PixelNoise, v) => Some(format!("apply {}% pixel noise.", v)),
    (NodeKind::PixelBrightness, v) => Some(format!("adjust brightness by {}%.", v)),
    (NodeKind::PixelColor, NodeValue::Color(rgb)) => Some(format!("add a color tint of {}.", rgb)),
    _ => None,
  }
}

/// Instruction for the pixel-manipulation stage, one clause per pixel node in graph order.
pub fn manipulation_prompt(nodes: &[Node]) -> String {
  let clauses: Vec<String> = nodes
    .iter()
    .filter(|n| n.kind().is_pixel_manipulation())
    .filter_map(manipulation_clause)
    .collect();
  if clauses.is_empty() {
    format!("{} {}", MANIPULATION_PREAMBLE, NO_MANIPULATION)
  } else {
    format!("{} {}", MANIPULATION_PREAMBLE, clauses.join(" "))
  }
}

fn final_clause(node: &Node) -> Option<String> {
  match node.kind() {
    NodeKind::TextPrompt => node
      .value
      .as_str()
      .filter(|s| !s.is_empty())
      .map(|s| format!("The main subject is: \"{}\".", s)),
    NodeKind::SettingDiffusion => Some(format!("Use a diffusion strength of {}%.", node.value)),
    NodeKind::SettingSeed => Some(format!("Use a generation seed of {}.", node.value)),
    NodeKind::MetaNode => Some(format!("This is part of a group called \"{}\".", node.name)),
    _ => None,
  }
}

/// Instruction for the final stage from prompts, settings and group labels, in graph order.
/// Falls back to [DEFAULT_FINAL_PROMPT] when no clause comes out.
pub fn final_prompt(nodes: &[Node]) -> String {
  let clauses: Vec<String> = nodes
    .iter()
    .filter(|n| n.kind().is_final_stage_input())
    .filter_map(final_clause)
    .collect();
  if clauses.is_empty() {
    DEFAULT_FINAL_PROMPT.to_string()
  } else {
    clauses.join(" ")
  }
}
