//! Type-dependent payload carried by a node.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An RGB triple, each channel 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
  pub r: u8,
  pub g: u8,
  pub b: u8,
}

impl Rgb {
  pub const MID_GRAY: Rgb = Rgb {
    r: 128,
    g: 128,
    b: 128,
  };

  pub const fn new(r: u8, g: u8, b: u8) -> Self {
    Self { r, g, b }
  }
}

impl fmt::Display for Rgb {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({}, {}, {})", self.r, self.g, self.b)
  }
}

/// Payload of a node. Which variant is meaningful depends on the node's kind.
///
/// Serialized untagged: a backend sees a string, a number, an `{r,g,b}` object or `null`.
/// Variant order decides decoding: small integers come back as `Percent`, strings as `Text`.
/// Use [crate::types::NodeKind::clamp_value] to coerce a decoded value to its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeValue {
  /// No payload (camera without a captured frame, groups).
  Empty,
  Percent(u8),
  Seed(i64),
  Color(Rgb),
  Text(String),
  /// Captured frame reference (data URI) from a camera input.
  Image(String),
}

impl NodeValue {
  /// Percentage payload clamped to 0..=100.
  pub fn percent(value: i64) -> Self {
    NodeValue::Percent(value.clamp(0, 100) as u8)
  }

  /// Color payload, clamping each channel to 0..=255.
  pub fn color(r: i64, g: i64, b: i64) -> Self {
    let ch = |v: i64| v.clamp(0, 255) as u8;
    NodeValue::Color(Rgb::new(ch(r), ch(g), ch(b)))
  }

  pub fn text(s: impl Into<String>) -> Self {
    NodeValue::Text(s.into())
  }

  pub fn is_empty(&self) -> bool {
    matches!(self, NodeValue::Empty)
  }

  /// Numeric view of the payload, if it has one.
  pub fn as_i64(&self) -> Option<i64> {
    match self {
      NodeValue::Percent(p) => Some(i64::from(*p)),
      NodeValue::Seed(s) => Some(*s),
      _ => None,
    }
  }

  /// String view of text-like payloads.
  pub fn as_str(&self) -> Option<&str> {
    match self {
      NodeValue::Text(s) | NodeValue::Image(s) => Some(s),
      _ => None,
    }
  }
}

impl fmt::Display for NodeValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      NodeValue::Empty => write!(f, "null"),
      NodeValue::Percent(p) => write!(f, "{}", p),
      NodeValue::Seed(s) => write!(f, "{}", s),
      NodeValue::Color(rgb) => write!(f, "{}", rgb),
      NodeValue::Image(s) | NodeValue::Text(s) => write!(f, "{}", s),
    }
  }
}
