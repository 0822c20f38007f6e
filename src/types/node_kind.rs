//! The closed set of node kinds a canvas can hold.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{NodeValue, Rgb};

/// Box width of prompt, camera and group nodes.
pub(crate) const WIDE_NODE_WIDTH: f64 = 300.0;
/// Box width of every other node.
pub(crate) const NARROW_NODE_WIDTH: f64 = 280.0;

/// Kind of a parameter node. Fixed for the node's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
  TextPrompt,
  CameraInput,
  PixelNoise,
  PixelBrightness,
  PixelColor,
  CannyEdge,
  SettingDiffusion,
  SettingSeed,
  MetaNode,
}

impl NodeKind {
  /// Kinds a user can place from the toolbox, with their base labels, in toolbox order.
  pub const TOOLBOX: [(NodeKind, &'static str); 7] = [
    (NodeKind::TextPrompt, "Text Prompt"),
    (NodeKind::CameraInput, "Camera Input"),
    (NodeKind::PixelNoise, "Noise"),
    (NodeKind::PixelBrightness, "Brightness"),
    (NodeKind::PixelColor, "Color"),
    (NodeKind::SettingDiffusion, "Diffusion"),
    (NodeKind::SettingSeed, "Seed"),
  ];

  /// Kebab-case tag, as used on the wire.
  pub fn as_str(&self) -> &'static str {
    match self {
      NodeKind::TextPrompt => "text-prompt",
      NodeKind::CameraInput => "camera-input",
      NodeKind::PixelNoise => "pixel-noise",
      NodeKind::PixelBrightness => "pixel-brightness",
      NodeKind::PixelColor => "pixel-color",
      NodeKind::CannyEdge => "canny-edge",
      NodeKind::SettingDiffusion => "setting-diffusion",
      NodeKind::SettingSeed => "setting-seed",
      NodeKind::MetaNode => "meta-node",
    }
  }

  /// Value a freshly added node of this kind starts with.
  pub fn default_value(&self) -> NodeValue {
    match self {
      NodeKind::TextPrompt => NodeValue::Text(String::new()),
      NodeKind::PixelColor => NodeValue::Color(Rgb::MID_GRAY),
      NodeKind::CameraInput | NodeKind::MetaNode => NodeValue::Empty,
      NodeKind::SettingSeed => NodeValue::Seed(50),
      NodeKind::PixelNoise
      | NodeKind::PixelBrightness
      | NodeKind::CannyEdge
      | NodeKind::SettingDiffusion => NodeValue::Percent(50),
    }
  }

  /// Rendering box width; layout only.
  pub fn default_width(&self) -> f64 {
    match self {
      NodeKind::TextPrompt | NodeKind::CameraInput | NodeKind::MetaNode => WIDE_NODE_WIDTH,
      _ => NARROW_NODE_WIDTH,
    }
  }

  /// True for kinds whose value is a 0..=100 slider.
  pub fn is_percentage(&self) -> bool {
    matches!(
      self,
      NodeKind::PixelNoise
        | NodeKind::PixelBrightness
        | NodeKind::CannyEdge
        | NodeKind::SettingDiffusion
    )
  }

  /// Kinds consumed by the pixel-manipulation stage.
  pub fn is_pixel_manipulation(&self) -> bool {
    matches!(
      self,
      NodeKind::PixelNoise | NodeKind::PixelBrightness | NodeKind::PixelColor
    )
  }

  /// Kinds consumed by the final generation stage.
  pub fn is_final_stage_input(&self) -> bool {
    matches!(
      self,
      NodeKind::TextPrompt | NodeKind::SettingDiffusion | NodeKind::SettingSeed | NodeKind::MetaNode
    )
  }

  /// Whether the canvas shows an influence badge for this kind. Pixel sliders and the
  /// diffusion strength carry their own percentage and hide it.
  pub fn shows_influence(&self) -> bool {
    !matches!(
      self,
      NodeKind::PixelNoise
        | NodeKind::PixelBrightness
        | NodeKind::PixelColor
        | NodeKind::SettingDiffusion
    )
  }

  /// Coerces `value` into the shape this kind expects, clamping numeric ranges.
  ///
  /// Callers run this before [crate::store::NodeStore::update_value], which stores values
  /// verbatim. Values with no sensible mapping fall back to [Self::default_value].
  pub fn clamp_value(&self, value: NodeValue) -> NodeValue {
    match (self, value) {
      (NodeKind::TextPrompt, NodeValue::Text(s) | NodeValue::Image(s)) => NodeValue::Text(s),
      (NodeKind::TextPrompt, NodeValue::Percent(_) | NodeValue::Seed(_)) => {
        NodeValue::Text(String::new())
      }
      (NodeKind::CameraInput, NodeValue::Text(s) | NodeValue::Image(s)) if !s.is_empty() => {
        NodeValue::Image(s)
      }
      (NodeKind::PixelColor, NodeValue::Color(rgb)) => NodeValue::Color(rgb),
      (NodeKind::SettingSeed, NodeValue::Seed(s)) => NodeValue::Seed(s),
      (NodeKind::SettingSeed, NodeValue::Percent(p)) => NodeValue::Seed(i64::from(p)),
      (NodeKind::SettingSeed, NodeValue::Text(s)) => {
        NodeValue::Seed(s.trim().parse().unwrap_or(0))
      }
      (kind, NodeValue::Percent(p)) if kind.is_percentage() => {
        NodeValue::percent(i64::from(p))
      }
      (kind, NodeValue::Seed(s)) if kind.is_percentage() => NodeValue::percent(s),
      (kind, _) => kind.default_value(),
    }
  }
}

impl fmt::Display for NodeKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
