//! Stages of the generation pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ArtifactKey;

/// Pipeline state: how many generation stages have completed.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum PipelineStage {
  /// No artifacts.
  #[default]
  Idle,
  /// Input image produced.
  Input,
  /// Manipulated / model-input image produced.
  Manipulated,
  /// Final image produced.
  Final,
}

impl PipelineStage {
  pub fn index(&self) -> u8 {
    match self {
      PipelineStage::Idle => 0,
      PipelineStage::Input => 1,
      PipelineStage::Manipulated => 2,
      PipelineStage::Final => 3,
    }
  }

  pub fn from_index(index: u8) -> Option<Self> {
    match index {
      0 => Some(PipelineStage::Idle),
      1 => Some(PipelineStage::Input),
      2 => Some(PipelineStage::Manipulated),
      3 => Some(PipelineStage::Final),
      _ => None,
    }
  }

  /// The following stage; `None` at [PipelineStage::Final].
  pub fn next(&self) -> Option<Self> {
    Self::from_index(self.index() + 1)
  }

  /// The preceding stage; `None` at [PipelineStage::Idle].
  pub fn previous(&self) -> Option<Self> {
    self.index().checked_sub(1).and_then(Self::from_index)
  }

  /// Artifact keys produced when entering this stage (and deleted when leaving it backwards).
  pub fn produced_keys(&self) -> &'static [ArtifactKey] {
    match self {
      PipelineStage::Idle => &[],
      PipelineStage::Input => &[ArtifactKey::InputImage],
      PipelineStage::Manipulated => &[
        ArtifactKey::ManipulatedImage,
        ArtifactKey::GenerativeModelInputImage,
      ],
      PipelineStage::Final => &[ArtifactKey::FinalImage],
    }
  }

  /// Label of the primary action offered while the pipeline sits at this stage.
  pub fn action_label(&self) -> &'static str {
    match self {
      PipelineStage::Idle => "Generate Input Image",
      PipelineStage::Input => "Apply Pixel Manipulations",
      PipelineStage::Manipulated => "Generate Final Image",
      PipelineStage::Final => "Reset Pipeline",
    }
  }
}

impl From<PipelineStage> for u8 {
  fn from(stage: PipelineStage) -> u8 {
    stage.index()
  }
}

impl TryFrom<u8> for PipelineStage {
  type Error = String;

  fn try_from(index: u8) -> Result<Self, Self::Error> {
    Self::from_index(index).ok_or_else(|| format!("invalid pipeline step {}", index))
  }
}

impl fmt::Display for PipelineStage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.index())
  }
}
