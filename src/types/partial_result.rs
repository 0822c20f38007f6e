//! Accumulated artifacts of completed pipeline stages.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::PipelineStage;

/// Names of the artifact slots in a [PartialResult].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKey {
  InputImage,
  ManipulatedImage,
  GenerativeModelInputImage,
  FinalImage,
}

impl ArtifactKey {
  pub const ALL: [ArtifactKey; 4] = [
    ArtifactKey::InputImage,
    ArtifactKey::ManipulatedImage,
    ArtifactKey::GenerativeModelInputImage,
    ArtifactKey::FinalImage,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      ArtifactKey::InputImage => "inputImage",
      ArtifactKey::ManipulatedImage => "manipulatedImage",
      ArtifactKey::GenerativeModelInputImage => "generativeModelInputImage",
      ArtifactKey::FinalImage => "finalImage",
    }
  }
}

impl fmt::Display for ArtifactKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Artifact references (typically data URIs) produced so far, one optional slot per key.
///
/// Also the shape of a backend response: a fragment whose present slots are merged in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialResult {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub input_image: Option<String>,
  #[serde(
    default,
    alias = "pixelManipulationsImage",
    skip_serializing_if = "Option::is_none"
  )]
  pub manipulated_image: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub generative_model_input_image: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub final_image: Option<String>,
}

impl PartialResult {
  pub fn get(&self, key: ArtifactKey) -> Option<&str> {
    self.slot(key).as_deref()
  }

  pub fn set(&mut self, key: ArtifactKey, artifact: impl Into<String>) {
    *self.slot_mut(key) = Some(artifact.into());
  }

  pub fn remove(&mut self, key: ArtifactKey) -> Option<String> {
    self.slot_mut(key).take()
  }

  pub fn contains(&self, key: ArtifactKey) -> bool {
    self.slot(key).is_some()
  }

  /// Present keys, in pipeline order.
  pub fn keys(&self) -> Vec<ArtifactKey> {
    ArtifactKey::ALL
      .into_iter()
      .filter(|k| self.contains(*k))
      .collect()
  }

  pub fn is_empty(&self) -> bool {
    self.keys().is_empty()
  }

  /// Merges `fragment` into `self`: present slots overwrite, absent slots leave `self` alone.
  pub fn merge(&mut self, fragment: PartialResult) {
    for key in ArtifactKey::ALL {
      if let Some(artifact) = fragment.slot(key).clone() {
        *self.slot_mut(key) = Some(artifact);
      }
    }
  }

  /// Deletes exactly the artifacts `stage` is responsible for.
  pub fn trim_stage(&mut self, stage: PipelineStage) {
    for key in stage.produced_keys() {
      self.remove(*key);
    }
  }

  pub fn clear(&mut self) {
    *self = PartialResult::default();
  }

  fn slot(&self, key: ArtifactKey) -> &Option<String> {
    match key {
      ArtifactKey::InputImage => &self.input_image,
      ArtifactKey::ManipulatedImage => &self.manipulated_image,
      ArtifactKey::GenerativeModelInputImage => &self.generative_model_input_image,
      ArtifactKey::FinalImage => &self.final_image,
    }
  }

  fn slot_mut(&mut self, key: ArtifactKey) -> &mut Option<String> {
    match key {
      ArtifactKey::InputImage => &mut self.input_image,
      ArtifactKey::ManipulatedImage => &mut self.manipulated_image,
      ArtifactKey::GenerativeModelInputImage => &mut self.generative_model_input_image,
      ArtifactKey::FinalImage => &mut self.final_image,
    }
  }
}
