//! Tests for `PartialResult`.

use super::{ArtifactKey, PartialResult, PipelineStage};

fn full() -> PartialResult {
  PartialResult {
    input_image: Some("in".into()),
    manipulated_image: Some("px".into()),
    generative_model_input_image: Some("gm".into()),
    final_image: Some("fin".into()),
  }
}

#[test]
fn default_is_empty() {
  let r = PartialResult::default();
  assert!(r.is_empty());
  assert!(r.keys().is_empty());
}

#[test]
fn merge_overwrites_present_and_preserves_absent() {
  let mut r = PartialResult::default();
  r.set(ArtifactKey::InputImage, "old");
  r.set(ArtifactKey::FinalImage, "keep");
  let mut fragment = PartialResult::default();
  fragment.set(ArtifactKey::InputImage, "new");
  fragment.set(ArtifactKey::ManipulatedImage, "px");
  r.merge(fragment);
  assert_eq!(r.get(ArtifactKey::InputImage), Some("new"));
  assert_eq!(r.get(ArtifactKey::ManipulatedImage), Some("px"));
  assert_eq!(r.get(ArtifactKey::FinalImage), Some("keep"));
  assert!(!r.contains(ArtifactKey::GenerativeModelInputImage));
}

#[test]
fn trim_stage_removes_only_its_keys() {
  let mut r = full();
  r.trim_stage(PipelineStage::Manipulated);
  assert_eq!(
    r.keys(),
    vec![ArtifactKey::InputImage, ArtifactKey::FinalImage]
  );
  r.trim_stage(PipelineStage::Idle);
  assert_eq!(r.keys().len(), 2);
}

#[test]
fn clear_empties_everything() {
  let mut r = full();
  r.clear();
  assert!(r.is_empty());
}

#[test]
fn serializes_camel_case_and_skips_absent() {
  let mut r = PartialResult::default();
  r.set(ArtifactKey::GenerativeModelInputImage, "gm");
  let json = serde_json::to_value(&r).unwrap();
  assert_eq!(json, serde_json::json!({ "generativeModelInputImage": "gm" }));
}

#[test]
fn accepts_pixel_manipulations_alias() {
  let r: PartialResult =
    serde_json::from_str(r#"{"inputImage":"a","pixelManipulationsImage":"b"}"#).unwrap();
  assert_eq!(r.get(ArtifactKey::ManipulatedImage), Some("b"));
  assert_eq!(r.get(ArtifactKey::InputImage), Some("a"));
}
