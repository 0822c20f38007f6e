//! Tests for `PipelineStage`.

use super::{ArtifactKey, PipelineStage};

#[test]
fn next_and_previous_walk_the_chain() {
  assert_eq!(PipelineStage::Idle.next(), Some(PipelineStage::Input));
  assert_eq!(PipelineStage::Manipulated.next(), Some(PipelineStage::Final));
  assert_eq!(PipelineStage::Final.next(), None);
  assert_eq!(PipelineStage::Idle.previous(), None);
  assert_eq!(PipelineStage::Input.previous(), Some(PipelineStage::Idle));
}

#[test]
fn index_roundtrip() {
  for i in 0..4 {
    assert_eq!(PipelineStage::from_index(i).unwrap().index(), i);
  }
  assert_eq!(PipelineStage::from_index(4), None);
}

#[test]
fn produced_keys_cover_every_artifact_once() {
  let mut all: Vec<ArtifactKey> = [
    PipelineStage::Idle,
    PipelineStage::Input,
    PipelineStage::Manipulated,
    PipelineStage::Final,
  ]
  .iter()
  .flat_map(|s| s.produced_keys().iter().copied())
  .collect();
  assert_eq!(all.len(), 4);
  all.dedup();
  assert_eq!(all, ArtifactKey::ALL.to_vec());
}

#[test]
fn action_labels() {
  assert_eq!(PipelineStage::Idle.action_label(), "Generate Input Image");
  assert_eq!(PipelineStage::Final.action_label(), "Reset Pipeline");
}

#[test]
fn serializes_as_step_number() {
  assert_eq!(serde_json::to_string(&PipelineStage::Manipulated).unwrap(), "2");
  let s: PipelineStage = serde_json::from_str("3").unwrap();
  assert_eq!(s, PipelineStage::Final);
  assert!(serde_json::from_str::<PipelineStage>("7").is_err());
}
