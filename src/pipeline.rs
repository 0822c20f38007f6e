//! Pipeline state machine: steps a graph snapshot through the generation stages.
//!
//! `Idle -> Input -> Manipulated -> Final`, with `retreat` as the inverse edge of each step
//! and `reset` back to `Idle` from anywhere. Advancing is split into a request half
//! ([PipelineMachine::begin_advance]) and a resume half ([PipelineMachine::complete_advance])
//! so the backend call can run outside the machine; between the two the machine is in
//! flight and rejects every other transition.

use crate::error::{BackendError, PipelineError};
use crate::types::{Node, PartialResult, PipelineStage};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Everything a backend needs to produce the next stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
  /// Snapshot of the flat graph at the time of the request.
  pub nodes: Vec<Node>,
  /// Stage to produce (1, 2 or 3 on the wire).
  pub step: PipelineStage,
  /// Result accumulated by earlier stages.
  pub last_result: PartialResult,
}

/// External image-generation collaborator.
///
/// Returns a fragment of [PartialResult]; present slots are merged into the running result.
/// Expected to be idempotent per request from the caller's point of view.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
  async fn generate(&self, request: &GenerationRequest) -> Result<PartialResult, BackendError>;
}

/// Current stage, accumulated artifacts, and the in-flight marker.
#[derive(Debug, Clone, Default)]
pub struct PipelineMachine {
  stage: PipelineStage,
  result: PartialResult,
  /// Target stage of the advance awaiting its backend response.
  pending: Option<PipelineStage>,
}

impl PipelineMachine {
  pub fn stage(&self) -> PipelineStage {
    self.stage
  }

  pub fn result(&self) -> &PartialResult {
    &self.result
  }

  pub fn is_in_flight(&self) -> bool {
    self.pending.is_some()
  }

  /// Packages the next-stage request and marks the machine in flight.
  ///
  /// Fails with [PipelineError::InFlight] while another advance is pending and with
  /// [PipelineError::AlreadyComplete] at [PipelineStage::Final].
  #[instrument(level = "trace", skip(self, nodes), fields(stage = %self.stage))]
  pub fn begin_advance(&mut self, nodes: Vec<Node>) -> Result<GenerationRequest, PipelineError> {
    if self.pending.is_some() {
      return Err(PipelineError::InFlight);
    }
    let target = self.stage.next().ok_or(PipelineError::AlreadyComplete)?;
    self.pending = Some(target);
    Ok(GenerationRequest {
      nodes,
      step: target,
      last_result: self.result.clone(),
    })
  }

  /// Applies the backend outcome of the pending advance.
  ///
  /// On success the fragment is merged and only then does the stage move forward. On failure
  /// neither stage nor result changes. Either way the machine leaves flight.
  #[instrument(level = "trace", skip(self, outcome), fields(stage = %self.stage))]
  pub fn complete_advance(
    &mut self,
    outcome: Result<PartialResult, BackendError>,
  ) -> Result<PipelineStage, PipelineError> {
    let target = self.pending.take().ok_or(PipelineError::NotInFlight)?;
    match outcome {
      Ok(fragment) => {
        self.result.merge(fragment);
        self.stage = target;
        info!(stage = %target, artifacts = ?self.result.keys(), "pipeline advanced");
        Ok(target)
      }
      Err(e) => {
        warn!(stage = %self.stage, target = %target, error = %e, "generation step failed");
        Err(PipelineError::Backend(e))
      }
    }
  }

  /// Leaves flight without applying anything, for a caller that dropped the backend call.
  pub fn abandon_advance(&mut self) -> bool {
    self.pending.take().is_some()
  }

  /// Runs one full advance against `backend`.
  pub async fn advance(
    &mut self,
    nodes: Vec<Node>,
    backend: &dyn GenerationBackend,
  ) -> Result<PipelineStage, PipelineError> {
    let request = self.begin_advance(nodes)?;
    let outcome = backend.generate(&request).await;
    self.complete_advance(outcome)
  }

  /// Steps back one stage, deleting exactly the artifacts of the stage being left.
  ///
  /// `Ok(None)` at [PipelineStage::Idle] (no-op).
  #[instrument(level = "trace", skip(self), fields(stage = %self.stage))]
  pub fn retreat(&mut self) -> Result<Option<PipelineStage>, PipelineError> {
    if self.pending.is_some() {
      return Err(PipelineError::InFlight);
    }
    let Some(previous) = self.stage.previous() else {
      return Ok(None);
    };
    self.result.trim_stage(self.stage);
    self.stage = previous;
    info!(stage = %previous, "pipeline retreated");
    Ok(Some(previous))
  }

  /// Back to [PipelineStage::Idle] with an empty result, from any stage.
  pub fn reset(&mut self) -> Result<(), PipelineError> {
    if self.pending.is_some() {
      return Err(PipelineError::InFlight);
    }
    self.stage = PipelineStage::Idle;
    self.result.clear();
    info!("pipeline reset");
    Ok(())
  }
}
