//! Staged generation flow: the reference generation backend, built on a pluggable
//! [ImageModel].
//!
//! - step 1: a captured camera frame is used as-is, otherwise a neutral noise image is rendered.
//! - step 2: pixel nodes become one composed manipulation instruction against `inputImage`;
//!   the artifact fills both `manipulatedImage` and `generativeModelInputImage`.
//! - step 3: prompts, settings and group labels become the final instruction against
//!   `generativeModelInputImage`.

mod model;
mod prompts;
#[cfg(test)]
mod prompts_test;

pub use model::{CommandImageModel, DescribeModel, ImageModel};
pub use prompts::{
  DEFAULT_FINAL_PROMPT, NOISE_INPUT_PROMPT, captured_frame, final_prompt, manipulation_prompt,
};

use crate::error::BackendError;
use crate::pipeline::{GenerationBackend, GenerationRequest};
use crate::types::{ArtifactKey, PartialResult, PipelineStage};
use async_trait::async_trait;
use tracing::{info, instrument};

/// [GenerationBackend] that composes per-stage prompts and delegates rendering to `M`.
#[derive(Debug, Clone)]
pub struct StagedFlow<M> {
  model: M,
}

impl<M: ImageModel> StagedFlow<M> {
  pub fn new(model: M) -> Self {
    Self { model }
  }

  pub fn model(&self) -> &M {
    &self.model
  }
}

#[async_trait]
impl<M: ImageModel> GenerationBackend for StagedFlow<M> {
  #[instrument(level = "trace", skip(self, request), fields(step = %request.step))]
  async fn generate(&self, request: &GenerationRequest) -> Result<PartialResult, BackendError> {
    let mut fragment = PartialResult::default();
    match request.step {
      PipelineStage::Idle => {
        return Err(BackendError::failed("step 0 produces nothing"));
      }
      PipelineStage::Input => {
        let image = match captured_frame(&request.nodes) {
          Some(frame) => {
            info!("using captured camera frame as input image");
            frame.to_string()
          }
          None => self.model.render(NOISE_INPUT_PROMPT, None).await?,
        };
        fragment.set(ArtifactKey::InputImage, image);
      }
      PipelineStage::Manipulated => {
        let prompt = manipulation_prompt(&request.nodes);
        let input = request.last_result.get(ArtifactKey::InputImage);
        let image = self.model.render(&prompt, input).await?;
        fragment.set(ArtifactKey::ManipulatedImage, image.clone());
        fragment.set(ArtifactKey::GenerativeModelInputImage, image);
      }
      PipelineStage::Final => {
        let prompt = final_prompt(&request.nodes);
        let input = request
          .last_result
          .get(ArtifactKey::GenerativeModelInputImage);
        let image = self.model.render(&prompt, input).await?;
        fragment.set(ArtifactKey::FinalImage, image);
      }
    }
    Ok(fragment)
  }
}
