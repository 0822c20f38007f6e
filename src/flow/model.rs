//! Image models: turn a prompt (plus an optional input image) into an artifact reference.

use crate::error::BackendError;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use std::io::ErrorKind;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Generative image model behind [super::StagedFlow].
#[async_trait]
pub trait ImageModel: Send + Sync {
  /// Renders `prompt`, optionally against `input_image`, and returns an artifact reference.
  async fn render(&self, prompt: &str, input_image: Option<&str>) -> Result<String, BackendError>;
}

/// Request written to a [CommandImageModel]'s stdin, one JSON object per line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderRequest<'a> {
  prompt: &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  input_image: Option<&'a str>,
}

/// Runs an external command per render: JSON request on stdin, artifact reference on stdout.
/// Non-zero exit or empty stdout is a failure.
#[derive(Debug, Clone)]
pub struct CommandImageModel {
  command: String,
}

impl CommandImageModel {
  pub fn new(command: impl Into<String>) -> Self {
    Self {
      command: command.into(),
    }
  }
}

#[async_trait]
impl ImageModel for CommandImageModel {
  #[instrument(level = "trace", skip(self, prompt, input_image), fields(cmd = %self.command))]
  async fn render(&self, prompt: &str, input_image: Option<&str>) -> Result<String, BackendError> {
    let parts: Vec<&str> = self.command.split_whitespace().collect();
    let Some((bin, args)) = parts.split_first() else {
      return Err(BackendError::Command("model command is empty".to_string()));
    };

    let mut child = Command::new(bin)
      .args(args)
      .stdin(Stdio::piped())
      .stdout(Stdio::piped())
      .stderr(Stdio::inherit())
      .spawn()
      .map_err(|e| BackendError::Command(format!("spawn: {}", e)))?;

    let mut line = serde_json::to_vec(&RenderRequest {
      prompt,
      input_image,
    })
    .map_err(|e| BackendError::Command(format!("encode request: {}", e)))?;
    line.push(b'\n');
    if let Some(mut stdin) = child.stdin.take() {
      // Models that never read their stdin may already have exited.
      match stdin.write_all(&line).await {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::BrokenPipe => {
          debug!("model closed stdin before reading the request");
        }
        Err(e) => return Err(BackendError::Command(format!("write stdin: {}", e))),
      }
    }

    let output = child
      .wait_with_output()
      .await
      .map_err(|e| BackendError::Command(format!("wait: {}", e)))?;
    if !output.status.success() {
      let msg = output
        .status
        .code()
        .map(|c| format!("exit {}", c))
        .unwrap_or_else(|| "terminated by signal".to_string());
      return Err(BackendError::Command(msg));
    }
    let artifact = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if artifact.is_empty() {
      return Err(BackendError::EmptyArtifact);
    }
    debug!(bytes = artifact.len(), "model produced artifact");
    Ok(artifact)
  }
}

/// Offline model: the "artifact" is the prompt itself as a `text/plain` data URI.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescribeModel;

impl DescribeModel {
  pub const PREFIX: &'static str = "data:text/plain;base64,";

  /// Decodes an artifact produced by this model back into its prompt.
  pub fn decode(artifact: &str) -> Option<String> {
    let payload = artifact.strip_prefix(Self::PREFIX)?;
    let bytes = STANDARD.decode(payload).ok()?;
    String::from_utf8(bytes).ok()
  }
}

#[async_trait]
impl ImageModel for DescribeModel {
  async fn render(&self, prompt: &str, _input_image: Option<&str>) -> Result<String, BackendError> {
    Ok(format!("{}{}", Self::PREFIX, STANDARD.encode(prompt)))
  }
}
