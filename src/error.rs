//! Error types.
//!
//! Only recoverable conditions are errors. Caller-contract violations on the graph (unknown
//! ids, grouping fewer than two nodes, retreating from idle) are silent no-ops and never
//! reach these types.

use std::path::PathBuf;
use thiserror::Error;

/// Fallback shown to the user when a failure carries no message.
pub const GENERIC_FAILURE_MESSAGE: &str = "An unknown error occurred.";

/// Failure reported by a generation backend or the image model behind it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
  /// The backend failed with its own message.
  #[error("{0}")]
  Failed(String),

  /// The model completed without producing an artifact.
  #[error("Image generation failed.")]
  EmptyArtifact,

  /// An external model command could not be run or exited unsuccessfully.
  #[error("image model command failed: {0}")]
  Command(String),
}

impl BackendError {
  pub fn failed(message: impl Into<String>) -> Self {
    BackendError::Failed(message.into())
  }
}

/// Errors surfaced by pipeline transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
  /// An advance is awaiting the backend; the request was rejected.
  #[error("a generation step is already in flight")]
  InFlight,

  /// The pipeline already holds a final image; reset it to start over.
  #[error("pipeline is already at the final stage")]
  AlreadyComplete,

  /// A resume transition arrived with no advance pending.
  #[error("no generation step is in flight")]
  NotInFlight,

  /// The backend failed; state and partial result are unchanged.
  #[error("generation backend failed: {0}")]
  Backend(#[from] BackendError),
}

impl PipelineError {
  /// Message suitable for a user-visible failure notification.
  pub fn user_message(&self) -> String {
    match self {
      PipelineError::Backend(e) => {
        let msg = e.to_string();
        if msg.trim().is_empty() {
          GENERIC_FAILURE_MESSAGE.to_string()
        } else {
          msg
        }
      }
      other => other.to_string(),
    }
  }
}

/// Errors loading a [crate::config::SculptorConfig].
#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("could not read config '{path}': {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("invalid config '{path}': {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("invalid spawn area: min {min} must be below max {max}")]
  SpawnArea { min: f64, max: f64 },
}

/// Errors loading a prebuilt node list into a [crate::store::NodeStore].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
  /// The id is used twice, at top level or inside a group.
  #[error("duplicate node id '{0}'")]
  DuplicateId(String),

  /// A group holds another group; groups are single-level.
  #[error("group '{group}' contains nested group '{child}'")]
  NestedGroup { group: String, child: String },

  /// A non-group node carries grouped nodes.
  #[error("node '{0}' is not a group but has grouped nodes")]
  ChildrenOnNonGroup(String),
}

/// Errors talking to a running [crate::session::Session].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
  /// The session task has stopped.
  #[error("session is closed")]
  Closed,

  #[error(transparent)]
  Pipeline(#[from] PipelineError),
}
