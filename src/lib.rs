//! # latent-sculptor
//!
//! Node-graph canvas model for staged image generation.
//!
//! ## Architecture
//!
//! - [store::NodeStore] owns the flat node list: add, delete, update, group.
//! - [selection::Selection] and [drag::DragController] hold the interaction state;
//!   [canvas::Canvas] ties them to the store and the mounted canvas geometry.
//! - [influence::influence] maps a node's vertical position to its 0..=100 weight.
//! - [pipeline::PipelineMachine] steps a graph snapshot through
//!   input -> manipulated -> final against a [pipeline::GenerationBackend].
//! - [flow::StagedFlow] is the reference backend, composing per-stage prompts for an
//!   [flow::ImageModel].
//! - [session::Session] serializes every command through one actor task.

pub mod canvas;
pub mod config;
#[cfg(test)]
mod config_test;
pub mod drag;
#[cfg(test)]
mod drag_test;
pub mod error;
pub mod flow;
pub mod influence;
pub mod pipeline;
pub mod selection;
#[cfg(test)]
mod selection_test;
pub mod session;
pub mod store;
pub mod types;

pub use canvas::{Canvas, CanvasGeometry};
pub use config::SculptorConfig;
pub use error::{BackendError, ConfigError, GraphError, PipelineError, SessionError};
pub use flow::{CommandImageModel, DescribeModel, ImageModel, StagedFlow};
pub use influence::influence;
pub use pipeline::{GenerationBackend, GenerationRequest, PipelineMachine};
pub use session::{PipelineView, Session, SessionHandle};
pub use store::NodeStore;
pub use types::{Node, NodeId, NodeKind, NodeValue, PartialResult, PipelineStage, Point};
