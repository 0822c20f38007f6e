//! Plain data types shared by the canvas controllers and the generation pipeline.
//!
//! Everything here is serializable so a node snapshot and the running partial result can be
//! handed to an out-of-process generation backend as-is.

mod node;
mod node_kind;
mod node_value;
#[cfg(test)]
mod node_value_test;
mod partial_result;
#[cfg(test)]
mod partial_result_test;
mod pipeline_stage;
#[cfg(test)]
mod pipeline_stage_test;
mod point;

pub use node::{Node, NodeId};
pub use node_kind::NodeKind;
pub use node_value::{NodeValue, Rgb};
pub use partial_result::{ArtifactKey, PartialResult};
pub use pipeline_stage::PipelineStage;
pub use point::Point;
