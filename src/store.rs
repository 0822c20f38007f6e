//! Node store: the ordered node collection and every structural mutation on it.
//!
//! The store is the sole owner of node lifetime. Mutations addressed at unknown ids are
//! no-ops reported through `bool`/`Option` returns, never errors.

use crate::config::SculptorConfig;
use crate::error::GraphError;
use crate::types::{Node, NodeId, NodeKind, NodeValue, Point};
use rand::Rng;
use std::collections::HashSet;
use std::ops::Range;
use tracing::{debug, instrument};

/// Ordered collection of flat nodes (groups included, their children are not flat).
#[derive(Debug, Clone)]
pub struct NodeStore {
  nodes: Vec<Node>,
  spawn: Range<f64>,
  group_width: f64,
}

impl Default for NodeStore {
  fn default() -> Self {
    Self::new(&SculptorConfig::default())
  }
}

impl NodeStore {
  /// Empty store using the spawn area and group width from `config`.
  pub fn new(config: &SculptorConfig) -> Self {
    Self {
      nodes: Vec::new(),
      spawn: config.spawn_range(),
      group_width: config.group_width,
    }
  }

  /// Store pre-seeded with the starter canvas: a primary prompt, an image-noise slider and a
  /// diffusion-strength slider.
  pub fn with_starter_nodes(config: &SculptorConfig) -> Self {
    let mut store = Self::new(config);
    store.nodes = vec![
      Node::new(
        "prompt-1",
        NodeKind::TextPrompt,
        "Primary Prompt",
        Point::new(100.0, 80.0),
        NodeValue::text(crate::flow::DEFAULT_FINAL_PROMPT),
      ),
      Node::new(
        "noise-1",
        NodeKind::PixelNoise,
        "Image Noise",
        Point::new(500.0, 250.0),
        NodeValue::Percent(20),
      ),
      Node::new(
        "diffusion-1",
        NodeKind::SettingDiffusion,
        "Diffusion Strength",
        Point::new(200.0, 400.0),
        NodeValue::Percent(75),
      ),
    ];
    store
  }

  /// Store holding a prebuilt node list, such as a saved canvas.
  ///
  /// Every value (grouped nodes included) is clamped to its kind. Fails when an id repeats
  /// anywhere in the graph, when a group holds another group, or when a non-group node
  /// carries grouped nodes.
  #[instrument(level = "trace", skip(config, nodes), fields(count = nodes.len()))]
  pub fn from_nodes(config: &SculptorConfig, nodes: Vec<Node>) -> Result<Self, GraphError> {
    let mut seen: HashSet<String> = HashSet::new();
    for node in &nodes {
      if !seen.insert(node.id().to_string()) {
        return Err(GraphError::DuplicateId(node.id().to_string()));
      }
      if !node.is_group() && !node.children().is_empty() {
        return Err(GraphError::ChildrenOnNonGroup(node.id().to_string()));
      }
      for child in node.children() {
        if child.is_group() {
          return Err(GraphError::NestedGroup {
            group: node.id().to_string(),
            child: child.id().to_string(),
          });
        }
        if !child.children().is_empty() {
          return Err(GraphError::ChildrenOnNonGroup(child.id().to_string()));
        }
        if !seen.insert(child.id().to_string()) {
          return Err(GraphError::DuplicateId(child.id().to_string()));
        }
      }
    }

    let mut store = Self::new(config);
    store.nodes = nodes;
    for node in &mut store.nodes {
      node.clamp_values();
    }
    debug!(count = store.nodes.len(), "graph loaded");
    Ok(store)
  }

  pub fn nodes(&self) -> &[Node] {
    &self.nodes
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  pub fn get(&self, id: &str) -> Option<&Node> {
    self.nodes.iter().find(|n| n.id() == id)
  }

  pub fn contains(&self, id: &str) -> bool {
    self.get(id).is_some()
  }

  /// First node carrying the label `name`. Labels are not unique; earlier nodes win.
  pub fn find_by_name(&self, name: &str) -> Option<&Node> {
    self.nodes.iter().find(|n| n.name == name)
  }

  fn get_mut(&mut self, id: &str) -> Option<&mut Node> {
    self.nodes.iter_mut().find(|n| n.id() == id)
  }

  fn spawn_coordinate(&self) -> f64 {
    if self.spawn.is_empty() {
      return self.spawn.start;
    }
    rand::thread_rng().gen_range(self.spawn.clone())
  }

  fn count_of(&self, kind: NodeKind) -> usize {
    self.nodes.iter().filter(|n| n.kind() == kind).count()
  }

  /// Appends a new node of `kind`.
  ///
  /// The node gets a fresh id, a random position inside the spawn area, the kind's default
  /// value and a label `"{base_name} {n}"` where `n` counts same-kind nodes including it.
  #[instrument(level = "trace", skip(self))]
  pub fn add_node(&mut self, kind: NodeKind, base_name: &str) -> &Node {
    let position = Point::new(self.spawn_coordinate(), self.spawn_coordinate());
    let name = format!("{} {}", base_name, self.count_of(kind) + 1);
    let node = Node::new(
      uuid::Uuid::new_v4().to_string(),
      kind,
      name,
      position,
      kind.default_value(),
    );
    debug!(id = %node.id(), kind = %kind, "node added");
    let idx = self.nodes.len();
    self.nodes.push(node);
    &self.nodes[idx]
  }

  /// Inserts a prebuilt node. Returns `false` (and drops it) if its id is already taken.
  pub fn insert(&mut self, node: Node) -> bool {
    if self.contains(node.id()) {
      debug!(id = %node.id(), "insert ignored: duplicate id");
      return false;
    }
    self.nodes.push(node);
    true
  }

  /// Removes the node with `id`, returning it. Absent ids are a no-op.
  ///
  /// Callers holding a selection must drop `id` from it; [crate::canvas::Canvas::delete_node]
  /// does both in one step.
  #[instrument(level = "trace", skip(self))]
  pub fn delete_node(&mut self, id: &str) -> Option<Node> {
    let idx = self.nodes.iter().position(|n| n.id() == id)?;
    Some(self.nodes.remove(idx))
  }

  /// Replaces the value of `id` verbatim. Returns `false` if the id is absent.
  ///
  /// No validation happens here; run [NodeKind::clamp_value] first.
  #[instrument(level = "trace", skip(self, value))]
  pub fn update_value(&mut self, id: &str, value: NodeValue) -> bool {
    match self.get_mut(id) {
      Some(node) => {
        node.value = value;
        true
      }
      None => {
        debug!(id, "update ignored: unknown node");
        false
      }
    }
  }

  /// Overwrites the position of `id`. Returns `false` if the id is absent.
  pub fn set_position(&mut self, id: &str, position: Point) -> bool {
    match self.get_mut(id) {
      Some(node) => {
        node.position = position;
        true
      }
      None => false,
    }
  }

  /// Applies a parameter-guidance suggestion to the first node labelled `node_name`,
  /// clamped to that node's kind. Returns `false` if no node carries the label.
  #[instrument(level = "trace", skip(self, value))]
  pub fn apply_suggestion(&mut self, node_name: &str, value: NodeValue) -> bool {
    let Some(node) = self.nodes.iter_mut().find(|n| n.name == node_name) else {
      debug!(node_name, "suggestion ignored: no node with that name");
      return false;
    };
    node.value = node.kind().clamp_value(value);
    true
  }

  /// Collapses the nodes named by `ids` into one new group node and returns its id.
  ///
  /// The group sits at the centroid of its members, is appended last, and holds the members
  /// as a snapshot in their store order; the members leave the flat list. Unknown ids are
  /// ignored. No-op (`None`) when fewer than two members are found or when a member is
  /// itself a group.
  #[instrument(level = "trace", skip(self))]
  pub fn group_nodes(&mut self, ids: &[NodeId]) -> Option<NodeId> {
    let is_member = |n: &Node| ids.iter().any(|id| id == n.id());
    let member_count = self.nodes.iter().filter(|&n| is_member(n)).count();
    if member_count < 2 {
      debug!(found = member_count, "group ignored: fewer than two nodes");
      return None;
    }
    if self.nodes.iter().any(|n| is_member(n) && n.is_group()) {
      debug!("group ignored: nested groups are not supported");
      return None;
    }

    let group_index = self.count_of(NodeKind::MetaNode) + 1;
    let (members, remaining): (Vec<Node>, Vec<Node>) =
      std::mem::take(&mut self.nodes).into_iter().partition(is_member);

    let n = members.len() as f64;
    let sum = members
      .iter()
      .fold(Point::default(), |acc, m| acc + m.position);
    let centroid = Point::new(sum.x / n, sum.y / n);

    let mut group = Node::group(
      uuid::Uuid::new_v4().to_string(),
      format!("Group {}", group_index),
      centroid,
      members,
    );
    group.width = Some(self.group_width);
    let id = group.id().to_string();
    debug!(id = %id, members = n as usize, "nodes grouped");

    self.nodes = remaining;
    self.nodes.push(group);
    Some(id)
  }
}
