//! Selection controller: the set of selected node ids with click/shift-click toggling.

use crate::store::NodeStore;
use crate::types::NodeId;
use tracing::instrument;

/// Currently selected node ids, insertion-ordered and free of duplicates.
///
/// Ids are not checked against a store on insert; [Selection::reconcile] drops stale ones and
/// [crate::canvas::Canvas] keeps both in step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
  ids: Vec<NodeId>,
}

impl Selection {
  pub fn ids(&self) -> &[NodeId] {
    &self.ids
  }

  pub fn contains(&self, id: &str) -> bool {
    self.ids.iter().any(|s| s == id)
  }

  pub fn len(&self) -> usize {
    self.ids.len()
  }

  pub fn is_empty(&self) -> bool {
    self.ids.is_empty()
  }

  /// Click semantics.
  ///
  /// Non-additive: the selection becomes exactly `{id}`, or empty if it already was exactly
  /// `{id}`. Additive (shift-click): `id` is toggled in or out.
  #[instrument(level = "trace", skip(self))]
  pub fn select_node(&mut self, id: &str, additive: bool) {
    if additive {
      if !self.remove(id) {
        self.ids.push(id.to_string());
      }
    } else if self.ids.len() == 1 && self.ids[0] == id {
      self.ids.clear();
    } else {
      self.ids = vec![id.to_string()];
    }
  }

  /// Replaces the selection with exactly `{id}`.
  pub fn select_only(&mut self, id: &str) {
    self.ids = vec![id.to_string()];
  }

  /// Empties the selection (click on empty canvas).
  pub fn clear(&mut self) {
    self.ids.clear();
  }

  /// Drops `id`; returns whether it was selected.
  pub fn remove(&mut self, id: &str) -> bool {
    let before = self.ids.len();
    self.ids.retain(|s| s != id);
    self.ids.len() != before
  }

  /// Drops every id the store no longer holds.
  pub fn reconcile(&mut self, store: &NodeStore) {
    self.ids.retain(|id| store.contains(id));
  }
}
