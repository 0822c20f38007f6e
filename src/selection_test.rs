//! Tests for `Selection`.

use crate::selection::Selection;
use crate::store::NodeStore;
use crate::types::NodeKind;

#[test]
fn single_click_twice_deselects() {
  let mut s = Selection::default();
  s.select_node("a", false);
  assert_eq!(s.ids(), &["a".to_string()]);
  s.select_node("a", false);
  assert!(s.is_empty());
}

#[test]
fn single_click_replaces() {
  let mut s = Selection::default();
  s.select_node("a", false);
  s.select_node("b", false);
  assert_eq!(s.ids(), &["b".to_string()]);
}

#[test]
fn single_click_on_member_of_multi_selection_narrows_to_it() {
  let mut s = Selection::default();
  s.select_node("a", true);
  s.select_node("b", true);
  s.select_node("a", false);
  assert_eq!(s.ids(), &["a".to_string()]);
}

#[test]
fn additive_toggles_without_duplicates() {
  let mut s = Selection::default();
  s.select_node("a", true);
  s.select_node("b", true);
  assert_eq!(s.len(), 2);
  s.select_node("a", true);
  assert_eq!(s.ids(), &["b".to_string()]);
  s.select_node("b", true);
  s.select_node("b", true);
  assert_eq!(s.ids(), &["b".to_string()]);
}

#[test]
fn clear_empties_regardless() {
  let mut s = Selection::default();
  s.clear();
  assert!(s.is_empty());
  s.select_node("a", true);
  s.select_node("b", true);
  s.clear();
  assert!(s.is_empty());
}

#[test]
fn remove_reports_membership() {
  let mut s = Selection::default();
  s.select_node("a", false);
  assert!(s.remove("a"));
  assert!(!s.remove("a"));
}

#[test]
fn reconcile_drops_stale_ids() {
  let mut store = NodeStore::default();
  let keep = store.add_node(NodeKind::PixelNoise, "Noise").id().to_string();
  let gone = store.add_node(NodeKind::PixelNoise, "Noise").id().to_string();
  let mut s = Selection::default();
  s.select_node(&keep, true);
  s.select_node(&gone, true);
  store.delete_node(&gone);
  s.reconcile(&store);
  assert_eq!(s.ids(), &[keep]);
}
