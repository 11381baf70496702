//! Hover neighborhoods.
//!
//! A neighborhood is recomputed from scratch with one scan over the links on
//! every focus change. Graphs here have at most a few hundred links, and the
//! scan needs no adjacency index to keep in sync with the layout engine.

use std::collections::HashSet;

use super::types::{GraphLink, LinkKey};

/// Immutable result of one focus event.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HighlightSnapshot {
	focus: Option<String>,
	nodes: HashSet<String>,
	links: HashSet<LinkKey>,
}

impl HighlightSnapshot {
	/// Id of the focal node.
	pub fn focus(&self) -> Option<&str> {
		self.focus.as_deref()
	}

	/// Whether the node is in the neighborhood.
	pub fn contains_node(&self, id: &str) -> bool {
		self.nodes.contains(id)
	}

	/// Whether the link is in the neighborhood.
	pub fn contains_link(&self, key: &LinkKey) -> bool {
		self.links.contains(key)
	}

	/// Ids of the focal node and its neighbors.
	pub fn node_ids(&self) -> &HashSet<String> {
		&self.nodes
	}

	/// Links touching the focal node.
	pub fn link_keys(&self) -> &HashSet<LinkKey> {
		&self.links
	}

	/// True when nothing is focused.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.links.is_empty()
	}
}

/// Focal node plus every directly linked node, and the links between them.
pub fn neighborhood(links: &[GraphLink], focus: Option<&str>) -> HighlightSnapshot {
	let Some(focus) = focus else {
		return HighlightSnapshot::default();
	};

	let mut nodes = HashSet::from([focus.to_string()]);
	let mut keys = HashSet::new();
	for link in links {
		if let Some(other) = link.other_end(focus) {
			keys.insert(link.key());
			nodes.insert(other.to_string());
		}
	}

	HighlightSnapshot {
		focus: Some(focus.to_string()),
		nodes,
		links: keys,
	}
}

/// Holds the current snapshot. Only one focus exists at a time.
#[derive(Clone, Debug, Default)]
pub struct HighlightEngine {
	current: HighlightSnapshot,
}

impl HighlightEngine {
	/// Replace the snapshot for a new focus. Returns false when the focus did
	/// not change, in which case nothing is recomputed.
	pub fn focus(&mut self, node: Option<&str>, links: &[GraphLink]) -> bool {
		if self.current.focus() == node {
			return false;
		}
		self.current = neighborhood(links, node);
		true
	}

	/// Equivalent to `focus(None, ..)`.
	pub fn blur(&mut self) -> bool {
		self.focus(None, &[])
	}

	/// Current neighborhood.
	pub fn snapshot(&self) -> &HighlightSnapshot {
		&self.current
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network_graph::types::LinkType;

	fn link(source: &str, target: &str) -> GraphLink {
		GraphLink {
			source: source.into(),
			target: target.into(),
			kind: LinkType::Mention,
		}
	}

	fn links() -> Vec<GraphLink> {
		vec![link("a", "b"), link("c", "a"), link("b", "c"), link("d", "e")]
	}

	#[test]
	fn neighborhood_collects_both_directions() {
		let snapshot = neighborhood(&links(), Some("a"));
		assert_eq!(snapshot.focus(), Some("a"));
		assert_eq!(
			snapshot.node_ids(),
			&HashSet::from(["a".to_string(), "b".to_string(), "c".to_string()])
		);
		assert!(snapshot.contains_link(&LinkKey::new("a", "b")));
		assert!(snapshot.contains_link(&LinkKey::new("a", "c")));
		assert!(!snapshot.contains_link(&LinkKey::new("b", "c")));
	}

	#[test]
	fn unlinked_focus_highlights_only_itself() {
		let snapshot = neighborhood(&links(), Some("z"));
		assert_eq!(snapshot.node_ids().len(), 1);
		assert!(snapshot.link_keys().is_empty());
	}

	#[test]
	fn blur_clears_everything() {
		let mut engine = HighlightEngine::default();
		assert!(engine.focus(Some("a"), &links()));
		assert!(!engine.snapshot().is_empty());
		assert!(engine.blur());
		assert!(engine.snapshot().node_ids().is_empty());
		assert!(engine.snapshot().link_keys().is_empty());
		assert_eq!(engine.snapshot().focus(), None);
	}

	#[test]
	fn repeated_focus_is_a_no_op() {
		let mut engine = HighlightEngine::default();
		assert!(engine.focus(Some("d"), &links()));
		assert!(!engine.focus(Some("d"), &links()));
		assert!(engine.focus(Some("e"), &links()));
		assert!(engine.snapshot().contains_node("d"));
		assert!(engine.blur());
		assert!(!engine.blur());
	}
}
