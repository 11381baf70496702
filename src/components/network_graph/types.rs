//! Render-ready graph data produced by synthesis.

use std::fmt;

/// Kind of interaction a link stands for.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LinkType {
	/// Reshare of another account's post.
	Retweet,
	/// `@handle` mention.
	Mention,
	/// Reply in a thread.
	Reply,
	/// Reshare with commentary.
	Quote,
	/// Reserved for links injected to repair isolated nodes.
	Auto,
	/// Any label the upstream catalog reports that has no dedicated variant.
	Other(String),
}

impl LinkType {
	/// Wire name, as used in `metrics.edge_types`.
	pub fn as_str(&self) -> &str {
		match self {
			LinkType::Retweet => "retweet",
			LinkType::Mention => "mention",
			LinkType::Reply => "reply",
			LinkType::Quote => "quote",
			LinkType::Auto => "auto",
			LinkType::Other(name) => name,
		}
	}
}

impl From<&str> for LinkType {
	fn from(name: &str) -> Self {
		match name {
			"retweet" => LinkType::Retweet,
			"mention" => LinkType::Mention,
			"reply" => LinkType::Reply,
			"quote" => LinkType::Quote,
			"auto" => LinkType::Auto,
			other => LinkType::Other(other.to_string()),
		}
	}
}

impl fmt::Display for LinkType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// An account in the synthesized graph.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Unique within one graph snapshot.
	pub id: String,
	/// Display handle, shown as `@name`.
	pub name: String,
	/// Raw community identifier from the clustering step.
	pub community: Option<i64>,
	/// Non-negative centrality score.
	pub centrality: f64,
}

/// An undirected pair of node ids, normalized so `(a, b)` and `(b, a)` are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkKey(String, String);

impl LinkKey {
	/// Key for the pair, in either order.
	pub fn new(a: &str, b: &str) -> Self {
		if a <= b {
			Self(a.to_string(), b.to_string())
		} else {
			Self(b.to_string(), a.to_string())
		}
	}

	/// True when `id` is one of the two endpoints.
	pub fn touches(&self, id: &str) -> bool {
		self.0 == id || self.1 == id
	}
}

/// A link between two accounts.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	/// Id of the node the link starts at.
	pub source: String,
	/// Id of the node the link points to.
	pub target: String,
	/// Interaction label, used for color.
	pub kind: LinkType,
}

impl GraphLink {
	/// Direction-free identity of the link.
	pub fn key(&self) -> LinkKey {
		LinkKey::new(&self.source, &self.target)
	}

	/// The endpoint opposite `id`, if `id` is an endpoint at all.
	pub fn other_end(&self, id: &str) -> Option<&str> {
		if self.source == id {
			Some(&self.target)
		} else if self.target == id {
			Some(&self.source)
		} else {
			None
		}
	}
}

/// Complete graph snapshot: nodes and links.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	/// Nodes with unique ids.
	pub nodes: Vec<GraphNode>,
	/// Links between existing nodes, at most one per unordered pair.
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Look up a node by id.
	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|node| node.id == id)
	}
}
