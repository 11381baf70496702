//! Builds a connected node/link dataset from a payload that carries no edges.
//!
//! Links come from three ordered passes (influence chain, intra-community
//! fan-out, inter-community bridges), each skipping unordered pairs that are
//! already linked. A final repair pass attaches every node left without a link
//! to a connected node, so any graph with two or more nodes has no isolated
//! vertices.

use std::collections::{HashMap, HashSet};

use log::{debug, info};
use rand::Rng;
use rand::seq::SliceRandom;

use super::payload::AnalysisPayload;
use super::types::{GraphData, GraphLink, GraphNode, LinkKey, LinkType};

/// Centrality assigned to accounts missing from the influential list.
pub const DEFAULT_CENTRALITY: f64 = 0.01;

/// Tunables for link synthesis.
#[derive(Clone, Debug)]
pub struct SynthesisConfig {
	/// Upper bound on random peers linked per community member.
	pub fan_out: usize,
	/// Label used when the payload reports no link types at all.
	pub default_link_type: LinkType,
}

impl Default for SynthesisConfig {
	fn default() -> Self {
		Self {
			fan_out: 3,
			default_link_type: LinkType::Other("interaction".to_string()),
		}
	}
}

/// Accumulates links while enforcing the no-self-loop and unique-pair rules.
struct LinkSet {
	links: Vec<GraphLink>,
	seen: HashSet<LinkKey>,
}

impl LinkSet {
	fn new() -> Self {
		Self {
			links: Vec::new(),
			seen: HashSet::new(),
		}
	}

	/// Returns false when the pair was rejected.
	fn insert(&mut self, source: &str, target: &str, kind: LinkType) -> bool {
		if source == target || !self.seen.insert(LinkKey::new(source, target)) {
			return false;
		}
		self.links.push(GraphLink {
			source: source.to_string(),
			target: target.to_string(),
			kind,
		});
		true
	}
}

/// Synthesize a graph using the given random source for peer selection.
pub fn synthesize<R: Rng + ?Sized>(
	payload: &AnalysisPayload,
	config: &SynthesisConfig,
	rng: &mut R,
) -> GraphData {
	let centrality: HashMap<&str, f64> = payload
		.most_influential
		.iter()
		.map(|account| (account.id.as_str(), account.centrality.max(0.0)))
		.collect();

	let mut catalog = payload.link_type_catalog();
	if catalog.is_empty() {
		catalog.push(config.default_link_type.clone());
	}

	// Flatten samples; the first community to claim an id keeps it.
	let mut nodes = Vec::new();
	let mut known: HashSet<&str> = HashSet::new();
	let mut members: Vec<Vec<usize>> = Vec::with_capacity(payload.communities.len());
	let mut dropped = 0usize;
	for community in &payload.communities {
		let mut retained = Vec::with_capacity(community.nodes.len());
		for account in &community.nodes {
			if !known.insert(account.id.as_str()) {
				dropped += 1;
				continue;
			}
			retained.push(nodes.len());
			nodes.push(GraphNode {
				id: account.id.clone(),
				name: account.name.clone(),
				community: Some(community.id),
				centrality: centrality
					.get(account.id.as_str())
					.copied()
					.unwrap_or(DEFAULT_CENTRALITY),
			});
		}
		members.push(retained);
	}
	if dropped > 0 {
		debug!("synthesis: dropped {dropped} duplicate account ids");
	}

	let mut links = LinkSet::new();

	// Influence chain: consecutive influential accounts, cycling link labels.
	for (i, pair) in payload.most_influential.windows(2).enumerate() {
		let (source, target) = (pair[0].id.as_str(), pair[1].id.as_str());
		if known.contains(source) && known.contains(target) {
			links.insert(source, target, catalog[i % catalog.len()].clone());
		}
	}

	// Intra-community fan-out to random distinct peers.
	for retained in &members {
		let peers_per_node = config.fan_out.min(retained.len().saturating_sub(1));
		if peers_per_node == 0 {
			continue;
		}
		for &member in retained {
			let candidates: Vec<usize> = retained.iter().copied().filter(|&p| p != member).collect();
			for &peer in candidates.choose_multiple(rng, peers_per_node) {
				let kind = catalog.choose(rng).cloned().unwrap_or(LinkType::Auto);
				links.insert(&nodes[member].id, &nodes[peer].id, kind);
			}
		}
	}

	// Inter-community backbone between consecutive non-empty communities.
	let heads: Vec<usize> = members.iter().filter_map(|m| m.first().copied()).collect();
	for pair in heads.windows(2) {
		let kind = catalog.choose(rng).cloned().unwrap_or(LinkType::Auto);
		links.insert(&nodes[pair[0]].id, &nodes[pair[1]].id, kind);
	}

	let repaired = repair_isolated(&nodes, &mut links);

	info!(
		"synthesis: {} nodes, {} links ({} repaired)",
		nodes.len(),
		links.links.len(),
		repaired
	);

	GraphData {
		nodes,
		links: links.links,
	}
}

/// Attach every unlinked node to the first linked one. Returns the number of
/// nodes repaired.
fn repair_isolated(nodes: &[GraphNode], links: &mut LinkSet) -> usize {
	if nodes.len() < 2 {
		return 0;
	}

	let connected: HashSet<&str> = links
		.links
		.iter()
		.flat_map(|link| [link.source.as_str(), link.target.as_str()])
		.collect();
	let isolated: Vec<&GraphNode> = nodes
		.iter()
		.filter(|node| !connected.contains(node.id.as_str()))
		.collect();
	if isolated.is_empty() {
		return 0;
	}

	// With no connected node at all, the first node becomes the hub.
	let anchor = nodes
		.iter()
		.find(|node| connected.contains(node.id.as_str()))
		.unwrap_or(&nodes[0]);

	let mut repaired = 0;
	for node in isolated {
		if links.insert(&node.id, &anchor.id, LinkType::Auto) {
			repaired += 1;
		}
	}
	repaired
}
