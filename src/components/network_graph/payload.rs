//! Analysis payload as delivered by the upstream analysis service.
//!
//! Every collection is optional on the wire and defaults to empty, so partial
//! payloads degrade to a smaller graph instead of failing to parse.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::types::LinkType;

/// An account sampled into a community.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Account {
	/// Stable account id.
	pub id: String,
	/// Handle without the leading `@`.
	#[serde(default)]
	pub name: String,
}

/// An account annotated with its centrality score.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct RankedAccount {
	/// Stable account id.
	pub id: String,
	/// Handle without the leading `@`.
	#[serde(default)]
	pub name: String,
	/// Centrality score from the analysis.
	#[serde(default)]
	pub centrality: f64,
}

/// A detected community. `size` is the authoritative total and may exceed the
/// number of sampled `nodes`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Community {
	/// Clustering id; arbitrary, never displayed.
	pub id: i64,
	/// Total member count, when reported.
	#[serde(default)]
	pub size: Option<usize>,
	/// Sampled members.
	#[serde(default)]
	pub nodes: Vec<Account>,
	/// Most central members of the community.
	#[serde(default)]
	pub top_nodes: Vec<RankedAccount>,
}

impl Community {
	/// Reported size, falling back to the sample length when absent.
	pub fn effective_size(&self) -> usize {
		self.size.unwrap_or(self.nodes.len())
	}
}

/// Aggregate metrics. Only the edge type names are consumed, as a label palette.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Metrics {
	/// Interaction counts by link type name.
	#[serde(default)]
	pub edge_types: BTreeMap<String, u64>,
}

/// Complete analysis result for one query.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct AnalysisPayload {
	/// Search query the analysis ran for.
	#[serde(default)]
	pub query: String,
	/// Detected communities with their samples.
	#[serde(default)]
	pub communities: Vec<Community>,
	/// Accounts ordered by influence.
	#[serde(default)]
	pub most_influential: Vec<RankedAccount>,
	/// Aggregate metrics.
	#[serde(default)]
	pub metrics: Metrics,
}

impl AnalysisPayload {
	/// Parse a payload from its JSON text.
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text)
	}

	/// Link type labels available for synthesized links, in catalog order.
	pub fn link_type_catalog(&self) -> Vec<LinkType> {
		self.metrics
			.edge_types
			.keys()
			.map(|name| LinkType::from(name.as_str()))
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_collections_default_to_empty() {
		let payload = AnalysisPayload::from_json("{}").unwrap();
		assert!(payload.communities.is_empty());
		assert!(payload.most_influential.is_empty());
		assert!(payload.link_type_catalog().is_empty());
	}

	#[test]
	fn parses_full_contract() {
		let payload = AnalysisPayload::from_json(
			r#"{
				"query": "rust",
				"communities": [
					{ "id": 4, "size": 12, "nodes": [{ "id": "1", "name": "ferris" }],
					  "top_nodes": [{ "id": "1", "name": "ferris", "centrality": 0.4 }] },
					{ "id": 7, "nodes": [] }
				],
				"most_influential": [{ "id": "1", "name": "ferris", "centrality": 0.4 }],
				"metrics": { "num_nodes": 13, "num_edges": 20,
				             "edge_types": { "retweet": 12, "mention": 8 } }
			}"#,
		)
		.unwrap();

		assert_eq!(payload.communities.len(), 2);
		assert_eq!(payload.communities[0].effective_size(), 12);
		assert_eq!(payload.communities[1].effective_size(), 0);
		assert_eq!(payload.communities[0].top_nodes[0].centrality, 0.4);
		assert_eq!(
			payload.link_type_catalog(),
			vec![LinkType::Mention, LinkType::Retweet]
		);
	}

	#[test]
	fn rejects_malformed_json() {
		assert!(AnalysisPayload::from_json("{ communities: ").is_err());
	}
}
