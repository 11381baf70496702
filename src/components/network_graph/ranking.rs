//! Size-based ranking of community identifiers.
//!
//! Community ids are whatever the clustering step happened to emit, so they are
//! never shown directly. Rank 1 is the largest community by effective size;
//! equal sizes keep their original order.

use std::collections::HashMap;

use super::payload::Community;

/// One community's position in the size ranking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankEntry {
	/// Raw clustering id.
	pub community_id: i64,
	/// 1-based, 1 = largest.
	pub rank: usize,
	/// `size` when reported, otherwise the sample length.
	pub effective_size: usize,
	/// Number of accounts actually sampled into the payload.
	pub sample_size: usize,
}

impl RankEntry {
	/// Whether the payload holds fewer accounts than the community really has.
	pub fn is_sampled(&self) -> bool {
		self.sample_size < self.effective_size
	}
}

/// Mapping from community id to size rank.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommunityRanking {
	entries: Vec<RankEntry>,
	by_id: HashMap<i64, usize>,
}

impl CommunityRanking {
	/// Rank communities by effective size, largest first.
	pub fn from_communities(communities: &[Community]) -> Self {
		let mut order: Vec<&Community> = communities.iter().collect();
		// `sort_by` is stable, which is what keeps ties in input order.
		order.sort_by(|a, b| b.effective_size().cmp(&a.effective_size()));

		let mut entries = Vec::with_capacity(order.len());
		let mut by_id = HashMap::with_capacity(order.len());
		for community in order {
			// A repeated id keeps its first (higher) rank; ranks stay dense.
			if by_id.contains_key(&community.id) {
				continue;
			}
			by_id.insert(community.id, entries.len());
			entries.push(RankEntry {
				community_id: community.id,
				rank: entries.len() + 1,
				effective_size: community.effective_size(),
				sample_size: community.nodes.len(),
			});
		}

		Self { entries, by_id }
	}

	/// 1-based rank of a community, if it is known.
	pub fn rank(&self, community_id: i64) -> Option<usize> {
		self.by_id
			.get(&community_id)
			.map(|&index| self.entries[index].rank)
	}

	/// Display label for a community, e.g. `#2`.
	pub fn ordinal_label(&self, community_id: i64) -> Option<String> {
		self.rank(community_id).map(|rank| format!("#{rank}"))
	}

	/// Entries in rank order.
	pub fn entries(&self) -> &[RankEntry] {
		&self.entries
	}

	/// Number of ranked communities.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// True when no community was ranked.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network_graph::payload::Account;

	fn community(id: i64, size: Option<usize>, members: &[&str]) -> Community {
		Community {
			id,
			size,
			nodes: members
				.iter()
				.map(|m| Account {
					id: m.to_string(),
					name: m.to_string(),
				})
				.collect(),
			top_nodes: Vec::new(),
		}
	}

	#[test]
	fn largest_community_ranks_first() {
		let ranking = CommunityRanking::from_communities(&[
			community(5, Some(3), &["a", "b", "c"]),
			community(2, Some(5), &["d", "e", "f", "g", "h"]),
		]);
		assert_eq!(ranking.rank(2), Some(1));
		assert_eq!(ranking.rank(5), Some(2));
		assert_eq!(ranking.ordinal_label(5).as_deref(), Some("#2"));
	}

	#[test]
	fn ties_keep_input_order() {
		let ranking = CommunityRanking::from_communities(&[
			community(9, Some(4), &[]),
			community(1, Some(4), &[]),
			community(3, Some(10), &[]),
			community(7, Some(4), &[]),
		]);
		let ids: Vec<i64> = ranking.entries().iter().map(|e| e.community_id).collect();
		assert_eq!(ids, vec![3, 9, 1, 7]);
	}

	#[test]
	fn repeated_id_leaves_no_rank_gap() {
		let ranking = CommunityRanking::from_communities(&[
			community(4, Some(9), &[]),
			community(4, Some(6), &[]),
			community(8, Some(2), &[]),
		]);
		assert_eq!(ranking.len(), 2);
		assert_eq!(ranking.rank(4), Some(1));
		assert_eq!(ranking.ordinal_label(8).as_deref(), Some("#2"));
	}

	#[test]
	fn missing_size_falls_back_to_sample_length() {
		let ranking = CommunityRanking::from_communities(&[
			community(0, None, &["a"]),
			community(1, None, &["b", "c"]),
		]);
		assert_eq!(ranking.rank(1), Some(1));
		assert_eq!(ranking.rank(0), Some(2));
	}

	#[test]
	fn reports_sampled_communities() {
		let ranking = CommunityRanking::from_communities(&[community(0, Some(40), &["a", "b"])]);
		let entry = &ranking.entries()[0];
		assert!(entry.is_sampled());
		assert_eq!(entry.sample_size, 2);
	}

	#[test]
	fn empty_input_yields_empty_map() {
		let ranking = CommunityRanking::from_communities(&[]);
		assert!(ranking.is_empty());
		assert_eq!(ranking.rank(0), None);
	}
}
