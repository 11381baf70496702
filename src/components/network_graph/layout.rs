//! Lifecycle around the `force_graph` physics engine.
//!
//! A submitted snapshot is warmed up synchronously, then cooled down over a
//! bounded number of ticks and a bounded amount of time. The layout counts as
//! ready on the first of: measured motion dropping below the settle threshold,
//! the tick cap, the time cap, or the fallback timer reported by the host. The
//! fallback is only a safety net for hosts that stop delivering ticks.

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::{debug, info};

use super::types::GraphData;

/// Longest step handed to the engine, so a stalled frame does not explode the layout.
const MAX_STEP: f64 = 0.05;
const WARMUP_STEP: f32 = 0.016;

/// Simulation tuning and readiness bounds.
#[derive(Clone, Debug)]
pub struct LayoutConfig {
	/// Repulsion between every pair of nodes.
	pub force_charge: f32,
	/// Attraction along links.
	pub force_spring: f32,
	/// Upper bound on any single force.
	pub force_max: f32,
	/// Velocity scale applied per step.
	pub node_speed: f32,
	/// Fraction of velocity kept per step.
	pub damping_factor: f32,
	/// Mass of every node.
	pub node_mass: f32,
	/// Ticks run synchronously on submit before anything is drawn.
	pub warmup_ticks: usize,
	/// Ticks after warm-up before the engine is stopped.
	pub cooldown_ticks: usize,
	/// Seconds after warm-up before the engine is stopped.
	pub cooldown_time: f64,
	/// Seconds after submit at which the host's fallback timer fires.
	pub fallback_delay: f64,
	/// Mean node speed, in world units per second, below which the layout is settled.
	pub settle_threshold: f64,
	/// Radius of the circle nodes start on.
	pub initial_radius: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.6,
			node_mass: 10.0,
			warmup_ticks: 50,
			cooldown_ticks: 50,
			cooldown_time: 2.0,
			fallback_delay: 3.0,
			settle_threshold: 3.0,
			initial_radius: 100.0,
		}
	}
}

impl LayoutConfig {
	fn simulation(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: self.force_charge,
			force_spring: self.force_spring,
			force_max: self.force_max,
			node_speed: self.node_speed,
			damping_factor: self.damping_factor,
		}
	}
}

/// What made the layout ready.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Readiness {
	/// Motion fell below the settle threshold.
	Settled,
	/// The cooldown tick cap was reached.
	TickLimit,
	/// The cooldown time cap was reached.
	TimeLimit,
	/// The host's fixed-delay timer fired first.
	Fallback,
}

/// Index of the snapshot node a simulated node stands for.
#[derive(Clone, Copy, Debug, Default)]
pub struct NodeInfo {
	/// Position in [`GraphData::nodes`].
	pub index: usize,
}

/// Index of the snapshot link a simulated edge stands for.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinkInfo {
	/// Position in [`GraphData::links`].
	pub index: usize,
}

/// Owns the live simulation for one graph snapshot at a time.
pub struct LayoutController {
	config: LayoutConfig,
	data: GraphData,
	graph: ForceGraph<NodeInfo, LinkInfo>,
	generation: u64,
	running: bool,
	ticks: usize,
	elapsed: f64,
	readiness: Option<Readiness>,
	repaint: bool,
	positions: Vec<(f32, f32)>,
}

impl LayoutController {
	/// Controller with an empty snapshot.
	pub fn new(config: LayoutConfig) -> Self {
		let graph = ForceGraph::new(config.simulation());
		Self {
			config,
			data: GraphData::default(),
			graph,
			generation: 0,
			running: false,
			ticks: 0,
			elapsed: 0.0,
			readiness: None,
			repaint: false,
			positions: Vec::new(),
		}
	}

	/// Install a new snapshot, replacing the previous one, and start the
	/// simulation from a circular layout. Returns the generation to hand to
	/// [`Self::on_fallback_elapsed`].
	pub fn submit(&mut self, data: GraphData) -> u64 {
		let mut graph = ForceGraph::new(self.config.simulation());
		let count = data.nodes.len();
		let mut index_of = HashMap::with_capacity(count);

		for i in 0..count {
			let angle = (i as f64) * 2.0 * PI / count as f64;
			let idx = graph.add_node(NodeData {
				x: (self.config.initial_radius * angle.cos()) as f32,
				y: (self.config.initial_radius * angle.sin()) as f32,
				mass: self.config.node_mass,
				is_anchor: false,
				user_data: NodeInfo { index: i },
			});
			index_of.insert(data.nodes[i].id.as_str(), idx);
		}

		for (i, link) in data.links.iter().enumerate() {
			if let (Some(&src), Some(&tgt)) = (
				index_of.get(link.source.as_str()),
				index_of.get(link.target.as_str()),
			) {
				graph.add_edge(src, tgt, EdgeData {
					user_data: LinkInfo { index: i },
				});
			}
		}

		if count > 1 {
			for _ in 0..self.config.warmup_ticks {
				graph.update(WARMUP_STEP);
			}
		}

		self.graph = graph;
		self.data = data;
		self.generation += 1;
		self.ticks = 0;
		self.elapsed = 0.0;
		self.readiness = None;
		self.repaint = true;
		self.positions = self.current_positions();
		self.running = true;

		info!(
			"layout: submitted generation {} ({} nodes, {} links)",
			self.generation,
			count,
			self.data.links.len()
		);

		if count == 0 {
			self.stop(Readiness::Settled);
		}
		self.generation
	}

	/// Advance the cooldown phase by `dt` seconds. Returns whether the engine moved.
	pub fn tick(&mut self, dt: f64) -> bool {
		if !self.running {
			return false;
		}

		let step = dt.clamp(0.0, MAX_STEP);
		self.graph.update(step as f32);
		self.ticks += 1;
		self.elapsed += dt.max(0.0);

		let next = self.current_positions();
		let speed = mean_speed(&self.positions, &next, step);
		self.positions = next;

		if speed < self.config.settle_threshold {
			self.stop(Readiness::Settled);
		} else if self.ticks >= self.config.cooldown_ticks {
			self.stop(Readiness::TickLimit);
		} else if self.elapsed >= self.config.cooldown_time {
			self.stop(Readiness::TimeLimit);
		}
		true
	}

	/// Called by the host's fixed-delay timer. Ignored when a newer snapshot
	/// has been submitted since the timer was armed.
	pub fn on_fallback_elapsed(&mut self, generation: u64) {
		if generation != self.generation {
			debug!("layout: stale fallback for generation {generation}");
			return;
		}
		self.mark_ready(Readiness::Fallback);
	}

	/// Request a repaint with current positions; the simulation is untouched.
	pub fn refresh(&mut self) {
		self.repaint = true;
	}

	/// Consume a pending repaint request.
	pub fn take_repaint(&mut self) -> bool {
		std::mem::take(&mut self.repaint)
	}

	/// Restart the cooldown without resetting positions, e.g. after a drag.
	pub fn reheat(&mut self) {
		if self.data.nodes.is_empty() {
			return;
		}
		self.running = true;
		self.ticks = 0;
		self.elapsed = 0.0;
		self.positions = self.current_positions();
	}

	/// Whether any readiness signal has fired for the current snapshot.
	pub fn is_ready(&self) -> bool {
		self.readiness.is_some()
	}

	/// The signal that made the current snapshot ready.
	pub fn readiness(&self) -> Option<Readiness> {
		self.readiness
	}

	/// Whether the engine still advances on tick.
	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Generation of the current snapshot, starting at 1.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// Active configuration.
	pub fn config(&self) -> &LayoutConfig {
		&self.config
	}

	/// The snapshot currently being laid out.
	pub fn data(&self) -> &GraphData {
		&self.data
	}

	/// The live engine graph.
	pub fn graph(&self) -> &ForceGraph<NodeInfo, LinkInfo> {
		&self.graph
	}

	/// World position of a simulated node.
	pub fn position(&self, idx: DefaultNodeIdx) -> Option<(f32, f32)> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some((node.x(), node.y()));
			}
		});
		found
	}

	/// Move a node and pin it in place.
	pub fn pin(&mut self, idx: DefaultNodeIdx, x: f32, y: f32) {
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = x;
				node.data.y = y;
				node.data.is_anchor = true;
			}
		});
		self.repaint = true;
	}

	fn stop(&mut self, reason: Readiness) {
		self.running = false;
		debug!(
			"layout: engine stopped after {} ticks ({:.2}s)",
			self.ticks, self.elapsed
		);
		self.mark_ready(reason);
	}

	fn mark_ready(&mut self, reason: Readiness) {
		if self.readiness.is_none() {
			info!(
				"layout: generation {} ready ({:?})",
				self.generation, reason
			);
			self.readiness = Some(reason);
			self.repaint = true;
		}
	}

	fn current_positions(&self) -> Vec<(f32, f32)> {
		let mut positions = Vec::with_capacity(self.data.nodes.len());
		self.graph.visit_nodes(|node| positions.push((node.x(), node.y())));
		positions
	}
}

impl Default for LayoutController {
	fn default() -> Self {
		Self::new(LayoutConfig::default())
	}
}

/// Mean node speed over one engine step. A zero step measures nothing, so it
/// never counts as settled.
fn mean_speed(before: &[(f32, f32)], after: &[(f32, f32)], step: f64) -> f64 {
	if after.is_empty() {
		return 0.0;
	}
	if step <= 0.0 {
		return f64::INFINITY;
	}
	let total: f64 = before
		.iter()
		.zip(after)
		.map(|(&(x0, y0), &(x1, y1))| {
			let (dx, dy) = ((x1 - x0) as f64, (y1 - y0) as f64);
			(dx * dx + dy * dy).sqrt()
		})
		.sum();
	total / after.len() as f64 / step
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network_graph::types::{GraphLink, GraphNode, LinkType};

	fn graph(ids: &[&str], pairs: &[(&str, &str)]) -> GraphData {
		GraphData {
			nodes: ids
				.iter()
				.map(|id| GraphNode {
					id: id.to_string(),
					name: id.to_string(),
					community: Some(0),
					centrality: 0.01,
				})
				.collect(),
			links: pairs
				.iter()
				.map(|(s, t)| GraphLink {
					source: s.to_string(),
					target: t.to_string(),
					kind: LinkType::Mention,
				})
				.collect(),
		}
	}

	fn triangle() -> GraphData {
		graph(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")])
	}

	#[test]
	fn empty_snapshot_is_ready_immediately() {
		let mut layout = LayoutController::default();
		layout.submit(GraphData::default());
		assert_eq!(layout.readiness(), Some(Readiness::Settled));
		assert!(!layout.tick(0.016));
	}

	#[test]
	fn cooldown_is_bounded_by_tick_cap() {
		let mut layout = LayoutController::default();
		layout.submit(triangle());
		assert!(!layout.is_ready());

		let cap = layout.config().cooldown_ticks;
		let mut ticks = 0;
		while layout.tick(0.016) {
			ticks += 1;
			assert!(ticks <= cap);
		}
		assert!(layout.is_ready());
		assert!(!layout.is_running());
	}

	#[test]
	fn cooldown_is_bounded_by_time_cap() {
		let config = LayoutConfig {
			cooldown_ticks: usize::MAX,
			settle_threshold: -1.0,
			cooldown_time: 0.5,
			..Default::default()
		};
		let mut layout = LayoutController::new(config);
		layout.submit(triangle());
		for _ in 0..10 {
			layout.tick(0.1);
		}
		assert_eq!(layout.readiness(), Some(Readiness::TimeLimit));
	}

	#[test]
	fn fallback_marks_current_generation_ready() {
		let config = LayoutConfig {
			settle_threshold: -1.0,
			..Default::default()
		};
		let mut layout = LayoutController::new(config);
		let first = layout.submit(triangle());
		let second = layout.submit(graph(&["x", "y"], &[("x", "y")]));
		assert_ne!(first, second);

		layout.on_fallback_elapsed(first);
		assert!(!layout.is_ready());

		layout.on_fallback_elapsed(second);
		assert_eq!(layout.readiness(), Some(Readiness::Fallback));
		assert_eq!(layout.data().nodes.len(), 2);
	}

	#[test]
	fn refresh_does_not_move_nodes() {
		let mut layout = LayoutController::default();
		layout.submit(triangle());
		while layout.tick(0.016) {}
		let before = layout.current_positions();

		layout.take_repaint();
		layout.refresh();
		assert!(layout.take_repaint());
		assert!(!layout.take_repaint());
		assert!(!layout.tick(0.016));
		assert_eq!(layout.current_positions(), before);
	}

	#[test]
	fn reheat_restarts_engine_but_keeps_readiness() {
		let mut layout = LayoutController::default();
		layout.submit(triangle());
		while layout.tick(0.016) {}
		layout.reheat();
		assert!(layout.is_running());
		assert!(layout.is_ready());
	}

	#[test]
	fn pinned_node_stays_put() {
		let mut layout = LayoutController::default();
		layout.submit(triangle());
		let mut idx = None;
		layout.graph().visit_nodes(|node| {
			if node.data.user_data.index == 0 {
				idx = Some(node.index());
			}
		});
		let idx = idx.unwrap();
		layout.pin(idx, 40.0, -40.0);
		layout.reheat();
		layout.tick(0.016);
		assert_eq!(layout.position(idx), Some((40.0, -40.0)));
	}

	#[test]
	fn settle_speed_ignores_frame_rate() {
		let start = [(0.0, 0.0), (10.0, 0.0)];
		let at_60hz = [(0.05, 0.0), (10.0, 0.05)];
		let at_120hz = [(0.025, 0.0), (10.0, 0.025)];
		let slow = mean_speed(&start, &at_60hz, 1.0 / 60.0);
		let fast = mean_speed(&start, &at_120hz, 1.0 / 120.0);
		assert!((slow - fast).abs() < 1e-4);
		assert!((slow - 3.0).abs() < 1e-4);
		assert_eq!(mean_speed(&start, &start, 0.0), f64::INFINITY);
	}

	#[test]
	fn zero_step_never_settles() {
		let mut layout = LayoutController::default();
		layout.submit(graph(&["solo"], &[]));
		assert!(layout.tick(0.0));
		assert!(!layout.is_ready());
		layout.tick(0.016);
		assert_eq!(layout.readiness(), Some(Readiness::Settled));
	}

	#[test]
	fn links_are_installed_as_edges() {
		let mut layout = LayoutController::default();
		layout.submit(triangle());
		let mut edges = 0;
		layout.graph().visit_edges(|_, _, _| edges += 1);
		assert_eq!(edges, 3);
	}
}
