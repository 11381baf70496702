//! UI components.

pub mod network_graph;
