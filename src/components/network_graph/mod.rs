//! Network graph visualization of an analysis result.
//!
//! Turns a sparse analysis payload (communities plus an influential-accounts
//! list, no edges) into an interactive force-directed graph on an HTML canvas:
//! - Link synthesis that guarantees every node is connected
//! - Size-ranked community labels decoupled from raw clustering ids
//! - Physics layout via `force_graph` with bounded readiness detection
//! - Hover neighborhoods, pan, zoom, and node dragging
//!
//! # Example
//!
//! ```ignore
//! use influence_graph::{AnalysisPayload, NetworkGraphCanvas};
//!
//! let payload = AnalysisPayload::from_json(json_text).unwrap_or_default();
//!
//! view! { <NetworkGraphCanvas payload=Signal::derive(move || payload.clone()) fullscreen=true /> }
//! ```

mod component;
pub mod encoding;
pub mod highlight;
pub mod layout;
mod legend;
mod particles;
pub mod payload;
pub mod ranking;
mod render;
mod scale;
mod state;
pub mod synthesis;
pub mod theme;
mod types;

pub use component::NetworkGraphCanvas;
pub use legend::{TooltipInfo, summary_line};
pub use payload::AnalysisPayload;
pub use ranking::{CommunityRanking, RankEntry};
pub use synthesis::{SynthesisConfig, synthesize};
pub use theme::Theme;
pub use types::{GraphData, GraphLink, GraphNode, LinkKey, LinkType};
