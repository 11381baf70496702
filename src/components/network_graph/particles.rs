//! Directional particles travelling along highlighted links.

use super::theme::EdgeStyle;

/// Particle positions are a pure function of elapsed time; there is no
/// per-particle state to keep in sync with the highlight set.
#[derive(Clone, Debug, Default)]
pub struct ParticleClock {
	time: f64,
}

impl ParticleClock {
	/// Move the clock forward by `dt` seconds.
	pub fn advance(&mut self, dt: f64) {
		self.time += dt.max(0.0);
	}

	/// Fractions along a link (0.0 = source, 1.0 = target) for every particle.
	pub fn offsets(&self, style: &EdgeStyle) -> impl Iterator<Item = f64> + use<> {
		let count = style.particle_count;
		let head = (self.time * style.particle_speed).fract();
		(0..count).map(move |i| (head + i as f64 / count as f64).fract())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network_graph::theme::Theme;

	#[test]
	fn particles_are_evenly_spaced_along_link() {
		let style = Theme::default().edge;
		let clock = ParticleClock::default();
		let offsets: Vec<f64> = clock.offsets(&style).collect();
		assert_eq!(offsets, vec![0.0, 0.25, 0.5, 0.75]);
	}

	#[test]
	fn particles_stay_on_link() {
		let style = Theme::default().edge;
		let mut clock = ParticleClock::default();
		for _ in 0..500 {
			clock.advance(0.016);
			assert!(clock.offsets(&style).all(|t| (0.0..1.0).contains(&t)));
		}
	}
}
