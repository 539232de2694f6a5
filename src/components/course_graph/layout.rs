//! Physics tuning for the course graph.
//!
//! The simulation goes through three phases:
//!
//! - **Warming up**: strong repulsion and long links spread the nodes out.
//! - **Stable**: repulsion relaxes to a wide but calm steady state.
//! - **Focused**: while a course is selected, energy drops further so the
//!   view does not reorient under the user.
//!
//! Alpha is the simulation's "temperature". It scales every step and cools
//! towards zero; once it falls below `alpha_min`, or the cooldown time since
//! the last reheat runs out, the simulation stops until something reheats it.

use force_graph::SimulationParameters;

/// Spring stiffness at [`REFERENCE_LINK_DISTANCE`].
const REFERENCE_SPRING: f64 = 0.05;
const REFERENCE_LINK_DISTANCE: f64 = 60.0;
/// Per-node force clamp handed to the engine.
const FORCE_MAX: f32 = 100.0;
const NODE_SPEED: f32 = 3000.0;

/// Tunable simulation parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutParams {
	/// Pairwise repulsion.
	pub charge_strength: f64,
	/// Target edge length; shorter links mean stiffer springs.
	pub link_distance: f64,
	/// Pull towards the origin, scaled by alpha.
	pub center_strength: f64,
	/// Fraction of velocity lost per step (0 = frictionless).
	pub velocity_decay: f64,
	/// How fast alpha cools each step.
	pub alpha_decay: f64,
	/// Alpha below which the simulation stops.
	pub alpha_min: f64,
	/// Steps run synchronously before the first paint.
	pub warmup_ticks: u32,
	/// Seconds after a reheat before the simulation stops regardless of alpha.
	pub cooldown_time: f64,
}

impl LayoutParams {
	/// Spreading configuration used right after mount.
	pub fn warm_up() -> Self {
		Self {
			charge_strength: 400.0,
			link_distance: 120.0,
			center_strength: 0.02,
			velocity_decay: 0.3,
			alpha_decay: 0.0228,
			alpha_min: 0.001,
			warmup_ticks: 60,
			cooldown_time: 15.0,
		}
	}

	/// Calm but still wide layout once warm-up is over.
	pub fn steady() -> Self {
		Self {
			charge_strength: 220.0,
			link_distance: 90.0,
			..Self::warm_up()
		}
	}

	/// Low-energy layout while a course is being inspected.
	pub fn focused() -> Self {
		Self {
			charge_strength: 120.0,
			link_distance: 50.0,
			center_strength: 0.01,
			velocity_decay: 0.5,
			alpha_decay: 0.01,
			..Self::steady()
		}
	}

	/// Maps onto the engine's parameters.
	pub fn simulation_parameters(&self) -> SimulationParameters {
		let link_distance = self.link_distance.max(1.0);
		SimulationParameters {
			force_charge: self.charge_strength as f32,
			force_spring: (REFERENCE_SPRING * REFERENCE_LINK_DISTANCE / link_distance) as f32,
			force_max: FORCE_MAX,
			node_speed: NODE_SPEED,
			damping_factor: (1.0 - self.velocity_decay).clamp(0.0, 1.0) as f32,
		}
	}
}

/// Current tuning phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayoutPhase {
	WarmingUp { elapsed: f64 },
	Stable,
	Focused,
}

/// Alpha after entering the focused phase; low so nodes barely move.
const FOCUS_REHEAT_ALPHA: f64 = 0.3;

/// Drives phase changes and cooling.
#[derive(Clone, Debug)]
pub struct LayoutController {
	phase: LayoutPhase,
	params: LayoutParams,
	warmup_duration: f64,
	alpha: f64,
	since_reheat: f64,
	/// Set whenever `params` changed and the engine has not picked them up.
	dirty: bool,
}

impl LayoutController {
	/// Starts in the warm-up phase; `warmup_duration` is in seconds.
	pub fn new(warmup_duration: f64) -> Self {
		Self {
			phase: LayoutPhase::WarmingUp { elapsed: 0.0 },
			params: LayoutParams::warm_up(),
			warmup_duration: warmup_duration.max(0.0),
			alpha: 1.0,
			since_reheat: 0.0,
			dirty: true,
		}
	}

	pub fn phase(&self) -> LayoutPhase {
		self.phase
	}

	pub fn params(&self) -> &LayoutParams {
		&self.params
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// True once warm-up is over.
	pub fn is_stable(&self) -> bool {
		!matches!(self.phase, LayoutPhase::WarmingUp { .. })
	}

	/// Whether the simulation should still step.
	pub fn is_running(&self) -> bool {
		self.alpha >= self.params.alpha_min && self.since_reheat < self.params.cooldown_time
	}

	/// Returns the engine parameters if they changed since the last call.
	pub fn take_changed_parameters(&mut self) -> Option<SimulationParameters> {
		if !self.dirty {
			return None;
		}
		self.dirty = false;
		Some(self.params.simulation_parameters())
	}

	fn enter(&mut self, phase: LayoutPhase, params: LayoutParams, alpha: f64) {
		self.phase = phase;
		self.params = params;
		self.dirty = true;
		self.reheat(alpha);
	}

	/// Raises alpha (never lowers it) and restarts the cooldown clock.
	pub fn reheat(&mut self, alpha: f64) {
		self.alpha = self.alpha.max(alpha.clamp(0.0, 1.0));
		self.since_reheat = 0.0;
	}

	/// Selection changed: focus while a course is selected, relax otherwise.
	pub fn set_focus(&mut self, focused: bool) {
		match (focused, self.phase) {
			(true, LayoutPhase::Focused) => {}
			(true, _) => {
				self.enter(LayoutPhase::Focused, LayoutParams::focused(), FOCUS_REHEAT_ALPHA)
			}
			(false, LayoutPhase::Focused) => {
				self.enter(LayoutPhase::Stable, LayoutParams::steady(), FOCUS_REHEAT_ALPHA)
			}
			(false, _) => {}
		}
	}

	/// Advances phase timers and cools alpha by one step of `dt` seconds.
	///
	/// Returns the step size to hand to the engine, or `None` when the
	/// simulation has come to rest.
	pub fn advance(&mut self, dt: f64) -> Option<f64> {
		if let LayoutPhase::WarmingUp { elapsed } = self.phase {
			let elapsed = elapsed + dt;
			if elapsed >= self.warmup_duration {
				self.enter(LayoutPhase::Stable, LayoutParams::steady(), 1.0);
			} else {
				self.phase = LayoutPhase::WarmingUp { elapsed };
			}
		}

		if !self.is_running() {
			return None;
		}
		self.since_reheat += dt;
		Some(self.cool(dt))
	}

	/// Cools alpha by one step without touching the phase or cooldown clocks.
	///
	/// Used for the synchronous ticks run before the first paint, so the
	/// on-screen warm-up still lasts its full duration.
	pub fn pre_paint_step(&mut self, dt: f64) -> Option<f64> {
		if self.alpha < self.params.alpha_min {
			return None;
		}
		Some(self.cool(dt))
	}

	fn cool(&mut self, dt: f64) -> f64 {
		self.alpha += (0.0 - self.alpha) * self.params.alpha_decay;
		dt * self.alpha
	}

	/// Centering displacement for a node at `(x, y)`.
	pub fn centering(&self, x: f64, y: f64) -> (f64, f64) {
		let k = self.params.center_strength * self.alpha;
		(-x * k, -y * k)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const FRAME: f64 = 0.016;

	fn run(controller: &mut LayoutController, seconds: f64) {
		let steps = (seconds / FRAME).ceil() as usize;
		for _ in 0..steps {
			controller.advance(FRAME);
		}
	}

	#[test]
	fn warm_up_then_stable() {
		let mut c = LayoutController::new(2.0);
		assert!(!c.is_stable());
		assert_eq!(c.params(), &LayoutParams::warm_up());

		run(&mut c, 1.0);
		assert!(!c.is_stable());

		run(&mut c, 1.1);
		assert_eq!(c.phase(), LayoutPhase::Stable);
		assert_eq!(c.params(), &LayoutParams::steady());
		assert!(c.params().charge_strength < LayoutParams::warm_up().charge_strength);
	}

	#[test]
	fn pre_paint_steps_leave_the_warm_up_clock_alone() {
		let mut c = LayoutController::new(2.0);
		let start = c.alpha();
		for _ in 0..60 {
			assert!(c.pre_paint_step(FRAME).is_some());
		}
		assert_eq!(c.phase(), LayoutPhase::WarmingUp { elapsed: 0.0 });
		assert!(c.alpha() < start);
	}

	#[test]
	fn focus_lowers_energy_and_restores_on_blur() {
		let mut c = LayoutController::new(0.0);
		c.advance(FRAME);
		assert_eq!(c.phase(), LayoutPhase::Stable);

		c.set_focus(true);
		let focused = c.params().clone();
		let steady = LayoutParams::steady();
		assert_eq!(c.phase(), LayoutPhase::Focused);
		assert!(focused.charge_strength < steady.charge_strength);
		assert!(focused.link_distance < steady.link_distance);
		assert!(focused.alpha_decay < steady.alpha_decay);

		c.set_focus(false);
		assert_eq!(c.phase(), LayoutPhase::Stable);
		assert_eq!(c.params(), &steady);
	}

	#[test]
	fn focus_during_warm_up_wins() {
		let mut c = LayoutController::new(2.0);
		c.set_focus(true);
		run(&mut c, 3.0);
		assert_eq!(c.phase(), LayoutPhase::Focused);
	}

	#[test]
	fn blur_without_focus_is_a_no_op() {
		let mut c = LayoutController::new(2.0);
		c.set_focus(false);
		assert!(matches!(c.phase(), LayoutPhase::WarmingUp { .. }));
	}

	#[test]
	fn alpha_cools_until_stop() {
		let mut c = LayoutController::new(0.0);
		let first = c.advance(FRAME).unwrap();
		let second = c.advance(FRAME).unwrap();
		assert!(second < first);

		let mut steps = 0;
		while c.advance(FRAME).is_some() {
			steps += 1;
			assert!(steps < 10_000, "simulation never settled");
		}
		assert!(!c.is_running());
	}

	#[test]
	fn cooldown_time_stops_a_hot_simulation() {
		let mut c = LayoutController::new(0.0);
		c.advance(FRAME);
		c.params.alpha_decay = 0.0;
		c.params.cooldown_time = 0.5;
		run(&mut c, 0.6);
		assert!(c.advance(FRAME).is_none());
		c.reheat(1.0);
		assert!(c.advance(FRAME).is_some());
	}

	#[test]
	fn parameter_changes_are_reported_once() {
		let mut c = LayoutController::new(2.0);
		assert!(c.take_changed_parameters().is_some());
		assert!(c.take_changed_parameters().is_none());
		c.set_focus(true);
		let params = c.take_changed_parameters().unwrap();
		assert_eq!(params.force_charge, LayoutParams::focused().charge_strength as f32);
	}

	#[test]
	fn shorter_links_mean_stiffer_springs() {
		let steady = LayoutParams::steady().simulation_parameters();
		let focused = LayoutParams::focused().simulation_parameters();
		assert!(focused.force_spring > steady.force_spring);
		assert!((steady.damping_factor - 0.7).abs() < 1e-6);
	}

	#[test]
	fn centering_pulls_towards_origin() {
		let c = LayoutController::new(2.0);
		let (dx, dy) = c.centering(100.0, -50.0);
		assert!(dx < 0.0 && dy > 0.0);
	}
}
