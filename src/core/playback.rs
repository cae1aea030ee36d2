use serde::Serialize;

use crate::core::error::SimError;
use crate::core::mapper::DisplayConfig;
use crate::core::model::{FlightState, PhysicsModel, Point};
use crate::core::params::ParameterSet;

/// One simulated step per rendered frame.
pub const DEFAULT_TICK_S: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Landed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub max_height_m: f64,
    pub landing_distance_m: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Ignored,
    Advanced,
    Landed,
}

/// Fire/pause/resume/reset state machine for a single shot.
///
/// Commands that are not valid in the current phase are ignored and return
/// `false`; nothing here fails once the controller exists. The parameter set
/// is passed into every call and never cached, so edits made between ticks
/// apply to the next tick.
#[derive(Clone, Debug)]
pub struct PlaybackController {
    display: DisplayConfig,
    selected_model: PhysicsModel,
    active_model: PhysicsModel,
    phase: Phase,
    state: FlightState,
    trajectory: Vec<Point>,
    metrics: SummaryMetrics,
}

impl PlaybackController {
    pub fn new(model: PhysicsModel, display: DisplayConfig) -> Result<Self, SimError> {
        display.validate()?;
        Ok(Self {
            display,
            selected_model: model,
            active_model: model,
            phase: Phase::Idle,
            state: FlightState::default(),
            trajectory: Vec::new(),
            metrics: SummaryMetrics::default(),
        })
    }

    /// Takes effect on the next `fire`; a flight in progress keeps its model.
    pub fn set_model(&mut self, model: PhysicsModel) {
        self.selected_model = model;
    }

    pub fn fire(&mut self, params: &ParameterSet) -> bool {
        if !matches!(self.phase, Phase::Idle | Phase::Landed) {
            log::trace!("fire ignored while {:?}", self.phase);
            return false;
        }
        self.active_model = self.selected_model;
        self.state = FlightState::at_muzzle(params);
        self.trajectory.clear();
        self.metrics = SummaryMetrics::default();
        self.phase = Phase::Running;
        log::debug!(
            "fired ({} model): speed={:.2} m/s angle={:.1} deg g={:.2}",
            self.active_model,
            params.launch_speed_mps,
            params.launch_angle_deg,
            params.gravity_mps2
        );
        true
    }

    pub fn tick(&mut self, dt: f64, params: &ParameterSet) -> TickOutcome {
        if self.phase != Phase::Running || !dt.is_finite() || dt <= 0.0 {
            return TickOutcome::Ignored;
        }

        let prev = self.state;
        let next = self.active_model.advance(prev, dt, params);
        let landing = self.active_model.ground_crossing(prev, next, params);
        self.state = landing.unwrap_or(next);

        let sample = self.display.to_display(params, self.state.position);
        self.trajectory.push(sample);
        self.metrics.max_height_m = self.metrics.max_height_m.max(self.state.position.y);
        log::trace!(
            "t={:.3}s x={:.3} y={:.3}",
            self.state.elapsed_s,
            self.state.position.x,
            self.state.position.y
        );

        if landing.is_none() {
            return TickOutcome::Advanced;
        }

        let distance = self.display.to_physical(params, sample).x;
        self.metrics.landing_distance_m = Some(distance);
        self.phase = Phase::Landed;
        log::info!(
            "landed at {distance:.2} m after {:.3} s, max height {:.2} m",
            self.state.elapsed_s,
            self.metrics.max_height_m
        );
        TickOutcome::Landed
    }

    pub fn pause(&mut self) -> bool {
        self.transition(Phase::Running, Phase::Paused)
    }

    pub fn resume(&mut self) -> bool {
        self.transition(Phase::Paused, Phase::Running)
    }

    pub fn reset(&mut self) -> bool {
        self.phase = Phase::Idle;
        self.state = FlightState::default();
        self.trajectory.clear();
        self.metrics = SummaryMetrics::default();
        log::debug!("reset");
        true
    }

    fn transition(&mut self, from: Phase, to: Phase) -> bool {
        if self.phase != from {
            log::trace!("{to:?} ignored while {:?}", self.phase);
            return false;
        }
        self.phase = to;
        log::debug!("{from:?} -> {to:?} at t={:.3}s", self.state.elapsed_s);
        true
    }

    /// Ticks until the shot lands or `max_ticks` run out. Returns the landing
    /// distance if it landed.
    pub fn run_to_landing(
        &mut self,
        params: &ParameterSet,
        dt: f64,
        max_ticks: usize,
    ) -> Option<f64> {
        for _ in 0..max_ticks {
            match self.tick(dt, params) {
                TickOutcome::Advanced => {}
                TickOutcome::Landed | TickOutcome::Ignored => break,
            }
        }
        self.metrics.landing_distance_m
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn model(&self) -> PhysicsModel {
        self.selected_model
    }

    /// Model of the current (or last) flight.
    pub fn active_model(&self) -> PhysicsModel {
        self.active_model
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    /// Display-space samples, oldest first.
    pub fn trajectory(&self) -> &[Point] {
        &self.trajectory
    }

    pub fn metrics(&self) -> SummaryMetrics {
        self.metrics
    }

    pub fn flight_state(&self) -> FlightState {
        self.state
    }

    pub fn elapsed_s(&self) -> f64 {
        self.state.elapsed_s
    }

    pub fn muzzle_display(&self, params: &ParameterSet) -> Point {
        self.display.muzzle_display(params)
    }

    pub fn projectile_display(&self, params: &ParameterSet) -> Point {
        self.display.to_display(params, self.state.position)
    }
}
