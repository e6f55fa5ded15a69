//! Event-triggered simulation loop
//!
//! The orchestrator of the hybrid system: the plant evolves continuously on
//! a fixed fine step while the rotor command is a zero-order hold refreshed
//! only at trigger instants. Per fine step the loop propagates the plant
//! with the held command, records a trace sample, and evaluates the
//! triggering law; on firing it refreshes the held command and moves the
//! trigger anchor to the current state.
//!
//! All held state (command, anchor, clock) lives in the `Simulator` value,
//! so independent runs are fully isolated and may execute in parallel
//! without any sharing.

use thiserror::Error;

use crate::control::{Controller, ReferencePoint};
use crate::dynamics::{RotorCommand, SixRotorDynamics, UavState};
use crate::simulation::{ConfigError, SimConfig, SimTrace};

/// Terminal simulation faults
#[derive(Debug, Clone, Error)]
pub enum SimError {
    /// Invalid configuration, rejected at construction
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The controller or the plant produced non-finite values
    ///
    /// Carries the last valid (time, state) pair for diagnosis. The partial
    /// trace accumulated so far stays available on the simulator; it is
    /// never passed off as a complete run.
    #[error("control divergence at t = {time:.3} s: {reason}")]
    ControlDivergence {
        time: f64,
        state: UavState,
        reason: String,
    },
}

/// Event-triggered simulator for one run
pub struct Simulator<C: Controller> {
    config: SimConfig,
    dynamics: SixRotorDynamics,
    controller: C,
    /// Plant state, mutated only by integrator output
    state: UavState,
    /// Zero-order-hold command, overwritten only at firing events
    held: RotorCommand,
    /// State captured at the most recent firing event
    anchor: UavState,
    time: f64,
    trace: SimTrace,
}

impl<C: Controller> Simulator<C> {
    /// Create a simulator from a validated configuration
    pub fn new(config: SimConfig, controller: C) -> Result<Self, ConfigError> {
        config.validate()?;

        let dynamics = SixRotorDynamics::new(config.physics.to_params());
        let state = config.initial_state.to_state();

        Ok(Self {
            dynamics,
            controller,
            state,
            held: RotorCommand::default(),
            anchor: state,
            time: 0.0,
            trace: SimTrace::default(),
            config,
        })
    }

    /// Run the full schedule from t = 0 to the horizon
    ///
    /// Forces a firing event at t = 0 (the loop never propagates with an
    /// undefined held command), then executes one fine step per clock tick.
    /// On a divergence fault the run aborts immediately; the partial trace
    /// remains accessible through [`Simulator::trace`].
    ///
    /// Expects a fresh (or [`reset`](Simulator::reset)) simulator.
    pub fn run(&mut self) -> Result<&SimTrace, SimError> {
        self.fire_initial_event()?;

        let steps = self.config.step_count();
        for k in 1..=steps {
            self.step(k as f64 * self.config.dt)?;
        }
        Ok(&self.trace)
    }

    /// Forced event at t = 0: compute the initial command and anchor
    fn fire_initial_event(&mut self) -> Result<(), SimError> {
        let reference = self.config.reference.sample(0.0);
        self.held = self.refresh_control(&reference)?;
        self.anchor = self.state;
        self.trace.record_event(0.0, 0.0);
        self.trace.record_sample(0.0, self.state, self.held);
        Ok(())
    }

    /// One fine step ending at `t_next`
    fn step(&mut self, t_next: f64) -> Result<(), SimError> {
        // Propagate with the held command; the disturbance is sampled at the
        // start of the step and held across it, like the command.
        let disturbance = self.config.disturbance.acceleration(self.time);
        let next = self
            .dynamics
            .step(&self.state, &self.held, &disturbance, self.config.dt);
        if !next.is_finite() {
            return Err(self.divergence("non-finite state after integration"));
        }
        self.state = next;
        self.time = t_next;
        self.trace.record_sample(self.time, self.state, self.held);

        // Evaluate the trigger against the anchor captured at the last event
        let reference = self.config.reference.sample(self.time);
        if self
            .config
            .trigger
            .should_fire(&self.anchor, &self.state, &reference)
        {
            let error = self.config.trigger.error(&self.anchor, &self.state);
            self.held = self.refresh_control(&reference)?;
            self.anchor = self.state;
            self.trace.record_event(self.time, error);
        }
        Ok(())
    }

    /// Ask the controller for a fresh command, rejecting non-finite output
    fn refresh_control(&mut self, reference: &ReferencePoint) -> Result<RotorCommand, SimError> {
        let command = match self.controller.compute_control(&self.state, reference) {
            Ok(command) => command,
            Err(fault) => return Err(self.divergence(fault.reason)),
        };
        if !command.is_finite() {
            return Err(self.divergence("non-finite rotor command"));
        }
        Ok(command)
    }

    fn divergence(&self, reason: impl Into<String>) -> SimError {
        SimError::ControlDivergence {
            time: self.time,
            state: self.state,
            reason: reason.into(),
        }
    }

    /// Restore the initial state, clock, and an empty trace
    ///
    /// The controller's internal state, if any, is the caller's concern.
    pub fn reset(&mut self) {
        self.state = self.config.initial_state.to_state();
        self.anchor = self.state;
        self.held = RotorCommand::default();
        self.time = 0.0;
        self.trace = SimTrace::default();
    }

    /// Current simulation time [s]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Current plant state
    pub fn state(&self) -> &UavState {
        &self.state
    }

    /// Recorded trace (possibly partial after a fault)
    pub fn trace(&self) -> &SimTrace {
        &self.trace
    }

    /// Hand the trace over to a downstream consumer
    pub fn into_trace(self) -> SimTrace {
        self.trace
    }

    /// Run configuration
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Dynamics model built from the configuration
    pub fn dynamics(&self) -> &SixRotorDynamics {
        &self.dynamics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use crate::control::{FixedSpeedController, PdPositionController, PositionGains, Reference};

    fn default_simulator() -> Simulator<FixedSpeedController> {
        let config = SimConfig::default();
        let controller = FixedSpeedController::hover_balanced(&config.physics.to_params());
        Simulator::new(config, controller).unwrap()
    }

    #[test]
    fn rejects_invalid_config() {
        let mut config = SimConfig::default();
        config.dt = -0.01;

        let controller = FixedSpeedController::uniform(10.0);
        assert!(matches!(
            Simulator::new(config, controller),
            Err(ConfigError::NonPositiveTimeStep(_))
        ));
    }

    #[test]
    fn starts_at_time_zero_with_empty_trace() {
        let sim = default_simulator();
        assert_eq!(sim.time(), 0.0);
        assert!(sim.trace().is_empty());
    }

    #[test]
    fn run_covers_the_horizon() {
        let mut sim = default_simulator();
        let horizon = sim.config.horizon;
        let steps = sim.config.step_count();

        let trace = sim.run().unwrap();
        assert_relative_eq!(trace.duration(), horizon, epsilon = 1e-9);
        assert_eq!(trace.len(), steps + 1);
    }

    #[test]
    fn reset_returns_to_initial_conditions() {
        let mut config = SimConfig::default();
        config.initial_state.position = Vector3::new(1.0, 0.0, 5.0);
        let controller = PdPositionController::new(PositionGains::default(), config.physics.to_params());

        let mut sim = Simulator::new(config, controller).unwrap();
        sim.run().unwrap();
        assert!(sim.time() > 0.0);

        sim.reset();
        assert_eq!(sim.time(), 0.0);
        assert_relative_eq!(
            sim.state().position,
            Vector3::new(1.0, 0.0, 5.0),
            epsilon = 1e-12
        );
        assert!(sim.trace().is_empty());
    }

    #[test]
    fn tracking_run_approaches_reference() {
        let mut config = SimConfig::default();
        config.horizon = 5.0;
        config.reference = Reference::Hover(Vector3::new(0.0, 0.0, 1.0));
        let controller = PdPositionController::new(PositionGains::default(), config.physics.to_params());

        let mut sim = Simulator::new(config, controller).unwrap();
        let trace = sim.run().unwrap();

        let final_position = trace.samples.last().unwrap().state.position;
        assert!(
            (final_position.z - 1.0).abs() < 0.2,
            "altitude should settle near the 1 m reference, got {}",
            final_position.z
        );
    }
}
