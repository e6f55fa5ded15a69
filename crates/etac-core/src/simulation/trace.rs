//! Simulation trace recording
//!
//! Passive, append-only collection of per-step samples and firing events.
//! The loop owns the trace during a run and exposes it read-only afterwards;
//! the inter-event intervals derived here are the principal metric of an
//! event-triggered control study.

use crate::dynamics::{RotorCommand, UavState};

/// One sample per fine integration step
#[derive(Debug, Clone, Copy)]
pub struct TraceSample {
    /// Simulation time [s]
    pub time: f64,
    /// Plant state after the step
    pub state: UavState,
    /// Command held during the step
    pub command: RotorCommand,
}

/// One record per firing event
#[derive(Debug, Clone, Copy)]
pub struct EventRecord {
    /// Firing time [s]; strictly increasing across a run
    pub time: f64,
    /// Triggering error value at the firing instant
    pub error: f64,
}

/// Recorded history of one run
#[derive(Debug, Clone, Default)]
pub struct SimTrace {
    /// Per-step samples, including the initial condition at t = 0
    pub samples: Vec<TraceSample>,
    /// Firing events, starting with the forced event at t = 0
    pub events: Vec<EventRecord>,
}

impl SimTrace {
    /// Append a per-step sample
    pub fn record_sample(&mut self, time: f64, state: UavState, command: RotorCommand) {
        self.samples.push(TraceSample { time, state, command });
    }

    /// Append a firing event
    pub fn record_event(&mut self, time: f64, error: f64) {
        self.events.push(EventRecord { time, error });
    }

    /// Number of recorded samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when no samples have been recorded
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Simulated time span covered by the samples
    pub fn duration(&self) -> f64 {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => last.time - first.time,
            _ => 0.0,
        }
    }

    /// Number of firing events
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Elapsed time between consecutive firing events
    pub fn inter_event_intervals(&self) -> Vec<f64> {
        self.events
            .windows(2)
            .map(|pair| pair[1].time - pair[0].time)
            .collect()
    }

    /// Mean inter-event interval, if at least two events fired
    pub fn mean_inter_event_interval(&self) -> Option<f64> {
        let intervals = self.inter_event_intervals();
        if intervals.is_empty() {
            None
        } else {
            Some(intervals.iter().sum::<f64>() / intervals.len() as f64)
        }
    }

    /// Smallest inter-event interval, if at least two events fired
    pub fn min_inter_event_interval(&self) -> Option<f64> {
        self.inter_event_intervals()
            .into_iter()
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Fraction of fine steps that triggered a control update
    ///
    /// The quantity event-triggering is meant to reduce; a periodic
    /// controller would sit at 1.0.
    pub fn update_fraction(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.events.len() as f64 / self.samples.len() as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn trace_with_events(times: &[f64]) -> SimTrace {
        let mut trace = SimTrace::default();
        for &t in times {
            trace.record_event(t, 0.1);
        }
        trace
    }

    #[test]
    fn intervals_between_events() {
        let trace = trace_with_events(&[0.0, 0.3, 0.5, 1.0]);

        let intervals = trace.inter_event_intervals();
        assert_eq!(intervals.len(), 3);
        assert_relative_eq!(intervals[0], 0.3, epsilon = 1e-12);
        assert_relative_eq!(intervals[1], 0.2, epsilon = 1e-12);
        assert_relative_eq!(intervals[2], 0.5, epsilon = 1e-12);

        assert_relative_eq!(trace.mean_inter_event_interval().unwrap(), 1.0 / 3.0);
        assert_relative_eq!(trace.min_inter_event_interval().unwrap(), 0.2);
    }

    #[test]
    fn single_event_has_no_intervals() {
        let trace = trace_with_events(&[0.0]);
        assert!(trace.inter_event_intervals().is_empty());
        assert!(trace.mean_inter_event_interval().is_none());
    }

    #[test]
    fn update_fraction_counts_events_per_sample() {
        let mut trace = trace_with_events(&[0.0, 0.02]);
        for k in 0..4 {
            trace.record_sample(k as f64 * 0.01, UavState::default(), RotorCommand::default());
        }
        assert_relative_eq!(trace.update_fraction(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn duration_spans_samples() {
        let mut trace = SimTrace::default();
        trace.record_sample(0.0, UavState::default(), RotorCommand::default());
        trace.record_sample(1.5, UavState::default(), RotorCommand::default());
        assert_relative_eq!(trace.duration(), 1.5, epsilon = 1e-12);
    }
}
