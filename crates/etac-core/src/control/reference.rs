//! Reference trajectories
//!
//! The reference is a read-only function of time, sampled by the simulation
//! loop and handed to the controller and trigger. A constant hover point is
//! the common case; piecewise-linear paths cover time-varying references.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Desired state at one instant
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReferencePoint {
    /// Desired position [m]
    pub position: Vector3<f64>,
    /// Desired velocity [m/s]
    pub velocity: Vector3<f64>,
}

impl ReferencePoint {
    /// A stationary reference at the given position
    pub fn hover(position: Vector3<f64>) -> Self {
        Self {
            position,
            velocity: Vector3::zeros(),
        }
    }
}

/// A time-indexed reference trajectory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Reference {
    /// Constant hover reference
    Hover(Vector3<f64>),
    /// Piecewise-linear path through timed waypoints
    Path(ReferencePath),
}

impl Default for Reference {
    fn default() -> Self {
        Reference::Hover(Vector3::zeros())
    }
}

impl Reference {
    /// Sample the reference at time `t`
    pub fn sample(&self, t: f64) -> ReferencePoint {
        match self {
            Reference::Hover(position) => ReferencePoint::hover(*position),
            Reference::Path(path) => path.sample(t),
        }
    }
}

/// Piecewise-linear path: timestamps paired with reference points
///
/// Samples outside the timed range clamp to the first/last point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferencePath {
    /// Time stamps [s], strictly increasing
    pub times: Vec<f64>,
    /// Reference points, one per time stamp
    pub points: Vec<ReferencePoint>,
}

impl ReferencePath {
    pub fn new(times: Vec<f64>, points: Vec<ReferencePoint>) -> Self {
        assert_eq!(times.len(), points.len());
        Self { times, points }
    }

    /// Straight line from `start` to `end` traversed at constant `speed`
    pub fn line(start: Vector3<f64>, end: Vector3<f64>, speed: f64) -> Self {
        let distance = (end - start).norm();
        let duration = distance / speed;
        let velocity = (end - start) / duration;

        Self::new(
            vec![0.0, duration],
            vec![
                ReferencePoint { position: start, velocity },
                ReferencePoint { position: end, velocity },
            ],
        )
    }

    /// Sample the path at time `t` with linear interpolation
    pub fn sample(&self, t: f64) -> ReferencePoint {
        if self.times.is_empty() {
            return ReferencePoint::default();
        }
        if t <= self.times[0] {
            return self.points[0];
        }
        if t >= *self.times.last().unwrap() {
            return *self.points.last().unwrap();
        }

        let mut i = 0;
        while i < self.times.len() - 1 && self.times[i + 1] < t {
            i += 1;
        }

        let alpha = (t - self.times[i]) / (self.times[i + 1] - self.times[i]);
        let (a, b) = (&self.points[i], &self.points[i + 1]);

        ReferencePoint {
            position: a.position * (1.0 - alpha) + b.position * alpha,
            velocity: a.velocity * (1.0 - alpha) + b.velocity * alpha,
        }
    }

    /// Total path duration [s]
    pub fn duration(&self) -> f64 {
        match (self.times.first(), self.times.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }
}
