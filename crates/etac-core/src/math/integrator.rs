//! Fixed-step numerical integration
//!
//! The simulation advances the plant on a small fixed "fine step"; the
//! variable inter-event intervals of event-triggered control are layered on
//! top of this fixed-rate integration, never realized by variable-step
//! integration. All arithmetic is in `f64` and the integrators never clamp
//! or saturate.

use nalgebra::SVector;

/// Classical 4-stage Runge-Kutta step for any statically sized state vector
///
/// Advances dx/dt = f(t, x) by one step of size `dt`.
pub fn rk4<const N: usize, F>(x: &SVector<f64, N>, t: f64, dt: f64, f: F) -> SVector<f64, N>
where
    F: Fn(f64, &SVector<f64, N>) -> SVector<f64, N>,
{
    let k1 = f(t, x);
    let k2 = f(t + dt / 2.0, &(x + k1 * (dt / 2.0)));
    let k3 = f(t + dt / 2.0, &(x + k2 * (dt / 2.0)));
    let k4 = f(t + dt, &(x + k3 * dt));

    x + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0)
}

/// Forward Euler step
///
/// First-order scheme kept for accuracy comparisons and for state updates
/// whose derivative is approximately constant over the step (the
/// disturbance observer).
pub fn euler<const N: usize, F>(x: &SVector<f64, N>, t: f64, dt: f64, f: F) -> SVector<f64, N>
where
    F: Fn(f64, &SVector<f64, N>) -> SVector<f64, N>,
{
    x + f(t, x) * dt
}
