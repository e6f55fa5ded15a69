//! Euler-angle rotation utilities
//!
//! The six-rotor model keeps its attitude fixed over a run, so rotations are
//! parameterized directly by ZYX (yaw-pitch-roll) Euler angles rather than
//! integrated quaternions.

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

/// Fixed vehicle attitude as ZYX Euler angles [rad]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerAngles {
    /// Roll angle about body x [rad]
    pub roll: f64,
    /// Pitch angle about body y [rad]
    pub pitch: f64,
    /// Yaw angle about body z [rad]
    pub yaw: f64,
}

impl EulerAngles {
    pub fn new(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self { roll, pitch, yaw }
    }

    /// Level attitude (identity rotation)
    pub fn level() -> Self {
        Self::default()
    }

    /// Rotation matrix from body frame to world frame (ZYX convention)
    ///
    /// R = Rz(yaw) · Ry(pitch) · Rx(roll)
    pub fn rotation_matrix(&self) -> Matrix3<f64> {
        let (sr, cr) = self.roll.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        let (sy, cy) = self.yaw.sin_cos();

        Matrix3::new(
            cy * cp, cy * sp * sr - sy * cr, cy * sp * cr + sy * sr,
            sy * cp, sy * sp * sr + cy * cr, sy * sp * cr - cy * sr,
            -sp, cp * sr, cp * cr,
        )
    }

    /// Thrust axis in the world frame
    ///
    /// The rotors push along body +z, so the world-frame thrust direction is
    /// R · e₃, the third column of the rotation matrix.
    pub fn thrust_axis(&self) -> Vector3<f64> {
        let r = self.rotation_matrix();
        r.column(2).into_owned()
    }
}
