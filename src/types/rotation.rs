//! Rotation helpers on top of nalgebra quaternions
//!
//! Offsets are authored in Euler degrees using the host convention:
//! roll about Z first, then pitch about X, then yaw about Y.

use nalgebra::{UnitQuaternion, Vector3};

/// Local bone rotation
pub type Rotation = UnitQuaternion<f32>;

/// Identity rotation
pub fn identity() -> Rotation {
    UnitQuaternion::identity()
}

/// Build a rotation from Euler degrees (pitch = X, yaw = Y, roll = Z)
pub fn euler_deg(pitch: f32, yaw: f32, roll: f32) -> Rotation {
    let y = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), yaw.to_radians());
    let x = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), pitch.to_radians());
    let z = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), roll.to_radians());
    y * x * z
}

/// Shortest-path spherical interpolation with `t` clamped to [0, 1]
pub fn slerp(from: &Rotation, to: &Rotation, t: f32) -> Rotation {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    from.try_slerp(to, t, 1.0e-6).unwrap_or(*to)
}

/// Interpolation factor for exponential smoothing at `rate` per second
pub fn smoothing_factor(dt: f32, rate: f32) -> f32 {
    (dt * rate).clamp(0.0, 1.0)
}

/// Rotation angle in degrees
pub fn angle_deg(rotation: &Rotation) -> f32 {
    rotation.angle().to_degrees()
}

/// Components in `[x, y, z, w]` order
pub fn to_array(rotation: &Rotation) -> [f32; 4] {
    let c = rotation.quaternion().coords;
    [c.x, c.y, c.z, c.w]
}
