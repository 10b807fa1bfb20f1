//! Angle conventions shared by units, turrets, and the AI.
//!
//! All angles are in degrees. 0° points "up" on screen (negative y) and
//! angles grow clockwise, so 90° points along +x.

use crate::types::Vec2;

/// Normalize an angle to [0, 360).
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Signed shortest rotation from `from` to `to`, in (-180, 180].
pub fn angle_difference(from: f64, to: f64) -> f64 {
    let diff = normalize_angle(to - from);
    if diff > 180.0 {
        diff - 360.0
    } else {
        diff
    }
}

/// Unit vector for a facing angle in the 0° = up convention.
pub fn facing_vector(angle_deg: f64) -> Vec2 {
    let rad = (angle_deg - 90.0).to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Unit vector a turret fires along. Unlike [`facing_vector`] the angle is
/// not shifted by -90°, so 0° points along +x and a turret aimed with
/// [`angle_towards`] fires 90° clockwise of its aim point.
pub fn turret_vector(angle_deg: f64) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Facing angle from `from` toward `to`, normalized to [0, 360).
pub fn angle_towards(from: Vec2, to: Vec2) -> f64 {
    let delta = to - from;
    normalize_angle(delta.y.atan2(delta.x).to_degrees() + 90.0)
}

/// Rotate `current` toward `target` along the shortest path by at most
/// `max_step` degrees. Never overshoots the target.
pub fn rotate_towards(current: f64, target: f64, max_step: f64) -> f64 {
    let diff = angle_difference(current, target);
    let step = max_step.max(0.0).min(diff.abs());
    normalize_angle(current + step * diff.signum())
}
