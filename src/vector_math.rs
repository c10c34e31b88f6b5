//! Planar vector helpers used by the pursuit controller.
//! Small wrappers around `glam` that never produce NaN directions.
use glam::Vec2;

/// Returns the unit vector pointing from `from` towards `to`.
///
/// Returns `Vec2::ZERO` when the points coincide or either input is not
/// finite, so callers can multiply the result by a speed without guarding.
///
/// # Examples
/// ```
/// use glam::Vec2;
/// use heroes::vector_math::planar_direction;
///
/// let dir = planar_direction(Vec2::ZERO, Vec2::new(3.0, 4.0));
/// assert!((dir.x - 0.6).abs() < 1e-6);
/// assert!((dir.y - 0.8).abs() < 1e-6);
///
/// assert_eq!(planar_direction(Vec2::ONE, Vec2::ONE), Vec2::ZERO);
/// ```
#[must_use]
pub fn planar_direction(from: Vec2, to: Vec2) -> Vec2 {
    let offset = to - from;
    if !offset.is_finite() {
        return Vec2::ZERO;
    }
    offset.try_normalize().unwrap_or(Vec2::ZERO)
}

/// Moves `from` towards `to` by at most `max_step`, never overshooting.
///
/// A non-positive or non-finite `max_step` leaves the point where it is.
///
/// # Examples
/// ```
/// use glam::Vec2;
/// use heroes::vector_math::step_towards;
///
/// let next = step_towards(Vec2::ZERO, Vec2::new(10.0, 0.0), 2.5);
/// assert!((next.x - 2.5).abs() < 1e-6);
///
/// // Large steps stop on the destination instead of passing it.
/// let capped = step_towards(Vec2::ZERO, Vec2::new(1.0, 0.0), 5.0);
/// assert!((capped.x - 1.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn step_towards(from: Vec2, to: Vec2, max_step: f32) -> Vec2 {
    if !max_step.is_finite() || max_step <= 0.0 {
        return from;
    }
    let distance = from.distance(to);
    from + planar_direction(from, to) * max_step.min(distance)
}
