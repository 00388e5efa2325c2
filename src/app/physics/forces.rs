use std::f32::consts::{PI, TAU};

use eframe::egui::{Vec2, vec2};

use crate::tree::NodeId;

const COINCIDENT_DISTANCE: f32 = 1e-4;

pub(super) fn gravity(position: Vec2, strength: f32) -> Vec2 {
    -position * strength
}

/// Push felt by `other` from `current`; `current` takes the negation. The
/// magnitude divides by twice the distance, not its square, so every pair
/// exchanges a constant `strength / 2` regardless of spacing.
pub(super) fn repulsion_between(
    current: Vec2,
    other: Vec2,
    strength: f32,
    current_id: NodeId,
    other_id: NodeId,
) -> Vec2 {
    let direction = other - current;
    let distance = direction.length();
    if distance <= COINCIDENT_DISTANCE {
        let angle = ((current_id as f32) * 0.618_034 + (other_id as f32) * 0.414_214) * TAU;
        return vec2(angle.cos(), angle.sin()) * (strength * 0.5);
    }

    let magnitude = 2.0 * distance;
    direction / magnitude * strength
}

/// Unit-stiffness, zero-rest-length spring: the parent receives the negation.
pub(super) fn spring_displacement(parent: Vec2, child: Vec2) -> Vec2 {
    parent - child
}

pub(super) fn mass(radius: f32) -> f32 {
    let mass = (2.0 * PI * radius) / 1.5;
    if mass.is_finite() && mass > 0.0 {
        mass
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_points_to_origin() {
        assert_eq!(gravity(vec2(10.0, -4.0), 1.1), vec2(-11.0, 4.4));
    }

    #[test]
    fn repulsion_has_constant_magnitude() {
        let near = repulsion_between(Vec2::ZERO, vec2(3.0, 4.0), 4000.0, 0, 1);
        let far = repulsion_between(Vec2::ZERO, vec2(300.0, 400.0), 4000.0, 0, 1);
        assert!((near.length() - 2000.0).abs() < 1e-2);
        assert!((far.length() - 2000.0).abs() < 1e-2);
        assert!((near.x - 1200.0).abs() < 1e-2);
        assert!((near.y - 1600.0).abs() < 1e-2);
    }

    #[test]
    fn coincident_points_stay_finite() {
        let force = repulsion_between(vec2(5.0, 5.0), vec2(5.0, 5.0), 4000.0, 2, 3);
        assert!(force.x.is_finite() && force.y.is_finite());
        assert!((force.length() - 2000.0).abs() < 1e-2);
    }

    #[test]
    fn mass_grows_with_radius_and_never_zero() {
        assert!((mass(150.0) - (2.0 * PI * 150.0 / 1.5)).abs() < 1e-3);
        assert_eq!(mass(0.0), 1.0);
        assert_eq!(mass(-3.0), 1.0);
        assert_eq!(mass(f32::NAN), 1.0);
    }
}
