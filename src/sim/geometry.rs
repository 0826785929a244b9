//! Kinematics helpers for the wrapped play area
//!
//! Two wrap policies coexist: asteroids wrap continuously (modulo), while the
//! ship teleports to the opposite edge when it crosses one.

use glam::Vec2;

/// Map a scalar into `[min, max)` by Euclidean modulo
#[inline]
pub fn wrap(value: f32, min: f32, max: f32) -> f32 {
    let span = max - min;
    if span <= 0.0 {
        return min;
    }
    let wrapped = min + (value - min).rem_euclid(span);
    // rem_euclid can round up to exactly `span` for tiny negative inputs
    if wrapped >= max { min } else { wrapped }
}

/// Continuous wrap of a position into `[0, width) x [0, height)`
#[inline]
pub fn wrap_position(pos: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(wrap(pos.x, 0.0, width), wrap(pos.y, 0.0, height))
}

/// Hard edge wrap: below 0 jumps to `max`, above `max` jumps to 0
#[inline]
pub fn wrap_edge(value: f32, max: f32) -> f32 {
    if value < 0.0 {
        max
    } else if value > max {
        0.0
    } else {
        value
    }
}

/// Whether a point lies inside the play area (edges inclusive)
#[inline]
pub fn in_bounds(pos: Vec2, width: f32, height: f32) -> bool {
    pos.x >= 0.0 && pos.x <= width && pos.y >= 0.0 && pos.y <= height
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Strict circle overlap test; touching circles do not collide
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    distance(a, b) < radius_a + radius_b
}

/// Rescale `vel` to `max` length if it is longer, keeping direction
#[inline]
pub fn clamp_speed(vel: Vec2, max: f32) -> Vec2 {
    let speed = vel.length();
    if speed > max { vel / speed * max } else { vel }
}
