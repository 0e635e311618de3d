//! Collision classification and reflection for axis-aligned surfaces
//!
//! Collisions are discrete: the ball's post-move rectangle is tested against
//! each surface. The previous rectangle is only used to tell which edge of the
//! surface was crossed. A ball fast enough to jump over a thin surface in one
//! frame passes through it.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::{angle_of, direction, normalize_angle};

/// Edge of a collidable that the ball struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    /// Top and bottom edges are horizontal surfaces (reflect vertical motion)
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Edge::Top | Edge::Bottom)
    }
}

/// Result of a default (mirror) bounce
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    pub edge: Edge,
    /// Outgoing angle, normalized to [-π, π)
    pub angle: f32,
}

/// Work out which edge of `target` the ball crossed between `prev` and `current`
///
/// If the previous rectangle was clear of the target on exactly one axis, the
/// side it came from is the struck edge. Otherwise (diagonal approach, or the
/// ball already overlapped) the axis with the shallower penetration wins.
pub fn classify_impact(prev: &Rect, current: &Rect, target: &Rect) -> Edge {
    let was_above = prev.bottom() <= target.top();
    let was_below = prev.top() >= target.bottom();
    let was_left = prev.right() <= target.left();
    let was_right = prev.left() >= target.right();

    let vertical = was_above || was_below;
    let horizontal = was_left || was_right;

    match (vertical, horizontal) {
        (true, false) => {
            if was_above {
                Edge::Top
            } else {
                Edge::Bottom
            }
        }
        (false, true) => {
            if was_left {
                Edge::Left
            } else {
                Edge::Right
            }
        }
        _ => classify_by_penetration(current, target),
    }
}

fn classify_by_penetration(current: &Rect, target: &Rect) -> Edge {
    let overlap = current.overlap(target);
    let offset = current.center() - target.center();

    if overlap.x < overlap.y {
        if offset.x < 0.0 { Edge::Left } else { Edge::Right }
    } else if offset.y < 0.0 {
        Edge::Top
    } else {
        Edge::Bottom
    }
}

/// Mirror an angle off the given edge
///
/// The velocity component normal to the surface is negated only when it points
/// into the surface; a ball already leaving keeps its heading.
pub fn reflect_angle(angle: f32, edge: Edge) -> f32 {
    let mut v = direction(angle);
    match edge {
        Edge::Top => v.y = -v.y.abs(),
        Edge::Bottom => v.y = v.y.abs(),
        Edge::Left => v.x = -v.x.abs(),
        Edge::Right => v.x = v.x.abs(),
    }
    normalize_angle(angle_of(v))
}

/// Default bounce: classify the struck edge, then mirror
pub fn default_bounce(prev: &Rect, current: &Rect, target: &Rect, angle: f32) -> Impact {
    let edge = classify_impact(prev, current, target);
    Impact {
        edge,
        angle: reflect_angle(angle, edge),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_classify_from_above() {
        let target = Rect::new(100.0, 100.0, 40.0, 20.0);
        let prev = Rect::new(110.0, 85.0, 10.0, 10.0);
        let current = Rect::new(112.0, 93.0, 10.0, 10.0);
        assert_eq!(classify_impact(&prev, &current, &target), Edge::Top);
    }

    #[test]
    fn test_classify_from_left() {
        let target = Rect::new(100.0, 100.0, 40.0, 20.0);
        let prev = Rect::new(88.0, 105.0, 10.0, 10.0);
        let current = Rect::new(93.0, 106.0, 10.0, 10.0);
        assert_eq!(classify_impact(&prev, &current, &target), Edge::Left);
    }

    #[test]
    fn test_classify_diagonal_uses_penetration() {
        let target = Rect::new(100.0, 100.0, 40.0, 20.0);
        // Came from the top-left corner, sunk deeper vertically than horizontally
        let prev = Rect::new(85.0, 85.0, 10.0, 10.0);
        let current = Rect::new(91.0, 95.0, 10.0, 10.0);
        assert_eq!(classify_impact(&prev, &current, &target), Edge::Left);
    }

    #[test]
    fn test_reflect_horizontal_surface_negates_vy() {
        let v = Vec2::new(3.0, 4.0).normalize();
        let out = direction(reflect_angle(angle_of(v), Edge::Top));
        assert!(approx(out, Vec2::new(v.x, -v.y)));
    }

    #[test]
    fn test_reflect_vertical_surface_negates_vx() {
        let v = Vec2::new(3.0, -4.0).normalize();
        let out = direction(reflect_angle(angle_of(v), Edge::Left));
        assert!(approx(out, Vec2::new(-v.x, v.y)));
    }

    #[test]
    fn test_reflect_leaving_surface_keeps_heading() {
        // Moving up and away from a top edge
        let v = Vec2::new(1.0, -1.0).normalize();
        let out = direction(reflect_angle(angle_of(v), Edge::Top));
        assert!(approx(out, v));
    }

    #[test]
    fn test_default_bounce_off_ceiling() {
        let ceiling = Rect::new(0.0, 0.0, 600.0, 20.0);
        let prev = Rect::new(300.0, 25.0, 10.0, 10.0);
        let current = Rect::new(303.0, 18.0, 10.0, 10.0);
        let angle = angle_of(Vec2::new(3.0, -7.0));
        let impact = default_bounce(&prev, &current, &ceiling, angle);
        assert_eq!(impact.edge, Edge::Bottom);
        assert!(direction(impact.angle).y > 0.0);
    }
}
