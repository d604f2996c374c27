//! Collision detection between the ball and polygon edges
//!
//! The ball is tested against each edge as a finite segment: the closest
//! point uses a clamped projection, so vertex hits need no separate branch.

use glam::Vec2;

use super::polygon::{Edge, Polygon};
use super::state::CircleBody;
use crate::try_normalize;

/// Edges shorter than this (squared) are treated as degenerate
const MIN_EDGE_LEN_SQ: f32 = 1e-8;

/// A contact between the ball and one edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    /// Which edge was hit
    pub edge_index: usize,
    /// Closest point on the edge to the ball center
    pub point: Vec2,
    /// Unit normal pointing from the wall toward the ball center
    pub normal: Vec2,
    /// Penetration depth (radius - distance), always ≥ 0
    pub depth: f32,
    /// Unclamped projection parameter along the edge (0 = start, 1 = end)
    pub t: f32,
}

/// Check one edge against the ball
///
/// `polygon_center` only matters when the ball center lies exactly on the
/// edge; the fallback normal then faces the polygon interior.
pub fn probe(edge: &Edge, circle: &CircleBody, polygon_center: Vec2) -> Option<Collision> {
    let dir = edge.direction();
    let len_sq = dir.length_squared();
    if len_sq < MIN_EDGE_LEN_SQ {
        return None;
    }

    let t = (circle.pos - edge.start).dot(dir) / len_sq;
    let closest = edge.start + dir * t.clamp(0.0, 1.0);
    let offset = circle.pos - closest;
    let dist = offset.length();

    if dist >= circle.radius {
        return None;
    }

    // Center exactly on the edge: fall back to the interior side so the
    // correction keeps the ball in the container
    let normal = try_normalize(offset).unwrap_or_else(|_| {
        let perp = Vec2::new(-dir.y, dir.x) / len_sq.sqrt();
        if perp.dot(polygon_center - closest) >= 0.0 {
            perp
        } else {
            -perp
        }
    });

    Some(Collision {
        edge_index: edge.index,
        point: closest,
        normal,
        depth: circle.radius - dist,
        t,
    })
}

/// Probe every edge and keep the deepest contact
///
/// Ties keep the lower edge index, so the result is stable.
pub fn deepest_contact(polygon: &Polygon, circle: &CircleBody) -> Option<Collision> {
    polygon
        .edges()
        .filter_map(|edge| probe(&edge, circle, polygon.center))
        .fold(None, |best: Option<Collision>, hit| match best {
            Some(b) if b.depth >= hit.depth => Some(b),
            _ => Some(hit),
        })
}

/// All edges currently touching the ball, in edge order
pub fn all_contacts(polygon: &Polygon, circle: &CircleBody) -> Vec<Collision> {
    polygon
        .edges()
        .filter_map(|edge| probe(&edge, circle, polygon.center))
        .collect()
}
