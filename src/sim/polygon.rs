//! Regular polygon geometry for the spinning container
//!
//! The polygon is stored as (center, circumradius, rotation). Vertices are
//! derived on demand:
//! - vertex i sits at angle `rotation + i * 2π / sides`
//! - edge i runs from vertex i to vertex (i + 1) mod sides

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::{polar_to_cartesian, wrap_angle};

/// A regular convex polygon rotating about its center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    /// Number of sides (≥ 3)
    sides: usize,
    /// Rotation center, also the centroid
    pub center: Vec2,
    /// Distance from center to every vertex
    pub circumradius: f32,
    /// Current rotation (radians, wrapped to [0, 2π))
    pub rotation: f32,
    /// Spin rate (radians per second, positive = toward +y from +x)
    pub angular_velocity: f32,
}

/// One side of the polygon, borrowed for a single query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub index: usize,
    pub start: Vec2,
    pub end: Vec2,
}

impl Edge {
    /// Vector from start to end
    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.end - self.start
    }

    #[inline]
    pub fn midpoint(&self) -> Vec2 {
        (self.start + self.end) * 0.5
    }
}

impl Polygon {
    pub fn new(
        sides: usize,
        center: Vec2,
        circumradius: f32,
        rotation: f32,
        angular_velocity: f32,
    ) -> Result<Self, SimError> {
        if sides < 3 {
            return Err(SimError::invalid(format!(
                "polygon needs at least 3 sides, got {sides}"
            )));
        }
        if !(circumradius > 0.0) || !circumradius.is_finite() {
            return Err(SimError::invalid(format!(
                "circumradius must be positive and finite, got {circumradius}"
            )));
        }
        if !center.is_finite() || !rotation.is_finite() || !angular_velocity.is_finite() {
            return Err(SimError::invalid("polygon center, rotation and spin must be finite"));
        }
        Ok(Self {
            sides,
            center,
            circumradius,
            rotation: wrap_angle(rotation),
            angular_velocity,
        })
    }

    #[inline]
    pub fn sides(&self) -> usize {
        self.sides
    }

    /// Angle between consecutive vertices
    #[inline]
    pub fn vertex_spacing(&self) -> f32 {
        std::f32::consts::TAU / self.sides as f32
    }

    /// Distance from center to the middle of each edge
    #[inline]
    pub fn apothem(&self) -> f32 {
        self.circumradius * (std::f32::consts::PI / self.sides as f32).cos()
    }

    /// Vertex `i` (taken mod `sides`) at the current rotation
    pub fn vertex(&self, i: usize) -> Vec2 {
        let theta = self.rotation + (i % self.sides) as f32 * self.vertex_spacing();
        self.center + polar_to_cartesian(self.circumradius, theta)
    }

    /// All vertices in order
    pub fn vertices(&self) -> Vec<Vec2> {
        (0..self.sides).map(|i| self.vertex(i)).collect()
    }

    /// Edge `i` (taken mod `sides`)
    pub fn edge(&self, i: usize) -> Edge {
        let index = i % self.sides;
        Edge {
            index,
            start: self.vertex(index),
            end: self.vertex(index + 1),
        }
    }

    /// Edges in order, closing back to vertex 0
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.sides).map(move |i| self.edge(i))
    }

    /// Spin by `angular_velocity * dt`
    pub fn advance_rotation(&mut self, dt: f32) {
        self.rotation = wrap_angle(self.rotation + self.angular_velocity * dt);
    }

    /// Velocity of the material point of the rigid polygon at `point` (ω × r)
    #[inline]
    pub fn edge_velocity_at(&self, point: Vec2) -> Vec2 {
        let r = point - self.center;
        Vec2::new(-self.angular_velocity * r.y, self.angular_velocity * r.x)
    }

    /// Check if a point is inside (or on the boundary of) the polygon
    pub fn contains_point(&self, point: Vec2) -> bool {
        let to_point = point - self.center;
        self.edges().all(|edge| {
            let mid = edge.midpoint() - self.center;
            // Convex: inside iff not beyond any edge's supporting line
            let outward = mid.normalize_or_zero();
            to_point.dot(outward) <= mid.length() + 1e-4
        })
    }
}
