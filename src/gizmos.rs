//! Debug overlay geometry
//!
//! Line-list vertices for checking the computed footprint against the
//! rendered light cone. The host uploads them as-is (`bytemuck::cast_slice`).

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use std::f32::consts::PI;

use crate::sim::{LightState, ShadowRole, ShadowWorld};

/// Line vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct GizmoVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl GizmoVertex {
    pub const fn new(position: Vec3, color: [f32; 4]) -> Self {
        Self {
            position: [position.x, position.y, position.z],
            color,
        }
    }
}

/// Gizmo colors
pub mod colors {
    pub const FOOTPRINT: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    pub const FOOTPRINT_RAY: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const NEAR_FACE: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
}

/// Segments used for every wire circle
pub const CIRCLE_SEGMENTS: u32 = 48;

/// A single line segment
pub fn line(a: Vec3, b: Vec3, color: [f32; 4]) -> [GizmoVertex; 2] {
    [GizmoVertex::new(a, color), GizmoVertex::new(b, color)]
}

/// Wire circle in the xy plane at `center.z`
pub fn wire_circle(center: Vec3, radius: f32, color: [f32; 4], segments: u32) -> Vec<GizmoVertex> {
    let mut vertices = Vec::with_capacity((segments * 2) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let p1 = center + Vec3::new(radius * theta1.cos(), radius * theta1.sin(), 0.0);
        let p2 = center + Vec3::new(radius * theta2.cos(), radius * theta2.sin(), 0.0);
        vertices.extend(line(p1, p2, color));
    }

    vertices
}

/// Footprint circle on the wall plus the rays to its upper-left and
/// upper-right rim points
pub fn footprint(light: &LightState) -> Vec<GizmoVertex> {
    let wall_pos = light.axis_point(light.wall_distance);
    let radius = light.wall_footprint_radius(light.wall_distance);

    let mut vertices = wire_circle(wall_pos, radius, colors::FOOTPRINT, CIRCLE_SEGMENTS);
    for dir in [Vec2::new(-1.0, 1.0), Vec2::new(1.0, 1.0)] {
        let rim = wall_pos + (dir.normalize() * radius).extend(0.0);
        vertices.extend(line(wall_pos, rim, colors::FOOTPRINT_RAY));
    }
    vertices
}

/// Cone cross-section at the near face of every tracked occluder in front of
/// the light
pub fn near_faces(world: &ShadowWorld) -> Vec<GizmoVertex> {
    let light = world.light();
    let mut vertices = Vec::new();

    for id in world.tracker().iter() {
        if matches!(world.rig().role(id), ShadowRole::Player | ShadowRole::Inert) {
            continue;
        }
        let Some(obj) = world.scene.get(id) else {
            continue;
        };
        if obj.position.z <= light.position.z {
            continue;
        }
        let near_z = obj.bounds().min().z;
        vertices.extend(wire_circle(
            light.axis_point(near_z),
            light.wall_footprint_radius(near_z),
            colors::NEAR_FACE,
            CIRCLE_SEGMENTS,
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light() -> LightState {
        LightState {
            position: Vec3::new(1.0, 2.0, 0.0),
            spot_angle: 30.0,
            wall_distance: 5.0,
            max_distance: 9.0,
            radius_scaling_factor: 1.0,
        }
    }

    #[test]
    fn test_wire_circle_on_radius() {
        let center = Vec3::new(1.0, 2.0, 5.0);
        let vertices = wire_circle(center, 1.5, colors::FOOTPRINT, 16);
        assert_eq!(vertices.len(), 32);
        for v in &vertices {
            let p = Vec3::from_array(v.position);
            assert!((p.truncate().distance(center.truncate()) - 1.5).abs() < 1e-5);
            assert_eq!(p.z, 5.0);
        }
    }

    #[test]
    fn test_footprint_rays_end_on_rim() {
        let light = light();
        let vertices = footprint(&light);
        let radius = light.wall_footprint_radius(5.0);
        assert_eq!(vertices.len(), (CIRCLE_SEGMENTS * 2 + 4) as usize);

        let rays = &vertices[vertices.len() - 4..];
        for pair in rays.chunks(2) {
            let start = Vec3::from_array(pair[0].position);
            let end = Vec3::from_array(pair[1].position);
            assert_eq!(start, Vec3::new(1.0, 2.0, 5.0));
            assert!((start.distance(end) - radius).abs() < 1e-5);
            assert!(end.y > start.y);
            assert_eq!(pair[0].color, colors::FOOTPRINT_RAY);
        }
    }

    #[test]
    fn test_vertices_are_plain_bytes() {
        let vertices = footprint(&light());
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), vertices.len() * std::mem::size_of::<GizmoVertex>());
        assert_eq!(std::mem::size_of::<GizmoVertex>(), 28);
    }
}
