//! Shape generation for 2D primitives
//!
//! All shapes are built in world pixels (y down); the pipeline maps them to
//! clip space.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::sim::{Rect, Snapshot};

/// Hat drawn on top of the actor
const HAT_HEIGHT: f32 = 10.0;
const HAT_OVERLAP: f32 = 2.0;

const CLOUD_Y: f32 = 70.0;
const CLOUD_COUNT: usize = 3;
const CLOUD_SPACING: f32 = 220.0;
/// Cloud drift in px per millisecond
const CLOUD_DRIFT: f32 = 0.03;

/// Shadow under a jumping actor; shrinks with height above the ground
const SHADOW_HEIGHT: f32 = 4.0;
const SHADOW_MIN_SCALE: f32 = 0.3;

/// Generate vertices for a filled rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (l, t, rt, b) = (r.left(), r.top(), r.right(), r.bottom());
    vec![
        Vertex::new(l, t, color),
        Vertex::new(rt, t, color),
        Vertex::new(l, b, color),
        Vertex::new(l, b, color),
        Vertex::new(rt, t, color),
        Vertex::new(rt, b, color),
    ]
}

/// Generate vertices for a filled ellipse
pub fn ellipse(center: Vec2, radii: Vec2, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radii.x * theta1.cos(),
            center.y + radii.y * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radii.x * theta2.cos(),
            center.y + radii.y * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Horizontal position of cloud `index` at `time_ms`, wrapping past the right edge
pub fn cloud_x(index: usize, time_ms: f64, world_width: f32) -> f32 {
    let period = f64::from(world_width + 100.0);
    let offset = index as f64 * f64::from(CLOUD_SPACING) + time_ms * f64::from(CLOUD_DRIFT);
    (offset % period) as f32 - 100.0
}

/// Three puffs per cloud
fn cloud(x: f32) -> Vec<Vertex> {
    let mut vertices = ellipse(Vec2::new(x, CLOUD_Y), Vec2::new(40.0, 20.0), colors::CLOUD, 24);
    vertices.extend(ellipse(
        Vec2::new(x + 25.0, CLOUD_Y - 10.0),
        Vec2::new(30.0, 18.0),
        colors::CLOUD,
        20,
    ));
    vertices.extend(ellipse(
        Vec2::new(x - 25.0, CLOUD_Y - 5.0),
        Vec2::new(26.0, 16.0),
        colors::CLOUD,
        20,
    ));
    vertices
}

/// Flattened ellipse on the running surface below an airborne actor
fn shadow(actor: &Rect, surface_y: f32) -> Vec<Vertex> {
    let height = (surface_y - actor.bottom()).max(0.0);
    let scale = (1.0 - height / surface_y.max(1.0)).max(SHADOW_MIN_SCALE);
    ellipse(
        Vec2::new(actor.left() + actor.size.x * 0.5, surface_y),
        Vec2::new(actor.size.x * 0.5 * scale, SHADOW_HEIGHT * scale),
        colors::SHADOW,
        16,
    )
}

/// Build the full frame from a snapshot, back to front.
///
/// The sky is the render pass clear color, so it is not emitted here.
pub fn scene_vertices(snapshot: &Snapshot, time_ms: f64) -> Vec<Vertex> {
    let world = snapshot.world;
    let mut vertices = Vec::with_capacity(64 + snapshot.obstacles.len() * 6);

    for i in 0..CLOUD_COUNT {
        vertices.extend(cloud(cloud_x(i, time_ms, world.x)));
    }

    let ground_h = (world.y - snapshot.surface_y).max(0.0);
    vertices.extend(rect(
        &Rect::new(0.0, snapshot.surface_y, world.x, ground_h),
        colors::GROUND,
    ));

    for obstacle in &snapshot.obstacles {
        vertices.extend(rect(obstacle, colors::OBSTACLE));
    }

    let actor = snapshot.actor;
    if snapshot.actor_airborne {
        vertices.extend(shadow(&actor, snapshot.surface_y));
    }
    vertices.extend(rect(&actor, colors::ACTOR));
    vertices.extend(rect(
        &Rect::new(
            actor.left(),
            actor.top() - HAT_HEIGHT + HAT_OVERLAP,
            actor.size.x,
            HAT_HEIGHT,
        ),
        colors::ACTOR_HAT,
    ));

    if snapshot.game_over {
        vertices.extend(rect(&Rect::new(0.0, 0.0, world.x, world.y), colors::OVERLAY));
    }

    vertices
}
