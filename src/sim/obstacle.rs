//! Asteroid entity
//!
//! Asteroids drift leftward at a fixed scalar speed and deactivate once they
//! are well past the left edge. Collision models them as circles shrunk below
//! the visual size. Rotation and other cosmetics live outside the core, keyed
//! by the entity id.

use glam::Vec2;

use super::geometry::{Circle, Collider, Rect};

#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    /// Visual radius; collision uses this scaled by `hitbox_scale`
    pub size: f32,
    /// Leftward speed before the level multiplier (px/s)
    pub speed: f32,
    pub active: bool,
    hitbox_scale: f32,
}

impl Obstacle {
    pub fn new(id: u32, pos: Vec2, size: f32, speed: f32, hitbox_scale: f32) -> Self {
        Self {
            id,
            pos,
            size,
            speed,
            active: true,
            hitbox_scale,
        }
    }

    /// Drift leftward; deactivate once fully off the left edge.
    pub fn update(&mut self, dt: f32, speed_multiplier: f32) {
        if !self.active {
            return;
        }
        self.pos.x -= self.speed * speed_multiplier * dt;
        if self.pos.x < -2.0 * self.size {
            self.active = false;
        }
    }

    fn collision_circle(&self) -> Circle {
        Circle::new(self.pos, self.size * self.hitbox_scale)
    }
}

impl Collider for Obstacle {
    fn bounding_box(&self) -> Rect {
        self.collision_circle().bounding_rect()
    }

    fn bounding_circle(&self) -> Option<Circle> {
        Some(self.collision_circle())
    }
}
