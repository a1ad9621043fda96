//! Coin entity
//!
//! Coins scroll leftward until collected or missed. Collection is one-shot:
//! the points are credited exactly once, then the coin freezes in place and
//! plays a short collection animation before going inactive. A missed coin
//! deactivates once fully off the left edge.

use glam::Vec2;

use super::geometry::{Circle, Collider, Rect};

#[derive(Debug, Clone)]
pub struct Pickup {
    pub id: u32,
    pub pos: Vec2,
    /// Sprite size; the collision box is this scaled by `hitbox_scale`
    pub size: f32,
    /// Leftward speed before the level multiplier (px/s)
    pub speed: f32,
    pub points: u64,
    pub active: bool,
    pub collected: bool,
    /// Collection animation progress in [0, 1], meaningful once collected
    pub collect_progress: f32,
    collect_duration: f32,
    hitbox_scale: f32,
}

impl Pickup {
    pub fn new(
        id: u32,
        pos: Vec2,
        size: f32,
        speed: f32,
        points: u64,
        collect_duration: f32,
        hitbox_scale: f32,
    ) -> Self {
        Self {
            id,
            pos,
            size,
            speed,
            points,
            active: true,
            collected: false,
            collect_progress: 0.0,
            collect_duration,
            hitbox_scale,
        }
    }

    /// Scroll, or advance the collection animation once collected.
    ///
    /// A collected coin stops moving; only its animation timer can retire it.
    pub fn update(&mut self, dt: f32, speed_multiplier: f32) {
        if !self.active {
            return;
        }
        if self.collected {
            self.collect_progress += dt / self.collect_duration;
            if self.collect_progress >= 1.0 {
                self.collect_progress = 1.0;
                self.active = false;
            }
            return;
        }
        self.pos.x -= self.speed * speed_multiplier * dt;
        if self.pos.x < -2.0 * self.size {
            self.active = false;
        }
    }

    /// Credit the coin. Returns its point value the first time, 0 afterwards.
    pub fn collect(&mut self) -> u64 {
        if self.collected || !self.active {
            return 0;
        }
        self.collected = true;
        self.collect_progress = 0.0;
        self.points
    }
}

impl Collider for Pickup {
    fn bounding_box(&self) -> Rect {
        let side = self.size * self.hitbox_scale;
        Rect::centered(self.pos, side, side)
    }

    fn bounding_circle(&self) -> Option<Circle> {
        None
    }
}
