//! Player ship
//!
//! The ship is pinned to a fixed x column and steers vertically. Movement is
//! accelerate-toward-target with a faster decelerate-to-rest, a soft bounce
//! off the vertical margins, and a timed invincibility window after damage.

use glam::Vec2;

use super::geometry::Rect;
use super::simulation::FrameInput;
use crate::config::{FieldConfig, ShipConfig};

/// Velocity damping applied when the ship bounces off a margin
const BOUNCE_DAMPING: f32 = 0.3;

#[derive(Debug, Clone)]
pub struct Ship {
    pub pos: Vec2,
    /// Vertical velocity (px/s, positive is downward)
    pub vel_y: f32,
    pub lives: u32,
    invincibility_timer: f32,
    cfg: ShipConfig,
    margin: f32,
    field_height: f32,
}

impl Ship {
    /// Create a ship at the given column, vertically centered, full lives.
    pub fn new(x: f32, cfg: ShipConfig, field: &FieldConfig) -> Self {
        Self {
            pos: Vec2::new(x, field.height / 2.0),
            vel_y: 0.0,
            lives: cfg.max_lives,
            invincibility_timer: 0.0,
            cfg,
            margin: field.margin,
            field_height: field.height,
        }
    }

    pub fn max_lives(&self) -> u32 {
        self.cfg.max_lives
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility_timer > 0.0
    }

    /// Advance movement and the invincibility timer by one frame.
    ///
    /// Both inputs set cancel to no net input, so the ship decelerates.
    pub fn update(&mut self, dt: f32, input: &FrameInput) {
        let direction = match (input.move_up, input.move_down) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };

        if direction != 0.0 {
            let target = direction * self.cfg.max_speed;
            let step = self.cfg.accel * dt;
            if self.vel_y < target {
                self.vel_y = (self.vel_y + step).min(target);
            } else {
                self.vel_y = (self.vel_y - step).max(target);
            }
        } else if self.vel_y != 0.0 {
            // Decelerate toward rest, snapping to zero at the sign crossing
            let step = self.cfg.decel * dt;
            if self.vel_y > 0.0 {
                self.vel_y = (self.vel_y - step).max(0.0);
            } else {
                self.vel_y = (self.vel_y + step).min(0.0);
            }
        }

        self.pos.y += self.vel_y * dt;

        // Soft bounce: clamp to the margin and reflect a damped velocity
        let top = self.margin;
        let bottom = self.field_height - self.margin;
        if self.pos.y < top {
            self.pos.y = top;
            self.vel_y = -self.vel_y * BOUNCE_DAMPING;
        } else if self.pos.y > bottom {
            self.pos.y = bottom;
            self.vel_y = -self.vel_y * BOUNCE_DAMPING;
        }

        if self.invincibility_timer > 0.0 {
            self.invincibility_timer = (self.invincibility_timer - dt).max(0.0);
        }
    }

    /// Apply damage. Returns whether a life was actually lost.
    ///
    /// Invincible or already-dead ships take no damage. A successful hit
    /// opens the invincibility window and knocks the ship back against its
    /// current travel; a resting ship takes no impulse.
    pub fn hit(&mut self) -> bool {
        if self.is_invincible() || self.lives == 0 {
            return false;
        }
        self.lives -= 1;
        self.invincibility_timer = self.cfg.invincibility_duration;
        if self.vel_y != 0.0 {
            self.vel_y = -self.vel_y.signum() * self.cfg.knockback_speed;
        }
        true
    }

    /// Shrunk collision hitbox centered on the current position.
    pub fn bounds(&self) -> Rect {
        Rect::centered(
            self.pos,
            self.cfg.width * self.cfg.hitbox_scale,
            self.cfg.height * self.cfg.hitbox_scale,
        )
    }

    /// Restore full lives, clear motion and invincibility, recenter.
    pub fn reset(&mut self) {
        self.lives = self.cfg.max_lives;
        self.vel_y = 0.0;
        self.invincibility_timer = 0.0;
        self.pos.y = self.field_height / 2.0;
    }
}
