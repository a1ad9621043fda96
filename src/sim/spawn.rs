//! Entity spawners and the injectable randomness seam
//!
//! Each spawner is an interval timer whose period shrinks with the level.
//! Spawners own no entities: a firing timer returns the freshly built entity
//! to the simulation, which appends it to its live collection. All randomness
//! flows through [`RandomSource`] so tests can script exact spawn parameters.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::obstacle::Obstacle;
use super::pickup::Pickup;
use super::simulation::EntityIds;
use crate::config::{FieldConfig, ObstacleConfig, PickupConfig};

/// Source of uniform random units in [0, 1).
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;
}

/// Default random source: a seeded PCG stream.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: Pcg32,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl RandomSource for GameRng {
    fn next_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Scripted random source: replays a fixed sequence, cycling at the end.
///
/// Lets a test (or demo) pin spawn heights and sizes to exact values.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<f32>,
    index: usize,
}

impl ScriptedSource {
    pub fn new(values: Vec<f32>) -> Self {
        assert!(!values.is_empty(), "scripted source needs at least one value");
        Self { values, index: 0 }
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f32 {
        let v = self.values[self.index % self.values.len()];
        self.index += 1;
        v
    }
}

/// Interval scale for a given level: shrinks linearly, bounded by the floor.
fn interval_scale(level: u32, per_level_rate: f32, floor: f32) -> f32 {
    (1.0 - (level.saturating_sub(1)) as f32 * per_level_rate).max(floor)
}

/// Uniform draw from [min, max) using one random unit.
fn uniform_in(rng: &mut dyn RandomSource, min: f32, max: f32) -> f32 {
    min + rng.next_unit() * (max - min)
}

/// Asteroid spawner.
#[derive(Debug, Clone)]
pub struct ObstacleSpawner {
    timer: f32,
    cfg: ObstacleConfig,
    field: FieldConfig,
}

impl ObstacleSpawner {
    pub fn new(cfg: ObstacleConfig, field: FieldConfig) -> Self {
        Self {
            timer: 0.0,
            cfg,
            field,
        }
    }

    /// Spawn interval at the given level, in seconds.
    pub fn adjusted_interval(&self, level: u32) -> f32 {
        self.cfg.base_interval
            * interval_scale(level, self.cfg.interval_per_level, self.cfg.interval_floor)
    }

    /// Advance the timer; at most one asteroid per call.
    ///
    /// If several intervals elapsed in one dt only one entity is produced and
    /// the timer restarts from zero.
    pub fn update(
        &mut self,
        dt: f32,
        level: u32,
        ids: &mut EntityIds,
        rng: &mut dyn RandomSource,
    ) -> Option<Obstacle> {
        self.timer += dt;
        if self.timer < self.adjusted_interval(level) {
            return None;
        }
        self.timer = 0.0;

        let y = uniform_in(rng, self.field.margin, self.field.height - self.field.margin);
        let size = uniform_in(rng, self.cfg.min_size, self.cfg.max_size);
        let speed =
            self.cfg.base_speed + level.saturating_sub(1) as f32 * self.cfg.speed_per_level;
        Some(Obstacle::new(
            ids.next(),
            Vec2::new(self.field.width + size, y),
            size,
            speed,
            self.cfg.hitbox_scale,
        ))
    }

    pub fn reset(&mut self) {
        self.timer = 0.0;
    }
}

/// Coin spawner.
#[derive(Debug, Clone)]
pub struct PickupSpawner {
    timer: f32,
    cfg: PickupConfig,
    field: FieldConfig,
}

impl PickupSpawner {
    pub fn new(cfg: PickupConfig, field: FieldConfig) -> Self {
        Self {
            timer: 0.0,
            cfg,
            field,
        }
    }

    pub fn adjusted_interval(&self, level: u32) -> f32 {
        self.cfg.base_interval
            * interval_scale(level, self.cfg.interval_per_level, self.cfg.interval_floor)
    }

    /// Advance the timer; at most one coin per call.
    pub fn update(
        &mut self,
        dt: f32,
        level: u32,
        ids: &mut EntityIds,
        rng: &mut dyn RandomSource,
    ) -> Option<Pickup> {
        self.timer += dt;
        if self.timer < self.adjusted_interval(level) {
            return None;
        }
        self.timer = 0.0;

        let y = uniform_in(rng, self.field.margin, self.field.height - self.field.margin);
        let speed =
            self.cfg.base_speed + level.saturating_sub(1) as f32 * self.cfg.speed_per_level;
        Some(Pickup::new(
            ids.next(),
            Vec2::new(self.field.width + self.cfg.size, y),
            self.cfg.size,
            speed,
            self.cfg.points,
            self.cfg.collect_duration,
            self.cfg.hitbox_scale,
        ))
    }

    pub fn reset(&mut self) {
        self.timer = 0.0;
    }
}
