//! Game tuning configuration
//!
//! All numeric tuning lives here, supplied once at `Simulation` construction
//! and never mutated at runtime. Defaults carry the shipped balance; a host
//! can load overrides from JSON (see the demo binary).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid tuning detected at construction time.
///
/// Configuration problems are rejected before a simulation exists; per-frame
/// update logic never has to re-check them.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be positive, got {1}")]
    NonPositive(&'static str, f32),

    #[error("{0} must not be negative, got {1}")]
    Negative(&'static str, f32),

    #[error("obstacle size range is inverted: min {min} > max {max}")]
    InvertedSizeRange { min: f32, max: f32 },

    #[error("{0} hitbox scale must be in (0, 1], got {1}")]
    HitboxScale(&'static str, f32),

    #[error("{0} interval floor must be in (0, 1], got {1}")]
    IntervalFloor(&'static str, f32),

    #[error("ship must start with at least one life")]
    ZeroLives,

    #[error("field margin {margin} leaves no vertical play band in height {height}")]
    MarginTooLarge { margin: f32, height: f32 },
}

/// Play field dimensions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FieldConfig {
    pub width: f32,
    pub height: f32,
    /// Distance from the top/bottom edges the ship (and spawn band) must keep
    pub margin: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            margin: 40.0,
        }
    }
}

/// Player ship tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShipConfig {
    /// Visual sprite size; the hitbox is this scaled by `hitbox_scale`
    pub width: f32,
    pub height: f32,
    /// Vertical acceleration while an input is held (px/s²)
    pub accel: f32,
    /// Deceleration toward zero with no input (px/s²), faster than accel
    pub decel: f32,
    /// Maximum vertical speed (px/s)
    pub max_speed: f32,
    pub max_lives: u32,
    /// Seconds of immunity after taking a hit
    pub invincibility_duration: f32,
    /// Speed of the velocity impulse applied on a hit (px/s)
    pub knockback_speed: f32,
    /// Hitbox shrink factor relative to sprite size (fairness policy)
    pub hitbox_scale: f32,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            width: 60.0,
            height: 40.0,
            accel: 1200.0,
            decel: 1800.0,
            max_speed: 400.0,
            max_lives: 3,
            invincibility_duration: 2.0,
            knockback_speed: 150.0,
            hitbox_scale: 0.7,
        }
    }
}

/// Asteroid tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ObstacleConfig {
    /// Leftward speed at level 1 (px/s)
    pub base_speed: f32,
    /// Speed added per level above 1 (px/s)
    pub speed_per_level: f32,
    /// Seconds between spawns at level 1
    pub base_interval: f32,
    /// Fractional interval reduction per level above 1
    pub interval_per_level: f32,
    /// Lower bound on the interval scale; obstacles bottom out at 0.4
    pub interval_floor: f32,
    /// Radius range, drawn uniformly per spawn
    pub min_size: f32,
    pub max_size: f32,
    /// Collision radius shrink factor relative to visual size
    pub hitbox_scale: f32,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            base_speed: 150.0,
            speed_per_level: 20.0,
            base_interval: 1.5,
            interval_per_level: 0.08,
            interval_floor: 0.4,
            min_size: 15.0,
            max_size: 40.0,
            hitbox_scale: 0.75,
        }
    }
}

/// Coin tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PickupConfig {
    pub base_speed: f32,
    pub speed_per_level: f32,
    pub base_interval: f32,
    /// Smaller than the obstacle rate: coins scale slower than rocks
    pub interval_per_level: f32,
    /// Coins bottom out at 0.5
    pub interval_floor: f32,
    /// Fixed sprite size (coins do not vary)
    pub size: f32,
    /// Score credited on collection
    pub points: u64,
    /// Seconds the collection animation runs before the coin goes inactive
    pub collect_duration: f32,
    pub hitbox_scale: f32,
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self {
            base_speed: 130.0,
            speed_per_level: 15.0,
            base_interval: 2.5,
            interval_per_level: 0.05,
            interval_floor: 0.5,
            size: 24.0,
            points: 10,
            collect_duration: 0.4,
            hitbox_scale: 0.75,
        }
    }
}

/// Complete game tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field: FieldConfig,
    pub ship: ShipConfig,
    pub obstacles: ObstacleConfig,
    pub pickups: PickupConfig,
    /// Seconds per difficulty level
    pub level_duration: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            ship: ShipConfig::default(),
            obstacles: ObstacleConfig::default(),
            pickups: PickupConfig::default(),
            level_duration: 20.0,
        }
    }
}

impl GameConfig {
    /// Reject degenerate tuning before a simulation is built from it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        use ConfigError::*;

        let positives: [(&'static str, f32); 13] = [
            ("field.width", self.field.width),
            ("field.height", self.field.height),
            ("field.margin", self.field.margin),
            ("ship.width", self.ship.width),
            ("ship.height", self.ship.height),
            ("ship.accel", self.ship.accel),
            ("ship.decel", self.ship.decel),
            ("ship.max_speed", self.ship.max_speed),
            ("ship.invincibility_duration", self.ship.invincibility_duration),
            ("obstacles.base_speed", self.obstacles.base_speed),
            ("obstacles.base_interval", self.obstacles.base_interval),
            ("pickups.base_speed", self.pickups.base_speed),
            ("pickups.base_interval", self.pickups.base_interval),
        ];
        for (name, value) in positives {
            if !(value > 0.0) {
                return Err(NonPositive(name, value));
            }
        }
        if !(self.pickups.size > 0.0) {
            return Err(NonPositive("pickups.size", self.pickups.size));
        }
        if !(self.pickups.collect_duration > 0.0) {
            return Err(NonPositive(
                "pickups.collect_duration",
                self.pickups.collect_duration,
            ));
        }
        if !(self.level_duration > 0.0) {
            return Err(NonPositive("level_duration", self.level_duration));
        }
        if !(self.obstacles.min_size > 0.0) {
            return Err(NonPositive("obstacles.min_size", self.obstacles.min_size));
        }
        if self.obstacles.min_size > self.obstacles.max_size {
            return Err(InvertedSizeRange {
                min: self.obstacles.min_size,
                max: self.obstacles.max_size,
            });
        }
        let non_negatives = [
            ("ship.knockback_speed", self.ship.knockback_speed),
            ("obstacles.speed_per_level", self.obstacles.speed_per_level),
            ("obstacles.interval_per_level", self.obstacles.interval_per_level),
            ("pickups.speed_per_level", self.pickups.speed_per_level),
            ("pickups.interval_per_level", self.pickups.interval_per_level),
        ];
        for (name, value) in non_negatives {
            if !(value >= 0.0) {
                return Err(Negative(name, value));
            }
        }
        if self.ship.max_lives == 0 {
            return Err(ZeroLives);
        }
        for (name, scale) in [
            ("ship", self.ship.hitbox_scale),
            ("obstacles", self.obstacles.hitbox_scale),
            ("pickups", self.pickups.hitbox_scale),
        ] {
            if !(scale > 0.0 && scale <= 1.0) {
                return Err(HitboxScale(name, scale));
            }
        }
        for (name, floor) in [
            ("obstacles", self.obstacles.interval_floor),
            ("pickups", self.pickups.interval_floor),
        ] {
            if !(floor > 0.0 && floor <= 1.0) {
                return Err(IntervalFloor(name, floor));
            }
        }
        if self.field.margin * 2.0 >= self.field.height {
            return Err(MarginTooLarge {
                margin: self.field.margin,
                height: self.field.height,
            });
        }
        Ok(())
    }
}
