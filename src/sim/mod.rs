//! Simulation core
//!
//! All gameplay logic lives here. This module must stay pure and headless:
//! - Frame-delta driven, no clocks of its own
//! - Injected RNG only
//! - No rendering, audio, or platform dependencies

pub mod geometry;
pub mod obstacle;
pub mod pickup;
pub mod ship;
pub mod simulation;
pub mod spawn;

pub use geometry::{
    Circle, Collider, Rect, circle_rect_overlap, circles_overlap, collides_with_rect,
    rects_overlap,
};
pub use obstacle::Obstacle;
pub use pickup::Pickup;
pub use ship::Ship;
pub use simulation::{
    EntityIds, FrameInput, GameEvent, GamePhase, Simulation, MAX_FRAME_DT,
    level_speed_multiplier,
};
pub use spawn::{GameRng, ObstacleSpawner, PickupSpawner, RandomSource, ScriptedSource};
