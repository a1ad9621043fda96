//! Astro Dodge - a side-scrolling space dodger, simulation only
//!
//! Core modules:
//! - `sim`: the headless game core (entities, spawners, collisions, loop)
//! - `config`: numeric tuning, validated at construction
//!
//! Rendering, audio, UI, and high-score persistence are host concerns. The
//! host drives [`sim::Simulation::update`] once per frame, reads the query
//! surface for its HUD, and drains [`sim::GameEvent`]s for its observers.

pub mod config;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use sim::{FrameInput, GameEvent, GamePhase, Simulation};
