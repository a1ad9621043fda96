//! Frame-driven simulation and game-state machine
//!
//! One `Simulation` owns the whole world for a session: ship, live entity
//! collections, spawners, level counters, RNG, and the pending event queue.
//! The host calls `update` once per frame while `Playing`; everything else
//! (pause, restart) goes through the explicit transition methods.
//!
//! Within a frame the order is load-bearing: level timer, ship, spawns,
//! entity movement, collisions, pruning, terminal check. A just-spawned
//! off-screen entity can never collide in its spawn frame, and a pruned
//! entity can never be hit.

use super::geometry::collides_with_rect;
use super::obstacle::Obstacle;
use super::pickup::Pickup;
use super::ship::Ship;
use super::spawn::{GameRng, ObstacleSpawner, PickupSpawner, RandomSource};
use crate::config::{ConfigError, GameConfig};

/// Upper bound on a frame delta. A stalled host (backgrounded tab, debugger)
/// loses simulated time instead of producing a position jump.
pub const MAX_FRAME_DT: f32 = 0.1;

/// Linear speed gain per level above 1, shared by obstacles and pickups.
/// Spawn-rate scaling is per-spawner and not uniform; speed scaling is.
pub const SPEED_GAIN_PER_LEVEL: f32 = 0.1;

/// Horizontal ship column as a fraction of field width.
const SHIP_X_FRACTION: f32 = 0.15;

/// Global speed multiplier for the given level.
#[inline]
pub fn level_speed_multiplier(level: u32) -> f32 {
    1.0 + level.saturating_sub(1) as f32 * SPEED_GAIN_PER_LEVEL
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the first `start()`
    Start,
    /// Active gameplay
    Playing,
    /// Frozen; the host may keep rendering the last frame
    Paused,
    /// Run ended; terminal until `start()` restarts
    GameOver,
}

/// Input intents for a single frame.
///
/// Any input source may set these each frame. Both set means no net input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub move_up: bool,
    pub move_down: bool,
}

/// Notifications queued during `update` for the host's observers
/// (HUD, audio, persistence). Drained with [`Simulation::drain_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    LevelUp { level: u32 },
    ShipHit { lives_remaining: u32 },
    CoinCollected { points: u64, total_score: u64 },
    GameOver { final_score: u64, final_level: u32 },
}

/// Monotonic entity-id allocator, owned by the simulation.
///
/// Ids survive restarts so a presentation layer never sees one reused.
#[derive(Debug, Clone)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    pub fn next(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// One game session.
pub struct Simulation {
    config: GameConfig,
    phase: GamePhase,
    ship: Ship,
    obstacles: Vec<Obstacle>,
    pickups: Vec<Pickup>,
    obstacle_spawner: ObstacleSpawner,
    pickup_spawner: PickupSpawner,
    rng: Box<dyn RandomSource>,
    ids: EntityIds,
    score: u64,
    level: u32,
    level_time: f32,
    events: Vec<GameEvent>,
}

impl Simulation {
    /// Build a simulation with the default seeded RNG.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_random_source(config, Box::new(GameRng::new(seed)))
    }

    /// Build a simulation with an injected random source.
    pub fn with_random_source(
        config: GameConfig,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let ship = Ship::new(config.field.width * SHIP_X_FRACTION, config.ship, &config.field);
        Ok(Self {
            phase: GamePhase::Start,
            ship,
            obstacles: Vec::new(),
            pickups: Vec::new(),
            obstacle_spawner: ObstacleSpawner::new(config.obstacles, config.field),
            pickup_spawner: PickupSpawner::new(config.pickups, config.field),
            rng,
            ids: EntityIds::default(),
            score: 0,
            level: 1,
            level_time: 0.0,
            events: Vec::new(),
            config,
        })
    }

    // --- phase transitions ---

    /// Enter `Playing` from `Start` or `GameOver` with a freshly reset world.
    /// No-op in any other phase.
    pub fn start(&mut self) {
        match self.phase {
            GamePhase::Start | GamePhase::GameOver => {
                self.reset_world();
                self.phase = GamePhase::Playing;
                log::info!("Game started");
            }
            _ => {}
        }
    }

    /// Freeze the simulation. No-op outside `Playing`.
    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
            log::debug!("Paused");
        }
    }

    /// Unfreeze. No-op outside `Paused`. The host must reset its clock basis
    /// so paused wall time never arrives as a frame delta; the dt clamp
    /// bounds the damage if it does anyway.
    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
            log::debug!("Resumed");
        }
    }

    fn reset_world(&mut self) {
        self.ship.reset();
        self.obstacles.clear();
        self.pickups.clear();
        self.obstacle_spawner.reset();
        self.pickup_spawner.reset();
        self.score = 0;
        self.level = 1;
        self.level_time = 0.0;
        self.events.clear();
    }

    // --- per-frame update ---

    /// Advance the world by one frame. No-op outside `Playing`.
    ///
    /// Degenerate deltas (NaN, infinite, non-positive) drop the frame;
    /// oversized deltas are clamped to [`MAX_FRAME_DT`].
    pub fn update(&mut self, input: &FrameInput, dt: f32) {
        if self.phase != GamePhase::Playing {
            return;
        }
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let dt = dt.min(MAX_FRAME_DT);

        // 1. Difficulty clock
        self.level_time += dt;
        if self.level_time >= self.config.level_duration {
            self.level += 1;
            self.level_time = 0.0;
            log::info!("Level up: {}", self.level);
            self.events.push(GameEvent::LevelUp { level: self.level });
        }

        // 2. Ship movement
        self.ship.update(dt, input);

        // 3. Spawns (appended before movement so new entities share the frame)
        if let Some(rock) =
            self.obstacle_spawner
                .update(dt, self.level, &mut self.ids, self.rng.as_mut())
        {
            log::trace!(
                "Spawned obstacle {} (y={:.1}, size={:.1}, speed={:.1})",
                rock.id,
                rock.pos.y,
                rock.size,
                rock.speed
            );
            self.obstacles.push(rock);
        }
        if let Some(coin) =
            self.pickup_spawner
                .update(dt, self.level, &mut self.ids, self.rng.as_mut())
        {
            log::trace!("Spawned pickup {} (y={:.1})", coin.id, coin.pos.y);
            self.pickups.push(coin);
        }

        // 4. Entity movement
        let multiplier = level_speed_multiplier(self.level);
        for rock in &mut self.obstacles {
            rock.update(dt, multiplier);
        }
        for coin in &mut self.pickups {
            coin.update(dt, multiplier);
        }

        // 5. Collisions
        let ship_box = self.ship.bounds();
        for rock in &self.obstacles {
            if !rock.active {
                continue;
            }
            // At most one life lost per frame: stop at the first landed hit
            if collides_with_rect(rock, &ship_box) && self.ship.hit() {
                log::info!("Ship hit by obstacle {}, {} lives left", rock.id, self.ship.lives);
                self.events.push(GameEvent::ShipHit {
                    lives_remaining: self.ship.lives,
                });
                break;
            }
        }
        for coin in &mut self.pickups {
            if !coin.active || coin.collected {
                continue;
            }
            // No break here: every overlapping coin collects this frame
            if collides_with_rect(coin, &ship_box) {
                let points = coin.collect();
                self.score += points;
                log::debug!("Collected coin {} (+{}, total {})", coin.id, points, self.score);
                self.events.push(GameEvent::CoinCollected {
                    points,
                    total_score: self.score,
                });
            }
        }

        // 6. Prune
        self.obstacles.retain(|rock| rock.active);
        self.pickups.retain(|coin| coin.active);

        // 7. Terminal check
        if self.ship.lives == 0 {
            self.phase = GamePhase::GameOver;
            log::info!("Game over: score {}, level {}", self.score, self.level);
            self.events.push(GameEvent::GameOver {
                final_score: self.score,
                final_level: self.level,
            });
        }
    }

    /// Take all events queued since the last drain, in occurrence order.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // --- queries for the host/HUD ---

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lives(&self) -> u32 {
        self.ship.lives
    }

    pub fn max_lives(&self) -> u32 {
        self.ship.max_lives()
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::ScriptedSource;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn sim() -> Simulation {
        Simulation::new(GameConfig::default(), 12345).unwrap()
    }

    /// A zero-speed rock parked on the ship's position.
    fn rock_on_ship(sim: &Simulation, id: u32) -> Obstacle {
        Obstacle::new(id, sim.ship().pos, 30.0, 0.0, 0.75)
    }

    fn coin_on_ship(sim: &Simulation, id: u32) -> Pickup {
        Pickup::new(id, sim.ship().pos, 24.0, 0.0, 10, 0.4, 0.75)
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut cfg = GameConfig::default();
        cfg.level_duration = -1.0;
        assert!(Simulation::new(cfg, 1).is_err());
    }

    #[test]
    fn test_phase_transitions() {
        let mut sim = sim();
        assert_eq!(sim.phase(), GamePhase::Start);

        // update is a no-op before start
        sim.update(&FrameInput::default(), DT);
        assert_eq!(sim.phase(), GamePhase::Start);

        sim.start();
        assert_eq!(sim.phase(), GamePhase::Playing);

        sim.pause();
        assert_eq!(sim.phase(), GamePhase::Paused);
        // pause again / start while paused: no-ops
        sim.pause();
        sim.start();
        assert_eq!(sim.phase(), GamePhase::Paused);

        sim.resume();
        assert_eq!(sim.phase(), GamePhase::Playing);
        // resume while playing: no-op
        sim.resume();
        assert_eq!(sim.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_paused_world_is_frozen() {
        let mut sim = sim();
        sim.start();
        sim.obstacles.push(Obstacle::new(99, Vec2::new(700.0, 300.0), 20.0, 100.0, 0.75));
        sim.pause();
        sim.update(&FrameInput::default(), DT);
        assert_eq!(sim.obstacles()[0].pos.x, 700.0);
    }

    #[test]
    fn test_degenerate_dt_drops_frame() {
        let mut sim = sim();
        sim.start();
        sim.obstacles.push(Obstacle::new(99, Vec2::new(700.0, 300.0), 20.0, 100.0, 0.75));
        for bad in [0.0, -0.5, f32::NAN, f32::INFINITY] {
            sim.update(&FrameInput::default(), bad);
        }
        assert_eq!(sim.obstacles()[0].pos.x, 700.0);
        assert_eq!(sim.level(), 1);
    }

    #[test]
    fn test_oversized_dt_is_clamped() {
        let mut sim = sim();
        sim.start();
        // 5 simulated seconds in one frame would fire the obstacle spawner
        // (interval 1.5s); the 0.1s clamp keeps it silent.
        sim.update(&FrameInput::default(), 5.0);
        assert!(sim.obstacles().is_empty());
    }

    #[test]
    fn test_level_up_fires_at_duration() {
        let mut sim = sim();
        sim.start();
        let frames = (sim.config().level_duration / DT).ceil() as u32 + 1;
        for _ in 0..frames {
            sim.update(&FrameInput::default(), DT);
        }
        assert_eq!(sim.level(), 2);
        assert!(
            sim.drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::LevelUp { level: 2 }))
        );
    }

    #[test]
    fn test_one_hit_per_frame() {
        let mut sim = sim();
        sim.start();
        // Two rocks dead on the ship: only one life lost this frame
        let a = rock_on_ship(&sim, 100);
        let b = rock_on_ship(&sim, 101);
        sim.obstacles.push(a);
        sim.obstacles.push(b);

        sim.update(&FrameInput::default(), DT);
        assert_eq!(sim.lives(), sim.max_lives() - 1);
        let hits = sim
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::ShipHit { .. }))
            .count();
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_invincible_ship_takes_no_second_hit() {
        let mut sim = sim();
        sim.start();
        sim.obstacles.push(rock_on_ship(&sim, 100));
        sim.update(&FrameInput::default(), DT);
        assert_eq!(sim.lives(), sim.max_lives() - 1);

        // The rock is still parked on the ship; the window holds
        sim.update(&FrameInput::default(), DT);
        assert_eq!(sim.lives(), sim.max_lives() - 1);
    }

    #[test]
    fn test_multiple_pickups_collected_same_frame() {
        let mut sim = sim();
        sim.start();
        sim.pickups.push(coin_on_ship(&sim, 200));
        sim.pickups.push(coin_on_ship(&sim, 201));

        sim.update(&FrameInput::default(), DT);
        assert_eq!(sim.score(), 20);
        let collected = sim
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::CoinCollected { .. }))
            .count();
        assert_eq!(collected, 2);
    }

    #[test]
    fn test_collected_coin_animates_then_prunes() {
        let mut sim = sim();
        sim.start();
        sim.pickups.push(coin_on_ship(&sim, 200));
        sim.update(&FrameInput::default(), DT);
        assert_eq!(sim.pickups().len(), 1);
        assert!(sim.pickups()[0].collected);

        // Run past the collection animation; the coin gets pruned and the
        // score is credited exactly once.
        for _ in 0..30 {
            sim.update(&FrameInput::default(), DT);
        }
        assert!(sim.pickups().is_empty());
        assert_eq!(sim.score(), 10);
    }

    #[test]
    fn test_offscreen_entities_pruned() {
        let mut sim = sim();
        sim.start();
        sim.obstacles.push(Obstacle::new(99, Vec2::new(-59.9, 300.0), 30.0, 100.0, 0.75));
        sim.update(&FrameInput::default(), DT);
        assert!(sim.obstacles().is_empty());
    }

    #[test]
    fn test_game_over_fires_exactly_once() {
        let mut sim = sim();
        sim.start();
        sim.ship.lives = 1;
        sim.obstacles.push(rock_on_ship(&sim, 100));

        sim.update(&FrameInput::default(), DT);
        assert_eq!(sim.phase(), GamePhase::GameOver);
        let events = sim.drain_events();
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::GameOver { .. }))
                .count(),
            1
        );

        // Terminal: further updates do nothing and emit nothing
        sim.update(&FrameInput::default(), DT);
        assert_eq!(sim.phase(), GamePhase::GameOver);
        assert!(sim.drain_events().is_empty());
    }

    #[test]
    fn test_restart_resets_world() {
        let mut sim = sim();
        sim.start();
        sim.ship.lives = 1;
        sim.pickups.push(coin_on_ship(&sim, 200));
        sim.obstacles.push(rock_on_ship(&sim, 100));
        sim.update(&FrameInput::default(), DT);
        assert_eq!(sim.phase(), GamePhase::GameOver);

        sim.start();
        assert_eq!(sim.phase(), GamePhase::Playing);
        assert_eq!(sim.score(), 0);
        assert_eq!(sim.level(), 1);
        assert_eq!(sim.lives(), sim.max_lives());
        assert!(sim.obstacles().is_empty());
        assert!(sim.pickups().is_empty());
        assert!(sim.drain_events().is_empty());
    }

    #[test]
    fn test_scripted_spawns_center_band() {
        // Script the RNG so every spawn lands mid-band; the spawner fires
        // through the simulation path and entities join the collections.
        let mut sim = Simulation::with_random_source(
            GameConfig::default(),
            Box::new(ScriptedSource::new(vec![0.5])),
        )
        .unwrap();
        sim.start();
        // 2 seconds: obstacle interval 1.5s elapses, pickup 2.5s does not
        for _ in 0..120 {
            sim.update(&FrameInput::default(), DT);
        }
        assert!(!sim.obstacles().is_empty());
        let field = sim.config().field;
        for rock in sim.obstacles() {
            assert_eq!(rock.pos.y, field.margin + 0.5 * (field.height - 2.0 * field.margin));
        }
    }

    /// Long randomized session: score only moves on collection events, lives
    /// only on hit events, and a 1→0 transition ends the run exactly once.
    #[test]
    fn test_session_invariants() {
        let mut sim = sim();
        sim.start();

        let mut last_score = 0;
        let mut last_lives = sim.lives();
        let mut game_overs = 0;
        let input = FrameInput {
            move_up: false,
            move_down: true,
        };

        for frame in 0..3600 {
            // Wiggle a little so the run is not a straight line
            let input = if frame % 120 < 60 {
                input
            } else {
                FrameInput {
                    move_up: true,
                    move_down: false,
                }
            };
            sim.update(&input, DT);

            let events = sim.drain_events();
            let collected: u64 = events
                .iter()
                .filter_map(|e| match e {
                    GameEvent::CoinCollected { points, .. } => Some(*points),
                    _ => None,
                })
                .sum();
            let hits = events
                .iter()
                .filter(|e| matches!(e, GameEvent::ShipHit { .. }))
                .count() as u32;
            game_overs += events
                .iter()
                .filter(|e| matches!(e, GameEvent::GameOver { .. }))
                .count();

            assert_eq!(sim.score(), last_score + collected);
            assert_eq!(sim.lives(), last_lives - hits);
            last_score = sim.score();
            last_lives = sim.lives();

            if sim.phase() == GamePhase::GameOver {
                assert_eq!(sim.lives(), 0);
                break;
            }
        }
        assert!(game_overs <= 1);
        if game_overs == 1 {
            assert_eq!(sim.phase(), GamePhase::GameOver);
        }
    }
}
