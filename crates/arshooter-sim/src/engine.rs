//! Game engine: the controller that owns game state.
//!
//! `GameEngine` owns the hecs ECS world, the target pool, score/health, and
//! the respawn timers. The host drives it with one `tick(dt)` per displayed
//! frame and forwards `fire`/`restart`/`dispose`. Completely headless
//! (rendering goes through `RenderBackend`), enabling deterministic testing.

use glam::Vec3;
use hecs::World;
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use arshooter_core::commands::PlayerCommand;
use arshooter_core::components::{Alive, Pose, Visual};
use arshooter_core::config::{ConfigError, GameConfig};
use arshooter_core::constants::DEFAULT_SEED;
use arshooter_core::enums::GamePhase;
use arshooter_core::events::{FeedbackEvent, GameEvent};
use arshooter_core::state::{DamageOutcome, GameState, GameStateSnapshot};
use arshooter_core::types::{Projection, SimTime, Viewer};

use crate::listener::{self, GameListener, NoopListener};
use crate::registry::{self, TargetRegistry};
use crate::render::{HeadlessBackend, RenderBackend};
use crate::systems;
use crate::systems::hit_test::Hit;
use crate::systems::respawn::RespawnQueue;

/// Configuration for starting a new game instance.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed + same inputs = same game.
    pub seed: u64,
    pub game: GameConfig,
    /// Initial viewport size in pixels.
    pub viewport: (u32, u32),
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            game: GameConfig::default(),
            viewport: (1280, 720),
        }
    }
}

/// The engine. Owns the ECS world and all game state.
pub struct GameEngine<B: RenderBackend = HeadlessBackend> {
    world: World,
    registry: TargetRegistry,
    backend: B,
    listener: Box<dyn GameListener>,
    config: GameConfig,
    rng: ChaCha8Rng,
    time: SimTime,
    state: GameState,
    /// Simulation time of the last damage event (global across targets).
    last_damage_secs: Option<f64>,
    respawns: RespawnQueue,
    viewer: Viewer,
    projection: Projection,
    events: Vec<GameEvent>,
    feedback: Vec<FeedbackEvent>,
    disposed: bool,
}

impl<B: RenderBackend> GameEngine<B> {
    /// Create a game in the `Playing` state with a freshly spawned pool.
    ///
    /// Fails if `config.game` does not validate.
    pub fn new(
        config: SimConfig,
        mut backend: B,
        listener: Box<dyn GameListener>,
    ) -> Result<Self, ConfigError> {
        let game = config.game;
        game.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut world = World::new();

        let (width, height) = config.viewport;
        let projection = Projection::for_viewport(width, height, game.field_of_view_deg);
        backend.set_projection(&projection);

        let registry = TargetRegistry::populate(&mut world, &mut backend, &mut rng, &game);
        let viewer = Viewer::new(Vec3::new(0.0, game.eye_height, 0.0));
        systems::motion::update_poses(&mut world, &game, viewer.position, 0.0);

        info!(
            "game started: {} targets, {} health, seed {}",
            registry.len(),
            game.max_health,
            config.seed
        );

        Ok(Self {
            world,
            registry,
            backend,
            listener,
            state: GameState::new(game.max_health),
            config: game,
            rng,
            time: SimTime::default(),
            last_damage_secs: None,
            respawns: RespawnQueue::default(),
            viewer,
            projection,
            events: Vec::new(),
            feedback: Vec::new(),
            disposed: false,
        })
    }

    /// Advance the simulation by one displayed frame and return its snapshot.
    ///
    /// `dt_secs` is clamped to `max_frame_delta_secs`. During game over the
    /// targets are frozen and only the last frame is re-rendered.
    pub fn tick(&mut self, dt_secs: f64) -> GameStateSnapshot {
        if self.disposed {
            return self.snapshot();
        }

        if !self.state.is_game_over() {
            let dt = if dt_secs.is_finite() {
                dt_secs.clamp(0.0, self.config.max_frame_delta_secs)
            } else {
                0.0
            };
            self.time.advance(dt);
            self.run_systems();
        }

        systems::render_sync::run(&self.world, &mut self.backend);
        self.backend.render_frame(&self.viewer);
        self.flush_events();

        let snapshot = self.snapshot();
        self.feedback.clear();
        snapshot
    }

    /// Fire along the reticle. At most one target dies; a miss changes nothing.
    pub fn fire(&mut self) {
        if self.disposed || self.state.is_game_over() {
            debug!("fire ignored in {:?}", self.phase());
            return;
        }

        let ray = self.viewer.aim_ray();
        match systems::hit_test::cast(&self.world, &ray, self.config.hit_radius_scale) {
            Some(hit) => self.kill(hit),
            None => self.feedback.push(FeedbackEvent::ShotFired { hit: false }),
        }
        self.flush_events();
    }

    /// Start a new game. Only honoured during game over.
    ///
    /// Resets score, health, and the clock, cancels pending respawns, and gives
    /// every target a fresh spawn. The world and visuals are kept.
    pub fn restart(&mut self) {
        if self.disposed || !self.state.is_game_over() {
            debug!("restart ignored in {:?}", self.phase());
            return;
        }

        let previous = self.state;
        self.state.reset();
        self.time = SimTime::default();
        self.last_damage_secs = None;
        self.respawns.cancel_all();
        self.feedback.clear();

        self.registry
            .reseed_all(&mut self.world, &mut self.rng, &self.config);
        systems::motion::update_poses(
            &mut self.world,
            &self.config,
            self.viewer.position,
            self.time.elapsed_secs,
        );

        if previous.score() != self.state.score() {
            self.events.push(GameEvent::ScoreChanged {
                score: self.state.score(),
            });
        }
        if previous.health() != self.state.health() {
            self.events.push(GameEvent::HealthChanged {
                health: self.state.health(),
            });
        }
        info!("game restarted (previous score {})", previous.score());
        self.flush_events();
    }

    /// Stop the game and release every resource. Safe to call repeatedly.
    /// No callback fires after this returns.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        let cancelled = self.respawns.cancel_all();
        self.events.clear();
        self.feedback.clear();
        self.registry
            .release_visuals(&mut self.world, &mut self.backend);
        self.world.clear();
        self.listener = Box::new(NoopListener);
        info!("game disposed ({cancelled} pending respawns cancelled)");
    }

    /// Viewport changed: recompute the projection. Zero-sized viewports are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.disposed || width == 0 || height == 0 {
            return;
        }
        self.projection = Projection::for_viewport(width, height, self.config.field_of_view_deg);
        self.backend.set_projection(&self.projection);
    }

    /// Turn the viewer (device orientation).
    pub fn aim(&mut self, yaw: f32, pitch: f32) {
        if self.disposed {
            return;
        }
        self.viewer.set_orientation(yaw, pitch);
    }

    /// Dispatch a wire-level player command.
    pub fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Fire => self.fire(),
            PlayerCommand::Restart => self.restart(),
            PlayerCommand::Aim { yaw, pitch } => self.aim(yaw, pitch),
        }
    }

    /// Snapshot of the current state without advancing time.
    pub fn snapshot(&self) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            &self.state,
            &self.viewer,
            &self.projection,
            &self.feedback,
        )
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn viewer(&self) -> Viewer {
        self.viewer
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Number of respawn timers still pending.
    pub fn pending_respawns(&self) -> usize {
        self.respawns.len()
    }

    /// Read-only access to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Move a pooled target to an exact placement (for tests).
    #[cfg(test)]
    pub fn place_target(&mut self, index: usize, bearing: f32, elevation: f32, distance: f32) {
        use arshooter_core::components::Placement;

        let Some(entity) = self.registry.entity(index) else {
            return;
        };
        if let Ok(mut placement) = self.world.get::<&mut Placement>(entity) {
            placement.bearing = bearing;
            placement.elevation = elevation;
            placement.distance = distance;
        }
        systems::motion::update_poses(
            &mut self.world,
            &self.config,
            self.viewer.position,
            self.time.elapsed_secs,
        );
    }

    /// Run the per-frame systems in order.
    fn run_systems(&mut self) {
        let now = self.time.elapsed_secs;
        // 1. Deferred respawns
        systems::respawn::run(
            &mut self.world,
            &mut self.respawns,
            &mut self.rng,
            &self.config,
            now,
            &mut self.feedback,
        );
        // 2. Approach + spin
        systems::motion::advance(&mut self.world, &self.config);
        // 3. Damage range
        self.apply_damage(now);
        // 4. Positions, including targets respawned on the game-over frame
        systems::motion::update_poses(&mut self.world, &self.config, self.viewer.position, now);
    }

    /// Apply the damage rule to every breaching target, in pool order.
    ///
    /// The cooldown is global: the first breach after it elapses costs one
    /// health; later breaches inside the window are recycled harmlessly.
    /// Every breaching target is respawned immediately.
    fn apply_damage(&mut self, now: f64) {
        let breaches =
            systems::damage::collect_breaches(&self.world, &self.registry, self.config.min_distance);
        let cooldown = self.config.damage_cooldown_secs();

        for breach in breaches {
            let ready = self
                .last_damage_secs
                .map_or(true, |last| now - last > cooldown);

            if ready {
                self.last_damage_secs = Some(now);
                match self.state.take_damage() {
                    DamageOutcome::Wounded(health) => {
                        debug!("target {} hit the player, health {health}", breach.target_id);
                        self.events.push(GameEvent::HealthChanged { health });
                        self.feedback.push(FeedbackEvent::PlayerDamaged {
                            target_id: breach.target_id,
                            health,
                        });
                    }
                    DamageOutcome::Killed => {
                        self.events.push(GameEvent::HealthChanged { health: 0 });
                        self.feedback.push(FeedbackEvent::PlayerDamaged {
                            target_id: breach.target_id,
                            health: 0,
                        });
                        self.events.push(GameEvent::GameOver {
                            final_score: self.state.score(),
                        });
                        info!("game over, final score {}", self.state.score());
                    }
                    DamageOutcome::Ignored => {}
                }
            } else {
                self.feedback.push(FeedbackEvent::DamageDeflected {
                    target_id: breach.target_id,
                });
            }

            registry::respawn_entity(&mut self.world, breach.entity, &mut self.rng, &self.config);

            if self.state.is_game_over() {
                return;
            }
        }
    }

    /// Resolve a hit: hide the target, score it, and schedule its respawn.
    fn kill(&mut self, hit: Hit) {
        if let Ok(mut alive) = self.world.get::<&mut Alive>(hit.entity) {
            alive.0 = false;
        }
        if let Ok(mut query) = self.world.query_one::<(&Pose, &Visual)>(hit.entity) {
            if let Some((pose, visual)) = query.get() {
                self.backend.update_visual(visual.handle, pose, false);
            }
        }

        if self.config.score_per_kill > 0 {
            if let Some(score) = self.state.award(self.config.score_per_kill) {
                self.events.push(GameEvent::ScoreChanged { score });
            }
        }

        let due = self.time.elapsed_secs + self.config.respawn_delay_secs();
        self.respawns.schedule(hit.entity, hit.target_id, due);

        debug!("target {} killed at distance {:.2}", hit.target_id, hit.distance);
        self.feedback.push(FeedbackEvent::ShotFired { hit: true });
        self.feedback.push(FeedbackEvent::TargetKilled {
            target_id: hit.target_id,
            distance: hit.distance,
        });
    }

    /// Deliver queued events to the listener.
    fn flush_events(&mut self) {
        if self.disposed {
            self.events.clear();
            return;
        }
        for event in self.events.drain(..) {
            listener::dispatch(self.listener.as_mut(), &event);
        }
    }
}
