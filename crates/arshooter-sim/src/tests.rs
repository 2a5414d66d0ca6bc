//! Tests for the engine, target pool, motion, hit testing, and damage rules.

use std::cell::{Cell, RefCell};
use std::f32::consts::PI;
use std::rc::Rc;

use glam::Vec3;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use arshooter_core::commands::PlayerCommand;
use arshooter_core::components::{Alive, Placement, Pose, Target, Visual};
use arshooter_core::config::{ConfigError, GameConfig};
use arshooter_core::constants::*;
use arshooter_core::enums::{GamePhase, TargetShape};
use arshooter_core::events::FeedbackEvent;
use arshooter_core::state::TargetView;
use arshooter_core::types::{Ray, VisualHandle};

use crate::engine::{GameEngine, SimConfig};
use crate::listener::{GameCallbacks, GameListener};
use crate::motion::{self, DriftParams};
use crate::registry::{self, TargetRegistry};
use crate::render::HeadlessBackend;
use crate::systems::hit_test;
use crate::systems::respawn::RespawnQueue;

const FRAME: f64 = 1.0 / 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    Score(u32),
    Health(u32),
    GameOver,
}

type Calls = Rc<RefCell<Vec<Call>>>;

struct Recorder(Calls);

impl GameListener for Recorder {
    fn on_score_change(&mut self, score: u32) {
        self.0.borrow_mut().push(Call::Score(score));
    }

    fn on_health_change(&mut self, health: u32) {
        self.0.borrow_mut().push(Call::Health(health));
    }

    fn on_game_over(&mut self) {
        self.0.borrow_mut().push(Call::GameOver);
    }
}

fn new_engine(game: GameConfig) -> (GameEngine, Calls) {
    let calls = Calls::default();
    let engine = GameEngine::new(
        SimConfig {
            seed: 7,
            game,
            ..Default::default()
        },
        HeadlessBackend::new(),
        Box::new(Recorder(calls.clone())),
    )
    .unwrap();
    (engine, calls)
}

/// Park every target behind the viewer at full spawn radius.
fn clear_field(engine: &mut GameEngine) {
    let radius = engine.config().spawn_radius;
    for index in 0..engine.config().pool_size {
        engine.place_target(index, PI, 0.0, radius);
    }
}

fn target(engine: &GameEngine, id: usize) -> TargetView {
    engine.snapshot().targets[id]
}

fn aim_at_target(engine: &mut GameEngine, id: usize) {
    let position = target(engine, id).position;
    let mut viewer = engine.viewer();
    viewer.look_at(position);
    engine.aim(viewer.yaw, viewer.pitch);
}

fn calls_of(calls: &Calls) -> Vec<Call> {
    calls.borrow().clone()
}

// ---- Initial state ----

#[test]
fn test_new_game_initial_state() {
    let (engine, calls) = new_engine(GameConfig::default());
    let snap = engine.snapshot();

    assert_eq!(snap.phase, GamePhase::Playing);
    assert_eq!(snap.score, 0);
    assert_eq!(snap.health, MAX_HEALTH);
    assert_eq!(snap.targets.len(), ENEMY_COUNT);
    assert!(calls_of(&calls).is_empty());

    let near = SPAWN_RADIUS * SPAWN_NEAR_FACTOR;
    for (i, t) in snap.targets.iter().enumerate() {
        assert_eq!(t.id as usize, i);
        assert!(t.alive);
        assert_eq!(t.shape, TargetShape::for_index(i));
        assert!(
            t.distance >= near && t.distance <= SPAWN_RADIUS,
            "initial distance {} outside [{near}, {SPAWN_RADIUS}]",
            t.distance
        );
    }
}

#[test]
fn test_initial_projection_pushed_to_backend() {
    let (engine, _) = new_engine(GameConfig::default());
    let projection = engine.backend().projection().unwrap();
    assert!((projection.aspect - 1280.0 / 720.0).abs() < 1e-5);
    assert_eq!(projection.fov_deg, FIELD_OF_VIEW_DEG);
    assert_eq!(engine.backend().live_visuals(), ENEMY_COUNT);
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let run = || {
        let (mut engine, _) = new_engine(GameConfig::default());
        let mut frames = Vec::new();
        for i in 0..300 {
            if i % 10 == 0 {
                engine.aim(i as f32 * 0.1, 0.05);
                engine.fire();
            }
            frames.push(serde_json::to_string(&engine.tick(FRAME)).unwrap());
        }
        frames
    };
    assert_eq!(run(), run(), "Snapshots diverged with same seed");
}

#[test]
fn test_different_seeds_diverge() {
    let spawn = |seed| {
        let engine: GameEngine = GameEngine::new(
            SimConfig {
                seed,
                ..Default::default()
            },
            HeadlessBackend::new(),
            Box::new(crate::listener::NoopListener),
        )
        .unwrap();
        serde_json::to_string(&engine.snapshot()).unwrap()
    };
    assert_ne!(spawn(1), spawn(2));
}

// ---- Clock ----

#[test]
fn test_frame_delta_is_clamped() {
    let (mut engine, _) = new_engine(GameConfig::default());
    engine.tick(5.0);
    assert!((engine.time().elapsed_secs - MAX_FRAME_DELTA_SECS).abs() < 1e-12);

    engine.tick(-1.0);
    engine.tick(f64::NAN);
    assert!((engine.time().elapsed_secs - MAX_FRAME_DELTA_SECS).abs() < 1e-12);
    assert_eq!(engine.time().frame, 3);
}

// ---- Motion ----

#[test]
fn test_approach_is_fixed_per_frame() {
    let (mut engine, _) = new_engine(GameConfig::default());
    clear_field(&mut engine);
    engine.place_target(0, 0.0, 0.0, 10.0);

    engine.tick(FRAME);
    assert!((target(&engine, 0).distance - (10.0 - APPROACH_SPEED)).abs() < 1e-4);

    // A longer frame moves the same amount.
    engine.tick(0.1);
    assert!((target(&engine, 0).distance - (10.0 - 2.0 * APPROACH_SPEED)).abs() < 1e-4);
}

#[test]
fn test_distance_never_below_threshold() {
    let (mut engine, calls) = new_engine(GameConfig::default());
    let mut last_health = engine.state().health();

    for _ in 0..3000 {
        let snap = engine.tick(FRAME);
        for t in snap.targets.iter().filter(|t| t.alive) {
            assert!(t.distance >= 0.0);
            assert!(
                t.distance >= MIN_DISTANCE,
                "target {} at {} is below the damage threshold",
                t.id,
                t.distance
            );
        }
        assert!(snap.health <= last_health, "health must never increase");
        last_health = snap.health;
    }

    let game_overs = calls_of(&calls)
        .iter()
        .filter(|c| **c == Call::GameOver)
        .count();
    assert!(game_overs <= 1);
}

#[test]
fn test_render_sync_tracks_alive_targets() {
    let (mut engine, _) = new_engine(GameConfig::default());
    clear_field(&mut engine);
    engine.tick(FRAME);
    assert_eq!(engine.backend().visible_count(), ENEMY_COUNT);
    let frames = engine.backend().frames_rendered();

    engine.place_target(3, 0.4, 0.0, 12.0);
    aim_at_target(&mut engine, 3);
    engine.fire();
    // Hidden immediately, before the next frame.
    assert_eq!(engine.backend().visible_count(), ENEMY_COUNT - 1);

    engine.tick(FRAME);
    assert_eq!(engine.backend().visible_count(), ENEMY_COUNT - 1);
    assert_eq!(engine.backend().frames_rendered(), frames + 1);
}

// ---- Fire / hit test ----

#[test]
fn test_fire_kills_aimed_target() {
    let (mut engine, calls) = new_engine(GameConfig::default());
    clear_field(&mut engine);
    engine.place_target(2, 0.5, 0.1, 12.0);
    aim_at_target(&mut engine, 2);

    engine.fire();

    let snap = engine.snapshot();
    for t in &snap.targets {
        assert_eq!(t.alive, t.id != 2, "only target 2 should be dead");
    }
    assert_eq!(snap.score, SCORE_PER_KILL);
    assert_eq!(calls_of(&calls), vec![Call::Score(SCORE_PER_KILL)]);
    assert_eq!(engine.pending_respawns(), 1);
    assert!(snap.feedback.contains(&FeedbackEvent::ShotFired { hit: true }));
}

#[test]
fn test_fire_miss_changes_nothing() {
    let (mut engine, calls) = new_engine(GameConfig::default());
    clear_field(&mut engine);
    let before = engine.snapshot();

    // Default aim is straight ahead; every target is behind the viewer.
    engine.fire();

    let after = engine.snapshot();
    assert_eq!(after.score, 0);
    assert_eq!(after.targets, before.targets);
    assert!(calls_of(&calls).is_empty());
    assert_eq!(engine.pending_respawns(), 0);

    let snap = engine.tick(FRAME);
    assert!(snap.feedback.contains(&FeedbackEvent::ShotFired { hit: false }));
    assert!(calls_of(&calls).is_empty());
}

#[test]
fn test_fire_picks_nearest_along_ray_and_is_reentrant() {
    let (mut engine, calls) = new_engine(GameConfig {
        drift_amplitude: 0.0,
        ..Default::default()
    });
    clear_field(&mut engine);
    engine.place_target(0, 0.0, 0.0, 15.0);
    engine.place_target(1, 0.0, 0.0, 8.0);

    engine.fire();
    assert!(!target(&engine, 1).alive, "nearer target should die first");
    assert!(target(&engine, 0).alive);

    // The second shot resolves against the remaining live set.
    engine.fire();
    assert!(!target(&engine, 0).alive);

    engine.fire();
    assert_eq!(engine.state().score(), 2 * SCORE_PER_KILL);
    assert_eq!(
        calls_of(&calls),
        vec![
            Call::Score(SCORE_PER_KILL),
            Call::Score(2 * SCORE_PER_KILL)
        ]
    );
}

#[test]
fn test_dead_target_frozen_until_respawn() {
    let (mut engine, _) = new_engine(GameConfig::default());
    clear_field(&mut engine);
    engine.place_target(0, 0.3, 0.0, 12.0);
    aim_at_target(&mut engine, 0);
    engine.fire();

    let mut respawned = false;
    for _ in 0..5 {
        let snap = engine.tick(0.1);
        assert!(!snap.targets[0].alive);
        assert_eq!(snap.targets[0].distance, 12.0, "dead targets must not move");
        respawned |= snap
            .feedback
            .contains(&FeedbackEvent::TargetRespawned { target_id: 0 });
    }
    assert!(!respawned);

    for _ in 0..2 {
        let snap = engine.tick(0.1);
        respawned |= snap
            .feedback
            .contains(&FeedbackEvent::TargetRespawned { target_id: 0 });
    }
    assert!(respawned);
    let t = target(&engine, 0);
    assert!(t.alive);
    assert!(t.distance <= SPAWN_RADIUS && t.distance >= SPAWN_RADIUS - 2.0 * APPROACH_SPEED);
    assert_eq!(engine.pending_respawns(), 0);
}

// ---- Damage ----

#[test]
fn test_damage_at_threshold_respawns_target() {
    let (mut engine, calls) = new_engine(GameConfig::default());
    clear_field(&mut engine);
    engine.place_target(0, 0.0, 0.0, MIN_DISTANCE + 0.01);

    let snap = engine.tick(FRAME);

    assert_eq!(snap.health, MAX_HEALTH - 1);
    assert_eq!(calls_of(&calls), vec![Call::Health(MAX_HEALTH - 1)]);
    assert!(snap.targets[0].alive);
    assert_eq!(snap.targets[0].distance, SPAWN_RADIUS);
    assert!(snap.feedback.contains(&FeedbackEvent::PlayerDamaged {
        target_id: 0,
        health: MAX_HEALTH - 1
    }));
}

#[test]
fn test_cooldown_suppresses_same_frame_breach() {
    let (mut engine, calls) = new_engine(GameConfig::default());
    clear_field(&mut engine);
    engine.place_target(0, 0.0, 0.0, MIN_DISTANCE + 0.01);
    engine.place_target(1, 1.0, 0.0, MIN_DISTANCE + 0.01);

    let snap = engine.tick(FRAME);

    assert_eq!(snap.health, MAX_HEALTH - 1);
    assert_eq!(calls_of(&calls), vec![Call::Health(MAX_HEALTH - 1)]);
    assert!(snap
        .feedback
        .contains(&FeedbackEvent::DamageDeflected { target_id: 1 }));
    for id in [0, 1] {
        assert!(snap.targets[id].alive);
        assert_eq!(snap.targets[id].distance, SPAWN_RADIUS);
    }
}

#[test]
fn test_cooldown_is_global_and_expires() {
    let (mut engine, calls) = new_engine(GameConfig::default());
    clear_field(&mut engine);
    engine.place_target(0, 0.0, 0.0, MIN_DISTANCE + 0.01);
    engine.tick(FRAME);
    assert_eq!(engine.state().health(), MAX_HEALTH - 1);

    for _ in 0..3 {
        engine.tick(0.1);
    }
    // A different target, inside the cooldown window.
    engine.place_target(1, 2.0, 0.0, MIN_DISTANCE + 0.01);
    let snap = engine.tick(0.1);
    assert_eq!(snap.health, MAX_HEALTH - 1);
    assert_eq!(snap.targets[1].distance, SPAWN_RADIUS);

    for _ in 0..7 {
        engine.tick(0.1);
    }
    engine.place_target(2, 3.0, 0.0, MIN_DISTANCE + 0.01);
    let snap = engine.tick(0.1);
    assert_eq!(snap.health, MAX_HEALTH - 2);
    assert_eq!(
        calls_of(&calls),
        vec![Call::Health(MAX_HEALTH - 1), Call::Health(MAX_HEALTH - 2)]
    );
}

#[test]
fn test_health_zero_ends_game_and_freezes_world() {
    let (mut engine, calls) = new_engine(GameConfig {
        max_health: 1,
        ..Default::default()
    });
    clear_field(&mut engine);
    engine.place_target(0, 0.0, 0.0, MIN_DISTANCE + 0.01);

    let snap = engine.tick(FRAME);
    assert_eq!(snap.phase, GamePhase::GameOver);
    assert_eq!(snap.health, 0);
    assert_eq!(calls_of(&calls), vec![Call::Health(0), Call::GameOver]);

    let frozen = engine.snapshot();
    for _ in 0..10 {
        let snap = engine.tick(FRAME);
        assert_eq!(snap.targets, frozen.targets);
        assert_eq!(snap.time, frozen.time);
        assert_eq!(snap.phase, GamePhase::GameOver);
    }
    assert_eq!(calls_of(&calls), vec![Call::Health(0), Call::GameOver]);
}

#[test]
fn test_fire_ignored_during_game_over() {
    let (mut engine, calls) = new_engine(GameConfig {
        max_health: 1,
        ..Default::default()
    });
    clear_field(&mut engine);
    engine.place_target(0, 0.0, 0.0, MIN_DISTANCE + 0.01);
    engine.tick(FRAME);
    assert_eq!(engine.phase(), GamePhase::GameOver);

    // Aim at a live target; the shot must still be ignored.
    aim_at_target(&mut engine, 3);
    engine.fire();
    engine.handle_command(PlayerCommand::Fire);

    assert_eq!(engine.state().score(), 0);
    assert!(engine.snapshot().targets.iter().all(|t| t.alive));
    assert_eq!(calls_of(&calls), vec![Call::Health(0), Call::GameOver]);
}

#[test]
fn test_score_never_decreases_under_play() {
    let (mut engine, _) = new_engine(GameConfig::default());
    let mut last_score = 0;

    for frame in 0..1500 {
        if frame % 3 == 0 {
            if let Some(alive) = engine.snapshot().targets.iter().find(|t| t.alive) {
                let mut viewer = engine.viewer();
                viewer.look_at(alive.position);
                engine.aim(viewer.yaw, viewer.pitch);
            }
            engine.fire();
        }
        let snap = engine.tick(FRAME);
        assert!(snap.score >= last_score);
        assert_eq!(snap.score % SCORE_PER_KILL, 0);
        last_score = snap.score;
    }
    assert!(last_score > 0, "aimed shots should have scored");
}

// ---- Restart ----

#[test]
fn test_restart_ignored_while_playing() {
    let (mut engine, calls) = new_engine(GameConfig::default());
    engine.tick(FRAME);
    let time = engine.time();

    engine.restart();
    engine.handle_command(PlayerCommand::Restart);

    assert_eq!(engine.time(), time);
    assert!(calls_of(&calls).is_empty());
}

#[test]
fn test_restart_resets_game() {
    let (mut engine, calls) = new_engine(GameConfig {
        max_health: 1,
        ..Default::default()
    });
    clear_field(&mut engine);
    engine.place_target(2, 0.5, 0.0, 12.0);
    aim_at_target(&mut engine, 2);
    engine.fire();
    engine.place_target(0, 0.0, 0.0, MIN_DISTANCE + 0.01);
    engine.tick(FRAME);
    assert_eq!(engine.phase(), GamePhase::GameOver);
    assert_eq!(engine.pending_respawns(), 1);

    engine.restart();

    let snap = engine.snapshot();
    assert_eq!(snap.phase, GamePhase::Playing);
    assert_eq!(snap.score, 0);
    assert_eq!(snap.health, 1);
    assert_eq!(snap.time.elapsed_secs, 0.0);
    assert_eq!(engine.pending_respawns(), 0);

    let near = SPAWN_RADIUS * SPAWN_NEAR_FACTOR;
    for t in &snap.targets {
        assert!(t.alive);
        assert!(t.distance >= near && t.distance <= SPAWN_RADIUS);
    }
    assert_eq!(
        calls_of(&calls),
        vec![
            Call::Score(SCORE_PER_KILL),
            Call::Health(0),
            Call::GameOver,
            Call::Score(0),
            Call::Health(1),
        ]
    );
}

#[test]
fn test_game_over_fires_once_per_game() {
    let (mut engine, calls) = new_engine(GameConfig {
        max_health: 1,
        ..Default::default()
    });
    for _ in 0..2 {
        clear_field(&mut engine);
        engine.place_target(0, 0.0, 0.0, MIN_DISTANCE + 0.01);
        engine.place_target(1, 1.0, 0.0, MIN_DISTANCE + 0.01);
        engine.tick(FRAME);
        engine.tick(FRAME);
        engine.restart();
    }
    let game_overs = calls_of(&calls)
        .iter()
        .filter(|c| **c == Call::GameOver)
        .count();
    assert_eq!(game_overs, 2);
}

// ---- Dispose / resize ----

#[test]
fn test_dispose_is_idempotent() {
    let (mut engine, calls) = new_engine(GameConfig::default());
    clear_field(&mut engine);
    engine.place_target(0, 0.3, 0.0, 12.0);
    aim_at_target(&mut engine, 0);
    engine.fire();
    assert_eq!(engine.pending_respawns(), 1);
    let before = calls_of(&calls);

    engine.dispose();
    engine.dispose();

    assert!(engine.is_disposed());
    assert_eq!(engine.pending_respawns(), 0);
    assert_eq!(engine.backend().released(), ENEMY_COUNT as u64);
    assert_eq!(engine.backend().live_visuals(), 0);

    // Nothing runs or notifies after disposal.
    let frames = engine.backend().frames_rendered();
    engine.fire();
    engine.restart();
    let snap = engine.tick(FRAME);
    assert!(snap.targets.is_empty());
    assert_eq!(engine.backend().frames_rendered(), frames);
    assert_eq!(calls_of(&calls), before);
}

#[test]
fn test_resize_updates_projection() {
    let (mut engine, _) = new_engine(GameConfig::default());
    engine.resize(800, 400);
    assert!((engine.backend().projection().unwrap().aspect - 2.0).abs() < 1e-6);

    engine.resize(0, 400);
    assert!((engine.projection().aspect - 2.0).abs() < 1e-6);

    engine.dispose();
    engine.resize(400, 400);
    assert!((engine.projection().aspect - 2.0).abs() < 1e-6);
}

#[test]
fn test_aim_command_turns_viewer() {
    let (mut engine, _) = new_engine(GameConfig::default());
    engine.handle_command(PlayerCommand::Aim {
        yaw: 1.0,
        pitch: 0.2,
    });
    let viewer = engine.viewer();
    assert!((viewer.yaw - 1.0).abs() < 1e-6);
    assert!((viewer.pitch - 0.2).abs() < 1e-6);
}

#[test]
fn test_closure_callbacks() {
    let score = Rc::new(Cell::new(0));
    let overs = Rc::new(Cell::new(0));
    let callbacks = GameCallbacks::new()
        .on_score_change({
            let score = score.clone();
            move |s| score.set(s)
        })
        .on_game_over({
            let overs = overs.clone();
            move || overs.set(overs.get() + 1)
        });

    let mut engine: GameEngine = GameEngine::new(
        SimConfig {
            game: GameConfig {
                max_health: 1,
                ..Default::default()
            },
            ..Default::default()
        },
        HeadlessBackend::new(),
        Box::new(callbacks),
    )
    .unwrap();
    clear_field(&mut engine);
    engine.place_target(1, 0.2, 0.0, 10.0);
    aim_at_target(&mut engine, 1);
    engine.fire();
    assert_eq!(score.get(), SCORE_PER_KILL);

    engine.place_target(0, 0.0, 0.0, MIN_DISTANCE);
    engine.tick(FRAME);
    assert_eq!(overs.get(), 1);
}

// ---- Registry ----

#[test]
fn test_registry_populates_fixed_pool() {
    let mut world = World::new();
    let mut backend = HeadlessBackend::new();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let config = GameConfig {
        pool_size: 9,
        ..Default::default()
    };

    let registry = TargetRegistry::populate(&mut world, &mut backend, &mut rng, &config);
    assert_eq!(registry.len(), 9);
    assert_eq!(backend.live_visuals(), 9);

    for (index, &entity) in registry.entities().iter().enumerate() {
        let target = *world.get::<&Target>(entity).unwrap();
        let visual = *world.get::<&Visual>(entity).unwrap();
        assert_eq!(target.id as usize, index);
        assert_eq!(visual.shape, TargetShape::for_index(index));
        assert_eq!(visual.color, visual.shape.color());
    }
}

#[test]
fn test_registry_respawn_resets_placement() {
    let mut world = World::new();
    let mut backend = HeadlessBackend::new();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let config = GameConfig::default();
    let registry = TargetRegistry::populate(&mut world, &mut backend, &mut rng, &config);

    let entity = registry.entity(4).unwrap();
    world.get::<&mut Alive>(entity).unwrap().0 = false;
    world.get::<&mut Placement>(entity).unwrap().distance = 3.0;

    assert!(registry.respawn(&mut world, 4, &mut rng, &config));
    assert!(world.get::<&Alive>(entity).unwrap().0);
    let placement = *world.get::<&Placement>(entity).unwrap();
    assert_eq!(placement.distance, SPAWN_RADIUS);
    assert!(placement.bearing >= 0.0 && placement.bearing < std::f32::consts::TAU);
    assert!(placement.elevation >= ELEVATION_MIN && placement.elevation <= ELEVATION_MAX);

    // Out of range is ignored.
    assert!(!registry.respawn(&mut world, 99, &mut rng, &config));
}

#[test]
fn test_registry_release_visuals() {
    let mut world = World::new();
    let mut backend = HeadlessBackend::new();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let config = GameConfig::default();
    let mut registry = TargetRegistry::populate(&mut world, &mut backend, &mut rng, &config);

    registry.release_visuals(&mut world, &mut backend);
    assert!(registry.is_empty());
    assert_eq!(backend.released(), ENEMY_COUNT as u64);
    assert_eq!(world.len(), 0);
}

#[test]
fn test_spawn_placement_within_bounds() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let config = GameConfig::default();
    for _ in 0..500 {
        let p = registry::spawn_placement(&mut rng, &config);
        assert!(p.distance >= config.spawn_near_radius() && p.distance <= config.spawn_radius);
        assert!(p.elevation >= config.elevation_min && p.elevation <= config.elevation_max);
    }
}

#[test]
fn test_engine_rejects_invalid_config() {
    let game = GameConfig {
        elevation_min: f32::NEG_INFINITY,
        ..Default::default()
    };
    let result = GameEngine::new(
        SimConfig {
            game,
            ..Default::default()
        },
        HeadlessBackend::new(),
        Box::new(crate::listener::NoopListener),
    );
    assert!(matches!(
        result,
        Err(ConfigError::NotFinite {
            field: "elevation_min",
            ..
        })
    ));
}

#[test]
fn test_engine_accepts_boundary_configs() {
    // Full near factor: every spawn at the outer radius, one-element ranges.
    let (engine, _) = new_engine(GameConfig {
        spawn_near_factor: 1.0,
        elevation_min: 0.1,
        elevation_max: 0.1,
        ..Default::default()
    });
    for t in engine.snapshot().targets {
        assert_eq!(t.distance, SPAWN_RADIUS);
    }

    // Single-target pool, damage range just inside the spawn radius.
    let (mut engine, _) = new_engine(GameConfig {
        pool_size: 1,
        min_distance: SPAWN_RADIUS - 0.01,
        ..Default::default()
    });
    for _ in 0..120 {
        let snap = engine.tick(FRAME);
        assert_eq!(snap.targets.len(), 1);
    }
    assert!(engine.state().health() < MAX_HEALTH);

    // Extreme but finite drift values only move targets sideways.
    let (mut engine, _) = new_engine(GameConfig {
        drift_speed: 1.0e6,
        drift_amplitude: 10.0,
        bob_ratio: 5.0,
        spin_per_frame: 1.0e6,
        ..Default::default()
    });
    for _ in 0..60 {
        engine.tick(FRAME);
    }
    assert!(engine.snapshot().targets.iter().all(|t| t.distance.is_finite()));
}

#[test]
fn test_game_over_frame_poses_match_placement() {
    let (mut engine, _) = new_engine(GameConfig {
        max_health: 1,
        drift_amplitude: 0.0,
        elevation_min: 0.0,
        elevation_max: 0.0,
        ..Default::default()
    });
    clear_field(&mut engine);
    engine.place_target(0, 0.0, 0.0, MIN_DISTANCE + 0.01);

    let snap = engine.tick(FRAME);
    assert_eq!(snap.phase, GamePhase::GameOver);
    assert_eq!(snap.targets[0].distance, SPAWN_RADIUS);

    let eye = engine.viewer().position;
    for _ in 0..3 {
        let snap = engine.tick(FRAME);
        for t in &snap.targets {
            let range = (t.position - eye).length();
            assert!(
                (range - t.distance).abs() < 1e-3,
                "target {} drawn at {range} but placed at {}",
                t.id,
                t.distance
            );
        }
    }
}

// ---- Motion model ----

#[test]
fn test_approach_floors_at_threshold() {
    assert_eq!(motion::approach(10.0, 0.5, 2.0), 9.5);
    assert_eq!(motion::approach(2.2, 0.5, 2.0), 2.0);
    assert_eq!(motion::approach(2.0, 0.5, 2.0), 2.0);
}

#[test]
fn test_world_position_without_drift() {
    let placement = Placement {
        bearing: PI / 2.0,
        elevation: 0.1,
        distance: 20.0,
        drift_phase: 0.0,
    };
    let params = DriftParams {
        speed: 1.0,
        amplitude: 0.0,
        bob_ratio: 0.5,
    };
    let p = motion::world_position(&placement, &params, Vec3::ZERO, 3.0);
    assert!((p - Vec3::new(20.0, 2.0, 0.0)).length() < 1e-4, "got {p:?}");
}

#[test]
fn test_drift_is_perpendicular_and_bounded() {
    for i in 0..16 {
        let bearing = i as f32 * 0.4;
        let radial = motion::radial_direction(bearing);
        let lateral = motion::lateral_direction(bearing);
        assert!(radial.dot(lateral).abs() < 1e-6);
        assert!((lateral.length() - 1.0).abs() < 1e-6);
    }

    let placement = Placement {
        bearing: 0.0,
        elevation: 0.0,
        distance: 10.0,
        drift_phase: 1.3,
    };
    let params = DriftParams {
        speed: DRIFT_SPEED,
        amplitude: DRIFT_AMPLITUDE,
        bob_ratio: BOB_RATIO,
    };
    for step in 0..100 {
        let (lateral, vertical) = motion::drift_offsets(&placement, &params, step as f64 * 0.1);
        assert!(lateral.abs() <= DRIFT_AMPLITUDE * 10.0 + 1e-5);
        assert!(vertical.abs() <= DRIFT_AMPLITUDE * BOB_RATIO * 10.0 + 1e-5);
    }
}

// ---- Hit test ----

fn spawn_sphere(world: &mut World, id: u32, position: Vec3, alive: bool) {
    world.spawn((
        Target { id },
        Alive(alive),
        Placement {
            bearing: 0.0,
            elevation: 0.0,
            distance: position.length(),
            drift_phase: 0.0,
        },
        Pose { position, spin: 0.0 },
        Visual {
            handle: VisualHandle(id as u64),
            shape: TargetShape::Sphere,
            color: 0,
        },
    ));
}

#[test]
fn test_hit_test_uses_ray_parameter_not_absolute_distance() {
    let mut world = World::new();
    // Centred on the ray, slightly farther away.
    spawn_sphere(&mut world, 0, Vec3::new(0.0, 0.0, -5.0), true);
    // Closer to the viewer but grazed off-axis, so entered later along the ray.
    spawn_sphere(&mut world, 1, Vec3::new(0.55, 0.0, -4.9), true);

    let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z).unwrap();
    let hit = hit_test::cast(&world, &ray, 1.0).unwrap();
    assert_eq!(hit.target_id, 0);
    assert!((hit.t - 4.4).abs() < 1e-4);
}

#[test]
fn test_hit_test_skips_dead_targets() {
    let mut world = World::new();
    spawn_sphere(&mut world, 0, Vec3::new(0.0, 0.0, -3.0), false);
    spawn_sphere(&mut world, 1, Vec3::new(0.0, 0.0, -9.0), true);

    let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z).unwrap();
    assert_eq!(hit_test::cast(&world, &ray, 1.0).unwrap().target_id, 1);

    let up = Ray::new(Vec3::ZERO, Vec3::Y).unwrap();
    assert!(hit_test::cast(&world, &up, 1.0).is_none());
}

// ---- Respawn queue ----

#[test]
fn test_respawn_queue_due_order_and_cancel() {
    let mut world = World::new();
    let a = world.spawn((Target { id: 0 },));
    let b = world.spawn((Target { id: 1 },));
    let c = world.spawn((Target { id: 2 },));

    let mut queue = RespawnQueue::default();
    queue.schedule(a, 0, 2.0);
    queue.schedule(b, 1, 1.0);
    queue.schedule(c, 2, 5.0);
    // Rescheduling replaces the earlier timer.
    queue.schedule(a, 0, 1.5);
    assert_eq!(queue.len(), 3);

    let due = queue.take_due(2.0);
    assert_eq!(
        due.iter().map(|p| p.target_id).collect::<Vec<_>>(),
        vec![1, 0]
    );
    assert_eq!(queue.len(), 1);

    assert_eq!(queue.cancel_all(), 1);
    assert!(queue.is_empty());
    assert!(queue.take_due(100.0).is_empty());
}
