//! Runtime configuration for a game instance.
//!
//! Every field defaults to the matching value in [`constants`](crate::constants),
//! so a JSON file only needs to list the values it overrides.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

/// Errors produced while loading or validating a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("`{field}` must be a finite positive number, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("`{field}` must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f32 },
    #[error("`min_distance` ({min_distance}) must be below `spawn_radius` ({spawn_radius})")]
    DamageRangeOutsideSpawn { min_distance: f32, spawn_radius: f32 },
    #[error("`spawn_near_factor` must be in (0, 1], got {0}")]
    SpawnNearFactor(f32),
    #[error("`elevation_min` ({min}) must not exceed `elevation_max` ({max})")]
    ElevationRange { min: f32, max: f32 },
    #[error("`field_of_view_deg` must be in (0, 180), got {0}")]
    FieldOfView(f32),
    #[error("`{0}` must be at least 1")]
    Zero(&'static str),
}

/// All tunables read at engine construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub pool_size: usize,
    pub spawn_radius: f32,
    pub spawn_near_factor: f32,
    pub elevation_min: f32,
    pub elevation_max: f32,
    /// Distance removed per frame.
    pub approach_speed: f32,
    pub drift_speed: f32,
    pub drift_amplitude: f32,
    pub bob_ratio: f32,
    pub spin_per_frame: f32,
    pub min_distance: f32,
    pub damage_cooldown_ms: u64,
    pub respawn_delay_ms: u64,
    pub max_health: u32,
    pub score_per_kill: u32,
    pub hit_radius_scale: f32,
    pub field_of_view_deg: f32,
    pub eye_height: f32,
    pub max_frame_delta_secs: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pool_size: ENEMY_COUNT,
            spawn_radius: SPAWN_RADIUS,
            spawn_near_factor: SPAWN_NEAR_FACTOR,
            elevation_min: ELEVATION_MIN,
            elevation_max: ELEVATION_MAX,
            approach_speed: APPROACH_SPEED,
            drift_speed: DRIFT_SPEED,
            drift_amplitude: DRIFT_AMPLITUDE,
            bob_ratio: BOB_RATIO,
            spin_per_frame: SPIN_PER_FRAME,
            min_distance: MIN_DISTANCE,
            damage_cooldown_ms: DAMAGE_COOLDOWN_MS,
            respawn_delay_ms: RESPAWN_DELAY_MS,
            max_health: MAX_HEALTH,
            score_per_kill: SCORE_PER_KILL,
            hit_radius_scale: HIT_RADIUS_SCALE,
            field_of_view_deg: FIELD_OF_VIEW_DEG,
            eye_height: VIEWER_EYE_HEIGHT,
            max_frame_delta_secs: MAX_FRAME_DELTA_SECS,
        }
    }
}

impl GameConfig {
    /// Parse a JSON document and validate the result.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values describe a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("spawn_radius", self.spawn_radius as f64),
            ("approach_speed", self.approach_speed as f64),
            ("min_distance", self.min_distance as f64),
            ("hit_radius_scale", self.hit_radius_scale as f64),
            ("max_frame_delta_secs", self.max_frame_delta_secs),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let finite = [
            ("elevation_min", self.elevation_min),
            ("elevation_max", self.elevation_max),
            ("drift_speed", self.drift_speed),
            ("drift_amplitude", self.drift_amplitude),
            ("bob_ratio", self.bob_ratio),
            ("spin_per_frame", self.spin_per_frame),
            ("eye_height", self.eye_height),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        if self.min_distance >= self.spawn_radius {
            return Err(ConfigError::DamageRangeOutsideSpawn {
                min_distance: self.min_distance,
                spawn_radius: self.spawn_radius,
            });
        }
        if !(self.spawn_near_factor > 0.0 && self.spawn_near_factor <= 1.0) {
            return Err(ConfigError::SpawnNearFactor(self.spawn_near_factor));
        }
        // The span must be representable for uniform sampling.
        if self.elevation_min > self.elevation_max
            || !(self.elevation_max - self.elevation_min).is_finite()
        {
            return Err(ConfigError::ElevationRange {
                min: self.elevation_min,
                max: self.elevation_max,
            });
        }
        if !(self.field_of_view_deg > 0.0 && self.field_of_view_deg < 180.0) {
            return Err(ConfigError::FieldOfView(self.field_of_view_deg));
        }
        if self.max_health == 0 {
            return Err(ConfigError::Zero("max_health"));
        }
        if self.pool_size == 0 {
            return Err(ConfigError::Zero("pool_size"));
        }
        Ok(())
    }

    /// Damage cooldown in seconds.
    pub fn damage_cooldown_secs(&self) -> f64 {
        self.damage_cooldown_ms as f64 / 1000.0
    }

    /// Respawn delay in seconds.
    pub fn respawn_delay_secs(&self) -> f64 {
        self.respawn_delay_ms as f64 / 1000.0
    }

    /// Nearest distance an initial spawn may be placed at.
    pub fn spawn_near_radius(&self) -> f32 {
        self.spawn_radius * self.spawn_near_factor
    }
}
