//! Gameplay constants and tuning parameters.
//!
//! These are the defaults for [`GameConfig`](crate::config::GameConfig).
//! Distances are in scene units (roughly meters), angles in radians unless
//! the name says otherwise.

// --- Target pool ---

/// Number of targets in the fixed pool (`ENEMY_COUNT`).
pub const ENEMY_COUNT: usize = 6;

// --- Spawn geometry ---

/// Radial distance at which targets (re)spawn.
pub const SPAWN_RADIUS: f32 = 30.0;

/// Initial spawns are drawn from `[SPAWN_RADIUS * SPAWN_NEAR_FACTOR, SPAWN_RADIUS]`.
pub const SPAWN_NEAR_FACTOR: f32 = 0.7;

/// Lower bound of the normalized elevation factor.
pub const ELEVATION_MIN: f32 = -0.1;

/// Upper bound of the normalized elevation factor.
pub const ELEVATION_MAX: f32 = 0.3;

// --- Motion ---

/// Distance removed from every alive target per frame.
/// Fixed per frame, not scaled by frame delta.
pub const APPROACH_SPEED: f32 = 0.05;

/// Angular speed of the lateral drift oscillation (rad/s).
pub const DRIFT_SPEED: f32 = 1.5;

/// Lateral drift amplitude as a fraction of current distance.
pub const DRIFT_AMPLITUDE: f32 = 0.05;

/// Vertical bob amplitude relative to the drift amplitude.
pub const BOB_RATIO: f32 = 0.4;

/// Visual spin applied per frame (radians) for "aliveness" feedback.
pub const SPIN_PER_FRAME: f32 = 0.02;

/// Longest frame delta the simulation clock will accept (seconds).
pub const MAX_FRAME_DELTA_SECS: f64 = 0.1;

// --- Damage ---

/// Distance at which an alive target is in damage range.
pub const MIN_DISTANCE: f32 = 2.0;

/// Global cooldown between two damage events (milliseconds).
pub const DAMAGE_COOLDOWN_MS: u64 = 1000;

/// Player health at game start.
pub const MAX_HEALTH: u32 = 5;

// --- Scoring ---

/// Score awarded per killed target.
pub const SCORE_PER_KILL: u32 = 10;

/// Delay between a kill and the respawn of that pool slot (milliseconds).
pub const RESPAWN_DELAY_MS: u64 = 600;

// --- Hit testing ---

/// Multiplier applied to each shape's nominal bounding radius.
pub const HIT_RADIUS_SCALE: f32 = 1.0;

// --- Viewer ---

/// Vertical field of view (degrees).
pub const FIELD_OF_VIEW_DEG: f32 = 75.0;

/// Near clip plane.
pub const NEAR_PLANE: f32 = 0.1;

/// Far clip plane.
pub const FAR_PLANE: f32 = 1000.0;

/// Eye height of the viewer above the scene origin.
pub const VIEWER_EYE_HEIGHT: f32 = 0.0;

/// Pitch limit for aiming, just short of straight up/down.
pub const MAX_PITCH: f32 = 89.0 * std::f32::consts::PI / 180.0;

// --- Host ---

/// Nominal display refresh driving the frame loop (Hz).
pub const FRAME_RATE: u32 = 60;

/// Default seed for the simulation RNG.
pub const DEFAULT_SEED: u64 = 42;
