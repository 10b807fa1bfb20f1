//! Simulation constants and tuning parameters.

/// Nominal frame rate (Hz).
pub const FPS: u32 = 60;

/// Seconds per frame at the nominal frame rate.
pub const DT: f64 = 1.0 / FPS as f64;

// --- Unit base values (capability = rate × base) ---

/// Base top speed (world units per second).
pub const UNIT_SPEED: f64 = 50.0;

/// Base acceleration (world units per second²).
pub const UNIT_ACC: f64 = 100.0;

/// Base health.
pub const UNIT_HEALTH: f64 = 100.0;

/// Base hull turn rate (degrees per second).
pub const UNIT_ANGULAR_SPEED: f64 = 100.0;

/// Base turret turn rate (degrees per second).
pub const UNIT_TURRET_ANGULAR_SPEED: f64 = 100.0;

/// Default ammo switch duration (seconds).
pub const UNIT_AMMO_SWITCH_TIME: f64 = 0.5;

/// Default tank footprint when no body image is available.
pub const TANK_WIDTH: f64 = 40.0;
pub const TANK_HEIGHT: f64 = 40.0;

/// Distance past the hull edge at which shells spawn.
pub const MUZZLE_OFFSET: f64 = 5.0;

// --- Projectile base values ---

/// Base projectile speed (world units per second).
pub const BULLET_SPEED: f64 = 500.0;

/// Base projectile damage.
pub const BULLET_DAMAGE: f64 = 10.0;

/// Default projectile lifetime (seconds).
pub const BULLET_LIFETIME: f64 = 3.0;

/// How long an explosion stays on display after detonation (seconds).
pub const EXPLOSION_DISPLAY_SECS: f64 = 0.5;

// --- Player control ---

/// Minimum interval between player shots (seconds).
pub const PLAYER_FIRE_COOLDOWN: f64 = 0.2;

// --- Combat AI ---

/// Distance within which an AI sees its target (no occlusion test).
pub const AI_SIGHT_RANGE: f64 = 300.0;

/// Preferred distance to the target in Attack.
pub const AI_IDEAL_DISTANCE: f64 = 150.0;

/// Half-width of the standoff band around `AI_IDEAL_DISTANCE`.
pub const AI_STANDOFF_TOLERANCE: f64 = 50.0;

/// Heading error below which the AI stops turning (degrees).
pub const AI_TURN_DEADBAND_DEG: f64 = 15.0;

/// Turret error below which the AI may fire (degrees).
pub const AI_FIRE_ALIGNMENT_DEG: f64 = 20.0;

/// Distance at which a patrol point counts as reached.
pub const AI_PATROL_ARRIVE_DISTANCE: f64 = 20.0;

/// Number of patrol points generated around the spawn point.
pub const AI_PATROL_POINT_COUNT: usize = 4;

/// Patrol point radius range around spawn.
pub const AI_PATROL_RADIUS_MIN: f64 = 100.0;
pub const AI_PATROL_RADIUS_MAX: f64 = 200.0;

/// Patrol points are kept this far inside the map edge.
pub const AI_PATROL_EDGE_MARGIN: f64 = 50.0;

/// Bounds used for patrol clamping when no map size is supplied.
pub const AI_DEFAULT_WORLD_SIZE: f64 = 1000.0;

/// Range of the randomized state re-roll interval (seconds).
pub const AI_STATE_INTERVAL_MIN: f64 = 3.0;
pub const AI_STATE_INTERVAL_MAX: f64 = 8.0;

/// Range of the randomized fire cooldown (seconds).
pub const AI_FIRE_COOLDOWN_MIN: f64 = 1.0;
pub const AI_FIRE_COOLDOWN_MAX: f64 = 2.0;

/// State weights (Patrol, Attack, Retreat) while the target is visible.
pub const AI_WEIGHTS_VISIBLE: [f64; 3] = [0.2, 0.7, 0.1];

/// State weights (Patrol, Attack, Retreat) while the target is not visible.
pub const AI_WEIGHTS_HIDDEN: [f64; 3] = [0.7, 0.2, 0.1];

// --- Map ---

/// Default tile edge length in world units.
pub const DEFAULT_TILE_SIZE: u32 = 64;

// --- Persistence ---

pub const DEFAULT_MAP_DIR: &str = "maps/saved";
pub const DEFAULT_UNIT_DIR: &str = "units/saved";
pub const DEFAULT_PROJECTILE_DIR: &str = "projectiles/saved";

/// Filename prefix for auto-numbered map saves (`default_map0.txt`, ...).
pub const DEFAULT_MAP_PREFIX: &str = "default_map";
