//! Geocode Jumper - A rooftop-hopping side scroller
//!
//! Core modules:
//! - `sim`: Deterministic simulation (generation, physics, bot, game loop)
//! - `animation`: Player sprite animation state machine
//! - `snapshot`: Read-only frame data handed to the renderer
//! - `share`: Score summary and clipboard boundary
//! - `settings`: Session configuration
//! - `audio`: Sound effects for simulation events

pub mod animation;
pub mod audio;
pub mod settings;
pub mod share;
pub mod sim;
pub mod snapshot;

pub use settings::Settings;
pub use snapshot::RenderSnapshot;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (the physics constants are per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Logical screen dimensions
    pub const SCREEN_WIDTH: f64 = 640.0;
    pub const SCREEN_HEIGHT: f64 = 480.0;

    /// Player hitbox, narrower than the sprite
    pub const PLAYER_WIDTH: f64 = 30.0;
    pub const PLAYER_HEIGHT: f64 = 40.0;
    /// Square sprite drawn centred on the hitbox
    pub const PLAYER_SPRITE_SIZE: f64 = 40.0;

    /// Starting stats
    pub const STARTING_JUMP_FORCE: f64 = -12.0;
    pub const STARTING_PLAYER_ACCELERATION: f64 = 0.35;
    pub const STARTING_MAX_PLAYER_SPEED: f64 = 5.0;
    /// Horizontal velocity multiplier applied when no direction is held
    pub const SPEED_DECAY: f64 = 0.8;

    /// Gravity while ascending with jump held
    pub const GRAVITY_LIGHT: f64 = 0.2;
    pub const GRAVITY_DEFAULT: f64 = 0.5;
    /// Gravity while descending
    pub const GRAVITY_HEAVY: f64 = 0.6;

    /// Platform generation
    pub const PLATFORM_SPACING: f64 = 150.0;
    pub const SPACING_JITTER: i32 = 50;
    pub const MAX_Y_DELTA_TOP: f64 = 120.0;
    /// Smallest allowed platform top (tallest building)
    pub const MAX_PLATFORM_HEIGHT: f64 = 150.0;
    /// Minimum building height above the bottom of the screen
    pub const MINIMUM_PLATFORM_HEIGHT: f64 = 60.0;
    /// Candidate widths, easiest first
    pub const PLATFORM_WIDTHS: [f64; 5] = [175.0, 150.0, 125.0, 100.0, 75.0];
    pub const STARTING_PLATFORM_WIDTH: f64 = 175.0;
    pub const STARTING_PLATFORM_Y: f64 = SCREEN_HEIGHT - 300.0;
    /// Frames for the visited-rooftop reveal animation
    pub const REVEAL_FRAMES: u32 = 10;

    /// Bot planning
    pub const BOT_MAX_HOLD_FRAMES: u32 = 30;
    pub const BOT_RUNWAY_MARGIN: f64 = 50.0;

    /// Scenery
    pub const CLOUD_WIDTH: f64 = 120.0;
    pub const CLOUD_SPEEDS: [f64; 3] = [0.2, 0.35, 0.5];
    pub const CLOUD_MIN_Y: f64 = 20.0;
    pub const CLOUD_MAX_Y: f64 = 140.0;
    pub const CLOUD_MIN_GAP: f64 = 180.0;
    pub const CLOUD_MAX_GAP: f64 = 360.0;
    pub const CLOUD_SPAWN_MARGIN: f64 = 200.0;
    pub const GEOCODE_START_OPACITY: i32 = 300;
    pub const GEOCODE_FADE_PER_FRAME: i32 = 4;
    /// Height of the geocode label above the rooftop
    pub const GEOCODE_RISE: f64 = 30.0;
}
