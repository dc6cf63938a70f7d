//! Game state and core simulation types
//!
//! Everything a single session mutates lives on [`GameState`]; session flags
//! such as bot mode and debug are plain fields rather than globals.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::generator;
use super::rng::RandomStream;
use super::scenery;
use crate::consts::*;

/// Movement tuning carried by the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    /// Vertical impulse on jump (negative is up)
    pub jump_force: f64,
    /// Horizontal acceleration per frame
    pub acceleration: f64,
    /// Horizontal speed cap
    pub max_speed: f64,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            jump_force: STARTING_JUMP_FORCE,
            acceleration: STARTING_PLAYER_ACCELERATION,
            max_speed: STARTING_MAX_PLAYER_SPEED,
        }
    }
}

/// Where the player appears at session start
pub fn player_spawn() -> DVec2 {
    DVec2::new(SCREEN_WIDTH / 2.0 - PLAYER_WIDTH / 2.0, 0.0)
}

/// The player character. `pos` is the top-left corner of the hitbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: DVec2,
    pub vel: DVec2,
    pub is_jumping: bool,
    pub width: f64,
    pub height: f64,
    pub stats: Stats,
    /// Position before this frame's horizontal (x) and vertical (y) steps
    pub prev_pos: DVec2,
    /// Light-gravity frames left in the bot's planned jump
    pub light_gravity_frames: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(Stats::default())
    }
}

impl Player {
    pub fn new(stats: Stats) -> Self {
        Self {
            pos: player_spawn(),
            vel: DVec2::ZERO,
            is_jumping: false,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            stats,
            prev_pos: player_spawn(),
            light_gravity_frames: 0,
        }
    }

    /// Put the player back at the spawn point at rest. Stats are kept.
    pub fn reset(&mut self) {
        *self = Self::new(self.stats);
    }

    pub fn left(&self) -> f64 {
        self.pos.x
    }

    pub fn right(&self) -> f64 {
        self.pos.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.pos.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.pos.x + self.width / 2.0
    }

    /// Horizontal spans overlap (touching edges do not count)
    pub fn overlaps_x(&self, platform: &Platform) -> bool {
        self.right() > platform.left() && self.left() < platform.right()
    }
}

/// A rooftop. `pos` is the top-left of its visual footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub pos: DVec2,
    pub width: f64,
    /// Set once, on the first landing
    pub visited: bool,
    pub frames_since_visited: u32,
}

impl Platform {
    pub fn new(x: f64, y: f64, width: f64) -> Self {
        Self {
            pos: DVec2::new(x, y),
            width,
            visited: false,
            frames_since_visited: 0,
        }
    }

    pub fn left(&self) -> f64 {
        self.pos.x
    }

    pub fn right(&self) -> f64 {
        self.pos.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.pos.y
    }

    pub fn center_x(&self) -> f64 {
        self.pos.x + self.width / 2.0
    }

    /// Building sprite for this width (0 = narrowest)
    pub fn sprite_index(&self) -> usize {
        ((self.width - 75.0) / 25.0).round().max(0.0) as usize
    }

    /// Reveal animation progress in [0, 1]
    pub fn reveal_progress(&self) -> f64 {
        if !self.visited {
            return 0.0;
        }
        f64::from(self.frames_since_visited.min(REVEAL_FRAMES)) / f64::from(REVEAL_FRAMES)
    }

    pub fn tick_reveal(&mut self) {
        if self.visited && self.frames_since_visited < REVEAL_FRAMES {
            self.frames_since_visited += 1;
        }
    }
}

/// Background cloud with its own parallax speed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: DVec2,
    /// Fraction of camera motion this cloud follows
    pub speed: f64,
    pub variant: u8,
}

impl Cloud {
    pub fn screen_x(&self, camera_x: f64) -> f64 {
        self.pos.x - camera_x * self.speed
    }
}

/// Fading coordinate label spawned over a newly visited rooftop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeMarker {
    /// Centre of the label in world space
    pub pos: DVec2,
    pub text: String,
    /// Starts above 255 so the label holds full strength for a moment
    pub opacity: i32,
}

impl GeocodeMarker {
    pub fn alpha(&self) -> f64 {
        f64::from(self.opacity.clamp(0, 255)) / 255.0
    }
}

/// Things that happened during a tick, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player left the ground
    Jump,
    /// First landing on a rooftop
    NewRooftop { score: u32, pos: DVec2 },
    GameOver { score: u32 },
    /// Bot mode switched on or off
    BotToggled { enabled: bool },
    Restarted,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub rng: RandomStream,
    pub player: Player,
    /// Live platform window, ordered by increasing x
    pub platforms: Vec<Platform>,
    pub clouds: Vec<Cloud>,
    pub geocodes: Vec<GeocodeMarker>,
    pub score: u32,
    pub camera_x: f64,
    pub game_over: bool,
    /// Autopilot drives the player
    pub bot: bool,
    pub debug: bool,
    /// Simulation tick counter for this session
    pub time_ticks: u64,
    /// Pending events since the host last drained them
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_stats(seed, Stats::default())
    }

    pub fn with_stats(seed: u64, stats: Stats) -> Self {
        let mut state = Self {
            rng: RandomStream::new(seed),
            player: Player::new(stats),
            platforms: Vec::new(),
            clouds: Vec::new(),
            geocodes: Vec::new(),
            score: 0,
            camera_x: 0.0,
            game_over: false,
            bot: false,
            debug: false,
            time_ticks: 0,
            events: Vec::new(),
        };
        state.platforms = generator::initial_platforms(&mut state.rng);
        state.clouds = scenery::seed_clouds(&mut state.rng);
        state
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn first_platform(&self) -> &Platform {
        self.platforms
            .first()
            .expect("platform window is never empty")
    }

    pub fn last_platform(&self) -> &Platform {
        self.platforms
            .last()
            .expect("platform window is never empty")
    }

    /// Put the player back at spawn and the camera at the origin
    pub fn reset_player(&mut self) {
        self.player.reset();
        self.camera_x = 0.0;
    }

    /// Take all events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
