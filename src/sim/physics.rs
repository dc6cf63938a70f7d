//! Player movement and collision resolution
//!
//! The player state machine (grounded, ascending, descending) is never
//! stored; it is read off `is_jumping` and the sign of `vel.y` each frame.
//!
//! Landing is a discrete one-frame sweep: the bottom edge must be at or past
//! the rooftop now and at or above it before this frame's vertical step.
//! That holds as long as a single frame of fall is shorter than a building,
//! which the gravity constants keep true by a wide margin.

use super::state::{GameState, Platform, Player};
use crate::consts::*;

/// Tolerance for "bottom edge exactly on the roof"
const GROUNDED_EPSILON: f64 = 1e-6;

/// Horizontal input direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    /// Direction from held keys. Left wins when both are held.
    pub fn from_held(left: bool, right: bool) -> Option<Self> {
        if left {
            Some(Direction::Left)
        } else if right {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

/// Push horizontal velocity toward `direction`.
///
/// Opposing velocity is zeroed first. The increment never carries the speed
/// past `max_speed`, so the cap holds without clamping afterwards.
pub fn accelerate(player: &mut Player, direction: Direction) {
    let sign = direction.sign();
    let max_speed = player.stats.max_speed;

    if player.vel.x * sign < 0.0 {
        player.vel.x = 0.0;
    }
    let speed_along = player.vel.x * sign;
    if speed_along < max_speed {
        player.vel.x += sign * player.stats.acceleration.min(max_speed - speed_along);
    }
}

/// Friction when no direction is held
pub fn decay(player: &mut Player) {
    player.vel.x *= SPEED_DECAY;
}

/// Apply input (or decay) and move horizontally
pub fn horizontal_step(player: &mut Player, direction: Option<Direction>) {
    player.prev_pos.x = player.pos.x;
    match direction {
        Some(direction) => accelerate(player, direction),
        None => decay(player),
    }
    player.pos.x += player.vel.x;
}

/// Gravity tier for the current vertical velocity
pub fn gravity_for(vel_y: f64, holding: bool) -> f64 {
    if holding && vel_y < 0.0 {
        GRAVITY_LIGHT
    } else if vel_y > 0.0 {
        GRAVITY_HEAVY
    } else {
        GRAVITY_DEFAULT
    }
}

/// Integrate gravity and move vertically
pub fn vertical_step(player: &mut Player, holding: bool) {
    player.prev_pos.y = player.pos.y;
    player.vel.y += gravity_for(player.vel.y, holding);
    player.pos.y += player.vel.y;
}

/// Resting on `platform`: not jumping, no vertical speed, feet on the roof
pub fn is_grounded_on(player: &Player, platform: &Platform) -> bool {
    !player.is_jumping
        && player.vel.y == 0.0
        && player.overlaps_x(platform)
        && (player.bottom() - platform.top()).abs() < GROUNDED_EPSILON
}

/// Index of the platform the player is resting on, if any
pub fn standing_on(player: &Player, platforms: &[Platform]) -> Option<usize> {
    platforms.iter().position(|p| is_grounded_on(player, p))
}

/// Jump if grounded. Returns whether the jump happened.
pub fn try_jump(player: &mut Player, platforms: &[Platform]) -> bool {
    if standing_on(player, platforms).is_none() {
        return false;
    }
    player.vel.y = player.stats.jump_force;
    player.is_jumping = true;
    true
}

/// Bottom edge crossed the roof during this frame's vertical step
pub fn crossed_surface(player: &Player, platform: &Platform) -> bool {
    player.overlaps_x(platform)
        && player.bottom() >= platform.top()
        && player.prev_pos.y + player.height <= platform.top()
}

fn land_on(player: &mut Player, platform: &Platform) {
    player.pos.y = platform.top() - player.height;
    player.vel.y = 0.0;
    player.is_jumping = false;
    player.light_gravity_frames = 0;
}

/// Stop the player at a wall it crossed since the previous frame
fn resolve_side(player: &mut Player, platform: &Platform) {
    if player.bottom() <= platform.top() {
        return;
    }
    let prev_left = player.prev_pos.x;
    let prev_right = prev_left + player.width;

    if prev_right <= platform.left() && player.right() > platform.left() {
        player.pos.x = platform.left() - player.width;
        player.vel.x = 0.0;
    } else if prev_left >= platform.right() && player.left() < platform.right() {
        player.pos.x = platform.right();
        player.vel.x = 0.0;
    }
}

/// Landing then side resolution against every live platform.
///
/// Returns indices of rooftops visited for the first time this frame; score
/// has already been credited for them.
pub fn resolve_collisions(state: &mut GameState) -> Vec<usize> {
    let mut newly_visited = Vec::new();
    let player = &mut state.player;

    for (index, platform) in state.platforms.iter_mut().enumerate() {
        if crossed_surface(player, platform) {
            land_on(player, platform);
            if !platform.visited {
                platform.visited = true;
                state.score += 1;
                newly_visited.push(index);
            }
        }
        resolve_side(player, platform);
    }

    newly_visited
}

/// Keep the hitbox inside the visible screen
pub fn clamp_to_screen(player: &mut Player, camera_x: f64) {
    let max_x = camera_x + SCREEN_WIDTH - player.width;
    player.pos.x = player.pos.x.max(camera_x).min(max_x);
}

/// Centre on the player without backing up past the oldest live rooftop
pub fn follow_camera(state: &mut GameState) {
    let centred = state.player.pos.x - SCREEN_WIDTH / 2.0 + state.player.width / 2.0;
    let floor = state.first_platform().left() - state.player.width;
    state.camera_x = centred.max(floor).max(0.0);
}

/// Fallen too far below the screen to recover
pub fn has_fallen(player: &Player) -> bool {
    player.pos.y >= SCREEN_HEIGHT * 2.0
}
