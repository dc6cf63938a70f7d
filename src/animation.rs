//! Player sprite animation
//!
//! Reads the player's velocity and jump flag after each tick; never touches
//! physics.

use serde::{Deserialize, Serialize};

use crate::sim::Player;

/// Horizontal speed at which the idle loop switches to running
const RUN_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationKind {
    #[default]
    Idle,
    Running,
    Jumping,
}

impl AnimationKind {
    /// Frames in the sprite strip
    pub fn frame_count(self) -> usize {
        match self {
            AnimationKind::Idle => 2,
            AnimationKind::Running | AnimationKind::Jumping => 8,
        }
    }

    /// Ticks each frame is held for
    pub fn ticks_per_frame(self) -> u32 {
        match self {
            AnimationKind::Idle => 24,
            AnimationKind::Running => 6,
            AnimationKind::Jumping => 9,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerAnimation {
    pub kind: AnimationKind,
    pub frame: usize,
    ticks: u32,
    pub facing_left: bool,
}

impl PlayerAnimation {
    /// Advance one tick, switching state from the player's motion
    pub fn update(&mut self, player: &Player) {
        let next = match self.kind {
            _ if player.is_jumping => AnimationKind::Jumping,
            AnimationKind::Jumping => AnimationKind::Running,
            _ if player.vel.x.abs() >= RUN_THRESHOLD => AnimationKind::Running,
            _ => AnimationKind::Idle,
        };

        if player.vel.x < 0.0 {
            self.facing_left = true;
        } else if player.vel.x > 0.0 {
            self.facing_left = false;
        }

        if next != self.kind {
            self.kind = next;
            self.frame = 0;
            self.ticks = 0;
            return;
        }

        self.ticks += 1;
        if self.ticks >= self.kind.ticks_per_frame() {
            self.ticks = 0;
            self.frame = (self.frame + 1) % self.kind.frame_count();
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
