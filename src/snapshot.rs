//! Read-only frame data for the renderer
//!
//! Captured after the frame's ticks have run. All positions are already in
//! screen space, so a renderer only has to draw what it is given.

use serde::Serialize;

use crate::animation::{AnimationKind, PlayerAnimation};
use crate::consts::*;
use crate::sim::GameState;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    /// Hitbox top-left
    pub x: f64,
    pub y: f64,
    /// Sprite top-left, centred on the hitbox
    pub sprite_x: f64,
    pub sprite_y: f64,
    pub sprite_size: f64,
    pub animation: AnimationKind,
    pub frame: usize,
    pub facing_left: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformView {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub visited: bool,
    pub reveal_progress: f64,
    pub sprite_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloudView {
    pub x: f64,
    pub y: f64,
    pub variant: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodeView {
    /// Label centre
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub alpha: f64,
}

/// Axis-aligned box for the debug overlay
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hitbox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub camera_x: f64,
    pub score: u32,
    pub game_over: bool,
    pub bot: bool,
    pub player: PlayerView,
    pub platforms: Vec<PlatformView>,
    pub clouds: Vec<CloudView>,
    pub geocodes: Vec<GeocodeView>,
    /// Only filled in debug mode
    pub hitboxes: Vec<Hitbox>,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState, animation: &PlayerAnimation) -> Self {
        let camera_x = state.camera_x;
        let player = &state.player;
        let sprite_offset = (PLAYER_SPRITE_SIZE - player.width) / 2.0;

        let platforms = state
            .platforms
            .iter()
            .map(|p| PlatformView {
                x: p.left() - camera_x,
                y: p.top(),
                width: p.width,
                visited: p.visited,
                reveal_progress: p.reveal_progress(),
                sprite_index: p.sprite_index(),
            })
            .collect();

        let clouds = state
            .clouds
            .iter()
            .map(|c| CloudView {
                x: c.screen_x(camera_x),
                y: c.pos.y,
                variant: c.variant,
            })
            .collect();

        let geocodes = state
            .geocodes
            .iter()
            .map(|g| GeocodeView {
                x: g.pos.x - camera_x,
                y: g.pos.y,
                text: g.text.clone(),
                alpha: g.alpha(),
            })
            .collect();

        let hitboxes = if state.debug {
            std::iter::once(Hitbox {
                x: player.left() - camera_x,
                y: player.pos.y,
                width: player.width,
                height: player.height,
            })
            .chain(state.platforms.iter().map(|p| Hitbox {
                x: p.left() - camera_x,
                y: p.top(),
                width: p.width,
                height: SCREEN_HEIGHT - p.top(),
            }))
            .collect()
        } else {
            Vec::new()
        };

        Self {
            camera_x,
            score: state.score,
            game_over: state.game_over,
            bot: state.bot,
            player: PlayerView {
                x: player.left() - camera_x,
                y: player.pos.y,
                sprite_x: player.left() - camera_x - sprite_offset,
                sprite_y: player.bottom() - PLAYER_SPRITE_SIZE,
                sprite_size: PLAYER_SPRITE_SIZE,
                animation: animation.kind,
                frame: animation.frame,
                facing_left: animation.facing_left,
            },
            platforms,
            clouds,
            geocodes,
            hitboxes,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_is_screen_space() {
        let mut state = GameState::new(31);
        state.camera_x = 100.0;
        state.player.pos.x = 420.0;
        let snapshot = RenderSnapshot::capture(&state, &PlayerAnimation::default());

        assert_eq!(snapshot.player.x, 320.0);
        assert_eq!(snapshot.player.sprite_x, 315.0);
        assert_eq!(snapshot.platforms.len(), state.platforms.len());
        assert_eq!(snapshot.platforms[0].x, state.platforms[0].left() - 100.0);
        assert!(snapshot.hitboxes.is_empty());
    }

    #[test]
    fn test_debug_adds_hitboxes() {
        let mut state = GameState::new(31);
        state.debug = true;
        let snapshot = RenderSnapshot::capture(&state, &PlayerAnimation::default());
        assert_eq!(snapshot.hitboxes.len(), state.platforms.len() + 1);
    }

    #[test]
    fn test_serializes() {
        let state = GameState::new(31);
        let json = RenderSnapshot::capture(&state, &PlayerAnimation::default())
            .to_json()
            .unwrap();
        assert!(json.contains("\"score\":0"));
        assert!(json.contains("\"animation\":\"Idle\""));
    }
}
