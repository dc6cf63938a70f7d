//! Fixed timestep simulation tick
//!
//! Core game loop that advances a session by one frame. Step order matters:
//! input, horizontal move, jump, gravity, landing and walls, screen clamp,
//! camera, platform window, scenery, then the fall check.

use super::bot;
use super::generator;
use super::physics::{self, Direction};
use super::scenery;
use super::state::{GameEvent, GameState};

/// Input flags for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held keys
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Restart after game over (one-shot)
    pub restart: bool,
    /// Flip bot mode (one-shot)
    pub toggle_bot: bool,
    /// Flip debug logging (one-shot)
    pub toggle_debug: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.toggle_bot {
        set_bot(state, !state.bot);
    }
    if input.toggle_debug {
        state.debug = !state.debug;
        log::info!("Debug mode: {}", state.debug);
    }

    // Frozen until restarted
    if state.game_over {
        if input.restart {
            // Dying before even reaching the first rooftop hands control to the bot
            if state.player.pos.x < generator::starting_platform().left() && !state.bot {
                set_bot(state, true);
            }
            start_over(state);
        }
        return;
    }

    state.time_ticks += 1;

    let (direction, jump, hold_frames) = if state.bot {
        let command = bot::decide(state);
        (command.direction, command.jump, command.hold_frames)
    } else {
        (Direction::from_held(input.left, input.right), input.jump, 0)
    };

    physics::horizontal_step(&mut state.player, direction);

    if jump && physics::try_jump(&mut state.player, &state.platforms) {
        state.player.light_gravity_frames = hold_frames;
        state.events.push(GameEvent::Jump);
    }

    let player = &mut state.player;
    let holding = if player.light_gravity_frames > 0 {
        player.light_gravity_frames -= 1;
        true
    } else {
        !state.bot && input.jump && player.is_jumping
    };
    physics::vertical_step(player, holding);

    for index in physics::resolve_collisions(state) {
        let pos = state.platforms[index].pos;
        state.events.push(GameEvent::NewRooftop {
            score: state.score,
            pos,
        });
        scenery::spawn_geocode(state, index);
    }

    physics::clamp_to_screen(&mut state.player, state.camera_x);
    physics::follow_camera(state);

    generator::maintain_window(state);
    scenery::maintain_clouds(state);
    scenery::fade_geocodes(state);
    for platform in &mut state.platforms {
        platform.tick_reveal();
    }

    if state.debug {
        log::debug!(
            "tick {}: platforms={} clouds={} pos=({:.1}, {:.1})",
            state.time_ticks,
            state.platforms.len(),
            state.clouds.len(),
            state.player.pos.x,
            state.player.pos.y
        );
    }

    if physics::has_fallen(&state.player) {
        state.game_over = true;
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!("Game over with {} rooftops", state.score);
    }
}

fn set_bot(state: &mut GameState, enabled: bool) {
    state.bot = enabled;
    state.player.light_gravity_frames = 0;
    state.events.push(GameEvent::BotToggled { enabled });
    log::info!("Bot mode: {}", enabled);
}

/// Reset the session and rebuild the opening rooftops and sky.
///
/// Bot and debug flags carry over; the random stream continues rather
/// than reseeding.
pub fn start_over(state: &mut GameState) {
    state.reset_player();
    state.platforms = generator::initial_platforms(&mut state.rng);
    state.clouds = scenery::seed_clouds(&mut state.rng);
    state.geocodes.clear();
    state.score = 0;
    state.game_over = false;
    state.time_ticks = 0;
    state.events.push(GameEvent::Restarted);
    log::info!("Session restarted (bot: {})", state.bot);
}
