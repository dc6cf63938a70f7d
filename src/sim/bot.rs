//! Autopilot
//!
//! The bot runs right toward the first unvisited rooftop and, while standing
//! on some other rooftop, looks for the shortest jump hold that brings it
//! down onto the target. Travel time assumes the player already moves at top
//! speed, so plans skew slightly early on short approaches.

use super::physics::{Direction, gravity_for, standing_on};
use super::state::{GameState, Platform, Player};
use crate::consts::*;

/// What the bot wants to do this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BotCommand {
    pub direction: Option<Direction>,
    pub jump: bool,
    /// Light-gravity frames to spend on the jump
    pub hold_frames: u32,
}

/// First live rooftop not yet visited
pub fn target_index(platforms: &[Platform]) -> Option<usize> {
    platforms.iter().position(|p| !p.visited)
}

/// Predict `(y, vel_y)` after `frames` frames of a jump launched from
/// `start_y`, holding light gravity for the first `hold` of them.
pub fn simulate_jump(start_y: f64, jump_force: f64, frames: u32, hold: u32) -> (f64, f64) {
    let mut y = start_y;
    let mut vel_y = jump_force;
    for frame in 0..frames {
        vel_y += gravity_for(vel_y, frame < hold);
        y += vel_y;
    }
    (y, vel_y)
}

/// Longest flight a plan looks ahead (ten seconds)
const MAX_PLAN_FRAMES: u32 = 600;

/// Frames until `target` is under a player leaving `from_x` at top speed
fn flight_frames(from_x: f64, target: &Platform, max_speed: f64) -> u32 {
    let frames = ((target.left() - from_x) / max_speed).max(0.0).ceil();
    (frames as u32).min(MAX_PLAN_FRAMES).saturating_add(1)
}

/// Shortest hold for a jump from `(x, y)` that comes down onto `target`
fn landing_hold(player: &Player, x: f64, y: f64, target: &Platform) -> Option<u32> {
    let frames = flight_frames(x, target, player.stats.max_speed);
    (0..BOT_MAX_HOLD_FRAMES).find(|&hold| {
        let (end_y, vel_y) = simulate_jump(y, player.stats.jump_force, frames, hold);
        end_y + player.height <= target.top() && vel_y > 0.0
    })
}

/// Whether the hop from `target` to `after` leaves no room to land late.
///
/// Finds the shortest run-up along `target` from which `after` can be
/// reached. The hop is tight when that run-up, the player and the runway
/// margin do not all fit on the roof, or when no run-up works at all.
pub fn next_hop_is_tight(player: &Player, target: &Platform, after: &Platform) -> bool {
    let y = target.top() - player.height;
    let step = player.stats.max_speed.max(1.0);
    let mut x = target.left();
    while x + player.width <= target.right() {
        if landing_hold(player, x, y, after).is_some() {
            return x - target.left() + player.width + BOT_RUNWAY_MARGIN > target.width;
        }
        x += step;
    }
    true
}

/// Shortest hold that lands on `target`, or `None` to keep walking.
///
/// A plan needing more than one hold frame is deferred while at least
/// [`BOT_RUNWAY_MARGIN`] of roof remains ahead, unless the hop after the
/// target (to `after`) is tight and the landing should come early.
pub fn plan_jump(
    player: &Player,
    current: &Platform,
    target: &Platform,
    after: Option<&Platform>,
) -> Option<u32> {
    let hold = landing_hold(player, player.left(), player.pos.y, target)?;

    let runway = current.right() - player.right();
    let tight = after.is_some_and(|after| next_hop_is_tight(player, target, after));
    if hold > 1 && runway >= BOT_RUNWAY_MARGIN && !tight {
        return None;
    }
    Some(hold)
}

/// Decide this frame's input
pub fn decide(state: &GameState) -> BotCommand {
    let player = &state.player;
    let Some(target_idx) = target_index(&state.platforms) else {
        return BotCommand::default();
    };
    let target = &state.platforms[target_idx];

    let direction = (player.center_x() < target.center_x()).then_some(Direction::Right);

    let plan = match standing_on(player, &state.platforms) {
        Some(current_idx) if current_idx != target_idx => {
            let after = state.platforms.get(target_idx + 1);
            plan_jump(player, &state.platforms[current_idx], target, after)
        }
        _ => None,
    };

    BotCommand {
        direction,
        jump: plan.is_some(),
        hold_frames: plan.unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::generator::generate_next_platform;
    use crate::sim::rng::RandomStream;
    use crate::sim::tick::{TickInput, tick};
    use glam::DVec2;
    use proptest::prelude::*;

    fn resting_on(platform: &Platform, x: f64) -> Player {
        let mut player = Player::default();
        player.pos = DVec2::new(x, platform.top() - PLAYER_HEIGHT);
        player
    }

    #[test]
    fn test_simulate_matches_integrator() {
        // Light gravity for 3 frames, then the default/heavy tiers
        let (y, vel_y) = simulate_jump(0.0, -12.0, 4, 3);
        let expected_vel = -12.0 + 0.2 * 3.0 + 0.5;
        assert!((vel_y - expected_vel).abs() < 1e-12);
        assert!(y < 0.0);
    }

    #[test]
    fn test_target_is_first_unvisited() {
        let mut platforms = vec![
            Platform::new(0.0, 300.0, 175.0),
            Platform::new(300.0, 300.0, 150.0),
            Platform::new(600.0, 300.0, 150.0),
        ];
        platforms[0].visited = true;
        assert_eq!(target_index(&platforms), Some(1));
        platforms[1].visited = true;
        platforms[2].visited = true;
        assert_eq!(target_index(&platforms), None);
    }

    #[test]
    fn test_runs_right_until_target_centre() {
        let mut state = GameState::new(11);
        state.platforms = vec![Platform::new(200.0, 300.0, 175.0)];
        state.player.pos = DVec2::new(100.0, 0.0);
        assert_eq!(decide(&state).direction, Some(Direction::Right));

        state.player.pos.x = 280.0;
        assert_eq!(decide(&state).direction, None);
    }

    #[test]
    fn test_no_jump_while_airborne() {
        let mut state = GameState::new(11);
        state.platforms[0].visited = true;
        state.player.pos = DVec2::new(380.0, 100.0);
        state.player.vel.y = 2.0;
        assert!(!decide(&state).jump);
    }

    #[test]
    fn test_defers_with_runway_left() {
        let current = Platform::new(0.0, 300.0, 175.0);
        let target = Platform::new(300.0, 300.0, 150.0);
        let player = resting_on(&current, 0.0);
        assert_eq!(plan_jump(&player, &current, &target, None), None);

        // At the edge the same jump goes
        let player = resting_on(&current, 150.0);
        let hold = plan_jump(&player, &current, &target, None);
        assert!(hold.is_some());
    }

    #[test]
    fn test_tight_next_hop_skips_deferral() {
        let current = Platform::new(0.0, 300.0, 175.0);
        let player = resting_on(&current, 0.0);

        // Roomy target: wait for the edge
        let wide = Platform::new(300.0, 300.0, 150.0);
        let after_wide = Platform::new(550.0, 300.0, 150.0);
        assert!(!next_hop_is_tight(&player, &wide, &after_wide));
        assert_eq!(plan_jump(&player, &current, &wide, Some(&after_wide)), None);

        // Too narrow to land late and still take off again
        let narrow = Platform::new(300.0, 300.0, 75.0);
        let after_narrow = Platform::new(525.0, 300.0, 150.0);
        assert!(next_hop_is_tight(&player, &narrow, &after_narrow));
        let hold = plan_jump(&player, &current, &narrow, Some(&after_narrow));
        assert!(hold.is_some_and(|h| h > 1));
    }

    #[test]
    fn test_unreachable_hop_is_tight() {
        let player = Player::default();
        let target = Platform::new(300.0, 300.0, 150.0);
        let after = Platform::new(3000.0, 300.0, 150.0);
        assert!(next_hop_is_tight(&player, &target, &after));
    }

    #[test]
    fn test_plan_bounded_for_stalled_player() {
        let current = Platform::new(0.0, 300.0, 175.0);
        let target = Platform::new(300.0, 300.0, 150.0);
        let mut player = resting_on(&current, 145.0);

        player.stats.max_speed = 0.0;
        assert_eq!(flight_frames(player.left(), &target, 0.0), MAX_PLAN_FRAMES + 1);
        assert_eq!(plan_jump(&player, &current, &target, None), None);

        player.stats.max_speed = 1e-12;
        assert_eq!(plan_jump(&player, &current, &target, None), None);
    }

    #[test]
    fn test_out_of_range_target_waits() {
        let current = Platform::new(0.0, 300.0, 175.0);
        let target = Platform::new(2000.0, 300.0, 150.0);
        let player = resting_on(&current, 145.0);
        assert_eq!(plan_jump(&player, &current, &target, None), None);
    }

    #[test]
    fn test_jump_sets_hold_frames() {
        let mut state = GameState::new(11);
        state.platforms = vec![
            Platform::new(0.0, 300.0, 175.0),
            Platform::new(300.0, 260.0, 150.0),
        ];
        state.platforms[0].visited = true;
        state.player = resting_on(&state.platforms[0], 145.0);

        let command = decide(&state);
        assert!(command.jump);
        assert_eq!(command.direction, Some(Direction::Right));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_bot_reaches_next_rooftop(seed in any::<u64>(), difficulty in 0u32..80) {
            let mut rng = RandomStream::new(seed);
            let mut state = GameState::new(seed);
            let mut from = generate_next_platform(state.last_platform(), difficulty, &mut rng);
            from.pos.x = 1000.0;
            from.visited = true;
            let to = generate_next_platform(&from, difficulty, &mut rng);

            state.player = resting_on(&from, from.left());
            state.platforms = vec![from, to];
            state.bot = true;
            state.camera_x = state.player.pos.x - SCREEN_WIDTH / 2.0 + PLAYER_WIDTH / 2.0;

            let input = TickInput::default();
            for _ in 0..600 {
                tick(&mut state, &input);
                if state.platforms[1].visited || state.game_over {
                    break;
                }
            }
            prop_assert!(state.platforms[1].visited);
            prop_assert!(!state.game_over);
        }
    }
}
