//! Procedural rooftop generation
//!
//! Each platform is placed relative to the previous one: a jittered gap to
//! the right, a bounded climb upward and a width drawn from a
//! difficulty-indexed weight table.

use super::rng::RandomStream;
use super::state::{GameState, Platform};
use crate::consts::*;

/// Weight rows keyed by the score they kick in above, hardest first
const WIDTH_WEIGHT_TABLE: [(u32, [f64; 5]); 6] = [
    (60, [0.01, 0.02, 0.30, 0.30, 0.37]),
    (50, [0.05, 0.05, 0.30, 0.30, 0.30]),
    (40, [0.15, 0.15, 0.25, 0.25, 0.20]),
    (30, [0.30, 0.20, 0.20, 0.15, 0.15]),
    (20, [0.50, 0.30, 0.10, 0.05, 0.05]),
    (10, [0.37, 0.30, 0.30, 0.02, 0.01]),
];

/// Weights for the opening stretch
const OPENING_WEIGHTS: [f64; 5] = [0.50, 0.40, 0.10, 0.0, 0.0];

/// Width weights for a difficulty, aligned with [`PLATFORM_WIDTHS`]
pub fn width_weights(difficulty: u32) -> &'static [f64; 5] {
    WIDTH_WEIGHT_TABLE
        .iter()
        .find(|(threshold, _)| difficulty > *threshold)
        .map(|(_, weights)| weights)
        .unwrap_or(&OPENING_WEIGHTS)
}

/// Inverse-CDF pick over `widths` using the weights for `difficulty`.
///
/// A draw past the cumulative sum (rounding) falls through to the last,
/// hardest width.
pub fn pick_weighted_width(difficulty: u32, widths: &[f64], rng: &mut RandomStream) -> f64 {
    let last = *widths.last().expect("candidate width list is empty");
    let draw = rng.next_f64();
    let mut cumulative = 0.0;
    for (&width, &weight) in widths.iter().zip(width_weights(difficulty)) {
        cumulative += weight;
        if draw < cumulative {
            return width;
        }
    }
    last
}

/// Widest rooftop, centred under the spawn point
pub fn starting_platform() -> Platform {
    Platform::new(
        SCREEN_WIDTH / 2.0 - STARTING_PLATFORM_WIDTH / 2.0,
        STARTING_PLATFORM_Y,
        STARTING_PLATFORM_WIDTH,
    )
}

/// Place the rooftop that follows `prev`.
///
/// Offsets and heights are whole pixels so landing snaps stay exact.
pub fn generate_next_platform(prev: &Platform, difficulty: u32, rng: &mut RandomStream) -> Platform {
    let x = prev.right() + PLATFORM_SPACING + f64::from(rng.give_or_take(SPACING_JITTER));

    let min_y = (prev.top() - MAX_Y_DELTA_TOP).max(MAX_PLATFORM_HEIGHT);
    let max_y = SCREEN_HEIGHT - MINIMUM_PLATFORM_HEIGHT;
    let y = f64::from(rng.range_i32(min_y.ceil() as i32, max_y as i32));

    let width = pick_weighted_width(difficulty, &PLATFORM_WIDTHS, rng);
    Platform::new(x, y, width)
}

/// The starting rooftop plus its first neighbour
pub fn initial_platforms(rng: &mut RandomStream) -> Vec<Platform> {
    let first = starting_platform();
    let second = generate_next_platform(&first, 0, rng);
    vec![first, second]
}

/// Spawn ahead of the player and evict behind, keeping the window bounded
pub fn maintain_window(state: &mut GameState) {
    let player_x = state.player.pos.x;

    while state.last_platform().left() - player_x < SCREEN_WIDTH / 2.0 {
        let prev = state.last_platform().clone();
        let next = generate_next_platform(&prev, state.score, &mut state.rng);
        log::debug!(
            "Spawned platform x={} y={} w={} (difficulty {})",
            next.left(),
            next.top(),
            next.width,
            state.score
        );
        state.platforms.push(next);
    }

    while state.platforms.len() > 1 && (player_x - state.first_platform().left()).abs() > SCREEN_WIDTH {
        let evicted = state.platforms.remove(0);
        log::debug!("Evicted platform x={}", evicted.left());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sequence(seed: u64, len: usize, difficulty: u32) -> Vec<Platform> {
        let mut rng = RandomStream::new(seed);
        let mut platforms = initial_platforms(&mut rng);
        while platforms.len() < len {
            let next = generate_next_platform(platforms.last().unwrap(), difficulty, &mut rng);
            platforms.push(next);
        }
        platforms
    }

    #[test]
    fn test_weight_rows_sum_to_one() {
        for difficulty in [0, 10, 11, 21, 31, 41, 51, 61, 500] {
            let sum: f64 = width_weights(difficulty).iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "difficulty {difficulty}: {sum}");
        }
    }

    #[test]
    fn test_thresholds_are_strict() {
        assert_eq!(width_weights(10), &OPENING_WEIGHTS);
        assert_eq!(width_weights(11)[3], 0.02);
        assert_eq!(width_weights(60)[0], 0.05);
        assert_eq!(width_weights(61)[0], 0.01);
    }

    #[test]
    fn test_widest_pick_rate_at_zero_difficulty() {
        let mut rng = RandomStream::new(2024);
        let trials = 10_000;
        let widest = (0..trials)
            .filter(|_| pick_weighted_width(0, &PLATFORM_WIDTHS, &mut rng) == 175.0)
            .count();
        let rate = widest as f64 / trials as f64;
        assert!((rate - 0.5).abs() <= 0.02, "widest picked at rate {rate}");
    }

    #[test]
    fn test_opening_never_picks_narrow() {
        let mut rng = RandomStream::new(5);
        for _ in 0..2000 {
            let w = pick_weighted_width(0, &PLATFORM_WIDTHS, &mut rng);
            assert!(w >= 125.0);
        }
    }

    #[test]
    fn test_short_width_list_falls_back_to_last() {
        // Only two candidates, weights beyond them are never reached
        let mut rng = RandomStream::new(8);
        for _ in 0..200 {
            let w = pick_weighted_width(61, &[175.0, 150.0], &mut rng);
            assert!(w == 175.0 || w == 150.0);
        }
    }

    #[test]
    fn test_maintain_window_bounds() {
        let mut state = GameState::new(17);
        for step in 0..200 {
            state.player.pos.x = 305.0 + step as f64 * 40.0;
            maintain_window(&mut state);
            assert!(state.last_platform().left() - state.player.pos.x >= SCREEN_WIDTH / 2.0);
            assert!((state.player.pos.x - state.first_platform().left()).abs() <= SCREEN_WIDTH);
            assert!(state.platforms.len() < 12);
        }
    }

    proptest! {
        #[test]
        fn prop_gaps_within_jitter(seed in any::<u64>(), difficulty in 0u32..80) {
            let platforms = sequence(seed, 40, difficulty);
            for pair in platforms.windows(2) {
                let gap = pair[1].left() - pair[0].right();
                prop_assert!(pair[1].left() > pair[0].right());
                prop_assert!(gap >= PLATFORM_SPACING - 50.0 && gap <= PLATFORM_SPACING + 50.0);
            }
        }

        #[test]
        fn prop_heights_bounded(seed in any::<u64>(), difficulty in 0u32..80) {
            let platforms = sequence(seed, 40, difficulty);
            for pair in platforms.windows(2) {
                let y = pair[1].top();
                prop_assert!(y >= MAX_PLATFORM_HEIGHT);
                prop_assert!(y <= SCREEN_HEIGHT - MINIMUM_PLATFORM_HEIGHT);
                prop_assert!(pair[0].top() - y <= MAX_Y_DELTA_TOP);
                prop_assert!(PLATFORM_WIDTHS.contains(&pair[1].width));
            }
        }
    }
}
