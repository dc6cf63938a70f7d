//! Cosmetic entities: parallax clouds and geocode labels
//!
//! Nothing here feeds back into physics, but it draws from the session's
//! random stream so a seed replays the same sky.

use glam::DVec2;

use super::rng::RandomStream;
use super::state::{Cloud, GameState, GeocodeMarker};
use crate::consts::*;

const MIN_LAT: f64 = 30.0;
const MAX_LAT: f64 = 50.0;
const MIN_LON: f64 = -120.0;
const MAX_LON: f64 = -70.0;

/// Number of cloud sprites
const CLOUD_VARIANTS: i32 = 3;

fn spawn_cloud(x: f64, rng: &mut RandomStream) -> Cloud {
    Cloud {
        pos: DVec2::new(x, rng.range_f64(CLOUD_MIN_Y, CLOUD_MAX_Y)),
        speed: *rng.pick(&CLOUD_SPEEDS),
        variant: rng.range_i32(0, CLOUD_VARIANTS) as u8,
    }
}

/// Clouds covering the first two screens
pub fn seed_clouds(rng: &mut RandomStream) -> Vec<Cloud> {
    let mut clouds = Vec::new();
    let mut x = rng.range_f64(0.0, CLOUD_MIN_GAP);
    while x < SCREEN_WIDTH * 2.0 {
        clouds.push(spawn_cloud(x, rng));
        x += rng.range_f64(CLOUD_MIN_GAP, CLOUD_MAX_GAP);
    }
    clouds
}

/// Spawn clouds ahead of the camera and drop the ones that scrolled off
pub fn maintain_clouds(state: &mut GameState) {
    let camera_x = state.camera_x;

    loop {
        let next_x = match state.clouds.last() {
            Some(last) if last.screen_x(camera_x) >= SCREEN_WIDTH + CLOUD_SPAWN_MARGIN => break,
            Some(last) => last.pos.x + state.rng.range_f64(CLOUD_MIN_GAP, CLOUD_MAX_GAP),
            // Sky emptied out; restart just past the right edge at mid parallax
            None => camera_x * CLOUD_SPEEDS[1] + SCREEN_WIDTH,
        };
        let cloud = spawn_cloud(next_x, &mut state.rng);
        state.clouds.push(cloud);
    }

    state
        .clouds
        .retain(|c| c.screen_x(camera_x) + CLOUD_WIDTH >= 0.0);
}

/// Random continental-US style "lat, lon" string
pub fn random_geocode(rng: &mut RandomStream) -> String {
    let lat = rng.range_f64(MIN_LAT, MAX_LAT);
    let lon = rng.range_f64(MIN_LON, MAX_LON);
    format!("{lat:.6}, {lon:.6}")
}

/// Label the rooftop at `platform_index`
pub fn spawn_geocode(state: &mut GameState, platform_index: usize) {
    let platform = &state.platforms[platform_index];
    let pos = DVec2::new(platform.center_x(), platform.top() - GEOCODE_RISE);
    let text = random_geocode(&mut state.rng);
    state.geocodes.push(GeocodeMarker {
        pos,
        text,
        opacity: GEOCODE_START_OPACITY,
    });
}

pub fn fade_geocodes(state: &mut GameState) {
    for marker in &mut state.geocodes {
        marker.opacity -= GEOCODE_FADE_PER_FRAME;
    }
    state.geocodes.retain(|m| m.opacity > 0);
}
