//! Presentation-only values: colour cycling, pulses and segment fading.
//!
//! Everything here is computed from the tick counter and elapsed wall-clock
//! time. Nothing feeds back into game logic.

use std::time::Duration;

use ratatui::style::Color;

/// Neon colours cycled by the snake.
pub const NEON_PALETTE: [Color; 4] = [
    Color::Rgb(0, 255, 157),
    Color::Rgb(255, 0, 102),
    Color::Rgb(0, 255, 255),
    Color::Rgb(255, 0, 255),
];

pub const FOOD_COLOR: Color = NEON_PALETTE[1];
pub const OBSTACLE_COLOR: Color = NEON_PALETTE[2];
pub const GRID_COLOR: Color = Color::Rgb(40, 40, 48);

/// Ticks between snake colour changes.
pub const COLOR_CYCLE_TICKS: u64 = 60;

/// How much the tail is dimmed relative to the head.
pub const FADE_SPEED: f32 = 0.5;

pub const HEAD_PULSE_PERIOD_MS: f32 = 200.0;
pub const FOOD_PULSE_PERIOD_MS: f32 = 300.0;

/// Background sparkles drawn per frame.
pub const PARTICLE_COUNT: usize = 3;

/// Palette slot for the snake after `tick_count` ticks.
#[must_use]
pub fn palette_index(tick_count: u64) -> usize {
    ((tick_count / COLOR_CYCLE_TICKS) % NEON_PALETTE.len() as u64) as usize
}

/// Brightness in `(1 - FADE_SPEED, 1]` for segment `index` of a `len`-long snake.
#[must_use]
pub fn segment_brightness(index: usize, len: usize) -> f32 {
    if len == 0 {
        return 1.0;
    }
    1.0 - (index as f32 / len as f32) * FADE_SPEED
}

/// Sine pulse in `[-1, 1]` driven by wall-clock time.
#[must_use]
pub fn pulse(elapsed: Duration, period_ms: f32) -> f32 {
    (elapsed.as_secs_f32() * 1000.0 / period_ms).sin()
}

/// Scales an RGB colour toward black; other colours pass through.
#[must_use]
pub fn dim(color: Color, brightness: f32) -> Color {
    let Color::Rgb(r, g, b) = color else {
        return color;
    };
    let factor = brightness.clamp(0.0, 1.0);
    let scale = |channel: u8| (f32::from(channel) * factor).round() as u8;
    Color::Rgb(scale(r), scale(g), scale(b))
}
