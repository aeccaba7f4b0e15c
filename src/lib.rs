//! Neon arcade Snake: grid simulation, greedy autoplay, a persisted top-5
//! ranking and a ratatui front end.

pub mod audio;
pub mod autoplay;
pub mod config;
pub mod effects;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod renderer;
pub mod scheduler;
pub mod score;
pub mod session;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
