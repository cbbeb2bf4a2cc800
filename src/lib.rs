//! Snake Odyssey - Snake on a wraparound grid, played in the terminal
//!
//! This library provides:
//! - Core game logic (game module)
//! - Lifecycle state machine and tick drivers (controller module)
//! - Keyboard, drag and control-pad input (input module)
//! - TUI rendering (render module)
//! - Best-score persistence (storage module) and sound cues (audio module)

pub mod audio;
pub mod controller;
pub mod game;
pub mod input;
pub mod logging;
pub mod modes;
pub mod render;
pub mod storage;
