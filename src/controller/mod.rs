pub mod game_controller;
pub mod scheduler;

pub use game_controller::{GameController, Phase};
pub use scheduler::{ManualScheduler, TickScheduler, TokioTicker};
