use crate::audio::{AudioBackend, Cue, SoundBoard};
use crate::game::{Direction, GameEngine, GameState, StepResult};
use crate::render::GameView;
use crate::storage::ScoreStore;

use super::scheduler::TickScheduler;

/// Lifecycle of a single game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Active,
    Over,
}

/// Owns the game and everything around it: the tick driver, the best
/// score and its store, and the sound board. Input, the tick driver and the
/// renderer all go through this type.
pub struct GameController<S: ScoreStore, T: TickScheduler, A: AudioBackend> {
    engine: GameEngine,
    state: GameState,
    phase: Phase,
    high_score: u32,
    store: S,
    scheduler: T,
    sound: SoundBoard<A>,
    /// A restart was requested; the next tick brings in the new game
    restart_pending: bool,
}

impl<S: ScoreStore, T: TickScheduler, A: AudioBackend> GameController<S, T, A> {
    /// The best score is read from `store` once, here
    pub fn new(mut engine: GameEngine, store: S, scheduler: T, sound: SoundBoard<A>) -> Self {
        let high_score = store.load();
        let state = engine.reset();
        tracing::info!("Loaded high score {}", high_score);

        Self {
            engine,
            state,
            phase: Phase::NotStarted,
            high_score,
            store,
            scheduler,
            sound,
            restart_pending: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Waiting out the restart delay; the finished game stays on screen
    pub fn is_restarting(&self) -> bool {
        self.restart_pending
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// The finished game set the best score
    pub fn is_new_high_score(&self) -> bool {
        self.phase == Phase::Over && self.state.score > 0 && self.state.score == self.high_score
    }

    /// Snapshot for the renderer
    pub fn view(&self) -> GameView<'_> {
        GameView {
            state: &self.state,
            phase: self.phase,
            high_score: self.high_score,
            new_high_score: self.is_new_high_score(),
            sound_enabled: self.sound.is_enabled(),
        }
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound.is_enabled()
    }

    pub fn sound(&self) -> &SoundBoard<A> {
        &self.sound
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn scheduler(&self) -> &T {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut T {
        &mut self.scheduler
    }

    /// Leave the start screen. Ignored unless the game has not started.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::NotStarted {
            return false;
        }
        let period = self.engine.config().tick_interval();
        self.scheduler.stop();
        self.begin_game();
        self.scheduler.start(period, period);
        true
    }

    /// Play again after game over. The game stays Over for the restart
    /// delay: the first tick after it resets the board and enters Active,
    /// and the new snake makes its first move one period later.
    pub fn restart(&mut self) -> bool {
        if self.phase != Phase::Over || self.restart_pending {
            return false;
        }
        let config = self.engine.config();
        let (delay, period) = (config.restart_delay(), config.tick_interval());

        self.scheduler.stop();
        self.restart_pending = true;
        self.scheduler.start(delay, period);
        tracing::debug!("Restarting in {:?}", delay);
        true
    }

    /// Start or restart, whichever the current phase allows
    pub fn confirm(&mut self) -> bool {
        match self.phase {
            Phase::NotStarted => self.start(),
            Phase::Over => self.restart(),
            Phase::Active => false,
        }
    }

    /// Buffer a turn for the next tick. Only live games accept turns, and
    /// reversals are dropped.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.phase != Phase::Active {
            return false;
        }
        self.state.request_direction(direction)
    }

    /// Advance the simulation by one tick. Returns `None` when the snake
    /// did not move: no game is running, or this tick ended a restart delay.
    pub fn tick(&mut self) -> Option<StepResult> {
        if self.restart_pending {
            self.restart_pending = false;
            self.begin_game();
            return None;
        }
        if self.phase != Phase::Active {
            return None;
        }

        let result = self.engine.step(&mut self.state);

        if result.info.ate_food {
            tracing::debug!(
                "Food eaten at {:?}, score {}, next food {:?}",
                self.state.snake.head(),
                self.state.score,
                self.state.food
            );
            self.sound.play(Cue::Eat);
        }

        if result.terminated {
            self.finish_game(&result);
        }

        Some(result)
    }

    pub fn toggle_sound(&mut self) -> bool {
        self.sound.toggle()
    }

    /// Stop ticking and pause music before the program exits
    pub fn shutdown(&mut self) {
        self.restart_pending = false;
        self.scheduler.stop();
        self.sound.silence();
    }

    fn begin_game(&mut self) {
        self.state = self.engine.reset();
        self.phase = Phase::Active;
        tracing::info!("Game started");
    }

    fn finish_game(&mut self, result: &StepResult) {
        self.scheduler.stop();
        self.phase = Phase::Over;

        if result.info.board_full {
            tracing::info!("Board full, final score {}", self.state.score);
        } else {
            tracing::info!(
                "Game over after {} steps, final score {}",
                self.state.steps,
                self.state.score
            );
            self.sound.play(Cue::GameOver);
        }

        self.record_score();
    }

    fn record_score(&mut self) {
        let score = self.state.score;
        if score <= self.high_score {
            return;
        }

        self.high_score = score;
        tracing::info!("New high score {}", score);
        if let Err(err) = self.store.save(score) {
            tracing::warn!("Failed to persist high score: {:#}", err);
        }
    }
}
