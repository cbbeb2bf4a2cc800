use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::audio::{AudioBackend, SoundBoard};
use crate::controller::{GameController, TokioTicker};
use crate::game::{GameConfig, GameEngine};
use crate::input::{InputHandler, KeyAction, SwipeTracker};
use crate::render::{Renderer, ScreenLayout};
use crate::storage::ScoreStore;

/// Terminal rows are roughly twice as tall as columns are wide
const ROW_ASPECT: i32 = 2;

/// Interactive play in the terminal
pub struct HumanMode<S: ScoreStore, A: AudioBackend> {
    controller: GameController<S, TokioTicker, A>,
    renderer: Renderer,
    input_handler: InputHandler,
    swipe: SwipeTracker,
    layout: ScreenLayout,
    should_quit: bool,
}

impl<S: ScoreStore, A: AudioBackend> HumanMode<S, A> {
    pub fn new(config: GameConfig, store: S, audio: A, sound_enabled: bool) -> Self {
        let controller = GameController::new(
            GameEngine::new(config),
            store,
            TokioTicker::new(),
            SoundBoard::new(audio, sound_enabled),
        );

        Self {
            controller,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            swipe: SwipeTracker::new(),
            layout: ScreenLayout::default(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        self.controller.shutdown();
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick; pends forever while no game is running
                _ = self.controller.scheduler_mut().next_tick() => {
                    self.controller.tick();
                }

                // Render frame
                _ = render_timer.tick() => {
                    let view = self.controller.view();
                    let renderer = &self.renderer;
                    let mut layout = ScreenLayout::default();
                    terminal.draw(|frame| {
                        layout = renderer.render(frame, &view);
                    }).context("Failed to draw frame")?;
                    self.layout = layout;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                tracing::info!("Quitting");
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return;
                }

                match self.input_handler.handle_key_event(key) {
                    KeyAction::Steer(direction) => {
                        self.controller.steer(direction);
                    }
                    KeyAction::Start => {
                        self.controller.confirm();
                    }
                    KeyAction::Restart => {
                        self.controller.restart();
                    }
                    KeyAction::ToggleSound => {
                        self.controller.toggle_sound();
                    }
                    KeyAction::Quit => {
                        self.should_quit = true;
                    }
                    KeyAction::None => {}
                }
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (x, y) = (mouse.column as i32, mouse.row as i32 * ROW_ASPECT);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                match self.layout.button_at(mouse.column, mouse.row) {
                    Some(direction) => {
                        self.controller.steer(direction);
                    }
                    None => self.swipe.begin(x, y),
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(direction) = self.swipe.update(x, y) {
                    self.controller.steer(direction);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => self.swipe.end(),
            _ => {}
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
