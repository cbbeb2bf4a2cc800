use ratatui::{
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::style::{arrow_glyph, head_glyph, segment_shade, SegmentShade};
use crate::controller::Phase;
use crate::game::{Direction, GameState, Position};

/// Everything the renderer needs to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct GameView<'a> {
    pub state: &'a GameState,
    pub phase: Phase,
    pub high_score: u32,
    pub new_high_score: bool,
    pub sound_enabled: bool,
}

/// Where the last frame put its interactive parts, in terminal cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub grid: Rect,
    pub buttons: Vec<(Direction, Rect)>,
}

impl ScreenLayout {
    /// Control-pad button under the given terminal cell
    pub fn button_at(&self, column: u16, row: u16) -> Option<Direction> {
        self.buttons
            .iter()
            .find(|(_, rect)| contains(*rect, column, row))
            .map(|(direction, _)| *direction)
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

const CELL_WIDTH: u16 = 2;
const BUTTON_WIDTH: u16 = 5;
const BUTTON_GAP: u16 = 1;

const EMERALD_LIGHT: Color = Color::Rgb(110, 231, 183);
const EMERALD_MEDIUM: Color = Color::Rgb(52, 211, 153);
const EMERALD_DARK: Color = Color::Rgb(5, 150, 105);

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, view: &GameView) -> ScreenLayout {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(2), // Control pad
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_header(view), chunks[0]);

        let grid_area = centered(
            chunks[1],
            grid_extent(view.state.grid_width, CELL_WIDTH),
            grid_extent(view.state.grid_height, 1),
        );
        frame.render_widget(self.render_grid(view.state), grid_area);

        match view.phase {
            Phase::NotStarted => {
                let overlay = centered(grid_area, 44, 11);
                frame.render_widget(Clear, overlay);
                frame.render_widget(self.render_start(view), overlay);
            }
            Phase::Over => {
                let overlay = centered(grid_area, 40, 10);
                frame.render_widget(Clear, overlay);
                frame.render_widget(self.render_game_over(view), overlay);
            }
            Phase::Active => {}
        }

        let buttons = pad_buttons(chunks[2]);
        let pad_style = if view.phase == Phase::Active {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        for (direction, rect) in &buttons {
            let button = Paragraph::new(arrow_glyph(*direction))
                .style(pad_style)
                .alignment(Alignment::Center);
            frame.render_widget(button, *rect);
        }

        frame.render_widget(self.render_controls(), chunks[3]);

        ScreenLayout {
            grid: grid_area,
            buttons,
        }
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        // Segment index per cell, so each cell is a lookup instead of a scan
        let mut occupancy = vec![None; state.grid_width * state.grid_height];
        for (index, segment) in state.snake.body.iter().enumerate() {
            if state.is_in_bounds(*segment) {
                occupancy[segment.y as usize * state.grid_width + segment.x as usize] = Some(index);
            }
        }

        let len = state.snake.len();
        let mut lines = Vec::with_capacity(state.grid_height);

        for y in 0..state.grid_height {
            let mut spans = Vec::with_capacity(state.grid_width);

            for x in 0..state.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = match occupancy[y * state.grid_width + x] {
                    Some(0) => Span::styled(
                        format!("{} ", head_glyph(state.snake.direction)),
                        Style::default()
                            .fg(shade_color(segment_shade(0, len)))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Some(index) => Span::styled(
                        "■ ",
                        Style::default().fg(shade_color(segment_shade(index, len))),
                    ),
                    None if pos == state.food => Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                    None => Span::styled("· ", Style::default().fg(Color::DarkGray)),
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Gray)),
        )
    }

    fn render_header(&self, view: &GameView) -> Paragraph<'_> {
        let sound = if view.sound_enabled {
            Span::styled("♪ on", Style::default().fg(Color::Green))
        } else {
            Span::styled("♪ off", Style::default().fg(Color::DarkGray))
        };

        let text = vec![
            Line::from(Span::styled(
                "Snake Odyssey",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled("Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    view.state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Best: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    view.high_score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                sound,
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_start(&self, view: &GameView) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(Span::styled(
                "Snake Odyssey",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Navigate the snake to eat apples and grow longer. Don't hit yourself!"),
            Line::from(""),
            Line::from(vec![
                Span::styled("Arrow keys or swipe", Style::default().fg(Color::Cyan)),
                Span::raw("  ·  "),
                Span::styled("Eat to grow", Style::default().fg(Color::Red)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to start", Style::default().fg(Color::Gray)),
            ]),
        ];

        if view.high_score > 0 {
            text.push(Line::from(Span::styled(
                format!("High Score: {}", view.high_score),
                Style::default().fg(Color::Yellow),
            )));
        }

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::Green)),
            )
    }

    fn render_game_over(&self, view: &GameView) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    view.state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Best: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    view.high_score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
        ];

        if view.new_high_score {
            text.push(Line::from(Span::styled(
                "🏆 New High Score! 🏆",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            text.push(Line::from(""));
        }

        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Enter",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to play again or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::Red)),
            )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" / "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" / drag to move | "),
            Span::styled("M", Style::default().fg(Color::Cyan)),
            Span::raw(" sound | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn shade_color(shade: SegmentShade) -> Color {
    match shade {
        SegmentShade::Light => EMERALD_LIGHT,
        SegmentShade::Medium => EMERALD_MEDIUM,
        SegmentShade::Dark => EMERALD_DARK,
    }
}

/// A `width` x `height` rectangle centred in `area`, clipped to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Screen cells spanned by `cells` grid cells plus the border, saturating
/// at the largest terminal size
fn grid_extent(cells: usize, cell_size: u16) -> u16 {
    u16::try_from(cells)
        .unwrap_or(u16::MAX)
        .saturating_mul(cell_size)
        .saturating_add(2)
}

/// Up on the first row; left, down and right on the second
fn pad_buttons(area: Rect) -> Vec<(Direction, Rect)> {
    let pad = centered(area, BUTTON_WIDTH * 3 + BUTTON_GAP * 2, 2);
    if pad.height < 2 {
        return Vec::new();
    }

    let column = |i: u16| pad.x + i * (BUTTON_WIDTH + BUTTON_GAP);
    vec![
        (Direction::Up, Rect::new(column(1), pad.y, BUTTON_WIDTH, 1)),
        (Direction::Left, Rect::new(column(0), pad.y + 1, BUTTON_WIDTH, 1)),
        (Direction::Down, Rect::new(column(1), pad.y + 1, BUTTON_WIDTH, 1)),
        (Direction::Right, Rect::new(column(2), pad.y + 1, BUTTON_WIDTH, 1)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Snake;
    use ratatui::{backend::TestBackend, Terminal};

    fn sample_state() -> GameState {
        let snake = Snake::from_segments(
            vec![Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)],
            Direction::Right,
        );
        GameState::new(snake, Position::new(8, 8), 20, 20)
    }

    fn draw(view: &GameView) -> (String, ScreenLayout) {
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        let renderer = Renderer::new();
        let mut layout = ScreenLayout::default();
        terminal
            .draw(|frame| {
                layout = renderer.render(frame, view);
            })
            .unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>();
        (text, layout)
    }

    fn view_of(state: &GameState, phase: Phase) -> GameView<'_> {
        GameView {
            state,
            phase,
            high_score: 7,
            new_high_score: false,
            sound_enabled: true,
        }
    }

    #[test]
    fn test_active_frame_shows_snake_and_badges() {
        let state = sample_state();
        let (text, layout) = draw(&view_of(&state, Phase::Active));

        assert!(text.contains("Score: 0"));
        assert!(text.contains("Best: 7"));
        assert!(text.contains("▶"));
        assert!(text.contains("●"));
        assert!(!text.contains("GAME OVER"));
        assert_eq!(layout.grid.width, 42);
        assert_eq!(layout.grid.height, 22);
    }

    #[test]
    fn test_start_overlay() {
        let state = sample_state();
        let (text, _) = draw(&view_of(&state, Phase::NotStarted));

        assert!(text.contains("to start"));
        assert!(text.contains("High Score: 7"));
    }

    #[test]
    fn test_game_over_overlay() {
        let state = sample_state();
        let mut view = view_of(&state, Phase::Over);
        view.new_high_score = true;
        let (text, _) = draw(&view);

        assert!(text.contains("GAME OVER"));
        assert!(text.contains("New High Score!"));
    }

    #[test]
    fn test_button_hit_testing() {
        let state = sample_state();
        let (_, layout) = draw(&view_of(&state, Phase::Active));

        assert_eq!(layout.buttons.len(), 4);
        for (direction, rect) in layout.buttons.clone() {
            assert_eq!(layout.button_at(rect.x, rect.y), Some(direction));
            assert_eq!(
                layout.button_at(rect.x + rect.width - 1, rect.y),
                Some(direction)
            );
        }
        assert_eq!(layout.button_at(0, 0), None);
    }

    #[test]
    fn test_oversized_grid_is_clipped_to_screen() {
        let snake = Snake::new(Position::new(0, 0), Direction::Right, 1);
        let state = GameState::new(snake, Position::new(3, 3), 40_000, 4);
        let (_, layout) = draw(&view_of(&state, Phase::Active));

        assert_eq!(layout.grid.width, 80);
        assert_eq!(layout.grid.height, 6);
    }

    #[test]
    fn test_grid_extent_saturates() {
        assert_eq!(grid_extent(20, CELL_WIDTH), 42);
        assert_eq!(grid_extent(32_767, CELL_WIDTH), u16::MAX);
        assert_eq!(grid_extent(usize::MAX, 1), u16::MAX);
    }

    #[test]
    fn test_centered_clips_to_area() {
        let area = Rect::new(2, 3, 10, 4);
        assert_eq!(centered(area, 4, 2), Rect::new(5, 4, 4, 2));
        assert_eq!(centered(area, 40, 20), area);
    }
}
