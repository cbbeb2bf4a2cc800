use super::{
    action::Direction,
    config::GameConfig,
    state::{CollisionType, GameState, Position, Snake},
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// The snake covers every cell, so no food could be placed
    pub board_full: bool,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn finished(collision_type: Option<CollisionType>, board_full: bool) -> Self {
        Self {
            terminated: true,
            info: StepInfo {
                ate_food: board_full,
                collision_type,
                board_full,
            },
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game to initial state: a one-cell snake heading right in
    /// the middle of the grid and food at its fixed starting cell.
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::new(self.config.initial_head(), Direction::Right, 1);

        GameState::new(
            snake,
            self.config.initial_food(),
            self.config.grid_width,
            self.config.grid_height,
        )
    }

    /// Execute one step of the game
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        if !state.is_alive {
            return StepResult {
                terminated: true,
                info: StepInfo {
                    ate_food: false,
                    collision_type: None,
                    board_full: false,
                },
            };
        }

        // The pending direction was screened for reversals when requested
        state.snake.direction = state.pending_direction;

        let new_head = state
            .snake
            .head()
            .moved_in_direction(state.snake.direction)
            .wrapped(state.grid_width, state.grid_height);

        if state.snake.collides_with_body(new_head) {
            state.is_alive = false;
            state.steps += 1;
            return StepResult::finished(Some(CollisionType::SelfCollision), false);
        }

        let ate_food = new_head == state.food;
        state.snake.advance(new_head, ate_food);
        state.steps += 1;

        if ate_food {
            state.score += 1;
            match self.spawn_food_avoid_snake(state) {
                Some(food) => state.food = food,
                None => {
                    state.is_alive = false;
                    return StepResult::finished(None, true);
                }
            }
        }

        StepResult {
            terminated: false,
            info: StepInfo {
                ate_food,
                collision_type: None,
                board_full: false,
            },
        }
    }

    /// Pick a random cell of `state`'s grid not covered by the snake.
    ///
    /// Uniform rejection sampling is tried first; after one miss per cell
    /// the free cells are enumerated and one is chosen uniformly.
    /// Returns `None` only when the snake covers the whole grid.
    fn spawn_food_avoid_snake(&mut self, state: &GameState) -> Option<Position> {
        let (width, height) = (state.grid_width, state.grid_height);

        for _ in 0..state.cell_count() {
            let x = self.rng.gen_range(0..width) as i32;
            let y = self.rng.gen_range(0..height) as i32;
            let pos = Position::new(x, y);

            if !state.is_occupied_by_snake(pos) {
                return Some(pos);
            }
        }

        let free: Vec<Position> = (0..height as i32)
            .flat_map(|y| (0..width as i32).map(move |x| Position::new(x, y)))
            .filter(|pos| !state.is_occupied_by_snake(*pos))
            .collect();

        free.choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn state_with(snake: Snake, food: Position) -> GameState {
        GameState::new(snake, food, 20, 20)
    }

    #[test]
    fn test_reset() {
        let mut engine = GameEngine::new(GameConfig::default());
        let state = engine.reset();

        assert!(state.is_alive);
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 0);
        assert_eq!(state.snake.body, vec![Position::new(10, 10)]);
        assert_eq!(state.food, Position::new(15, 15));
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.pending_direction, Direction::Right);
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = GameEngine::new(GameConfig::default());
        let mut state = engine.reset();

        let result = engine.step(&mut state);

        assert!(!result.terminated);
        assert!(!result.info.ate_food);
        assert_eq!(state.steps, 1);
        assert_eq!(state.snake.body, vec![Position::new(11, 10)]);
        assert_eq!(state.food, Position::new(15, 15));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_wraparound_right_edge() {
        let mut engine = GameEngine::new(GameConfig::default());
        let mut state = state_with(
            Snake::new(Position::new(19, 10), Direction::Right, 1),
            Position::new(5, 5),
        );

        engine.step(&mut state);

        assert_eq!(state.snake.head(), Position::new(0, 10));
    }

    #[test]
    fn test_wraparound_every_edge() {
        let mut engine = GameEngine::new(GameConfig::default());
        let cases = [
            (Position::new(0, 7), Direction::Left, Position::new(19, 7)),
            (Position::new(7, 0), Direction::Up, Position::new(7, 19)),
            (Position::new(7, 19), Direction::Down, Position::new(7, 0)),
        ];

        for (start, direction, expected) in cases {
            let mut state = state_with(Snake::new(start, direction, 1), Position::new(3, 3));
            let result = engine.step(&mut state);
            assert!(!result.terminated);
            assert_eq!(state.snake.head(), expected);
        }
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 7);
        let snake = Snake::from_segments(
            vec![Position::new(14, 15), Position::new(13, 15)],
            Direction::Right,
        );
        let mut state = state_with(snake, Position::new(15, 15));

        let result = engine.step(&mut state);

        assert!(result.info.ate_food);
        assert!(!result.terminated);
        assert_eq!(state.score, 1);
        assert_eq!(
            state.snake.body,
            vec![
                Position::new(15, 15),
                Position::new(14, 15),
                Position::new(13, 15)
            ]
        );
        assert!(!state.is_occupied_by_snake(state.food));
        assert!(state.is_in_bounds(state.food));
    }

    #[test]
    fn test_self_collision() {
        let mut engine = GameEngine::new(GameConfig::small());

        // Body: (5,5), (4,5), (3,5), (2,5), (1,5) heading right
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 5);
        let mut state = GameState::new(snake, Position::new(8, 8), 10, 10);

        // Down: (5,6), (5,5), (4,5), (3,5), (2,5)
        state.request_direction(Direction::Down);
        engine.step(&mut state);
        // Left: (4,6), (5,6), (5,5), (4,5), (3,5)
        state.request_direction(Direction::Left);
        engine.step(&mut state);
        // Up: (4,5) is still body
        state.request_direction(Direction::Up);
        let before = state.snake.clone();
        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert!(!state.is_alive);
        assert_eq!(
            result.info.collision_type,
            Some(CollisionType::SelfCollision)
        );
        assert_eq!(state.snake.body, before.body);
    }

    #[test]
    fn test_moving_into_vacating_tail_is_a_collision() {
        // The tail has not moved yet when the head is checked
        let mut engine = GameEngine::new(GameConfig::small());
        let snake = Snake::from_segments(
            vec![
                Position::new(5, 5),
                Position::new(5, 6),
                Position::new(6, 6),
                Position::new(6, 5),
            ],
            Direction::Up,
        );
        let mut state = GameState::new(snake, Position::new(0, 0), 10, 10);
        state.request_direction(Direction::Right);

        let result = engine.step(&mut state);

        assert!(result.terminated);
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = engine.reset();

        assert!(!state.request_direction(Direction::Left));
        engine.step(&mut state);

        assert_eq!(state.snake.direction, Direction::Right);
    }

    #[test]
    fn test_pending_direction_applies_on_next_tick() {
        let mut engine = GameEngine::new(GameConfig::default());
        let mut state = engine.reset();

        state.request_direction(Direction::Down);
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.snake.head(), Position::new(10, 10));

        engine.step(&mut state);
        assert_eq!(state.snake.direction, Direction::Down);
        assert_eq!(state.snake.head(), Position::new(10, 11));
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = engine.reset();
        state.is_alive = false;
        let steps_before = state.steps;

        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert_eq!(state.steps, steps_before); // Should not increment
    }

    #[test]
    fn test_random_walk_invariants() {
        let config = GameConfig::new(8, 8);
        let mut engine = GameEngine::with_seed(config, 42);
        let mut rng = StdRng::seed_from_u64(99);
        let mut state = engine.reset();

        for _ in 0..2_000 {
            let len_before = state.snake.len();
            let score_before = state.score;
            let food_before = state.food;
            let turn = Direction::ALL[rng.gen_range(0..4)];
            state.request_direction(turn);

            let result = engine.step(&mut state);
            if result.terminated {
                state = engine.reset();
                continue;
            }

            let head = state.snake.head();
            assert!(state.is_in_bounds(head));

            let unique: HashSet<_> = state.snake.body.iter().collect();
            assert_eq!(unique.len(), state.snake.len());

            if result.info.ate_food {
                assert_eq!(head, food_before);
                assert_eq!(state.snake.len(), len_before + 1);
                assert_eq!(state.score, score_before + 1);
                assert!(!state.is_occupied_by_snake(state.food));
            } else {
                assert_eq!(state.snake.len(), len_before);
                assert_eq!(state.score, score_before);
                assert_eq!(state.food, food_before);
            }
        }
    }

    /// Head at (1,0) heading left onto food at (0,0); every other cell
    /// except those in `free` is body.
    fn crowded_state(free: &[Position]) -> GameState {
        let mut body = vec![Position::new(1, 0)];
        for y in 0..4 {
            for x in 0..4 {
                let pos = Position::new(x, y);
                if pos != Position::new(0, 0) && pos != Position::new(1, 0) && !free.contains(&pos) {
                    body.push(pos);
                }
            }
        }
        let snake = Snake::from_segments(body, Direction::Left);
        GameState::new(snake, Position::new(0, 0), 4, 4)
    }

    #[test]
    fn test_food_lands_on_last_free_cell() {
        let mut engine = GameEngine::with_seed(GameConfig::new(4, 4), 3);
        let mut state = crowded_state(&[Position::new(3, 3)]);

        let result = engine.step(&mut state);

        assert!(result.info.ate_food);
        assert!(!result.terminated);
        assert_eq!(state.snake.len(), 15);
        assert_eq!(state.food, Position::new(3, 3));
    }

    #[test]
    fn test_food_stays_on_the_state_grid() {
        // The engine is configured for 20x20 but plays a 4x4 board
        let mut engine = GameEngine::with_seed(GameConfig::default(), 8);

        for x in 0..4 {
            let mut state = crowded_state(&[Position::new(x, 2), Position::new(3, 3)]);

            let result = engine.step(&mut state);

            assert!(result.info.ate_food);
            assert!(state.is_in_bounds(state.food));
            assert!(!state.is_occupied_by_snake(state.food));
        }
    }

    #[test]
    fn test_board_full_ends_game() {
        let mut engine = GameEngine::with_seed(GameConfig::new(4, 4), 5);
        let mut state = crowded_state(&[]);

        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert!(result.info.board_full);
        assert!(result.info.collision_type.is_none());
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), 16);
        assert!(!state.is_alive);
    }
}
