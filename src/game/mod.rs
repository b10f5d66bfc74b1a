//! Snake simulation: movement, growth, collision and fruit placement.
//!
//! Nothing in here touches the DOM. The browser shell calls [`GameLoop::tick`]
//! from a timer, feeds keys into [`GameLoop::handle_key`] and draws through
//! [`crate::render::draw_frame`], so the whole state machine runs under plain
//! `cargo test`.

mod direction;
mod rng;
mod snake;

use std::fmt;

pub use direction::Direction;
pub use rng::{CellRng, EntropyRng};
pub use snake::{Segment, Snake};

use crate::config::{ConfigError, GameConfig, INITIAL_LENGTH};

/// Length / score summary shown next to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Stats {
    pub length: usize,
    pub score: u32,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Length: {}, Score: {}", self.length, self.score)
    }
}

/// What a single [`GameLoop::tick`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub moved: bool,
    /// Fruit eaten this tick; stats changed.
    pub ate: bool,
    /// The game ended this tick.
    pub died: bool,
}

pub struct GameLoop<R = EntropyRng> {
    config: GameConfig,
    rng: R,
    snake: Snake,
    fruit: Segment,
    direction: Option<Direction>,
    last_direction: Option<Direction>,
    alive: bool,
}

impl GameLoop<EntropyRng> {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, EntropyRng::new()?)
    }
}

impl<R: CellRng> GameLoop<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        let snake = Snake::initial(config.cell, INITIAL_LENGTH);
        let mut game = Self::from_parts(config, rng, snake, Segment::new(0, 0))?;
        game.generate_fruit();
        Ok(game)
    }

    /// Build a game around an explicit snake and fruit, e.g. a saved scenario.
    /// The fruit is taken as given.
    pub fn from_parts(
        config: GameConfig,
        rng: R,
        snake: Snake,
        fruit: Segment,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if snake.is_empty() {
            return Err(ConfigError::EmptySnake);
        }
        Ok(Self {
            config,
            rng,
            snake,
            fruit,
            direction: None,
            last_direction: None,
            alive: true,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn fruit(&self) -> Segment {
        self.fruit
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn last_direction(&self) -> Option<Direction> {
        self.last_direction
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn stats(&self) -> Stats {
        Stats {
            length: self.snake.len(),
            score: self.snake.score(),
        }
    }

    /// Queue a heading for the next tick. Ignored after game over and when it
    /// would reverse the last applied heading.
    pub fn set_direction(&mut self, dir: Direction) {
        if !self.alive {
            return;
        }
        if self.last_direction == Some(dir.opposite()) {
            return;
        }
        self.direction = Some(dir);
    }

    /// Raw `KeyboardEvent.key` input; non-arrow keys are dropped.
    pub fn handle_key(&mut self, key: &str) {
        if let Some(dir) = Direction::from_key(key) {
            self.set_direction(dir);
        }
    }

    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();
        if !self.alive {
            return report;
        }
        let Some(dir) = self.direction else {
            return report;
        };

        let head = self.next_head(dir);
        self.snake.advance(head);
        self.last_direction = Some(dir);
        report.moved = true;

        if head == self.fruit {
            self.snake.grow(self.config.fruit_reward);
            self.generate_fruit();
            report.ate = true;
            log::debug!("fruit eaten, {}", self.stats());
        }

        if self.out_of_bounds(head) || self.snake.head_overlaps_body() {
            self.alive = false;
            report.died = true;
            log::info!("game over at ({}, {}), {}", head.x, head.y, self.stats());
        }
        report
    }

    /// Place the fruit on a random cell the snake does not cover. Returns false
    /// (fruit left where it was) only when the snake covers the whole board.
    pub fn generate_fruit(&mut self) -> bool {
        let cols = self.config.columns() as u32;
        let rows = self.config.rows() as u32;
        let cell = self.config.cell;

        // Validated configs always have a cell count.
        let cells = self.config.cell_count().unwrap_or(usize::MAX);
        let attempts = cells.saturating_mul(4).max(16);
        for _ in 0..attempts {
            let x = self.rng.next_below(cols) as i32 * cell;
            let y = self.rng.next_below(rows) as i32 * cell;
            let candidate = Segment::new(x, y);
            if !self.snake.occupies(candidate) {
                self.fruit = candidate;
                return true;
            }
        }

        // Sampling keeps landing on the snake; choose among free cells directly.
        let free: Vec<Segment> = (0..rows as i32)
            .flat_map(|r| (0..cols as i32).map(move |c| Segment::new(c * cell, r * cell)))
            .filter(|s| !self.snake.occupies(*s))
            .collect();
        match self.rng.pick(&free) {
            Some(&spot) => {
                self.fruit = spot;
                true
            }
            None => {
                log::warn!("no free cell left for fruit");
                false
            }
        }
    }

    /// Fresh snake, heading and fruit; the score goes back to zero.
    pub fn restart(&mut self) {
        self.snake = Snake::initial(self.config.cell, INITIAL_LENGTH);
        self.direction = None;
        self.last_direction = None;
        self.alive = true;
        self.generate_fruit();
        log::info!("restarted, {}", self.stats());
    }

    // Up/Left may step one cell past the origin (and die there); Down/Right
    // hold the head on the last cell instead of leaving the board.
    fn next_head(&self, dir: Direction) -> Segment {
        let Segment { mut x, mut y } = self.snake.head();
        let cell = self.config.cell;
        match dir {
            Direction::Up => {
                if y > -cell {
                    y -= cell;
                }
            }
            Direction::Down => {
                if y < self.config.height - cell {
                    y += cell;
                }
            }
            Direction::Left => {
                if x > -cell {
                    x -= cell;
                }
            }
            Direction::Right => {
                if x < self.config.width - cell {
                    x += cell;
                }
            }
        }
        Segment::new(x, y)
    }

    fn out_of_bounds(&self, p: Segment) -> bool {
        p.x < 0 || p.y < 0 || p.x >= self.config.width || p.y >= self.config.height
    }
}
