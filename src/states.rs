//! The application's state machine: Menu, Playing, Pause and GameOver.
//!
//! Every state buffers the last key it was given, consumes it in `update`
//! and answers with a [`Transition`]. [`StateManager`] owns all four records
//! and applies the transitions.

use std::fmt;

use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::cell::{Cell, Direction};
use crate::config::{Config, AREA_SIZES, SPEEDS};
use crate::food::place_apple;
use crate::input::Key;
use crate::menu::{Action, Menu, MenuPage, Widget, MENU_COLOR};
use crate::render::{cell_rect, cell_side, Color, Point, Rect, Renderer};
use crate::snake::Snake;

const INITIAL_SNAKE_LENGTH: usize = 2;

const BACKGROUND: Color = Color::rgb(0x88, 0x88, 0x88);
const APPLE_COLOR: Color = Color::rgb(0xAA, 0x00, 0x00);
const SNAKE_COLOR: Color = Color::rgb(0x00, 0x00, 0x00);
const SCORE_COLOR: Color = Color::rgb(0xCC, 0xCC, 0xCC);
const PAUSE_OVERLAY: Color = Color::rgba(0x00, 0x00, 0x00, 0x55);
const GAME_OVER_OVERLAY: Color = Color::rgba(0x00, 0x00, 0x00, 0x99);

const HELP_TEXT: &str = "Controls:\n\
                         LEFT turns the snake left\n\
                         RIGHT turns the snake right\n\
                         ESC pauses the game\n\
                         CTRL+C quits";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StateId {
    Menu,
    Playing,
    Pause,
    GameOver,
}

/// Why a run ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EndReason {
    HitWall,
    BitItself,
    /// The snake covers every cell, so there is nowhere left for an apple.
    BoardFull,
}

impl EndReason {
    pub fn is_win(self) -> bool {
        self == EndReason::BoardFull
    }
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndReason::HitWall => write!(f, "(Snake hit the wall.)"),
            EndReason::BitItself => write!(f, "(Snake bit itself.)"),
            EndReason::BoardFull => write!(f, "(The board is full.)"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    Stay,
    To(StateId),
    GameOver(EndReason),
    /// Leave the application. Not a state.
    Quit,
}

//------------- MenuState

pub struct MenuState {
    menu: Menu,
    last_key: Option<Key>,
}

impl MenuState {
    pub fn new(config: &Config) -> Self {
        let mut menu = Menu::new(MenuPage::new());

        let area_options = AREA_SIZES
            .iter()
            .map(|(name, size)| (name.to_string(), Action::SetGridSize(*size)))
            .collect();
        let speed_options = SPEEDS
            .iter()
            .map(|(name, period)| (name.to_string(), Action::SetPeriod(*period)))
            .collect();
        let area_ix = AREA_SIZES.iter().position(|(_, size)| *size == config.grid_size);
        let speed_ix = SPEEDS.iter().position(|(_, period)| *period == config.period_ms);

        let settings = menu.add_page(
            MenuPage::new()
                .with_widget(Widget::selector("Area Size", area_options, area_ix))
                .with_widget(Widget::selector("Speed", speed_options, speed_ix))
                .with_widget(Widget::button("Back", Action::Back)),
        );

        let help = menu.add_page(
            MenuPage::new()
                .with_text(HELP_TEXT)
                .with_widget(Widget::button("Back", Action::Back)),
        );

        let root = menu.current_id();
        *menu.page_mut(root) = MenuPage::new()
            .with_widget(Widget::button("Start", Action::Start))
            .with_widget(Widget::button("Settings", Action::OpenPage(settings)))
            .with_widget(Widget::button("Help", Action::OpenPage(help)))
            .with_widget(Widget::button("Exit", Action::Quit));

        MenuState { menu, last_key: None }
    }

    pub fn handle_key(&mut self, key: Key) {
        self.last_key = Some(key);
    }

    pub fn update(&mut self, playing: &mut PlayingState) -> Transition {
        let action = match self.last_key.take() {
            Some(key) => self.menu.handle_key(key),
            None => None,
        };

        match action {
            None => Transition::Stay,
            Some(Action::Start) => {
                playing.restart();
                Transition::To(StateId::Playing)
            }
            Some(Action::OpenPage(id)) => {
                self.menu.push_page(id);
                Transition::Stay
            }
            Some(Action::Back) => {
                if !self.menu.pop_page() {
                    warn!("Back pressed on the root menu page");
                }
                Transition::Stay
            }
            Some(Action::SetGridSize(size)) => {
                playing.set_grid_size(size);
                Transition::Stay
            }
            Some(Action::SetPeriod(period)) => {
                playing.set_period(period);
                Transition::Stay
            }
            Some(Action::Quit) => Transition::Quit,
            Some(other) => {
                warn!("Menu ignores action {:?}", other);
                Transition::Stay
            }
        }
    }

    pub fn render(&self, r: &mut dyn Renderer) {
        let size = r.viewport_size();
        r.clear(BACKGROUND);

        self.menu.render(r, Point::new(size / 4, size / 2));
        r.draw_text("Hungry Snake", Point::new(size / 2, size / 4), MENU_COLOR, true);
    }

    #[cfg(test)]
    pub fn menu(&self) -> &Menu {
        &self.menu
    }
}

//------------- PlayingState

pub struct PlayingState {
    grid_size: i32,
    period: u32,
    last_key: Option<Key>,
    snake: Snake,
    /// `None` only once the snake fills the board.
    apple: Option<Cell>,
    score: u32,
    timer: u32,
    rng: StdRng,
}

impl PlayingState {
    pub fn new(config: &Config, rng: StdRng) -> Self {
        let mut state = PlayingState {
            grid_size: config.grid_size,
            period: config.period_ms,
            last_key: None,
            snake: Snake::new(Cell::default(), 1, Direction::Left),
            apple: None,
            score: 0,
            timer: 0,
            rng,
        };
        state.restart();
        state
    }

    /// Fresh snake in the middle of the board, facing left, score back to 0.
    /// Picks up any grid size or period changed since the last run.
    pub fn restart(&mut self) {
        let center = Cell::new(self.grid_size / 2, self.grid_size / 2);
        let snake = Snake::new(center, INITIAL_SNAKE_LENGTH, Direction::Left);
        for cell in snake.cells() {
            assert!(
                cell.is_inside_grid(self.grid_size),
                "snake cell {:?} is outside a {}x{} grid",
                cell,
                self.grid_size,
                self.grid_size
            );
        }

        self.snake = snake;
        self.score = 0;
        self.timer = 0;
        self.last_key = None;
        self.apple = place_apple(&self.snake, self.grid_size, &mut self.rng);

        info!(grid_size = self.grid_size, period = self.period, "New run");
    }

    pub fn set_grid_size(&mut self, grid_size: i32) {
        debug!(grid_size, "Grid size set for next run");
        self.grid_size = grid_size;
    }

    pub fn set_period(&mut self, period: u32) {
        debug!(period, "Period set for next run");
        self.period = period.max(1);
    }

    pub fn handle_key(&mut self, key: Key) {
        self.last_key = Some(key);
    }

    /// Escape pauses right away. Otherwise elapsed time piles up, and each
    /// time a full period is available exactly one step is taken.
    pub fn update(&mut self, delta_ms: u32) -> Transition {
        if self.last_key == Some(Key::Escape) {
            self.last_key = None;
            return Transition::To(StateId::Pause);
        }

        self.timer = self.timer.saturating_add(delta_ms);
        if self.timer < self.period {
            return Transition::Stay;
        }
        // Keep the remainder so slow frames don't lose time.
        self.timer -= self.period;

        match self.last_key.take() {
            Some(Key::Left) => self.snake.turn_left(),
            Some(Key::Right) => self.snake.turn_right(),
            _ => {}
        }
        debug!(direction = ?self.snake.direction(), head = ?self.snake.head(), "Tick");

        match self.step() {
            Some(reason) => Transition::GameOver(reason),
            None => Transition::Stay,
        }
    }

    fn step(&mut self) -> Option<EndReason> {
        let next = self.snake.next_cell();

        if next.is_at_grid_walls(self.grid_size) {
            return Some(EndReason::HitWall);
        }
        if self.snake.will_bite_itself(next) {
            return Some(EndReason::BitItself);
        }

        if self.apple == Some(next) {
            self.snake.elongate();
            self.score += 1;
            self.apple = place_apple(&self.snake, self.grid_size, &mut self.rng);
            debug!(score = self.score, length = self.snake.len(), apple = ?self.apple, "Apple eaten");
            if self.apple.is_none() {
                return Some(EndReason::BoardFull);
            }
        } else {
            self.snake.move_forward();
        }
        None
    }

    pub fn render(&self, r: &mut dyn Renderer) {
        r.clear(BACKGROUND);

        let side = cell_side(r.viewport_size(), self.grid_size);

        if let Some(apple) = self.apple {
            r.fill_rect(cell_rect(apple, side), APPLE_COLOR);
        }
        for cell in self.snake.cells() {
            r.fill_rect(cell_rect(*cell, side), SNAKE_COLOR);
        }

        r.draw_text(&format!("score: {}", self.score), Point::new(0, 0), SCORE_COLOR, false);
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}

#[cfg(test)]
impl PlayingState {
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    pub fn apple(&self) -> Option<Cell> {
        self.apple
    }

    pub fn set_apple(&mut self, apple: Option<Cell>) {
        self.apple = apple;
    }

    pub fn timer(&self) -> u32 {
        self.timer
    }

    pub fn grid_size(&self) -> i32 {
        self.grid_size
    }

    pub fn period(&self) -> u32 {
        self.period
    }
}

//------------- PauseState

pub struct PauseState {
    menu: Menu,
    last_key: Option<Key>,
}

impl PauseState {
    pub fn new() -> Self {
        let page = MenuPage::new()
            .with_widget(Widget::button("Resume", Action::Resume))
            .with_widget(Widget::button("Main Menu", Action::MainMenu));
        PauseState { menu: Menu::new(page), last_key: None }
    }

    pub fn handle_key(&mut self, key: Key) {
        self.last_key = Some(key);
    }

    pub fn update(&mut self) -> Transition {
        let key = match self.last_key.take() {
            Some(key) => key,
            None => return Transition::Stay,
        };

        if key == Key::Escape {
            return Transition::To(StateId::Playing);
        }

        match self.menu.handle_key(key) {
            Some(Action::Resume) => Transition::To(StateId::Playing),
            Some(Action::MainMenu) => Transition::To(StateId::Menu),
            Some(other) => {
                warn!("Pause menu ignores action {:?}", other);
                Transition::Stay
            }
            None => Transition::Stay,
        }
    }

    /// The frozen board under a light veil, with the menu on top.
    pub fn render(&self, playing: &PlayingState, r: &mut dyn Renderer) {
        playing.render(r);

        let size = r.viewport_size();
        r.fill_rect(Rect::new(0, 0, size, size), PAUSE_OVERLAY);

        self.menu.render(r, Point::new(size / 2 - size / 8, size / 2));
    }
}

//------------- GameOverState

pub struct GameOverState {
    reason: EndReason,
    last_key: Option<Key>,
}

impl GameOverState {
    pub fn new() -> Self {
        GameOverState { reason: EndReason::HitWall, last_key: None }
    }

    pub fn set_reason(&mut self, reason: EndReason) {
        self.reason = reason;
    }

    #[cfg(test)]
    pub fn reason(&self) -> EndReason {
        self.reason
    }

    pub fn handle_key(&mut self, key: Key) {
        self.last_key = Some(key);
    }

    pub fn update(&mut self, playing: &mut PlayingState) -> Transition {
        if self.last_key.take() == Some(Key::Space) {
            playing.restart();
            return Transition::To(StateId::Menu);
        }
        Transition::Stay
    }

    pub fn render(&self, playing: &PlayingState, r: &mut dyn Renderer) {
        playing.render(r);

        let size = r.viewport_size();
        let lh = r.line_height();
        r.fill_rect(Rect::new(0, 0, size, size), GAME_OVER_OVERLAY);

        let title = if self.reason.is_win() { "You Won!" } else { "Game Over" };
        let center = size / 2;
        r.draw_text(title, Point::new(center, center), MENU_COLOR, true);
        r.draw_text(&self.reason.to_string(), Point::new(center, center + lh), MENU_COLOR, true);
        r.draw_text(&format!("Score: {}", playing.score()), Point::new(center, center + 2 * lh), MENU_COLOR, true);
        r.draw_text("Press SPACE to return to main menu", Point::new(center, size - 2 * lh), MENU_COLOR, true);
    }
}

//------------- StateManager

/// Owns one record per state and routes input, updates and rendering to
/// whichever is active.
pub struct StateManager {
    current: StateId,
    menu: MenuState,
    playing: PlayingState,
    pause: PauseState,
    game_over: GameOverState,
}

impl StateManager {
    pub fn new(config: &Config, rng: StdRng) -> Self {
        StateManager {
            current: StateId::Menu,
            menu: MenuState::new(config),
            playing: PlayingState::new(config, rng),
            pause: PauseState::new(),
            game_over: GameOverState::new(),
        }
    }

    pub fn handle_key(&mut self, key: Key) {
        match self.current {
            StateId::Menu => self.menu.handle_key(key),
            StateId::Playing => self.playing.handle_key(key),
            StateId::Pause => self.pause.handle_key(key),
            StateId::GameOver => self.game_over.handle_key(key),
        }
    }

    /// Returns false once the application should quit.
    pub fn update(&mut self, delta_ms: u32) -> bool {
        let transition = match self.current {
            StateId::Menu => self.menu.update(&mut self.playing),
            StateId::Playing => self.playing.update(delta_ms),
            StateId::Pause => self.pause.update(),
            StateId::GameOver => self.game_over.update(&mut self.playing),
        };

        match transition {
            Transition::Stay => {}
            Transition::To(next) => self.switch_to(next),
            Transition::GameOver(reason) => {
                info!(%reason, score = self.playing.score(), "Run over");
                self.game_over.set_reason(reason);
                self.switch_to(StateId::GameOver);
            }
            Transition::Quit => {
                info!("Quit requested from {:?}", self.current);
                return false;
            }
        }
        true
    }

    pub fn render(&self, r: &mut dyn Renderer) {
        match self.current {
            StateId::Menu => self.menu.render(r),
            StateId::Playing => self.playing.render(r),
            StateId::Pause => self.pause.render(&self.playing, r),
            StateId::GameOver => self.game_over.render(&self.playing, r),
        }
    }

    fn switch_to(&mut self, next: StateId) {
        info!("State {:?} -> {:?}", self.current, next);
        self.current = next;
    }

}

#[cfg(test)]
impl StateManager {
    pub fn current(&self) -> StateId {
        self.current
    }

    pub fn playing(&self) -> &PlayingState {
        &self.playing
    }

    pub fn playing_mut(&mut self) -> &mut PlayingState {
        &mut self.playing
    }

    pub fn game_over(&self) -> &GameOverState {
        &self.game_over
    }

    pub fn menu_state(&self) -> &MenuState {
        &self.menu
    }
}
