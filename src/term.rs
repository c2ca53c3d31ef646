use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{
    poll, read, Event, KeyEvent, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::style::{self, Print, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};
use tracing::{debug, info};

use crate::error::Result;
use crate::render::{Color, Point, Rect, Renderer};

// Each character row holds two square pixels stacked with a half block.
const UPPER_HALF: char = '▀';

/// Something read from the terminal that the game loop cares about.
pub enum TermEvent {
    Key(KeyEvent),
    Resize,
}

#[derive(Copy, Clone, PartialEq, Eq)]
struct Glyph {
    ch: char,
    fg: Color,
    bg: Color,
}

/// Owns the terminal for the lifetime of the game: raw mode, alternate
/// screen, and a framebuffer that turns the game's draw calls into glyphs.
pub struct TermManager {
    cols: u16,
    rows: u16,
    stdout: Stdout,
    pixels: Vec<Color>,
    text: Vec<Option<(char, Color)>>,
    // What is on screen right now; `None` forces a repaint.
    shown: Vec<Option<Glyph>>,
    enhanced_keys: bool,
    active: bool,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (cols, rows) = terminal::size()?;
        let mut term = TermManager {
            cols: 0,
            rows: 0,
            stdout: stdout(),
            pixels: vec![],
            text: vec![],
            shown: vec![],
            enhanced_keys: false,
            active: false,
        };
        term.resize(cols, rows);
        Ok(term)
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        self.active = true;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))?;

        // Lets key repeats be told apart from presses, where supported.
        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                self.stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            self.enhanced_keys = true;
        }

        info!(cols = self.cols, rows = self.rows, enhanced_keys = self.enhanced_keys, "Terminal ready");
        Ok(())
    }

    /// Undoes `setup`. Safe to call more than once.
    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        if self.enhanced_keys {
            execute!(self.stdout, PopKeyboardEnhancementFlags)?;
            self.enhanced_keys = false;
        }
        terminal::disable_raw_mode()?;
        execute!(
            self.stdout,
            style::ResetColor,
            cursor::Show,
            cursor::EnableBlinking,
            LeaveAlternateScreen
        )?;
        info!("Terminal restored");
        Ok(())
    }

    /// Drains every pending event without blocking.
    pub fn read_events_queue(&mut self) -> Result<Vec<TermEvent>> {
        let mut events = vec![];

        while poll(Duration::ZERO)? {
            match read()? {
                Event::Key(ev) => events.push(TermEvent::Key(ev)),
                Event::Resize(cols, rows) => {
                    self.resize(cols, rows);
                    events.push(TermEvent::Resize);
                }
                _ => {}
            }
        }

        Ok(events)
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        debug!(cols, rows, "Resizing framebuffer");
        self.cols = cols;
        self.rows = rows;

        let cells = cols as usize * rows as usize;
        self.pixels = vec![Color::rgb(0, 0, 0); cells * 2];
        self.text = vec![None; cells];
        self.shown = vec![None; cells];
    }

    fn pixel_height(&self) -> i32 {
        self.rows as i32 * 2
    }

    // The square viewport is centred horizontally in the terminal.
    fn x_offset(&self) -> i32 {
        (self.cols as i32 - self.viewport_size()) / 2
    }

    fn glyph_at(&self, col: usize, row: usize) -> Glyph {
        let width = self.cols as usize;
        let top = self.pixels[2 * row * width + col];
        let bottom = self.pixels[(2 * row + 1) * width + col];

        match self.text[row * width + col] {
            Some((ch, fg)) => Glyph { ch, fg, bg: top },
            None => Glyph { ch: UPPER_HALF, fg: top, bg: bottom },
        }
    }
}

impl Renderer for TermManager {
    fn viewport_size(&self) -> i32 {
        (self.cols as i32).min(self.pixel_height())
    }

    fn line_height(&self) -> i32 {
        2
    }

    fn clear(&mut self, color: Color) {
        let color = color.over(Color::rgb(0, 0, 0));
        self.pixels.iter_mut().for_each(|p| *p = color);
        self.text.iter_mut().for_each(|t| *t = None);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let width = self.cols as i32;
        let x0 = (rect.x + self.x_offset()).max(0);
        let x1 = (rect.x + self.x_offset() + rect.w).min(width);
        let y0 = rect.y.max(0);
        let y1 = (rect.y + rect.h).min(self.pixel_height());
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        for y in y0..y1 {
            for x in x0..x1 {
                let px = &mut self.pixels[(y * width + x) as usize];
                *px = color.over(*px);
            }
        }

        // Text under the rect gets covered too: erased by opaque fills,
        // tinted by translucent ones.
        for row in y0 / 2..(y1 + 1) / 2 {
            for col in x0..x1 {
                let slot = &mut self.text[(row * width + col) as usize];
                if color.a == 0xFF {
                    *slot = None;
                } else if let Some((ch, fg)) = *slot {
                    *slot = Some((ch, color.over(fg)));
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, pos: Point, color: Color, centered: bool) {
        let len = text.chars().count() as i32;
        let (x, y) = if centered {
            (pos.x - len / 2, pos.y - 1)
        } else {
            (pos.x, pos.y)
        };

        let row = y.div_euclid(2);
        if row < 0 || row >= self.rows as i32 {
            return;
        }

        let width = self.cols as i32;
        for (i, ch) in text.chars().enumerate() {
            let col = x + self.x_offset() + i as i32;
            if (0..width).contains(&col) {
                self.text[(row * width + col) as usize] = Some((ch, color.over(Color::rgb(0, 0, 0))));
            }
        }
    }

    fn present(&mut self) -> Result<()> {
        let (width, height) = (self.cols as usize, self.rows as usize);

        for row in 0..height {
            let mut cursor_at: Option<usize> = None;
            for col in 0..width {
                let glyph = self.glyph_at(col, row);
                let slot = row * width + col;
                if self.shown[slot] == Some(glyph) {
                    continue;
                }

                if cursor_at != Some(col) {
                    queue!(self.stdout, cursor::MoveTo(col as u16, row as u16))?;
                }
                queue!(
                    self.stdout,
                    SetForegroundColor(to_term_color(glyph.fg)),
                    SetBackgroundColor(to_term_color(glyph.bg)),
                    Print(glyph.ch)
                )?;
                cursor_at = Some(col + 1);
                self.shown[slot] = Some(glyph);
            }
        }

        self.stdout.flush()?;
        Ok(())
    }
}

fn to_term_color(color: Color) -> style::Color {
    style::Color::Rgb { r: color.r, g: color.g, b: color.b }
}

/// Puts the terminal back before a panic message is printed, so it is
/// readable and the shell is usable.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(stdout(), style::ResetColor, cursor::Show, LeaveAlternateScreen);
        default_hook(info);
    }));
}
