use crate::cell::Cell;
use crate::error::Result;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 0xFF }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Alpha-blends `self` over `dst`. The result is opaque.
    pub fn over(self, dst: Color) -> Color {
        let a = self.a as u32;
        let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * (255 - a) + 127) / 255) as u8;
        Color::rgb(mix(self.r, dst.r), mix(self.g, dst.g), mix(self.b, dst.b))
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }
}

/// The drawing surface the game states paint on. Coordinates are pixels in a
/// square viewport of `viewport_size()` per side, origin at the top left.
pub trait Renderer {
    fn viewport_size(&self) -> i32;

    /// Vertical distance between two lines of text.
    fn line_height(&self) -> i32;

    fn clear(&mut self, color: Color);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draws `text` with its top left at `pos`, or centred on `pos`.
    fn draw_text(&mut self, text: &str, pos: Point, color: Color, centered: bool);

    fn present(&mut self) -> Result<()>;
}

/// Side of one grid cell on screen. Never 0, so tiny viewports still show
/// something.
pub fn cell_side(viewport_size: i32, grid_size: i32) -> i32 {
    (viewport_size / grid_size).max(1)
}

pub fn cell_rect(cell: Cell, side: i32) -> Rect {
    Rect::new(cell.x * side, cell.y * side, side, side)
}
