use rand::seq::SliceRandom;
use rand::Rng;

use crate::cell::Cell;
use crate::snake::Snake;

/// Picks a free cell uniformly at random. `None` means the snake covers the
/// whole board.
pub fn place_apple<R: Rng + ?Sized>(snake: &Snake, grid_size: i32, rng: &mut R) -> Option<Cell> {
    let free: Vec<Cell> = (0..grid_size * grid_size)
        .map(|i| Cell::new(i % grid_size, i / grid_size))
        .filter(|cell| !snake.has_cell(*cell))
        .collect();

    free.choose(rng).copied()
}
