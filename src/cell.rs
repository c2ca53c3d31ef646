use std::ops::Add;

use Direction::*;

/// A position on the square playing grid. `(0, 0)` is drawn at the top left
/// of the viewport, and `y` grows downwards on screen.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

/// Ordinals are significant: turning is a step of +-1 modulo 4.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    /// True when the cell sits on the ring just outside a `grid_size` grid.
    /// Meant for lookahead cells, so a collision is seen before the snake
    /// actually leaves the board.
    pub fn is_at_grid_walls(&self, grid_size: i32) -> bool {
        self.x == -1 || self.x == grid_size || self.y == -1 || self.y == grid_size
    }

    pub fn is_inside_grid(&self, grid_size: i32) -> bool {
        (0..grid_size).contains(&self.x) && (0..grid_size).contains(&self.y)
    }
}

impl Add for Cell {
    type Output = Cell;

    fn add(self, other: Cell) -> Cell {
        Cell::new(self.x + other.x, self.y + other.y)
    }
}

impl Direction {
    pub fn delta(self) -> Cell {
        match self {
            Up => Cell::new(0, 1),
            Right => Cell::new(1, 0),
            Down => Cell::new(0, -1),
            Left => Cell::new(-1, 0),
        }
    }

    // The signs look swapped: Up is +y, but the screen's y axis points down.
    pub fn turned_left(self) -> Direction {
        Direction::from_ordinal(self as i32 + 1)
    }

    pub fn turned_right(self) -> Direction {
        Direction::from_ordinal(self as i32 - 1)
    }

    fn from_ordinal(ordinal: i32) -> Direction {
        match ordinal.rem_euclid(4) {
            0 => Up,
            1 => Right,
            2 => Down,
            _ => Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Direction; 4] = [Up, Right, Down, Left];

    #[test]
    fn turns_are_inverse() {
        for dir in ALL {
            assert_eq!(dir.turned_right().turned_left(), dir);
            assert_eq!(dir.turned_left().turned_right(), dir);
        }
    }

    #[test]
    fn four_turns_come_back() {
        for dir in ALL {
            let mut d = dir;
            for _ in 0..4 {
                d = d.turned_left();
            }
            assert_eq!(d, dir);
        }
    }

    #[test]
    fn turn_left_wraps_from_left_to_up() {
        assert_eq!(Left.turned_left(), Up);
        assert_eq!(Up.turned_right(), Left);
    }

    #[test]
    fn deltas_are_unit_vectors() {
        assert_eq!(Up.delta(), Cell::new(0, 1));
        assert_eq!(Right.delta(), Cell::new(1, 0));
        assert_eq!(Down.delta(), Cell::new(0, -1));
        assert_eq!(Left.delta(), Cell::new(-1, 0));
    }

    #[test]
    fn add_is_componentwise() {
        assert_eq!(Cell::new(3, -2) + Cell::new(-1, 5), Cell::new(2, 3));
    }

    #[test]
    fn walls_on_ten_grid() {
        for i in 0..10 {
            assert!(Cell::new(-1, i).is_at_grid_walls(10));
            assert!(Cell::new(10, i).is_at_grid_walls(10));
            assert!(Cell::new(i, -1).is_at_grid_walls(10));
            assert!(Cell::new(i, 10).is_at_grid_walls(10));
        }

        for x in 0..10 {
            for y in 0..10 {
                let cell = Cell::new(x, y);
                assert!(!cell.is_at_grid_walls(10), "{:?} reported as wall", cell);
                assert!(cell.is_inside_grid(10));
            }
        }
    }
}
