use crate::cell::{Cell, Direction};

/// The snake's body, head first. Never empty.
#[derive(Clone, Debug)]
pub struct Snake {
    cells: Vec<Cell>,
    direction: Direction,
}

impl Snake {
    /// Lays out `length` cells starting at `head`, each one a step behind the
    /// previous along `direction`. Bounds are the caller's business.
    pub fn new(head: Cell, length: usize, direction: Direction) -> Self {
        assert!(length > 0, "a snake needs at least one cell");

        let back = direction.delta();
        let cells = (0..length as i32)
            .map(|i| Cell::new(head.x - back.x * i, head.y - back.y * i))
            .collect();
        Snake { cells, direction }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn head(&self) -> Cell {
        self.cells[0]
    }

    pub fn tail(&self) -> Cell {
        self.cells[self.cells.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn turn_left(&mut self) {
        self.direction = self.direction.turned_left();
    }

    pub fn turn_right(&mut self) {
        self.direction = self.direction.turned_right();
    }

    /// Where the head goes on the next step.
    pub fn next_cell(&self) -> Cell {
        self.head() + self.direction.delta()
    }

    pub fn move_forward(&mut self) {
        let next = self.next_cell();
        // Every cell takes its predecessor's place; the old tail falls off.
        self.cells.rotate_right(1);
        self.cells[0] = next;
    }

    pub fn elongate(&mut self) {
        let next = self.next_cell();
        self.cells.insert(0, next);
    }

    pub fn has_cell(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// The tail doesn't count: it leaves its cell on the same tick the head
    /// would enter it.
    pub fn will_bite_itself(&self, next: Cell) -> bool {
        self.has_cell(next) && next != self.tail()
    }
}
