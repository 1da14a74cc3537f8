//! Cell storage
//!
//! Cells live in a single growable arena. The cells of one scanline form a
//!   singly linked list, sorted by column, threaded through the arena with
//!   integer indices. `cell_index[y]` holds the head of row `y`.

/// Terminates a row list, or marks an empty row
pub const EMPTY: usize = usize::MAX;

/// Accumulated area and cover of one pixel
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct Cell {
    /// Pixel column
    pub x: i64,
    /// Signed, doubled trapezoid area in 26.6 * 26.6 units
    pub area: i64,
    /// Net vertical extent in 26.6 units
    pub cover: i64,
    /// Next cell in the row, or [`EMPTY`]
    pub next: usize,
}

impl Cell {
    pub fn at(x: i64, next: usize) -> Self {
        Cell { x, area: 0, cover: 0, next }
    }
    pub fn is_empty(&self) -> bool {
        self.cover == 0 && self.area == 0
    }
}

/// Arena of cells plus the per-row list heads
#[derive(Debug,Default)]
pub struct CellBuffer {
    cells: Vec<Cell>,
    cell_index: Vec<usize>,
    width: i64,
}

impl CellBuffer {
    pub fn new() -> Self {
        Self::default()
    }
    /// Resize to `width` x `height` and drop all cells
    ///
    /// The arena keeps its allocation.
    pub fn reset(&mut self, width: i64, height: i64) {
        self.width = width.max(0);
        self.cell_index.clear();
        self.cell_index.resize(height.max(0) as usize, EMPTY);
        self.cells.clear();
    }
    /// Drop all cells, keeping the current size
    pub fn clear(&mut self) {
        self.cells.clear();
        self.cell_index.iter_mut().for_each(|i| *i = EMPTY);
    }
    pub fn width(&self) -> i64 {
        self.width
    }
    pub fn height(&self) -> i64 {
        self.cell_index.len() as i64
    }
    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }
    /// Index of the cell at (`x`,`y`), inserted in column order if missing
    ///
    /// Rows outside `[0,height)` have no cells and return `None`.
    ///   Columns are clamped to `[-1,width]`, so everything left or right
    ///   of the canvas collapses into a single cell per side.
    pub fn find_cell(&mut self, x: i64, y: i64) -> Option<usize> {
        if y < 0 || y >= self.height() {
            return None;
        }
        let x = x.max(-1).min(self.width);
        let y = y as usize;
        let (mut i, mut prev) = (self.cell_index[y], EMPTY);
        while i != EMPTY && self.cells[i].x <= x {
            if self.cells[i].x == x {
                return Some(i);
            }
            prev = i;
            i = self.cells[i].next;
        }
        let c = self.cells.len();
        self.cells.push(Cell::at(x, i));
        if prev == EMPTY {
            self.cell_index[y] = c;
        } else {
            self.cells[prev].next = c;
        }
        Some(c)
    }
    /// Add `area` and `cover` into the cell at (`x`,`y`)
    ///
    /// Off-canvas rows are dropped silently.
    pub fn add(&mut self, x: i64, y: i64, area: i64, cover: i64) {
        if area == 0 && cover == 0 {
            return;
        }
        if let Some(i) = self.find_cell(x, y) {
            self.cells[i].area += area;
            self.cells[i].cover += cover;
        }
    }
    /// Cells of row `y` in increasing column order
    pub fn row(&self, y: i64) -> RowCells<'_> {
        let next = if y < 0 || y >= self.height() {
            EMPTY
        } else {
            self.cell_index[y as usize]
        };
        RowCells { cells: &self.cells, next }
    }
}

/// Iterator over the linked cells of one row
pub struct RowCells<'a> {
    cells: &'a [Cell],
    next: usize,
}

impl<'a> Iterator for RowCells<'a> {
    type Item = &'a Cell;
    fn next(&mut self) -> Option<&'a Cell> {
        if self.next == EMPTY {
            return None;
        }
        let c = &self.cells[self.next];
        self.next = c.next;
        Some(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_sorted_by_column() {
        let mut cb = CellBuffer::new();
        cb.reset(10, 4);
        cb.add(5, 1, 1, 1);
        cb.add(2, 1, 1, 1);
        cb.add(8, 1, 1, 1);
        cb.add(2, 1, 3, -2);
        let xs: Vec<_> = cb.row(1).map(|c| (c.x, c.area, c.cover)).collect();
        assert_eq!(xs, vec![(2, 4, -1), (5, 1, 1), (8, 1, 1)]);
        assert_eq!(cb.total_cells(), 3);
        assert_eq!(cb.row(0).count(), 0);
    }
    #[test]
    fn off_canvas_rows_dropped_columns_clamped() {
        let mut cb = CellBuffer::new();
        cb.reset(10, 4);
        cb.add(0, -1, 1, 1);
        cb.add(0, 4, 1, 1);
        assert_eq!(cb.total_cells(), 0);
        cb.add(-50, 0, 1, 1);
        cb.add(-3, 0, 1, 1);
        cb.add(99, 0, 1, 1);
        let xs: Vec<_> = cb.row(0).map(|c| (c.x, c.cover)).collect();
        assert_eq!(xs, vec![(-1, 2), (10, 1)]);
    }
    #[test]
    fn reset_keeps_allocation() {
        let mut cb = CellBuffer::new();
        cb.reset(10, 10);
        for x in 0..10 {
            cb.add(x, 3, 1, 1);
        }
        let cap = cb.cells.capacity();
        cb.reset(10, 10);
        assert_eq!(cb.total_cells(), 0);
        assert_eq!(cb.cells.capacity(), cap);
        assert_eq!(cb.row(3).count(), 0);
    }
}
