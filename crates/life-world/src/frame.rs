//! A single generation snapshot of the grid.

use life_core::{Error, Position, Result};

/// A fixed-size rectangular grid of occupancy flags, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

impl Frame {
    /// Create an all-dead frame. Dimensions must already be validated as positive.
    pub(crate) fn new(width: i32, height: i32) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![false; size],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns true if the position lies within the frame.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    pub fn get(&self, pos: Position) -> Result<bool> {
        let index = self.index(pos)?;
        Ok(self.cells[index])
    }

    pub fn set(&mut self, pos: Position, occupied: bool) -> Result<()> {
        let index = self.index(pos)?;
        self.cells[index] = occupied;
        Ok(())
    }

    /// Bounds-tolerant read: anything outside the frame is dead.
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.index(pos).map(|i| self.cells[i]).unwrap_or(false)
    }

    /// Overwrite this frame with the contents of another of the same size.
    pub fn copy_from(&mut self, other: &Frame) {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));
        self.cells.copy_from_slice(&other.cells);
    }

    /// Number of occupied cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        // Both quotient and remainder are bounded by the i32 dimensions
        let width = self.width as usize;
        Position::new((index % width) as i32, (index / width) as i32)
    }

    /// Iterator over all positions in raster order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(move |i| self.index_to_pos(i))
    }

    /// Iterator over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, bool)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (self.index_to_pos(i), cell))
    }

    fn index(&self, pos: Position) -> Result<usize> {
        if !self.contains(pos) {
            return Err(Error::OutOfBounds {
                x: pos.x,
                y: pos.y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(pos.y as usize * self.width as usize + pos.x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_creation() {
        let frame = Frame::new(10, 4);
        assert_eq!(frame.width(), 10);
        assert_eq!(frame.height(), 4);
        assert_eq!(frame.cells.len(), 40);
        assert_eq!(frame.population(), 0);
    }

    #[test]
    fn test_row_major_layout() {
        let mut frame = Frame::new(4, 3);
        frame.set(Position::new(1, 2), true).unwrap();
        assert!(frame.cells[2 * 4 + 1]);
        assert_eq!(frame.index_to_pos(9), Position::new(1, 2));
    }

    #[test]
    fn test_index_is_computed_without_i32_overflow() {
        // Row start of the last row overflows i32 when multiplied in i32
        let frame = Frame {
            width: i32::MAX,
            height: 2,
            cells: Vec::new(),
        };
        let pos = Position::new(5, 1);
        assert_eq!(frame.index(pos).unwrap(), i32::MAX as usize + 5);
        assert_eq!(frame.index_to_pos(i32::MAX as usize + 5), pos);
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut frame = Frame::new(3, 3);
        assert!(matches!(
            frame.get(Position::new(3, 0)),
            Err(Error::OutOfBounds { x: 3, y: 0, .. })
        ));
        assert!(frame.set(Position::new(0, -1), true).is_err());
        assert!(!frame.is_occupied(Position::new(-1, -1)));
        assert!(!frame.is_occupied(Position::new(100, 1)));
    }

    #[test]
    fn test_copy_from_does_not_alias() {
        let mut a = Frame::new(2, 2);
        let mut b = Frame::new(2, 2);
        b.set(Position::new(1, 1), true).unwrap();

        a.copy_from(&b);
        assert!(a.is_occupied(Position::new(1, 1)));

        b.set(Position::new(1, 1), false).unwrap();
        assert!(a.is_occupied(Position::new(1, 1)));
    }

    #[test]
    fn test_positions_cover_grid() {
        let frame = Frame::new(3, 2);
        let positions: Vec<_> = frame.positions().collect();
        assert_eq!(positions.len(), 6);
        assert_eq!(positions[0], Position::new(0, 0));
        assert_eq!(positions[5], Position::new(2, 1));
    }
}
