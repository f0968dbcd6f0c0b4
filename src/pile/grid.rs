/// Rows and columns of a pile grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub rows: u32,
    pub cols: u32,
}

/// A grid slot addressed by row & column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
}

impl Cell {
    /// Top-left pixel offset of this cell in a canvas of `length` sized cells.
    pub fn offset(self, length: u32) -> (i64, i64) {
        (
            i64::from(self.col) * i64::from(length),
            i64::from(self.row) * i64::from(length),
        )
    }
}

impl Grid {
    pub fn total(self) -> u64 {
        u64::from(self.rows) * u64::from(self.cols)
    }

    /// Canvas `(width, height)` for cells of side `length`, `None` on overflow.
    pub fn dimensions(self, length: u32) -> Option<(u32, u32)> {
        Some((
            length.checked_mul(self.cols)?,
            length.checked_mul(self.rows)?,
        ))
    }

    /// Row-major cells.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Cell { row, col }))
    }

    /// Ordered `(cell, image index)` plan for drawing `image_count` images.
    ///
    /// Without wrap cells are filled while images last. With wrap the image
    /// cursor cycles so every cell is filled. Wrap is ignored when the images
    /// exactly fill the grid.
    pub fn placements(self, image_count: usize, wrap: bool) -> Vec<(Cell, usize)> {
        if image_count == 0 {
            return Vec::new();
        }
        let wrap = wrap && self.total() != image_count as u64;

        let indices: Box<dyn Iterator<Item = usize>> = match wrap {
            true => Box::new((0..image_count).cycle()),
            false => Box::new(0..image_count),
        };
        self.cells().zip(indices).collect()
    }
}

/// Smallest near-square grid holding `image_count` images.
///
/// Starts from a `ceil(sqrt(n))` square then drops the trailing row while it
/// would be entirely empty. Returns `None` for zero images.
pub fn auto_square(image_count: usize) -> Option<Grid> {
    if image_count == 0 {
        return None;
    }
    let mut side = image_count.isqrt();
    if side * side < image_count {
        side += 1;
    }

    let mut rows = side;
    while rows > 1 && (rows - 1) * side >= image_count {
        rows -= 1;
    }

    Some(Grid {
        rows: u32::try_from(rows).ok()?,
        cols: u32::try_from(side).ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_square_ten_images() {
        assert_eq!(auto_square(10), Some(Grid { rows: 3, cols: 4 }));
        let empty: Vec<_> = Grid { rows: 3, cols: 4 }.cells().skip(10).collect();
        assert_eq!(empty, vec![Cell { row: 2, col: 2 }, Cell { row: 2, col: 3 }]);
    }

    #[test]
    fn auto_square_perfect_squares() {
        assert_eq!(auto_square(1), Some(Grid { rows: 1, cols: 1 }));
        assert_eq!(auto_square(4), Some(Grid { rows: 2, cols: 2 }));
        assert_eq!(auto_square(9), Some(Grid { rows: 3, cols: 3 }));
    }

    #[test]
    fn auto_square_trims_single_row() {
        assert_eq!(auto_square(2), Some(Grid { rows: 1, cols: 2 }));
        assert_eq!(auto_square(5), Some(Grid { rows: 2, cols: 3 }));
        assert_eq!(auto_square(7), Some(Grid { rows: 3, cols: 3 }));
    }

    #[test]
    fn auto_square_empty() {
        assert_eq!(auto_square(0), None);
    }

    #[test]
    fn auto_square_covers_with_at_most_one_partial_row() {
        for n in 1..=2000 {
            let grid = auto_square(n).unwrap();
            let (rows, cols) = (grid.rows as usize, grid.cols as usize);
            assert!(rows * cols >= n, "{n} images in {rows}x{cols}");
            assert!((rows - 1) * cols < n, "{n} images in {rows}x{cols}");
            assert!(rows == cols || rows + 1 == cols, "{n} images in {rows}x{cols}");
        }
    }

    #[test]
    fn placements_stop_without_wrap() {
        let grid = Grid { rows: 2, cols: 2 };
        let plan = grid.placements(3, false);
        assert_eq!(
            plan,
            vec![
                (Cell { row: 0, col: 0 }, 0),
                (Cell { row: 0, col: 1 }, 1),
                (Cell { row: 1, col: 0 }, 2),
            ]
        );
    }

    #[test]
    fn placements_wrap_fills_every_cell() {
        let grid = Grid { rows: 3, cols: 3 };
        let plan = grid.placements(4, true);
        assert_eq!(plan.len(), 9);
        for (k, (cell, idx)) in plan.into_iter().enumerate() {
            assert_eq!(cell.row as usize * 3 + cell.col as usize, k);
            assert_eq!(idx, k % 4);
        }
    }

    #[test]
    fn placements_ignore_wrap_when_full() {
        let grid = Grid { rows: 2, cols: 3 };
        assert_eq!(grid.placements(6, true), grid.placements(6, false));
    }

    #[test]
    fn placements_excess_images_are_not_drawn() {
        let grid = Grid { rows: 2, cols: 2 };
        let plan = grid.placements(7, false);
        assert_eq!(plan.len(), 4);
        assert_eq!(plan.last().map(|p| p.1), Some(3));
        assert_eq!(grid.placements(7, true), plan);
    }

    #[test]
    fn placements_without_images() {
        let grid = Grid { rows: 2, cols: 2 };
        assert!(grid.placements(0, true).is_empty());
        assert!(grid.placements(0, false).is_empty());
    }

    #[test]
    fn dimensions_overflow() {
        let grid = Grid { rows: 2, cols: 3 };
        assert_eq!(grid.dimensions(10), Some((30, 20)));
        assert_eq!(grid.dimensions(u32::MAX), None);
    }
}
