//! Pattern grid reconstruction from the pattern view bounds

use super::error::{UnlockError, UnlockResult};
use crate::device::{Point, Rect};
use std::ops::RangeInclusive;

/// Grid dimensions a keyguard pattern view can have.
pub const PATTERN_SIZES: RangeInclusive<u32> = 2..=9;

/// Number of cells in a `size`×`size` grid, or `InvalidPatternSize` when the
/// dimension is outside [`PATTERN_SIZES`].
pub fn pattern_cell_count(size: u32) -> UnlockResult<u32> {
    if !PATTERN_SIZES.contains(&size) {
        return Err(UnlockError::InvalidPatternSize { grid_size: size });
    }
    size.checked_mul(size)
        .ok_or(UnlockError::InvalidPatternSize { grid_size: size })
}

/// `size`×`size` dots laid out evenly over the pattern view.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternGrid {
    size: u32,
    // index 0 is unused so that cell numbers index directly
    centers: Vec<Point>,
}

impl PatternGrid {
    pub fn new(bounds: Rect, size: u32) -> UnlockResult<Self> {
        let cells = pattern_cell_count(size)?;
        let cell_w = bounds.width() as f64 / size as f64;
        let cell_h = bounds.height() as f64 / size as f64;

        let mut centers = Vec::with_capacity(cells as usize + 1);
        centers.push(Point::default());
        for row in 0..size {
            for col in 0..size {
                centers.push(Point::new(
                    bounds.left as f64 + (col as f64 + 0.5) * cell_w,
                    bounds.top as f64 + (row as f64 + 0.5) * cell_h,
                ));
            }
        }
        Ok(Self { size, centers })
    }

    /// Center of the 1-based row-major `cell`.
    pub fn point(&self, cell: u32) -> Option<Point> {
        if cell == 0 {
            return None;
        }
        self.centers.get(cell as usize).copied()
    }

    /// Resolve a whole sequence; fails on the first cell off the grid.
    pub fn trace(&self, cells: &[u32]) -> UnlockResult<Vec<Point>> {
        cells
            .iter()
            .map(|&cell| {
                self.point(cell).ok_or(UnlockError::InvalidPatternCell {
                    cell: cell.to_string(),
                    grid_size: self.size,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_by_three_diagonal() {
        let grid = PatternGrid::new(Rect::new(0, 0, 300, 300), 3).unwrap();
        let points = grid.trace(&[1, 5, 9]).unwrap();
        assert_eq!(
            points,
            vec![
                Point::new(50.0, 50.0),
                Point::new(150.0, 150.0),
                Point::new(250.0, 250.0)
            ]
        );
    }

    #[test]
    fn test_centers_inside_and_evenly_spaced() {
        let rects = [
            Rect::new(0, 0, 300, 300),
            Rect::new(90, 1210, 990, 2110),
            Rect::new(33, 47, 734, 501),
        ];
        for size in [3u32, 4, 5] {
            for rect in rects {
                let grid = PatternGrid::new(rect, size).unwrap();
                let cell_w = rect.width() as f64 / size as f64;
                let cell_h = rect.height() as f64 / size as f64;

                for cell in 1..=size * size {
                    let p = grid.point(cell).unwrap();
                    assert!(p.x > rect.left as f64 && p.x < rect.right as f64);
                    assert!(p.y > rect.top as f64 && p.y < rect.bottom as f64);

                    let row = (cell - 1) / size;
                    let col = (cell - 1) % size;
                    if col > 0 {
                        let left = grid.point(cell - 1).unwrap();
                        assert!((p.x - left.x - cell_w).abs() < 1e-9);
                        assert_eq!(p.y, left.y);
                    }
                    if row > 0 {
                        let above = grid.point(cell - size).unwrap();
                        assert!((p.y - above.y - cell_h).abs() < 1e-9);
                        assert_eq!(p.x, above.x);
                    }
                }
                assert!(grid.point(0).is_none());
                assert!(grid.point(size * size + 1).is_none());
            }
        }
    }

    #[test]
    fn test_rejects_bad_sizes_and_off_grid_cells() {
        for size in [0, 1, 10, 20_000, 65_536, u32::MAX] {
            assert!(matches!(
                PatternGrid::new(Rect::new(0, 0, 10, 10), size),
                Err(UnlockError::InvalidPatternSize { grid_size }) if grid_size == size
            ));
        }
        assert_eq!(pattern_cell_count(9).unwrap(), 81);
        let grid = PatternGrid::new(Rect::new(0, 0, 300, 300), 3).unwrap();
        assert!(matches!(
            grid.trace(&[1, 2, 10]),
            Err(UnlockError::InvalidPatternCell { grid_size: 3, .. })
        ));
    }
}
