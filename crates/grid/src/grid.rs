use asterfield_common::{GridConfig, Rect};
use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::asteroid::Asteroid;

/// A 2D cell coordinate in the grid. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
}

impl CellCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Asteroids whose spawn position falls inside one cell, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct GridCell {
    asteroids: Vec<Asteroid>,
}

impl GridCell {
    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn len(&self) -> usize {
        self.asteroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.asteroids.is_empty()
    }
}

/// Dense, fixed-size uniform grid over world space.
///
/// Cell `(x, y)` covers `[x*cell_width, (x+1)*cell_width) x [y*cell_height, (y+1)*cell_height)`
/// and lives at index `y * columns + x`. Asteroids are assigned to a cell once, from
/// their spawn position, and never move between cells. Range queries only visit the
/// cells overlapped by the query rectangle, so their cost scales with the viewport
/// rather than with the total asteroid count.
pub struct SpatialGrid {
    columns: usize,
    rows: usize,
    cell_size: Vec2,
    screen_size: Vec2,
    cells: Vec<GridCell>,
    /// Largest asteroid extent inserted so far, used to pad query ranges.
    max_extent: Vec2,
}

impl SpatialGrid {
    /// Allocate `columns x rows` empty cells.
    ///
    /// Dimensions are trusted; callers validate them through `FieldConfig::validate`.
    pub fn new(
        columns: usize,
        rows: usize,
        cell_width: f32,
        cell_height: f32,
        screen_size: Vec2,
    ) -> Self {
        let grid = Self {
            columns,
            rows,
            cell_size: Vec2::new(cell_width, cell_height),
            screen_size,
            cells: vec![GridCell::default(); columns * rows],
            max_extent: Vec2::ZERO,
        };
        tracing::info!(
            columns,
            rows,
            cells = columns * rows,
            cell_width,
            cell_height,
            "grid initialized"
        );
        grid
    }

    pub fn from_config(config: &GridConfig, screen_size: Vec2) -> Self {
        Self::new(
            config.columns,
            config.rows,
            config.cell_width,
            config.cell_height,
            screen_size,
        )
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_size(&self) -> Vec2 {
        self.cell_size
    }

    /// Screen size recorded at construction (used by debug overlays).
    pub fn screen_size(&self) -> Vec2 {
        self.screen_size
    }

    /// World extent covered by the grid.
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.columns as f32, self.rows as f32) * self.cell_size
    }

    /// Total number of stored asteroids.
    pub fn object_count(&self) -> usize {
        self.cells.iter().map(GridCell::len).sum()
    }

    /// Number of cells (empty or not).
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Cell containing `position`, or `None` if it lies outside the grid.
    pub fn cell_of(&self, position: Vec2) -> Option<CellCoord> {
        let x = (position.x / self.cell_size.x).floor();
        let y = (position.y / self.cell_size.y).floor();
        if !(0.0..self.columns as f32).contains(&x) || !(0.0..self.rows as f32).contains(&y) {
            return None;
        }
        Some(CellCoord::new(x as i32, y as i32))
    }

    /// Cell at `coord`, if inside the grid.
    pub fn cell(&self, coord: CellCoord) -> Option<&GridCell> {
        self.index(coord).map(|i| &self.cells[i])
    }

    /// All cells with their coordinates, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, &GridCell)> {
        let columns = self.columns;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let coord = CellCoord::new((i % columns) as i32, (i / columns) as i32);
            (coord, cell)
        })
    }

    /// World rectangle covered by a cell.
    pub fn cell_bounds(&self, coord: CellCoord) -> Rect {
        Rect::from_origin_size(
            Vec2::new(coord.x as f32, coord.y as f32) * self.cell_size,
            self.cell_size,
        )
    }

    /// Whether a cell's world rectangle overlaps `rect`. Not used by [`Self::query_visible`].
    pub fn is_cell_visible(&self, coord: CellCoord, rect: &Rect) -> bool {
        self.cell_bounds(coord).intersects(rect)
    }

    /// Insert an asteroid into the cell of its position.
    ///
    /// Returns the cell it was stored in; asteroids outside the grid are dropped and
    /// `None` is returned.
    pub fn insert(&mut self, asteroid: Asteroid) -> Option<CellCoord> {
        let coord = self.cell_of(asteroid.position)?;
        let index = self.index(coord)?;
        self.max_extent = self.max_extent.max(asteroid.size);
        self.cells[index].asteroids.push(asteroid);
        Some(coord)
    }

    /// Generate `count` random asteroids uniformly over the grid extent.
    ///
    /// Returns how many were stored.
    pub fn generate_asteroids<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> usize {
        let extent = self.extent();
        let mut inserted = 0;
        for _ in 0..count {
            if self.insert(Asteroid::random(extent, rng)).is_some() {
                inserted += 1;
            }
        }
        let dropped = count - inserted;
        if dropped > 0 {
            tracing::debug!(dropped, "asteroids outside grid bounds were dropped");
        }
        tracing::info!(count, inserted, "generated asteroids");
        inserted
    }

    /// Advance every asteroid's rotation by one tick.
    pub fn advance(&mut self) {
        for cell in &mut self.cells {
            for asteroid in &mut cell.asteroids {
                asteroid.advance();
            }
        }
    }

    /// Inclusive range of cells a query for `rect` has to scan, clamped to the grid.
    ///
    /// The rectangle is widened by half the largest asteroid extent so that an
    /// asteroid whose box spills over a cell border is still reached from the
    /// neighbouring cell. Returns `None` when the range is empty.
    pub fn cell_range(&self, rect: &Rect) -> Option<(CellCoord, CellCoord)> {
        let pad = self.max_extent / 2.0;
        let lo = ((rect.origin() - pad) / self.cell_size).floor();
        let hi = ((rect.max() + pad) / self.cell_size).floor();

        let start_x = lo.x.max(0.0);
        let start_y = lo.y.max(0.0);
        let end_x = hi.x.min(self.columns as f32 - 1.0);
        let end_y = hi.y.min(self.rows as f32 - 1.0);

        if start_x > end_x || start_y > end_y {
            return None;
        }
        Some((
            CellCoord::new(start_x as i32, start_y as i32),
            CellCoord::new(end_x as i32, end_y as i32),
        ))
    }

    /// All asteroids whose bounding box intersects `rect`.
    ///
    /// Order is row-major cell scan order, then insertion order within a cell.
    pub fn query_visible(&self, rect: &Rect) -> Vec<&Asteroid> {
        let mut result = Vec::new();
        let Some((start, end)) = self.cell_range(rect) else {
            return result;
        };

        for y in start.y..=end.y {
            for x in start.x..=end.x {
                let Some(cell) = self.cell(CellCoord::new(x, y)) else {
                    continue;
                };
                result.extend(
                    cell.asteroids
                        .iter()
                        .filter(|a| a.bounds().intersects(rect)),
                );
            }
        }

        tracing::trace!(
            scanned_columns = end.x - start.x + 1,
            scanned_rows = end.y - start.y + 1,
            visible = result.len(),
            "grid query"
        );
        result
    }

    fn index(&self, coord: CellCoord) -> Option<usize> {
        if coord.x < 0 || coord.y < 0 {
            return None;
        }
        let (x, y) = (coord.x as usize, coord.y as usize);
        if x >= self.columns || y >= self.rows {
            return None;
        }
        Some(y * self.columns + x)
    }
}
