//! Spatial partitioning: a dense uniform grid of static asteroids.
//!
//! # Invariants
//! - An asteroid's cell is computed once from its spawn position and never changes.
//! - Asteroids whose cell falls outside the grid are never stored.
//! - Queries are read-only and scan only the cells overlapped by the query rectangle.

mod asteroid;
mod grid;

pub use asteroid::{Asteroid, SizeTier, wrap_degrees};
pub use grid::{CellCoord, GridCell, SpatialGrid};

pub fn crate_info() -> &'static str {
    "asterfield-grid v0.1.0"
}
