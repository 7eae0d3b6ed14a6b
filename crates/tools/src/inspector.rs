use std::fmt;

use asterfield_common::Rect;
use asterfield_grid::{Asteroid, CellCoord};
use asterfield_kernel::Simulation;
use serde::Serialize;

/// Read-only queries against a running simulation for debugging and reports.
pub struct FieldInspector;

impl FieldInspector {
    /// Produce a summary of the field state.
    pub fn summary(sim: &Simulation) -> FieldSummary {
        let grid = sim.grid();
        let player = sim.player().position();
        let camera = sim.camera().position();
        let (occupied_cells, busiest_cell) =
            grid.cells().fold((0, 0), |(occupied, busiest), (_, cell)| {
                let n = cell.len();
                (occupied + usize::from(n > 0), busiest.max(n))
            });

        FieldSummary {
            tick: sim.tick_count(),
            seed: sim.config().seed,
            total_asteroids: sim.total_asteroids(),
            visible_asteroids: sim.visible_asteroids(),
            star_count: sim.starfield().len(),
            visible_stars: sim.visible_stars(),
            cell_count: grid.cell_count(),
            occupied_cells,
            busiest_cell,
            player_position: [player.x, player.y],
            camera_position: [camera.x, camera.y],
            frustum: sim.camera().frustum(),
            frame: sim.camera().frame(),
            show_debug: sim.show_debug(),
        }
    }

    /// Contents of one grid cell, or `None` outside the grid.
    pub fn inspect_cell(sim: &Simulation, coord: CellCoord) -> Option<CellInfo> {
        let grid = sim.grid();
        grid.cell(coord).map(|cell| CellInfo {
            coord,
            bounds: grid.cell_bounds(coord),
            visible: grid.is_cell_visible(coord, &sim.camera().frustum()),
            asteroids: cell.asteroids().to_vec(),
        })
    }
}

/// Summary of field state for the inspector.
#[derive(Debug, Clone, Serialize)]
pub struct FieldSummary {
    pub tick: u64,
    pub seed: u64,
    pub total_asteroids: usize,
    pub visible_asteroids: usize,
    pub star_count: usize,
    pub visible_stars: usize,
    pub cell_count: usize,
    pub occupied_cells: usize,
    /// Asteroid count of the fullest cell.
    pub busiest_cell: usize,
    pub player_position: [f32; 2],
    pub camera_position: [f32; 2],
    pub frustum: Rect,
    pub frame: Rect,
    pub show_debug: bool,
}

impl fmt::Display for FieldSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Field: tick={} seed={}", self.tick, self.seed)?;
        writeln!(
            f,
            "  asteroids: {}/{} visible, stars: {}/{} visible",
            self.visible_asteroids, self.total_asteroids, self.visible_stars, self.star_count
        )?;
        writeln!(
            f,
            "  cells: {} occupied of {}, busiest holds {}",
            self.occupied_cells, self.cell_count, self.busiest_cell
        )?;
        writeln!(
            f,
            "  player=({:.1}, {:.1}) camera=({:.1}, {:.1})",
            self.player_position[0],
            self.player_position[1],
            self.camera_position[0],
            self.camera_position[1]
        )?;
        write!(
            f,
            "  frame=({:.0}, {:.0}) {:.0}x{:.0} debug={}",
            self.frame.x, self.frame.y, self.frame.width, self.frame.height, self.show_debug
        )
    }
}

/// One cell and the asteroids stored in it.
#[derive(Debug, Clone, Serialize)]
pub struct CellInfo {
    pub coord: CellCoord,
    pub bounds: Rect,
    /// Whether the cell overlaps the current frustum.
    pub visible: bool,
    pub asteroids: Vec<Asteroid>,
}

impl fmt::Display for CellInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cell ({}, {}) at ({:.0}, {:.0}) holds {} asteroids{}",
            self.coord.x,
            self.coord.y,
            self.bounds.x,
            self.bounds.y,
            self.asteroids.len(),
            if self.visible { " [visible]" } else { "" }
        )
    }
}
