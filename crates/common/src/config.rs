use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Highest layer an asteroid can be assigned (large tier).
pub const MAX_ASTEROID_LAYER: i32 = 3;

/// Grid partition parameters: cell counts and cell extent in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub columns: usize,
    pub rows: usize,
    pub cell_width: f32,
    pub cell_height: f32,
}

impl GridConfig {
    /// World extent covered by the grid.
    pub fn extent(&self) -> Vec2 {
        Vec2::new(
            self.columns as f32 * self.cell_width,
            self.rows as f32 * self.cell_height,
        )
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 10,
            rows: 10,
            cell_width: 1000.0,
            cell_height: 1000.0,
        }
    }
}

/// Ship handling constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerTuning {
    /// Heading change in radians per second while a rotate key is held.
    pub rotation_speed: f32,
    /// Velocity added per tick of thrust.
    pub thrust_force: f32,
    /// Per-tick velocity multiplier.
    pub drag: f32,
    pub max_speed: f32,
    /// Ship extent in world units.
    pub size: Vec2,
    /// Draw layer reserved for the ship; must sit above every asteroid layer.
    pub layer: i32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            rotation_speed: 4.0,
            thrust_force: 0.2,
            drag: 0.98,
            max_speed: 10.0,
            size: Vec2::new(30.0, 30.0),
            layer: 10,
        }
    }
}

/// Everything needed to build a field. Fixed for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub world_size: Vec2,
    pub screen_size: Vec2,
    /// World-space extent visible through the camera.
    pub viewport_size: Vec2,
    pub grid: GridConfig,
    pub asteroid_count: usize,
    pub star_count: usize,
    pub player: PlayerTuning,
    pub seed: u64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        let screen = Vec2::new(1280.0, 720.0);
        Self {
            world_size: Vec2::new(10_000.0, 10_000.0),
            screen_size: screen,
            viewport_size: screen,
            grid: GridConfig::default(),
            asteroid_count: 6000,
            star_count: 1000,
            player: PlayerTuning::default(),
            seed: 42,
        }
    }
}

/// Reasons a [`FieldConfig`] cannot drive a simulation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be positive, got ({x}, {y})")]
    NonPositiveExtent { name: &'static str, x: f32, y: f32 },
    #[error("grid must have at least one column and one row, got {columns}x{rows}")]
    EmptyGrid { columns: usize, rows: usize },
    #[error("viewport ({vx}, {vy}) does not fit inside the world ({wx}, {wy})")]
    ViewportLargerThanWorld { vx: f32, vy: f32, wx: f32, wy: f32 },
    #[error("camera frame ({fx}, {fy}) does not fit on the screen ({sx}, {sy})")]
    FrameLargerThanScreen { fx: f32, fy: f32, sx: f32, sy: f32 },
    #[error("player layer {layer} must be above the highest asteroid layer {max}", max = MAX_ASTEROID_LAYER)]
    PlayerLayerTooLow { layer: i32 },
}

impl FieldConfig {
    /// Check the configuration for degenerate geometry before anything divides by it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_extent("world_size", self.world_size)?;
        check_extent("screen_size", self.screen_size)?;
        check_extent("viewport_size", self.viewport_size)?;
        check_extent(
            "cell size",
            Vec2::new(self.grid.cell_width, self.grid.cell_height),
        )?;
        if self.grid.columns == 0 || self.grid.rows == 0 {
            return Err(ConfigError::EmptyGrid {
                columns: self.grid.columns,
                rows: self.grid.rows,
            });
        }
        if self.viewport_size.x > self.world_size.x || self.viewport_size.y > self.world_size.y {
            return Err(ConfigError::ViewportLargerThanWorld {
                vx: self.viewport_size.x,
                vy: self.viewport_size.y,
                wx: self.world_size.x,
                wy: self.world_size.y,
            });
        }
        // The on-screen frame is half the viewport.
        let frame = self.viewport_size / 2.0;
        if frame.x > self.screen_size.x || frame.y > self.screen_size.y {
            return Err(ConfigError::FrameLargerThanScreen {
                fx: frame.x,
                fy: frame.y,
                sx: self.screen_size.x,
                sy: self.screen_size.y,
            });
        }
        if self.player.layer <= MAX_ASTEROID_LAYER {
            return Err(ConfigError::PlayerLayerTooLow {
                layer: self.player.layer,
            });
        }
        Ok(())
    }
}

fn check_extent(name: &'static str, v: Vec2) -> Result<(), ConfigError> {
    // NaN fails the comparison and is rejected too.
    if v.x > 0.0 && v.y > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveExtent { name, x: v.x, y: v.y })
    }
}
