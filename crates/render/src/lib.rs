//! Rendering pipeline: command collection, layer sort, screen-space draw mapping.
//!
//! # Invariants
//! - The pipeline never mutates the grid, the starfield or the camera.
//! - After `collect`, commands are sorted by non-decreasing layer and equal
//!   layers keep insertion order (stars, then asteroids, then the ship).
//! - Drawing goes through the `Painter` trait; swap in any backend without
//!   changing the pipeline.

mod command;
mod painter;
mod pipeline;

pub use command::{CommandKind, PlayerSprite, RenderCommand, STAR_LAYER};
pub use painter::{DrawCall, Painter, RecordingPainter, rotated_rect_corners};
pub use pipeline::{RenderPipeline, SHIP_WING_SPREAD, draw_commands, ship_triangle};

pub fn crate_info() -> &'static str {
    "asterfield-render v0.1.0"
}
