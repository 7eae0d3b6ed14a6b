//! Developer tooling: field inspector, debug overlay, minimap, frame timing.
//!
//! # Invariants
//! - Tools only read simulation state; nothing here mutates the field.
//! - Overlays draw through `Painter`, the same seam as the main pipeline.

mod frame_timer;
mod inspector;
mod overlay;

pub use frame_timer::FrameTimer;
pub use inspector::{CellInfo, FieldInspector, FieldSummary};
pub use overlay::{
    draw_camera_overlay, draw_debug_overlay, draw_grid_overlay, draw_hud, draw_minimap,
    minimap_rect,
};

pub fn crate_info() -> &'static str {
    "asterfield-tools v0.1.0"
}
