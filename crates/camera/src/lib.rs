//! 2D game camera: world frustum plus independently clamped on-screen frame.
//!
//! # Invariants
//! - The frustum is always `viewport_size` large and centered on the camera position.
//! - After `update`, the frustum lies inside the world and the frame inside the screen.
//! - Camera motion lives outside the grid; moving the camera never touches asteroids.

mod camera;

pub use camera::{GameCamera, ScreenTransform};

pub fn crate_info() -> &'static str {
    "asterfield-camera v0.1.0"
}
