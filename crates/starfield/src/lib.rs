//! Background starfield: a fixed set of decorative points in world space.
//!
//! # Invariants
//! - Stars are generated once and never change.
//! - Visibility is a linear scan against the frustum; the star count is small
//!   enough that no spatial index is needed.

use asterfield_common::{Color, Rect};
use glam::Vec2;
use rand::Rng;

/// A single background star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: Vec2,
    /// Edge length of the (square) star in world units.
    pub size: f32,
    pub color: Color,
    /// Depth factor in `[0.1, 0.9)`. Generated and kept, but not yet read by
    /// visibility or draw mapping.
    pub parallax_factor: f32,
}

impl Star {
    pub fn random<R: Rng + ?Sized>(world_size: Vec2, rng: &mut R) -> Self {
        let position = Vec2::new(
            rng.gen_range(0.0..world_size.x),
            rng.gen_range(0.0..world_size.y),
        );
        let size = rng.gen_range(1.0..3.0);
        let brightness: u8 = rng.gen_range(100..=255);
        let parallax_factor = rng.gen_range(0.1..0.9);
        Self {
            position,
            size,
            color: Color::gray(brightness),
            parallax_factor,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    /// Scatter `count` stars uniformly over `[0, world_size)`.
    pub fn generate<R: Rng + ?Sized>(world_size: Vec2, count: usize, rng: &mut R) -> Self {
        let stars: Vec<Star> = (0..count).map(|_| Star::random(world_size, rng)).collect();
        tracing::info!(count, "starfield generated");
        Self { stars }
    }

    pub fn from_stars(stars: Vec<Star>) -> Self {
        Self { stars }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Stars whose position lies inside `frustum` (edges included), in generation order.
    pub fn visible<'a>(&'a self, frustum: &'a Rect) -> impl Iterator<Item = &'a Star> + 'a {
        self.stars
            .iter()
            .filter(move |star| frustum.contains_point(star.position))
    }
}

pub fn crate_info() -> &'static str {
    "asterfield-starfield v0.1.0"
}
