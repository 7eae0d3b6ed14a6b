use asterfield_common::{Color, Rect};
use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Size bucket of an asteroid. Each tier fixes both extent and draw layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeTier {
    Small,
    Medium,
    Large,
}

impl SizeTier {
    pub const ALL: [SizeTier; 3] = [SizeTier::Small, SizeTier::Medium, SizeTier::Large];

    /// Pick a tier uniformly.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn size(self) -> Vec2 {
        match self {
            Self::Small => Vec2::splat(20.0),
            Self::Medium => Vec2::splat(40.0),
            Self::Large => Vec2::splat(60.0),
        }
    }

    pub fn layer(self) -> i32 {
        match self {
            Self::Small => 1,
            Self::Medium => 2,
            Self::Large => 3,
        }
    }
}

/// A static, spinning asteroid.
///
/// Position and size never change after creation; only `rotation` advances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub position: Vec2,
    /// Full extent of the axis-aligned bounding box.
    pub size: Vec2,
    /// Degrees in `[0, 360)`.
    pub rotation: f32,
    /// Degrees per tick, signed.
    pub rotation_speed: f32,
    pub color: Color,
    pub layer: i32,
}

impl Asteroid {
    /// Non-spinning asteroid of the given tier.
    pub fn new(position: Vec2, tier: SizeTier) -> Self {
        Self {
            position,
            size: tier.size(),
            rotation: 0.0,
            rotation_speed: 0.0,
            color: Color::gray(200),
            layer: tier.layer(),
        }
    }

    pub fn with_spin(self, rotation: f32, rotation_speed: f32) -> Self {
        Self {
            rotation: wrap_degrees(rotation),
            rotation_speed,
            ..self
        }
    }

    /// Random asteroid inside `[0, extent)` on both axes.
    pub fn random<R: Rng + ?Sized>(extent: Vec2, rng: &mut R) -> Self {
        let position = Vec2::new(rng.gen_range(0.0..extent.x), rng.gen_range(0.0..extent.y));
        let tier = SizeTier::random(rng);

        let rotation = rng.gen_range(0.0..360.0);
        let mut rotation_speed = rng.gen_range(0.2..1.0);
        if rng.gen_bool(0.5) {
            rotation_speed = -rotation_speed;
        }

        let level: u8 = rng.gen_range(150..=230);

        Self {
            color: Color::gray(level),
            ..Self::new(position, tier).with_spin(rotation, rotation_speed)
        }
    }

    /// World-space bounding box centered on `position`.
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.position, self.size)
    }

    /// Advance rotation by one tick.
    pub fn advance(&mut self) {
        self.rotation = wrap_degrees(self.rotation + self.rotation_speed);
    }
}

/// Wrap an angle in degrees into `[0, 360)`.
pub fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn largest_tier_sets_max_layer() {
        let top = SizeTier::ALL.iter().map(|t| t.layer()).max();
        assert_eq!(top, Some(asterfield_common::MAX_ASTEROID_LAYER));
    }

    #[test]
    fn rotation_wraps_past_360() {
        let mut a = Asteroid::new(Vec2::ZERO, SizeTier::Small).with_spin(359.0, 5.0);
        a.advance();
        assert_eq!(a.rotation, 4.0);
    }

    #[test]
    fn rotation_wraps_below_zero() {
        let mut a = Asteroid::new(Vec2::ZERO, SizeTier::Small).with_spin(1.0, -5.0);
        a.advance();
        assert_eq!(a.rotation, 356.0);
    }

    #[test]
    fn wrap_degrees_stays_half_open() {
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(720.5), 0.5);
        assert!(wrap_degrees(-1e-9) < 360.0);
    }

    #[test]
    fn tiers_map_to_layers() {
        assert_eq!(SizeTier::Small.layer(), 1);
        assert_eq!(SizeTier::Medium.layer(), 2);
        assert_eq!(SizeTier::Large.layer(), 3);
        assert_eq!(SizeTier::Large.size(), Vec2::new(60.0, 60.0));
    }

    #[test]
    fn random_asteroids_respect_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let extent = Vec2::new(500.0, 300.0);
        for _ in 0..500 {
            let a = Asteroid::random(extent, &mut rng);
            assert!(a.position.x >= 0.0 && a.position.x < extent.x);
            assert!(a.position.y >= 0.0 && a.position.y < extent.y);
            assert!(a.rotation >= 0.0 && a.rotation < 360.0);
            let speed = a.rotation_speed.abs();
            assert!((0.2..1.0).contains(&speed));
            assert!((150..=230).contains(&a.color.r));
            assert_eq!(a.color.r, a.color.g);
            assert!(SizeTier::ALL.iter().any(|t| t.layer() == a.layer && t.size() == a.size));
        }
    }

    #[test]
    fn bounds_centered_on_position() {
        let a = Asteroid::new(Vec2::new(150.0, 150.0), SizeTier::Small);
        assert_eq!(a.bounds(), Rect::new(140.0, 140.0, 20.0, 20.0));
    }
}
