use asterfield_common::Color;
use asterfield_grid::Asteroid;
use asterfield_starfield::Star;
use glam::Vec2;

/// Layer every star is drawn on; below all asteroid layers.
pub const STAR_LAYER: i32 = 0;

/// What a render command draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Star,
    Asteroid,
    Player,
}

/// One draw instruction in world space. Rebuilt from live state every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCommand {
    pub kind: CommandKind,
    pub position: Vec2,
    pub size: Vec2,
    /// Degrees, for every kind. The ship's radian heading is converted when
    /// the command is built and converted back when the triangle is drawn.
    pub rotation: f32,
    pub color: Color,
    /// Draw order key; lower layers are drawn first.
    pub layer: i32,
}

impl RenderCommand {
    pub fn star(star: &Star) -> Self {
        Self {
            kind: CommandKind::Star,
            position: star.position,
            size: Vec2::splat(star.size),
            rotation: 0.0,
            color: star.color,
            layer: STAR_LAYER,
        }
    }

    pub fn asteroid(asteroid: &Asteroid) -> Self {
        Self {
            kind: CommandKind::Asteroid,
            position: asteroid.position,
            size: asteroid.size,
            rotation: asteroid.rotation,
            color: asteroid.color,
            layer: asteroid.layer,
        }
    }

    pub fn player(sprite: &PlayerSprite) -> Self {
        Self {
            kind: CommandKind::Player,
            position: sprite.position,
            size: sprite.size,
            rotation: sprite.heading.to_degrees(),
            color: sprite.color,
            layer: sprite.layer,
        }
    }
}

/// What the pipeline needs to know about the ship for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSprite {
    pub position: Vec2,
    /// Radians.
    pub heading: f32,
    pub size: Vec2,
    pub color: Color,
    pub layer: i32,
}
