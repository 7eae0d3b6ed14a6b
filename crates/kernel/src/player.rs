use asterfield_common::{Color, PlayerTuning, Rect};
use asterfield_render::PlayerSprite;
use glam::Vec2;

/// Area the ship is kept inside: the world shrunk by the camera frame extent.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ViewBounds {
    world_size: Vec2,
    margin: Vec2,
}

/// The player's ship: thrust, drag, speed cap, heading.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    position: Vec2,
    velocity: Vec2,
    /// Radians; 0 points along +x.
    heading: f32,
    tuning: PlayerTuning,
    bounds: Option<ViewBounds>,
}

impl Player {
    pub fn new(position: Vec2, tuning: PlayerTuning) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            heading: 0.0,
            tuning,
            bounds: None,
        }
    }

    /// Record the world size and camera frame used to clamp the ship's position.
    pub fn set_view_bounds(&mut self, world_size: Vec2, frame: Rect) {
        self.bounds = Some(ViewBounds {
            world_size,
            margin: frame.size(),
        });
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn apply_thrust(&mut self) {
        self.velocity += Vec2::from_angle(self.heading) * self.tuning.thrust_force;
    }

    pub fn rotate_left(&mut self, dt: f32) {
        self.heading -= self.tuning.rotation_speed * dt;
    }

    pub fn rotate_right(&mut self, dt: f32) {
        self.heading += self.tuning.rotation_speed * dt;
    }

    /// Integrate one tick: drag, speed cap, move, clamp to the view bounds.
    pub fn update(&mut self) {
        self.velocity *= self.tuning.drag;
        self.velocity = self.velocity.clamp_length_max(self.tuning.max_speed);
        self.position += self.velocity;

        if let Some(bounds) = self.bounds {
            self.position = Vec2::new(
                clamp_with_margin(self.position.x, bounds.margin.x, bounds.world_size.x),
                clamp_with_margin(self.position.y, bounds.margin.y, bounds.world_size.y),
            );
        }
    }

    pub fn sprite(&self) -> PlayerSprite {
        PlayerSprite {
            position: self.position,
            heading: self.heading,
            size: self.tuning.size,
            color: Color::RED,
            layer: self.tuning.layer,
        }
    }
}

fn clamp_with_margin(value: f32, margin: f32, extent: f32) -> f32 {
    let mut v = value;
    if v - margin < 0.0 {
        v = margin;
    }
    if v + margin > extent {
        v = extent - margin;
    }
    v
}
