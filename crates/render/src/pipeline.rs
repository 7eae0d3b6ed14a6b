use asterfield_camera::GameCamera;
use asterfield_grid::SpatialGrid;
use asterfield_starfield::Starfield;
use glam::Vec2;

use crate::command::{CommandKind, PlayerSprite, RenderCommand};
use crate::painter::Painter;

/// Angle in radians between the ship's nose and each rear vertex.
pub const SHIP_WING_SPREAD: f32 = 2.5;

/// Per-frame command queue: collects what is visible, orders it back to front,
/// then hands it to a [`Painter`].
#[derive(Debug, Default)]
pub struct RenderPipeline {
    commands: Vec<RenderCommand>,
    visible_stars: usize,
    visible_asteroids: usize,
}

impl RenderPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the command list for the current camera frustum.
    ///
    /// Stars come first, then asteroids in grid query order, then the ship. The
    /// list is then stably sorted by layer, so equal layers keep that order.
    pub fn collect(
        &mut self,
        grid: &SpatialGrid,
        starfield: &Starfield,
        camera: &GameCamera,
        player: &PlayerSprite,
    ) -> &[RenderCommand] {
        let _span = tracing::trace_span!("collect_commands").entered();
        self.commands.clear();

        let frustum = camera.frustum();

        self.commands
            .extend(starfield.visible(&frustum).map(RenderCommand::star));
        self.visible_stars = self.commands.len();

        let asteroids = grid.query_visible(&frustum);
        self.visible_asteroids = asteroids.len();
        self.commands
            .extend(asteroids.into_iter().map(RenderCommand::asteroid));

        self.commands.push(RenderCommand::player(player));

        // sort_by_key is stable: ties keep insertion order
        self.commands.sort_by_key(|c| c.layer);

        tracing::trace!(
            stars = self.visible_stars,
            asteroids = self.visible_asteroids,
            total = self.commands.len(),
            "render commands collected"
        );
        &self.commands
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Stars that passed the frustum test in the last `collect`.
    pub fn visible_stars(&self) -> usize {
        self.visible_stars
    }

    /// Asteroids returned by the grid query in the last `collect`.
    pub fn visible_asteroids(&self) -> usize {
        self.visible_asteroids
    }

    /// Draw the last collected commands.
    pub fn draw<P: Painter + ?Sized>(&self, camera: &GameCamera, painter: &mut P) {
        draw_commands(&self.commands, camera, painter);
    }
}

/// Map each command into screen space through `camera` and issue its draw call.
///
/// Stars and asteroids become rotated rectangles at their mapped position. The
/// ship ignores its world position: it is always drawn at the center of the
/// camera frame.
pub fn draw_commands<P: Painter + ?Sized>(
    commands: &[RenderCommand],
    camera: &GameCamera,
    painter: &mut P,
) {
    let transform = camera.screen_transform();
    for cmd in commands {
        let size = transform.map_size(cmd.size);
        match cmd.kind {
            CommandKind::Star | CommandKind::Asteroid => {
                let center = transform.map_point(cmd.position);
                painter.rotated_rect(center, size, cmd.rotation, cmd.color);
            }
            CommandKind::Player => {
                let [nose, right, left] =
                    ship_triangle(transform.frame_center(), size, cmd.rotation.to_radians());
                painter.triangle(nose, right, left, cmd.color);
            }
        }
    }
}

/// Ship vertices `[nose, right, left]` around `center` for a heading in radians.
pub fn ship_triangle(center: Vec2, size: Vec2, heading: f32) -> [Vec2; 3] {
    let vertex = |angle: f32| center + Vec2::new(angle.cos(), angle.sin()) * size;
    [
        vertex(heading),
        vertex(heading - SHIP_WING_SPREAD),
        vertex(heading + SHIP_WING_SPREAD),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::painter::{DrawCall, RecordingPainter};
    use approx::assert_relative_eq;
    use asterfield_common::Color;
    use asterfield_grid::{Asteroid, SizeTier};
    use asterfield_starfield::Star;

    fn camera() -> GameCamera {
        // Frustum [400, 600] on both axes, frame 100x100 at (150, 150).
        GameCamera::new(
            Vec2::new(500.0, 500.0),
            Vec2::new(200.0, 200.0),
            Vec2::new(1000.0, 1000.0),
            Vec2::new(400.0, 400.0),
        )
    }

    fn grid() -> SpatialGrid {
        SpatialGrid::new(10, 10, 100.0, 100.0, Vec2::new(400.0, 400.0))
    }

    fn star(x: f32, y: f32) -> Star {
        Star {
            position: Vec2::new(x, y),
            size: 2.0,
            color: Color::WHITE,
            parallax_factor: 0.3,
        }
    }

    fn ship() -> PlayerSprite {
        PlayerSprite {
            position: Vec2::new(510.0, 490.0),
            heading: 0.0,
            size: Vec2::new(30.0, 30.0),
            color: Color::RED,
            layer: 10,
        }
    }

    #[test]
    fn collect_orders_back_to_front_with_stable_ties() {
        let mut grid = grid();
        grid.insert(Asteroid::new(Vec2::new(420.0, 420.0), SizeTier::Large));
        grid.insert(Asteroid::new(Vec2::new(430.0, 430.0), SizeTier::Small));
        grid.insert(Asteroid::new(Vec2::new(520.0, 420.0), SizeTier::Small));
        grid.insert(Asteroid::new(Vec2::new(450.0, 550.0), SizeTier::Medium));
        grid.insert(Asteroid::new(Vec2::new(560.0, 560.0), SizeTier::Large));
        let stars = Starfield::from_stars(vec![star(590.0, 590.0), star(410.0, 410.0)]);

        let mut pipeline = RenderPipeline::new();
        let commands = pipeline.collect(&grid, &stars, &camera(), &ship()).to_vec();

        let layers: Vec<i32> = commands.iter().map(|c| c.layer).collect();
        assert_eq!(layers, vec![0, 0, 1, 1, 2, 3, 3, 10]);

        // Stars keep generation order.
        assert_eq!(commands[0].position, Vec2::new(590.0, 590.0));
        assert_eq!(commands[1].position, Vec2::new(410.0, 410.0));
        // Small asteroids keep grid scan order: cell (4,4) before cell (5,4).
        assert_eq!(commands[2].position, Vec2::new(430.0, 430.0));
        assert_eq!(commands[3].position, Vec2::new(520.0, 420.0));
        // Large asteroids: cell (4,4) row before cell (5,5) row.
        assert_eq!(commands[5].position, Vec2::new(420.0, 420.0));
        assert_eq!(commands[6].position, Vec2::new(560.0, 560.0));

        assert_eq!(commands.last().map(|c| c.kind), Some(CommandKind::Player));
        assert_eq!(
            commands.iter().filter(|c| c.kind == CommandKind::Player).count(),
            1
        );
        assert_eq!(pipeline.visible_stars(), 2);
        assert_eq!(pipeline.visible_asteroids(), 5);
    }

    #[test]
    fn collect_skips_objects_outside_frustum() {
        let mut grid = grid();
        grid.insert(Asteroid::new(Vec2::new(100.0, 100.0), SizeTier::Large));
        grid.insert(Asteroid::new(Vec2::new(395.0, 500.0), SizeTier::Small)); // box reaches 405
        let stars = Starfield::from_stars(vec![star(399.0, 500.0), star(400.0, 500.0)]);

        let mut pipeline = RenderPipeline::new();
        let commands = pipeline.collect(&grid, &stars, &camera(), &ship());
        let kinds: Vec<CommandKind> = commands.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![CommandKind::Star, CommandKind::Asteroid, CommandKind::Player]
        );
    }

    #[test]
    fn collect_replaces_previous_frame() {
        let grid = grid();
        let stars = Starfield::from_stars(vec![star(500.0, 500.0)]);
        let mut pipeline = RenderPipeline::new();
        pipeline.collect(&grid, &stars, &camera(), &ship());
        pipeline.collect(&grid, &stars, &camera(), &ship());
        assert_eq!(pipeline.commands().len(), 2);
    }

    #[test]
    fn draw_maps_world_to_frame() {
        let mut grid = grid();
        grid.insert(Asteroid::new(Vec2::new(500.0, 500.0), SizeTier::Medium).with_spin(45.0, 0.0));
        grid.insert(Asteroid::new(Vec2::new(420.0, 580.0), SizeTier::Small));
        let cam = camera();

        let mut pipeline = RenderPipeline::new();
        pipeline.collect(&grid, &Starfield::default(), &cam, &ship());
        let mut painter = RecordingPainter::new();
        pipeline.draw(&cam, &mut painter);

        assert_eq!(
            painter.calls()[0],
            DrawCall::RotatedRect {
                center: Vec2::new(160.0, 240.0),
                size: Vec2::new(10.0, 10.0),
                rotation: 0.0,
                color: Color::gray(200),
            }
        );
        assert_eq!(
            painter.calls()[1],
            DrawCall::RotatedRect {
                center: Vec2::new(200.0, 200.0),
                size: Vec2::new(20.0, 20.0),
                rotation: 45.0,
                color: Color::gray(200),
            }
        );
    }

    #[test]
    fn ship_is_drawn_at_frame_center() {
        let cam = camera();
        let mut sprite = ship();
        sprite.position = Vec2::new(900.0, 100.0);
        sprite.heading = std::f32::consts::FRAC_PI_2;

        let mut painter = RecordingPainter::new();
        draw_commands(&[RenderCommand::player(&sprite)], &cam, &mut painter);

        let DrawCall::Triangle { points, color } = &painter.calls()[0] else {
            panic!("expected a triangle, got {:?}", painter.calls());
        };
        assert_eq!(*color, Color::RED);
        // Frame center is (200, 200); scaled size is 15; heading points down the screen.
        assert_relative_eq!(points[0].x, 200.0, epsilon = 1e-3);
        assert_relative_eq!(points[0].y, 215.0, epsilon = 1e-3);
        let centroid = (points[0] + points[1] + points[2]) / 3.0;
        assert!(centroid.y < 215.0);
    }

    #[test]
    fn ship_heading_survives_degree_conversion() {
        let cam = camera();
        let center = cam.screen_transform().frame_center();
        let mut sprite = ship();
        for heading in [0.0, 0.3, -1.2, std::f32::consts::PI, 7.5] {
            sprite.heading = heading;
            let cmd = RenderCommand::player(&sprite);
            assert_relative_eq!(cmd.rotation, heading.to_degrees());

            let mut painter = RecordingPainter::new();
            draw_commands(&[cmd], &cam, &mut painter);
            let DrawCall::Triangle { points, .. } = &painter.calls()[0] else {
                panic!("expected a triangle, got {:?}", painter.calls());
            };
            let size = cam.screen_transform().map_size(sprite.size);
            let expected = ship_triangle(center, size, heading);
            for (got, want) in points.iter().zip(expected) {
                assert_relative_eq!(got.x, want.x, epsilon = 1e-3);
                assert_relative_eq!(got.y, want.y, epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn ship_triangle_uses_fixed_spread() {
        let [nose, right, left] = ship_triangle(Vec2::ZERO, Vec2::splat(10.0), 0.0);
        assert_eq!(nose, Vec2::new(10.0, 0.0));
        assert_relative_eq!(right.x, 10.0 * (-2.5f32).cos());
        assert_relative_eq!(right.y, 10.0 * (-2.5f32).sin());
        assert_relative_eq!(left.y, -right.y);
    }
}
