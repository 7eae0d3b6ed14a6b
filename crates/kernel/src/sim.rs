use asterfield_camera::GameCamera;
use asterfield_common::{ConfigError, FieldConfig};
use asterfield_grid::SpatialGrid;
use asterfield_input::ControlState;
use asterfield_render::{Painter, RenderCommand, RenderPipeline};
use asterfield_starfield::Starfield;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::player::Player;

/// Errors from building a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("invalid field configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Owns the whole field and advances it one tick at a time.
///
/// A tick runs input -> ship physics -> camera tracking -> asteroid rotation ->
/// command collection, in that order, to completion. Drawing is a separate
/// read-only step over the collected commands.
///
/// Generation is seeded from `FieldConfig::seed`: the same configuration and
/// the same control sequence always produce the same frames.
pub struct Simulation {
    config: FieldConfig,
    grid: SpatialGrid,
    starfield: Starfield,
    camera: GameCamera,
    player: Player,
    pipeline: RenderPipeline,
    show_debug: bool,
    tick: u64,
    total_asteroids: usize,
}

impl Simulation {
    /// Validate `config` and generate the field.
    pub fn new(config: FieldConfig) -> Result<Self, SimError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);

        let mut grid = SpatialGrid::from_config(&config.grid, config.screen_size);
        let total_asteroids = grid.generate_asteroids(config.asteroid_count, &mut rng);

        let mut player = Player::new(config.world_size / 2.0, config.player);
        let camera = GameCamera::new(
            player.position(),
            config.viewport_size,
            config.world_size,
            config.screen_size,
        );
        player.set_view_bounds(config.world_size, camera.frame());

        let starfield = Starfield::generate(config.world_size, config.star_count, &mut rng);

        let mut sim = Self {
            config,
            grid,
            starfield,
            camera,
            player,
            pipeline: RenderPipeline::new(),
            show_debug: true,
            tick: 0,
            total_asteroids,
        };
        sim.collect();

        tracing::info!(
            seed = sim.config.seed,
            asteroids = sim.total_asteroids,
            stars = sim.starfield.len(),
            "simulation initialized"
        );
        Ok(sim)
    }

    /// Advance one tick. `dt` is the frame time in seconds, used for turning.
    pub fn tick(&mut self, controls: &ControlState, dt: f32) {
        let _span = tracing::info_span!("tick", tick = self.tick).entered();

        self.apply_controls(controls, dt);
        self.player.update();
        self.camera.update(self.player.position());
        self.grid.advance();
        self.collect();

        self.tick += 1;
        tracing::trace!(
            player = ?self.player.position(),
            camera = ?self.camera.position(),
            visible = self.pipeline.visible_asteroids(),
            "tick complete"
        );
    }

    /// Draw the commands collected by the last tick.
    pub fn render<P: Painter + ?Sized>(&self, painter: &mut P) {
        self.pipeline.draw(&self.camera, painter);
    }

    fn apply_controls(&mut self, controls: &ControlState, dt: f32) {
        if controls.thrust {
            self.player.apply_thrust();
        }
        if controls.rotate_left {
            self.player.rotate_left(dt);
        }
        if controls.rotate_right {
            self.player.rotate_right(dt);
        }
        if controls.toggle_debug {
            self.show_debug = !self.show_debug;
            tracing::debug!(show_debug = self.show_debug, "debug overlay toggled");
        }
    }

    fn collect(&mut self) {
        let sprite = self.player.sprite();
        self.pipeline
            .collect(&self.grid, &self.starfield, &self.camera, &sprite);
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    pub fn camera(&self) -> &GameCamera {
        &self.camera
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn commands(&self) -> &[RenderCommand] {
        self.pipeline.commands()
    }

    pub fn visible_asteroids(&self) -> usize {
        self.pipeline.visible_asteroids()
    }

    pub fn visible_stars(&self) -> usize {
        self.pipeline.visible_stars()
    }

    /// Asteroids stored in the grid.
    pub fn total_asteroids(&self) -> usize {
        self.total_asteroids
    }

    pub fn show_debug(&self) -> bool {
        self.show_debug
    }

    /// Ticks run so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use asterfield_common::GridConfig;
    use asterfield_render::{CommandKind, DrawCall, RecordingPainter};
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn small_config() -> FieldConfig {
        FieldConfig {
            world_size: Vec2::new(2000.0, 2000.0),
            screen_size: Vec2::new(800.0, 600.0),
            viewport_size: Vec2::new(400.0, 300.0),
            grid: GridConfig {
                columns: 4,
                rows: 4,
                cell_width: 500.0,
                cell_height: 500.0,
            },
            asteroid_count: 300,
            star_count: 80,
            seed: 9,
            ..FieldConfig::default()
        }
    }

    fn thrusting() -> ControlState {
        ControlState {
            thrust: true,
            ..ControlState::default()
        }
    }

    fn assert_sorted(commands: &[RenderCommand]) {
        assert!(commands.windows(2).all(|w| w[0].layer <= w[1].layer));
        assert_eq!(commands.last().map(|c| c.kind), Some(CommandKind::Player));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = FieldConfig {
            viewport_size: Vec2::ZERO,
            ..small_config()
        };
        assert!(matches!(Simulation::new(config), Err(SimError::Config(_))));
    }

    #[test]
    fn frame_must_fit_on_screen() {
        // A 1000x1000 viewport puts a 500x500 frame on a 300x300 screen.
        let config = FieldConfig {
            screen_size: Vec2::new(300.0, 300.0),
            viewport_size: Vec2::new(1000.0, 1000.0),
            ..small_config()
        };
        assert!(matches!(
            Simulation::new(config),
            Err(SimError::Config(ConfigError::FrameLargerThanScreen { .. }))
        ));
    }

    #[test]
    fn new_generates_field_around_centered_player() {
        let sim = Simulation::new(small_config()).unwrap();
        assert_eq!(sim.total_asteroids(), 300);
        assert_eq!(sim.grid().object_count(), 300);
        assert_eq!(sim.starfield().len(), 80);
        assert_eq!(sim.player().position(), Vec2::new(1000.0, 1000.0));
        assert_eq!(sim.camera().position(), Vec2::new(1000.0, 1000.0));
        assert_eq!(sim.tick_count(), 0);
        assert!(sim.show_debug());
        // Commands are ready before the first tick.
        assert_sorted(sim.commands());
    }

    #[test]
    fn idle_ticks_keep_camera_still_and_spin_asteroids() {
        let mut sim = Simulation::new(small_config()).unwrap();
        let before: Vec<f32> = sim
            .grid()
            .cells()
            .flat_map(|(_, c)| c.asteroids().iter().map(|a| a.rotation))
            .collect();

        sim.tick(&ControlState::default(), DT);
        assert_eq!(sim.camera().position(), Vec2::new(1000.0, 1000.0));
        assert_eq!(sim.tick_count(), 1);

        let after: Vec<f32> = sim
            .grid()
            .cells()
            .flat_map(|(_, c)| c.asteroids().iter().map(|a| a.rotation))
            .collect();
        assert_eq!(before.len(), after.len());
        assert!(before.iter().zip(&after).all(|(b, a)| b != a));
    }

    #[test]
    fn thrust_moves_player_and_keeps_camera_in_world() {
        let mut sim = Simulation::new(small_config()).unwrap();
        for _ in 0..600 {
            sim.tick(&thrusting(), DT);
            let p = sim.camera().position();
            assert!((200.0..=1800.0).contains(&p.x));
            assert!((150.0..=1850.0).contains(&p.y));
            let f = sim.camera().frame();
            assert!(f.x >= 0.0 && f.max().x <= 800.0);
            assert!(f.y >= 0.0 && f.max().y <= 600.0);
            assert_sorted(sim.commands());
        }
        // Heading 0 points along +x; the ship ends pinned by the frame margin.
        assert_relative_eq!(sim.player().position().x, 2000.0 - 200.0);
        assert_relative_eq!(sim.player().position().y, 1000.0);
    }

    #[test]
    fn rotation_uses_frame_time() {
        let mut sim = Simulation::new(small_config()).unwrap();
        let turn = ControlState {
            rotate_right: true,
            ..ControlState::default()
        };
        sim.tick(&turn, 0.25);
        assert_relative_eq!(sim.player().heading(), 1.0);
    }

    #[test]
    fn toggle_debug_flips_once_per_press() {
        let mut sim = Simulation::new(small_config()).unwrap();
        let toggle = ControlState {
            toggle_debug: true,
            ..ControlState::default()
        };
        sim.tick(&toggle, DT);
        assert!(!sim.show_debug());
        sim.tick(&ControlState::default(), DT);
        assert!(!sim.show_debug());
        sim.tick(&toggle, DT);
        assert!(sim.show_debug());
    }

    #[test]
    fn render_issues_one_call_per_command() {
        let mut sim = Simulation::new(small_config()).unwrap();
        sim.tick(&ControlState::default(), DT);

        let mut painter = RecordingPainter::new();
        sim.render(&mut painter);
        assert_eq!(painter.len(), sim.commands().len());
        assert!(matches!(
            painter.calls().last(),
            Some(DrawCall::Triangle { .. })
        ));
        assert_eq!(
            sim.commands().len(),
            sim.visible_stars() + sim.visible_asteroids() + 1
        );
    }

    #[test]
    fn visible_asteroids_all_touch_frustum() {
        let sim = Simulation::new(small_config()).unwrap();
        let frustum = sim.camera().frustum();
        let hits = sim.grid().query_visible(&frustum);
        assert_eq!(hits.len(), sim.visible_asteroids());
        assert!(hits.iter().all(|a| a.bounds().intersects(&frustum)));
    }

    #[test]
    fn same_seed_same_frames() {
        let run = || {
            let mut sim = Simulation::new(small_config()).unwrap();
            for i in 0..30 {
                let controls = ControlState {
                    thrust: true,
                    rotate_left: i % 3 == 0,
                    ..ControlState::default()
                };
                sim.tick(&controls, DT);
            }
            let commands: Vec<RenderCommand> = sim.commands().to_vec();
            commands
        };
        assert_eq!(run(), run());
    }
}
