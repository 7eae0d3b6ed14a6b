use asterfield_camera::GameCamera;
use asterfield_common::{Color, Rect};
use asterfield_grid::SpatialGrid;
use asterfield_kernel::Simulation;
use asterfield_render::Painter;
use glam::Vec2;

const HUD_FONT: f32 = 20.0;
const LABEL_FONT: f32 = 11.0;
const CONTROLS_HINT: &str = "Controls: W - Thrust, A/D - Rotate, F1 - Toggle Debug";

/// Draw every debug layer when the simulation has debug display on.
pub fn draw_debug_overlay<P: Painter + ?Sized>(sim: &Simulation, fps: u32, painter: &mut P) {
    if !sim.show_debug() {
        return;
    }
    draw_hud(sim, fps, painter);
    draw_grid_overlay(sim.grid(), sim.camera(), painter);
    draw_camera_overlay(sim.camera(), painter);
}

/// Top-left counters plus the controls hint along the bottom of the screen.
pub fn draw_hud<P: Painter + ?Sized>(sim: &Simulation, fps: u32, painter: &mut P) {
    let player = sim.player().position();
    let lines = [
        format!("FPS: {fps}"),
        format!("Visible: {}/{}", sim.visible_asteroids(), sim.total_asteroids()),
        format!("Position: ({:.1}, {:.1})", player.x, player.y),
    ];
    for (i, line) in lines.iter().enumerate() {
        let pos = Vec2::new(10.0, 10.0 + 25.0 * i as f32);
        painter.text(line, pos, HUD_FONT, Color::GRAY);
    }

    let bottom = sim.camera().screen_size().y - 30.0;
    painter.text(CONTROLS_HINT, Vec2::new(10.0, bottom), HUD_FONT, Color::GRAY);
}

/// Cell boundaries inside the camera frame, then the minimap.
pub fn draw_grid_overlay<P: Painter + ?Sized>(
    grid: &SpatialGrid,
    camera: &GameCamera,
    painter: &mut P,
) {
    let frame = camera.frame();
    let to_screen = camera.screen_transform();
    let color = Color::DARK_GRAY.fade(0.5);
    let cell = grid.cell_size();

    for col in 0..=grid.columns() {
        let x = to_screen.map_point(Vec2::new(col as f32 * cell.x, 0.0)).x;
        if x >= frame.x && x <= frame.max().x {
            painter.line(Vec2::new(x, frame.y), Vec2::new(x, frame.max().y), color);
        }
    }
    for row in 0..=grid.rows() {
        let y = to_screen.map_point(Vec2::new(0.0, row as f32 * cell.y)).y;
        if y >= frame.y && y <= frame.max().y {
            painter.line(Vec2::new(frame.x, y), Vec2::new(frame.max().x, y), color);
        }
    }

    draw_minimap(grid, camera, painter);
}

/// Square in the top-right corner showing the whole grid, the cells the
/// frustum touches, and the frustum itself.
pub fn draw_minimap<P: Painter + ?Sized>(grid: &SpatialGrid, camera: &GameCamera, painter: &mut P) {
    let map = minimap_rect(grid.screen_size());
    let scale = map.width / grid.extent().x;
    let to_map = |world: Rect| {
        Rect::new(
            map.x + world.x * scale,
            map.y + world.y * scale,
            world.width * scale,
            world.height * scale,
        )
    };

    painter.filled_rect(map, Color::BLACK.fade(0.5));

    let frustum = camera.frustum();
    let mut highlighted = 0;
    for (coord, _) in grid.cells() {
        if grid.is_cell_visible(coord, &frustum) {
            painter.filled_rect(to_map(grid.cell_bounds(coord)), Color::GREEN.fade(0.2));
            highlighted += 1;
        }
    }
    tracing::trace!(highlighted, "minimap cells in frustum");

    let cell = grid.cell_size() * scale;
    for col in 0..=grid.columns() {
        let x = map.x + col as f32 * cell.x;
        painter.line(Vec2::new(x, map.y), Vec2::new(x, map.max().y), Color::DARK_GRAY);
    }
    for row in 0..=grid.rows() {
        let y = map.y + row as f32 * cell.y;
        painter.line(Vec2::new(map.x, y), Vec2::new(map.max().x, y), Color::DARK_GRAY);
    }

    painter.rect_outline(to_map(frustum), 1.0, Color::GREEN);
}

/// Screen rectangle the minimap occupies: side of a tenth of the screen width.
pub fn minimap_rect(screen_size: Vec2) -> Rect {
    let side = (screen_size.x / 10.0).floor();
    Rect::new(screen_size.x - side, 0.0, side, side)
}

/// Frame outline, its center point, and the frame/world labels above it.
pub fn draw_camera_overlay<P: Painter + ?Sized>(camera: &GameCamera, painter: &mut P) {
    let frame = camera.frame();
    painter.rect_outline(frame, 1.0, Color::GREEN);
    painter.circle(frame.center(), 2.0, Color::GREEN);

    let position = camera.position();
    let label_y = frame.y - 13.0;
    let labels: [(f32, String); 3] = [
        (0.0, format!("Camera Frame: ({:.0}, {:.0})", frame.x, frame.y)),
        (160.0, format!("Frustum Size: {:.0}x{:.0}", frame.width, frame.height)),
        (300.0, format!("World Camera: ({:.0}, {:.0})", position.x, position.y)),
    ];
    for (dx, label) in &labels {
        painter.text(label, Vec2::new(frame.x + dx, label_y), LABEL_FONT, Color::GREEN);
    }
}
