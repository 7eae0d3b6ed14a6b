use asterfield_common::Rect;
use glam::Vec2;

/// 2D camera built from two rectangles.
///
/// The *frustum* is the world-space region being viewed: always `viewport_size`
/// large and centered on `position`. The *frame* is the on-screen rectangle the
/// frustum is drawn into. Both track the same target, each clamped to its own
/// bounds, so when the frame is pinned against a screen edge the world view
/// still follows the target.
#[derive(Debug, Clone, PartialEq)]
pub struct GameCamera {
    position: Vec2,
    viewport_size: Vec2,
    world_size: Vec2,
    screen_size: Vec2,
    frustum: Rect,
    frame: Rect,
}

impl GameCamera {
    /// Camera looking at `position`, with the frame centered on screen at half the
    /// viewport size.
    pub fn new(position: Vec2, viewport_size: Vec2, world_size: Vec2, screen_size: Vec2) -> Self {
        let frame_size = viewport_size / 2.0;
        let frame = Rect::from_origin_size((screen_size - frame_size) / 2.0, frame_size);

        let mut camera = Self {
            position,
            viewport_size,
            world_size,
            screen_size,
            frustum: Rect::from_center(position, viewport_size),
            frame,
        };
        camera.clamp_to_world();
        camera.refresh_frustum();
        tracing::debug!(
            position = ?camera.position,
            frame = ?camera.frame,
            "camera initialized"
        );
        camera
    }

    /// Follow `target` for one tick.
    ///
    /// The frame moves first, by the target offset scaled into screen units, and
    /// is clamped to the screen. The world position then moves by the same offset
    /// (measured from the position before this call) scaled by the inverse ratio,
    /// and is clamped so the frustum stays inside the world.
    pub fn update(&mut self, target: Vec2) {
        let previous = self.position;

        self.move_frame(target);

        let offset = (target - previous) * (self.viewport_size / self.frame.size());
        self.position = previous + offset;
        self.clamp_to_world();
        self.refresh_frustum();
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Move the camera without clamping. Keeping it inside the world is up to the caller.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.refresh_frustum();
    }

    pub fn frustum(&self) -> Rect {
        self.frustum
    }

    pub fn viewport_size(&self) -> Vec2 {
        self.viewport_size
    }

    /// On-screen rectangle the frustum is drawn into.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn world_size(&self) -> Vec2 {
        self.world_size
    }

    pub fn screen_size(&self) -> Vec2 {
        self.screen_size
    }

    /// World-to-screen scale per axis (`frame / viewport`).
    pub fn scale(&self) -> Vec2 {
        self.frame.size() / self.viewport_size
    }

    /// Snapshot of the current world-to-screen mapping.
    pub fn screen_transform(&self) -> ScreenTransform {
        ScreenTransform {
            frame_origin: self.frame.origin(),
            camera_position: self.position,
            half_viewport: self.viewport_size / 2.0,
            scale: self.scale(),
        }
    }

    fn move_frame(&mut self, target: Vec2) {
        let delta = (target - self.position) * self.scale();
        let origin = self.frame.origin() + delta;
        let size = self.frame.size();
        let clamped = Vec2::new(
            clamp_into_screen(origin.x, size.x, self.screen_size.x),
            clamp_into_screen(origin.y, size.y, self.screen_size.y),
        );
        self.frame = self.frame.with_origin(clamped);
    }

    fn clamp_to_world(&mut self) {
        let half = self.viewport_size / 2.0;
        self.position = Vec2::new(
            clamp_into_world(self.position.x, half.x, self.world_size.x),
            clamp_into_world(self.position.y, half.y, self.world_size.y),
        );
    }

    fn refresh_frustum(&mut self) {
        self.frustum = Rect::from_center(self.position, self.viewport_size);
    }
}

/// Keep a frustum of half-extent `half` centered on `center` inside `[0, world]`.
/// The low edge wins when the frustum is wider than the world.
fn clamp_into_world(center: f32, half: f32, world: f32) -> f32 {
    if center - half < 0.0 {
        half
    } else if center + half > world {
        world - half
    } else {
        center
    }
}

/// Keep a span starting at `origin` with length `extent` inside `[0, screen]`.
fn clamp_into_screen(origin: f32, extent: f32, screen: f32) -> f32 {
    let mut origin = origin.max(0.0);
    if origin + extent > screen {
        origin = screen - extent;
    }
    origin
}

/// World-to-screen mapping captured from a [`GameCamera`].
///
/// `screen = frame_origin + (world - camera_position + viewport / 2) * scale`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTransform {
    pub frame_origin: Vec2,
    pub camera_position: Vec2,
    pub half_viewport: Vec2,
    pub scale: Vec2,
}

impl ScreenTransform {
    pub fn map_point(&self, world: Vec2) -> Vec2 {
        self.frame_origin + (world - self.camera_position + self.half_viewport) * self.scale
    }

    pub fn map_size(&self, size: Vec2) -> Vec2 {
        size * self.scale
    }

    /// Screen position of the frame center, where the camera's target is drawn.
    pub fn frame_center(&self) -> Vec2 {
        self.frame_origin + self.half_viewport * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera_at(position: Vec2) -> GameCamera {
        GameCamera::new(
            position,
            Vec2::new(200.0, 200.0),
            Vec2::new(1000.0, 1000.0),
            Vec2::new(400.0, 400.0),
        )
    }

    #[test]
    fn frame_starts_centered_at_half_viewport() {
        let cam = camera_at(Vec2::new(500.0, 500.0));
        assert_eq!(cam.frame(), Rect::new(150.0, 150.0, 100.0, 100.0));
        assert_eq!(cam.scale(), Vec2::splat(0.5));
    }

    #[test]
    fn initial_position_is_clamped_and_frustum_follows() {
        let cam = camera_at(Vec2::new(10.0, 990.0));
        assert_eq!(cam.position(), Vec2::new(100.0, 900.0));
        assert_eq!(cam.frustum(), Rect::new(0.0, 800.0, 200.0, 200.0));
    }

    #[test]
    fn equal_target_is_a_fixed_point() {
        let mut cam = camera_at(Vec2::new(500.0, 500.0));
        let frame = cam.frame();
        for _ in 0..50 {
            cam.update(Vec2::new(500.0, 500.0));
        }
        assert_eq!(cam.position(), Vec2::new(500.0, 500.0));
        assert_eq!(cam.frame(), frame);
    }

    #[test]
    fn frame_and_position_move_at_matched_rates() {
        let mut cam = camera_at(Vec2::new(500.0, 500.0));
        cam.update(Vec2::new(540.0, 480.0));
        // Frame moves by the offset in screen units (x0.5)...
        assert_relative_eq!(cam.frame().x, 170.0);
        assert_relative_eq!(cam.frame().y, 140.0);
        // ...and the world position by the inverse ratio (x2), from the old position.
        assert_relative_eq!(cam.position().x, 580.0);
        assert_relative_eq!(cam.position().y, 460.0);
    }

    #[test]
    fn pinned_frame_does_not_stop_world_tracking() {
        let mut cam = GameCamera::new(
            Vec2::new(500.0, 500.0),
            Vec2::new(200.0, 200.0),
            Vec2::new(1000.0, 1000.0),
            Vec2::new(200.0, 200.0),
        );
        assert_eq!(cam.frame(), Rect::new(50.0, 50.0, 100.0, 100.0));

        cam.update(Vec2::new(650.0, 500.0));
        assert_relative_eq!(cam.frame().x, 100.0);
        assert_relative_eq!(cam.position().x, 800.0);
    }

    #[test]
    fn position_stays_in_world_for_wild_targets() {
        let mut cam = camera_at(Vec2::new(500.0, 500.0));
        let targets = [
            Vec2::new(-5000.0, 300.0),
            Vec2::new(20_000.0, -20_000.0),
            Vec2::new(999.0, 1.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(1e6, 1e6),
            Vec2::new(433.0, 612.0),
        ];
        for _ in 0..5 {
            for target in targets {
                cam.update(target);
                let p = cam.position();
                assert!((100.0..=900.0).contains(&p.x), "x out of bounds: {p:?}");
                assert!((100.0..=900.0).contains(&p.y), "y out of bounds: {p:?}");

                let f = cam.frame();
                assert!(f.x >= 0.0 && f.x + f.width <= 400.0, "frame out of screen: {f:?}");
                assert!(f.y >= 0.0 && f.y + f.height <= 400.0, "frame out of screen: {f:?}");

                let frustum = cam.frustum();
                assert_eq!(frustum.size(), cam.viewport_size());
                assert_relative_eq!(frustum.center().x, p.x);
                assert_relative_eq!(frustum.center().y, p.y);
            }
        }
    }

    #[test]
    fn set_position_bypasses_clamping() {
        let mut cam = camera_at(Vec2::new(500.0, 500.0));
        cam.set_position(Vec2::new(-50.0, 2000.0));
        assert_eq!(cam.position(), Vec2::new(-50.0, 2000.0));
        assert_eq!(cam.frustum().center(), Vec2::new(-50.0, 2000.0));
    }

    #[test]
    fn camera_position_maps_to_frame_center() {
        let mut cam = camera_at(Vec2::new(500.0, 500.0));
        cam.update(Vec2::new(530.0, 520.0));
        let t = cam.screen_transform();
        let center = t.map_point(cam.position());
        assert_relative_eq!(center.x, cam.frame().center().x);
        assert_relative_eq!(center.y, cam.frame().center().y);
        assert_eq!(t.frame_center(), cam.frame().center());
        assert_eq!(t.map_size(Vec2::new(20.0, 40.0)), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn frustum_corner_maps_to_frame_corner() {
        let cam = camera_at(Vec2::new(500.0, 500.0));
        let t = cam.screen_transform();
        assert_eq!(t.map_point(cam.frustum().origin()), cam.frame().origin());
        assert_eq!(t.map_point(cam.frustum().max()), cam.frame().max());
    }
}
