use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle given by its top-left corner and extent.
///
/// Used for both world-space regions (frustum, cell bounds, bounding boxes)
/// and screen-space regions (camera frame, minimap).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given extent centered on `center`.
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::from_origin_size(center - size / 2.0, size)
    }

    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.origin() + self.size() / 2.0
    }

    /// Bottom-right corner (`origin + size`).
    pub fn max(&self) -> Vec2 {
        self.origin() + self.size()
    }

    /// Overlap test with open edges: rectangles that only touch do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    /// Point containment with closed edges.
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// Same extent, moved so that its origin is `origin`.
    pub fn with_origin(self, origin: Vec2) -> Self {
        Self::from_origin_size(origin, self.size())
    }
}

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const GRAY: Color = Color::rgba(130, 130, 130, 255);
    pub const DARK_GRAY: Color = Color::rgba(80, 80, 80, 255);
    pub const RED: Color = Color::rgba(230, 41, 55, 255);
    pub const GREEN: Color = Color::rgba(0, 228, 48, 255);
    pub const YELLOW: Color = Color::rgba(253, 249, 0, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque gray with all channels set to `level`.
    pub const fn gray(level: u8) -> Self {
        Self::rgba(level, level, level, 255)
    }

    /// Same color with alpha scaled to `alpha` (clamped to `[0, 1]`).
    pub fn fade(self, alpha: f32) -> Self {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { a, ..self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn from_center_places_origin_half_size_back() {
        let r = Rect::from_center(Vec2::new(150.0, 150.0), Vec2::new(20.0, 40.0));
        assert_eq!(r, Rect::new(140.0, 130.0, 20.0, 40.0));
        assert_relative_eq!(r.center().x, 150.0);
        assert_relative_eq!(r.center().y, 150.0);
    }

    #[test]
    fn touching_rects_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(100.0, 0.0, 100.0, 100.0);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn overlapping_rects_intersect_both_ways() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(90.0, 90.0, 5.0, 50.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn contains_point_includes_edges() {
        let r = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert!(r.contains_point(Vec2::new(10.0, 20.0)));
        assert!(r.contains_point(Vec2::new(15.0, 15.0)));
        assert!(!r.contains_point(Vec2::new(20.1, 15.0)));
    }

    #[test]
    fn fade_scales_alpha_only() {
        let c = Color::DARK_GRAY.fade(0.5);
        assert_eq!(c.r, Color::DARK_GRAY.r);
        assert_eq!(c.a, 128);
        assert_eq!(Color::RED.fade(2.0).a, 255);
    }
}
