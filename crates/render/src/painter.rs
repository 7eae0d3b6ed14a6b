use std::fmt;

use asterfield_common::{Color, Rect};
use glam::Vec2;

/// Backend-agnostic drawing surface. Every renderer implements this trait.
///
/// Calls are fire-and-forget: nothing is returned and nothing the pipeline
/// reads back. Coordinates are screen-space.
pub trait Painter {
    /// Filled rectangle centered on `center`, rotated clockwise by `rotation_degrees`.
    fn rotated_rect(&mut self, center: Vec2, size: Vec2, rotation_degrees: f32, color: Color);

    fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color);

    fn line(&mut self, from: Vec2, to: Vec2, color: Color);

    fn rect_outline(&mut self, rect: Rect, thickness: f32, color: Color);

    fn filled_rect(&mut self, rect: Rect, color: Color);

    /// Text with its top-left corner at `position`.
    fn text(&mut self, text: &str, position: Vec2, font_size: f32, color: Color);

    fn circle(&mut self, center: Vec2, radius: f32, color: Color);
}

/// Corners of a rotated rectangle, clockwise starting from the top-left.
pub fn rotated_rect_corners(center: Vec2, size: Vec2, rotation_degrees: f32) -> [Vec2; 4] {
    let half = size / 2.0;
    let rot = Vec2::from_angle(rotation_degrees.to_radians());
    [
        Vec2::new(-half.x, -half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(half.x, half.y),
        Vec2::new(-half.x, half.y),
    ]
    .map(|corner| center + rot.rotate(corner))
}

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    RotatedRect {
        center: Vec2,
        size: Vec2,
        rotation: f32,
        color: Color,
    },
    Triangle {
        points: [Vec2; 3],
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
    },
    RectOutline {
        rect: Rect,
        thickness: f32,
        color: Color,
    },
    FilledRect {
        rect: Rect,
        color: Color,
    },
    Text {
        text: String,
        position: Vec2,
        font_size: f32,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
}

/// Painter that records calls instead of drawing them.
///
/// Used for headless runs and tests; `Display` prints one call per line.
#[derive(Debug, Default)]
pub struct RecordingPainter {
    calls: Vec<DrawCall>,
}

impl RecordingPainter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Texts drawn so far, in call order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Painter for RecordingPainter {
    fn rotated_rect(&mut self, center: Vec2, size: Vec2, rotation_degrees: f32, color: Color) {
        self.calls.push(DrawCall::RotatedRect {
            center,
            size,
            rotation: rotation_degrees,
            color,
        });
    }

    fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        self.calls.push(DrawCall::Triangle {
            points: [a, b, c],
            color,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.calls.push(DrawCall::Line { from, to, color });
    }

    fn rect_outline(&mut self, rect: Rect, thickness: f32, color: Color) {
        self.calls.push(DrawCall::RectOutline {
            rect,
            thickness,
            color,
        });
    }

    fn filled_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(DrawCall::FilledRect { rect, color });
    }

    fn text(&mut self, text: &str, position: Vec2, font_size: f32, color: Color) {
        self.calls.push(DrawCall::Text {
            text: text.to_owned(),
            position,
            font_size,
            color,
        });
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            color,
        });
    }
}

impl fmt::Display for RecordingPainter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Draw calls ({}) ===", self.calls.len())?;
        for call in &self.calls {
            match call {
                DrawCall::RotatedRect {
                    center,
                    size,
                    rotation,
                    ..
                } => writeln!(
                    f,
                    "  rect center=({:.1}, {:.1}) size=({:.1}, {:.1}) rot={:.1}",
                    center.x, center.y, size.x, size.y, rotation
                )?,
                DrawCall::Triangle { points, .. } => writeln!(
                    f,
                    "  triangle ({:.1}, {:.1}) ({:.1}, {:.1}) ({:.1}, {:.1})",
                    points[0].x, points[0].y, points[1].x, points[1].y, points[2].x, points[2].y
                )?,
                DrawCall::Line { from, to, .. } => writeln!(
                    f,
                    "  line ({:.1}, {:.1}) -> ({:.1}, {:.1})",
                    from.x, from.y, to.x, to.y
                )?,
                DrawCall::RectOutline { rect, .. } => writeln!(
                    f,
                    "  outline ({:.1}, {:.1}) {:.1}x{:.1}",
                    rect.x, rect.y, rect.width, rect.height
                )?,
                DrawCall::FilledRect { rect, .. } => writeln!(
                    f,
                    "  fill ({:.1}, {:.1}) {:.1}x{:.1}",
                    rect.x, rect.y, rect.width, rect.height
                )?,
                DrawCall::Text { text, position, .. } => {
                    writeln!(f, "  text ({:.0}, {:.0}) {text:?}", position.x, position.y)?
                }
                DrawCall::Circle { center, radius, .. } => writeln!(
                    f,
                    "  circle ({:.1}, {:.1}) r={radius:.1}",
                    center.x, center.y
                )?,
            }
        }
        Ok(())
    }
}
