#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Pixel Quest adapters.
//!
//! A [`Scene`] is a flat list of coloured primitives and text labels expressed
//! in arena units. Backends scale the arena uniformly to the window and draw
//! primitives in insertion order, then labels on top.

use anyhow::Result as AnyResult;
use glam::Vec2;
use pixel_quest_core::Rect;
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Discrete key presses observed during a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Press {
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Jump key.
    Jump,
    /// Enter key.
    Confirm,
    /// Escape key.
    Cancel,
    /// Restart key.
    Restart,
    /// Quit key.
    Quit,
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Keys pressed since the previous frame, in a fixed order.
    pub presses: Vec<Press>,
    /// Whether the left movement key is held down.
    pub held_left: bool,
    /// Whether the right movement key is held down.
    pub held_right: bool,
}

/// Tells the backend whether to keep presenting frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Present the updated scene and continue.
    Continue,
    /// Close the window after this frame.
    Exit,
}

/// Geometric primitive expressed in arena units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Filled axis-aligned rectangle.
    Rectangle(Rect),
    /// Filled ellipse inscribed in the rectangle.
    Ellipse(Rect),
    /// Filled circle.
    Circle {
        /// Centre of the circle.
        center: Vec2,
        /// Radius of the circle.
        radius: f32,
    },
    /// Circle outline.
    Ring {
        /// Centre of the ring.
        center: Vec2,
        /// Outer radius of the ring.
        radius: f32,
        /// Stroke width.
        thickness: f32,
    },
    /// Straight segment.
    Line {
        /// Start of the segment.
        from: Vec2,
        /// End of the segment.
        to: Vec2,
        /// Stroke width.
        thickness: f32,
    },
    /// Filled triangle.
    Triangle {
        /// First vertex.
        a: Vec2,
        /// Second vertex.
        b: Vec2,
        /// Third vertex.
        c: Vec2,
    },
}

/// Shape paired with the color it is filled or stroked with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Primitive {
    /// Geometry to draw.
    pub shape: Shape,
    /// Color of the geometry.
    pub color: Color,
}

/// Horizontal placement rule of a text label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TextAnchor {
    /// `position` marks the top-left corner of the text.
    #[default]
    TopLeft,
    /// `position` marks the middle of the top edge of the text.
    TopCenter,
}

/// Single line of text drawn above the primitives.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLabel {
    /// Text content.
    pub text: String,
    /// Anchor point in arena units.
    pub position: Vec2,
    /// Font size in arena units.
    pub size: f32,
    /// Text color.
    pub color: Color,
    /// How `position` relates to the text extent.
    pub anchor: TextAnchor,
}

/// Describes everything drawn on a single frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Color filling the arena before anything else is drawn.
    pub background: Color,
    /// Primitives in painter's order.
    pub primitives: Vec<Primitive>,
    /// Text labels in painter's order.
    pub labels: Vec<TextLabel>,
}

impl Scene {
    /// Creates an empty scene with the provided background.
    #[must_use]
    pub fn new(background: Color) -> Self {
        Self {
            background,
            primitives: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Removes every primitive and label and sets a new background.
    pub fn reset(&mut self, background: Color) {
        self.background = background;
        self.primitives.clear();
        self.labels.clear();
    }

    /// Appends a primitive drawn after every existing one.
    pub fn draw(&mut self, shape: Shape, color: Color) {
        self.primitives.push(Primitive { shape, color });
    }

    /// Appends a text label.
    pub fn write<T>(&mut self, text: T, position: Vec2, size: f32, color: Color, anchor: TextAnchor)
    where
        T: Into<String>,
    {
        self.labels.push(TextLabel {
            text: text.into(),
            position,
            size,
            color,
            anchor,
        });
    }
}

/// Describes the initial state handed to a backend.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title shown by the window.
    pub window_title: String,
    /// Extent of the arena in arena units.
    pub arena_size: Vec2,
    /// Scene presented until the first update.
    pub scene: Scene,
}

impl Presentation {
    /// Creates a new presentation descriptor.
    ///
    /// Returns an error when either arena dimension is not positive.
    pub fn new<T>(
        window_title: T,
        arena_size: Vec2,
        scene: Scene,
    ) -> std::result::Result<Self, RenderingError>
    where
        T: Into<String>,
    {
        if !(arena_size.x > 0.0 && arena_size.y > 0.0) {
            return Err(RenderingError::InvalidArenaSize {
                width: arena_size.x,
                height: arena_size.y,
            });
        }

        Ok(Self {
            window_title: window_title.into(),
            arena_size,
            scene,
        })
    }
}

/// Rendering backend capable of presenting Pixel Quest scenes.
pub trait RenderingBackend {
    /// Runs the backend until the window closes or `update_scene` asks to exit.
    ///
    /// `update_scene` receives the wall-clock time since the previous frame
    /// and the input observed during it, and rewrites the scene in place.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl + 'static;
}

/// Errors raised while building rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// The arena must have a positive area.
    InvalidArenaSize {
        /// Requested width.
        width: f32,
        /// Requested height.
        height: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArenaSize { width, height } => {
                write!(
                    f,
                    "arena dimensions must be positive (received {width}x{height})"
                )
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lighten_moves_channels_towards_white() {
        let red = Color::from_rgb_u8(255, 0, 0);
        let lighter = red.lighten(0.5);
        assert_eq!(lighter.red, 1.0);
        assert!((lighter.green - 0.5).abs() < f32::EPSILON);
        assert_eq!(lighter.alpha, 1.0);
        assert_eq!(red.lighten(2.0), Color::new(1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn presentation_rejects_empty_arena_without_panicking() {
        let scene = Scene::new(Color::from_rgb_u8(0, 0, 0));
        let error = Presentation::new("title", Vec2::new(800.0, 0.0), scene.clone())
            .expect_err("zero height must be rejected");
        assert_eq!(
            error,
            RenderingError::InvalidArenaSize {
                width: 800.0,
                height: 0.0
            }
        );
        assert!(Presentation::new("title", Vec2::new(f32::NAN, 600.0), scene).is_err());
    }

    #[test]
    fn scene_reset_discards_previous_frame() {
        let mut scene = Scene::new(Color::from_rgb_u8(0, 0, 0));
        scene.draw(
            Shape::Circle {
                center: Vec2::ZERO,
                radius: 1.0,
            },
            Color::from_rgb_u8(255, 255, 255),
        );
        scene.write(
            "hello",
            Vec2::ZERO,
            24.0,
            Color::from_rgb_u8(255, 255, 255),
            TextAnchor::TopLeft,
        );

        scene.reset(Color::from_rgb_u8(10, 20, 30));

        assert!(scene.primitives.is_empty());
        assert!(scene.labels.is_empty());
        assert_eq!(scene.background, Color::from_rgb_u8(10, 20, 30));
    }
}
