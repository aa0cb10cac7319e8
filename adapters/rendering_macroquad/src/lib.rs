#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Pixel Quest.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! The arena is scaled uniformly to fit the window and centred; the area
//! outside it stays black.

use anyhow::Result;
use glam::Vec2;
use log::info;
use macroquad::math::Vec2 as MacroquadVec2;
use macroquad::{
    color::BLACK,
    input::{is_key_down, is_key_pressed, KeyCode},
};
use pixel_quest_core::Rect;
use pixel_quest_rendering::{
    Color, FrameControl, FrameInput, Presentation, Press, RenderingBackend, Scene, Shape,
    TextAnchor, TextLabel,
};
use std::{
    collections::VecDeque,
    f32::consts::TAU,
    time::{Duration, Instant},
};

const ELLIPSE_SEGMENTS: u16 = 32;

/// Keys observed during a single frame.
///
/// Edge-triggered fields are `true` only on the frame the key went down;
/// `held_*` fields stay `true` while the key is down.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyboardSnapshot {
    /// Up arrow pressed.
    pub up: bool,
    /// Down arrow pressed.
    pub down: bool,
    /// Left arrow pressed.
    pub left: bool,
    /// Right arrow pressed.
    pub right: bool,
    /// Space pressed.
    pub jump: bool,
    /// Enter pressed.
    pub confirm: bool,
    /// Escape pressed.
    pub cancel: bool,
    /// `R` pressed.
    pub restart: bool,
    /// `Q` pressed.
    pub quit: bool,
    /// Left arrow held.
    pub held_left: bool,
    /// Right arrow held.
    pub held_right: bool,
}

impl KeyboardSnapshot {
    fn poll() -> Self {
        Self {
            up: is_key_pressed(KeyCode::Up),
            down: is_key_pressed(KeyCode::Down),
            left: is_key_pressed(KeyCode::Left),
            right: is_key_pressed(KeyCode::Right),
            jump: is_key_pressed(KeyCode::Space),
            confirm: is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter),
            cancel: is_key_pressed(KeyCode::Escape),
            restart: is_key_pressed(KeyCode::R),
            quit: is_key_pressed(KeyCode::Q),
            held_left: is_key_down(KeyCode::Left),
            held_right: is_key_down(KeyCode::Right),
        }
    }

    /// Converts the observation into the backend-agnostic input snapshot.
    #[must_use]
    pub fn into_frame_input(self) -> FrameInput {
        let presses = [
            (self.up, Press::Up),
            (self.down, Press::Down),
            (self.left, Press::Left),
            (self.right, Press::Right),
            (self.jump, Press::Jump),
            (self.confirm, Press::Confirm),
            (self.cancel, Press::Cancel),
            (self.restart, Press::Restart),
            (self.quit, Press::Quit),
        ]
        .into_iter()
        .filter_map(|(pressed, press)| pressed.then_some(press))
        .collect();

        FrameInput {
            presses,
            held_left: self.held_left,
            held_right: self.held_right,
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct FrameBreakdown {
    frame: Duration,
    update: Duration,
    render: Duration,
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
    update_accum: Duration,
    render_accum: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
    avg_update: Duration,
    avg_render: Duration,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing ten-second averages once
    /// one second has elapsed.
    fn record_frame(&mut self, breakdown: FrameBreakdown) -> Option<FpsMetrics> {
        self.elapsed += breakdown.frame;
        self.frames = self.frames.saturating_add(1);
        self.update_accum += breakdown.update;
        self.render_accum += breakdown.render;

        self.frame_times.push_back(breakdown.frame);
        self.window_duration += breakdown.frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            if let Some(removed) = self.frame_times.pop_front() {
                self.window_duration = self.window_duration.saturating_sub(removed);
            } else {
                break;
            }
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let frames = self.frames;
        let per_second = frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        let metrics = FpsMetrics {
            per_second,
            trailing_ten_seconds,
            avg_update: self.update_accum / frames,
            avg_render: self.render_accum / frames,
        };

        self.elapsed = Duration::ZERO;
        self.frames = 0;
        self.update_accum = Duration::ZERO;
        self.render_accum = Duration::ZERO;
        Some(metrics)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            arena_size,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: arena_size.x.round() as i32,
            window_height: arena_size.y.round() as i32,
            window_resizable: true,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let mut fps_counter = FpsCounter::default();

            loop {
                let frame_input = KeyboardSnapshot::poll().into_frame_input();
                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

                let update_start = Instant::now();
                let control = update_scene(frame_dt, frame_input, &mut scene);
                let update_duration = update_start.elapsed();
                if control == FrameControl::Exit {
                    info!("closing window");
                    break;
                }

                let render_start = Instant::now();
                macroquad::window::clear_background(BLACK);
                let metrics = SceneMetrics::new(
                    arena_size,
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                draw_scene(&scene, &metrics);
                let render_duration = render_start.elapsed();

                let fps_metrics = fps_counter.record_frame(FrameBreakdown {
                    frame: frame_dt,
                    update: update_duration,
                    render: render_duration,
                });
                if show_fps {
                    if let Some(FpsMetrics {
                        per_second,
                        trailing_ten_seconds,
                        avg_update,
                        avg_render,
                    }) = fps_metrics
                    {
                        info!(
                            "FPS: {:.2} (10s avg: {:.2}) | update: {:>6.2}ms render: {:>6.2}ms",
                            per_second,
                            trailing_ten_seconds,
                            avg_update.as_secs_f64() * 1_000.0,
                            avg_render.as_secs_f64() * 1_000.0,
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Maps arena units onto screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SceneMetrics {
    scale: f32,
    offset: Vec2,
    arena_size: Vec2,
}

impl SceneMetrics {
    fn new(arena_size: Vec2, screen_width: f32, screen_height: f32) -> Self {
        let scale = if arena_size.x <= f32::EPSILON || arena_size.y <= f32::EPSILON {
            1.0
        } else {
            (screen_width / arena_size.x).min(screen_height / arena_size.y)
        };
        let scaled = arena_size * scale;
        let offset = Vec2::new(
            ((screen_width - scaled.x) * 0.5).max(0.0),
            ((screen_height - scaled.y) * 0.5).max(0.0),
        );

        Self {
            scale,
            offset,
            arena_size,
        }
    }

    fn point(&self, arena: Vec2) -> MacroquadVec2 {
        let screen = self.offset + arena * self.scale;
        MacroquadVec2::new(screen.x, screen.y)
    }

    fn length(&self, arena: f32) -> f32 {
        arena * self.scale
    }

    fn rect(&self, rect: Rect) -> (MacroquadVec2, f32, f32) {
        (
            self.point(rect.origin()),
            self.length(rect.width()),
            self.length(rect.height()),
        )
    }
}

fn draw_scene(scene: &Scene, metrics: &SceneMetrics) {
    let arena = Rect::from_origin_and_size(Vec2::ZERO, metrics.arena_size);
    let (origin, width, height) = metrics.rect(arena);
    macroquad::shapes::draw_rectangle(
        origin.x,
        origin.y,
        width,
        height,
        to_macroquad_color(scene.background),
    );

    for primitive in &scene.primitives {
        draw_shape(primitive.shape, to_macroquad_color(primitive.color), metrics);
    }

    for label in &scene.labels {
        draw_label(label, metrics);
    }
}

fn draw_shape(shape: Shape, color: macroquad::color::Color, metrics: &SceneMetrics) {
    match shape {
        Shape::Rectangle(rect) => {
            let (origin, width, height) = metrics.rect(rect);
            macroquad::shapes::draw_rectangle(origin.x, origin.y, width, height, color);
        }
        Shape::Ellipse(rect) => {
            for [a, b, c] in ellipse_fan(rect, ELLIPSE_SEGMENTS) {
                macroquad::shapes::draw_triangle(
                    metrics.point(a),
                    metrics.point(b),
                    metrics.point(c),
                    color,
                );
            }
        }
        Shape::Circle { center, radius } => {
            let center = metrics.point(center);
            macroquad::shapes::draw_circle(center.x, center.y, metrics.length(radius), color);
        }
        Shape::Ring {
            center,
            radius,
            thickness,
        } => {
            let center = metrics.point(center);
            macroquad::shapes::draw_circle_lines(
                center.x,
                center.y,
                metrics.length(radius),
                metrics.length(thickness),
                color,
            );
        }
        Shape::Line {
            from,
            to,
            thickness,
        } => {
            let from = metrics.point(from);
            let to = metrics.point(to);
            macroquad::shapes::draw_line(
                from.x,
                from.y,
                to.x,
                to.y,
                metrics.length(thickness),
                color,
            );
        }
        Shape::Triangle { a, b, c } => {
            macroquad::shapes::draw_triangle(
                metrics.point(a),
                metrics.point(b),
                metrics.point(c),
                color,
            );
        }
    }
}

fn draw_label(label: &TextLabel, metrics: &SceneMetrics) {
    let font_size = metrics.length(label.size).round().max(1.0) as u16;
    let dimensions = macroquad::text::measure_text(&label.text, None, font_size, 1.0);
    let anchor = metrics.point(label.position);
    let left = match label.anchor {
        TextAnchor::TopLeft => anchor.x,
        TextAnchor::TopCenter => anchor.x - dimensions.width * 0.5,
    };
    let baseline = anchor.y + dimensions.offset_y;
    let _ = macroquad::text::draw_text(
        &label.text,
        left,
        baseline,
        f32::from(font_size),
        to_macroquad_color(label.color),
    );
}

/// Splits the ellipse inscribed in `rect` into a fan of triangles.
fn ellipse_fan(rect: Rect, segments: u16) -> Vec<[Vec2; 3]> {
    let center = rect.center();
    let radii = rect.size() * 0.5;
    let point = |step: u16| {
        let angle = TAU * f32::from(step) / f32::from(segments);
        center + Vec2::new(angle.cos(), angle.sin()) * radii
    };

    (0..segments)
        .map(|step| [center, point(step), point(step + 1)])
        .collect()
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_letterbox_wide_windows() {
        let metrics = SceneMetrics::new(Vec2::new(800.0, 600.0), 1600.0, 600.0);
        assert_eq!(metrics.scale, 1.0);
        assert_eq!(metrics.offset, Vec2::new(400.0, 0.0));
        assert_eq!(metrics.point(Vec2::new(10.0, 20.0)), MacroquadVec2::new(410.0, 20.0));
    }

    #[test]
    fn metrics_scale_down_small_windows() {
        let metrics = SceneMetrics::new(Vec2::new(800.0, 600.0), 400.0, 400.0);
        assert_eq!(metrics.scale, 0.5);
        assert_eq!(metrics.offset, Vec2::new(0.0, 50.0));
        assert_eq!(metrics.length(36.0), 18.0);
        let (origin, width, height) = metrics.rect(Rect::new(100.0, 100.0, 40.0, 60.0));
        assert_eq!(origin, MacroquadVec2::new(50.0, 100.0));
        assert_eq!((width, height), (20.0, 30.0));
    }

    #[test]
    fn ellipse_fan_stays_inside_bounds() {
        let rect = Rect::new(10.0, 20.0, 100.0, 40.0);
        let fan = ellipse_fan(rect, 16);
        assert_eq!(fan.len(), 16);
        for triangle in fan {
            assert_eq!(triangle[0], rect.center());
            for vertex in &triangle[1..] {
                assert!(vertex.x >= rect.left() - 1e-3 && vertex.x <= rect.right() + 1e-3);
                assert!(vertex.y >= rect.top() - 1e-3 && vertex.y <= rect.bottom() + 1e-3);
            }
        }
    }

    #[test]
    fn fps_counter_reports_once_per_second() {
        let mut counter = FpsCounter::default();
        let frame = FrameBreakdown {
            frame: Duration::from_millis(250),
            update: Duration::from_millis(2),
            render: Duration::from_millis(4),
        };
        assert!(counter.record_frame(frame).is_none());
        assert!(counter.record_frame(frame).is_none());
        assert!(counter.record_frame(frame).is_none());

        let metrics = counter.record_frame(frame).expect("one second elapsed");
        assert!((metrics.per_second - 4.0).abs() < 1e-3);
        assert_eq!(metrics.avg_update, Duration::from_millis(2));
        assert_eq!(metrics.avg_render, Duration::from_millis(4));
        assert!(counter.record_frame(frame).is_none());
    }
}
