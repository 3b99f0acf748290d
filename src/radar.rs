use std::f64::consts::{PI, TAU};

use dioxus::prelude::*;
#[cfg(target_arch = "wasm32")]
use dioxus::web::WebEventExt;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue};

#[cfg(target_arch = "wasm32")]
use crate::browser::{EventListener, FrameControl, FrameLoop, ObserverHandle};

pub const AXES: usize = 6;
pub const ANIMATION_MS: f64 = 1500.0;
pub const VISIBILITY_THRESHOLD: f64 = 0.5;
const GRID_RINGS: usize = 5;
const LABEL_OFFSET: f64 = 30.0;
const POINT_RADIUS: f64 = 4.0;
const NARROW_VIEWPORT: f64 = 768.0;
const CANVAS_SIZE: u32 = 500;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Skill {
    pub label: &'static str,
    pub value: f64,
    pub color: &'static str,
}

pub const SKILLS: [Skill; AXES] = [
    Skill { label: "Security", value: 0.9, color: "#EF4444" },
    Skill { label: "AI / ML", value: 0.85, color: "#6366F1" },
    Skill { label: "Vision", value: 0.88, color: "#A855F7" },
    Skill { label: "Dev", value: 0.95, color: "#10B981" },
    Skill { label: "Systems", value: 0.8, color: "#F59E0B" },
    Skill { label: "Web", value: 0.75, color: "#3B82F6" },
];

pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

pub fn axis_angle(index: usize) -> f64 {
    TAU * index as f64 / AXES as f64 - PI / 2.0
}

pub fn radius_for_viewport(viewport_width: f64) -> f64 {
    if viewport_width < NARROW_VIEWPORT {
        120.0
    } else {
        160.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadarGeometry {
    pub center: Point,
    pub radius: f64,
}

impl RadarGeometry {
    pub fn new(canvas_width: f64, canvas_height: f64, viewport_width: f64) -> Self {
        Self {
            center: Point {
                x: canvas_width / 2.0,
                y: canvas_height / 2.0,
            },
            radius: radius_for_viewport(viewport_width),
        }
    }

    pub fn on_axis(&self, index: usize, distance: f64) -> Point {
        let angle = axis_angle(index);
        Point {
            x: self.center.x + angle.cos() * distance,
            y: self.center.y + angle.sin() * distance,
        }
    }

    pub fn data_point(&self, index: usize, value: f64, factor: f64) -> Point {
        self.on_axis(index, self.radius * value * factor)
    }

    pub fn label_point(&self, index: usize) -> Point {
        self.on_axis(index, self.radius + LABEL_OFFSET)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RadarAnimation {
    started_at: Option<f64>,
    progress: f64,
    triggered: bool,
}

impl RadarAnimation {
    pub fn trigger(&mut self) -> bool {
        if self.triggered {
            return false;
        }
        self.triggered = true;
        true
    }

    pub fn advance(&mut self, now: f64) -> f64 {
        let started_at = *self.started_at.get_or_insert(now);
        self.progress = ((now - started_at) / ANIMATION_MS).clamp(0.0, 1.0);
        ease_out_cubic(self.progress)
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    pub fn resize_factor(&self) -> f64 {
        if self.progress > 0.0 {
            self.progress
        } else {
            1.0
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn paint(
    ctx: &web_sys::CanvasRenderingContext2d,
    width: f64,
    height: f64,
    geometry: &RadarGeometry,
    factor: f64,
) -> Result<(), JsValue> {
    let center = geometry.center;
    let radius = geometry.radius;
    ctx.clear_rect(0.0, 0.0, width, height);

    // Grid rings.
    ctx.set_stroke_style_str("rgba(255, 255, 255, 0.1)");
    ctx.set_line_width(1.0);
    for ring in 1..=GRID_RINGS {
        let distance = radius * ring as f64 / GRID_RINGS as f64;
        trace_polygon(ctx, (0..AXES).map(|index| geometry.on_axis(index, distance)));
        ctx.stroke();
    }

    // Axes.
    ctx.begin_path();
    for index in 0..AXES {
        let end = geometry.on_axis(index, radius);
        ctx.move_to(center.x, center.y);
        ctx.line_to(end.x, end.y);
    }
    ctx.stroke();

    // Data polygon.
    trace_polygon(
        ctx,
        SKILLS
            .iter()
            .enumerate()
            .map(|(index, skill)| geometry.data_point(index, skill.value, factor)),
    );
    let gradient = ctx.create_radial_gradient(center.x, center.y, 0.0, center.x, center.y, radius)?;
    gradient.add_color_stop(0.0, "rgba(99, 102, 241, 0.2)")?;
    gradient.add_color_stop(1.0, "rgba(99, 102, 241, 0.6)")?;
    ctx.set_fill_style_canvas_gradient(&gradient);
    ctx.fill();
    ctx.set_stroke_style_str("#6366F1");
    ctx.set_line_width(2.0);
    ctx.stroke();

    // Vertices and labels.
    ctx.set_font("bold 12px Inter, sans-serif");
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    for (index, skill) in SKILLS.iter().enumerate() {
        let point = geometry.data_point(index, skill.value, factor);
        ctx.begin_path();
        ctx.arc(point.x, point.y, POINT_RADIUS, 0.0, TAU)?;
        ctx.set_fill_style_str("#fff");
        ctx.fill();

        let label = geometry.label_point(index);
        ctx.set_fill_style_str(skill.color);
        ctx.fill_text(skill.label, label.x, label.y)?;
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn trace_polygon(ctx: &web_sys::CanvasRenderingContext2d, points: impl Iterator<Item = Point>) {
    ctx.begin_path();
    for (index, point) in points.enumerate() {
        if index == 0 {
            ctx.move_to(point.x, point.y);
        } else {
            ctx.line_to(point.x, point.y);
        }
    }
    ctx.close_path();
}

#[cfg(target_arch = "wasm32")]
#[derive(Clone)]
struct RadarCanvas {
    canvas: web_sys::HtmlCanvasElement,
    ctx: web_sys::CanvasRenderingContext2d,
}

#[cfg(target_arch = "wasm32")]
impl RadarCanvas {
    fn from_element(element: web_sys::Element) -> Result<Self, String> {
        let canvas = element
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .map_err(|_| "radar element is not a canvas")?;
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| "canvas context error")?
            .ok_or("canvas context unavailable")?
            .dyn_into::<web_sys::CanvasRenderingContext2d>()
            .map_err(|_| "canvas context cast failed")?;
        Ok(Self { canvas, ctx })
    }

    fn draw(&self, factor: f64) {
        let width = f64::from(self.canvas.width());
        let height = f64::from(self.canvas.height());
        let (viewport_width, _) = crate::browser::viewport_size();
        let geometry = RadarGeometry::new(width, height, viewport_width);
        if paint(&self.ctx, width, height, &geometry, factor).is_err() {
            tracing::warn!("radar: draw failed");
        }
    }
}

#[component]
pub fn SkillRadar() -> Element {
    #[cfg(target_arch = "wasm32")]
    let mut canvas = use_signal(|| None::<RadarCanvas>);
    #[cfg(target_arch = "wasm32")]
    let animation = use_signal(RadarAnimation::default);
    #[cfg(target_arch = "wasm32")]
    let mut observer = use_signal(|| None::<ObserverHandle>);
    #[cfg(target_arch = "wasm32")]
    let mut frames = use_signal(|| None::<FrameLoop>);
    #[cfg(target_arch = "wasm32")]
    let mut resize = use_signal(|| None::<EventListener>);
    #[cfg(not(target_arch = "wasm32"))]
    let _canvas = ();

    #[cfg(target_arch = "wasm32")]
    use_effect(move || {
        let Some(radar) = canvas.read().as_ref().cloned() else {
            return;
        };
        if observer.peek().is_some() {
            return;
        }
        tracing::debug!("radar: setting up");
        radar.draw(0.0);

        let radar_for_visible = radar.clone();
        let handle = ObserverHandle::new(VISIBILITY_THRESHOLD, move |_target, observer| {
            let mut animation = animation;
            if !animation.write().trigger() {
                return;
            }
            observer.disconnect();
            let radar = radar_for_visible.clone();
            match FrameLoop::start(move |now| {
                let mut animation = animation;
                let factor = animation.write().advance(now);
                radar.draw(factor);
                if animation.peek().is_complete() {
                    FrameControl::Stop
                } else {
                    FrameControl::Continue
                }
            }) {
                Ok(frame_loop) => frames.set(Some(frame_loop)),
                Err(message) => tracing::warn!("radar: {message}"),
            }
        });
        match handle {
            Ok(handle) => {
                handle.observe(radar.canvas.as_ref());
                observer.set(Some(handle));
            }
            Err(message) => tracing::warn!("radar: {message}"),
        }

        let radar_for_resize = radar.clone();
        match EventListener::on_window("resize", move |_event| {
            radar_for_resize.draw(animation.peek().resize_factor());
        }) {
            Ok(listener) => resize.set(Some(listener)),
            Err(message) => tracing::warn!("radar: {message}"),
        }
    });

    #[cfg(target_arch = "wasm32")]
    use_drop(move || {
        if let Some(handle) = observer.read().as_ref() {
            handle.disconnect();
        }
        if let Some(listener) = resize.read().as_ref() {
            listener.remove();
        }
        if let Some(frame_loop) = frames.read().as_ref() {
            frame_loop.cancel();
        }
    });

    rsx! {
        canvas {
            id: "skill-radar",
            class: "skill-radar mx-auto",
            width: "{CANVAS_SIZE}",
            height: "{CANVAS_SIZE}",
            aria_label: "Skill radar chart",
            onmounted: move |_event| {
                #[cfg(target_arch = "wasm32")]
                {
                    let element = _event.data.as_ref().as_web_event();
                    match RadarCanvas::from_element(element) {
                        Ok(radar) => canvas.set(Some(radar)),
                        Err(message) => tracing::warn!("radar: {message}"),
                    }
                }
            },
        }
        ul { class: "sr-only",
            for skill in SKILLS.iter() {
                li { key: "{skill.label}", "{skill.label}: {(skill.value * 100.0).round()}%" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn easing_endpoints_and_midpoint() {
        assert!(approx_eq(ease_out_cubic(0.0), 0.0));
        assert!(approx_eq(ease_out_cubic(1.0), 1.0));
        assert!(approx_eq(ease_out_cubic(0.5), 0.875));
    }

    #[test]
    fn full_factor_points_sit_at_scaled_radius_and_axis_angle() {
        let geometry = RadarGeometry::new(500.0, 500.0, 1024.0);
        for (index, skill) in SKILLS.iter().enumerate() {
            let point = geometry.data_point(index, skill.value, 1.0);
            let dx = point.x - geometry.center.x;
            let dy = point.y - geometry.center.y;
            assert!(approx_eq(dx.hypot(dy), geometry.radius * skill.value));

            let expected = (-90.0 + index as f64 * 60.0).to_radians();
            assert!(approx_eq(dx, expected.cos() * geometry.radius * skill.value));
            assert!(approx_eq(dy, expected.sin() * geometry.radius * skill.value));
        }
    }

    #[test]
    fn first_axis_points_straight_up() {
        let geometry = RadarGeometry::new(400.0, 300.0, 1024.0);
        let top = geometry.on_axis(0, 100.0);
        assert!(approx_eq(top.x, 200.0));
        assert!(approx_eq(top.y, 50.0));
    }

    #[test]
    fn radius_shrinks_on_narrow_viewports() {
        assert_eq!(radius_for_viewport(767.0), 120.0);
        assert_eq!(radius_for_viewport(768.0), 160.0);
    }

    #[test]
    fn labels_sit_outside_the_chart() {
        let geometry = RadarGeometry::new(500.0, 500.0, 1024.0);
        let label = geometry.label_point(3);
        assert!(approx_eq(label.y - geometry.center.y, 190.0));
    }

    #[test]
    fn animation_triggers_once() {
        let mut animation = RadarAnimation::default();
        assert!(animation.trigger());
        assert!(!animation.trigger());
    }

    #[test]
    fn animation_runs_for_fixed_window() {
        let mut animation = RadarAnimation::default();
        assert!(approx_eq(animation.advance(1000.0), 0.0));
        assert!(approx_eq(animation.advance(1750.0), 0.875));
        assert!(!animation.is_complete());
        assert!(approx_eq(animation.advance(2500.0), 1.0));
        assert!(animation.is_complete());
        assert!(approx_eq(animation.advance(9000.0), 1.0));
    }

    #[test]
    fn resize_before_animation_draws_full_chart() {
        let mut animation = RadarAnimation::default();
        assert_eq!(animation.resize_factor(), 1.0);
        animation.advance(0.0);
        animation.advance(750.0);
        assert!(approx_eq(animation.resize_factor(), 0.5));
    }
}
