use dioxus::prelude::*;
#[cfg(target_arch = "wasm32")]
use dioxus::web::WebEventExt;
#[cfg(target_arch = "wasm32")]
use std::{cell::RefCell, rc::Rc};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
use crate::browser::{EventListener, FrameControl, FrameLoop};

pub const CURSOR_EASING: f64 = 0.2;
pub const TRAIL_COUNT: usize = 3;
pub const HOVER_TARGETS: &str = "a, button, .project-card, input";

pub fn trail_easing(index: usize) -> f64 {
    0.3 - 0.08 * index as f64
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn approach(&mut self, target: Position, easing: f64) {
        self.x += (target.x - self.x) * easing;
        self.y += (target.y - self.y) * easing;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CursorTrail {
    pointer: Position,
    cursor: Position,
    trails: [Position; TRAIL_COUNT],
    hovering: bool,
}

impl CursorTrail {
    pub fn new(origin: Position) -> Self {
        Self {
            pointer: origin,
            cursor: origin,
            trails: [origin; TRAIL_COUNT],
            hovering: false,
        }
    }

    pub fn set_pointer(&mut self, pointer: Position) {
        self.pointer = pointer;
    }

    pub fn set_hovering(&mut self, hovering: bool) -> bool {
        let changed = self.hovering != hovering;
        self.hovering = hovering;
        changed
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn step(&mut self) {
        self.cursor.approach(self.pointer, CURSOR_EASING);
        for (offset, trail) in self.trails.iter_mut().enumerate() {
            trail.approach(self.cursor, trail_easing(offset + 1));
        }
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn trails(&self) -> &[Position; TRAIL_COUNT] {
        &self.trails
    }
}

#[cfg(target_arch = "wasm32")]
fn place(element: &web_sys::HtmlElement, position: Position) {
    let style = element.style();
    let _ = style.set_property("left", &format!("{}px", position.x));
    let _ = style.set_property("top", &format!("{}px", position.y));
}

#[cfg(target_arch = "wasm32")]
#[derive(Default)]
struct CursorHandles {
    frames: Option<FrameLoop>,
    listeners: Vec<EventListener>,
}

#[cfg(target_arch = "wasm32")]
fn start_cursor(
    cursor_el: web_sys::HtmlElement,
    trail_els: Vec<web_sys::HtmlElement>,
) -> Result<CursorHandles, String> {
    let (width, height) = crate::browser::viewport_size();
    let state = Rc::new(RefCell::new(CursorTrail::new(Position::new(
        width / 2.0,
        height / 2.0,
    ))));

    let state_for_move = Rc::clone(&state);
    let on_move = EventListener::on_document("mousemove", move |event| {
        if let Some(event) = event.dyn_ref::<web_sys::MouseEvent>() {
            state_for_move.borrow_mut().set_pointer(Position::new(
                f64::from(event.client_x()),
                f64::from(event.client_y()),
            ));
        }
    })?;

    let state_for_hover = Rc::clone(&state);
    let cursor_for_hover = cursor_el.clone();
    let on_hover = EventListener::on_document("mouseover", move |event| {
        let hovering = event
            .target()
            .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
            .and_then(|element| element.closest(HOVER_TARGETS).ok().flatten())
            .is_some();
        if state_for_hover.borrow_mut().set_hovering(hovering) {
            let _ = cursor_for_hover
                .class_list()
                .toggle_with_force("hovering", hovering);
        }
    })?;

    let frames = FrameLoop::start(move |_now| {
        let mut state = state.borrow_mut();
        state.step();
        place(&cursor_el, state.cursor());
        for (element, position) in trail_els.iter().zip(state.trails()) {
            place(element, *position);
        }
        FrameControl::Continue
    })?;

    Ok(CursorHandles {
        frames: Some(frames),
        listeners: vec![on_move, on_hover],
    })
}

#[component]
pub fn CursorLayer() -> Element {
    #[cfg(target_arch = "wasm32")]
    let mut cursor_el = use_signal(|| None::<web_sys::HtmlElement>);
    #[cfg(target_arch = "wasm32")]
    let mut trail_els = use_signal(Vec::<web_sys::HtmlElement>::new);
    #[cfg(target_arch = "wasm32")]
    let mut handles = use_signal(|| None::<CursorHandles>);
    #[cfg(not(target_arch = "wasm32"))]
    let _cursor = ();

    #[cfg(target_arch = "wasm32")]
    use_effect(move || {
        let Some(cursor) = cursor_el.read().as_ref().cloned() else {
            return;
        };
        let trails = trail_els.read().clone();
        if trails.len() < TRAIL_COUNT || handles.peek().is_some() {
            return;
        }
        tracing::debug!("cursor: starting trail");
        match start_cursor(cursor, trails) {
            Ok(started) => handles.set(Some(started)),
            Err(message) => tracing::warn!("cursor: {message}"),
        }
    });

    #[cfg(target_arch = "wasm32")]
    use_drop(move || {
        if let Some(started) = handles.read().as_ref() {
            for listener in &started.listeners {
                listener.remove();
            }
            if let Some(frames) = started.frames.as_ref() {
                frames.cancel();
            }
        }
    });

    rsx! {
        div {
            id: "bmw-cursor",
            class: "bmw-cursor",
            aria_hidden: "true",
            onmounted: move |_event| {
                #[cfg(target_arch = "wasm32")]
                {
                    let element = _event.data.as_ref().as_web_event();
                    if let Ok(node) = element.dyn_into::<web_sys::HtmlElement>() {
                        cursor_el.set(Some(node));
                    }
                }
            },
        }
        for index in 1..=TRAIL_COUNT {
            div {
                key: "{index}",
                class: "m-trail trail-{index}",
                aria_hidden: "true",
                onmounted: move |_event| {
                    #[cfg(target_arch = "wasm32")]
                    {
                        let element = _event.data.as_ref().as_web_event();
                        if let Ok(node) = element.dyn_into::<web_sys::HtmlElement>() {
                            trail_els.write().push(node);
                        }
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn starts_parked_at_origin() {
        let trail = CursorTrail::new(Position::new(400.0, 300.0));
        assert_eq!(trail.cursor(), Position::new(400.0, 300.0));
        assert_eq!(trail.trails(), &[Position::new(400.0, 300.0); TRAIL_COUNT]);
    }

    #[test]
    fn cursor_moves_a_fifth_of_the_gap_per_frame() {
        let mut trail = CursorTrail::new(Position::new(0.0, 0.0));
        trail.set_pointer(Position::new(100.0, 50.0));
        trail.step();
        let cursor = trail.cursor();
        assert!((cursor.x - 20.0).abs() < 1e-9);
        assert!((cursor.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn trails_follow_the_cursor_with_staggered_easing() {
        let mut trail = CursorTrail::new(Position::new(0.0, 0.0));
        trail.set_pointer(Position::new(100.0, 0.0));
        trail.step();

        let xs: Vec<f64> = trail.trails().iter().map(|p| p.x).collect();
        let expected = [20.0 * 0.22, 20.0 * 0.14, 20.0 * 0.06];
        for (actual, expected) in xs.iter().zip(expected) {
            assert!((actual - expected).abs() < 1e-9);
        }
        assert!(xs[0] > xs[1] && xs[1] > xs[2]);
    }

    #[test]
    fn converges_on_a_still_pointer() {
        let mut trail = CursorTrail::new(Position::new(0.0, 0.0));
        trail.set_pointer(Position::new(200.0, 120.0));
        for _ in 0..500 {
            trail.step();
        }
        for position in std::iter::once(trail.cursor()).chain(trail.trails().iter().copied()) {
            assert!((position.x - 200.0).abs() < 1e-6);
            assert!((position.y - 120.0).abs() < 1e-6);
        }
    }

    #[test]
    fn hover_changes_are_reported_once() {
        let mut trail = CursorTrail::new(Position::default());
        assert!(trail.set_hovering(true));
        assert!(!trail.set_hovering(true));
        assert!(trail.is_hovering());
        assert!(trail.set_hovering(false));
    }

    #[test]
    fn trail_easing_values() {
        let easings: Vec<f64> = (1..=TRAIL_COUNT).map(trail_easing).collect();
        for (actual, expected) in easings.iter().zip([0.22, 0.14, 0.06]) {
            assert!((actual - expected).abs() < 1e-9);
        }
    }
}
