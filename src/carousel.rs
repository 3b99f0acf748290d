use std::collections::BTreeSet;

use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
use crate::browser::EventListener;
use crate::certificates::{Certificate, CertificateCatalog};

const CARD_CLASSES: &str = "absolute w-64 md:w-80 h-48 md:h-60 rounded-xl bg-surface/90 border border-white/10 overflow-hidden shadow-2xl transition-all duration-500 ease-out cursor-pointer hover:border-primary/50";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    pub fn step(self) -> isize {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" => Some(Direction::Next),
            "ArrowLeft" => Some(Direction::Previous),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    Open(usize),
    Centered(usize),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    current: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { len, current: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn rotate(&mut self, direction: Direction) {
        if self.len == 0 {
            return;
        }
        let len = self.len as isize;
        self.current = (self.current as isize + direction.step()).rem_euclid(len) as usize;
    }

    pub fn rotate_to(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.current = index;
        true
    }

    // Signed offset from the current card, in (-len/2, len/2].
    pub fn distance(&self, index: usize) -> isize {
        if self.len == 0 {
            return 0;
        }
        let len = self.len as isize;
        let mut diff = (index as isize - self.current as isize).rem_euclid(len);
        if diff * 2 > len {
            diff -= len;
        }
        diff
    }

    pub fn placement(&self, index: usize) -> CardPlacement {
        CardPlacement::for_distance(self.distance(index))
    }

    pub fn activate(&mut self, index: usize) -> Option<Activation> {
        if index >= self.len {
            return None;
        }
        if self.distance(index) == 0 {
            return Some(Activation::Open(index));
        }
        self.rotate_to(index);
        Some(Activation::Centered(index))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CardPlacement {
    pub transform: String,
    pub z_index: u8,
    pub opacity: f64,
    pub brightness: f64,
    pub interactive: bool,
}

impl CardPlacement {
    pub fn for_distance(distance: isize) -> Self {
        let side = distance.signum();
        match distance.unsigned_abs() {
            0 => Self {
                transform: "translateX(0) scale(1.2) rotateY(0deg)".to_string(),
                z_index: 50,
                opacity: 1.0,
                brightness: 1.1,
                interactive: true,
            },
            1 => Self {
                transform: format!(
                    "translateX({}%) scale(0.9) rotateY({}deg)",
                    side * 120,
                    -side * 25
                ),
                z_index: 40,
                opacity: 0.7,
                brightness: 0.6,
                interactive: true,
            },
            2 => Self {
                transform: format!(
                    "translateX({}%) scale(0.7) rotateY({}deg)",
                    side * 200,
                    -side * 45
                ),
                z_index: 30,
                opacity: 0.4,
                brightness: 0.4,
                interactive: false,
            },
            _ => Self {
                transform: "translateX(0) scale(0)".to_string(),
                z_index: 0,
                opacity: 0.0,
                brightness: 1.0,
                interactive: false,
            },
        }
    }

    pub fn style(&self) -> String {
        let pointer_events = if self.interactive { "auto" } else { "none" };
        format!(
            "transform: {}; z-index: {}; opacity: {}; filter: brightness({}); pointer-events: {};",
            self.transform, self.z_index, self.opacity, self.brightness, pointer_events
        )
    }
}

#[component]
pub fn CertificateCarousel(catalog: CertificateCatalog) -> Element {
    let len = catalog.len();
    let mut carousel = use_signal(move || Carousel::new(len));
    let mut broken = use_signal(BTreeSet::<usize>::new);
    #[cfg(target_arch = "wasm32")]
    let mut keys = use_signal(|| None::<EventListener>);

    #[cfg(target_arch = "wasm32")]
    use_effect(move || {
        if keys.peek().is_some() {
            return;
        }
        let listener = EventListener::on_document("keydown", move |event| {
            use wasm_bindgen::JsCast;
            let Some(event) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
                return;
            };
            if let Some(direction) = Direction::from_key(&event.key()) {
                let mut carousel = carousel;
                carousel.write().rotate(direction);
            }
        });
        match listener {
            Ok(listener) => keys.set(Some(listener)),
            Err(message) => tracing::warn!("carousel: {message}"),
        }
    });

    #[cfg(target_arch = "wasm32")]
    use_drop(move || {
        if let Some(listener) = keys.read().as_ref() {
            listener.remove();
        }
    });

    if catalog.is_empty() {
        return rsx! {};
    }

    let state = *carousel.read();

    rsx! {
        div { class: "carousel relative flex flex-col items-center",
            div {
                id: "carousel-track",
                class: "carousel-track relative w-full h-80 flex items-center justify-center",
                style: "perspective: 1000px; transform-style: preserve-3d;",
                for (index, cert) in catalog.iter().cloned().enumerate() {
                    CarouselCard {
                        key: "{index}",
                        cert,
                        style: state.placement(index).style(),
                        broken: broken.read().contains(&index),
                        onactivate: move |_| {
                            let activation = carousel.write().activate(index);
                            if let Some(Activation::Open(opened)) = activation {
                                tracing::debug!("carousel: opening certificate {opened}");
                            }
                            activation
                        },
                        onbroken: move |_| {
                            broken.write().insert(index);
                        },
                    }
                }
            }
            div { class: "carousel-controls flex gap-4 mt-8",
                button {
                    id: "prev-cert",
                    r#type: "button",
                    class: "carousel-button",
                    aria_label: "Previous certificate",
                    onclick: move |_| carousel.write().rotate(Direction::Previous),
                    "‹"
                }
                button {
                    id: "next-cert",
                    r#type: "button",
                    class: "carousel-button",
                    aria_label: "Next certificate",
                    onclick: move |_| carousel.write().rotate(Direction::Next),
                    "›"
                }
            }
        }
    }
}

#[component]
fn CarouselCard(
    cert: Certificate,
    style: String,
    broken: bool,
    onactivate: Callback<(), Option<Activation>>,
    onbroken: EventHandler<()>,
) -> Element {
    #[cfg(target_arch = "wasm32")]
    let image_url = cert.image_key.clone();
    let failed_key = cert.image_key.clone();

    rsx! {
        div {
            class: CARD_CLASSES,
            style: "{style}",
            onclick: move |_| {
                if let Some(Activation::Open(_)) = onactivate.call(()) {
                    #[cfg(target_arch = "wasm32")]
                    crate::browser::open_in_new_tab(&image_url);
                }
            },
            if broken {
                div { class: "image-missing w-full h-full flex items-center justify-center text-sm text-zinc-400",
                    "Image Not Found"
                }
            } else {
                img {
                    src: "{cert.image_key}",
                    alt: "{cert.title}",
                    class: "w-full h-full object-contain p-2 filter brightness-90",
                    onerror: move |_| {
                        tracing::warn!("carousel: image failed to load: {failed_key}");
                        onbroken.call(());
                    },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn eleven_cards_split_at_the_far_side() {
        let carousel = Carousel::new(11);
        assert_eq!(carousel.distance(5), 5);
        assert_eq!(carousel.distance(6), -5);
        assert_eq!(carousel.distance(10), -1);
        assert_eq!(carousel.distance(0), 0);
    }

    #[test]
    fn even_length_tie_goes_to_positive_side() {
        let carousel = Carousel::new(10);
        assert_eq!(carousel.distance(5), 5);
        assert_eq!(carousel.distance(6), -4);
    }

    #[test]
    fn distances_cover_the_half_open_range() {
        for len in 1..=12 {
            for current in 0..len {
                let mut carousel = Carousel::new(len);
                carousel.rotate_to(current);
                let half = len as isize;
                for index in 0..len {
                    let distance = carousel.distance(index);
                    assert!(distance * 2 > -half && distance * 2 <= half);
                    let landed = (current as isize + distance).rem_euclid(len as isize);
                    assert_eq!(landed as usize, index);
                }
            }
        }
    }

    #[test]
    fn full_lap_returns_to_start() {
        let mut carousel = Carousel::new(11);
        carousel.rotate_to(4);
        for _ in 0..11 {
            carousel.rotate(Direction::Next);
            assert!(carousel.current() < carousel.len());
        }
        assert_eq!(carousel.current(), 4);

        for _ in 0..11 {
            carousel.rotate(Direction::Previous);
        }
        assert_eq!(carousel.current(), 4);
    }

    #[test]
    fn rotating_backwards_from_zero_wraps() {
        let mut carousel = Carousel::new(11);
        carousel.rotate(Direction::Previous);
        assert_eq!(carousel.current(), 10);
    }

    #[test]
    fn rotate_to_out_of_range_is_ignored() {
        let mut carousel = Carousel::new(11);
        carousel.rotate_to(3);
        assert!(!carousel.rotate_to(11));
        assert_eq!(carousel.current(), 3);
    }

    #[test]
    fn empty_carousel_stays_put() {
        let mut carousel = Carousel::new(0);
        carousel.rotate(Direction::Next);
        assert_eq!(carousel.current(), 0);
        assert_eq!(carousel.activate(0), None);
    }

    #[test]
    fn clicking_center_opens_and_off_center_jumps() {
        let mut carousel = Carousel::new(11);
        assert_eq!(carousel.activate(0), Some(Activation::Open(0)));
        assert_eq!(carousel.activate(9), Some(Activation::Centered(9)));
        assert_eq!(carousel.current(), 9);
        assert_eq!(carousel.activate(9), Some(Activation::Open(9)));
    }

    #[test]
    fn placements_by_distance() {
        let center = CardPlacement::for_distance(0);
        assert_eq!(center.transform, "translateX(0) scale(1.2) rotateY(0deg)");
        assert_eq!((center.z_index, center.interactive), (50, true));

        let right = CardPlacement::for_distance(1);
        assert_eq!(right.transform, "translateX(120%) scale(0.9) rotateY(-25deg)");
        let left = CardPlacement::for_distance(-1);
        assert_eq!(left.transform, "translateX(-120%) scale(0.9) rotateY(25deg)");
        assert_eq!((left.z_index, left.opacity, left.interactive), (40, 0.7, true));

        let far_left = CardPlacement::for_distance(-2);
        assert_eq!(far_left.transform, "translateX(-200%) scale(0.7) rotateY(45deg)");
        assert_eq!((far_left.z_index, far_left.interactive), (30, false));

        let hidden = CardPlacement::for_distance(-5);
        assert_eq!(hidden.transform, "translateX(0) scale(0)");
        assert_eq!((hidden.z_index, hidden.opacity, hidden.interactive), (0, 0.0, false));
    }

    #[test]
    fn style_disables_pointer_events_for_far_cards() {
        let style = CardPlacement::for_distance(2).style();
        assert!(style.contains("pointer-events: none;"));
        assert!(style.contains("z-index: 30;"));
        assert!(CardPlacement::for_distance(0).style().contains("pointer-events: auto;"));
    }

    #[test]
    fn arrow_keys_map_to_directions() {
        assert_eq!(Direction::from_key("ArrowRight"), Some(Direction::Next));
        assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::Previous));
        assert_eq!(Direction::from_key("Enter"), None);
    }
}
