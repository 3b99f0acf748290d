use dioxus::prelude::*;
#[cfg(target_arch = "wasm32")]
use dioxus::web::WebEventExt;

use crate::certificates::{Certificate, CertificateCatalog};

pub const MAX_TILT_DEG: f64 = 10.0;
const RESTING_TRANSFORM: &str = "perspective(1000px) rotateX(0) rotateY(0)";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub glare_x: f64,
    pub glare_y: f64,
    pub border_angle: f64,
}

impl Tilt {
    pub fn at(x: f64, y: f64, width: f64, height: f64) -> Option<Self> {
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        let center_x = width / 2.0;
        let center_y = height / 2.0;
        Some(Self {
            rotate_x: (y - center_y) / center_y * -MAX_TILT_DEG,
            rotate_y: (x - center_x) / center_x * MAX_TILT_DEG,
            glare_x: x / width * 100.0,
            glare_y: y / height * 100.0,
            border_angle: (y - center_y).atan2(x - center_x).to_degrees() + 90.0,
        })
    }

    pub fn transform(&self) -> String {
        format!(
            "perspective(1000px) rotateX({}deg) rotateY({}deg)",
            self.rotate_x, self.rotate_y
        )
    }
}

pub fn card_style(tilt: Option<Tilt>) -> String {
    match tilt {
        Some(tilt) => format!(
            "transform: {}; --rotate: {}deg;",
            tilt.transform(),
            tilt.border_angle
        ),
        None => format!("transform: {RESTING_TRANSFORM};"),
    }
}

pub fn glare_style(tilt: Option<Tilt>) -> String {
    match tilt {
        Some(tilt) => format!(
            "--mouse-x: {}%; --mouse-y: {}%; opacity: 1;",
            tilt.glare_x, tilt.glare_y
        ),
        None => "opacity: 0;".to_string(),
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImageState {
    #[default]
    Loading,
    Loaded,
    Missing,
}

#[component]
pub fn CertificateGallery(catalog: CertificateCatalog) -> Element {
    rsx! {
        div { id: "cert-grid", class: "grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-6",
            for (index, cert) in catalog.iter().cloned().enumerate() {
                GalleryCard { key: "{index}", cert }
            }
        }
    }
}

#[component]
fn GalleryCard(cert: Certificate) -> Element {
    let mut tilt = use_signal(|| None::<Tilt>);
    let mut image = use_signal(ImageState::default);
    #[cfg(target_arch = "wasm32")]
    let mut node = use_signal(|| None::<web_sys::Element>);
    #[cfg(target_arch = "wasm32")]
    let open_key = cert.image_key.clone();
    let failed_key = cert.image_key.clone();

    let pose = tilt();
    let card = card_style(pose);
    let glare = glare_style(pose);
    let state = image();
    let image_class = if state == ImageState::Loaded { "" } else { "hidden" };

    rsx! {
        div {
            class: "holo-card group relative h-64 rounded-xl cursor-pointer bg-surface/80 border border-white/10 overflow-hidden",
            style: "{card}",
            onmounted: move |_event| {
                #[cfg(target_arch = "wasm32")]
                node.set(Some(_event.data.as_ref().as_web_event()));
            },
            onmousemove: move |_event| {
                #[cfg(target_arch = "wasm32")]
                {
                    let Some(element) = node.peek().as_ref().cloned() else {
                        return;
                    };
                    let rect = element.get_bounding_client_rect();
                    let pointer = _event.client_coordinates();
                    tilt.set(Tilt::at(
                        pointer.x - rect.left(),
                        pointer.y - rect.top(),
                        rect.width(),
                        rect.height(),
                    ));
                }
            },
            onmouseleave: move |_| tilt.set(None),
            onclick: move |_| {
                #[cfg(target_arch = "wasm32")]
                crate::browser::open_in_new_tab(&open_key);
            },
            div { class: "holo-glare", style: "{glare}" }
            div { class: "absolute inset-0 p-4 transition-opacity duration-500",
                match state {
                    ImageState::Loading => rsx! {
                        div { class: "flex items-center justify-center h-full",
                            div { class: "animate-spin rounded-full h-8 w-8 border-t-2 border-primary" }
                        }
                    },
                    ImageState::Missing => rsx! {
                        div { class: "text-red-500 text-xs text-center p-2 flex items-center justify-center h-full",
                            "Image Not Found"
                        }
                    },
                    ImageState::Loaded => rsx! {},
                }
                if state != ImageState::Missing {
                    img {
                        src: "{cert.image_key}",
                        alt: "Certificate",
                        class: "w-full h-full object-contain filter brightness-90 group-hover:brightness-110 transition-all duration-300 {image_class}",
                        onload: move |_| image.set(ImageState::Loaded),
                        onerror: move |_| {
                            tracing::warn!("gallery: image failed to load: {failed_key}");
                            image.set(ImageState::Missing);
                        },
                    }
                }
            }
            div { class: "absolute inset-x-0 bottom-0 p-4 bg-gradient-to-t from-black/90 to-transparent translate-y-2 group-hover:translate-y-0 transition-transform duration-300 z-10",
                h3 { class: "text-white font-bold text-sm leading-tight mb-1 line-clamp-2", "{cert.title}" }
                p { class: "text-xs text-primary font-mono", "{cert.issuer}" }
            }
            div { class: "cyber-line w-full h-[1px] top-4 left-0 opacity-20 z-10" }
            div { class: "cyber-line h-full w-[1px] top-0 right-4 opacity-20 z-10" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn centered_pointer_leaves_card_flat() {
        let tilt = Tilt::at(100.0, 50.0, 200.0, 100.0).unwrap();
        assert_eq!(tilt.rotate_x, 0.0);
        assert_eq!(tilt.rotate_y, 0.0);
        assert_eq!((tilt.glare_x, tilt.glare_y), (50.0, 50.0));
    }

    #[test]
    fn corners_tilt_by_ten_degrees() {
        let top_left = Tilt::at(0.0, 0.0, 200.0, 100.0).unwrap();
        assert_eq!(top_left.rotate_x, 10.0);
        assert_eq!(top_left.rotate_y, -10.0);

        let bottom_right = Tilt::at(200.0, 100.0, 200.0, 100.0).unwrap();
        assert_eq!(bottom_right.rotate_x, -10.0);
        assert_eq!(bottom_right.rotate_y, 10.0);
        assert_eq!((bottom_right.glare_x, bottom_right.glare_y), (100.0, 100.0));
    }

    #[test]
    fn border_angle_points_at_the_pointer() {
        // Straight right of center: atan2(0, +x) = 0, plus the quarter turn.
        let right = Tilt::at(200.0, 50.0, 200.0, 100.0).unwrap();
        assert!((right.border_angle - 90.0).abs() < 1e-9);

        let below = Tilt::at(100.0, 100.0, 200.0, 100.0).unwrap();
        assert!((below.border_angle - 180.0).abs() < 1e-9);
    }

    #[test]
    fn zero_sized_cards_do_not_tilt() {
        assert_eq!(Tilt::at(1.0, 1.0, 0.0, 10.0), None);
    }

    #[test]
    fn leaving_resets_pose_and_hides_glare() {
        assert_eq!(
            card_style(None),
            "transform: perspective(1000px) rotateX(0) rotateY(0);"
        );
        assert_eq!(glare_style(None), "opacity: 0;");

        let tilt = Tilt::at(50.0, 25.0, 200.0, 100.0);
        assert_eq!(glare_style(tilt), "--mouse-x: 25%; --mouse-y: 25%; opacity: 1;");
        assert!(card_style(tilt).starts_with("transform: perspective(1000px) rotateX(5deg) rotateY(-5deg);"));
    }
}
