use dioxus::prelude::*;
#[cfg(target_arch = "wasm32")]
use dioxus::web::WebEventExt;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use crate::preferences::{LocalPreferences, PreferenceStore};

pub const THEME_KEY: &str = "theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            None | Some("") | Some("dark") => Theme::Dark,
            Some(_) => Theme::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn visuals(self) -> ToggleVisuals {
        match self {
            Theme::Dark => ToggleVisuals {
                track: "bg-zinc-950 border-zinc-800",
                thumb: "translate-x-0 bg-zinc-800",
                show_moon: true,
            },
            Theme::Light => ToggleVisuals {
                track: "bg-white border-zinc-200",
                thumb: "translate-x-8 bg-gray-200",
                show_moon: false,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleVisuals {
    pub track: &'static str,
    pub thumb: &'static str,
    pub show_moon: bool,
}

impl ToggleVisuals {
    pub fn moon_class(self) -> &'static str {
        if self.show_moon {
            ""
        } else {
            "hidden"
        }
    }

    pub fn sun_class(self) -> &'static str {
        if self.show_moon {
            "hidden"
        } else {
            ""
        }
    }
}

pub trait RootStyle {
    fn set_dark(&mut self, dark: bool);
}

pub struct DocumentRoot;

impl RootStyle for DocumentRoot {
    fn set_dark(&mut self, dark: bool) {
        #[cfg(target_arch = "wasm32")]
        {
            let root = crate::browser::document().and_then(|document| document.document_element());
            if let Some(root) = root {
                let _ = root.class_list().toggle_with_force("dark", dark);
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = dark;
        }
    }
}

pub struct ThemeController<S> {
    store: S,
    theme: Theme,
}

impl<S: PreferenceStore> ThemeController<S> {
    pub fn load(store: S) -> Self {
        let theme = Theme::from_stored(store.load(THEME_KEY).as_deref());
        Self { store, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn apply(&mut self, theme: Theme, root: &mut impl RootStyle) {
        self.theme = theme;
        self.store.save(THEME_KEY, theme.as_str());
        root.set_dark(theme.is_dark());
    }

    pub fn toggle(&mut self, root: &mut impl RootStyle) -> Theme {
        let next = self.theme.toggled();
        self.apply(next, root);
        next
    }
}

#[derive(Clone, Copy)]
pub struct ThemeState {
    controller: Signal<ThemeController<LocalPreferences>>,
    flashes: Signal<u64>,
}

impl ThemeState {
    pub fn theme(&self) -> Theme {
        self.controller.read().theme()
    }

    pub fn toggle(mut self) {
        let next = self.controller.write().toggle(&mut DocumentRoot);
        tracing::debug!("theme: switched to {}", next.as_str());
        let count = *self.flashes.peek();
        self.flashes.set(count + 1);
    }
}

pub fn use_theme_provider() -> ThemeState {
    let controller = use_signal(|| ThemeController::load(LocalPreferences));
    let flashes = use_signal(|| 0u64);
    let state = use_context_provider(|| ThemeState {
        controller,
        flashes,
    });

    let mut applied = use_signal(|| false);
    use_effect(move || {
        if applied() {
            return;
        }
        applied.set(true);
        let mut controller = controller;
        let initial = controller.peek().theme();
        controller.write().apply(initial, &mut DocumentRoot);
    });

    state
}

#[component]
pub fn ThemeToggle() -> Element {
    let Some(state) = try_use_context::<ThemeState>() else {
        return rsx! {};
    };
    let visuals = state.theme().visuals();
    let track = visuals.track;
    let thumb = visuals.thumb;
    let moon = visuals.moon_class();
    let sun = visuals.sun_class();

    rsx! {
        button {
            id: "theme-toggle",
            r#type: "button",
            class: "theme-toggle relative w-16 h-8 rounded-full border transition-colors {track}",
            aria_label: "Toggle theme",
            onclick: move |_| state.toggle(),
            span {
                id: "toggle-thumb",
                class: "toggle-thumb absolute top-1 left-1 w-6 h-6 rounded-full flex items-center justify-center transition-transform {thumb}",
                span { id: "thumb-moon", class: "icon {moon}", "☾" }
                span { id: "thumb-sun", class: "icon {sun}", "☀" }
            }
        }
    }
}

#[component]
pub fn MobileThemeToggle() -> Element {
    let Some(state) = try_use_context::<ThemeState>() else {
        return rsx! {};
    };
    let visuals = state.theme().visuals();
    let moon = visuals.moon_class();
    let sun = visuals.sun_class();

    rsx! {
        button {
            id: "mobile-theme-toggle",
            r#type: "button",
            class: "mobile-theme-toggle md:hidden",
            aria_label: "Toggle theme",
            onclick: move |_| state.toggle(),
            span { id: "mobile-moon", class: "icon {moon}", "☾" }
            span { id: "mobile-sun", class: "icon {sun}", "☀" }
        }
    }
}

#[component]
pub fn HighBeams() -> Element {
    #[cfg(target_arch = "wasm32")]
    let mut beams = use_signal(|| None::<web_sys::HtmlElement>);
    #[cfg(not(target_arch = "wasm32"))]
    let _beams = ();

    #[cfg(target_arch = "wasm32")]
    {
        let state = try_use_context::<ThemeState>();
        use_effect(move || {
            let Some(state) = state else {
                return;
            };
            if (state.flashes)() == 0 {
                return;
            }
            let Some(element) = beams.read().as_ref().cloned() else {
                return;
            };
            let classes = element.class_list();
            let _ = classes.remove_1("flash");
            // Reading the layout width forces a reflow so the animation restarts.
            let _ = element.offset_width();
            let _ = classes.add_1("flash");
        });
    }

    rsx! {
        div {
            id: "high-beams",
            class: "high-beams",
            aria_hidden: "true",
            onmounted: move |_event| {
                #[cfg(target_arch = "wasm32")]
                {
                    let element = _event.data.as_ref().as_web_event();
                    if let Ok(node) = element.dyn_into::<web_sys::HtmlElement>() {
                        beams.set(Some(node));
                    }
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::MemoryPreferences;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct RecordingRoot {
        dark: Option<bool>,
    }

    impl RootStyle for RecordingRoot {
        fn set_dark(&mut self, dark: bool) {
            self.dark = Some(dark);
        }
    }

    #[test]
    fn first_visit_defaults_to_dark() {
        let controller = ThemeController::load(MemoryPreferences::default());
        assert_eq!(controller.theme(), Theme::Dark);
    }

    #[test]
    fn stored_light_is_restored() {
        let controller = ThemeController::load(MemoryPreferences::with(THEME_KEY, "light"));
        assert_eq!(controller.theme(), Theme::Light);
    }

    #[test]
    fn any_stored_value_other_than_dark_means_light() {
        for stored in ["sepia", "Light", "LIGHT", "0", " dark"] {
            let controller = ThemeController::load(MemoryPreferences::with(THEME_KEY, stored));
            assert_eq!(controller.theme(), Theme::Light, "stored {stored:?}");
        }
        for stored in [None, Some(""), Some("dark")] {
            assert_eq!(Theme::from_stored(stored), Theme::Dark, "stored {stored:?}");
        }
    }

    #[test]
    fn dark_light_dark_persists_dark_and_flags_root() {
        let mut root = RecordingRoot::default();
        let mut controller = ThemeController::load(MemoryPreferences::default());
        controller.apply(Theme::Dark, &mut root);
        controller.apply(Theme::Light, &mut root);
        assert_eq!(root.dark, Some(false));
        controller.apply(Theme::Dark, &mut root);

        assert_eq!(controller.store.load(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(root.dark, Some(true));
    }

    #[test]
    fn toggle_flips_and_persists() {
        let mut root = RecordingRoot::default();
        let mut controller = ThemeController::load(MemoryPreferences::default());
        assert_eq!(controller.toggle(&mut root), Theme::Light);
        assert_eq!(controller.store.load(THEME_KEY).as_deref(), Some("light"));
        assert_eq!(controller.toggle(&mut root), Theme::Dark);
        assert_eq!(root.dark, Some(true));
    }

    #[test]
    fn visuals_swap_icons_and_pill_position() {
        let dark = Theme::Dark.visuals();
        assert_eq!(dark.thumb, "translate-x-0 bg-zinc-800");
        assert_eq!((dark.moon_class(), dark.sun_class()), ("", "hidden"));

        let light = Theme::Light.visuals();
        assert_eq!(light.track, "bg-white border-zinc-200");
        assert_eq!((light.moon_class(), light.sun_class()), ("hidden", ""));
    }
}
