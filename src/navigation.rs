use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
use crate::browser::ObserverHandle;

#[cfg(target_arch = "wasm32")]
const ACTIVE_THRESHOLD: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavEntry {
    pub section: &'static str,
    pub label: &'static str,
    pub gear: &'static str,
}

impl NavEntry {
    pub fn target(&self) -> String {
        format!("#{}", self.section)
    }
}

pub static SECTIONS: [NavEntry; 5] = [
    NavEntry { section: "home", label: "Home", gear: "P" },
    NavEntry { section: "work", label: "Work", gear: "1" },
    NavEntry { section: "skills", label: "Skills", gear: "2" },
    NavEntry { section: "certificates", label: "Certificates", gear: "3" },
    NavEntry { section: "contact", label: "Contact", gear: "4" },
];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectionNavigator {
    present: Vec<&'static str>,
    active: Option<String>,
}

impl SectionNavigator {
    pub fn with_sections(present: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            present: present.into_iter().collect(),
            active: None,
        }
    }

    pub fn is_present(&self, section: &str) -> bool {
        self.present.iter().any(|known| *known == section)
    }

    pub fn on_section_visible(&mut self, section: &str) -> bool {
        if !self.is_present(section) || self.active.as_deref() == Some(section) {
            return false;
        }
        self.active = Some(section.to_string());
        true
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_active(&self, section: &str) -> bool {
        self.active() == Some(section)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MobileMenuState {
    open: bool,
}

impl MobileMenuState {
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn menu_class(self) -> &'static str {
        if self.open {
            ""
        } else {
            "hidden"
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn present_sections() -> Vec<(&'static str, web_sys::Element)> {
    let Some(document) = crate::browser::document() else {
        return Vec::new();
    };
    SECTIONS
        .iter()
        .filter_map(|entry| {
            document
                .get_element_by_id(entry.section)
                .map(|element| (entry.section, element))
        })
        .collect()
}

#[component]
pub fn GearNav() -> Element {
    let navigator = use_signal(SectionNavigator::default);
    #[cfg(target_arch = "wasm32")]
    let mut observer = use_signal(|| None::<ObserverHandle>);

    #[cfg(target_arch = "wasm32")]
    use_effect(move || {
        if observer.peek().is_some() {
            return;
        }
        let sections = present_sections();
        if sections.is_empty() {
            return;
        }
        let mut navigator = navigator;
        navigator.set(SectionNavigator::with_sections(
            sections.iter().map(|(id, _)| *id),
        ));
        tracing::debug!("gears: observing {} sections", sections.len());

        let handle = ObserverHandle::new(ACTIVE_THRESHOLD, move |target, _observer| {
            let id = target.id();
            if navigator.write().on_section_visible(&id) {
                tracing::debug!("gears: shifted to {id}");
            }
        });
        match handle {
            Ok(handle) => {
                for (_, element) in &sections {
                    handle.observe(element);
                }
                observer.set(Some(handle));
            }
            Err(message) => tracing::warn!("gears: {message}"),
        }
    });

    #[cfg(target_arch = "wasm32")]
    use_drop(move || {
        if let Some(handle) = observer.read().as_ref() {
            handle.disconnect();
        }
    });

    let state = navigator.read();

    rsx! {
        nav { class: "gear-nav", aria_label: "Section navigation",
            for entry in SECTIONS.iter().filter(|entry| state.is_present(entry.section)) {
                button {
                    key: "{entry.section}",
                    r#type: "button",
                    class: if state.is_active(entry.section) { "gear-item active" } else { "gear-item" },
                    "data-target": entry.target(),
                    title: entry.label,
                    onclick: move |_| {
                        #[cfg(target_arch = "wasm32")]
                        crate::browser::scroll_to_section(entry.section);
                    },
                    span { class: "gear-number", "{entry.gear}" }
                }
            }
        }
    }
}

#[component]
pub fn MobileMenu() -> Element {
    let mut menu = use_signal(MobileMenuState::default);
    let menu_class = menu.read().menu_class();
    let expanded = menu.read().is_open();

    rsx! {
        button {
            id: "mobile-menu-btn",
            r#type: "button",
            class: "mobile-menu-btn md:hidden",
            aria_label: "Open menu",
            aria_expanded: "{expanded}",
            onclick: move |_| menu.write().toggle(),
            span { class: "menu-bar" }
            span { class: "menu-bar" }
            span { class: "menu-bar" }
        }
        div { id: "mobile-menu", class: "mobile-menu md:hidden {menu_class}",
            for entry in SECTIONS.iter() {
                a {
                    key: "{entry.section}",
                    href: "{entry.target()}",
                    class: "mobile-menu-link",
                    onclick: move |_| menu.write().close(),
                    "{entry.label}"
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
    fn only_one_section_is_active() {
        let mut navigator = SectionNavigator::with_sections(["home", "work", "skills"]);
        assert!(navigator.on_section_visible("work"));
        assert!(navigator.is_active("work"));
        assert!(navigator.on_section_visible("skills"));
        assert!(navigator.is_active("skills"));
        assert!(!navigator.is_active("work"));
    }

    #[test]
    fn repeated_visibility_is_not_a_change() {
        let mut navigator = SectionNavigator::with_sections(["home"]);
        assert!(navigator.on_section_visible("home"));
        assert!(!navigator.on_section_visible("home"));
    }

    #[test]
    fn missing_sections_never_activate() {
        let mut navigator = SectionNavigator::with_sections(["home", "contact"]);
        assert!(!navigator.is_present("work"));
        assert!(!navigator.on_section_visible("work"));
        assert_eq!(navigator.active(), None);
    }

    #[test]
    fn gear_targets_are_id_selectors() {
        let targets: Vec<String> = SECTIONS.iter().map(NavEntry::target).collect();
        assert_eq!(
            targets,
            vec!["#home", "#work", "#skills", "#certificates", "#contact"]
        );
    }

    #[test]
    fn menu_toggles_and_closes_on_link() {
        let mut menu = MobileMenuState::default();
        assert_eq!(menu.menu_class(), "hidden");
        menu.toggle();
        assert!(menu.is_open());
        assert_eq!(menu.menu_class(), "");
        menu.close();
        assert!(!menu.is_open());
        menu.toggle();
        menu.toggle();
        assert_eq!(menu.menu_class(), "hidden");
    }
}
