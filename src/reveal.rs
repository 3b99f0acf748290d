use std::collections::BTreeSet;

use dioxus::prelude::*;
#[cfg(target_arch = "wasm32")]
use dioxus::web::WebEventExt;

#[cfg(target_arch = "wasm32")]
use crate::browser::ObserverHandle;

#[cfg(target_arch = "wasm32")]
const REVEAL_THRESHOLD: f64 = 0.1;
const HIDDEN_CLASSES: &str = "opacity-0 translate-y-8";
const REVEALED_CLASSES: &str = "animate-fade-in-up";

#[derive(Debug, Default)]
pub struct RevealTracker {
    pending: BTreeSet<String>,
    revealed: BTreeSet<String>,
}

impl RevealTracker {
    pub fn observe(&mut self, id: &str) -> bool {
        if self.revealed.contains(id) {
            return false;
        }
        self.pending.insert(id.to_string())
    }

    pub fn reveal(&mut self, id: &str) -> bool {
        if !self.pending.remove(id) {
            return false;
        }
        self.revealed.insert(id.to_string());
        true
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.contains(id)
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.contains(id)
    }
}

pub fn reveal_classes(revealed: bool) -> &'static str {
    if revealed {
        REVEALED_CLASSES
    } else {
        HIDDEN_CLASSES
    }
}

#[derive(Clone, Copy)]
pub struct RevealScope {
    tracker: Signal<RevealTracker>,
    #[cfg(target_arch = "wasm32")]
    observer: Signal<Option<ObserverHandle>>,
}

impl RevealScope {
    fn is_revealed(&self, id: &str) -> bool {
        self.tracker.read().is_revealed(id)
    }

    #[cfg(target_arch = "wasm32")]
    fn register(mut self, id: &str, element: &web_sys::Element) {
        if !self.tracker.write().observe(id) {
            return;
        }
        if let Some(observer) = self.observer.read().as_ref() {
            observer.observe(element);
        }
    }
}

pub fn use_reveal_scope() -> RevealScope {
    let tracker = use_signal(RevealTracker::default);

    #[cfg(target_arch = "wasm32")]
    let observer = use_signal(move || {
        let mut tracker = tracker;
        let handle = ObserverHandle::new(REVEAL_THRESHOLD, move |target, observer| {
            if tracker.write().reveal(&target.id()) {
                observer.unobserve(&target);
            }
        });
        match handle {
            Ok(handle) => Some(handle),
            Err(message) => {
                tracing::warn!("reveal: {message}");
                None
            }
        }
    });

    #[cfg(target_arch = "wasm32")]
    use_drop(move || {
        if let Some(handle) = observer.read().as_ref() {
            handle.disconnect();
        }
    });

    use_context_provider(|| RevealScope {
        tracker,
        #[cfg(target_arch = "wasm32")]
        observer,
    })
}

#[component]
pub fn Reveal(id: String, class: Option<String>, children: Element) -> Element {
    let scope = try_use_context::<RevealScope>();
    let revealed = scope.map_or(true, |scope| scope.is_revealed(&id));
    let state_classes = reveal_classes(revealed);
    let base = class.unwrap_or_default();
    #[cfg(target_arch = "wasm32")]
    let element_id = id.clone();

    rsx! {
        div {
            id: "{id}",
            class: "animate-on-scroll {base} {state_classes}",
            onmounted: move |_event| {
                #[cfg(target_arch = "wasm32")]
                if let Some(scope) = scope {
                    let element = _event.data.as_ref().as_web_event();
                    scope.register(&element_id, &element);
                }
            },
            {children}
        }
    }
}
