#[cfg(target_arch = "wasm32")]
use std::cell::{Cell, RefCell};
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

pub async fn sleep_ms(ms: u32) {
    #[cfg(target_arch = "wasm32")]
    {
        gloo_timers::future::TimeoutFuture::new(ms).await;
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = ms;
    }
}

#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Stop,
}

#[cfg(target_arch = "wasm32")]
pub struct FrameLoop {
    cancelled: Rc<Cell<bool>>,
    handle: Rc<Cell<Option<i32>>>,
    slot: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
}

#[cfg(target_arch = "wasm32")]
impl FrameLoop {
    pub fn start(mut on_frame: impl FnMut(f64) -> FrameControl + 'static) -> Result<Self, String> {
        let window = web_sys::window().ok_or("window unavailable")?;
        let slot: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let handle = Rc::new(Cell::new(None));
        let cancelled = Rc::new(Cell::new(false));

        let slot_for_frame = Rc::clone(&slot);
        let handle_for_frame = Rc::clone(&handle);
        let cancelled_for_frame = Rc::clone(&cancelled);
        let closure = Closure::wrap(Box::new(move |timestamp: f64| {
            handle_for_frame.set(None);
            if cancelled_for_frame.get() {
                return;
            }
            if on_frame(timestamp) == FrameControl::Stop {
                return;
            }
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Some(closure) = slot_for_frame.borrow().as_ref() {
                let next = window
                    .request_animation_frame(closure.as_ref().unchecked_ref())
                    .ok();
                handle_for_frame.set(next);
            }
        }) as Box<dyn FnMut(f64)>);

        let id = window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .map_err(|_| "animation frame request failed")?;
        handle.set(Some(id));
        *slot.borrow_mut() = Some(closure);

        Ok(Self {
            cancelled,
            handle,
            slot,
        })
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
        if let Some(id) = self.handle.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
        // The closure holds a clone of `slot`; clearing it breaks the cycle.
        self.slot.borrow_mut().take();
    }
}

#[cfg(target_arch = "wasm32")]
type ObserverCallback = Closure<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>;

#[cfg(target_arch = "wasm32")]
pub struct ObserverHandle {
    observer: web_sys::IntersectionObserver,
    _closure: Rc<ObserverCallback>,
}

#[cfg(target_arch = "wasm32")]
impl ObserverHandle {
    pub fn new(
        threshold: f64,
        mut on_visible: impl FnMut(web_sys::Element, &web_sys::IntersectionObserver) + 'static,
    ) -> Result<Self, String> {
        let closure = Rc::new(Closure::wrap(Box::new(
            move |entries: js_sys::Array, observer: web_sys::IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: web_sys::IntersectionObserverEntry = entry.unchecked_into();
                    if entry.is_intersecting() {
                        on_visible(entry.target(), &observer);
                    }
                }
            },
        ) as Box<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>));

        let options = web_sys::IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        let observer = web_sys::IntersectionObserver::new_with_options(
            closure.as_ref().as_ref().unchecked_ref(),
            &options,
        )
        .map_err(|_| "intersection observer unavailable")?;

        Ok(Self {
            observer,
            _closure: closure,
        })
    }

    pub fn observe(&self, target: &web_sys::Element) {
        self.observer.observe(target);
    }

    pub fn disconnect(&self) {
        self.observer.disconnect();
    }
}

#[cfg(target_arch = "wasm32")]
pub struct EventListener {
    target: web_sys::EventTarget,
    event: &'static str,
    closure: Rc<Closure<dyn FnMut(web_sys::Event)>>,
}

#[cfg(target_arch = "wasm32")]
impl EventListener {
    pub fn on_window(
        event: &'static str,
        callback: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<Self, String> {
        let window = web_sys::window().ok_or("window unavailable")?;
        Self::attach(window.into(), event, callback)
    }

    pub fn on_document(
        event: &'static str,
        callback: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<Self, String> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or("document unavailable")?;
        Self::attach(document.into(), event, callback)
    }

    fn attach(
        target: web_sys::EventTarget,
        event: &'static str,
        callback: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<Self, String> {
        let closure = Rc::new(Closure::wrap(
            Box::new(callback) as Box<dyn FnMut(web_sys::Event)>
        ));
        target
            .add_event_listener_with_callback(event, closure.as_ref().as_ref().unchecked_ref())
            .map_err(|_| format!("{event} listener failed"))?;
        Ok(Self {
            target,
            event,
            closure,
        })
    }

    pub fn remove(&self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event,
            self.closure.as_ref().as_ref().unchecked_ref(),
        );
    }
}

#[cfg(target_arch = "wasm32")]
pub fn document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|window| window.document())
}

#[cfg(target_arch = "wasm32")]
pub fn viewport_size() -> (f64, f64) {
    let Some(window) = web_sys::window() else {
        return (0.0, 0.0);
    };
    let width = window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    (width, height)
}

#[cfg(target_arch = "wasm32")]
pub fn scroll_to_section(id: &str) {
    let Some(section) = document().and_then(|document| document.get_element_by_id(id)) else {
        tracing::debug!("scroll: section #{id} not on page");
        return;
    };
    let options = web_sys::ScrollIntoViewOptions::new();
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    section.scroll_into_view_with_scroll_into_view_options(&options);
}

#[cfg(target_arch = "wasm32")]
pub fn open_in_new_tab(url: &str) {
    if let Some(window) = web_sys::window() {
        if window.open_with_url_and_target(url, "_blank").is_err() {
            tracing::warn!("open: blocked {url}");
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn set_body_scroll_locked(locked: bool) {
    let Some(body) = document().and_then(|document| document.body()) else {
        return;
    };
    let style = body.style();
    if locked {
        let _ = style.set_property("overflow", "hidden");
    } else {
        let _ = style.remove_property("overflow");
    }
}

#[cfg(target_arch = "wasm32")]
pub fn vibrate(pattern: &[u32]) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let navigator = window.navigator();
    if !js_sys::Reflect::has(&navigator, &JsValue::from_str("vibrate")).unwrap_or(false) {
        return;
    }
    let steps = pattern
        .iter()
        .map(|step| JsValue::from_f64(f64::from(*step)))
        .collect::<js_sys::Array>();
    let _ = navigator.vibrate_with_pattern(&steps);
}
