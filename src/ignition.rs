use dioxus::prelude::*;

use crate::browser::sleep_ms;

pub const SCROLL_DELAY_MS: u32 = 800;
pub const RESET_DELAY_MS: u32 = 2000;
pub const VIBRATION_PATTERN: [u32; 3] = [100, 50, 100];
pub const SCROLL_TARGET: &str = "work";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IgnitionState {
    #[default]
    Idle,
    Granted,
}

impl IgnitionState {
    pub fn press(&mut self) -> bool {
        if *self == IgnitionState::Granted {
            return false;
        }
        *self = IgnitionState::Granted;
        true
    }

    pub fn label(self) -> &'static str {
        match self {
            IgnitionState::Idle => "INITIALIZE SYSTEM",
            IgnitionState::Granted => "ACCESS GRANTED",
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            IgnitionState::Idle => "",
            IgnitionState::Granted => "animate-pulse",
        }
    }

    pub fn style(self) -> &'static str {
        match self {
            IgnitionState::Idle => "",
            IgnitionState::Granted => "border-color: #10B981; box-shadow: 0 0 20px #10B981;",
        }
    }
}

#[component]
pub fn IgnitionButton() -> Element {
    let mut state = use_signal(IgnitionState::default);
    let current = state();
    let label = current.label();
    let class = current.class();
    let style = current.style();

    rsx! {
        button {
            id: "bio-start",
            r#type: "button",
            class: "bio-start {class}",
            style: "{style}",
            onclick: move |_| {
                if !state.write().press() {
                    return;
                }
                #[cfg(target_arch = "wasm32")]
                crate::browser::vibrate(&VIBRATION_PATTERN);
                spawn(async move {
                    sleep_ms(SCROLL_DELAY_MS).await;
                    #[cfg(target_arch = "wasm32")]
                    crate::browser::scroll_to_section(SCROLL_TARGET);
                    sleep_ms(RESET_DELAY_MS).await;
                    state.set(IgnitionState::Idle);
                });
            },
            span { "{label}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn granted_state_reads_and_glows_green() {
        let granted = IgnitionState::Granted;
        assert_eq!(granted.label(), "ACCESS GRANTED");
        assert_eq!(granted.class(), "animate-pulse");
        assert!(granted.style().contains("#10B981"));
    }

    #[test]
    fn idle_state_is_plain() {
        let idle = IgnitionState::default();
        assert_eq!(idle.label(), "INITIALIZE SYSTEM");
        assert_eq!((idle.class(), idle.style()), ("", ""));
    }

    #[test]
    fn press_while_granted_is_ignored() {
        let mut state = IgnitionState::default();
        assert!(state.press());
        assert_eq!(state, IgnitionState::Granted);
        assert!(!state.press());
        assert_eq!(state, IgnitionState::Granted);
    }

    #[test]
    fn sequence_timings() {
        assert_eq!((SCROLL_DELAY_MS, RESET_DELAY_MS), (800, 2000));
        assert_eq!(VIBRATION_PATTERN, [100, 50, 100]);
    }
}
