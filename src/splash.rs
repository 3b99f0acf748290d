use dioxus::prelude::*;

use crate::browser::sleep_ms;

pub const FADE_DELAY_MS: u32 = 500;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SplashGate {
    #[default]
    Locked,
    Igniting,
    Open,
}

impl SplashGate {
    pub fn ignite(&mut self) -> bool {
        if *self != SplashGate::Locked {
            return false;
        }
        *self = SplashGate::Igniting;
        true
    }

    pub fn finish(&mut self) {
        if *self == SplashGate::Igniting {
            *self = SplashGate::Open;
        }
    }

    pub fn scroll_locked(self) -> bool {
        self != SplashGate::Open
    }

    pub fn screen_class(self) -> &'static str {
        match self {
            SplashGate::Open => "hidden-splash",
            SplashGate::Locked | SplashGate::Igniting => "",
        }
    }

    pub fn button_class(self) -> &'static str {
        match self {
            SplashGate::Locked => "pulsing",
            SplashGate::Igniting | SplashGate::Open => "",
        }
    }

    pub fn button_style(self) -> &'static str {
        match self {
            SplashGate::Locked => "",
            SplashGate::Igniting | SplashGate::Open => {
                "transform: scale(0.95); box-shadow: inset 0 0 30px rgba(0,0,0,0.9); border-color: #10B981;"
            }
        }
    }
}

#[component]
pub fn SplashScreen() -> Element {
    let mut gate = use_signal(SplashGate::default);

    use_effect(move || {
        let _locked = gate().scroll_locked();
        #[cfg(target_arch = "wasm32")]
        crate::browser::set_body_scroll_locked(_locked);
    });

    let state = gate();
    let screen_class = state.screen_class();
    let button_class = state.button_class();
    let button_style = state.button_style();

    rsx! {
        div { id: "splash-screen", class: "splash-screen {screen_class}",
            div { class: "splash-content flex flex-col items-center gap-6",
                p { class: "splash-hint font-mono text-xs tracking-widest", "PRESS TO START" }
                button {
                    id: "engine-start-btn",
                    r#type: "button",
                    class: "engine-start-btn {button_class}",
                    style: "{button_style}",
                    onclick: move |_| {
                        if !gate.write().ignite() {
                            return;
                        }
                        tracing::debug!("splash: ignition");
                        spawn(async move {
                            sleep_ms(FADE_DELAY_MS).await;
                            gate.write().finish();
                        });
                    },
                    span { class: "engine-start-label", "ENGINE" }
                    span { class: "engine-start-label", "START" }
                    span { class: "engine-stop-label", "STOP" }
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
    fn gate_runs_once_in_order() {
        let mut gate = SplashGate::default();
        assert!(gate.scroll_locked());
        assert_eq!(gate.button_class(), "pulsing");

        assert!(gate.ignite());
        assert!(!gate.ignite());
        assert!(gate.scroll_locked());
        assert_eq!(gate.button_class(), "");
        assert!(gate.button_style().contains("scale(0.95)"));

        gate.finish();
        assert_eq!(gate, SplashGate::Open);
        assert!(!gate.scroll_locked());
        assert_eq!(gate.screen_class(), "hidden-splash");
    }

    #[test]
    fn finish_before_ignition_does_nothing() {
        let mut gate = SplashGate::default();
        gate.finish();
        assert_eq!(gate, SplashGate::Locked);
    }

    #[test]
    fn fade_delay_is_half_a_second() {
        assert_eq!(FADE_DELAY_MS, 500);
    }
}
