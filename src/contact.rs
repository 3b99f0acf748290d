use dioxus::prelude::*;

use crate::browser::sleep_ms;
use crate::config::RuntimeConfig;
use crate::forms::{submit_contact, ContactFields, FormError};

pub const REVERT_DELAY_MS: u32 = 3000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Sending,
    Sent,
    Failed,
}

impl SubmitPhase {
    pub fn label(self) -> &'static str {
        match self {
            SubmitPhase::Idle => "Send Message",
            SubmitPhase::Sending => "Sending...",
            SubmitPhase::Sent => "Message Sent!",
            SubmitPhase::Failed => "Error! Try Again.",
        }
    }

    pub fn tone(self) -> &'static str {
        match self {
            SubmitPhase::Idle | SubmitPhase::Sending => "bg-primary hover:bg-primary/90",
            SubmitPhase::Sent => "bg-green-600 hover:bg-green-700",
            SubmitPhase::Failed => "bg-primary hover:bg-primary/90 bg-red-600",
        }
    }

    pub fn is_sending(self) -> bool {
        self == SubmitPhase::Sending
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SubmissionToken(u64);

// Only the newest token may settle or revert the button.
#[derive(Debug, Default)]
pub struct SubmissionTracker {
    latest: u64,
    phase: SubmitPhase,
}

impl SubmissionTracker {
    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn begin(&mut self) -> SubmissionToken {
        self.latest += 1;
        self.phase = SubmitPhase::Sending;
        SubmissionToken(self.latest)
    }

    pub fn is_current(&self, token: SubmissionToken) -> bool {
        token.0 == self.latest
    }

    pub fn settle(&mut self, token: SubmissionToken, outcome: &Result<(), FormError>) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.phase = match outcome {
            Ok(()) => SubmitPhase::Sent,
            Err(_) => SubmitPhase::Failed,
        };
        true
    }

    pub fn revert(&mut self, token: SubmissionToken) -> bool {
        if !self.is_current(token) || !matches!(self.phase, SubmitPhase::Sent | SubmitPhase::Failed) {
            return false;
        }
        self.phase = SubmitPhase::Idle;
        true
    }
}

#[component]
pub fn ContactForm() -> Element {
    let config = use_context::<RuntimeConfig>();
    let mut fields = use_signal(ContactFields::default);
    let tracker = use_signal(SubmissionTracker::default);

    let phase = tracker.read().phase();
    let label = phase.label();
    let tone = phase.tone();
    let sending = phase.is_sending();
    let loading_icon = if sending { "" } else { "hidden" };
    let send_icon = if sending { "hidden" } else { "" };

    rsx! {
        form {
            id: "contact-form",
            class: "contact-form space-y-6",
            onsubmit: move |event| {
                event.prevent_default();
                if tracker.peek().phase().is_sending() {
                    return;
                }
                let mut tracker = tracker;
                let mut fields = fields;
                let token = tracker.write().begin();
                let payload = fields.peek().clone();
                let endpoint = config.forms_endpoint.clone();
                let access_key = config.forms_access_key.clone();
                tracing::info!("contact: submitting");
                spawn(async move {
                    let outcome = submit_contact(&endpoint, &access_key, &payload).await;
                    match &outcome {
                        Ok(()) => tracing::info!("contact: message sent"),
                        Err(err) => tracing::error!("contact: submission failed: {err}"),
                    }
                    if !tracker.write().settle(token, &outcome) {
                        tracing::debug!("contact: dropped stale response");
                        return;
                    }
                    if outcome.is_ok() {
                        fields.set(ContactFields::default());
                    }
                    sleep_ms(REVERT_DELAY_MS).await;
                    tracker.write().revert(token);
                });
            },
            div { class: "grid md:grid-cols-2 gap-6",
                div { class: "space-y-2",
                    label { r#for: "name", class: "form-label", "Name" }
                    input {
                        id: "name",
                        name: "name",
                        r#type: "text",
                        required: true,
                        class: "form-input",
                        value: "{fields.read().name}",
                        oninput: move |event| fields.write().name = event.value(),
                    }
                }
                div { class: "space-y-2",
                    label { r#for: "email", class: "form-label", "Email" }
                    input {
                        id: "email",
                        name: "email",
                        r#type: "email",
                        required: true,
                        class: "form-input",
                        value: "{fields.read().email}",
                        oninput: move |event| fields.write().email = event.value(),
                    }
                }
            }
            div { class: "space-y-2",
                label { r#for: "subject", class: "form-label", "Subject" }
                input {
                    id: "subject",
                    name: "subject",
                    r#type: "text",
                    class: "form-input",
                    value: "{fields.read().subject}",
                    oninput: move |event| fields.write().subject = event.value(),
                }
            }
            div { class: "space-y-2",
                label { r#for: "message", class: "form-label", "Message" }
                textarea {
                    id: "message",
                    name: "message",
                    rows: "5",
                    required: true,
                    class: "form-input",
                    value: "{fields.read().message}",
                    oninput: move |event| fields.write().message = event.value(),
                }
            }
            button {
                r#type: "submit",
                class: "submit-button {tone}",
                disabled: sending,
                span { "{label}" }
                span { id: "loading-icon", class: "spinner {loading_icon}", aria_hidden: "true" }
                span { id: "send-icon", class: "send-icon {send_icon}", aria_hidden: "true", "➤" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn success_shows_sent_then_reverts() {
        let mut tracker = SubmissionTracker::default();
        let token = tracker.begin();
        assert_eq!(tracker.phase().label(), "Sending...");

        assert!(tracker.settle(token, &Ok(())));
        assert_eq!(tracker.phase().label(), "Message Sent!");
        assert_eq!(tracker.phase().tone(), "bg-green-600 hover:bg-green-700");

        assert!(tracker.revert(token));
        assert_eq!(tracker.phase().label(), "Send Message");
    }

    #[test]
    fn rejection_shows_error_then_reverts() {
        let mut tracker = SubmissionTracker::default();
        let token = tracker.begin();
        assert!(tracker.settle(token, &Err(FormError::Rejected("x".into()))));
        assert_eq!(tracker.phase(), SubmitPhase::Failed);
        assert_eq!(tracker.phase().label(), "Error! Try Again.");
        assert_eq!(tracker.phase().tone(), "bg-primary hover:bg-primary/90 bg-red-600");

        assert!(tracker.revert(token));
        assert_eq!(tracker.phase(), SubmitPhase::Idle);
    }

    #[test]
    fn transport_failure_is_an_error_state() {
        let mut tracker = SubmissionTracker::default();
        let token = tracker.begin();
        tracker.settle(token, &Err(FormError::Transport("offline".into())));
        assert_eq!(tracker.phase(), SubmitPhase::Failed);
    }

    #[test]
    fn stale_response_cannot_overwrite_newer_submission() {
        let mut tracker = SubmissionTracker::default();
        let first = tracker.begin();
        let second = tracker.begin();

        assert!(!tracker.settle(first, &Err(FormError::Rejected("late".into()))));
        assert_eq!(tracker.phase(), SubmitPhase::Sending);

        assert!(tracker.settle(second, &Ok(())));
        assert_eq!(tracker.phase(), SubmitPhase::Sent);
    }

    #[test]
    fn older_revert_timer_leaves_newer_state_alone() {
        let mut tracker = SubmissionTracker::default();
        let first = tracker.begin();
        tracker.settle(first, &Ok(()));
        let second = tracker.begin();

        assert!(!tracker.revert(first));
        assert_eq!(tracker.phase(), SubmitPhase::Sending);

        tracker.settle(second, &Err(FormError::Decode("bad json".into())));
        assert!(tracker.revert(second));
        assert_eq!(tracker.phase(), SubmitPhase::Idle);
    }

    #[test]
    fn revert_while_sending_is_ignored() {
        let mut tracker = SubmissionTracker::default();
        let token = tracker.begin();
        assert!(!tracker.revert(token));
        assert!(tracker.phase().is_sending());
    }

    #[test]
    fn revert_delay_is_three_seconds() {
        assert_eq!(REVERT_DELAY_MS, 3000);
    }
}
