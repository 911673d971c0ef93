//! Confirm Button Component
//!
//! Two-step confirmation for destructive actions such as permanent task
//! deletion and tag deletion.

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Step {
    #[default]
    Idle,
    Asking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Press {
    Open,
    Confirm,
    Cancel,
}

impl Step {
    /// Next step, and whether the action fires
    fn after(self, press: Press) -> (Step, bool) {
        match (self, press) {
            (Step::Idle, Press::Open) => (Step::Asking, false),
            (Step::Asking, Press::Confirm) => (Step::Idle, true),
            (Step::Asking, Press::Cancel) => (Step::Idle, false),
            (step, _) => (step, false),
        }
    }
}

/// `label` until pressed, then `prompt` with confirm and cancel.
/// Clicks never reach the enclosing row.
#[component]
pub fn ConfirmButton(
    #[prop(into)] label: String,
    #[prop(into)] button_class: String,
    #[prop(into, default = "Sure?".to_string())] prompt: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let step = RwSignal::new(Step::Idle);

    let press = move |ev: web_sys::MouseEvent, press: Press| {
        ev.stop_propagation();
        let (next, fire) = step.get_untracked().after(press);
        step.set(next);
        if fire {
            on_confirm.run(());
        }
    };

    move || match step.get() {
        Step::Idle => view! {
            <button class=button_class.clone() on:click=move |ev| press(ev, Press::Open)>
                {label.clone()}
            </button>
        }
        .into_any(),
        Step::Asking => view! {
            <span class="confirm">
                <span class="confirm-text">{prompt.clone()}</span>
                <button class="confirm-btn" on:click=move |ev| press(ev, Press::Confirm)>"✓"</button>
                <button class="cancel-btn" on:click=move |ev| press(ev, Press::Cancel)>"✗"</button>
            </span>
        }
        .into_any(),
    }
}
